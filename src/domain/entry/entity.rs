// src/domain/entry/entity.rs
use crate::domain::category::CategoryId;
use crate::domain::entry::state::{
    EntryAction, PublicationState, Transition, TransitionEffect, transition_for,
};
use crate::domain::entry::tags::TagList;
use crate::domain::entry::value_objects::{
    EntryContent, EntryExtract, EntryId, EntrySlug, EntryTitle,
};
use crate::domain::errors::DomainResult;
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
pub struct Entry {
    pub id: EntryId,
    pub title: EntryTitle,
    pub slug: EntrySlug,
    pub extract: Option<EntryExtract>,
    pub content: EntryContent,
    pub tags: TagList,
    pub categories: BTreeSet<CategoryId>,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub publish_at: Option<DateTime<Utc>>,
    pub state: PublicationState,
    pub allow_comments: bool,
}

impl Entry {
    /// Applies `action` through the transition table together with its
    /// side effects. The entry is left untouched when the action is not
    /// legal for the current state.
    pub fn take_action(
        &mut self,
        action: EntryAction,
        now: DateTime<Utc>,
    ) -> DomainResult<&'static Transition> {
        let transition = transition_for(self.state, action)?;

        for effect in transition.effects {
            match effect {
                TransitionEffect::StampPublishDate => {
                    if self.publish_at.is_none() {
                        self.publish_at = Some(now);
                    }
                }
                TransitionEffect::DisableComments => self.allow_comments = false,
            }
        }

        self.state = transition.to;
        self.modified_at = now;
        Ok(transition)
    }

    pub fn available_actions(&self) -> Vec<EntryAction> {
        self.state.available_actions()
    }

    pub fn set_allow_comments(&mut self, allow: bool, now: DateTime<Utc>) {
        self.allow_comments = allow;
        self.modified_at = now;
    }

    /// Published and not scheduled for a later date.
    pub fn is_public(&self, now: DateTime<Utc>) -> bool {
        self.state == PublicationState::Published
            && self.publish_at.is_some_and(|at| at <= now)
    }

    pub fn shares_category_with(&self, other: &Entry) -> bool {
        !self.categories.is_disjoint(&other.categories)
    }
}

#[derive(Debug, Clone)]
pub struct NewEntry {
    pub title: EntryTitle,
    pub slug: EntrySlug,
    pub extract: Option<EntryExtract>,
    pub content: EntryContent,
    pub tags: TagList,
    pub categories: BTreeSet<CategoryId>,
    pub author_id: UserId,
    pub allow_comments: bool,
    pub created_at: DateTime<Utc>,
}

impl NewEntry {
    /// Entries always start life as drafts with no publish date.
    pub fn initial_state(&self) -> PublicationState {
        PublicationState::Draft
    }
}

/// Partial update. `publish_at` is only ever set, never cleared.
#[derive(Debug, Clone)]
pub struct EntryUpdate {
    pub id: EntryId,
    pub title: Option<EntryTitle>,
    pub slug: Option<EntrySlug>,
    pub extract: Option<Option<EntryExtract>>,
    pub content: Option<EntryContent>,
    pub tags: Option<TagList>,
    pub categories: Option<BTreeSet<CategoryId>>,
    pub state: Option<PublicationState>,
    pub publish_at: Option<DateTime<Utc>>,
    pub allow_comments: Option<bool>,
    pub modified_at: DateTime<Utc>,
}

impl EntryUpdate {
    pub fn new(id: EntryId, modified_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: None,
            slug: None,
            extract: None,
            content: None,
            tags: None,
            categories: None,
            state: None,
            publish_at: None,
            allow_comments: None,
            modified_at,
        }
    }

    /// Captures the workflow fields of an entry after a transition.
    pub fn workflow(entry: &Entry) -> Self {
        let mut update = Self::new(entry.id, entry.modified_at);
        update.state = Some(entry.state);
        update.publish_at = entry.publish_at;
        update.allow_comments = Some(entry.allow_comments);
        update
    }

    pub fn with_title(mut self, title: EntryTitle) -> Self {
        self.title = Some(title);
        self
    }

    pub fn with_slug(mut self, slug: EntrySlug) -> Self {
        self.slug = Some(slug);
        self
    }

    pub fn with_extract(mut self, extract: Option<EntryExtract>) -> Self {
        self.extract = Some(extract);
        self
    }

    pub fn with_content(mut self, content: EntryContent) -> Self {
        self.content = Some(content);
        self
    }

    pub fn with_tags(mut self, tags: TagList) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn with_categories(mut self, categories: BTreeSet<CategoryId>) -> Self {
        self.categories = Some(categories);
        self
    }

    pub fn with_allow_comments(mut self, allow: bool) -> Self {
        self.allow_comments = Some(allow);
        self
    }

    /// Applies the update to an in-memory entry.
    pub fn apply_to(self, entry: &mut Entry) {
        if let Some(title) = self.title {
            entry.title = title;
        }
        if let Some(slug) = self.slug {
            entry.slug = slug;
        }
        if let Some(extract) = self.extract {
            entry.extract = extract;
        }
        if let Some(content) = self.content {
            entry.content = content;
        }
        if let Some(tags) = self.tags {
            entry.tags = tags;
        }
        if let Some(categories) = self.categories {
            entry.categories = categories;
        }
        if let Some(state) = self.state {
            entry.state = state;
        }
        if let Some(publish_at) = self.publish_at {
            entry.publish_at.get_or_insert(publish_at);
        }
        if let Some(allow) = self.allow_comments {
            entry.allow_comments = allow;
        }
        entry.modified_at = self.modified_at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::DomainError;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn sample_entry() -> Entry {
        Entry {
            id: EntryId::new(1).unwrap(),
            title: EntryTitle::new("Demo Entry").unwrap(),
            slug: EntrySlug::new("demo-entry").unwrap(),
            extract: None,
            content: EntryContent::new("A demo entry").unwrap(),
            tags: TagList::empty(),
            categories: BTreeSet::from([CategoryId(1)]),
            author_id: UserId::new(1).unwrap(),
            created_at: now(),
            modified_at: now(),
            publish_at: None,
            state: PublicationState::Draft,
            allow_comments: true,
        }
    }

    #[test]
    fn first_publish_stamps_publish_date() {
        let mut entry = sample_entry();
        let at = now() + Duration::minutes(5);
        entry.take_action(EntryAction::Publish, at).unwrap();
        assert_eq!(entry.state, PublicationState::Published);
        assert_eq!(entry.publish_at, Some(at));
        assert_eq!(entry.modified_at, at);
    }

    #[test]
    fn republishing_keeps_original_publish_date() {
        let mut entry = sample_entry();
        let first = now();
        entry.take_action(EntryAction::Publish, first).unwrap();
        entry
            .take_action(EntryAction::Retract, first + Duration::days(1))
            .unwrap();
        assert_eq!(entry.publish_at, Some(first), "retract must not clear it");

        entry
            .take_action(EntryAction::Publish, first + Duration::days(2))
            .unwrap();
        assert_eq!(entry.publish_at, Some(first));
    }

    #[test]
    fn archive_forces_comments_off() {
        let mut entry = sample_entry();
        entry.take_action(EntryAction::Publish, now()).unwrap();
        assert!(entry.allow_comments);
        entry.take_action(EntryAction::Archive, now()).unwrap();
        assert_eq!(entry.state, PublicationState::Archived);
        assert!(!entry.allow_comments);
    }

    #[test]
    fn retract_keeps_comment_flag() {
        let mut entry = sample_entry();
        entry.take_action(EntryAction::Publish, now()).unwrap();
        entry.take_action(EntryAction::Retract, now()).unwrap();
        assert_eq!(entry.state, PublicationState::Draft);
        assert!(entry.allow_comments);
    }

    #[test]
    fn invalid_action_leaves_entry_untouched() {
        let mut entry = sample_entry();
        let before_modified = entry.modified_at;
        let err = entry
            .take_action(EntryAction::Retract, now() + Duration::hours(1))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidAction { .. }));
        assert_eq!(entry.state, PublicationState::Draft);
        assert_eq!(entry.modified_at, before_modified);
    }

    #[test]
    fn future_publish_date_is_not_public_yet() {
        let mut entry = sample_entry();
        entry.state = PublicationState::Published;
        entry.publish_at = Some(now() + Duration::days(1));
        assert!(!entry.is_public(now()));
        assert!(entry.is_public(now() + Duration::days(1)));
    }

    #[test]
    fn update_never_clears_publish_date() {
        let mut entry = sample_entry();
        entry.take_action(EntryAction::Publish, now()).unwrap();
        let later = now() + Duration::days(3);
        let mut update = EntryUpdate::new(entry.id, later);
        update.publish_at = Some(later);
        update.apply_to(&mut entry);
        assert_eq!(entry.publish_at, Some(now()));
        assert_eq!(entry.modified_at, later);
    }
}
