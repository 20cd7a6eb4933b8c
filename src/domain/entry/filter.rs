// src/domain/entry/filter.rs
use crate::domain::category::CategoryId;
use crate::domain::entry::entity::Entry;
use crate::domain::entry::state::PublicationState;
use crate::domain::entry::tags::Tag;
use crate::domain::entry::value_objects::{EntryExtract, EntrySlug};
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Which publication states a listing may expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Every entry regardless of state (staff and admin listings).
    #[default]
    Any,
    /// Published entries whose publish date is not after `now`.
    Public { now: DateTime<Utc> },
}

/// Conjunction of criteria used by every entry listing.
///
/// Repositories translate it into their own query language; [`matches`]
/// is the reference semantics.
///
/// [`matches`]: EntryFilter::matches
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    pub visibility: Visibility,
    /// Entry must belong to at least one of these categories.
    pub categories: Option<BTreeSet<CategoryId>>,
    pub tag: Option<Tag>,
    /// Inclusive lower bound on the publish date.
    pub published_from: Option<DateTime<Utc>>,
    /// Exclusive upper bound on the publish date.
    pub published_until: Option<DateTime<Utc>>,
    pub exclude_slug: Option<EntrySlug>,
    pub author: Option<UserId>,
    pub state: Option<PublicationState>,
    pub allow_comments: Option<bool>,
    /// Lowercased term looked up in title, slug, extract and content.
    pub search: Option<String>,
}

impl EntryFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn public(now: DateTime<Utc>) -> Self {
        Self {
            visibility: Visibility::Public { now },
            ..Self::default()
        }
    }

    pub fn in_category(self, id: CategoryId) -> Self {
        self.in_any_category(BTreeSet::from([id]))
    }

    pub fn in_any_category(mut self, ids: BTreeSet<CategoryId>) -> Self {
        self.categories = Some(ids);
        self
    }

    pub fn tagged(mut self, tag: Tag) -> Self {
        self.tag = Some(tag);
        self
    }

    pub fn published_within(mut self, from: DateTime<Utc>, until: DateTime<Utc>) -> Self {
        self.published_from = Some(from);
        self.published_until = Some(until);
        self
    }

    pub fn excluding(mut self, slug: EntrySlug) -> Self {
        self.exclude_slug = Some(slug);
        self
    }

    pub fn by_author(mut self, author: UserId) -> Self {
        self.author = Some(author);
        self
    }

    pub fn in_state(mut self, state: PublicationState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn with_comments(mut self, allowed: bool) -> Self {
        self.allow_comments = Some(allowed);
        self
    }

    /// Case-insensitive substring search; blank terms are ignored.
    pub fn searching(mut self, term: &str) -> Self {
        let term = term.trim();
        self.search = (!term.is_empty()).then(|| term.to_lowercase());
        self
    }

    pub fn matches(&self, entry: &Entry) -> bool {
        if let Visibility::Public { now } = self.visibility {
            if !entry.is_public(now) {
                return false;
            }
        }

        if let Some(categories) = &self.categories {
            if entry.categories.is_disjoint(categories) {
                return false;
            }
        }

        if let Some(tag) = &self.tag {
            if !entry.tags.contains(tag) {
                return false;
            }
        }

        if self.published_from.is_some() || self.published_until.is_some() {
            let Some(published) = entry.publish_at else {
                return false;
            };
            if self.published_from.is_some_and(|from| published < from) {
                return false;
            }
            if self.published_until.is_some_and(|until| published >= until) {
                return false;
            }
        }

        if let Some(slug) = &self.exclude_slug {
            if &entry.slug == slug {
                return false;
            }
        }

        if self.author.is_some_and(|author| author != entry.author_id)
            || self.state.is_some_and(|state| state != entry.state)
            || self
                .allow_comments
                .is_some_and(|allowed| allowed != entry.allow_comments)
        {
            return false;
        }

        if let Some(term) = &self.search {
            let found = [
                Some(entry.title.as_str()),
                Some(entry.slug.as_str()),
                entry.extract.as_ref().map(EntryExtract::as_str),
                Some(entry.content.as_str()),
            ]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(term.as_str()));
            if !found {
                return false;
            }
        }

        true
    }
}

/// Listing order: newest publish date first (unpublished last), then newest
/// creation, then highest id.
pub fn newest_first(a: &Entry, b: &Entry) -> Ordering {
    match (a.publish_at, b.publish_at) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| b.created_at.cmp(&a.created_at))
    .then_with(|| b.id.cmp(&a.id))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub per_page: u32,
}

impl PageRequest {
    pub const MAX_PER_PAGE: u32 = 100;

    /// `page` is 1-based; zero values fall back to the first page and
    /// `default_per_page`.
    pub fn new(page: u32, per_page: u32, default_per_page: u32) -> Self {
        let per_page = if per_page == 0 {
            default_per_page
        } else {
            per_page
        };
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, Self::MAX_PER_PAGE),
        }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page)
    }
}

#[derive(Debug, Clone)]
pub struct EntryPage {
    pub entries: Vec<Entry>,
    pub total: u64,
}
