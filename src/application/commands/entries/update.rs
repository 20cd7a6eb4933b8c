// src/application/commands/entries/update.rs
use super::EntryCommandService;
use crate::{
    application::{
        commands::ensure_capability,
        dto::{AuthenticatedUser, EntryDto},
        error::ApplicationResult,
    },
    domain::entry::{
        EntryContent, EntryExtract, EntryId, EntrySlug, EntryTitle, EntryUpdate, TagList,
    },
};

/// Content edit. Absent fields are left as they are; an empty `extract`
/// clears it. The slug only changes when one is supplied.
#[derive(Default)]
pub struct UpdateEntryCommand {
    pub id: i64,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub extract: Option<String>,
    pub content: Option<String>,
    pub tags: Option<String>,
    pub category_ids: Option<Vec<i64>>,
    pub allow_comments: Option<bool>,
}

impl EntryCommandService {
    pub async fn update_entry(
        &self,
        actor: &AuthenticatedUser,
        command: UpdateEntryCommand,
    ) -> ApplicationResult<EntryDto> {
        ensure_capability(actor, "entries", "update")?;

        let id = EntryId::new(command.id)?;
        self.load(id).await?;

        let mut update = EntryUpdate::new(id, self.clock.now());
        if let Some(title) = command.title {
            update = update.with_title(EntryTitle::new(title)?);
        }
        if let Some(slug) = command.slug {
            update = update.with_slug(EntrySlug::new(slug)?);
        }
        if let Some(extract) = command.extract {
            update = update.with_extract(EntryExtract::parse(Some(extract)));
        }
        if let Some(content) = command.content {
            update = update.with_content(EntryContent::new(content)?);
        }
        if let Some(tags) = command.tags {
            update = update.with_tags(TagList::parse(&tags)?);
        }
        if let Some(ids) = command.category_ids {
            update = update.with_categories(self.resolve_categories(&ids).await?);
        }
        if let Some(allow) = command.allow_comments {
            update = update.with_allow_comments(allow);
        }

        let updated = self.write_repo.update(update).await?;
        tracing::debug!(entry_id = %updated.id, "entry updated");
        Ok(updated.into())
    }
}
