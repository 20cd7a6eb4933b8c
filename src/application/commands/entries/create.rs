// src/application/commands/entries/create.rs
use super::EntryCommandService;
use crate::{
    application::{
        commands::ensure_capability,
        dto::{AuthenticatedUser, EntryDto},
        error::ApplicationResult,
    },
    domain::entry::{EntryContent, EntryExtract, EntrySlug, EntryTitle, NewEntry, TagList},
};

pub struct CreateEntryCommand {
    pub title: String,
    /// Generated from the title when absent.
    pub slug: Option<String>,
    pub extract: Option<String>,
    pub content: String,
    pub tags: String,
    pub category_ids: Vec<i64>,
    pub allow_comments: Option<bool>,
}

impl EntryCommandService {
    pub async fn create_entry(
        &self,
        actor: &AuthenticatedUser,
        command: CreateEntryCommand,
    ) -> ApplicationResult<EntryDto> {
        ensure_capability(actor, "entries", "create")?;

        let title = EntryTitle::new(command.title)?;
        let content = EntryContent::new(command.content)?;
        let tags = TagList::parse(&command.tags)?;
        let categories = self.resolve_categories(&command.category_ids).await?;

        let slug = match command.slug {
            Some(slug) => EntrySlug::new(slug)?,
            None => EntrySlug::new(
                self.slugs
                    .unique(&*self.read_repo, title.as_str(), "entry")
                    .await?,
            )?,
        };

        let new_entry = NewEntry {
            title,
            slug,
            extract: EntryExtract::parse(command.extract),
            content,
            tags,
            categories,
            author_id: actor.id,
            allow_comments: command.allow_comments.unwrap_or(true),
            created_at: self.clock.now(),
        };

        let created = self.write_repo.insert(new_entry).await?;
        tracing::info!(entry_id = %created.id, slug = %created.slug, "entry created");
        Ok(created.into())
    }
}
