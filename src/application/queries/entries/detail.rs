// src/application/queries/entries/detail.rs
use super::EntryQueryService;
use crate::{
    application::{
        content::{ModifierRegistry, ModifierSelection},
        dto::{CategoryDto, EntryDetailDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::entry::{ArchivePeriod, Entry, EntrySlug},
};

/// Modifiers applied on the detail page unless the caller picks others.
/// The full body is shown there, so truncation is skipped.
pub const DETAIL_MODIFIERS: &str = "!more";

pub struct EntryDetailQuery {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub slug: String,
    pub modify: Option<String>,
}

impl EntryQueryService {
    pub async fn entry_detail(&self, query: EntryDetailQuery) -> ApplicationResult<EntryDetailDto> {
        let period = ArchivePeriod::day(query.year, query.month, query.day)?;
        let not_found = || ApplicationError::not_found("entry not found");

        let slug = EntrySlug::new(query.slug).map_err(|_| not_found())?;
        let entry = self
            .read_repo
            .find_by_slug(&slug)
            .await?
            .ok_or_else(not_found)?;

        let public = self.manager.public_filter();
        let visible =
            public.matches(&entry) && entry.publish_at.is_some_and(|at| period.contains(at));
        if !visible {
            return Err(not_found());
        }

        let selection: ModifierSelection = query
            .modify
            .as_deref()
            .unwrap_or(DETAIL_MODIFIERS)
            .parse()
            .unwrap_or_default();
        let rendered_content =
            ModifierRegistry::global().apply(entry.content.as_str(), &selection);
        let categories = self.categories_of(&entry).await?;

        Ok(EntryDetailDto {
            entry: entry.into(),
            rendered_content,
            categories,
        })
    }

    pub(super) async fn categories_of(&self, entry: &Entry) -> ApplicationResult<Vec<CategoryDto>> {
        let mut categories = Vec::with_capacity(entry.categories.len());
        for id in &entry.categories {
            if let Some(category) = self.category_repo.find_by_id(*id).await? {
                categories.push(category.into());
            }
        }
        Ok(categories)
    }
}
