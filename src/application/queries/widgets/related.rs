// src/application/queries/widgets/related.rs
use super::WidgetQueryService;
use crate::{
    application::{
        dto::EntryDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::entry::EntrySlug,
};

pub const DEFAULT_RELATED_COUNT: usize = 5;

impl WidgetQueryService {
    /// Entries related to a public entry. Shared tags are preferred; when
    /// tagging yields nothing the shared categories decide.
    pub async fn related_entries(
        &self,
        slug: &str,
        count: Option<usize>,
    ) -> ApplicationResult<Vec<EntryDto>> {
        let not_found = || ApplicationError::not_found("entry not found");
        let slug = EntrySlug::new(slug).map_err(|_| not_found())?;
        let entry = self
            .read_repo
            .find_by_slug(&slug)
            .await?
            .filter(|e| e.is_public(self.manager.now()))
            .ok_or_else(not_found)?;

        let count = count.unwrap_or(DEFAULT_RELATED_COUNT);
        if count == 0 {
            return Ok(Vec::new());
        }

        let mut related = if self.tags.is_enabled() {
            self.tags
                .related_entries(&entry, self.manager.now(), count)
                .await?
        } else {
            Vec::new()
        };

        if related.is_empty() {
            let limit = u32::try_from(count).unwrap_or(u32::MAX);
            related = self.manager.related_by_categories(&entry, Some(limit)).await?;
        }

        Ok(related.into_iter().map(Into::into).collect())
    }
}
