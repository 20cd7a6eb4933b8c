// src/application/queries/entries/category.rs
use super::EntryQueryService;
use crate::{
    application::{
        dto::{AuthenticatedUser, CategoryEntriesDto, EntryPageDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        category::CategorySlug,
        entry::{EntryFilter, PageRequest},
    },
};

pub struct CategoryEntriesQuery {
    pub slug: String,
    pub page: u32,
    pub per_page: u32,
}

impl EntryQueryService {
    /// Entries filed under a category. Staff see every state; everyone
    /// else only sees public entries.
    pub async fn category_entries(
        &self,
        actor: Option<&AuthenticatedUser>,
        query: CategoryEntriesQuery,
    ) -> ApplicationResult<CategoryEntriesDto> {
        let not_found = || ApplicationError::not_found("category not found");
        let slug = CategorySlug::new(query.slug).map_err(|_| not_found())?;
        let category = self
            .category_repo
            .find_by_slug(&slug)
            .await?
            .ok_or_else(not_found)?;

        let filter = if actor.is_some_and(|a| a.is_staff()) {
            EntryFilter::all()
        } else {
            self.manager.public_filter()
        }
        .in_category(category.id);

        let request = PageRequest::new(query.page, query.per_page, self.settings.archive_page_size);
        let page = self.read_repo.list_page(&filter, request).await?;

        Ok(CategoryEntriesDto {
            category: category.into(),
            entries: EntryPageDto::new(page, request),
        })
    }
}
