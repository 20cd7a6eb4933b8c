// src/application/queries/entries/admin.rs
use super::EntryQueryService;
use crate::{
    application::{
        commands::ensure_capability,
        dto::{AuthenticatedUser, EntryActionsDto, EntryDto, EntryPageDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        entry::{ArchivePeriod, EntryFilter, PageRequest, PublicationState},
        user::UserId,
    },
};

#[derive(Debug, Default)]
pub struct ListAdminEntriesQuery {
    pub page: u32,
    pub per_page: u32,
    pub author_id: Option<i64>,
    pub state: Option<String>,
    pub allow_comments: Option<bool>,
    /// Free text matched against title, slug, extract and content.
    pub search: Option<String>,
    /// Publish-date drill down; `month` requires `year`.
    pub year: Option<i32>,
    pub month: Option<u32>,
}

impl ListAdminEntriesQuery {
    fn filter(&self) -> ApplicationResult<EntryFilter> {
        let mut filter = EntryFilter::all();
        if let Some(author) = self.author_id {
            filter = filter.by_author(UserId::new(author)?);
        }
        if let Some(state) = &self.state {
            filter = filter.in_state(state.parse::<PublicationState>()?);
        }
        if let Some(allowed) = self.allow_comments {
            filter = filter.with_comments(allowed);
        }
        if let Some(term) = &self.search {
            filter = filter.searching(term);
        }

        let period = match (self.year, self.month) {
            (None, None) => None,
            (Some(year), None) => Some(ArchivePeriod::year(year)),
            (Some(year), Some(month)) => Some(ArchivePeriod::month(year, month)),
            (None, Some(_)) => {
                return Err(ApplicationError::validation("month filter requires a year"));
            }
        };
        if let Some(period) = period {
            let (from, until) = period
                .ok()
                .as_ref()
                .and_then(ArchivePeriod::bounds)
                .ok_or_else(|| ApplicationError::validation("invalid publish date filter"))?;
            filter = filter.published_within(from, until);
        }

        Ok(filter)
    }
}

impl EntryQueryService {
    /// Entries in any state, newest first, narrowed by the optional criteria.
    pub async fn list_entries(
        &self,
        actor: &AuthenticatedUser,
        query: ListAdminEntriesQuery,
    ) -> ApplicationResult<EntryPageDto> {
        ensure_capability(actor, "entries", "view:drafts")?;
        let request = PageRequest::new(query.page, query.per_page, self.settings.archive_page_size);
        let filter = query.filter()?;
        let page = self.read_repo.list_page(&filter, request).await?;
        Ok(EntryPageDto::new(page, request))
    }

    pub async fn get_entry(&self, actor: &AuthenticatedUser, id: i64) -> ApplicationResult<EntryDto> {
        ensure_capability(actor, "entries", "view:drafts")?;
        Ok(self.load(id).await?.into())
    }

    pub async fn entry_actions(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
    ) -> ApplicationResult<EntryActionsDto> {
        ensure_capability(actor, "entries", "view:drafts")?;
        let entry = self.load(id).await?;
        Ok(EntryActionsDto::from(&entry))
    }
}
