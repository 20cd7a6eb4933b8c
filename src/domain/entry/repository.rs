use crate::domain::category::CategoryId;
use crate::domain::entry::entity::{Entry, EntryUpdate, NewEntry};
use crate::domain::entry::filter::{EntryFilter, EntryPage, PageRequest};
use crate::domain::entry::value_objects::{EntryId, EntrySlug};
use crate::domain::errors::DomainResult;
use crate::domain::slugs::SlugIndex;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

#[async_trait]
pub trait EntryWriteRepository: Send + Sync {
    async fn insert(&self, entry: NewEntry) -> DomainResult<Entry>;
    /// Last write wins; there is no version check.
    async fn update(&self, update: EntryUpdate) -> DomainResult<Entry>;
    async fn delete(&self, id: EntryId) -> DomainResult<()>;
}

#[async_trait]
pub trait EntryReadRepository: Send + Sync {
    async fn find_by_id(&self, id: EntryId) -> DomainResult<Option<Entry>>;
    async fn find_by_slug(&self, slug: &EntrySlug) -> DomainResult<Option<Entry>>;
    /// Matching entries, newest first, optionally truncated to `limit`.
    async fn list(&self, filter: &EntryFilter, limit: Option<u32>) -> DomainResult<Vec<Entry>>;
    async fn list_page(&self, filter: &EntryFilter, page: PageRequest) -> DomainResult<EntryPage>;
    async fn count(&self, filter: &EntryFilter) -> DomainResult<u64>;
    /// Publish dates of matching entries that have one.
    async fn publish_dates(&self, filter: &EntryFilter) -> DomainResult<Vec<DateTime<Utc>>>;
    /// Categories referenced by at least one matching entry.
    async fn used_categories(&self, filter: &EntryFilter) -> DomainResult<BTreeSet<CategoryId>>;
}

#[async_trait]
impl SlugIndex for dyn EntryReadRepository {
    async fn is_taken(&self, slug: &str) -> DomainResult<bool> {
        Ok(self.find_by_slug(&EntrySlug::new(slug)?).await?.is_some())
    }
}
