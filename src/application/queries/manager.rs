// src/application/queries/manager.rs
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::{
    application::{error::ApplicationResult, ports::time::Clock},
    domain::entry::{Entry, EntryFilter, EntryReadRepository},
};

/// Visibility-aware entry lookups shared by the views and helpers.
pub struct EntryQueryManager {
    read_repo: Arc<dyn EntryReadRepository>,
    clock: Arc<dyn Clock>,
}

impl EntryQueryManager {
    pub fn new(read_repo: Arc<dyn EntryReadRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { read_repo, clock }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Filter selecting entries that anonymous readers may see right now.
    pub fn public_filter(&self) -> EntryFilter {
        EntryFilter::public(self.now())
    }

    /// Published entries whose publish date has passed, newest first.
    pub async fn public(&self) -> ApplicationResult<Vec<Entry>> {
        Ok(self.read_repo.list(&self.public_filter(), None).await?)
    }

    /// Other public entries sharing at least one category with `entry`,
    /// newest first. Only public entries are candidates.
    pub async fn related_by_categories(
        &self,
        entry: &Entry,
        limit: Option<u32>,
    ) -> ApplicationResult<Vec<Entry>> {
        if entry.categories.is_empty() {
            return Ok(Vec::new());
        }

        let filter = self
            .public_filter()
            .in_any_category(entry.categories.clone())
            .excluding(entry.slug.clone());
        Ok(self.read_repo.list(&filter, limit).await?)
    }
}
