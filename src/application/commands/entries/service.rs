// src/application/commands/entries/service.rs
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::{
    application::{
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
    },
    domain::{
        category::{CategoryId, CategoryRepository},
        entry::{Entry, EntryId, EntryReadRepository, EntryWriteRepository},
        slugs::SlugService,
    },
};

pub struct EntryCommandService {
    pub(super) write_repo: Arc<dyn EntryWriteRepository>,
    pub(super) read_repo: Arc<dyn EntryReadRepository>,
    pub(super) category_repo: Arc<dyn CategoryRepository>,
    pub(super) slugs: Arc<SlugService>,
    pub(super) clock: Arc<dyn Clock>,
}

impl EntryCommandService {
    pub fn new(
        write_repo: Arc<dyn EntryWriteRepository>,
        read_repo: Arc<dyn EntryReadRepository>,
        category_repo: Arc<dyn CategoryRepository>,
        slugs: Arc<SlugService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            write_repo,
            read_repo,
            category_repo,
            slugs,
            clock,
        }
    }

    pub(super) async fn load(&self, id: EntryId) -> ApplicationResult<Entry> {
        self.read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("entry {id} not found")))
    }

    /// Validates that every referenced category exists.
    pub(super) async fn resolve_categories(
        &self,
        ids: &[i64],
    ) -> ApplicationResult<BTreeSet<CategoryId>> {
        let mut resolved = BTreeSet::new();
        for raw in ids {
            let id = CategoryId::new(*raw)?;
            if self.category_repo.find_by_id(id).await?.is_none() {
                return Err(ApplicationError::validation(format!(
                    "unknown category {raw}"
                )));
            }
            resolved.insert(id);
        }
        Ok(resolved)
    }
}
