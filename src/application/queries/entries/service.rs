// src/application/queries/entries/service.rs
use std::sync::Arc;

use crate::{
    application::{
        error::{ApplicationError, ApplicationResult},
        ports::tags::TagProvider,
        queries::manager::EntryQueryManager,
        services::BlogSettings,
    },
    domain::{
        category::CategoryRepository,
        entry::{Entry, EntryId, EntryReadRepository},
    },
};

pub struct EntryQueryService {
    pub(super) read_repo: Arc<dyn EntryReadRepository>,
    pub(super) category_repo: Arc<dyn CategoryRepository>,
    pub(super) tags: Arc<dyn TagProvider>,
    pub(super) manager: Arc<EntryQueryManager>,
    pub(super) settings: BlogSettings,
}

impl EntryQueryService {
    pub fn new(
        read_repo: Arc<dyn EntryReadRepository>,
        category_repo: Arc<dyn CategoryRepository>,
        tags: Arc<dyn TagProvider>,
        manager: Arc<EntryQueryManager>,
        settings: BlogSettings,
    ) -> Self {
        Self {
            read_repo,
            category_repo,
            tags,
            manager,
            settings,
        }
    }

    pub(super) async fn load(&self, id: i64) -> ApplicationResult<Entry> {
        let id = EntryId::new(id)?;
        self.read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("entry {id} not found")))
    }
}
