// src/application/queries/widgets/service.rs
use std::sync::Arc;

use crate::{
    application::{ports::tags::TagProvider, queries::manager::EntryQueryManager},
    domain::{category::CategoryRepository, entry::EntryReadRepository},
};

pub struct WidgetQueryService {
    pub(super) read_repo: Arc<dyn EntryReadRepository>,
    pub(super) category_repo: Arc<dyn CategoryRepository>,
    pub(super) tags: Arc<dyn TagProvider>,
    pub(super) manager: Arc<EntryQueryManager>,
}

impl WidgetQueryService {
    pub fn new(
        read_repo: Arc<dyn EntryReadRepository>,
        category_repo: Arc<dyn CategoryRepository>,
        tags: Arc<dyn TagProvider>,
        manager: Arc<EntryQueryManager>,
    ) -> Self {
        Self {
            read_repo,
            category_repo,
            tags,
            manager,
        }
    }
}
