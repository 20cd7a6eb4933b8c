// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        ApplicationResult,
        commands::{categories::CategoryCommandService, entries::EntryCommandService},
        dto::AuthenticatedUser,
        ports::{security::TokenManager, tags::TagProvider, time::Clock, util::SlugGenerator},
        queries::{
            categories::CategoryQueryService, entries::EntryQueryService,
            manager::EntryQueryManager, widgets::WidgetQueryService,
        },
    },
    domain::{
        category::CategoryRepository,
        entry::{EntryReadRepository, EntryWriteRepository},
        slugs::SlugService,
    },
};

/// Reader-facing knobs of the blog views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlogSettings {
    /// Answer empty archive buckets with an empty page instead of 404.
    pub archive_allow_empty: bool,
    pub archive_page_size: u32,
    pub tag_page_size: u32,
}

impl Default for BlogSettings {
    fn default() -> Self {
        Self {
            archive_allow_empty: true,
            archive_page_size: 20,
            tag_page_size: 10,
        }
    }
}

pub struct ApplicationServices {
    pub entry_commands: Arc<EntryCommandService>,
    pub entry_queries: Arc<EntryQueryService>,
    pub category_commands: Arc<CategoryCommandService>,
    pub category_queries: Arc<CategoryQueryService>,
    pub widgets: Arc<WidgetQueryService>,
    pub entry_manager: Arc<EntryQueryManager>,
    token_manager: Arc<dyn TokenManager>,
}

impl ApplicationServices {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        entry_write_repo: Arc<dyn EntryWriteRepository>,
        entry_read_repo: Arc<dyn EntryReadRepository>,
        category_repo: Arc<dyn CategoryRepository>,
        tag_provider: Arc<dyn TagProvider>,
        token_manager: Arc<dyn TokenManager>,
        clock: Arc<dyn Clock>,
        slugger: Arc<dyn SlugGenerator>,
        settings: BlogSettings,
    ) -> Self {
        let slugs = Arc::new(SlugService::new(slugger));

        let entry_manager = Arc::new(EntryQueryManager::new(
            Arc::clone(&entry_read_repo),
            Arc::clone(&clock),
        ));

        let entry_commands = Arc::new(EntryCommandService::new(
            Arc::clone(&entry_write_repo),
            Arc::clone(&entry_read_repo),
            Arc::clone(&category_repo),
            Arc::clone(&slugs),
            Arc::clone(&clock),
        ));

        let entry_queries = Arc::new(EntryQueryService::new(
            Arc::clone(&entry_read_repo),
            Arc::clone(&category_repo),
            Arc::clone(&tag_provider),
            Arc::clone(&entry_manager),
            settings,
        ));

        let category_commands = Arc::new(CategoryCommandService::new(
            Arc::clone(&category_repo),
            slugs,
        ));
        let category_queries = Arc::new(CategoryQueryService::new(Arc::clone(&category_repo)));

        let widgets = Arc::new(WidgetQueryService::new(
            Arc::clone(&entry_read_repo),
            Arc::clone(&category_repo),
            Arc::clone(&tag_provider),
            Arc::clone(&entry_manager),
        ));

        Self {
            entry_commands,
            entry_queries,
            category_commands,
            category_queries,
            widgets,
            entry_manager,
            token_manager,
        }
    }

    pub fn token_manager(&self) -> Arc<dyn TokenManager> {
        Arc::clone(&self.token_manager)
    }

    /// Resolves a raw bearer token into the acting user.
    pub async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        self.token_manager.authenticate(token).await
    }
}
