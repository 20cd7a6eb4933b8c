// src/application/commands/categories/service.rs
use std::sync::Arc;

use crate::domain::{category::CategoryRepository, slugs::SlugService};

pub struct CategoryCommandService {
    pub(super) repo: Arc<dyn CategoryRepository>,
    pub(super) slugs: Arc<SlugService>,
}

impl CategoryCommandService {
    pub fn new(repo: Arc<dyn CategoryRepository>, slugs: Arc<SlugService>) -> Self {
        Self { repo, slugs }
    }
}
