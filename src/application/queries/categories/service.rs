// src/application/queries/categories/service.rs
use std::sync::Arc;

use crate::domain::category::CategoryRepository;

pub struct CategoryQueryService {
    pub(super) repo: Arc<dyn CategoryRepository>,
}

impl CategoryQueryService {
    pub fn new(repo: Arc<dyn CategoryRepository>) -> Self {
        Self { repo }
    }
}
