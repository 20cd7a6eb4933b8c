use crate::domain::category::entity::{Category, CategoryUpdate, NewCategory};
use crate::domain::category::value_objects::{CategoryId, CategorySlug};
use crate::domain::errors::DomainResult;
use crate::domain::slugs::SlugIndex;
use async_trait::async_trait;

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn insert(&self, category: NewCategory) -> DomainResult<Category>;
    async fn update(&self, update: CategoryUpdate) -> DomainResult<Category>;
    /// Removes the category together with its entry associations.
    async fn delete(&self, id: CategoryId) -> DomainResult<()>;
    async fn find_by_id(&self, id: CategoryId) -> DomainResult<Option<Category>>;
    async fn find_by_slug(&self, slug: &CategorySlug) -> DomainResult<Option<Category>>;
    /// All categories ordered by title.
    async fn list(&self) -> DomainResult<Vec<Category>>;
}

#[async_trait]
impl SlugIndex for dyn CategoryRepository {
    async fn is_taken(&self, slug: &str) -> DomainResult<bool> {
        Ok(self.find_by_slug(&CategorySlug::new(slug)?).await?.is_some())
    }
}
