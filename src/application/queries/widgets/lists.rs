// src/application/queries/widgets/lists.rs
use super::WidgetQueryService;
use crate::application::{
    dto::{CategoryDto, TagUsageDto},
    error::ApplicationResult,
};

impl WidgetQueryService {
    /// Categories holding at least one public entry, ordered by title.
    pub async fn category_list(&self, count: Option<usize>) -> ApplicationResult<Vec<CategoryDto>> {
        let used = self
            .read_repo
            .used_categories(&self.manager.public_filter())
            .await?;

        Ok(self
            .category_repo
            .list()
            .await?
            .into_iter()
            .filter(|category| used.contains(&category.id))
            .take(count.unwrap_or(usize::MAX))
            .map(Into::into)
            .collect())
    }

    /// Tag cloud over public entries. Empty when tagging is switched off.
    pub async fn tag_list(&self, count: Option<usize>) -> ApplicationResult<Vec<TagUsageDto>> {
        if !self.tags.is_enabled() {
            return Ok(Vec::new());
        }

        let usage = self.tags.usage_counts(self.manager.now()).await?;
        Ok(usage
            .into_iter()
            .take(count.unwrap_or(usize::MAX))
            .map(Into::into)
            .collect())
    }
}
