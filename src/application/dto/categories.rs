use crate::domain::category::Category;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::EntryPageDto;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct CategoryDto {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub url: String,
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        let url = format!("/blog/categories/{}", category.slug.as_str());
        Self {
            id: category.id.into(),
            title: category.title.into_inner(),
            slug: category.slug.into_inner(),
            description: category.description.into_inner(),
            url,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryEntriesDto {
    pub category: CategoryDto,
    pub entries: EntryPageDto,
}
