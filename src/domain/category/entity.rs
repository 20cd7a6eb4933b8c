// src/domain/category/entity.rs
use crate::domain::category::value_objects::{
    CategoryDescription, CategoryId, CategorySlug, CategoryTitle,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub title: CategoryTitle,
    pub slug: CategorySlug,
    pub description: CategoryDescription,
}

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub title: CategoryTitle,
    pub slug: CategorySlug,
    pub description: CategoryDescription,
}

#[derive(Debug, Clone)]
pub struct CategoryUpdate {
    pub id: CategoryId,
    pub title: Option<CategoryTitle>,
    pub slug: Option<CategorySlug>,
    pub description: Option<CategoryDescription>,
}

impl CategoryUpdate {
    pub fn new(id: CategoryId) -> Self {
        Self {
            id,
            title: None,
            slug: None,
            description: None,
        }
    }

    pub fn with_title(mut self, title: CategoryTitle) -> Self {
        self.title = Some(title);
        self
    }

    pub fn with_slug(mut self, slug: CategorySlug) -> Self {
        self.slug = Some(slug);
        self
    }

    pub fn with_description(mut self, description: CategoryDescription) -> Self {
        self.description = Some(description);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.slug.is_none() && self.description.is_none()
    }
}
