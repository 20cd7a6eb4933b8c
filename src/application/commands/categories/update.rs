// src/application/commands/categories/update.rs
use super::CategoryCommandService;
use crate::{
    application::{
        commands::ensure_capability,
        dto::{AuthenticatedUser, CategoryDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::category::{
        CategoryDescription, CategoryId, CategorySlug, CategoryTitle, CategoryUpdate,
    },
};

pub struct UpdateCategoryCommand {
    pub id: i64,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
}

impl CategoryCommandService {
    pub async fn update_category(
        &self,
        actor: &AuthenticatedUser,
        command: UpdateCategoryCommand,
    ) -> ApplicationResult<CategoryDto> {
        ensure_capability(actor, "categories", "manage")?;

        let id = CategoryId::new(command.id)?;
        let existing = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("category not found"))?;

        let mut update = CategoryUpdate::new(id);
        if let Some(title) = command.title {
            update = update.with_title(CategoryTitle::new(title)?);
        }
        if let Some(slug) = command.slug {
            update = update.with_slug(CategorySlug::new(slug)?);
        }
        if let Some(description) = command.description {
            update = update.with_description(CategoryDescription::new(description));
        }

        if update.is_empty() {
            return Ok(existing.into());
        }

        let updated = self.repo.update(update).await?;
        Ok(updated.into())
    }
}
