// src/application/commands/categories/create.rs
use super::CategoryCommandService;
use crate::{
    application::{
        commands::ensure_capability,
        dto::{AuthenticatedUser, CategoryDto},
        error::ApplicationResult,
    },
    domain::category::{CategoryDescription, CategorySlug, CategoryTitle, NewCategory},
};

pub struct CreateCategoryCommand {
    pub title: String,
    pub slug: Option<String>,
    pub description: Option<String>,
}

impl CategoryCommandService {
    pub async fn create_category(
        &self,
        actor: &AuthenticatedUser,
        command: CreateCategoryCommand,
    ) -> ApplicationResult<CategoryDto> {
        ensure_capability(actor, "categories", "manage")?;

        let title = CategoryTitle::new(command.title)?;
        let slug = match command.slug {
            Some(slug) => CategorySlug::new(slug)?,
            None => CategorySlug::new(
                self.slugs
                    .unique(&*self.repo, title.as_str(), "category")
                    .await?,
            )?,
        };

        let created = self
            .repo
            .insert(NewCategory {
                title,
                slug,
                description: CategoryDescription::new(command.description.unwrap_or_default()),
            })
            .await?;
        tracing::info!(category_id = created.id.0, slug = %created.slug, "category created");
        Ok(created.into())
    }
}
