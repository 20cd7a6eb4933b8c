// src/application/commands/categories/delete.rs
use super::CategoryCommandService;
use crate::{
    application::{
        commands::ensure_capability,
        dto::AuthenticatedUser,
        error::{ApplicationError, ApplicationResult},
    },
    domain::category::CategoryId,
};

pub struct DeleteCategoryCommand {
    pub id: i64,
}

impl CategoryCommandService {
    /// Removes the category and its entry associations. Entries stay.
    pub async fn delete_category(
        &self,
        actor: &AuthenticatedUser,
        command: DeleteCategoryCommand,
    ) -> ApplicationResult<()> {
        ensure_capability(actor, "categories", "manage")?;
        let id = CategoryId::new(command.id)?;
        if self.repo.find_by_id(id).await?.is_none() {
            return Err(ApplicationError::not_found("category not found"));
        }
        self.repo.delete(id).await?;
        tracing::info!(category_id = id.0, "category deleted");
        Ok(())
    }
}
