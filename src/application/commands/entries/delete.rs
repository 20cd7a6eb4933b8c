// src/application/commands/entries/delete.rs
use super::EntryCommandService;
use crate::{
    application::{commands::ensure_capability, dto::AuthenticatedUser, error::ApplicationResult},
    domain::entry::EntryId,
};

pub struct DeleteEntryCommand {
    pub id: i64,
}

impl EntryCommandService {
    pub async fn delete_entry(
        &self,
        actor: &AuthenticatedUser,
        command: DeleteEntryCommand,
    ) -> ApplicationResult<()> {
        ensure_capability(actor, "entries", "delete")?;
        let id = EntryId::new(command.id)?;
        self.load(id).await?;
        self.write_repo.delete(id).await?;
        tracing::info!(entry_id = %id, "entry deleted");
        Ok(())
    }
}
