// src/application/commands/entries/transition.rs
use super::EntryCommandService;
use crate::{
    application::{
        commands::ensure_capability,
        dto::{AuthenticatedUser, EntryDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::entry::{EntryAction, EntryId, EntryUpdate},
};

pub struct TakeEntryActionCommand {
    pub id: i64,
    pub action: String,
}

/// Submitting for review is part of normal editing; every other action is
/// an editorial decision.
fn required_capability(action: EntryAction) -> &'static str {
    match action {
        EntryAction::Submit => "update",
        _ => "publish",
    }
}

impl EntryCommandService {
    pub async fn take_action(
        &self,
        actor: &AuthenticatedUser,
        command: TakeEntryActionCommand,
    ) -> ApplicationResult<EntryDto> {
        let action: EntryAction = command
            .action
            .parse()
            .map_err(|_| ApplicationError::validation(format!("unknown action {}", command.action)))?;
        ensure_capability(actor, "entries", required_capability(action))?;

        let id = EntryId::new(command.id)?;
        let mut entry = self.load(id).await?;
        let from = entry.state;
        entry.take_action(action, self.clock.now())?;

        let updated = self.write_repo.update(EntryUpdate::workflow(&entry)).await?;
        tracing::info!(
            entry_id = %updated.id,
            %action,
            from = %from,
            to = %updated.state,
            "entry transitioned"
        );
        Ok(updated.into())
    }
}
