// src/application/commands/entries/bulk.rs
use std::fmt;
use std::str::FromStr;

use super::EntryCommandService;
use crate::{
    application::{
        commands::ensure_capability,
        dto::{AuthenticatedUser, BulkActionResultDto, SkippedEntryDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        entry::{Entry, EntryAction, EntryId, EntryUpdate, PublicationState},
        errors::DomainError,
    },
};

/// Admin list actions applied to a selection of entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkAction {
    Publish,
    /// Rejects entries under review and retracts published ones.
    Retract,
    Review,
    AllowComments,
    DisallowComments,
}

impl BulkAction {
    pub const ALL: [BulkAction; 5] = [
        BulkAction::Publish,
        BulkAction::Retract,
        BulkAction::Review,
        BulkAction::AllowComments,
        BulkAction::DisallowComments,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BulkAction::Publish => "publish",
            BulkAction::Retract => "retract",
            BulkAction::Review => "review",
            BulkAction::AllowComments => "allow_comments",
            BulkAction::DisallowComments => "disallow_comments",
        }
    }

    /// Applies the action to an in-memory entry.
    fn apply(self, entry: &mut Entry, now: chrono::DateTime<chrono::Utc>) -> Result<(), DomainError> {
        match self {
            BulkAction::Publish => entry.take_action(EntryAction::Publish, now).map(|_| ()),
            BulkAction::Review => entry.take_action(EntryAction::Submit, now).map(|_| ()),
            BulkAction::Retract => {
                let action = if entry.state == PublicationState::Review {
                    EntryAction::Reject
                } else {
                    EntryAction::Retract
                };
                entry.take_action(action, now).map(|_| ())
            }
            BulkAction::AllowComments => {
                entry.set_allow_comments(true, now);
                Ok(())
            }
            BulkAction::DisallowComments => {
                entry.set_allow_comments(false, now);
                Ok(())
            }
        }
    }
}

impl fmt::Display for BulkAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BulkAction {
    type Err = ApplicationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BulkAction::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| ApplicationError::validation(format!("unknown bulk action {s}")))
    }
}

pub struct BulkActionCommand {
    pub action: String,
    pub ids: Vec<i64>,
}

impl EntryCommandService {
    /// Runs `action` over every id independently. Failures are reported per
    /// entry and never abort the batch.
    pub async fn bulk_action(
        &self,
        actor: &AuthenticatedUser,
        command: BulkActionCommand,
    ) -> ApplicationResult<BulkActionResultDto> {
        let action: BulkAction = command.action.parse()?;
        ensure_capability(actor, "entries", "publish")?;

        let mut applied = Vec::new();
        let mut skipped = Vec::new();

        for raw in command.ids {
            match self.apply_bulk(action, raw).await {
                Ok(()) => applied.push(raw),
                Err(err) => {
                    tracing::debug!(entry_id = raw, %action, error = %err, "bulk action skipped entry");
                    skipped.push(SkippedEntryDto {
                        id: raw,
                        reason: err.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            %action,
            applied = applied.len(),
            skipped = skipped.len(),
            "bulk action finished"
        );

        Ok(BulkActionResultDto {
            action: action.to_string(),
            applied,
            skipped,
        })
    }

    async fn apply_bulk(&self, action: BulkAction, raw: i64) -> ApplicationResult<()> {
        let id = EntryId::new(raw)?;
        let mut entry = self.load(id).await?;
        action.apply(&mut entry, self.clock.now())?;
        self.write_repo.update(EntryUpdate::workflow(&entry)).await?;
        Ok(())
    }
}
