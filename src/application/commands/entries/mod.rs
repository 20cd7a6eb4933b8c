// src/application/commands/entries/mod.rs
mod bulk;
mod create;
mod delete;
mod service;
mod transition;
mod update;

pub use bulk::{BulkAction, BulkActionCommand};
pub use create::CreateEntryCommand;
pub use delete::DeleteEntryCommand;
pub use service::EntryCommandService;
pub use transition::TakeEntryActionCommand;
pub use update::UpdateEntryCommand;
