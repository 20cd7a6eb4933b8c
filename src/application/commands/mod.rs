// src/application/commands/mod.rs
mod capability;
pub mod categories;
pub mod entries;

pub(crate) use capability::ensure_capability;
