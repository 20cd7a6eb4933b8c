// src/application/queries/entries/mod.rs
mod admin;
mod archive;
mod category;
mod detail;
mod service;
mod tag;

pub use admin::ListAdminEntriesQuery;
pub use archive::ArchiveQuery;
pub use category::CategoryEntriesQuery;
pub use detail::{DETAIL_MODIFIERS, EntryDetailQuery};
pub use service::EntryQueryService;
pub use tag::TagEntriesQuery;
