// src/application/queries/widgets/mod.rs
//! Sidebar helpers: category and tag lists, date archives, related entries.
mod dates;
mod lists;
mod related;
mod service;

pub use related::DEFAULT_RELATED_COUNT;
pub use service::WidgetQueryService;
