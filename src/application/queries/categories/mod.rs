// src/application/queries/categories/mod.rs
mod list;
mod service;

pub use service::CategoryQueryService;
