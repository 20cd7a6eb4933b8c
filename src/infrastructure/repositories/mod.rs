// src/infrastructure/repositories/mod.rs
mod error;
mod memory;
mod postgres_category;
mod postgres_entry;

pub use error::map_sqlx;
pub use memory::InMemoryBlogStore;
pub use postgres_category::PostgresCategoryRepository;
pub use postgres_entry::{PostgresEntryReadRepository, PostgresEntryWriteRepository};
