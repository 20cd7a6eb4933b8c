pub mod category;
pub mod entry;
pub mod errors;
pub mod slugs;
pub mod user;
