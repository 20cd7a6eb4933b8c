// tests/support/mocks/mod.rs
pub mod security;
pub mod time;

pub use security::{ADMIN_TOKEN, AUTHOR_TOKEN, StaticTokenManager, admin_user, author_user};
pub use time::{TestClock, at, fixed_now};
