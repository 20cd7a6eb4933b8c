// tests/support/mocks/security.rs
use async_trait::async_trait;
use chrono::Duration;
use mokkan_blog::application::{
    ApplicationResult,
    dto::{AuthTokenDto, AuthenticatedUser, TokenSubject},
    error::ApplicationError,
    ports::security::TokenManager,
};
use mokkan_blog::domain::user::{Role, UserId};

pub const ADMIN_TOKEN: &str = "admin-token";
pub const AUTHOR_TOKEN: &str = "author-token";

fn user(id: i64, username: &str, role: Role) -> AuthenticatedUser {
    let now = super::time::fixed_now();
    AuthenticatedUser {
        id: UserId::new(id).expect("invalid user id"),
        username: username.into(),
        role,
        capabilities: role.default_capabilities(),
        issued_at: now,
        expires_at: now + Duration::hours(1),
    }
}

pub fn admin_user() -> AuthenticatedUser {
    user(1, "editor", Role::Admin)
}

pub fn author_user() -> AuthenticatedUser {
    user(2, "writer", Role::Author)
}

/// Maps the two fixed tokens to an admin and an author.
#[derive(Clone, Debug, Default)]
pub struct StaticTokenManager;

#[async_trait]
impl TokenManager for StaticTokenManager {
    async fn issue(&self, _subject: TokenSubject) -> ApplicationResult<AuthTokenDto> {
        Err(ApplicationError::infrastructure("not implemented"))
    }

    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        match token {
            ADMIN_TOKEN => Ok(admin_user()),
            AUTHOR_TOKEN => Ok(author_user()),
            _ => Err(ApplicationError::unauthorized("invalid token")),
        }
    }
}
