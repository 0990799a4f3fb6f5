// tests/support/mocks/security.rs
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use story_desk::application::{
    ApplicationResult, dto::AuthenticatedUser, error::ApplicationError,
    ports::security::TokenManager,
};
use story_desk::domain::user::{Role, UserId};

pub const ADMIN_TOKEN: &str = "admin-token";
pub const EDITOR_TOKEN: &str = "editor-token";
pub const READER_TOKEN: &str = "reader-token";
pub const EXPIRED_TOKEN: &str = "expired-token";

#[derive(Clone, Debug, Default)]
pub struct DummyTokenManager;

#[async_trait]
impl TokenManager for DummyTokenManager {
    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        match token {
            ADMIN_TOKEN => Ok(admin_user()),
            EDITOR_TOKEN => Ok(editor_user()),
            READER_TOKEN => Ok(reader_user()),
            EXPIRED_TOKEN => Err(ApplicationError::unauthorized("token expired")),
            _ => Err(ApplicationError::unauthorized("invalid token")),
        }
    }
}

fn user(id: i64, username: &str, role: Role, now: DateTime<Utc>) -> AuthenticatedUser {
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
    user(1, "admin", Role::Administrator, super::time::fixed_now())
}

pub fn editor_user() -> AuthenticatedUser {
    user(2, "editor", Role::Editor, super::time::fixed_now())
}

pub fn reader_user() -> AuthenticatedUser {
    user(3, "reader", Role::Reader, super::time::fixed_now())
}
