//! Driving port for login.
//!
//! Identity is owned by an external provider; the blog only needs a stable
//! [`UserId`] to place in the session. Handlers authenticate through this
//! port so tests can substitute a double without any provider wiring.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, UserId};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user id.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}

/// Development authenticator with a single well-known account.
///
/// `admin` / `password` resolves to [`FixtureLoginService::USER_ID`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

impl FixtureLoginService {
    /// Identifier handed out for the development account.
    pub const USER_ID: &'static str = "123e4567-e89b-12d3-a456-426614174000";
}

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        if credentials.username() != "admin" || credentials.password() != "password" {
            return Err(Error::unauthorized("invalid credentials"));
        }
        UserId::new(Self::USER_ID)
            .map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))
    }
}
