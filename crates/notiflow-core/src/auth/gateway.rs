//! Backend authentication endpoint trait.

use crate::error::Result;
use notiflow_types::User;
use serde::{Deserialize, Serialize};

/// The result of a successful login: a bearer token plus the authenticated
/// user record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

/// Client-side view of the backend auth endpoints.
///
/// Implemented by the HTTP layer; application services depend on this trait
/// so they can be tested against in-memory fakes.
#[async_trait::async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchanges credentials for a session.
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession>;

    /// Fetches the user record for the currently stored token ("who am I").
    async fn current_user(&self) -> Result<User>;

    /// Invalidates the session on the backend.
    async fn logout(&self) -> Result<()>;

    /// Requests a password-reset email.
    async fn forgot_password(&self, email: &str) -> Result<()>;

    /// Completes a password reset with the emailed token.
    async fn reset_password(&self, token: &str, new_password: &str) -> Result<()>;
}
