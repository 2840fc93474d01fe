//! Authentication use case.
//!
//! Coordinates the backend auth endpoints with the local [`AuthContext`]
//! and token persistence: login seeds all three, restore revalidates a
//! stored token at startup, logout tears everything down.

use notiflow_core::auth::{AuthContext, AuthGateway};
use notiflow_core::error::{NotiflowError, Result};
use notiflow_types::User;
use std::sync::Arc;
use tracing::{info, warn};

/// Use case for the session lifecycle.
///
/// All methods run on the single UI event loop, so the service owns the
/// [`AuthContext`] directly and mutates it in place.
pub struct AuthService {
    gateway: Arc<dyn AuthGateway>,
    context: AuthContext,
}

impl AuthService {
    /// Creates the service around an unauthenticated context.
    pub fn new(gateway: Arc<dyn AuthGateway>, context: AuthContext) -> Self {
        Self { gateway, context }
    }

    /// Exchanges credentials for a session.
    ///
    /// On success the token is persisted and the context is seeded from the
    /// returned user record (its `permissions` field, or the token claims
    /// as a fallback). On failure the context is left untouched.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<User> {
        let session = self.gateway.login(email, password).await?;
        self.context.token_store().save(&session.token)?;
        self.context.set_user(Some(session.user.clone()), None);
        info!(user = %session.user.id, "session established");
        Ok(session.user)
    }

    /// Revalidates a persisted token at startup ("who am I").
    ///
    /// Returns `Ok(None)` when no token is stored or the backend rejects it
    /// (the rejected token is already cleared by the HTTP layer); any other
    /// failure propagates so the caller can distinguish "logged out" from
    /// "backend unreachable".
    pub async fn restore(&mut self) -> Result<Option<User>> {
        if self.context.token_store().load()?.is_none() {
            return Ok(None);
        }
        match self.gateway.current_user().await {
            Ok(user) => {
                self.context.set_user(Some(user.clone()), None);
                Ok(Some(user))
            }
            Err(NotiflowError::Unauthorized) => {
                self.context.set_user(None, None);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Ends the session locally and, best effort, on the backend.
    ///
    /// The backend call failing never blocks local teardown: the token and
    /// context are cleared regardless.
    pub async fn logout(&mut self) {
        if let Err(err) = self.gateway.logout().await {
            warn!(error = %err, "backend logout failed; clearing local session anyway");
        }
        self.context.logout();
    }

    /// Capability query for UI gating.
    pub fn has_permission(&self, permission: &str) -> bool {
        self.context.has_permission(permission)
    }

    /// The underlying context, for rendering the current user.
    pub fn context(&self) -> &AuthContext {
        &self.context
    }
}
