//! Default wiring of the client stack.
//!
//! Builds the production object graph: file-backed token storage, TOML
//! configuration, the REST client, and the two use-case services sharing
//! them. Embedders with custom infrastructure wire the services by hand
//! instead.

use notiflow_core::auth::{AuthContext, TokenStore};
use notiflow_core::error::Result;
use notiflow_infrastructure::{ConfigService, FileTokenStorage};
use notiflow_interaction::NotiflowApiClient;
use std::sync::Arc;

use crate::auth_service::AuthService;
use crate::composer_service::ComposerService;

/// The wired application services.
pub struct NotiflowApp {
    pub auth: AuthService,
    pub composer: ComposerService,
}

/// Builds the default production stack.
///
/// Configuration comes from `~/.config/notiflow/config.toml` (with the
/// `NOTIFLOW_API_URL` override) and the session token from
/// `~/.config/notiflow/token`.
pub fn bootstrap() -> Result<NotiflowApp> {
    let config = ConfigService::new().get_config();
    let token_store: Arc<dyn TokenStore> = Arc::new(FileTokenStorage::new()?);

    let client = Arc::new(NotiflowApiClient::new(&config, token_store.clone())?);

    let auth = AuthService::new(client.clone(), AuthContext::new(token_store));
    let composer = ComposerService::new(
        client.clone(),
        client.clone(),
        client,
        config.year.clone(),
    );

    Ok(NotiflowApp { auth, composer })
}
