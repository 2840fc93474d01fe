//! NotiflowApiClient - REST implementation of the core backend traits.
//!
//! One client instance serves every endpoint group (auth, users, groups,
//! schools, messages). The bearer token is read from the shared
//! [`TokenStore`] on each request, so a login in one part of the app is
//! immediately visible everywhere.

use async_trait::async_trait;
use notiflow_core::auth::{AuthGateway, AuthSession, TokenStore};
use notiflow_core::catalog::{
    GroupQuery, GroupRepository, NewGroup, NewSchool, NewUser, SchoolRepository, UserRepository,
};
use notiflow_core::config::ClientConfig;
use notiflow_core::error::{NotiflowError, Result};
use notiflow_core::message::{MessageGateway, MessageQuery};
use notiflow_types::{DeliveryReceipt, Group, Message, OutgoingMessage, School, User};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Client for the Notiflow REST backend.
#[derive(Clone)]
pub struct NotiflowApiClient {
    client: Client,
    base_url: String,
    token_store: Arc<dyn TokenStore>,
}

impl NotiflowApiClient {
    /// Creates a client from the given configuration.
    ///
    /// The request timeout comes from `config.timeout_secs`; a trailing
    /// slash on the base URL is tolerated.
    pub fn new(config: &ClientConfig, token_store: Arc<dyn TokenStore>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| NotiflowError::config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token_store,
        })
    }

    /// Returns the base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = join_url(&self.base_url, path);
        let mut builder = self.client.request(method, url);
        match self.token_store.load() {
            Ok(Some(token)) => builder = builder.bearer_auth(token),
            Ok(None) => {}
            Err(err) => warn!(error = %err, "failed to load session token; sending unauthenticated"),
        }
        builder
    }

    /// Sends a request and maps transport/status failures to typed errors.
    ///
    /// A 401 clears the persisted token (the session is gone either way)
    /// and surfaces as [`NotiflowError::Unauthorized`] so the caller can
    /// route back to login.
    async fn send(&self, builder: RequestBuilder) -> Result<reqwest::Response> {
        let response = builder.send().await.map_err(|err| NotiflowError::Http {
            status: None,
            message: format!("Request failed: {err}"),
            retryable: err.is_connect() || err.is_timeout(),
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            if let Err(err) = self.token_store.clear() {
                warn!(error = %err, "failed to clear session token after 401");
            }
            return Err(NotiflowError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_error_response(status, &body));
        }
        Ok(response)
    }

    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = self.send(builder).await?;
        response.json().await.map_err(|err| NotiflowError::Serialization {
            format: "JSON".to_string(),
            message: format!("Failed to parse response body: {err}"),
        })
    }

    /// Variant of [`fetch`](Self::fetch) for endpoints whose body we ignore.
    async fn execute(&self, builder: RequestBuilder) -> Result<()> {
        self.send(builder).await?;
        Ok(())
    }
}

#[async_trait]
impl AuthGateway for NotiflowApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession> {
        let response: LoginResponse = self
            .fetch(
                self.request(Method::POST, "/auth/login")
                    .json(&LoginRequest { email, password }),
            )
            .await?;
        debug!(user = %response.user.id, "login succeeded");
        Ok(AuthSession {
            token: response.token,
            user: response.user,
        })
    }

    async fn current_user(&self) -> Result<User> {
        self.fetch(self.request(Method::GET, "/auth/me")).await
    }

    async fn logout(&self) -> Result<()> {
        self.execute(self.request(Method::POST, "/auth/logout")).await
    }

    async fn forgot_password(&self, email: &str) -> Result<()> {
        self.execute(
            self.request(Method::POST, "/auth/forgot")
                .json(&ForgotPasswordRequest { email }),
        )
        .await
    }

    async fn reset_password(&self, token: &str, new_password: &str) -> Result<()> {
        self.execute(
            self.request(Method::POST, "/auth/reset")
                .json(&ResetPasswordRequest { token, new_password }),
        )
        .await
    }
}

#[async_trait]
impl UserRepository for NotiflowApiClient {
    async fn list(&self, role: Option<&str>) -> Result<Vec<User>> {
        let mut builder = self.request(Method::GET, "/users");
        if let Some(role) = role {
            builder = builder.query(&[("role", role)]);
        }
        let envelope: ListEnvelope<User> = self.fetch(builder).await?;
        Ok(envelope.into_items())
    }

    async fn create(&self, user: NewUser) -> Result<User> {
        self.fetch(self.request(Method::POST, "/users").json(&user)).await
    }
}

#[async_trait]
impl GroupRepository for NotiflowApiClient {
    async fn list(&self, query: GroupQuery) -> Result<Vec<Group>> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(school_id) = query.school_id {
            params.push(("schoolId", school_id));
        }
        if let Some(year) = query.year {
            params.push(("year", year));
        }
        let envelope: ListEnvelope<Group> = self
            .fetch(self.request(Method::GET, "/groups").query(&params))
            .await?;
        Ok(envelope.into_items())
    }

    async fn create(&self, group: NewGroup) -> Result<Group> {
        self.fetch(self.request(Method::POST, "/groups").json(&group)).await
    }
}

#[async_trait]
impl SchoolRepository for NotiflowApiClient {
    async fn list(&self) -> Result<Vec<School>> {
        let envelope: ListEnvelope<School> =
            self.fetch(self.request(Method::GET, "/schools")).await?;
        Ok(envelope.into_items())
    }

    async fn create(&self, school: NewSchool) -> Result<School> {
        self.fetch(self.request(Method::POST, "/schools").json(&school)).await
    }
}

#[async_trait]
impl MessageGateway for NotiflowApiClient {
    async fn send(&self, message: &OutgoingMessage) -> Result<DeliveryReceipt> {
        self.fetch(self.request(Method::POST, "/messages/send").json(message))
            .await
    }

    async fn list(&self, query: MessageQuery) -> Result<Vec<Message>> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(year) = query.year {
            params.push(("year", year));
        }
        if let Some(page) = query.page {
            params.push(("page", page.to_string()));
        }
        if let Some(page_size) = query.page_size {
            params.push(("pageSize", page_size.to_string()));
        }
        let envelope: ListEnvelope<Message> = self
            .fetch(self.request(Method::GET, "/messages").query(&params))
            .await?;
        Ok(envelope.into_items())
    }

    async fn get(&self, id: &str) -> Result<Message> {
        self.fetch(self.request(Method::GET, &format!("/messages/{id}")))
            .await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.execute(self.request(Method::DELETE, &format!("/messages/{id}")))
            .await
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

/// Maps a non-success response to the user-facing error.
///
/// The backend reports failures as `{"message": ...}` or `{"error": ...}`;
/// when neither is present the status line itself is the message.
fn map_error_response(status: StatusCode, body: &str) -> NotiflowError {
    if let Ok(body) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(message) = body.message.or(body.error) {
            return NotiflowError::Api(message);
        }
    }
    NotiflowError::Http {
        status: Some(status.as_u16()),
        message: status
            .canonical_reason()
            .unwrap_or("Unexpected response")
            .to_string(),
        retryable: status.is_server_error(),
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Login response; `refreshToken` and other extra fields are ignored.
#[derive(Deserialize)]
struct LoginResponse {
    token: String,
    user: User,
}

#[derive(Serialize)]
struct ForgotPasswordRequest<'a> {
    email: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResetPasswordRequest<'a> {
    token: &'a str,
    new_password: &'a str,
}

#[derive(Serialize, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// List endpoints have shipped in two shapes: a bare JSON array and a
/// paging envelope with an `items` field. Accept both.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListEnvelope<T> {
    Paged { items: Vec<T> },
    Bare(Vec<T>),
}

impl<T> ListEnvelope<T> {
    fn into_items(self) -> Vec<T> {
        match self {
            ListEnvelope::Paged { items } => items,
            ListEnvelope::Bare(items) => items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_error_prefers_backend_message() {
        let err = map_error_response(
            StatusCode::BAD_REQUEST,
            r#"{"message": "Falta el contenido"}"#,
        );
        assert_eq!(err.to_string(), "Falta el contenido");
    }

    #[test]
    fn test_map_error_falls_back_to_error_field() {
        let err = map_error_response(StatusCode::CONFLICT, r#"{"error": "Ya existe"}"#);
        assert_eq!(err.to_string(), "Ya existe");
    }

    #[test]
    fn test_map_error_unparseable_body_uses_status() {
        let err = map_error_response(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");
        match err {
            NotiflowError::Http {
                status, retryable, ..
            } => {
                assert_eq!(status, Some(500));
                assert!(retryable);
            }
            other => panic!("Expected Http error, got {other:?}"),
        }
    }

    #[test]
    fn test_map_error_client_status_not_retryable() {
        let err = map_error_response(StatusCode::FORBIDDEN, "");
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_list_envelope_accepts_bare_array() {
        let json = r#"[{"id": "s1", "name": "Escuela Uno"}]"#;
        let envelope: ListEnvelope<School> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.into_items().len(), 1);
    }

    #[test]
    fn test_list_envelope_accepts_paged_shape() {
        let json = r#"{"items": [{"id": "s1", "name": "Escuela Uno"}], "total": 1, "page": 0, "pageSize": 20, "hasMore": false}"#;
        let envelope: ListEnvelope<School> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.into_items().len(), 1);
    }

    #[test]
    fn test_login_response_ignores_extra_fields() {
        let json = r#"{
            "token": "h.p.s",
            "refreshToken": "r",
            "user": {"id": "u1", "name": "Ana", "email": "ana@x.com"},
            "students": []
        }"#;
        let response: LoginResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.token, "h.p.s");
        assert_eq!(response.user.id, "u1");
    }

    #[test]
    fn test_join_url_tolerates_trailing_slash() {
        assert_eq!(
            join_url("https://api.notiflow.app/", "/users"),
            "https://api.notiflow.app/users"
        );
        assert_eq!(
            join_url("https://api.notiflow.app", "/users"),
            "https://api.notiflow.app/users"
        );
    }
}
