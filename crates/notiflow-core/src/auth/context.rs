//! Session-scoped authentication context.

use crate::auth::{PermissionSet, TokenStore, decode_permissions};
use notiflow_types::User;
use std::sync::Arc;
use tracing::warn;

/// School identifier of the super-tenant; members bypass permission checks.
const GLOBAL_SCHOOL_ID: &str = "global";

/// The authenticated identity and its capabilities for one client session.
///
/// `AuthContext` is created once at startup with a [`TokenStore`] and passed
/// explicitly to the components that need it; there is no ambient global
/// state. It owns the current user snapshot, the derived [`PermissionSet`],
/// and the authenticated flag, and it keeps all three consistent across
/// login, restore, and logout.
///
/// The client fails closed: with no user or an empty permission set every
/// non-trivial check returns `false`. UI gating here is advisory only — the
/// backend enforces authorization independently on every request.
pub struct AuthContext {
    user: Option<User>,
    permissions: PermissionSet,
    authenticated: bool,
    token_store: Arc<dyn TokenStore>,
}

impl AuthContext {
    /// Creates an unauthenticated context backed by the given token store.
    pub fn new(token_store: Arc<dyn TokenStore>) -> Self {
        Self {
            user: None,
            permissions: PermissionSet::new(),
            authenticated: false,
            token_store,
        }
    }

    /// Establishes the authenticated identity and its permission set.
    ///
    /// Permission sources in priority order:
    ///
    /// 1. `explicit_permissions`, when given, used verbatim (lowercased);
    /// 2. the `permissions` field on the user record;
    /// 3. permissions decoded from the stored session token.
    ///
    /// A `None` user clears the permission set and drops the authenticated
    /// flag. Token decode failures degrade to an empty set.
    pub fn set_user(&mut self, user: Option<User>, explicit_permissions: Option<Vec<String>>) {
        let Some(user) = user else {
            self.user = None;
            self.permissions = PermissionSet::new();
            self.authenticated = false;
            return;
        };

        let raw = explicit_permissions
            .or_else(|| user.permissions.clone())
            .unwrap_or_else(|| self.permissions_from_stored_token());

        self.permissions = PermissionSet::from_strings(raw);
        self.user = Some(user);
        self.authenticated = true;
    }

    /// Answers a capability query for the current session.
    ///
    /// - An empty permission name is trivially granted ("no restriction").
    /// - A user in the `"global"` school (case-insensitive) is granted
    ///   unconditionally.
    /// - Otherwise delegates to [`PermissionSet::allows`], which fails
    ///   closed on an empty set.
    pub fn has_permission(&self, permission: &str) -> bool {
        if permission.is_empty() {
            return true;
        }
        if self.is_global_tenant() {
            return true;
        }
        self.permissions.allows(permission)
    }

    /// Clears the user, permission set, and authenticated flag, and removes
    /// the persisted session token.
    ///
    /// A failure to clear the token is logged but does not abort the local
    /// teardown; the in-memory session is gone either way.
    pub fn logout(&mut self) {
        self.user = None;
        self.permissions = PermissionSet::new();
        self.authenticated = false;
        if let Err(err) = self.token_store.clear() {
            warn!(error = %err, "failed to clear persisted session token");
        }
    }

    /// Returns the current user snapshot, if authenticated.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Returns `true` if a user is currently established.
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Returns the current permission set.
    pub fn permissions(&self) -> &PermissionSet {
        &self.permissions
    }

    /// Returns the token store backing this context.
    pub fn token_store(&self) -> &Arc<dyn TokenStore> {
        &self.token_store
    }

    fn is_global_tenant(&self) -> bool {
        self.user
            .as_ref()
            .map(|u| u.school_id.eq_ignore_ascii_case(GLOBAL_SCHOOL_ID))
            .unwrap_or(false)
    }

    fn permissions_from_stored_token(&self) -> Vec<String> {
        match self.token_store.load() {
            Ok(Some(token)) => decode_permissions(&token),
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(error = %err, "failed to load session token; treating as absent");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryTokenStore;
    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    fn user(school_id: &str, permissions: Option<Vec<&str>>) -> User {
        User {
            id: "u1".to_string(),
            name: "Ana".to_string(),
            email: "ana@x.com".to_string(),
            role: "teacher".to_string(),
            school_id: school_id.to_string(),
            school_name: "Escuela Uno".to_string(),
            permissions: permissions.map(|p| p.into_iter().map(String::from).collect()),
        }
    }

    fn context() -> AuthContext {
        AuthContext::new(Arc::new(MemoryTokenStore::new()))
    }

    #[test]
    fn test_empty_permission_always_granted() {
        let ctx = context();
        assert!(ctx.has_permission(""));

        let mut ctx = context();
        ctx.set_user(Some(user("s1", None)), None);
        assert!(ctx.has_permission(""));
    }

    #[test]
    fn test_no_user_denies_everything_else() {
        let ctx = context();
        assert!(!ctx.has_permission("messages.create"));
        assert!(!ctx.is_authenticated());
    }

    #[test]
    fn test_global_school_bypasses_checks() {
        let mut ctx = context();
        ctx.set_user(Some(user("GLOBAL", None)), None);
        assert!(ctx.has_permission("messages.create"));
        assert!(ctx.has_permission("anything.whatsoever"));
    }

    #[test]
    fn test_explicit_permissions_take_priority() {
        let mut ctx = context();
        ctx.set_user(
            Some(user("s1", Some(vec!["users.list"]))),
            Some(vec!["Messages.Create".to_string()]),
        );
        assert!(ctx.has_permission("messages.create"));
        assert!(!ctx.has_permission("users.list"));
    }

    #[test]
    fn test_user_record_permissions_used_when_no_explicit() {
        let mut ctx = context();
        ctx.set_user(Some(user("s1", Some(vec!["Groups.List"]))), None);
        assert!(ctx.has_permission("groups.list"));
        assert!(!ctx.has_permission("messages.create"));
    }

    #[test]
    fn test_permissions_decoded_from_stored_token() {
        let payload = URL_SAFE_NO_PAD.encode(br#"{"permissions": ["messages.create"]}"#);
        let store = Arc::new(MemoryTokenStore::with_token(format!("h.{payload}.s")));
        let mut ctx = AuthContext::new(store);
        ctx.set_user(Some(user("s1", None)), None);
        assert!(ctx.has_permission("messages.create"));
        assert!(!ctx.has_permission("users.create"));
    }

    #[test]
    fn test_malformed_token_degrades_to_empty_set() {
        let store = Arc::new(MemoryTokenStore::with_token("garbage"));
        let mut ctx = AuthContext::new(store);
        ctx.set_user(Some(user("s1", None)), None);
        assert!(ctx.is_authenticated());
        assert!(!ctx.has_permission("messages.create"));
        assert!(ctx.has_permission(""));
    }

    #[test]
    fn test_self_suffix_grants_permission() {
        let mut ctx = context();
        ctx.set_user(Some(user("s1", Some(vec!["messages.list.self"]))), None);
        assert!(ctx.has_permission("messages.list"));
    }

    #[test]
    fn test_wildcard_grants_everything_for_regular_tenant() {
        let mut ctx = context();
        ctx.set_user(Some(user("s1", Some(vec!["*"]))), None);
        assert!(ctx.has_permission("messages.create"));
        assert!(ctx.has_permission("schools.create"));
    }

    #[test]
    fn test_set_user_none_clears_session() {
        let mut ctx = context();
        ctx.set_user(Some(user("s1", Some(vec!["*"]))), None);
        assert!(ctx.is_authenticated());

        ctx.set_user(None, None);
        assert!(!ctx.is_authenticated());
        assert!(!ctx.has_permission("messages.create"));
        assert!(ctx.user().is_none());
    }

    #[test]
    fn test_logout_clears_stored_token() {
        let store = Arc::new(MemoryTokenStore::with_token("h.p.s"));
        let mut ctx = AuthContext::new(store.clone());
        ctx.set_user(Some(user("s1", Some(vec!["*"]))), None);

        ctx.logout();

        assert!(!ctx.is_authenticated());
        assert!(ctx.user().is_none());
        assert!(!ctx.has_permission("messages.create"));
        assert_eq!(store.load().unwrap(), None);
    }
}
