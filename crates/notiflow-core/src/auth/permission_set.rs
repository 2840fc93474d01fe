//! Permission set evaluated against capability queries.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A set of lowercase permission strings, e.g. `"messages.create"`.
///
/// Normalization happens once at construction so that membership checks can
/// stay plain set lookups. The set itself knows nothing about the current
/// user; tenant-level bypasses live in
/// [`AuthContext`](crate::auth::AuthContext).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSet {
    perms: HashSet<String>,
}

impl PermissionSet {
    /// Creates an empty permission set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from raw permission strings, lowercasing each entry.
    pub fn from_strings<I, S>(perms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            perms: perms
                .into_iter()
                .map(|p| p.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Returns `true` if the set contains no permissions.
    pub fn is_empty(&self) -> bool {
        self.perms.is_empty()
    }

    /// Number of distinct permissions in the set.
    pub fn len(&self) -> usize {
        self.perms.len()
    }

    /// Set-level capability check.
    ///
    /// Grants when the set contains the wildcard `"*"`, the lowercased
    /// permission itself, or the permission suffixed with `.self`. An empty
    /// set grants nothing.
    pub fn allows(&self, permission: &str) -> bool {
        if self.perms.is_empty() {
            return false;
        }
        if self.perms.contains("*") {
            return true;
        }
        let p = permission.to_lowercase();
        self.perms.contains(&p) || self.perms.contains(&format!("{p}.self"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set_allows_nothing() {
        let set = PermissionSet::new();
        assert!(!set.allows("messages.create"));
        assert!(!set.allows("*"));
    }

    #[test]
    fn test_wildcard_allows_everything() {
        let set = PermissionSet::from_strings(["*"]);
        assert!(set.allows("messages.create"));
        assert!(set.allows("anything.at.all"));
    }

    #[test]
    fn test_exact_match_is_case_insensitive() {
        let set = PermissionSet::from_strings(["Messages.Create"]);
        assert!(set.allows("messages.create"));
        assert!(set.allows("MESSAGES.CREATE"));
        assert!(!set.allows("messages.delete"));
    }

    #[test]
    fn test_self_suffix_grants_base_permission() {
        let set = PermissionSet::from_strings(["messages.list.self"]);
        assert!(set.allows("messages.list"));
        assert!(!set.allows("messages.create"));
    }
}
