//! Search filtering over the user catalog.

use notiflow_types::User;

/// Filters the user catalog by a search query.
///
/// Matches the query as a case-insensitive substring of either the display
/// name or the email address. An empty or whitespace-only query returns the
/// whole catalog. This is a pure projection: selection state is never
/// consulted or mutated, so the result can be fed straight into
/// [`RecipientSelection::toggle_visible`](crate::recipient::RecipientSelection::toggle_visible).
pub fn filter_users<'a>(users: &'a [User], query: &str) -> Vec<&'a User> {
    let term = query.trim().to_lowercase();
    if term.is_empty() {
        return users.iter().collect();
    }
    users
        .iter()
        .filter(|u| {
            u.name.to_lowercase().contains(&term) || u.email.to_lowercase().contains(&term)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, name: &str, email: &str) -> User {
        User {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            role: String::new(),
            school_id: "s1".to_string(),
            school_name: String::new(),
            permissions: None,
        }
    }

    #[test]
    fn test_empty_query_returns_all() {
        let users = vec![user("u1", "Ana", "ana@x.com"), user("u2", "Luis", "")];
        assert_eq!(filter_users(&users, "").len(), 2);
        assert_eq!(filter_users(&users, "   ").len(), 2);
    }

    #[test]
    fn test_matches_name_case_insensitively() {
        let users = vec![user("u1", "Ana Pérez", "ana@x.com"), user("u2", "Luis", "l@x.com")];
        let hits = filter_users(&users, "ANA");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "u1");
    }

    #[test]
    fn test_matches_email_substring() {
        let users = vec![user("u1", "Ana", "ana@school.cl"), user("u2", "Luis", "luis@x.com")];
        let hits = filter_users(&users, "school.cl");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "u1");
    }

    #[test]
    fn test_no_match_returns_empty() {
        let users = vec![user("u1", "Ana", "ana@x.com")];
        assert!(filter_users(&users, "zzz").is_empty());
    }
}
