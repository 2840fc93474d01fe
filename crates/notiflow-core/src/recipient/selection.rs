//! Mutable recipient selection state.

use notiflow_types::{Group, User};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The user/group selection state of one composer session.
///
/// The selection operates against read-only catalog snapshots owned by the
/// caller; it stores identifiers only. All transitions are synchronous and
/// run on the single UI event loop, so there is no interior locking.
///
/// The selected-group set records the last bulk action taken on each group,
/// not a live invariant: deselecting an individual member via
/// [`toggle_user`](Self::toggle_user) leaves the group id in place until the
/// group itself is toggled again. Callers that want live display state use
/// [`is_group_fully_selected`](Self::is_group_fully_selected) instead of the
/// stored flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientSelection {
    selected_users: HashSet<String>,
    selected_groups: HashSet<String>,
}

impl RecipientSelection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips the selection state of a single user.
    ///
    /// Group flags are intentionally not reconciled here; see the type-level
    /// note on staleness.
    pub fn toggle_user(&mut self, id: &str) {
        if !self.selected_users.remove(id) {
            self.selected_users.insert(id.to_string());
        }
    }

    /// Toggles a group as a bulk action over its members.
    ///
    /// When every member of a non-empty group is already selected, the whole
    /// membership is deselected and the group flag dropped; otherwise the
    /// membership is unioned in and the flag set. Toggling twice in a row
    /// therefore returns the selection to its original state regardless of
    /// prior individual selections.
    ///
    /// A group id absent from the catalog is treated as an opaque selectable
    /// token: its flag flips with no effect on user selection. A group with
    /// zero members is never considered fully selected, so toggling it only
    /// ever flips its flag the same way.
    pub fn toggle_group(&mut self, id: &str, groups: &[Group]) {
        let Some(group) = groups.iter().find(|g| g.id == id) else {
            if !self.selected_groups.remove(id) {
                self.selected_groups.insert(id.to_string());
            }
            return;
        };

        if self.is_group_fully_selected(group) {
            for member in &group.member_ids {
                self.selected_users.remove(member);
            }
            self.selected_groups.remove(id);
        } else {
            for member in &group.member_ids {
                self.selected_users.insert(member.clone());
            }
            if group.member_ids.is_empty() {
                // Vacuous "all selected" is rejected, so an empty group can
                // only flip its own flag.
                if !self.selected_groups.remove(id) {
                    self.selected_groups.insert(id.to_string());
                }
            } else {
                self.selected_groups.insert(id.to_string());
            }
        }
    }

    /// Bulk-toggles an externally filtered subset of the catalog.
    ///
    /// Same idempotent pattern as [`toggle_group`](Self::toggle_group),
    /// parameterized by an arbitrary subset (e.g. the users currently
    /// visible under a search filter): if every listed user is already
    /// selected the subset is removed, otherwise it is unioned in. An empty
    /// subset is a no-op.
    pub fn toggle_visible(&mut self, visible: &[&User]) {
        let all_selected = visible
            .iter()
            .all(|u| self.selected_users.contains(&u.id));
        if all_selected {
            for user in visible {
                self.selected_users.remove(&user.id);
            }
        } else {
            for user in visible {
                self.selected_users.insert(user.id.clone());
            }
        }
    }

    /// Resolves the current selection into deliverable recipients.
    ///
    /// Returns the selected users in catalog order, restricted to those with
    /// a non-empty email address. Omission of email-less users is silent
    /// filtering, not an error.
    pub fn resolve_recipients<'a>(&self, users: &'a [User]) -> Vec<&'a User> {
        users
            .iter()
            .filter(|u| self.selected_users.contains(&u.id) && u.has_email())
            .collect()
    }

    /// Convenience projection of [`resolve_recipients`](Self::resolve_recipients)
    /// to the email addresses handed to the send endpoint.
    pub fn recipient_emails(&self, users: &[User]) -> Vec<String> {
        self.resolve_recipients(users)
            .into_iter()
            .map(|u| u.email.clone())
            .collect()
    }

    /// Returns `true` if the user id is currently selected.
    pub fn is_user_selected(&self, id: &str) -> bool {
        self.selected_users.contains(id)
    }

    /// Returns the stored group flag (last bulk action), which may be stale
    /// with respect to individual deselections.
    pub fn is_group_selected(&self, id: &str) -> bool {
        self.selected_groups.contains(id)
    }

    /// Recomputes whether every member of `group` is currently selected.
    ///
    /// A group with no members is never fully selected.
    pub fn is_group_fully_selected(&self, group: &Group) -> bool {
        !group.member_ids.is_empty()
            && group
                .member_ids
                .iter()
                .all(|m| self.selected_users.contains(m))
    }

    /// The set of selected user ids.
    pub fn selected_users(&self) -> &HashSet<String> {
        &self.selected_users
    }

    /// The set of selected group ids.
    pub fn selected_groups(&self) -> &HashSet<String> {
        &self.selected_groups
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected_users.is_empty() && self.selected_groups.is_empty()
    }

    /// Drops the entire selection.
    pub fn clear(&mut self) {
        self.selected_users.clear();
        self.selected_groups.clear();
    }
}
