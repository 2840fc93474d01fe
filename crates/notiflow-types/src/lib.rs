//! Shared domain types for the Notiflow client.
//!
//! These types mirror the JSON documents exchanged with the Notiflow backend
//! and are consumed by every layer of the client. Field names serialize in
//! camelCase to match the wire format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

mod message_status;

pub use message_status::MessageStatus;

/// A user record as returned by the backend catalog.
///
/// This is an immutable snapshot; the client never mutates user records
/// locally. An empty `email` means the user cannot receive email messages
/// and is silently skipped during recipient resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub school_id: String,
    #[serde(default)]
    pub school_name: String,
    /// Permissions embedded directly on the user record, when the backend
    /// includes them. Takes precedence over token-derived permissions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
}

impl User {
    /// Returns `true` if this user has a non-empty email address.
    pub fn has_email(&self) -> bool {
        !self.email.trim().is_empty()
    }
}

/// A named set of users maintained on the backend.
///
/// Membership is a set: order is irrelevant and duplicates carry no meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub member_ids: Vec<String>,
    #[serde(default)]
    pub school_id: String,
}

/// A school (tenant) record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct School {
    pub id: String,
    pub name: String,
}

/// Delivery channel for an outgoing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Deliver via email.
    Email,
    /// Deliver via the Notiflow mobile app.
    App,
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Channel::Email => write!(f, "email"),
            Channel::App => write!(f, "app"),
        }
    }
}

/// A message as listed by the backend history endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub sender_name: String,
    #[serde(default)]
    pub recipients: Vec<String>,
    pub status: MessageStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A file attached to an outgoing message.
///
/// The payload travels base64-encoded in the request body; `mime_type` is
/// guessed from the file name when not provided by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub file_name: String,
    pub mime_type: String,
    pub base64: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cid: Option<String>,
}

/// The request body for the message-send endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingMessage {
    pub content: String,
    /// Recipient email addresses, already resolved and deduplicated.
    pub recipients: Vec<String>,
    pub channels: Vec<Channel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

/// The backend's answer to a send request.
///
/// The HTTP call succeeding does not mean the message was delivered: a
/// receipt whose status is `Failed` must be treated as an error by callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryReceipt {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<MessageStatus>,
    /// Legacy field name used by older backend deployments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_status: Option<MessageStatus>,
}

impl DeliveryReceipt {
    /// Returns the effective status, preferring the current field name over
    /// the legacy one.
    pub fn effective_status(&self) -> Option<MessageStatus> {
        self.status.or(self.message_status)
    }

    /// Returns `true` if the backend reported the delivery as failed.
    pub fn is_failed(&self) -> bool {
        self.effective_status()
            .map(|s| s.is_failed())
            .unwrap_or(false)
    }
}

/// A locally managed message template.
///
/// Templates never leave the client; they exist to pre-fill the composer
/// draft with frequently used content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_deserializes_camel_case() {
        let json = r#"{
            "id": "u1",
            "name": "Ana",
            "email": "ana@x.com",
            "role": "teacher",
            "schoolId": "s1",
            "schoolName": "Escuela Uno"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.school_id, "s1");
        assert_eq!(user.school_name, "Escuela Uno");
        assert!(user.permissions.is_none());
        assert!(user.has_email());
    }

    #[test]
    fn test_user_missing_email_is_empty() {
        let json = r#"{"id": "u2", "name": "Luis"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert!(!user.has_email());
    }

    #[test]
    fn test_group_member_ids_field_name() {
        let json = r#"{"id": "g1", "name": "4A", "memberIds": ["u1", "u2"], "schoolId": "s1"}"#;
        let group: Group = serde_json::from_str(json).unwrap();
        assert_eq!(group.member_ids, vec!["u1", "u2"]);
    }

    #[test]
    fn test_outgoing_message_serializes_schedule_at() {
        let msg = OutgoingMessage {
            content: "hola".to_string(),
            recipients: vec!["a@x.com".to_string()],
            channels: vec![Channel::Email, Channel::App],
            schedule_at: Some("2026-03-01T09:00".to_string()),
            year: Some("2026".to_string()),
            attachments: Vec::new(),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["scheduleAt"], "2026-03-01T09:00");
        assert_eq!(json["channels"][0], "email");
        assert!(json.get("attachments").is_none());
    }

    #[test]
    fn test_delivery_receipt_prefers_status_over_legacy() {
        let json = r#"{"status": "SENT", "messageStatus": "FAILED"}"#;
        let receipt: DeliveryReceipt = serde_json::from_str(json).unwrap();
        assert_eq!(receipt.effective_status(), Some(MessageStatus::Sent));
        assert!(!receipt.is_failed());
    }

    #[test]
    fn test_delivery_receipt_failed_via_legacy_field() {
        let json = r#"{"messageStatus": "failed"}"#;
        let receipt: DeliveryReceipt = serde_json::from_str(json).unwrap();
        assert!(receipt.is_failed());
    }
}
