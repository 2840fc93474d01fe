//! Message delivery status.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::str::FromStr;

/// Lifecycle status of a message as reported by the backend.
///
/// The backend has historically emitted these in both upper- and lowercase,
/// so parsing is case-insensitive. Serialization uses lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageStatus {
    Draft,
    Scheduled,
    Sent,
    Failed,
    Pending,
    Read,
}

impl MessageStatus {
    /// Returns `true` if this status marks a delivery failure.
    pub fn is_failed(&self) -> bool {
        matches!(self, MessageStatus::Failed)
    }

    /// Returns the lowercase wire form.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageStatus::Draft => "draft",
            MessageStatus::Scheduled => "scheduled",
            MessageStatus::Sent => "sent",
            MessageStatus::Failed => "failed",
            MessageStatus::Pending => "pending",
            MessageStatus::Read => "read",
        }
    }
}

impl std::fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a status string is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown message status: '{0}'")]
pub struct ParseMessageStatusError(String);

impl FromStr for MessageStatus {
    type Err = ParseMessageStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "draft" => Ok(MessageStatus::Draft),
            "scheduled" => Ok(MessageStatus::Scheduled),
            "sent" => Ok(MessageStatus::Sent),
            "failed" => Ok(MessageStatus::Failed),
            "pending" => Ok(MessageStatus::Pending),
            "read" => Ok(MessageStatus::Read),
            other => Err(ParseMessageStatusError(other.to_string())),
        }
    }
}

impl Serialize for MessageStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MessageStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("FAILED".parse::<MessageStatus>(), Ok(MessageStatus::Failed));
        assert_eq!("sent".parse::<MessageStatus>(), Ok(MessageStatus::Sent));
        assert_eq!(
            "Scheduled".parse::<MessageStatus>(),
            Ok(MessageStatus::Scheduled)
        );
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!("bounced".parse::<MessageStatus>().is_err());
    }

    #[test]
    fn test_only_failed_is_failure() {
        assert!(MessageStatus::Failed.is_failed());
        assert!(!MessageStatus::Pending.is_failed());
        assert!(!MessageStatus::Sent.is_failed());
        assert!(!MessageStatus::Scheduled.is_failed());
    }

    #[test]
    fn test_serde_round_trip_lowercase() {
        let json = serde_json::to_string(&MessageStatus::Failed).unwrap();
        assert_eq!(json, "\"failed\"");
        let back: MessageStatus = serde_json::from_str("\"FAILED\"").unwrap();
        assert_eq!(back, MessageStatus::Failed);
    }
}
