//! Gateway trait for the backend message endpoints.

use crate::error::Result;
use async_trait::async_trait;
use notiflow_types::{DeliveryReceipt, Message, OutgoingMessage};

/// Filter parameters for the message history endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageQuery {
    /// Academic year to list messages for.
    pub year: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// Client-side view of the backend message endpoints.
///
/// Delivery itself is entirely the backend's concern; the client only hands
/// over an [`OutgoingMessage`] and interprets the returned receipt. Callers
/// must treat a receipt whose status is `failed` as an error even though the
/// HTTP call succeeded.
#[async_trait]
pub trait MessageGateway: Send + Sync {
    /// Submits a message for immediate or scheduled delivery.
    async fn send(&self, message: &OutgoingMessage) -> Result<DeliveryReceipt>;

    /// Lists sent and scheduled messages.
    async fn list(&self, query: MessageQuery) -> Result<Vec<Message>>;

    /// Fetches a single message by id.
    async fn get(&self, id: &str) -> Result<Message>;

    /// Deletes a message.
    async fn delete(&self, id: &str) -> Result<()>;
}
