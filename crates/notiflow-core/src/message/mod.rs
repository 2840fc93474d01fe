//! Message dispatch and history traits.

mod gateway;

// Re-export public API
pub use gateway::{MessageGateway, MessageQuery};
