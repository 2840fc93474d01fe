//! Domain core for the Notiflow client.
//!
//! Holds the two logic-bearing components of the client — permission
//! evaluation and recipient resolution — together with the traits the outer
//! layers implement (token persistence, catalogs, message dispatch) and the
//! shared error/config types.

pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod message;
pub mod recipient;
pub mod template;

// Re-export common error type
pub use error::{NotiflowError, Result};
