//! Recipient resolution domain module.
//!
//! Turns a mixed user/group selection into a flat, deduplicated,
//! email-filtered recipient list for message dispatch.
//!
//! # Module Structure
//!
//! - `selection`: Mutable selection state and its toggle operations
//! - `filter`: Stateless search projection over the user catalog

mod filter;
mod selection;

// Re-export public API
pub use filter::filter_users;
pub use selection::RecipientSelection;
