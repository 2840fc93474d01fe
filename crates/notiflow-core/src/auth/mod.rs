//! Authentication domain module.
//!
//! This module contains the session-scoped authentication context, the
//! permission set it evaluates, and the traits for token persistence and
//! the backend auth endpoints.
//!
//! # Module Structure
//!
//! - `context`: The injectable [`AuthContext`] owning user + permissions
//! - `permission_set`: Lowercase-normalized capability set
//! - `token`: Pure decoding of permissions from a bearer token
//! - `token_store`: Persistence trait for the session token
//! - `gateway`: Backend auth endpoint trait

mod context;
mod gateway;
mod permission_set;
mod token;
mod token_store;

// Re-export public API
pub use context::AuthContext;
pub use gateway::{AuthGateway, AuthSession};
pub use permission_set::PermissionSet;
pub use token::decode_permissions;
pub use token_store::{MemoryTokenStore, TokenStore};
