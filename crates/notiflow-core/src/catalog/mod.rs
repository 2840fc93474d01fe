//! Catalog repository traits.
//!
//! Users, groups, and schools live on the backend; the client treats them as
//! read-only snapshots fetched through these traits. The HTTP layer provides
//! the real implementations; tests use in-memory fakes.

mod repository;

// Re-export public API
pub use repository::{
    GroupQuery, GroupRepository, NewGroup, NewSchool, NewUser, SchoolRepository, UserRepository,
};
