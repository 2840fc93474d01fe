//! Repository traits for backend-owned catalogs.

use crate::error::Result;
use async_trait::async_trait;
use notiflow_types::{Group, School, User};
use serde::{Deserialize, Serialize};

/// Payload for creating a user through the management screens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: String,
    pub school_id: String,
    pub school_name: String,
    pub password: String,
}

/// Payload for creating a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGroup {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub member_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school_id: Option<String>,
}

/// Payload for creating a school.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSchool {
    pub id: String,
    pub name: String,
}

/// Filter parameters for the group catalog endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupQuery {
    pub school_id: Option<String>,
    /// Academic year the groups belong to.
    pub year: Option<String>,
}

impl GroupQuery {
    /// Query restricted to an academic year.
    pub fn for_year(year: impl Into<String>) -> Self {
        Self {
            year: Some(year.into()),
            ..Self::default()
        }
    }
}

/// Repository for the user catalog.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Lists users, optionally restricted to a role.
    async fn list(&self, role: Option<&str>) -> Result<Vec<User>>;

    /// Creates a user and returns the stored record.
    async fn create(&self, user: NewUser) -> Result<User>;
}

/// Repository for the group catalog.
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Lists groups matching the query.
    async fn list(&self, query: GroupQuery) -> Result<Vec<Group>>;

    /// Creates a group and returns the stored record.
    async fn create(&self, group: NewGroup) -> Result<Group>;
}

/// Repository for the school catalog.
#[async_trait]
pub trait SchoolRepository: Send + Sync {
    /// Lists all schools visible to the current session.
    async fn list(&self) -> Result<Vec<School>>;

    /// Creates a school and returns the stored record.
    async fn create(&self, school: NewSchool) -> Result<School>;
}
