//! Application layer for the Notiflow client.
//!
//! This crate provides use case implementations that coordinate between
//! domain and infrastructure layers: the authentication lifecycle and the
//! message composer workflow.

pub mod auth_service;
pub mod bootstrap;
pub mod composer_service;

pub use auth_service::AuthService;
pub use bootstrap::{NotiflowApp, bootstrap};
pub use composer_service::{CatalogLoadReport, ComposerService, SendMode};
