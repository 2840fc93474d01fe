//! Infrastructure layer for the Notiflow client.
//!
//! Filesystem-backed implementations of the core persistence traits plus
//! configuration loading.

pub mod config_service;
pub mod paths;
pub mod telemetry;
pub mod token_storage;

pub use config_service::ConfigService;
pub use paths::NotiflowPaths;
pub use telemetry::init_logging;
pub use token_storage::FileTokenStorage;
