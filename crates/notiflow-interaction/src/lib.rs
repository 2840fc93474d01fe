//! HTTP interaction layer for the Notiflow client.
//!
//! This crate implements the core repository and gateway traits against the
//! Notiflow REST backend.

pub mod api_client;

pub use api_client::NotiflowApiClient;
