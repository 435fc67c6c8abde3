//! SearchAPI: access-controlled search over Elasticsearch
//!
//! Translates `search_objects` requests into Elasticsearch queries that only
//! match public documents and documents in workspaces the caller can read.

pub mod auth;
pub mod config;
pub mod error;
pub mod network;
pub mod search;
pub mod web;

pub use config::Settings;
pub use error::{Error, Result};
pub use search::{SearchObjects, SearchParams};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
