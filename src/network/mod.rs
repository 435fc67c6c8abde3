//! HTTP networking module
//!
//! Provides the HTTP client used for Elasticsearch queries and workspace lookups.

mod client;

pub use client::{HttpClient, HttpResponse};
