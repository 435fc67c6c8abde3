//! Search module
//!
//! Turns `search_objects` parameters into an access-controlled Elasticsearch
//! query and runs it.

mod executor;
mod index;
mod models;
mod query;

pub use executor::{SearchObjects, SearchRequest};
pub use index::{index_expression, is_valid_index_name};
pub use models::*;
pub use query::*;
