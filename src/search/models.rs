//! Search request and related data models

use super::index::is_valid_index_name;
use crate::error::{Error, Result};
use axum::http::{header::AUTHORIZATION, HeaderMap};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

/// Default page size when the caller does not give one
pub const DEFAULT_SIZE: u64 = 10;

/// Workspace ids a caller may read. Ordered so that built queries are deterministic.
pub type WorkspaceIdSet = BTreeSet<i64>;

/// Parameters of a `search_objects` request, as received from the caller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Elasticsearch query clause, placed under `bool.must`
    pub query: Option<Value>,
    /// Result offset
    pub from: Option<u64>,
    /// Page size (defaults to 10)
    pub size: Option<u64>,
    /// Only count matching documents
    pub count: bool,
    /// Only search public workspaces
    pub public_only: bool,
    /// Only search private workspaces the caller can read
    pub private_only: bool,
    /// Index short names to search instead of the default index
    pub indexes: Vec<String>,
    /// Index short names to exclude
    pub exclude_indexes: Vec<String>,
    /// Elasticsearch sort spec
    pub sort: Option<Value>,
    /// Elasticsearch aggregations
    pub aggs: Option<Value>,
    /// Elasticsearch `_source` filter
    pub source: Option<Value>,
    /// Highlight fields
    pub highlight: Option<Value>,
}

impl SearchParams {
    /// Check the parameters and apply defaults
    pub fn validate(&self) -> Result<ValidatedParams> {
        let access = match (self.public_only, self.private_only) {
            (true, true) => {
                return Err(Error::InvalidParams(
                    "public_only and private_only are mutually exclusive".to_string(),
                ))
            }
            (true, false) => AccessMode::PublicOnly,
            (false, true) => AccessMode::PrivateOnly,
            (false, false) => AccessMode::All,
        };

        for name in self.indexes.iter().chain(self.exclude_indexes.iter()) {
            if !is_valid_index_name(name) {
                return Err(Error::InvalidParams(format!(
                    "invalid index name: {:?}",
                    name
                )));
            }
        }

        Ok(ValidatedParams {
            query: present(&self.query),
            from: self.from.unwrap_or(0),
            size: self.size.unwrap_or(DEFAULT_SIZE),
            count: self.count,
            access,
            indexes: self.indexes.clone(),
            exclude_indexes: self.exclude_indexes.clone(),
            sort: present(&self.sort),
            aggs: present(&self.aggs),
            source: present(&self.source),
            highlight: present(&self.highlight),
        })
    }
}

/// Search parameters after validation, with defaults applied
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedParams {
    pub query: Option<Value>,
    pub from: u64,
    pub size: u64,
    pub count: bool,
    pub access: AccessMode,
    pub indexes: Vec<String>,
    pub exclude_indexes: Vec<String>,
    pub sort: Option<Value>,
    pub aggs: Option<Value>,
    pub source: Option<Value>,
    pub highlight: Option<Value>,
}

/// Which documents a caller wants to see
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AccessMode {
    /// Public documents plus documents in readable workspaces
    #[default]
    All,
    /// Public documents only
    PublicOnly,
    /// Private documents in readable workspaces only
    PrivateOnly,
}

impl AccessMode {
    /// Whether the caller's readable workspaces are needed to build the filter
    pub fn needs_workspaces(&self) -> bool {
        !matches!(self, AccessMode::PublicOnly)
    }
}

/// Credential taken from the caller's request headers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    token: Option<String>,
}

impl AuthContext {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Read the `Authorization` header. A blank value counts as absent; a value
    /// that is not visible ASCII is rejected.
    pub fn from_headers(headers: &HeaderMap) -> Result<Self> {
        let Some(value) = headers.get(AUTHORIZATION) else {
            return Ok(Self::anonymous());
        };
        let token = value
            .to_str()
            .map_err(|_| Error::Authorization("malformed credential".to_string()))?
            .trim();
        if token.is_empty() {
            return Ok(Self::anonymous());
        }
        Ok(Self::new(token))
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

/// Drop passthrough values that carry nothing (null, false, "", [], {})
fn present(value: &Option<Value>) -> Option<Value> {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::Array(a)) if a.is_empty() => None,
        Some(Value::Object(o)) if o.is_empty() => None,
        Some(v) => Some(v.clone()),
    }
}
