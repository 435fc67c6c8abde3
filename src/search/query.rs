//! Elasticsearch query document construction
//!
//! The caller's query goes under `bool.must`; access control is always
//! enforced through `bool.filter`.

use super::models::{AccessMode, ValidatedParams, WorkspaceIdSet};
use serde::{Serialize, Serializer};
use serde_json::{json, Value};

/// Stop collecting hits after this many documents per shard
pub const TERMINATE_AFTER: u64 = 10_000;

/// Server-side timeout sent with every query
pub const ENGINE_TIMEOUT: &str = "3m";

/// Full request body for the `_search` endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryDocument {
    pub query: BoolQuery,
    pub size: u64,
    pub from: u64,
    pub timeout: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terminate_after: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggs: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Value>,
    #[serde(rename = "_source", skip_serializing_if = "Option::is_none")]
    pub source: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<Highlight>,
}

impl QueryDocument {
    /// Build the query for validated params and the caller's readable workspaces
    pub fn build(params: &ValidatedParams, workspaces: &WorkspaceIdSet) -> Self {
        let size = if params.count { 0 } else { params.size };
        let terminate_after = if !params.count && params.size > 0 {
            Some(TERMINATE_AFTER)
        } else {
            None
        };

        Self {
            query: BoolQuery {
                bool: BoolClause {
                    must: params.query.clone(),
                    filter: AccessFilter::new(params.access, workspaces),
                },
            },
            size,
            from: params.from,
            timeout: ENGINE_TIMEOUT.to_string(),
            terminate_after,
            aggs: params.aggs.clone(),
            sort: params.sort.clone(),
            source: params.source.clone(),
            highlight: params.highlight.clone().map(Highlight::new),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoolQuery {
    pub bool: BoolClause,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoolClause {
    /// Omitted entirely when the caller gave no query, which matches everything
    #[serde(skip_serializing_if = "Option::is_none")]
    pub must: Option<Value>,
    pub filter: AccessFilter,
}

/// Access control clause restricting which documents are visible
#[derive(Debug, Clone, PartialEq)]
pub enum AccessFilter {
    /// `is_public: true`
    Public,
    /// `is_public: false` and `access_group` in the set
    Private(WorkspaceIdSet),
    /// `is_public: true` or `access_group` in the set
    PublicOrReadable(WorkspaceIdSet),
}

impl AccessFilter {
    pub fn new(mode: AccessMode, workspaces: &WorkspaceIdSet) -> Self {
        match mode {
            AccessMode::PublicOnly => AccessFilter::Public,
            AccessMode::PrivateOnly => AccessFilter::Private(workspaces.clone()),
            AccessMode::All => AccessFilter::PublicOrReadable(workspaces.clone()),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            AccessFilter::Public => json!({"term": {"is_public": true}}),
            AccessFilter::Private(ids) => json!([
                {"term": {"is_public": false}},
                {"terms": {"access_group": ids}}
            ]),
            AccessFilter::PublicOrReadable(ids) => json!({
                "bool": {
                    "should": [
                        {"term": {"is_public": true}},
                        {"terms": {"access_group": ids}}
                    ]
                }
            }),
        }
    }
}

impl Serialize for AccessFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// Highlight options; field names need not match the query's fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Highlight {
    pub require_field_match: bool,
    pub fields: Value,
}

impl Highlight {
    pub fn new(fields: Value) -> Self {
        Self {
            require_field_match: false,
            fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchParams;

    fn build(params: SearchParams, ids: &[i64]) -> Value {
        let params = params.validate().unwrap();
        let workspaces: WorkspaceIdSet = ids.iter().copied().collect();
        serde_json::to_value(QueryDocument::build(&params, &workspaces)).unwrap()
    }

    #[test]
    fn test_public_only_filter() {
        let params = SearchParams {
            public_only: true,
            ..Default::default()
        };
        let doc = build(params, &[]);
        assert_eq!(
            doc["query"]["bool"]["filter"],
            json!({"term": {"is_public": true}})
        );
    }

    #[test]
    fn test_private_only_filter() {
        let params = SearchParams {
            private_only: true,
            ..Default::default()
        };
        let doc = build(params, &[9, 5]);
        assert_eq!(
            doc["query"]["bool"]["filter"],
            json!([
                {"term": {"is_public": false}},
                {"terms": {"access_group": [5, 9]}}
            ])
        );
    }

    #[test]
    fn test_private_only_without_workspaces_matches_nothing() {
        let params = SearchParams {
            private_only: true,
            ..Default::default()
        };
        let doc = build(params, &[]);
        assert_eq!(
            doc["query"]["bool"]["filter"][1],
            json!({"terms": {"access_group": []}})
        );
    }

    #[test]
    fn test_default_filter() {
        let doc = build(SearchParams::default(), &[5, 9]);
        assert_eq!(
            doc["query"]["bool"]["filter"],
            json!({"bool": {"should": [
                {"term": {"is_public": true}},
                {"terms": {"access_group": [5, 9]}}
            ]}})
        );
    }

    #[test]
    fn test_user_query_goes_under_must() {
        let params = SearchParams {
            query: Some(json!({"match": {"name": "coli"}})),
            ..Default::default()
        };
        let doc = build(params, &[]);
        assert_eq!(doc["query"]["bool"]["must"], json!({"match": {"name": "coli"}}));

        let doc = build(SearchParams::default(), &[]);
        assert!(doc["query"]["bool"].get("must").is_none());
    }

    #[test]
    fn test_paging_defaults() {
        let doc = build(SearchParams::default(), &[]);
        assert_eq!(doc["size"], json!(10));
        assert_eq!(doc["from"], json!(0));
        assert_eq!(doc["timeout"], json!("3m"));
        assert_eq!(doc["terminate_after"], json!(10_000));
    }

    #[test]
    fn test_count_has_no_size_or_cutoff() {
        let params = SearchParams {
            count: true,
            size: Some(50),
            from: Some(20),
            ..Default::default()
        };
        let doc = build(params, &[]);
        assert_eq!(doc["size"], json!(0));
        assert_eq!(doc["from"], json!(20));
        assert!(doc.get("terminate_after").is_none());
        assert_eq!(doc["timeout"], json!("3m"));
    }

    #[test]
    fn test_zero_size_has_no_cutoff() {
        let params = SearchParams {
            size: Some(0),
            ..Default::default()
        };
        let doc = build(params, &[]);
        assert_eq!(doc["size"], json!(0));
        assert!(doc.get("terminate_after").is_none());
    }

    #[test]
    fn test_passthrough_options() {
        let doc = build(SearchParams::default(), &[]);
        for key in ["aggs", "sort", "_source", "highlight"] {
            assert!(doc.get(key).is_none(), "{} should be absent", key);
        }

        let params = SearchParams {
            aggs: Some(json!({"types": {"terms": {"field": "obj_type_name"}}})),
            sort: Some(json!([{"timestamp": {"order": "desc"}}])),
            source: Some(json!(["obj_name"])),
            highlight: Some(json!({"obj_name": {}})),
            ..Default::default()
        };
        let doc = build(params, &[]);
        assert_eq!(doc["aggs"], json!({"types": {"terms": {"field": "obj_type_name"}}}));
        assert_eq!(doc["sort"], json!([{"timestamp": {"order": "desc"}}]));
        assert_eq!(doc["_source"], json!(["obj_name"]));
        assert_eq!(
            doc["highlight"],
            json!({"require_field_match": false, "fields": {"obj_name": {}}})
        );
    }

    #[test]
    fn test_build_is_deterministic() {
        let params = SearchParams {
            query: Some(json!({"bool": {"must": [{"term": {"a": 1}}, {"term": {"b": 2}}]}})),
            sort: Some(json!(["x", "y"])),
            ..Default::default()
        }
        .validate()
        .unwrap();
        let first: WorkspaceIdSet = [9, 1, 5].into_iter().collect();
        let second: WorkspaceIdSet = [5, 9, 1].into_iter().collect();
        let a = serde_json::to_vec(&QueryDocument::build(&params, &first)).unwrap();
        let b = serde_json::to_vec(&QueryDocument::build(&params, &second)).unwrap();
        assert_eq!(a, b);
    }
}
