//! Search execution

use super::index::index_expression;
use super::models::{AuthContext, SearchParams, ValidatedParams, WorkspaceIdSet};
use super::query::QueryDocument;
use crate::auth::WorkspaceAuthorizer;
use crate::config::ElasticsearchSettings;
use crate::error::Result;
use crate::network::HttpClient;
use axum::http::HeaderMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// A fully built Elasticsearch request
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    /// Index expression placed in the URL path
    pub index: String,
    /// `_search` endpoint URL
    pub url: String,
    /// Request body
    pub query: QueryDocument,
}

/// Runs `search_objects` requests against Elasticsearch with workspace access control
pub struct SearchObjects {
    /// HTTP client for making requests
    client: HttpClient,
    /// Workspace authorization lookup
    authorizer: Arc<dyn WorkspaceAuthorizer>,
    /// Elasticsearch location and index prefix
    elasticsearch: ElasticsearchSettings,
}

impl SearchObjects {
    /// Create a new search executor
    pub fn new(
        client: HttpClient,
        authorizer: Arc<dyn WorkspaceAuthorizer>,
        elasticsearch: ElasticsearchSettings,
    ) -> Self {
        Self {
            client,
            authorizer,
            elasticsearch,
        }
    }

    /// Search with the credential found in the caller's request headers
    pub async fn search_objects(
        &self,
        params: &SearchParams,
        headers: &HeaderMap,
    ) -> Result<serde_json::Value> {
        self.execute(params, &AuthContext::from_headers(headers)?).await
    }

    /// Validate, authorize, build and send the query; the engine's response is returned as is
    pub async fn execute(
        &self,
        params: &SearchParams,
        auth: &AuthContext,
    ) -> Result<serde_json::Value> {
        let params = params.validate()?;
        let workspaces = self.readable_workspaces(&params, auth).await?;
        let request = self.build_request(&params, &workspaces);

        debug!("URL: {}", request.url);
        debug!(
            "QUERY: {}",
            serde_json::to_string(&request.query).unwrap_or_default()
        );

        self.client
            .search(&request.url, &request.query)
            .await
            .map_err(|e| {
                warn!("Search on {} failed: {}", request.index, e);
                e
            })
    }

    /// Build the request without sending it
    pub fn build_request(
        &self,
        params: &ValidatedParams,
        workspaces: &WorkspaceIdSet,
    ) -> SearchRequest {
        let index = index_expression(
            &self.elasticsearch.index_prefix,
            &params.indexes,
            &params.exclude_indexes,
        );
        SearchRequest {
            url: self.elasticsearch.search_url(&index),
            query: QueryDocument::build(params, workspaces),
            index,
        }
    }

    /// Workspaces are only looked up when the filter uses them and a credential was given
    async fn readable_workspaces(
        &self,
        params: &ValidatedParams,
        auth: &AuthContext,
    ) -> Result<WorkspaceIdSet> {
        match auth.token() {
            Some(token) if params.access.needs_workspaces() => {
                self.authorizer.readable_workspaces(token).await
            }
            _ => Ok(WorkspaceIdSet::new()),
        }
    }
}
