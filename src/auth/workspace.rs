//! Workspace service client
//!
//! Calls `Workspace.list_workspace_ids` over JSON-RPC 1.1 with the caller's token.

use super::WorkspaceAuthorizer;
use crate::error::{Error, Result};
use crate::network::HttpClient;
use crate::search::WorkspaceIdSet;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

/// Authorizer backed by the workspace service
#[derive(Clone)]
pub struct WorkspaceClient {
    client: HttpClient,
    url: String,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Vec<WorkspaceIds>,
}

#[derive(Debug, Deserialize)]
struct WorkspaceIds {
    workspaces: Vec<i64>,
}

impl WorkspaceClient {
    pub fn new(client: HttpClient, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl WorkspaceAuthorizer for WorkspaceClient {
    async fn readable_workspaces(&self, token: &str) -> Result<WorkspaceIdSet> {
        let payload = json!({
            "method": "Workspace.list_workspace_ids",
            "version": "1.1",
            "params": [{"perm": "r"}]
        });

        let response = self
            .client
            .post_json(&self.url, &payload, Some(token))
            .await
            .map_err(|e| match e {
                rejected @ Error::Authorization(_) => rejected,
                other => Error::Authorization(format!("workspace service unreachable: {}", other)),
            })?;

        if !response.is_success() {
            warn!("Workspace service returned {}", response.status);
            return Err(Error::Authorization(response.text));
        }

        let parsed: RpcResponse = response.json().map_err(|e| {
            Error::Authorization(format!("unexpected workspace service response: {}", e))
        })?;
        let ids: WorkspaceIdSet = parsed
            .result
            .into_iter()
            .next()
            .ok_or_else(|| Error::Authorization("empty workspace service result".to_string()))?
            .workspaces
            .into_iter()
            .collect();

        debug!("Caller can read {} workspaces", ids.len());
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> WorkspaceClient {
        WorkspaceClient::new(HttpClient::new().unwrap(), server.uri())
    }

    #[tokio::test]
    async fn test_lists_readable_workspaces() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("authorization", "TOKEN"))
            .and(body_json(json!({
                "method": "Workspace.list_workspace_ids",
                "version": "1.1",
                "params": [{"perm": "r"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "version": "1.1",
                "result": [{"workspaces": [9, 5, 9], "pub": []}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let ids = client_for(&server)
            .await
            .readable_workspaces("TOKEN")
            .await
            .unwrap();
        assert_eq!(ids.into_iter().collect::<Vec<_>>(), vec![5, 9]);
    }

    #[tokio::test]
    async fn test_rejected_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Token is invalid"))
            .mount(&server)
            .await;

        let result = client_for(&server).await.readable_workspaces("BAD").await;
        match result {
            Err(Error::Authorization(msg)) => assert_eq!(msg, "Token is invalid"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": []})))
            .mount(&server)
            .await;

        let result = client_for(&server).await.readable_workspaces("TOKEN").await;
        assert!(matches!(result, Err(Error::Authorization(_))));
    }

    #[tokio::test]
    async fn test_unreachable_service() {
        let client = WorkspaceClient::new(HttpClient::new().unwrap(), "http://127.0.0.1:1");
        let result = client.readable_workspaces("TOKEN").await;
        assert!(matches!(result, Err(Error::Authorization(_))));
    }
}
