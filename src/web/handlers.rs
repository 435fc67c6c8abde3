//! HTTP request handlers

use super::state::AppState;
use crate::error::Error;
use crate::search::SearchParams;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// JSON-RPC error code for an unparsable request
const PARSE_ERROR: i64 = -32700;
/// JSON-RPC error code for an unknown method
const METHOD_NOT_FOUND: i64 = -32601;
/// JSON-RPC error code for malformed params
const INVALID_PARAMS: i64 = -32602;
/// JSON-RPC error code for failures inside a method
const SERVER_ERROR: i64 = -32000;

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidParams(_) => StatusCode::BAD_REQUEST,
            Error::Authorization(_) => StatusCode::UNAUTHORIZED,
            Error::EngineQuery(_) | Error::Transport(_) | Error::Decode(_) => {
                StatusCode::BAD_GATEWAY
            }
            Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let body = json!({
            "error": {
                "kind": self.kind(),
                "message": self.to_string()
            }
        });
        (self.status_code(), Json(body)).into_response()
    }
}

/// Search handler; the Elasticsearch response is passed through untouched
pub async fn search_objects(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<SearchParams>, JsonRejection>,
) -> Result<Json<Value>, Error> {
    let Json(params) = body.map_err(|rejection| Error::InvalidParams(rejection.body_text()))?;
    let result = state.search.search_objects(&params, &headers).await?;
    Ok(Json(result))
}

/// JSON-RPC request envelope
#[derive(Debug, Deserialize)]
pub struct RpcRequest {
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

/// JSON-RPC response envelope
#[derive(Debug, Serialize)]
pub struct RpcResponse {
    pub jsonrpc: &'static str,
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

#[derive(Debug, Serialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

impl RpcResponse {
    fn ok(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    fn err(id: Option<Value>, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(RpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

/// JSON-RPC endpoint. Params may be an object or a one-element array holding it.
pub async fn rpc(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<RpcRequest>, JsonRejection>,
) -> Json<RpcResponse> {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return Json(RpcResponse::err(None, PARSE_ERROR, rejection.body_text()))
        }
    };
    let id = request.id;
    if request.method != "search_objects" {
        return Json(RpcResponse::err(
            id,
            METHOD_NOT_FOUND,
            format!("Method not found: {}", request.method),
        ));
    }

    let raw = match request.params {
        Value::Array(mut items) if items.len() == 1 => items.remove(0),
        Value::Null => json!({}),
        other => other,
    };
    let params: SearchParams = match serde_json::from_value(raw) {
        Ok(p) => p,
        Err(e) => return Json(RpcResponse::err(id, INVALID_PARAMS, e.to_string())),
    };

    match state.search.search_objects(&params, &headers).await {
        Ok(result) => Json(RpcResponse::ok(id, result)),
        Err(e) => {
            tracing::warn!("search_objects failed: {}", e);
            Json(RpcResponse::err(id, SERVER_ERROR, e.to_string()))
        }
    }
}

/// Health check handler
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": crate::VERSION,
        "index_prefix": state.settings.elasticsearch.index_prefix
    }))
}
