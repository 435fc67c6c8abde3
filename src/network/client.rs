//! HTTP client for talking to Elasticsearch and the workspace service

use crate::config::OutgoingSettings;
use crate::error::{Error, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Status and body of an HTTP response
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub text: String,
}

impl HttpResponse {
    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse response as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.text)?)
    }
}

/// HTTP client wrapper with SearchAPI-specific configuration
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self> {
        Self::with_settings(&OutgoingSettings::default())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &OutgoingSettings) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(Duration::from_secs_f64(settings.request_timeout))
            .pool_max_idle_per_host(settings.pool_maxsize);

        // SSL verification
        if !settings.verify_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    /// POST a JSON body. Only `Content-Type` (and `Authorization` when given) is sent.
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &T,
        authorization: Option<&str>,
    ) -> Result<HttpResponse> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = authorization {
            let value = HeaderValue::from_str(token)
                .map_err(|_| Error::Authorization("malformed credential".to_string()))?;
            headers.insert(AUTHORIZATION, value);
        }

        let response = self
            .client
            .post(url)
            .headers(headers)
            .body(serde_json::to_vec(body)?)
            .send()
            .await?;

        let status = response.status().as_u16();
        let text = response.text().await?;
        Ok(HttpResponse { status, text })
    }

    /// Run a search and return the decoded response body untouched
    pub async fn search<T: Serialize + ?Sized>(
        &self,
        url: &str,
        query: &T,
    ) -> Result<serde_json::Value> {
        let response = self.post_json(url, query, None).await?;
        if !response.is_success() {
            warn!("Elasticsearch returned {} for {}", response.status, url);
            return Err(Error::EngineQuery(response.text));
        }
        debug!("Elasticsearch returned {} bytes", response.text.len());
        response.json()
    }
}
