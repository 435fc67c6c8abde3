//! Settings structures for SearchAPI configuration

use crate::error::{Error, Result};
use crate::search::is_valid_index_name;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main settings structure matching settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub elasticsearch: ElasticsearchSettings,
    pub workspace: WorkspaceSettings,
    pub server: ServerSettings,
    pub outgoing: OutgoingSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::Config(format!("cannot read {}: {}", path.as_ref().display(), e))
        })?;
        Self::from_yaml(&content)
    }

    /// Parse settings from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Merge with environment variables
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("ELASTICSEARCH_URL") {
            self.elasticsearch.url = val;
        }
        if let Ok(val) = std::env::var("INDEX_PREFIX") {
            self.elasticsearch.index_prefix = val;
        }
        if let Ok(val) = std::env::var("WORKSPACE_URL") {
            self.workspace.url = val;
        }
        if let Ok(val) = std::env::var("SEARCHAPI_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("SEARCHAPI_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Ok(val) = std::env::var("SEARCHAPI_REQUEST_TIMEOUT") {
            if let Ok(timeout) = val.parse() {
                self.outgoing.request_timeout = timeout;
            }
        }
    }

    /// Check the settings before they are used to serve requests
    pub fn validate(&self) -> Result<()> {
        let prefix = &self.elasticsearch.index_prefix;
        if prefix.is_empty() {
            return Err(Error::Config("index_prefix must not be empty".to_string()));
        }
        // Prefixes may be dotted namespaces ("search2.dev") but each part must be a plain name
        if !prefix.split('.').all(is_valid_index_name) {
            return Err(Error::Config(format!("invalid index_prefix: {:?}", prefix)));
        }
        for (name, value) in [
            ("elasticsearch.url", &self.elasticsearch.url),
            ("workspace.url", &self.workspace.url),
        ] {
            url::Url::parse(value)
                .map_err(|e| Error::Config(format!("invalid {} {:?}: {}", name, value, e)))?;
        }
        let timeout = self.outgoing.request_timeout;
        if timeout.is_nan() || timeout <= 0.0 {
            return Err(Error::Config(
                "outgoing.request_timeout must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Elasticsearch connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ElasticsearchSettings {
    /// Base URL of the Elasticsearch HTTP API
    pub url: String,
    /// Namespace prefix for every index name
    pub index_prefix: String,
}

impl Default for ElasticsearchSettings {
    fn default() -> Self {
        Self {
            url: "http://localhost:9200".to_string(),
            index_prefix: "search2".to_string(),
        }
    }
}

impl ElasticsearchSettings {
    /// Search endpoint for an index expression
    pub fn search_url(&self, index_expression: &str) -> String {
        format!(
            "{}/{}/_search",
            self.url.trim_end_matches('/'),
            index_expression
        )
    }
}

/// Workspace (authorization) service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceSettings {
    /// JSON-RPC endpoint of the workspace service
    pub url: String,
}

impl Default for WorkspaceSettings {
    fn default() -> Self {
        Self {
            url: "https://kbase.us/services/ws".to_string(),
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 5000,
            bind_address: "127.0.0.1".to_string(),
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Client-side request timeout in seconds
    pub request_timeout: f64,
    /// Pool max size
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            // Slightly above the 3m timeout Elasticsearch is given in each query
            request_timeout: 190.0,
            pool_maxsize: 20,
            verify_ssl: true,
        }
    }
}
