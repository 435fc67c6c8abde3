//! Error types for SearchAPI

use thiserror::Error;

/// Result type alias using SearchAPI's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by a search request
#[derive(Error, Debug)]
pub enum Error {
    /// Credential rejected or the workspace service could not be consulted
    #[error("Authorization failed: {0}")]
    Authorization(String),

    /// Elasticsearch answered with a non-success status; carries the raw body
    #[error("Elasticsearch query error: {0}")]
    EngineQuery(String),

    #[error("Invalid search parameters: {0}")]
    InvalidParams(String),

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid JSON in Elasticsearch response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Short machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Authorization(_) => "authorization",
            Error::EngineQuery(_) => "engine_query",
            Error::InvalidParams(_) => "invalid_params",
            Error::Transport(_) => "transport",
            Error::Decode(_) => "decode",
            Error::Config(_) => "config",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_keeps_body() {
        let err = Error::EngineQuery("{\"error\":\"boom\"}".to_string());
        assert_eq!(err.kind(), "engine_query");
        assert!(err.to_string().contains("{\"error\":\"boom\"}"));
    }
}
