//! Application state shared across handlers

use crate::auth::{WorkspaceAuthorizer, WorkspaceClient};
use crate::config::Settings;
use crate::network::HttpClient;
use crate::search::SearchObjects;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Settings, read-only after start-up
    pub settings: Arc<Settings>,
    /// Search executor
    pub search: Arc<SearchObjects>,
}

impl AppState {
    /// Create new application state backed by the workspace service
    pub fn new(settings: Settings, client: HttpClient) -> Self {
        let authorizer = Arc::new(WorkspaceClient::new(
            client.clone(),
            settings.workspace.url.clone(),
        ));
        Self::with_authorizer(settings, client, authorizer)
    }

    /// Create application state with a custom authorizer
    pub fn with_authorizer(
        settings: Settings,
        client: HttpClient,
        authorizer: Arc<dyn WorkspaceAuthorizer>,
    ) -> Self {
        let search = Arc::new(SearchObjects::new(
            client,
            authorizer,
            settings.elasticsearch.clone(),
        ));
        Self {
            settings: Arc::new(settings),
            search,
        }
    }
}
