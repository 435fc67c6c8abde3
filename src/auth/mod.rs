//! Workspace authorization
//!
//! Resolves a caller's credential to the set of workspaces they can read.

mod workspace;

pub use workspace::WorkspaceClient;

use crate::error::Result;
use crate::search::WorkspaceIdSet;
use async_trait::async_trait;

/// Looks up the workspaces readable with a credential
#[async_trait]
pub trait WorkspaceAuthorizer: Send + Sync {
    /// Workspace ids the credential grants read access to.
    ///
    /// Fails with `Error::Authorization` if the credential is rejected or the
    /// service cannot be reached.
    async fn readable_workspaces(&self, token: &str) -> Result<WorkspaceIdSet>;
}
