//! Gateway abstraction layer
//!
//! This module defines the narrow capability interfaces the digest pipeline
//! consumes, plus the provider-agnostic snapshot types exchanged through
//! them. Implement [`SourceControlGateway`] to support another hosting
//! provider (GitLab, Gitea, ...) and [`NotesGateway`] to publish somewhere
//! other than the default pad service.
//!
//! Both traits are annotated for `mockall` so tests can drive the pipeline
//! with deterministic gateways instead of the network.

use async_trait::async_trait;

#[cfg(any(test, feature = "test-mocks"))]
use mockall::automock;

use crate::error::RemoteError;

/// Read-only snapshot of a repository, fetched once per run and discarded
/// when the run ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    /// Repository name, unique within its organization.
    pub name: String,

    /// Whether the repository is private.
    pub private: bool,

    /// Whether issue tracking is enabled for the repository.
    pub has_issues: bool,
}

/// Read-only snapshot of an open issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Issue title as reported by the tracker.
    pub title: String,

    /// Label names attached to the issue, in tracker order.
    pub labels: Vec<String>,
}

/// Access to the source-control service.
///
/// Authentication and session setup are entirely the implementor's concern;
/// the pipeline only ever asks these two questions.
#[cfg_attr(any(test, feature = "test-mocks"), automock)]
#[async_trait]
pub trait SourceControlGateway: Send + Sync {
    /// List every repository visible in the organization, in service order.
    async fn list_repositories(&self, org: &str) -> Result<Vec<Repository>, RemoteError>;

    /// List the open issues of a repository, in service order.
    async fn list_issues(&self, org: &str, repo: &str) -> Result<Vec<Issue>, RemoteError>;
}

/// Access to the collaborative-notes service.
#[cfg_attr(any(test, feature = "test-mocks"), automock)]
#[async_trait]
pub trait NotesGateway: Send + Sync {
    /// Create a new document and return its identifier.
    async fn create_document(&self, title: &str, body: &str) -> Result<String, RemoteError>;
}
