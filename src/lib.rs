//! issuepad - Weekly Issue Digest Publisher
//!
//! issuepad assembles a status digest of open issues (filtered by label)
//! across a configured set of organization repositories, formats it into a
//! text document, and publishes that document to a collaborative notes pad.
//!
//! ## Core Features
//!
//! - **Issue Aggregation**: Repository discovery via the GitHub API with
//!   inclusion-list and label filtering
//! - **Document Formatting**: Ordinal-dated title line and configurable
//!   section/item separators
//! - **Fail-Whole Runs**: A gateway failure aborts the whole run; an
//!   incomplete digest is never published
//! - **Configuration Management**: YAML-based configuration with XDG compliance
//! - **Authentication**: GitHub CLI and token-based authentication support
//!
//! ## Modules
//!
//! - [`config`]: Configuration management and parsing
//! - [`digest`]: Issue aggregation and filtering pipeline
//! - [`engine`]: Run orchestration (aggregate, format, publish)
//! - [`gateway`]: Capability interfaces for the external services
//! - [`github`]: GitHub API integration and authentication
//! - [`notes`]: Notes-service HTTP client

pub mod config;
pub mod digest;
pub mod engine;
pub mod error;
pub mod format;
pub mod gateway;
pub mod github;
pub mod notes;
pub mod publish;

pub use config::Config;
pub use digest::{Aggregator, Digest, DigestEntry};
pub use engine::{DigestEngine, RunReport};
pub use error::{DigestError, RemoteError};
pub use format::{Document, DocumentFormatter};
pub use gateway::{Issue, NotesGateway, Repository, SourceControlGateway};
pub use github::GitHubClient;
pub use notes::NotesClient;
pub use publish::Publisher;
