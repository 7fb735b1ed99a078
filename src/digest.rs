//! Issue aggregation and filtering pipeline
//!
//! Walks the organization's repositories through two filters (inclusion-list
//! membership, then label match per issue) and produces the [`Digest`] the
//! document formatter consumes. Aggregation fails whole, not partial: any
//! gateway error aborts the run so an incomplete digest is never published.

use tracing::{debug, info};

use crate::config::Config;
use crate::error::RemoteError;
use crate::gateway::{Issue, Repository, SourceControlGateway};

/// One repository and the issues that matched the label filter.
///
/// `issues` may be empty: repositories with no matching issues are still
/// emitted so the document can render them as empty sections.
#[derive(Debug, Clone)]
pub struct DigestEntry {
    pub repository: Repository,
    pub issues: Vec<Issue>,
}

/// The aggregated, filtered result of one run, prior to formatting.
///
/// Entries preserve the order repositories were returned by the gateway, and
/// issues preserve the order the tracker returned them.
#[derive(Debug, Clone, Default)]
pub struct Digest {
    pub entries: Vec<DigestEntry>,
}

impl Digest {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total matching issues across all entries.
    pub fn issue_count(&self) -> usize {
        self.entries.iter().map(|e| e.issues.len()).sum()
    }
}

/// True iff the repository's name is a member of the inclusion list.
///
/// Exact, case-sensitive match; an empty inclusion list matches nothing.
pub fn repository_included(repository: &Repository, projects: &[String]) -> bool {
    projects.iter().any(|name| name == &repository.name)
}

/// True iff the issue carries the target label, by exact string equality.
///
/// An issue with no labels never matches; an absent label filter means
/// "match nothing", not a wildcard.
pub fn issue_matches(issue: &Issue, label: &str) -> bool {
    issue.labels.iter().any(|l| l == label)
}

/// Orchestrates filter application across an organization's repositories.
pub struct Aggregator<'a, G: SourceControlGateway> {
    gateway: &'a G,
    organization: String,
    projects: Vec<String>,
    label: String,
}

impl<'a, G: SourceControlGateway> Aggregator<'a, G> {
    pub fn new(gateway: &'a G, organization: String, projects: Vec<String>, label: String) -> Self {
        Self {
            gateway,
            organization,
            projects,
            label,
        }
    }

    /// Build an aggregator scoped by the loaded configuration.
    pub fn from_config(gateway: &'a G, config: &Config) -> Self {
        Self::new(
            gateway,
            config.github.organization.clone(),
            config.github.projects.clone(),
            config.github.label.clone(),
        )
    }

    /// Produce the digest for one run.
    ///
    /// A repository is included iff its name is on the inclusion list, issue
    /// tracking is enabled, and it is not private. Every included repository
    /// gets an entry, even with zero matching issues. Any gateway failure
    /// aborts the whole aggregation; partial results are discarded.
    pub async fn aggregate(&self) -> Result<Digest, RemoteError> {
        debug!("Listing repositories for organization: {}", self.organization);

        let repositories = self.gateway.list_repositories(&self.organization).await?;

        info!(
            "Found {} repositories in organization: {}",
            repositories.len(),
            self.organization
        );

        let mut entries = Vec::new();

        for repository in repositories {
            if !repository_included(&repository, &self.projects) {
                debug!("Skipping repository not on inclusion list: {}", repository.name);
                continue;
            }

            if !repository.has_issues {
                debug!(
                    "Excluding repository with issue tracking disabled: {}",
                    repository.name
                );
                continue;
            }

            if repository.private {
                debug!("Excluding private repository: {}", repository.name);
                continue;
            }

            let issues = self
                .gateway
                .list_issues(&self.organization, &repository.name)
                .await?;

            let matching: Vec<Issue> = issues
                .into_iter()
                .filter(|issue| issue_matches(issue, &self.label))
                .collect();

            debug!(
                "Repository {}: {} issues labeled '{}'",
                repository.name,
                matching.len(),
                self.label
            );

            entries.push(DigestEntry {
                repository,
                issues: matching,
            });
        }

        info!(
            "Aggregated {} repositories, {} matching issues",
            entries.len(),
            entries.iter().map(|e| e.issues.len()).sum::<usize>()
        );

        Ok(Digest { entries })
    }
}
