//! Digest Engine - Orchestrates one digest run
//!
//! This module provides the high-level orchestration that coordinates
//! aggregation, document formatting, and publishing over the gateway
//! abstractions. A run is a batch job: external calls are awaited one at a
//! time, with no parallel fan-out, no retries, and no timeout layer of its
//! own (request timeouts belong to the gateway clients).

use std::time::{Duration, Instant};

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::config::Config;
use crate::digest::{Aggregator, Digest};
use crate::error::DigestError;
use crate::format::{Document, DocumentFormatter};
use crate::gateway::{NotesGateway, SourceControlGateway};
use crate::publish::Publisher;

/// Results from a complete digest run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Whether the notes service returned a new document identifier
    pub published: bool,
    /// Repositories that passed every filter
    pub repositories: usize,
    /// Matching issues across all repositories
    pub issues: usize,
    pub duration: Duration,
}

/// The main engine that wires config and gateways into a digest run
pub struct DigestEngine<G, N> {
    config: Config,
    gateway: G,
    notes: N,
}

impl<G: SourceControlGateway, N: NotesGateway> DigestEngine<G, N> {
    pub fn new(config: Config, gateway: G, notes: N) -> Self {
        Self {
            config,
            gateway,
            notes,
        }
    }

    /// Aggregate without formatting or publishing.
    pub async fn aggregate(&self) -> Result<Digest, DigestError> {
        let aggregator = Aggregator::from_config(&self.gateway, &self.config);
        Ok(aggregator.aggregate().await?)
    }

    /// Build the document for the given run date without publishing it.
    pub async fn preview(&self, date: NaiveDate) -> Result<Document, DigestError> {
        let digest = self.aggregate().await?;
        DocumentFormatter::from_config(&self.config.digest).format(date, &digest)
    }

    /// Run a complete digest cycle: aggregate, format, publish.
    ///
    /// An empty digest is a normal outcome: the notes service is not called
    /// and the report comes back unpublished. Gateway failures during
    /// aggregation abort the run; publish failures are logged and reported
    /// through the `published` flag.
    pub async fn run(&self, date: NaiveDate) -> Result<RunReport, DigestError> {
        let start_time = Instant::now();

        info!(
            "Starting digest run for organization: {}",
            self.config.github.organization
        );

        let digest = self.aggregate().await?;

        let formatter = DocumentFormatter::from_config(&self.config.digest);
        let document = match formatter.format(date, &digest) {
            Ok(document) => document,
            Err(DigestError::EmptyDigest) => {
                warn!("Digest is empty, skipping publish");
                return Ok(RunReport {
                    published: false,
                    repositories: 0,
                    issues: 0,
                    duration: start_time.elapsed(),
                });
            }
            Err(e) => return Err(e),
        };

        let published = Publisher::new(&self.notes).publish(&document).await;

        let report = RunReport {
            published,
            repositories: digest.entries.len(),
            issues: digest.issue_count(),
            duration: start_time.elapsed(),
        };

        info!(
            "Digest run completed in {:.2}s: {} repositories, {} issues, published: {}",
            report.duration.as_secs_f64(),
            report.repositories,
            report.issues,
            report.published
        );

        Ok(report)
    }

    /// Get configuration for external inspection
    pub fn config(&self) -> &Config {
        &self.config
    }
}
