use thiserror::Error;

/// Failure from one of the external services.
///
/// Both gateways collapse their transport-level failures (network, auth,
/// not-found) into this type; the pipeline only needs to know which service
/// failed and why, not how to recover.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The source-control gateway failed or rejected a request.
    #[error("source-control request failed: {0}")]
    SourceControl(String),

    /// The notes-service gateway failed or rejected a request.
    #[error("notes-service request failed: {0}")]
    Notes(String),
}

/// Errors surfaced by a digest run.
#[derive(Debug, Error)]
pub enum DigestError {
    /// An external service failed; aggregation aborts with no partial digest.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// No repository survived filtering, so there is nothing to publish.
    /// A normal outcome, not a crash: publishing is simply skipped.
    #[error("digest is empty, nothing to publish")]
    EmptyDigest,

    /// The notes-service call failed or returned no document identifier.
    #[error("publish failed: {0}")]
    Publish(String),
}
