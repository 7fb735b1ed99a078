//! Publish boundary
//!
//! The publisher is the last stop before the notes service. Failures from
//! the external call are caught, logged, and reported as a boolean; they
//! never propagate as a crash. Details live in the logs, not return data.

use tracing::{error, info};

use crate::error::DigestError;
use crate::format::Document;
use crate::gateway::NotesGateway;

/// Hands finished documents to the notes service.
pub struct Publisher<'a, N: NotesGateway> {
    notes: &'a N,
}

impl<'a, N: NotesGateway> Publisher<'a, N> {
    pub fn new(notes: &'a N) -> Self {
        Self { notes }
    }

    async fn create(&self, document: &Document) -> Result<String, DigestError> {
        let document_id = self
            .notes
            .create_document(&document.title, &document.body)
            .await?;

        if document_id.is_empty() {
            return Err(DigestError::Publish(
                "service returned no document identifier".to_string(),
            ));
        }

        Ok(document_id)
    }

    /// Publish a document, returning whether a new document identifier was
    /// returned by the service.
    pub async fn publish(&self, document: &Document) -> bool {
        match self.create(document).await {
            Ok(document_id) => {
                info!("Published digest as document: {}", document_id);
                true
            }
            Err(e) => {
                error!("Failed to publish digest: {}", e);
                false
            }
        }
    }
}
