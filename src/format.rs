//! Document formatting
//!
//! Turns a [`Digest`] into the title line and body text handed to the notes
//! service. The document shape (section and item separators) comes from
//! configuration so it can be adapted without code changes; the title slice
//! point is fixed.

use chrono::{Datelike, NaiveDate};

use crate::config::DigestConfig;
use crate::digest::Digest;
use crate::error::DigestError;

/// Issue titles are truncated to this many characters in the document.
const ITEM_SLICE_POINT: usize = 120;

/// A formatted document, ready to publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub title: String,
    pub body: String,
}

/// Formats digests into publishable documents.
pub struct DocumentFormatter {
    title: String,
    section_sep: String,
    item_sep: String,
}

impl DocumentFormatter {
    pub fn new(title: String, section_sep: String, item_sep: String) -> Self {
        Self {
            title,
            section_sep,
            item_sep,
        }
    }

    /// Build a formatter from the digest section of the configuration.
    pub fn from_config(config: &DigestConfig) -> Self {
        Self::new(
            config.title.clone(),
            config.section_sep.clone(),
            config.item_sep.clone(),
        )
    }

    /// Format the digest for the given run date.
    ///
    /// Returns [`DigestError::EmptyDigest`] when no repository passed the
    /// filters, so the publisher can skip the remote call entirely instead
    /// of pushing an empty document.
    pub fn format(&self, date: NaiveDate, digest: &Digest) -> Result<Document, DigestError> {
        if digest.is_empty() {
            return Err(DigestError::EmptyDigest);
        }

        let title = format!("{}: Week of {}", self.title, format_date(date));

        let mut body = String::new();
        for entry in &digest.entries {
            body.push_str(&entry.repository.name);
            body.push_str(&self.section_sep);

            for issue in &entry.issues {
                body.push_str("- ");
                body.extend(issue.title.chars().take(ITEM_SLICE_POINT));
                body.push_str(&self.item_sep);
            }
        }

        Ok(Document { title, body })
    }
}

/// Render a date with the full month name and an ordinal day suffix,
/// e.g. "March 3rd, 2024".
pub fn format_date(date: NaiveDate) -> String {
    let day = date.day();
    format!(
        "{} {}{}, {}",
        date.format("%B"),
        day,
        ordinal_suffix(day),
        date.year()
    )
}

fn ordinal_suffix(day: u32) -> &'static str {
    // 11th/12th/13th, not 11st/12nd/13rd
    match day % 100 {
        11 | 12 | 13 => "th",
        _ => match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    }
}
