//! Where documents come from.
//!
//! A [`DocumentSource`] hands back a whole [`Document`] or an error; it never
//! produces a partial one.  Sources are synchronous; the app runs them on a
//! blocking task so the UI thread never waits on I/O.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::document::Document;
use super::sample;

/// Document-level failures.  Either aborts the whole render pass.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("document unavailable from {origin}: {source}")]
    Unavailable {
        origin: String,
        #[source]
        source: std::io::Error,
    },

    #[error("document from {origin} is not a component list: {source}")]
    Malformed {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Produces the document to render.
pub trait DocumentSource: Send + Sync {
    fn fetch(&self) -> Result<Document, DocumentError>;

    /// Short human-readable origin, shown in the status bar.
    fn describe(&self) -> String;
}

// ───────────────────────────────────────── built-in ──────────

/// Serves the built-in demo document.
#[derive(Debug, Default, Clone, Copy)]
pub struct SampleSource;

impl DocumentSource for SampleSource {
    fn fetch(&self) -> Result<Document, DocumentError> {
        Ok(Document::from_wire(sample::sample_components()))
    }

    fn describe(&self) -> String {
        "built-in sample".into()
    }
}

// ───────────────────────────────────────── file ──────────────

/// Reads a JSON document from disk on every fetch.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentSource for FileSource {
    fn fetch(&self) -> Result<Document, DocumentError> {
        let origin = self.describe();
        let text = std::fs::read_to_string(&self.path).map_err(|source| {
            DocumentError::Unavailable {
                origin: origin.clone(),
                source,
            }
        })?;
        Document::from_json(&text).map_err(|source| DocumentError::Malformed { origin, source })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
