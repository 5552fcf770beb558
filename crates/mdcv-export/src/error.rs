//! Error types for the output pipeline.

use std::path::PathBuf;

/// Export error type.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The stylesheet build command failed or produced no output.
    #[error("Stylesheet build failed: {0}")]
    CssBuild(String),

    /// The local preview server could not be bound.
    #[error("Failed to bind local preview server: {0}")]
    Bind(#[source] std::io::Error),

    /// Headless browser launch or capture failed.
    #[error("Browser error: {0}")]
    Browser(String),

    /// The page did not load within the timeout.
    #[error("Page load failed: {0}")]
    PageLoad(String),

    /// The captured PDF could not be written.
    #[error("Failed to write PDF to {}: {source}", path.display())]
    PdfWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
