//! Error types for the extractor.
//!
//! Only document-level failures surface as errors. Missing fields and bad
//! field values never do; they resolve through the default table in
//! [`crate::defaults`].

use thiserror::Error;

/// Main error type for the extractor library.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// IO error while reading a statement file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize a mapped record.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for extractor operations.
pub type Result<T> = std::result::Result<T, ExtractError>;
