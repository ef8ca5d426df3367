//! Error types for Datum encoding and decoding operations.

use thiserror::Error;

/// Errors that can occur while converting between Datum trees and JSON text.
#[derive(Error, Debug)]
pub enum DatumError {
    /// The input text was not valid JSON (decoding path).
    /// Includes the byte offset where the error was detected.
    #[error("JSON parse error at byte {at}: {message}")]
    Parse { at: usize, message: String },

    /// Array/object nesting exceeded the parser's depth bound while
    /// decoding. Signals likely malicious or malformed input.
    #[error("object or array nesting too deep to parse")]
    NestingTooDeep,

    /// The encoder met a payload with no JSON rendering (encoding path).
    /// A contract violation by the producer of the tree, not a data problem.
    #[error("unsupported datum payload: {0}")]
    UnsupportedType(String),

    /// The generic object serializer failed (adapter paths).
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout datum-json.
pub type Result<T> = std::result::Result<T, DatumError>;
