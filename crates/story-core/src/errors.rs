//! Cross-cutting error types for the stories gallery.
//!
//! Domain-specific errors (`FetchError`, `CacheError`, ...) are defined in
//! their respective crates. The binary converges everything on `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any story crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Data failed validation (missing attribute, bad format).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A value could not be parsed into the requested type.
    #[error("Invalid {kind}: '{value}'")]
    Parse { kind: &'static str, value: String },
}
