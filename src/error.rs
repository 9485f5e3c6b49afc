//! Error types for page rendering operations

use std::fmt;

/// Errors that can occur while rendering a documentation page
#[derive(Debug)]
pub enum RenderError {
    /// Renderer output could not be parsed into a usable document
    ParseError(String),
    /// Character encoding error in the markdown source
    EncodingError(String),
    /// Remote markdown service failed (transient, recovered by local fallback)
    Remote(String),
    /// Internal invariant violation
    InternalError(String),
}

impl RenderError {
    /// Get numeric error code
    pub fn code(&self) -> u32 {
        match self {
            RenderError::ParseError(_) => 1,
            RenderError::EncodingError(_) => 2,
            RenderError::Remote(_) => 6,
            RenderError::InternalError(_) => 99,
        }
    }

    /// Whether the error is recovered by falling back to the local renderer
    pub fn is_transient(&self) -> bool {
        matches!(self, RenderError::Remote(_))
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            RenderError::EncodingError(msg) => write!(f, "Encoding error: {}", msg),
            RenderError::Remote(msg) => write!(f, "Remote render failed: {}", msg),
            RenderError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}
