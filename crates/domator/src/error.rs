//! Error types for selector parsing and element building
//!
//! Every error is raised before the target document is touched.

use dom::DomError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DomatorError>;

/// Malformed selector syntax. Positions are byte offsets into the selector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Empty selector")]
    Empty,

    #[error("Unterminated attribute starting at {position}")]
    UnterminatedAttribute { position: usize },

    #[error("Missing attribute name at {position}")]
    MissingAttributeName { position: usize },

    #[error("Empty {kind} name at {position}")]
    EmptyName { kind: &'static str, position: usize },

    #[error("Unexpected character '{found}' at {position}")]
    UnexpectedChar { found: char, position: usize },
}

impl ParseError {
    /// Byte offset of the offending token
    pub fn position(&self) -> usize {
        match self {
            ParseError::Empty => 0,
            ParseError::UnterminatedAttribute { position }
            | ParseError::MissingAttributeName { position }
            | ParseError::EmptyName { position, .. }
            | ParseError::UnexpectedChar { position, .. } => *position,
        }
    }
}

#[derive(Debug, Error)]
pub enum DomatorError {
    #[error("Selector parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("No target element: {0}")]
    Target(String),

    #[error("Invalid argument at position {index}: {reason}")]
    InvalidArgument { index: usize, reason: String },

    #[error("Document error: {0}")]
    Dom(#[from] DomError),
}
