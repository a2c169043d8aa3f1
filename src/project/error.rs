//! Document loading and editing errors.

use thiserror::Error;

/// Errors raised while turning bytes into a [`Document`](super::Document) or
/// editing its tree.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("XML parse error: {0}")]
    Syntax(String),

    #[error("invalid UTF-{bits} text: {message}")]
    Encoding { bits: u8, message: String },

    #[error("document has no root element")]
    MissingRoot,

    #[error("XML tree edit failed: {0}")]
    Tree(String),
}

impl From<xot::Error> for DocumentError {
    fn from(err: xot::Error) -> Self {
        Self::Tree(err.to_string())
    }
}
