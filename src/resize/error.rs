//! Error types for interactive resizing

use thiserror::Error;

/// Errors raised by the resize handle parser and the resize controller
#[derive(Debug, Error, PartialEq)]
pub enum ResizeError {
    /// A handle tag outside `n, ne, e, se, s, sw, w, nw`
    #[error("invalid resize handle '{tag}' (valid handles: n, ne, e, se, s, sw, w, nw)")]
    InvalidHandle { tag: String },

    /// `begin` was called while another drag is still in progress
    #[error("a resize of block '{block_id}' is already in progress")]
    AlreadyActive { block_id: String },

    /// A move or commit arrived with no drag in progress
    #[error("no resize in progress")]
    NotActive,

    /// The block being resized no longer exists on its page
    #[error("block '{block_id}' not found on page {page_number}")]
    BlockNotFound { block_id: String, page_number: u32 },
}

impl ResizeError {
    pub fn invalid_handle(tag: impl Into<String>) -> Self {
        Self::InvalidHandle { tag: tag.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_handle_display() {
        let err = ResizeError::invalid_handle("north");
        assert!(err.to_string().contains("'north'"));
        assert!(err.to_string().contains("se"));
    }
}
