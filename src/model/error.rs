//! Error types for the layout document model

use thiserror::Error;

/// Errors raised while loading or validating a layout document
#[derive(Debug, Error)]
pub enum LayoutError {
    /// The JSON document could not be parsed or written
    #[error("invalid layout document: {0}")]
    Json(#[from] serde_json::Error),

    /// Two pages share a page number
    #[error("duplicate page number {page_number}")]
    DuplicatePageNumber { page_number: u32 },

    /// Two blocks on one page share an id
    #[error("duplicate block id '{id}' on page {page_number}")]
    DuplicateBlockId { id: String, page_number: u32 },

    /// Width or height is zero or negative
    #[error("block '{id}' has non-positive size {width}x{height}")]
    InvalidSize { id: String, width: f64, height: f64 },

    /// Rotation outside `[0, 360)`
    #[error("block '{id}' has rotation {rotation} outside [0, 360)")]
    InvalidRotation { id: String, rotation: f64 },

    /// A coordinate is NaN or infinite
    #[error("block '{id}' has a non-finite {field}")]
    NonFinite { id: String, field: &'static str },

    /// No block with the given id exists in the layout
    #[error("block '{id}' not found")]
    BlockNotFound { id: String },
}

impl LayoutError {
    /// Create a block-not-found error
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::BlockNotFound { id: id.into() }
    }

    /// The id of the offending block, if the error concerns one
    pub fn block_id(&self) -> Option<&str> {
        match self {
            Self::DuplicateBlockId { id, .. }
            | Self::InvalidSize { id, .. }
            | Self::InvalidRotation { id, .. }
            | Self::NonFinite { id, .. }
            | Self::BlockNotFound { id } => Some(id),
            Self::Json(_) | Self::DuplicatePageNumber { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_block_display() {
        let err = LayoutError::DuplicateBlockId {
            id: "welcome".to_string(),
            page_number: 2,
        };
        assert_eq!(err.to_string(), "duplicate block id 'welcome' on page 2");
        assert_eq!(err.block_id(), Some("welcome"));
    }

    #[test]
    fn test_not_found_display() {
        let err = LayoutError::not_found("abc");
        assert!(err.to_string().contains("abc"));
        assert!(LayoutError::DuplicatePageNumber { page_number: 1 }
            .block_id()
            .is_none());
    }
}
