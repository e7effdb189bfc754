//! Crate-level error type

use thiserror::Error;

use crate::config::ConfigError;
use crate::model::LayoutError;
use crate::resize::ResizeError;

/// Errors from any part of the canvas core
#[derive(Debug, Error)]
pub enum CanvasError {
    /// Invalid or unparseable layout document
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),

    /// Resize handle or session misuse
    #[error("resize error: {0}")]
    Resize(#[from] ResizeError),

    /// Configuration could not be loaded
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// A page number that the layout does not contain
    #[error("page {page_number} not found (layout has pages: {available})")]
    PageNotFound {
        page_number: u32,
        available: String,
    },
}

impl CanvasError {
    pub fn page_not_found(page_number: u32, available: &[u32]) -> Self {
        Self::PageNotFound {
            page_number,
            available: available
                .iter()
                .map(|n| n.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}
