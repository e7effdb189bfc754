//! Bulletin Canvas - block geometry core for a bulletin layout editor
//!
//! This library provides the layout document model, anchor-invariant
//! resizing of rotated blocks, drift diagnostics that verify the anchor
//! invariant, and the default starter layout.
//!
//! # Example
//!
//! ```rust
//! use bulletin_canvas::{default_layout, DefaultLayoutInput};
//!
//! let input = DefaultLayoutInput::new("Grace Community Church", "https://give.example.org", "b-1");
//! let layout = default_layout(&input);
//! assert_eq!(layout.pages.len(), 4);
//! ```

pub mod config;
pub mod drift;
pub mod error;
pub mod geometry;
pub mod model;
pub mod renderer;
pub mod resize;
pub mod template;

pub use config::{CanvasConfig, ConfigError};
pub use drift::{DriftClassifier, DriftReport, MatrixRun};
pub use error::CanvasError;
pub use geometry::{BoundingBox, Point};
pub use model::{Block, BlockData, BlockGeometry, BlockId, Layout, LayoutError, Page};
pub use renderer::{CssRenderer, Renderer, SvgOptions};
pub use resize::{resize, ResizeController, ResizeError, ResizeHandle, ResizeListener};
pub use template::{default_layout, DefaultLayoutInput};

/// Parse and validate a layout JSON document
///
/// # Example
///
/// ```rust
/// use bulletin_canvas::load_layout;
///
/// let layout = load_layout(r#"{"pages": [{"pageNumber": 1, "blocks": []}]}"#).unwrap();
/// assert_eq!(layout.pages[0].page_number, 1);
/// ```
pub fn load_layout(json: &str) -> Result<Layout, CanvasError> {
    Ok(Layout::from_json(json)?)
}

/// Render one page of a layout as an SVG preview
pub fn render_page(
    layout: &Layout,
    page_number: u32,
    canvas: &CanvasConfig,
    options: SvgOptions,
) -> Result<String, CanvasError> {
    let page = layout.page(page_number).ok_or_else(|| {
        let available: Vec<u32> = layout.pages.iter().map(|p| p.page_number).collect();
        CanvasError::page_not_found(page_number, &available)
    })?;
    Ok(renderer::render_page_svg(page, canvas, options))
}
