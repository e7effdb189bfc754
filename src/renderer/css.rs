//! The renderer seam used by drift measurement.
//!
//! A renderer turns a block's geometry into what the page actually shows:
//! resolved presentation styles and the post-transform bounding rect. In an
//! editor this is a query against the mounted element; [`CssRenderer`]
//! computes the same values for the standard CSS convention (absolute
//! `left`/`top`, then `rotate()` about the element center).

use crate::geometry::BoundingBox;
use crate::model::{BlockGeometry, BlockId};

/// Resolved position styles, as strings the way a style query returns them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentationStyle {
    pub left: String,
    pub top: String,
    pub width: String,
    pub height: String,
    pub transform: String,
}

/// One measurement of a rendered block
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedBlock {
    pub style: PresentationStyle,
    /// Axis-aligned bounding rect after the transform is applied
    pub bounding_rect: BoundingBox,
}

/// Something that can report how a block is drawn.
///
/// Returns `None` when the block has no rendered target (not mounted,
/// already removed).
pub trait Renderer {
    fn measure(&self, block_id: &BlockId, geometry: &BlockGeometry) -> Option<RenderedBlock>;
}

impl<F> Renderer for F
where
    F: Fn(&BlockId, &BlockGeometry) -> Option<RenderedBlock>,
{
    fn measure(&self, block_id: &BlockId, geometry: &BlockGeometry) -> Option<RenderedBlock> {
        self(block_id, geometry)
    }
}

/// Renderer following CSS compositing: translate to `left/top`, rotate
/// about the element center.
#[derive(Debug, Default, Clone, Copy)]
pub struct CssRenderer;

impl CssRenderer {
    pub fn style(geometry: &BlockGeometry) -> PresentationStyle {
        PresentationStyle {
            left: px(geometry.x),
            top: px(geometry.y),
            width: px(geometry.width),
            height: px(geometry.height),
            transform: if geometry.rotation == 0.0 {
                "none".to_string()
            } else {
                format!("rotate({}deg)", round3(geometry.rotation))
            },
        }
    }
}

impl Renderer for CssRenderer {
    fn measure(&self, _block_id: &BlockId, geometry: &BlockGeometry) -> Option<RenderedBlock> {
        Some(RenderedBlock {
            style: Self::style(geometry),
            bounding_rect: geometry.screen_bounds(),
        })
    }
}

/// Round to three decimals, normalizing negative zero
fn round3(v: f64) -> f64 {
    let r = (v * 1000.0).round() / 1000.0;
    if r == 0.0 {
        0.0
    } else {
        r
    }
}

/// Format a length the way computed styles do: `12px`, `12.5px`
pub fn px(v: f64) -> String {
    format!("{}px", round3(v))
}
