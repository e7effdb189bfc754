//! Sampling the anchor of a block in three representations

use tracing::warn;

use crate::geometry::Point;
use crate::model::{BlockGeometry, BlockId};
use crate::renderer::{PresentationStyle, Renderer};
use crate::resize::{anchor_screen_point, ResizeHandle};

/// One sample of the anchor pinned by a handle
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorMeasurement {
    /// Anchor position derived from the block's own `x, y, width, height`
    /// and rotation
    pub model: Point,
    /// Resolved styles reported by the renderer
    pub presentation: Option<PresentationStyle>,
    /// Anchor point of the renderer's post-transform bounding rect
    pub rendered: Point,
}

impl AnchorMeasurement {
    /// Whether the renderer produced a target for this sample
    pub fn has_render_target(&self) -> bool {
        self.presentation.is_some()
    }
}

/// Measure the anchor of `handle` on a block with the given geometry.
///
/// A missing render target yields a zeroed placeholder for the rendered
/// parts and a warning; it is never an error.
pub fn measure_anchor<R: Renderer + ?Sized>(
    renderer: &R,
    block_id: &BlockId,
    geometry: &BlockGeometry,
    handle: ResizeHandle,
) -> AnchorMeasurement {
    let model = anchor_screen_point(geometry, handle);
    match renderer.measure(block_id, geometry) {
        Some(rendered) => {
            let (fx, fy) = handle.anchor_fraction();
            AnchorMeasurement {
                model,
                presentation: Some(rendered.style),
                rendered: rendered.bounding_rect.point_at(fx, fy),
            }
        }
        None => {
            warn!(block = %block_id, handle = %handle, "render target not found; using placeholder measurement");
            AnchorMeasurement {
                model,
                presentation: None,
                rendered: Point::zero(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{CssRenderer, RenderedBlock};

    #[test]
    fn test_measurement_of_unrotated_block() {
        let g = BlockGeometry::new(10.0, 20.0, 100.0, 50.0, 0.0);
        let m = measure_anchor(&CssRenderer, &BlockId::from("b"), &g, ResizeHandle::Nw);
        // The nw handle pins the bottom-right corner
        assert_eq!(m.model, Point::new(110.0, 70.0));
        assert_eq!(m.rendered, Point::new(110.0, 70.0));
        assert_eq!(m.presentation.unwrap().left, "10px");
    }

    #[test]
    fn test_missing_target_gives_placeholder() {
        let none = |_: &BlockId, _: &BlockGeometry| -> Option<RenderedBlock> { None };
        let g = BlockGeometry::new(10.0, 20.0, 100.0, 50.0, 30.0);
        let m = measure_anchor(&none, &BlockId::from("gone"), &g, ResizeHandle::Se);
        assert!(!m.has_render_target());
        assert_eq!(m.rendered, Point::zero());
        assert!(m.model.x != 0.0);
    }
}
