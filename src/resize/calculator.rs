//! Anchor-invariant resize of rotated blocks.
//!
//! Dragging a handle must leave the opposite point of the block (the
//! *anchor*) where it is on screen. Keeping `x, y` fixed and editing only
//! `width, height` does that for unrotated blocks, but a rotated block is
//! drawn rotated about its center, and the center moves when the size
//! changes. The calculator therefore works in four steps:
//!
//! 1. Locate the anchor in block-local (unrotated) space.
//! 2. Map it to screen space using the pre-resize center and rotation.
//! 3. Rotate the pointer delta by `-rotation` into block-local axes and
//!    apply it to the axes the handle controls, clamping to the minimum.
//! 4. Choose the new center so the anchor, rotated about that center with
//!    the new size, lands on the screen position from step 2.
//!
//! The model `x, y` of the anchor may change under rotation; that is the
//! price of keeping its screen position fixed.

use tracing::warn;

use crate::geometry::{Point, RotationTransform};
use crate::model::BlockGeometry;

use super::handle::ResizeHandle;

/// Result of one resize computation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeOutcome {
    /// New geometry; rotation is always the starting rotation
    pub geometry: BlockGeometry,
    /// The requested width fell below the minimum and was raised to it
    pub clamped_width: bool,
    /// The requested height fell below the minimum and was raised to it
    pub clamped_height: bool,
}

impl ResizeOutcome {
    pub fn clamped(&self) -> bool {
        self.clamped_width || self.clamped_height
    }
}

/// Which resize math a controller applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeStrategy {
    /// Keep the anchor fixed on screen at any rotation
    #[default]
    AnchorInvariant,
    /// Ignore rotation; see [`naive_resize`]
    Naive,
}

impl ResizeStrategy {
    pub fn apply(
        &self,
        start: &BlockGeometry,
        handle: ResizeHandle,
        delta: Point,
        min_size: f64,
    ) -> ResizeOutcome {
        match self {
            ResizeStrategy::AnchorInvariant => resize(start, handle, delta, min_size),
            ResizeStrategy::Naive => naive_resize(start, handle, delta, min_size),
        }
    }
}

/// Screen position of the anchor pinned by `handle`
pub fn anchor_screen_point(geometry: &BlockGeometry, handle: ResizeHandle) -> Point {
    let (fx, fy) = handle.anchor_fraction();
    geometry.screen_point(fx, fy)
}

/// Resize `start` by dragging `handle` by `delta` (screen space, cumulative
/// from the start of the drag).
pub fn resize(
    start: &BlockGeometry,
    handle: ResizeHandle,
    delta: Point,
    min_size: f64,
) -> ResizeOutcome {
    let delta = sanitize_delta(delta);
    let (sx, sy) = handle.direction();
    let transform = start.transform();

    let local = transform.unrotate_vector(delta);
    let (width, clamped_width) = resize_axis(start.width, sx, local.x, min_size);
    let (height, clamped_height) = resize_axis(start.height, sy, local.y, min_size);

    let (fx, fy) = handle.anchor_fraction();
    let (x, y) = if transform.is_identity() {
        // Model space is screen space: pin the anchor's edges directly
        (
            pin_axis(start.x, start.width, width, fx),
            pin_axis(start.y, start.height, height, fy),
        )
    } else {
        let anchor_screen = start.screen_point(fx, fy);
        let anchor_offset = Point::new((fx - 0.5) * width, (fy - 0.5) * height);
        let rotated = RotationTransform::new(start.rotation, Point::zero())
            .rotate_vector(anchor_offset);
        let center = Point::new(anchor_screen.x - rotated.x, anchor_screen.y - rotated.y);
        (center.x - width / 2.0, center.y - height / 2.0)
    };

    ResizeOutcome {
        geometry: BlockGeometry::new(x, y, width, height, start.rotation),
        clamped_width,
        clamped_height,
    }
}

/// Rotation-unaware resize: edits the unrotated rectangle as if the block
/// were not rotated at all. Anchor-correct only at 0°; kept as the baseline
/// the drift checks are calibrated against.
pub fn naive_resize(
    start: &BlockGeometry,
    handle: ResizeHandle,
    delta: Point,
    min_size: f64,
) -> ResizeOutcome {
    let delta = sanitize_delta(delta);
    let (sx, sy) = handle.direction();
    let (fx, fy) = handle.anchor_fraction();
    let (width, clamped_width) = resize_axis(start.width, sx, delta.x, min_size);
    let (height, clamped_height) = resize_axis(start.height, sy, delta.y, min_size);
    ResizeOutcome {
        geometry: BlockGeometry::new(
            pin_axis(start.x, start.width, width, fx),
            pin_axis(start.y, start.height, height, fy),
            width,
            height,
            start.rotation,
        ),
        clamped_width,
        clamped_height,
    }
}

/// New extent along one axis. `direction` is the handle's outward sign on
/// that axis; zero leaves the axis untouched.
fn resize_axis(size: f64, direction: f64, local_delta: f64, min_size: f64) -> (f64, bool) {
    if direction == 0.0 {
        return (size, false);
    }
    let requested = size + direction * local_delta;
    if requested < min_size {
        (min_size, true)
    } else {
        (requested, false)
    }
}

/// New origin along one axis for an unrotated block, keeping the anchor at
/// `fraction` of the extent fixed.
fn pin_axis(origin: f64, size: f64, new_size: f64, fraction: f64) -> f64 {
    if fraction == 0.0 || new_size == size {
        origin
    } else {
        origin + (size - new_size) * fraction
    }
}

fn sanitize_delta(delta: Point) -> Point {
    if delta.x.is_finite() && delta.y.is_finite() {
        delta
    } else {
        warn!(dx = delta.x, dy = delta.y, "ignoring non-finite pointer delta");
        Point::zero()
    }
}
