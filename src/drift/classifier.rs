//! Drift classification for interactive resizes.
//!
//! Three independent observations of the pinned anchor are compared between
//! the start of a drag and each move:
//!
//! - **model**: the anchor computed from the block's own fields. This is
//!   what the anchor-invariant calculator promises to hold still.
//! - **presentation**: resolved `left`/`top` strings. Only checked for the
//!   properties the handle leaves alone on an unrotated block; under
//!   rotation both move with the center and carry no signal.
//! - **rendered rect**: the anchor point of the post-transform bounding box.
//!   Rotation reshapes that box even when the anchor math is right, so a
//!   change here alone is informational.
//!
//! Real drift is declared only on model or presentation drift.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::CanvasConfig;
use crate::geometry::Point;
use crate::model::{BlockGeometry, BlockId};
use crate::renderer::{CssRenderer, PresentationStyle, Renderer};
use crate::resize::{ResizeHandle, ResizeListener, ResizeOperation};

use super::measurement::{measure_anchor, AnchorMeasurement};

/// Positional style property that can be pinned during a resize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleProperty {
    Left,
    Top,
}

impl StyleProperty {
    /// CSS property name
    pub fn name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Top => "top",
        }
    }

    /// Resolved value of this property in `style`
    pub fn value_in(self, style: &PresentationStyle) -> &str {
        match self {
            Self::Left => &style.left,
            Self::Top => &style.top,
        }
    }
}

impl std::fmt::Display for StyleProperty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}

/// A presentation property that changed although it should not have
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleChange {
    pub property: StyleProperty,
    pub from: String,
    pub to: String,
}

/// Verdict for one resize operation (or one move within it)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriftReport {
    pub block_id: BlockId,
    pub handle: ResizeHandle,
    pub rotation: f64,
    pub model_drift: bool,
    pub presentation_drift: bool,
    pub bounding_rect_changed: bool,
    pub has_real_drift: bool,
    /// Movement of the model-derived anchor
    pub model_delta: Point,
    /// Movement of the rendered bounding-rect anchor
    pub rendered_delta: Point,
    pub presentation_changes: Vec<StyleChange>,
    /// The resize hit the minimum size on some axis
    pub clamped: bool,
    /// The renderer had no target for at least one of the two samples
    pub render_target_missing: bool,
}

/// Tolerances the classification is made against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftTolerance {
    /// Model anchor movement above this is drift
    pub anchor: f64,
    /// Rendered anchor movement above this counts as a changed rect
    pub rendered: f64,
}

impl DriftTolerance {
    pub fn from_config(config: &CanvasConfig) -> Self {
        Self {
            anchor: config.anchor_tolerance,
            rendered: config.rendered_tolerance,
        }
    }
}

impl Default for DriftTolerance {
    fn default() -> Self {
        Self::from_config(&CanvasConfig::default())
    }
}

/// Presentation properties a handle must leave untouched.
///
/// On an unrotated block `left` stays put unless the handle moves the left
/// edge, and likewise `top`. A rotated block is positioned through its
/// center, so no `left`/`top` value is pinned.
pub fn pinned_properties(handle: ResizeHandle, rotation: f64) -> Vec<StyleProperty> {
    let start = BlockGeometry::new(0.0, 0.0, 1.0, 1.0, rotation);
    if !start.transform().is_identity() {
        return vec![];
    }
    let mut pinned = Vec::with_capacity(2);
    if !handle.moves_left_edge() {
        pinned.push(StyleProperty::Left);
    }
    if !handle.moves_top_edge() {
        pinned.push(StyleProperty::Top);
    }
    pinned
}

/// Compare two anchor samples and classify the difference
pub fn classify(
    block_id: &BlockId,
    handle: ResizeHandle,
    rotation: f64,
    start: &AnchorMeasurement,
    current: &AnchorMeasurement,
    tolerance: DriftTolerance,
) -> DriftReport {
    let model_delta = current.model.delta_from(start.model);
    let model_drift = model_delta.x.hypot(model_delta.y) > tolerance.anchor;

    let both_rendered = start.has_render_target() && current.has_render_target();

    let presentation_changes = match (&start.presentation, &current.presentation) {
        (Some(before), Some(after)) => pinned_properties(handle, rotation)
            .into_iter()
            .filter_map(|property| {
                let from = property.value_in(before);
                let to = property.value_in(after);
                (from != to).then(|| StyleChange {
                    property,
                    from: from.to_string(),
                    to: to.to_string(),
                })
            })
            .collect(),
        _ => vec![],
    };
    let presentation_drift = !presentation_changes.is_empty();

    let rendered_delta = if both_rendered {
        current.rendered.delta_from(start.rendered)
    } else {
        Point::zero()
    };
    let bounding_rect_changed =
        rendered_delta.x.abs() > tolerance.rendered || rendered_delta.y.abs() > tolerance.rendered;

    DriftReport {
        block_id: block_id.clone(),
        handle,
        rotation,
        model_drift,
        presentation_drift,
        bounding_rect_changed,
        has_real_drift: model_drift || presentation_drift,
        model_delta,
        rendered_delta,
        presentation_changes,
        clamped: false,
        render_target_missing: !both_rendered,
    }
}

struct ActiveSample {
    block_id: BlockId,
    handle: ResizeHandle,
    start: AnchorMeasurement,
    reported: bool,
}

/// Resize listener that measures the pinned anchor on every event and
/// reports drift through an injected callback and log events.
pub struct DriftClassifier<R: Renderer = CssRenderer> {
    renderer: R,
    tolerance: DriftTolerance,
    on_drift_detected: Option<Box<dyn FnMut(&DriftReport)>>,
    active: Option<ActiveSample>,
    latest: Option<DriftReport>,
    reports: Vec<DriftReport>,
}

impl DriftClassifier<CssRenderer> {
    /// Classifier measuring through the CSS-convention renderer
    pub fn with_css_renderer(config: &CanvasConfig) -> Self {
        Self::new(config, CssRenderer)
    }
}

impl<R: Renderer> DriftClassifier<R> {
    pub fn new(config: &CanvasConfig, renderer: R) -> Self {
        Self {
            renderer,
            tolerance: DriftTolerance::from_config(config),
            on_drift_detected: None,
            active: None,
            latest: None,
            reports: vec![],
        }
    }

    /// Register the callback invoked once per operation when real drift is
    /// first observed
    pub fn on_drift_detected(mut self, callback: impl FnMut(&DriftReport) + 'static) -> Self {
        self.on_drift_detected = Some(Box::new(callback));
        self
    }

    /// Verdict of the most recent move or end
    pub fn latest(&self) -> Option<&DriftReport> {
        self.latest.as_ref()
    }

    /// Final verdicts of all completed operations, oldest first
    pub fn reports(&self) -> &[DriftReport] {
        &self.reports
    }

    pub fn take_reports(&mut self) -> Vec<DriftReport> {
        std::mem::take(&mut self.reports)
    }

    fn sample(&mut self, op: &ResizeOperation) -> Option<DriftReport> {
        let active = self.active.as_mut()?;
        if active.block_id != op.block_id || active.handle != op.handle {
            warn!(block = %op.block_id, "resize event for an operation that was never started");
            return None;
        }
        let current = measure_anchor(&self.renderer, &op.block_id, &op.current.geometry, op.handle);
        let mut report = classify(
            &op.block_id,
            op.handle,
            op.rotation(),
            &active.start,
            &current,
            self.tolerance,
        );
        report.clamped = op.current.clamped();

        if report.has_real_drift {
            if !active.reported {
                active.reported = true;
                warn!(
                    block = %report.block_id,
                    handle = %report.handle,
                    rotation = report.rotation,
                    model_dx = report.model_delta.x,
                    model_dy = report.model_delta.y,
                    presentation_drift = report.presentation_drift,
                    "anchor drift detected"
                );
                if let Some(callback) = self.on_drift_detected.as_mut() {
                    callback(&report);
                }
            }
        } else if report.bounding_rect_changed {
            debug!(
                block = %report.block_id,
                handle = %report.handle,
                rendered_dx = report.rendered_delta.x,
                rendered_dy = report.rendered_delta.y,
                "bounding rect moved without anchor drift"
            );
        }

        self.latest = Some(report.clone());
        Some(report)
    }
}

impl<R: Renderer> ResizeListener for DriftClassifier<R> {
    fn on_resize_start(&mut self, op: &ResizeOperation) {
        let start = measure_anchor(&self.renderer, &op.block_id, &op.start, op.handle);
        self.active = Some(ActiveSample {
            block_id: op.block_id.clone(),
            handle: op.handle,
            start,
            reported: false,
        });
        self.latest = None;
    }

    fn on_resize_move(&mut self, op: &ResizeOperation) {
        self.sample(op);
    }

    fn on_resize_end(&mut self, op: &ResizeOperation) {
        if let Some(report) = self.sample(op) {
            info!(
                block = %report.block_id,
                handle = %report.handle,
                rotation = report.rotation,
                has_real_drift = report.has_real_drift,
                bounding_rect_changed = report.bounding_rect_changed,
                "resize verdict"
            );
            self.reports.push(report);
        }
        self.active = None;
    }

    fn on_resize_cancel(&mut self, _op: &ResizeOperation) {
        self.active = None;
        self.latest = None;
    }
}
