//! Regression matrix: every handle at a set of rotations, driven through a
//! real resize controller with a drift classifier attached.

use crate::config::CanvasConfig;
use crate::geometry::Point;
use crate::model::data::{BlockData, TextData};
use crate::model::{Block, Layout, Page};
use crate::renderer::Renderer;
use crate::resize::{ResizeController, ResizeError, ResizeHandle, ResizeStrategy};

use super::classifier::{DriftClassifier, DriftReport};

/// Rotations the regression matrix covers by default
pub const MATRIX_ROTATIONS: [f64; 4] = [0.0, 15.0, 45.0, 90.0];

/// Parameters of a matrix run
#[derive(Debug, Clone)]
pub struct MatrixRun {
    pub rotations: Vec<f64>,
    pub handles: Vec<ResizeHandle>,
    /// Total pointer displacement of each drag
    pub delta: Point,
    /// Number of move events the displacement is split into
    pub steps: u32,
    pub strategy: ResizeStrategy,
}

impl Default for MatrixRun {
    fn default() -> Self {
        Self {
            rotations: MATRIX_ROTATIONS.to_vec(),
            handles: ResizeHandle::ALL.to_vec(),
            delta: Point::new(20.0, 12.0),
            steps: 4,
            strategy: ResizeStrategy::AnchorInvariant,
        }
    }
}

impl MatrixRun {
    pub fn with_strategy(mut self, strategy: ResizeStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_delta(mut self, delta: Point) -> Self {
        self.delta = delta;
        self
    }

    pub fn with_handles(mut self, handles: &[ResizeHandle]) -> Self {
        self.handles = handles.to_vec();
        self
    }

    pub fn with_rotations(mut self, rotations: &[f64]) -> Self {
        self.rotations = rotations.to_vec();
        self
    }

    /// Run every rotation × handle drag on a 100×100 block and return one
    /// final verdict per drag, in rotation-major order.
    pub fn run<R: Renderer>(
        &self,
        config: &CanvasConfig,
        renderer: R,
    ) -> Result<Vec<DriftReport>, ResizeError> {
        let mut classifier = DriftClassifier::new(config, renderer);
        let steps = self.steps.max(1);

        for &rotation in &self.rotations {
            for &handle in &self.handles {
                let block = Block::new(BlockData::Text(TextData::default()), 200.0, 200.0, 100.0, 100.0)
                    .with_id(format!("matrix-{}-{}", rotation, handle))
                    .with_rotation(rotation);
                let mut layout = Layout {
                    bulletin_id: None,
                    pages: vec![Page::new(1).with_blocks(vec![block.clone()])],
                };

                let mut controller =
                    ResizeController::new(config, &mut classifier).with_strategy(self.strategy);
                controller.begin(1, &block, handle)?;
                for step in 1..=steps {
                    let t = f64::from(step) / f64::from(steps);
                    controller.update(Point::new(self.delta.x * t, self.delta.y * t))?;
                }
                controller.commit(&mut layout)?;
            }
        }

        Ok(classifier.take_reports())
    }
}

/// Whether any verdict declares real drift
pub fn any_real_drift(reports: &[DriftReport]) -> bool {
    reports.iter().any(|r| r.has_real_drift)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::CssRenderer;

    #[test]
    fn test_default_matrix_size() {
        let reports = MatrixRun::default()
            .run(&CanvasConfig::default(), CssRenderer)
            .unwrap();
        assert_eq!(reports.len(), MATRIX_ROTATIONS.len() * ResizeHandle::ALL.len());
        assert!(!any_real_drift(&reports));
    }

    #[test]
    fn test_naive_strategy_is_flagged_only_when_rotated() {
        let reports = MatrixRun::default()
            .with_strategy(ResizeStrategy::Naive)
            .run(&CanvasConfig::default(), CssRenderer)
            .unwrap();
        for report in &reports {
            if report.rotation == 0.0 {
                assert!(!report.has_real_drift, "{:?}", report);
            }
        }
        assert!(reports
            .iter()
            .any(|r| r.rotation == 45.0 && r.handle == ResizeHandle::Se && r.model_drift));
    }
}
