//! Anchor drift diagnostics.
//!
//! Detection is advisory: reports feed a callback, log events and the
//! regression matrix, and never block or roll back an edit.

pub mod classifier;
pub mod matrix;
pub mod measurement;

pub use classifier::{
    classify, pinned_properties, DriftClassifier, DriftReport, DriftTolerance, StyleChange,
    StyleProperty,
};
pub use matrix::{any_real_drift, MatrixRun, MATRIX_ROTATIONS};
pub use measurement::{measure_anchor, AnchorMeasurement};
