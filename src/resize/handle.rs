//! Resize handles and the anchor each one pins

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ResizeError;

/// One of the eight grab handles around a block: four corners and four
/// edge midpoints, named by compass direction (north is the top edge).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeHandle {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::N,
        ResizeHandle::Ne,
        ResizeHandle::E,
        ResizeHandle::Se,
        ResizeHandle::S,
        ResizeHandle::Sw,
        ResizeHandle::W,
        ResizeHandle::Nw,
    ];

    pub const CORNERS: [ResizeHandle; 4] = [
        ResizeHandle::Nw,
        ResizeHandle::Ne,
        ResizeHandle::Se,
        ResizeHandle::Sw,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResizeHandle::N => "n",
            ResizeHandle::Ne => "ne",
            ResizeHandle::E => "e",
            ResizeHandle::Se => "se",
            ResizeHandle::S => "s",
            ResizeHandle::Sw => "sw",
            ResizeHandle::W => "w",
            ResizeHandle::Nw => "nw",
        }
    }

    /// Outward direction of the handle in block-local axes.
    ///
    /// Each component is -1, 0 or +1: `se` is `(1, 1)`, `n` is `(0, -1)`.
    /// A zero component means the handle does not resize that axis.
    pub fn direction(&self) -> (f64, f64) {
        match self {
            ResizeHandle::N => (0.0, -1.0),
            ResizeHandle::Ne => (1.0, -1.0),
            ResizeHandle::E => (1.0, 0.0),
            ResizeHandle::Se => (1.0, 1.0),
            ResizeHandle::S => (0.0, 1.0),
            ResizeHandle::Sw => (-1.0, 1.0),
            ResizeHandle::W => (-1.0, 0.0),
            ResizeHandle::Nw => (-1.0, -1.0),
        }
    }

    /// The handle diametrically opposite this one
    pub fn opposite(&self) -> ResizeHandle {
        match self {
            ResizeHandle::N => ResizeHandle::S,
            ResizeHandle::Ne => ResizeHandle::Sw,
            ResizeHandle::E => ResizeHandle::W,
            ResizeHandle::Se => ResizeHandle::Nw,
            ResizeHandle::S => ResizeHandle::N,
            ResizeHandle::Sw => ResizeHandle::Ne,
            ResizeHandle::W => ResizeHandle::E,
            ResizeHandle::Nw => ResizeHandle::Se,
        }
    }

    /// Fractional position `(fx, fy)` of this handle on the unrotated block;
    /// `(0, 0)` is the top-left corner.
    pub fn fraction(&self) -> (f64, f64) {
        let (sx, sy) = self.direction();
        ((1.0 + sx) / 2.0, (1.0 + sy) / 2.0)
    }

    /// Fractional position of the anchor this handle pins: the opposite
    /// corner or edge midpoint.
    pub fn anchor_fraction(&self) -> (f64, f64) {
        self.opposite().fraction()
    }

    pub fn resizes_width(&self) -> bool {
        self.direction().0 != 0.0
    }

    pub fn resizes_height(&self) -> bool {
        self.direction().1 != 0.0
    }

    /// Whether dragging this handle moves the block's left edge
    pub fn moves_left_edge(&self) -> bool {
        self.direction().0 < 0.0
    }

    /// Whether dragging this handle moves the block's top edge
    pub fn moves_top_edge(&self) -> bool {
        self.direction().1 < 0.0
    }

    pub fn is_corner(&self) -> bool {
        self.resizes_width() && self.resizes_height()
    }
}

impl fmt::Display for ResizeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ResizeHandle {
    type Err = ResizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResizeHandle::ALL
            .into_iter()
            .find(|h| h.as_str() == s)
            .ok_or_else(|| ResizeError::invalid_handle(s))
    }
}
