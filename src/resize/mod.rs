//! Resizing blocks from their grab handles

pub mod calculator;
pub mod controller;
pub mod error;
pub mod handle;

pub use calculator::{anchor_screen_point, naive_resize, resize, ResizeOutcome, ResizeStrategy};
pub use controller::{NoopListener, ResizeController, ResizeListener, ResizeOperation};
pub use error::ResizeError;
pub use handle::ResizeHandle;
