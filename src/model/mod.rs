//! Layout document model: blocks, pages and layouts
//!
//! A layout is persisted as a single JSON document and replaced wholesale
//! on save; nothing below the layout is stored on its own.

pub mod block;
pub mod data;
pub mod error;
pub mod layout;
pub mod lint;
mod number;

pub use block::{Block, BlockGeometry, BlockId};
pub use data::BlockData;
pub use error::LayoutError;
pub use layout::{Layout, Page};
pub use lint::{LintCategory, LintWarning};
