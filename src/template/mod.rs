//! Layout templates
//!
//! Currently a single template: the default layout handed to the editor
//! for a bulletin that has never been laid out.

pub mod default_layout;

pub use default_layout::{default_layout, DefaultLayoutInput};
