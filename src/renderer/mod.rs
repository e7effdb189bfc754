//! Rendering: CSS measurement for drift checks and SVG page previews

pub mod css;
pub mod svg;

pub use css::{CssRenderer, PresentationStyle, RenderedBlock, Renderer};
pub use svg::{render_page_svg, SvgOptions};
