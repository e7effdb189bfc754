//! SVG preview of a single page

use crate::config::CanvasConfig;
use crate::model::{Block, Page};

/// Class name prefix for every element the preview emits
const CLASS_PREFIX: &str = "bc-";

/// What a page preview includes besides the blocks themselves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SvgOptions {
    /// Emit the XML declaration before the `<svg>` root
    pub standalone: bool,
    /// Draw each block's caption at its center
    pub captions: bool,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            standalone: true,
            captions: true,
        }
    }
}

/// Build SVG elements incrementally, one indented element per line
pub struct SvgBuilder {
    options: SvgOptions,
    elements: Vec<String>,
    indent: usize,
}

impl SvgBuilder {
    pub fn new(options: SvgOptions) -> Self {
        Self {
            options,
            elements: vec![],
            indent: 1,
        }
    }

    fn push(&mut self, element: String) {
        self.elements
            .push(format!("{}{}", "  ".repeat(self.indent), element));
    }

    /// Add the white page sheet behind all blocks
    pub fn add_page_sheet(&mut self, width: f64, height: f64) {
        self.push(format!(
            r##"<rect class="{}page" x="0" y="0" width="{}" height="{}" fill="#ffffff" stroke="#cccccc"/>"##,
            CLASS_PREFIX, width, height
        ));
    }

    /// Add one block, rotated about its center when needed
    pub fn add_block(&mut self, block: &Block) {
        let prefix = CLASS_PREFIX;
        let center = block.rect().center();
        let transform = if block.rotation() == 0.0 {
            String::new()
        } else {
            format!(
                r#" transform="rotate({} {} {})""#,
                block.rotation(),
                center.x,
                center.y
            )
        };

        self.push(format!(
            r##"<g id="{}" class="{}block {}block-{}"{}>"##,
            escape_xml(block.id.as_str()),
            prefix,
            prefix,
            block.type_name(),
            transform
        ));
        self.indent += 1;
        self.push(format!(
            r##"<rect x="{}" y="{}" width="{}" height="{}" fill="#f5f5f5" stroke="#333333"/>"##,
            block.x,
            block.y,
            block.width,
            block.height
        ));
        if self.options.captions {
            self.push(format!(
                r##"<text class="{}caption" x="{}" y="{}" text-anchor="middle" dominant-baseline="middle">{}</text>"##,
                prefix,
                center.x,
                center.y,
                escape_xml(&block.data.caption())
            ));
        }
        self.indent -= 1;
        self.push("</g>".to_string());
    }

    /// Finish the document with a viewBox covering the page
    pub fn build(self, width: f64, height: f64) -> String {
        let nl = "\n";
        let mut svg = String::new();

        if self.options.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" width="{}" height="{}">"#,
            width, height, width, height
        ));
        svg.push_str(nl);

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");
        svg.push_str(nl);
        svg
    }
}

/// Render a page's blocks in paint order onto the page canvas
pub fn render_page_svg(page: &Page, canvas: &CanvasConfig, options: SvgOptions) -> String {
    let mut builder = SvgBuilder::new(options);
    builder.add_page_sheet(canvas.page_width, canvas.page_height);
    for block in page.paint_order() {
        builder.add_block(block);
    }
    builder.build(canvas.page_width, canvas.page_height)
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::data::{BlockData, TextData};

    fn page() -> Page {
        Page::new(1).with_blocks(vec![
            Block::new(
                BlockData::Text(TextData {
                    content: Some("Faith & Hope".into()),
                    ..Default::default()
                }),
                10.0,
                20.0,
                100.0,
                40.0,
            )
            .with_id("top")
            .with_z_index(2),
            Block::new(BlockData::Text(TextData::default()), 0.0, 0.0, 50.0, 50.0)
                .with_id("bottom")
                .with_z_index(1)
                .with_rotation(30.0),
        ])
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a < b"), "a &lt; b");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
    }

    #[test]
    fn test_render_page_structure() {
        let svg = render_page_svg(&page(), &CanvasConfig::default(), SvgOptions::default());
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(r#"viewBox="0 0 816 1056""#));
        assert!(svg.contains(r#"class="bc-block bc-block-text""#));
        assert!(svg.contains("Faith &amp; Hope"));
        assert!(svg.contains(r#"transform="rotate(30 25 25)""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_blocks_drawn_in_paint_order() {
        let svg = render_page_svg(&page(), &CanvasConfig::default(), SvgOptions::default());
        let bottom = svg.find(r#"id="bottom""#).unwrap();
        let top = svg.find(r#"id="top""#).unwrap();
        assert!(bottom < top);
    }

    #[test]
    fn test_fragment_without_captions() {
        let options = SvgOptions {
            standalone: false,
            captions: false,
        };
        let svg = render_page_svg(&page(), &CanvasConfig::default(), options);
        assert!(!svg.contains("<text"));
        assert!(!svg.contains("<?xml"));
        assert!(svg.starts_with("<svg"));
    }

    #[test]
    fn test_elements_are_nested_by_indent() {
        let svg = render_page_svg(&page(), &CanvasConfig::default(), SvgOptions::default());
        assert!(svg.contains("\n  <g id=\"bottom\""));
        assert!(svg.contains("\n    <rect x=\"0\""));
        assert!(svg.contains("\n  </g>"));
    }
}
