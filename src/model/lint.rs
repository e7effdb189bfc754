//! Lint checks for layout defects.
//!
//! These never reject a layout; they list mechanical problems an editor or
//! the CLI can surface: blocks overlapping on a page, blocks leaving the
//! page canvas, and blocks smaller than the grabbable minimum.

use std::fmt;

use crate::config::CanvasConfig;
use crate::geometry::BoundingBox;

use super::block::Block;
use super::layout::{Layout, Page};

/// A lint warning about a layout defect
#[derive(Debug)]
pub struct LintWarning {
    pub category: LintCategory,
    pub page_number: u32,
    pub message: String,
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] page {}: {}", self.category, self.page_number, self.message)
    }
}

/// Category of lint defect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintCategory {
    Overlap,
    OutOfPage,
    Undersized,
}

impl fmt::Display for LintCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintCategory::Overlap => write!(f, "overlap"),
            LintCategory::OutOfPage => write!(f, "out-of-page"),
            LintCategory::Undersized => write!(f, "undersized"),
        }
    }
}

/// Run all lint checks on a layout.
pub fn check(layout: &Layout, config: &CanvasConfig) -> Vec<LintWarning> {
    let mut warnings = Vec::new();
    for page in &layout.pages {
        check_overlaps(page, &mut warnings);
        check_page_bounds(page, config, &mut warnings);
        check_sizes(page, config, &mut warnings);
    }
    warnings
}

/// Footprint of a block as drawn: the unrotated rect for unrotated blocks,
/// otherwise the loose bounds of the rotated rect.
fn footprint(block: &Block) -> BoundingBox {
    block.geometry().screen_bounds()
}

fn display_name(block: &Block) -> String {
    format!("{} \"{}\"", block.type_name(), block.id)
}

fn check_overlaps(page: &Page, warnings: &mut Vec<LintWarning>) {
    for (i, a) in page.blocks.iter().enumerate() {
        let fa = footprint(a);
        for b in &page.blocks[i + 1..] {
            if fa.intersects(&footprint(b)) {
                warnings.push(LintWarning {
                    category: LintCategory::Overlap,
                    page_number: page.page_number,
                    message: format!("{} overlaps {}", display_name(a), display_name(b)),
                });
            }
        }
    }
}

fn check_page_bounds(page: &Page, config: &CanvasConfig, warnings: &mut Vec<LintWarning>) {
    let canvas = BoundingBox::new(0.0, 0.0, config.page_width, config.page_height);
    for block in &page.blocks {
        let f = footprint(block);
        if !canvas.contains_box(&f) {
            warnings.push(LintWarning {
                category: LintCategory::OutOfPage,
                page_number: page.page_number,
                message: format!(
                    "{} extends outside the {}x{} page (x={:.1} y={:.1} w={:.1} h={:.1})",
                    display_name(block),
                    config.page_width,
                    config.page_height,
                    f.x,
                    f.y,
                    f.width,
                    f.height
                ),
            });
        }
    }
}

fn check_sizes(page: &Page, config: &CanvasConfig, warnings: &mut Vec<LintWarning>) {
    for block in &page.blocks {
        if block.width < config.min_block_size || block.height < config.min_block_size {
            warnings.push(LintWarning {
                category: LintCategory::Undersized,
                page_number: page.page_number,
                message: format!(
                    "{} is {}x{}, below the minimum of {}",
                    display_name(block),
                    block.width,
                    block.height,
                    config.min_block_size
                ),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::data::{BlockData, TextData};

    fn text_block(id: &str, x: f64, y: f64, w: f64, h: f64) -> Block {
        Block::new(BlockData::Text(TextData::default()), x, y, w, h).with_id(id)
    }

    fn single_page(blocks: Vec<Block>) -> Layout {
        Layout {
            bulletin_id: None,
            pages: vec![Page::new(1).with_blocks(blocks)],
        }
    }

    #[test]
    fn test_clean_layout_has_no_warnings() {
        let layout = single_page(vec![
            text_block("a", 10.0, 10.0, 100.0, 100.0),
            text_block("b", 10.0, 110.0, 100.0, 100.0),
        ]);
        assert!(check(&layout, &CanvasConfig::default()).is_empty());
    }

    #[test]
    fn test_overlap_detected() {
        let layout = single_page(vec![
            text_block("a", 10.0, 10.0, 100.0, 100.0),
            text_block("b", 50.0, 50.0, 100.0, 100.0),
        ]);
        let warnings = check(&layout, &CanvasConfig::default());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].category, LintCategory::Overlap);
        assert!(warnings[0].message.contains("\"a\""));
    }

    #[test]
    fn test_rotation_can_cause_overlap() {
        // Side by side with a 10 unit gap; rotating one by 45° widens its footprint
        let layout = single_page(vec![
            text_block("a", 10.0, 10.0, 100.0, 100.0),
            text_block("b", 120.0, 10.0, 100.0, 100.0).with_rotation(45.0),
        ]);
        let warnings = check(&layout, &CanvasConfig::default());
        assert!(warnings.iter().any(|w| w.category == LintCategory::Overlap));
    }

    #[test]
    fn test_out_of_page_and_undersized() {
        let layout = single_page(vec![
            text_block("wide", 700.0, 10.0, 200.0, 50.0),
            text_block("tiny", 10.0, 200.0, 10.0, 50.0),
        ]);
        let warnings = check(&layout, &CanvasConfig::default());
        let categories: Vec<LintCategory> = warnings.iter().map(|w| w.category).collect();
        assert!(categories.contains(&LintCategory::OutOfPage));
        assert!(categories.contains(&LintCategory::Undersized));
        assert!(warnings[0].to_string().starts_with("[out-of-page] page 1:"));
    }
}
