//! Pages and layouts: the persisted document of one bulletin issue

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::block::{Block, BlockId};
use super::error::LayoutError;

/// An ordered list of blocks on one page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub page_number: u32,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl Page {
    /// Create an empty page
    pub fn new(page_number: u32) -> Self {
        Self {
            page_number,
            blocks: vec![],
        }
    }

    pub fn with_blocks(mut self, blocks: Vec<Block>) -> Self {
        self.blocks = blocks;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| &b.id == id)
    }

    pub fn get_mut(&mut self, id: &BlockId) -> Option<&mut Block> {
        self.blocks.iter_mut().find(|b| &b.id == id)
    }

    /// z-index one above the current top block
    pub fn next_z_index(&self) -> i32 {
        self.blocks
            .iter()
            .map(|b| b.z_index)
            .max()
            .map_or(1, |z| z + 1)
    }

    /// Append a block, placing it on top of the existing ones
    pub fn push_on_top(&mut self, block: Block) {
        let z = self.next_z_index();
        self.blocks.push(block.with_z_index(z));
    }

    /// Blocks in paint order (back to front). The sort is stable, so equal
    /// z-indices keep their insertion order.
    pub fn paint_order(&self) -> Vec<&Block> {
        let mut ordered: Vec<&Block> = self.blocks.iter().collect();
        ordered.sort_by_key(|b| b.z_index);
        ordered
    }
}

/// All pages of one bulletin issue, replaced wholesale on save
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    /// Owning bulletin issue, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bulletin_id: Option<String>,
    pub pages: Vec<Page>,
}

impl Layout {
    /// Create an empty layout
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bulletin_id(mut self, id: impl Into<String>) -> Self {
        self.bulletin_id = Some(id.into());
        self
    }

    pub fn with_page(mut self, page: Page) -> Self {
        self.pages.push(page);
        self
    }

    /// Parse and validate a layout JSON document
    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        let layout: Layout = serde_json::from_str(json)?;
        layout.validate()?;
        Ok(layout)
    }

    /// Serialize to a compact JSON document
    pub fn to_json(&self) -> Result<String, LayoutError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize to an indented JSON document
    pub fn to_json_pretty(&self) -> Result<String, LayoutError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn page(&self, page_number: u32) -> Option<&Page> {
        self.pages.iter().find(|p| p.page_number == page_number)
    }

    pub fn page_mut(&mut self, page_number: u32) -> Option<&mut Page> {
        self.pages.iter_mut().find(|p| p.page_number == page_number)
    }

    /// Find a block anywhere in the layout, with its page number
    pub fn find_block(&self, id: &BlockId) -> Option<(u32, &Block)> {
        self.pages
            .iter()
            .find_map(|p| p.get(id).map(|b| (p.page_number, b)))
    }

    pub fn block_count(&self) -> usize {
        self.pages.iter().map(|p| p.blocks.len()).sum()
    }

    /// Check the document invariants: unique page numbers, unique block ids
    /// per page, finite geometry, positive size and rotation in `[0, 360)`.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let mut page_numbers = HashSet::new();
        for page in &self.pages {
            if !page_numbers.insert(page.page_number) {
                return Err(LayoutError::DuplicatePageNumber {
                    page_number: page.page_number,
                });
            }

            let mut ids = HashSet::new();
            for block in &page.blocks {
                if !ids.insert(&block.id) {
                    return Err(LayoutError::DuplicateBlockId {
                        id: block.id.0.clone(),
                        page_number: page.page_number,
                    });
                }
                validate_block(block)?;
            }
        }
        Ok(())
    }
}

fn validate_block(block: &Block) -> Result<(), LayoutError> {
    let fields = [
        ("x", block.x),
        ("y", block.y),
        ("width", block.width),
        ("height", block.height),
        ("rotation", block.rotation()),
    ];
    for (field, value) in fields {
        if !value.is_finite() {
            return Err(LayoutError::NonFinite {
                id: block.id.0.clone(),
                field,
            });
        }
    }

    if block.width <= 0.0 || block.height <= 0.0 {
        return Err(LayoutError::InvalidSize {
            id: block.id.0.clone(),
            width: block.width,
            height: block.height,
        });
    }

    let rotation = block.rotation();
    if !(0.0..360.0).contains(&rotation) {
        return Err(LayoutError::InvalidRotation {
            id: block.id.0.clone(),
            rotation,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::data::{BlockData, TextData};

    fn block(id: &str, z: i32) -> Block {
        Block::new(BlockData::Text(TextData::default()), 0.0, 0.0, 50.0, 50.0)
            .with_id(id)
            .with_z_index(z)
    }

    #[test]
    fn test_paint_order_is_stable_for_ties() {
        let page = Page::new(1).with_blocks(vec![block("a", 2), block("b", 1), block("c", 2)]);
        let order: Vec<&str> = page.paint_order().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(order, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_push_on_top() {
        let mut page = Page::new(1);
        page.push_on_top(block("a", 0));
        page.push_on_top(block("b", 0));
        assert_eq!(page.blocks[0].z_index, 1);
        assert_eq!(page.blocks[1].z_index, 2);
    }

    #[test]
    fn test_duplicate_page_number_rejected() {
        let layout = Layout {
            bulletin_id: None,
            pages: vec![Page::new(1), Page::new(1)],
        };
        assert!(matches!(
            layout.validate(),
            Err(LayoutError::DuplicatePageNumber { page_number: 1 })
        ));
    }

    #[test]
    fn test_duplicate_block_id_rejected() {
        let layout = Layout {
            bulletin_id: None,
            pages: vec![Page::new(1).with_blocks(vec![block("a", 1), block("a", 2)])],
        };
        assert!(matches!(
            layout.validate(),
            Err(LayoutError::DuplicateBlockId { .. })
        ));
    }

    #[test]
    fn test_same_id_on_different_pages_is_allowed() {
        let layout = Layout {
            bulletin_id: None,
            pages: vec![
                Page::new(1).with_blocks(vec![block("a", 1)]),
                Page::new(2).with_blocks(vec![block("a", 1)]),
            ],
        };
        assert!(layout.validate().is_ok());
    }

    #[test]
    fn test_invalid_size_and_rotation_rejected() {
        let mut zero = block("z", 1);
        zero.width = 0.0;
        let layout = Layout {
            bulletin_id: None,
            pages: vec![Page::new(1).with_blocks(vec![zero])],
        };
        assert!(matches!(
            layout.validate(),
            Err(LayoutError::InvalidSize { .. })
        ));

        let mut spun = block("r", 1);
        spun.rotation = Some(360.0);
        let layout = Layout {
            bulletin_id: None,
            pages: vec![Page::new(1).with_blocks(vec![spun])],
        };
        assert!(matches!(
            layout.validate(),
            Err(LayoutError::InvalidRotation { .. })
        ));
    }

    #[test]
    fn test_from_json_validates() {
        let json = r#"{"pages":[{"pageNumber":1,"blocks":[
            {"id":"a","type":"text","x":0,"y":0,"width":-5,"height":10,"zIndex":1,"data":{"content":"x"}}
        ]}]}"#;
        assert!(matches!(
            Layout::from_json(json),
            Err(LayoutError::InvalidSize { .. })
        ));
        assert!(matches!(
            Layout::from_json("{not json"),
            Err(LayoutError::Json(_))
        ));
    }

    #[test]
    fn test_find_and_mutate_block() {
        let mut layout = Layout {
            bulletin_id: None,
            pages: vec![Page::new(1), Page::new(2).with_blocks(vec![block("x", 1)])],
        };
        let id = BlockId::from("x");
        assert_eq!(layout.find_block(&id).map(|(p, _)| p), Some(2));
        layout.page_mut(2).unwrap().get_mut(&id).unwrap().x = 42.0;
        assert_eq!(layout.find_block(&id).unwrap().1.x, 42.0);
        assert_eq!(layout.block_count(), 1);
    }
}
