//! Starter layout for a bulletin that has none.
//!
//! Four pages on the letter canvas: page 1 carries the welcome, order of
//! service and giving blocks, page 2 announcements, events and contact
//! info, pages 3 and 4 are left empty for the editor.
//!
//! Bands are stacked top to bottom with a fixed gap, so no two blocks on a
//! page overlap. Placement is always on the letter canvas; a configured
//! page size only affects lint and previews.

use tracing::debug;

use crate::config::LETTER_WIDTH;
use crate::model::data::{
    AnnouncementsData, BlockData, ContactInfoData, EventsData, GivingData, ServiceItemsData,
    TextAlign, TextData,
};
use crate::model::{Block, Layout, Page};

/// Width of full-width content bands
const CONTENT_WIDTH: f64 = 700.0;
/// Distance from the top of the page to the first band
const TOP_MARGIN: f64 = 32.0;
/// Vertical gap between consecutive bands
const BAND_GAP: f64 = 20.0;

const WELCOME_HEIGHT: f64 = 100.0;
const SERVICE_ITEMS_HEIGHT: f64 = 700.0;
const GIVING_WIDTH: f64 = 300.0;
const GIVING_HEIGHT: f64 = 150.0;

const ANNOUNCEMENTS_HEIGHT: f64 = 400.0;
const EVENTS_HEIGHT: f64 = 380.0;
const CONTACT_WIDTH: f64 = 350.0;
const CONTACT_HEIGHT: f64 = 170.0;

const PAGE_COUNT: u32 = 4;

/// Inputs of the synthesizer
#[derive(Debug, Clone)]
pub struct DefaultLayoutInput {
    pub church_name: String,
    pub giving_url: String,
    pub bulletin_id: String,
}

impl DefaultLayoutInput {
    pub fn new(
        church_name: impl Into<String>,
        giving_url: impl Into<String>,
        bulletin_id: impl Into<String>,
    ) -> Self {
        Self {
            church_name: church_name.into(),
            giving_url: giving_url.into(),
            bulletin_id: bulletin_id.into(),
        }
    }
}

/// Places bands down a page, tracking the next free y coordinate
struct BandCursor {
    page_width: f64,
    y: f64,
    z_index: i32,
}

impl BandCursor {
    fn new(page_width: f64) -> Self {
        Self {
            page_width,
            y: TOP_MARGIN,
            z_index: 0,
        }
    }

    /// Place a horizontally centered band and advance past it
    fn centered(&mut self, data: BlockData, width: f64, height: f64) -> Block {
        let x = (self.page_width - width) / 2.0;
        self.z_index += 1;
        let block = Block::new(data, x, self.y, width, height).with_z_index(self.z_index);
        self.y += height + BAND_GAP;
        block
    }
}

/// Build the default four-page layout.
///
/// Every block gets a fresh id; everything else depends only on the input.
pub fn default_layout(input: &DefaultLayoutInput) -> Layout {
    let mut pages = vec![
        Page::new(1).with_blocks(first_page(input)),
        Page::new(2).with_blocks(second_page(input)),
    ];
    pages.extend((3..=PAGE_COUNT).map(Page::new));

    let layout = Layout {
        bulletin_id: Some(input.bulletin_id.clone()),
        pages,
    };
    debug!(
        bulletin = %input.bulletin_id,
        blocks = layout.block_count(),
        "synthesized default layout"
    );
    layout
}

fn first_page(input: &DefaultLayoutInput) -> Vec<Block> {
    let mut cursor = BandCursor::new(LETTER_WIDTH);
    vec![
        cursor.centered(
            BlockData::Text(TextData {
                content: Some(format!("Welcome to {}", input.church_name)),
                align: Some(TextAlign::Center),
                font_size: Some(28.0),
                bold: Some(true),
                ..Default::default()
            }),
            CONTENT_WIDTH,
            WELCOME_HEIGHT,
        ),
        cursor.centered(
            BlockData::ServiceItems(ServiceItemsData {
                title: Some("Order of Service".into()),
                show_times: Some(false),
                ..Default::default()
            }),
            CONTENT_WIDTH,
            SERVICE_ITEMS_HEIGHT,
        ),
        cursor.centered(
            BlockData::Giving(GivingData {
                title: Some("Give Online".into()),
                url: Some(input.giving_url.clone()),
                show_qr: Some(true),
                ..Default::default()
            }),
            GIVING_WIDTH,
            GIVING_HEIGHT,
        ),
    ]
}

fn second_page(input: &DefaultLayoutInput) -> Vec<Block> {
    let mut cursor = BandCursor::new(LETTER_WIDTH);
    vec![
        cursor.centered(
            BlockData::Announcements(AnnouncementsData {
                title: Some("Announcements".into()),
                max_items: Some(6),
                ..Default::default()
            }),
            CONTENT_WIDTH,
            ANNOUNCEMENTS_HEIGHT,
        ),
        cursor.centered(
            BlockData::Events(EventsData {
                title: Some("Upcoming Events".into()),
                max_items: Some(5),
                days_ahead: Some(30),
                ..Default::default()
            }),
            CONTENT_WIDTH,
            EVENTS_HEIGHT,
        ),
        cursor.centered(
            BlockData::ContactInfo(ContactInfoData {
                church_name: Some(input.church_name.clone()),
                ..Default::default()
            }),
            CONTACT_WIDTH,
            CONTACT_HEIGHT,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CanvasConfig, LETTER_HEIGHT};
    use crate::model::lint::{self, LintCategory};

    fn grace() -> Layout {
        default_layout(
            &DefaultLayoutInput::new(
                "Grace Community Church",
                "https://give.example.org/grace",
                "bulletin-1",
            ),
        )
    }

    #[test]
    fn test_welcome_block_placement() {
        let layout = grace();
        let welcome = &layout.page(1).unwrap().blocks[0];
        assert_eq!(welcome.type_name(), "text");
        assert_eq!((welcome.x, welcome.y, welcome.width), (58.0, 32.0, 700.0));
    }

    #[test]
    fn test_contact_block_centered() {
        let layout = grace();
        let contact = layout
            .page(2)
            .unwrap()
            .blocks
            .iter()
            .find(|b| b.type_name() == "contactInfo")
            .unwrap();
        assert_eq!(contact.x, 233.0);
        assert_eq!(contact.width, 350.0);
    }

    #[test]
    fn test_bands_fit_on_page_without_lint() {
        let layout = grace();
        let warnings = lint::check(&layout, &CanvasConfig::default());
        assert!(
            warnings.iter().all(|w| w.category != LintCategory::Overlap),
            "{:?}",
            warnings
        );
        assert!(warnings.is_empty(), "{:?}", warnings);
    }

    #[test]
    fn test_bands_stay_on_letter_canvas() {
        for page in grace().pages {
            for block in &page.blocks {
                assert!(block.x >= 0.0 && block.x + block.width <= LETTER_WIDTH);
                assert!(block.y >= 0.0 && block.y + block.height <= LETTER_HEIGHT);
            }
        }
    }

    #[test]
    fn test_ids_fresh_geometry_deterministic() {
        let a = grace();
        let b = grace();
        for (pa, pb) in a.pages.iter().zip(&b.pages) {
            for (ba, bb) in pa.blocks.iter().zip(&pb.blocks) {
                assert_ne!(ba.id, bb.id);
                assert_eq!(ba.rect(), bb.rect());
                assert_eq!(ba.data, bb.data);
                assert_eq!(ba.z_index, bb.z_index);
            }
        }
    }
}
