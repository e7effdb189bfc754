//! Interactive resize sessions.
//!
//! A [`ResizeController`] owns the ephemeral state of one drag: the block's
//! geometry when the pointer went down and the geometry the pointer has
//! dragged it to since. Nothing touches the layout until [`commit`]; a
//! [`cancel`] drops the operation and the committed block is unchanged.
//!
//! Observers register as a [`ResizeListener`] and are called synchronously
//! for start, every move, end and cancel.
//!
//! [`commit`]: ResizeController::commit
//! [`cancel`]: ResizeController::cancel

use tracing::debug;

use crate::config::CanvasConfig;
use crate::geometry::Point;
use crate::model::{Block, BlockGeometry, BlockId, Layout};

use super::calculator::{ResizeOutcome, ResizeStrategy};
use super::error::ResizeError;
use super::handle::ResizeHandle;

/// The in-progress state of one drag
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeOperation {
    /// Page holding the block; ids are only unique within a page
    pub page_number: u32,
    pub block_id: BlockId,
    pub handle: ResizeHandle,
    /// Geometry when the drag started
    pub start: BlockGeometry,
    /// Cumulative pointer displacement since the drag started
    pub delta: Point,
    /// Result of resizing `start` by `delta`
    pub current: ResizeOutcome,
}

impl ResizeOperation {
    fn new(page_number: u32, block: &Block, handle: ResizeHandle) -> Self {
        let start = block.geometry();
        Self {
            page_number,
            block_id: block.id.clone(),
            handle,
            start,
            delta: Point::zero(),
            current: ResizeOutcome {
                geometry: start,
                clamped_width: false,
                clamped_height: false,
            },
        }
    }

    /// Rotation of the block being resized; a resize never changes it
    pub fn rotation(&self) -> f64 {
        self.start.rotation
    }

    pub fn current_geometry(&self) -> BlockGeometry {
        self.current.geometry
    }
}

/// Observer of resize lifecycle events
pub trait ResizeListener {
    fn on_resize_start(&mut self, _op: &ResizeOperation) {}
    fn on_resize_move(&mut self, _op: &ResizeOperation) {}
    fn on_resize_end(&mut self, _op: &ResizeOperation) {}
    fn on_resize_cancel(&mut self, _op: &ResizeOperation) {}
}

/// Listener that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopListener;

impl ResizeListener for NoopListener {}

impl<L: ResizeListener + ?Sized> ResizeListener for &mut L {
    fn on_resize_start(&mut self, op: &ResizeOperation) {
        (**self).on_resize_start(op)
    }
    fn on_resize_move(&mut self, op: &ResizeOperation) {
        (**self).on_resize_move(op)
    }
    fn on_resize_end(&mut self, op: &ResizeOperation) {
        (**self).on_resize_end(op)
    }
    fn on_resize_cancel(&mut self, op: &ResizeOperation) {
        (**self).on_resize_cancel(op)
    }
}

/// Fan-out to several listeners in registration order
impl ResizeListener for Vec<Box<dyn ResizeListener>> {
    fn on_resize_start(&mut self, op: &ResizeOperation) {
        self.iter_mut().for_each(|l| l.on_resize_start(op));
    }
    fn on_resize_move(&mut self, op: &ResizeOperation) {
        self.iter_mut().for_each(|l| l.on_resize_move(op));
    }
    fn on_resize_end(&mut self, op: &ResizeOperation) {
        self.iter_mut().for_each(|l| l.on_resize_end(op));
    }
    fn on_resize_cancel(&mut self, op: &ResizeOperation) {
        self.iter_mut().for_each(|l| l.on_resize_cancel(op));
    }
}

/// Drives one drag at a time against the anchor-invariant calculator
pub struct ResizeController<L: ResizeListener = NoopListener> {
    min_block_size: f64,
    strategy: ResizeStrategy,
    listener: L,
    active: Option<ResizeOperation>,
}

impl ResizeController<NoopListener> {
    /// A controller with no listener
    pub fn without_listener(config: &CanvasConfig) -> Self {
        Self::new(config, NoopListener)
    }
}

impl<L: ResizeListener> ResizeController<L> {
    pub fn new(config: &CanvasConfig, listener: L) -> Self {
        Self {
            min_block_size: config.min_block_size,
            strategy: ResizeStrategy::default(),
            listener,
            active: None,
        }
    }

    /// Replace the resize math used for subsequent moves
    pub fn with_strategy(mut self, strategy: ResizeStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// The drag in progress, if any
    pub fn active(&self) -> Option<&ResizeOperation> {
        self.active.as_ref()
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    pub fn into_listener(self) -> L {
        self.listener
    }

    /// Pointer down on `handle` of `block`, which sits on page `page_number`
    pub fn begin(
        &mut self,
        page_number: u32,
        block: &Block,
        handle: ResizeHandle,
    ) -> Result<(), ResizeError> {
        if let Some(op) = &self.active {
            return Err(ResizeError::AlreadyActive {
                block_id: op.block_id.0.clone(),
            });
        }
        let op = ResizeOperation::new(page_number, block, handle);
        debug!(block = %op.block_id, handle = %handle, rotation = op.rotation(), "resize start");
        self.listener.on_resize_start(&op);
        self.active = Some(op);
        Ok(())
    }

    /// Pointer move with the cumulative displacement since pointer down
    pub fn update(&mut self, delta: Point) -> Result<BlockGeometry, ResizeError> {
        let min_size = self.min_block_size;
        let strategy = self.strategy;
        let op = self.active.as_mut().ok_or(ResizeError::NotActive)?;
        op.delta = delta;
        op.current = strategy.apply(&op.start, op.handle, delta, min_size);
        if op.current.clamped() {
            debug!(
                block = %op.block_id,
                width = op.current.geometry.width,
                height = op.current.geometry.height,
                "resize clamped to minimum size"
            );
        }
        self.listener.on_resize_move(op);
        Ok(op.current.geometry)
    }

    /// Pointer move with the displacement since the previous move
    pub fn update_by(&mut self, increment: Point) -> Result<BlockGeometry, ResizeError> {
        let delta = self
            .active
            .as_ref()
            .map(|op| Point::new(op.delta.x + increment.x, op.delta.y + increment.y))
            .ok_or(ResizeError::NotActive)?;
        self.update(delta)
    }

    /// Pointer up: write the current geometry into the dragged block of
    /// `layout`, looked up on the page the drag started on.
    ///
    /// The operation ends either way; if the block has disappeared from its
    /// page the listener sees a cancel instead of an end.
    pub fn commit(&mut self, layout: &mut Layout) -> Result<BlockGeometry, ResizeError> {
        let op = self.active.take().ok_or(ResizeError::NotActive)?;
        let target = layout
            .page_mut(op.page_number)
            .and_then(|page| page.get_mut(&op.block_id));
        match target {
            Some(block) => {
                block.set_geometry(op.current.geometry);
                debug!(block = %op.block_id, handle = %op.handle, "resize committed");
                self.listener.on_resize_end(&op);
                Ok(op.current.geometry)
            }
            None => {
                self.listener.on_resize_cancel(&op);
                Err(ResizeError::BlockNotFound {
                    block_id: op.block_id.0,
                    page_number: op.page_number,
                })
            }
        }
    }

    /// Abort the drag, discarding its state. Returns the dropped operation.
    pub fn cancel(&mut self) -> Option<ResizeOperation> {
        let op = self.active.take()?;
        debug!(block = %op.block_id, "resize cancelled");
        self.listener.on_resize_cancel(&op);
        Some(op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::data::{BlockData, TextData};
    use crate::model::Page;

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl ResizeListener for Recorder {
        fn on_resize_start(&mut self, op: &ResizeOperation) {
            self.events.push(format!("start {}", op.handle));
        }
        fn on_resize_move(&mut self, op: &ResizeOperation) {
            self.events
                .push(format!("move {}", op.current.geometry.width));
        }
        fn on_resize_end(&mut self, _op: &ResizeOperation) {
            self.events.push("end".into());
        }
        fn on_resize_cancel(&mut self, _op: &ResizeOperation) {
            self.events.push("cancel".into());
        }
    }

    fn layout_with_block() -> (Layout, Block) {
        let block = Block::new(BlockData::Text(TextData::default()), 10.0, 10.0, 100.0, 50.0)
            .with_id("b1");
        let layout = Layout {
            bulletin_id: None,
            pages: vec![Page::new(1).with_blocks(vec![block.clone()])],
        };
        (layout, block)
    }

    #[test]
    fn test_full_drag_commits_geometry() {
        let (mut layout, block) = layout_with_block();
        let mut controller = ResizeController::new(&CanvasConfig::default(), Recorder::default());

        controller.begin(1, &block, ResizeHandle::E).unwrap();
        controller.update(Point::new(10.0, 0.0)).unwrap();
        controller.update(Point::new(25.0, 0.0)).unwrap();
        let committed = controller.commit(&mut layout).unwrap();

        assert_eq!(committed.width, 125.0);
        assert_eq!(layout.find_block(&block.id).unwrap().1.width, 125.0);
        assert!(controller.active().is_none());
        assert_eq!(
            controller.into_listener().events,
            vec!["start e", "move 110", "move 125", "end"]
        );
    }

    #[test]
    fn test_incremental_updates_accumulate() {
        let (_, block) = layout_with_block();
        let mut controller = ResizeController::without_listener(&CanvasConfig::default());
        controller.begin(1, &block, ResizeHandle::S).unwrap();
        controller.update_by(Point::new(0.0, 5.0)).unwrap();
        let g = controller.update_by(Point::new(0.0, 7.0)).unwrap();
        assert_eq!(g.height, 62.0);
        assert_eq!(controller.active().unwrap().delta, Point::new(0.0, 12.0));
    }

    #[test]
    fn test_cancel_leaves_layout_untouched() {
        let (layout, block) = layout_with_block();
        let original = layout.clone();
        let mut recorder = Recorder::default();
        let mut controller = ResizeController::new(&CanvasConfig::default(), &mut recorder);

        controller.begin(1, &block, ResizeHandle::Nw).unwrap();
        controller.update(Point::new(-40.0, -40.0)).unwrap();
        let dropped = controller.cancel().unwrap();

        assert_eq!(dropped.block_id, block.id);
        assert!(controller.active().is_none());
        assert_eq!(layout, original);
        assert_eq!(recorder.events.last().map(String::as_str), Some("cancel"));
    }

    #[test]
    fn test_misuse_is_reported() {
        let (mut layout, block) = layout_with_block();
        let mut controller = ResizeController::without_listener(&CanvasConfig::default());

        assert_eq!(controller.update(Point::zero()), Err(ResizeError::NotActive));
        assert_eq!(controller.commit(&mut layout), Err(ResizeError::NotActive));
        assert!(controller.cancel().is_none());

        controller.begin(1, &block, ResizeHandle::Se).unwrap();
        assert!(matches!(
            controller.begin(1, &block, ResizeHandle::Se),
            Err(ResizeError::AlreadyActive { .. })
        ));
    }

    #[test]
    fn test_commit_of_removed_block_fails_and_ends_drag() {
        let (mut layout, block) = layout_with_block();
        let mut controller = ResizeController::new(&CanvasConfig::default(), Recorder::default());
        controller.begin(1, &block, ResizeHandle::Se).unwrap();
        layout.pages[0].blocks.clear();

        assert!(matches!(
            controller.commit(&mut layout),
            Err(ResizeError::BlockNotFound { .. })
        ));
        assert!(controller.active().is_none());
        assert_eq!(controller.listener().events, vec!["start se", "cancel"]);
    }

    #[test]
    fn test_commit_targets_the_dragged_page() {
        let block = |id: &str| {
            Block::new(BlockData::Text(TextData::default()), 0.0, 0.0, 100.0, 100.0).with_id(id)
        };
        let mut layout = Layout {
            bulletin_id: None,
            pages: vec![
                Page::new(1).with_blocks(vec![block("a")]),
                Page::new(2).with_blocks(vec![block("a")]),
            ],
        };
        layout.validate().unwrap();

        let dragged = layout.page(2).unwrap().blocks[0].clone();
        let mut controller = ResizeController::without_listener(&CanvasConfig::default());
        controller.begin(2, &dragged, ResizeHandle::Se).unwrap();
        controller.update(Point::new(50.0, 0.0)).unwrap();
        controller.commit(&mut layout).unwrap();

        assert_eq!(layout.page(1).unwrap().blocks[0].width, 100.0);
        assert_eq!(layout.page(2).unwrap().blocks[0].width, 150.0);
    }

    #[test]
    fn test_commit_on_wrong_page_is_not_found() {
        let (mut layout, block) = layout_with_block();
        let mut controller = ResizeController::without_listener(&CanvasConfig::default());
        controller.begin(3, &block, ResizeHandle::Se).unwrap();
        controller.update(Point::new(10.0, 10.0)).unwrap();

        assert_eq!(
            controller.commit(&mut layout),
            Err(ResizeError::BlockNotFound {
                block_id: "b1".into(),
                page_number: 3,
            })
        );
        assert_eq!(layout.pages[0].blocks[0], block);
    }

    #[test]
    fn test_fan_out_listeners() {
        let (_, block) = layout_with_block();
        let listeners: Vec<Box<dyn ResizeListener>> =
            vec![Box::new(Recorder::default()), Box::new(NoopListener)];
        let mut controller = ResizeController::new(&CanvasConfig::default(), listeners);
        controller.begin(1, &block, ResizeHandle::W).unwrap();
        controller.update(Point::new(5.0, 0.0)).unwrap();
        assert!(controller.cancel().is_some());
    }
}
