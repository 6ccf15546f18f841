//! Progressive materialization scheduler.
//!
//! The queue drains one tile per frame tick so an expensive field never
//! stalls the loop, and is wholly replaced (not drained) whenever the
//! viewport changes. Already-composited tiles stay visible until new tiles
//! overdraw them; tiles that no longer intersect the viewport are evicted
//! on repopulation so a long pan session cannot grow memory without bound.

use crate::engine::colormap::ColorMap;
use crate::engine::error::EngineError;
use crate::engine::field::ScalarField;
use crate::engine::grid::TileGrid;
use crate::engine::surface::Surface;
use crate::engine::tile::Tile;
use crate::engine::viewport::Viewport;
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QueueState {
    /// No pending work; every planned tile is materialized.
    Idle,
    /// A fresh grid is being installed.
    Generating,
    /// Tiles are being pulled one per tick.
    Draining,
}

/// Ordered pending-tile sequence plus the growing list of composited tiles.
pub struct RenderQueue {
    pending: Option<TileGrid>,
    blitted: Vec<Tile>,
    state: QueueState,
}

impl RenderQueue {
    pub fn new() -> Self {
        Self {
            pending: None,
            blitted: Vec::new(),
            state: QueueState::Idle,
        }
    }

    pub fn state(&self) -> QueueState {
        self.state
    }

    /// Tiles materialized so far, in completion order.
    pub fn blitted(&self) -> &[Tile] {
        &self.blitted
    }

    /// Throw away the un-materialized sequence and install a fresh grid
    /// over the viewport's current bounds.
    ///
    /// Tiles not yet pulled are simply dropped; they hold no state.
    /// Materialized tiles are kept for progressive refinement, except
    /// those whose world bounds no longer intersect the viewport, which
    /// are evicted.
    pub fn repopulate(
        &mut self,
        viewport: &Viewport,
        cols: u32,
        rows: u32,
    ) -> Result<(), EngineError> {
        self.state = QueueState::Generating;
        let grid = TileGrid::new(viewport, cols, rows)?;
        let before = self.blitted.len();
        let bounds = *viewport.bounds();
        self.blitted.retain(|tile| tile.bounds().intersects(&bounds));
        debug!(
            "queue repopulated: {} pending tiles, kept {}/{} blitted",
            grid.len(),
            self.blitted.len(),
            before
        );
        self.pending = Some(grid);
        self.state = QueueState::Draining;
        Ok(())
    }

    /// Pull and materialize at most one tile. Returns true when a tile was
    /// produced; an exhausted queue is a no-op that settles into `Idle`.
    pub fn step<F: ScalarField + ?Sized>(&mut self, field: &F) -> Result<bool, EngineError> {
        match self.pending.as_mut().and_then(|grid| grid.next()) {
            Some(mut tile) => {
                tile.materialize(field)?;
                self.blitted.push(tile);
                Ok(true)
            }
            None => {
                self.pending = None;
                self.state = QueueState::Idle;
                Ok(false)
            }
        }
    }

    /// Composite every materialized tile onto the surface with the live
    /// pan offset, in completion order.
    pub fn composite(
        &self,
        surface: &mut dyn Surface,
        colormap: &ColorMap,
        pan: (i32, i32),
    ) -> Result<(), EngineError> {
        for tile in &self.blitted {
            tile.blit(surface, colormap, pan)?;
        }
        Ok(())
    }

    /// Hard reset of the composited list, for callers that need a blank
    /// slate rather than progressive refinement.
    pub fn clear(&mut self) {
        self.blitted.clear();
    }
}

impl Default for RenderQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::viewport::ZoomDirection;
    use std::cell::Cell;

    fn viewport() -> Viewport {
        Viewport::with_default_bounds(16, 16).unwrap()
    }

    #[test]
    fn test_starts_idle() {
        let queue = RenderQueue::new();
        assert_eq!(queue.state(), QueueState::Idle);
        assert!(queue.blitted().is_empty());
    }

    #[test]
    fn test_step_materializes_one_tile_per_call() {
        let mut queue = RenderQueue::new();
        queue.repopulate(&viewport(), 4, 4).unwrap();
        assert_eq!(queue.state(), QueueState::Draining);

        let calls = Cell::new(0u32);
        let field = |_: f64, _: f64| {
            calls.set(calls.get() + 1);
            1u16
        };

        assert!(queue.step(&field).unwrap());
        assert_eq!(queue.blitted().len(), 1);
        // One 4x4 tile worth of samples.
        assert_eq!(calls.get(), 16);
    }

    #[test]
    fn test_drains_to_idle_then_noop() {
        let mut queue = RenderQueue::new();
        queue.repopulate(&viewport(), 4, 4).unwrap();
        let field = |_: f64, _: f64| 1u16;

        for _ in 0..16 {
            assert!(queue.step(&field).unwrap());
        }
        assert_eq!(queue.blitted().len(), 16);

        // 17th step: queue already drained.
        assert!(!queue.step(&field).unwrap());
        assert_eq!(queue.state(), QueueState::Idle);
        assert_eq!(queue.blitted().len(), 16);
    }

    #[test]
    fn test_repopulate_replaces_pending_keeps_blitted() {
        let mut queue = RenderQueue::new();
        let vp = viewport();
        let field = |_: f64, _: f64| 1u16;

        queue.repopulate(&vp, 4, 4).unwrap();
        queue.step(&field).unwrap();
        queue.step(&field).unwrap();

        // Viewport unchanged: both tiles still intersect and survive.
        queue.repopulate(&vp, 4, 4).unwrap();
        assert_eq!(queue.blitted().len(), 2);
        assert_eq!(queue.state(), QueueState::Draining);

        // The fresh sequence is full again: 16 more steps succeed.
        let mut produced = 0;
        while queue.step(&field).unwrap() {
            produced += 1;
        }
        assert_eq!(produced, 16);
        assert_eq!(queue.blitted().len(), 18);
    }

    #[test]
    fn test_repopulate_evicts_tiles_outside_viewport() {
        let mut queue = RenderQueue::new();
        let mut vp = viewport();
        let field = |_: f64, _: f64| 1u16;

        queue.repopulate(&vp, 4, 4).unwrap();
        while queue.step(&field).unwrap() {}
        assert_eq!(queue.blitted().len(), 16);

        // Pan far enough that the old window is completely off-screen.
        vp.begin_drag((0, 0));
        vp.update_drag((-64, 0));
        vp.end_drag();
        queue.repopulate(&vp, 4, 4).unwrap();
        assert!(queue.blitted().is_empty());
    }

    #[test]
    fn test_repopulate_after_zoom_keeps_overlapping_tiles() {
        let mut queue = RenderQueue::new();
        let mut vp = viewport();
        let field = |_: f64, _: f64| 1u16;

        queue.repopulate(&vp, 4, 4).unwrap();
        while queue.step(&field).unwrap() {}

        vp.zoom(ZoomDirection::In).unwrap();
        queue.repopulate(&vp, 4, 4).unwrap();
        // Zooming in keeps the old tiles overlapping the new window; they
        // remain visible until overdrawn by the finer grid.
        assert_eq!(queue.blitted().len(), 16);
    }

    #[test]
    fn test_clear_resets_blitted() {
        let mut queue = RenderQueue::new();
        queue.repopulate(&viewport(), 4, 4).unwrap();
        let field = |_: f64, _: f64| 1u16;
        queue.step(&field).unwrap();
        queue.clear();
        assert!(queue.blitted().is_empty());
    }
}
