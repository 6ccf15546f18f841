//! The camera: current world rectangle, pixel dimensions, and the
//! drag accumulator that gives instant pan feedback before any
//! recomputation happens.

use crate::engine::error::EngineError;
use crate::engine::geometry::Rect;

/// Fraction of the current extent removed by one `zoom(In)` step.
const ZOOM_STEP: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// World window over the plane, plus the pixel rectangle it renders into.
///
/// Created once at startup and mutated by zoom/pan for the whole session.
/// Every mutation of the world rectangle invalidates the current tile grid;
/// callers react by repopulating the render queue.
#[derive(Debug, Clone)]
pub struct Viewport {
    bounds: Rect,
    pixel_width: u32,
    pixel_height: u32,
    drag_offset: (i32, i32),
    last_drag_pos: (i32, i32),
    dragging: bool,
}

impl Viewport {
    pub fn new(bounds: Rect, pixel_width: u32, pixel_height: u32) -> Result<Self, EngineError> {
        if pixel_width == 0 || pixel_height == 0 {
            return Err(EngineError::InvalidBounds(format!(
                "zero pixel dimensions ({}, {})",
                pixel_width, pixel_height
            )));
        }
        Ok(Self {
            bounds,
            pixel_width,
            pixel_height,
            drag_offset: (0, 0),
            last_drag_pos: (0, 0),
            dragging: false,
        })
    }

    /// Startup viewport over the default `[-1, 1] x [-1, 1]` window.
    pub fn with_default_bounds(pixel_width: u32, pixel_height: u32) -> Result<Self, EngineError> {
        let bounds = Rect::new((-1.0, 1.0), (1.0, -1.0))?;
        Self::new(bounds, pixel_width, pixel_height)
    }

    pub fn bounds(&self) -> &Rect {
        &self.bounds
    }

    pub fn pixel_size(&self) -> (u32, u32) {
        (self.pixel_width, self.pixel_height)
    }

    /// Live pixel offset accumulated by an in-progress drag.
    pub fn drag_offset(&self) -> (i32, i32) {
        self.drag_offset
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Map a pixel coordinate on this viewport to world space.
    pub fn to_world(&self, px: f64, py: f64) -> Result<(f64, f64), EngineError> {
        self.bounds
            .to_world(px, py, self.pixel_width as f64, self.pixel_height as f64)
    }

    /// Step the window in or out around its center by a fixed fraction of
    /// the current extent (additive, not multiplicative, so stepping stays
    /// linear near the origin). `Out` is the exact inverse of `In`.
    pub fn zoom(&mut self, direction: ZoomDirection) -> Result<(), EngineError> {
        let (half_x, half_y) = match direction {
            ZoomDirection::In => (
                self.bounds.width() * ZOOM_STEP / 2.0,
                self.bounds.height() * ZOOM_STEP / 2.0,
            ),
            // Undo one In step: extent * s/2 / (1 - s) on each edge.
            ZoomDirection::Out => (
                -self.bounds.width() * ZOOM_STEP / (2.0 * (1.0 - ZOOM_STEP)),
                -self.bounds.height() * ZOOM_STEP / (2.0 * (1.0 - ZOOM_STEP)),
            ),
        };
        self.bounds = self.bounds.inset(half_x, half_y)?;
        Ok(())
    }

    /// Start accumulating drag deltas from a screen position.
    pub fn begin_drag(&mut self, pos: (i32, i32)) {
        self.dragging = true;
        self.last_drag_pos = pos;
    }

    /// Fold a pointer movement into the live offset. Ignored when no drag
    /// is in progress.
    pub fn update_drag(&mut self, pos: (i32, i32)) {
        if !self.dragging {
            return;
        }
        self.drag_offset.0 += pos.0 - self.last_drag_pos.0;
        self.drag_offset.1 += pos.1 - self.last_drag_pos.1;
        self.last_drag_pos = pos;
    }

    /// Commit the accumulated drag: convert the pixel offset into a world
    /// shift, recenter the bounds, and zero the accumulator. Returns true
    /// when the bounds actually moved (the caller then repopulates).
    pub fn end_drag(&mut self) -> bool {
        self.dragging = false;
        if self.drag_offset == (0, 0) {
            return false;
        }
        self.rescope();
        true
    }

    /// Resize the pixel rectangle (terminal resize); world bounds keep
    /// their current window.
    pub fn set_pixel_size(&mut self, width: u32, height: u32) -> Result<(), EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidBounds(format!(
                "zero pixel dimensions ({}, {})",
                width, height
            )));
        }
        self.pixel_width = width;
        self.pixel_height = height;
        Ok(())
    }

    /// Translate the drag accumulator into world space and shift the
    /// bounds. Dragging content right moves the window left; dragging
    /// content down moves the window up (world Y grows upward).
    fn rescope(&mut self) {
        let (cx, cy) = self.drag_offset;
        let dx = -(cx as f64 / self.pixel_width as f64) * self.bounds.width();
        let dy = (cy as f64 / self.pixel_height as f64) * self.bounds.height();
        self.bounds = self.bounds.translate(dx, dy);
        self.drag_offset = (0, 0);
    }
}
