use super::event::{InputEvent, Key};
use super::mode::AppMode;
use crate::engine::colormap::ColorMap;
use crate::engine::config::{Config, GridConfig};
use crate::engine::error::EngineError;
use crate::engine::field::ScalarField;
use crate::engine::queue::RenderQueue;
use crate::engine::surface::Surface;
use crate::engine::viewport::{Viewport, ZoomDirection};
use log::debug;

const BACKGROUND: [u8; 4] = [0, 0, 0, 255];

/// Session state: viewport, render queue, colormap, and the pluggable
/// field, driven by translated input events and one `tick` per frame.
pub struct App {
    mode: AppMode,
    viewport: Viewport,
    queue: RenderQueue,
    colormap: ColorMap,
    field: Box<dyn ScalarField>,
    grid: GridConfig,
}

impl App {
    /// Build the session over the surface's pixel size and enqueue the
    /// first grid.
    pub fn new(
        config: &Config,
        pixel_width: u32,
        pixel_height: u32,
        field: Box<dyn ScalarField>,
        colormap: ColorMap,
    ) -> Result<Self, EngineError> {
        let viewport = Viewport::with_default_bounds(pixel_width, pixel_height)?;
        let mut queue = RenderQueue::new();
        queue.repopulate(&viewport, config.grid.cols, config.grid.rows)?;
        Ok(Self {
            mode: AppMode::Running,
            viewport,
            queue,
            colormap,
            field,
            grid: config.grid,
        })
    }

    pub fn mode(&self) -> AppMode {
        self.mode
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn queue(&self) -> &RenderQueue {
        &self.queue
    }

    /// React to one input event. Viewport-changing events (zoom, pan
    /// commit) replace the pending tile sequence.
    pub fn handle_input(&mut self, event: InputEvent) -> Result<(), EngineError> {
        match event {
            InputEvent::Quit | InputEvent::KeyDown(Key::Escape) => {
                self.mode = AppMode::Quit;
            }
            InputEvent::KeyDown(Key::Up) => self.apply_zoom(ZoomDirection::In)?,
            InputEvent::KeyDown(Key::Down) => self.apply_zoom(ZoomDirection::Out)?,
            // Fullscreen is the presentation layer's concern.
            InputEvent::KeyDown(Key::Enter) => {}
            InputEvent::MouseDown(x, y) => self.viewport.begin_drag((x, y)),
            InputEvent::MouseMove(x, y) => self.viewport.update_drag((x, y)),
            InputEvent::MouseUp(x, y) => {
                self.viewport.update_drag((x, y));
                if self.viewport.end_drag() {
                    self.repopulate()?;
                }
            }
        }
        Ok(())
    }

    /// Run one frame of engine work: pull at most one tile from the queue,
    /// composite everything materialized so far with the live drag offset,
    /// and advance the palette animation.
    pub fn tick(&mut self, surface: &mut dyn Surface) -> Result<(), EngineError> {
        self.queue.step(self.field.as_ref())?;
        surface.clear(BACKGROUND);
        self.queue
            .composite(surface, &self.colormap, self.viewport.drag_offset())?;
        self.colormap.animate();
        Ok(())
    }

    /// Adopt a new surface pixel size and restart tiling over it.
    pub fn handle_resize(&mut self, pixel_width: u32, pixel_height: u32) -> Result<(), EngineError> {
        self.viewport.set_pixel_size(pixel_width, pixel_height)?;
        // Tiles from the old size carry stale pixel offsets.
        self.queue.clear();
        self.repopulate()
    }

    fn apply_zoom(&mut self, direction: ZoomDirection) -> Result<(), EngineError> {
        self.viewport.zoom(direction)?;
        debug!("zoom {:?}: bounds now {:?}", direction, self.viewport.bounds());
        self.repopulate()
    }

    fn repopulate(&mut self) -> Result<(), EngineError> {
        self.queue
            .repopulate(&self.viewport, self.grid.cols, self.grid.rows)
    }
}
