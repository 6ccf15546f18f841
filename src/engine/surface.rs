//! Presentation surface contract.
//!
//! The engine composites onto an abstract pixel surface; concrete backends
//! (half-block cells, Kitty graphics) live in the `render` module. This
//! mirrors how the input side works: the engine never touches the terminal
//! directly.

use crate::engine::colormap::Rgba;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SurfaceError {
    #[error("surface I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("graphics protocol error: {0}")]
    Protocol(String),

    #[error("unsupported surface operation: {0}")]
    Unsupported(String),
}

/// An addressable 2D pixel buffer the engine can draw on.
///
/// `blit` and `clear` only mutate in-memory state; nothing reaches the
/// display until `present` runs, once per frame, after compositing.
pub trait Surface {
    /// Current drawable size in pixels (width, height).
    fn size(&self) -> (u32, u32);

    /// Fill the whole surface with one color.
    fn clear(&mut self, color: Rgba);

    /// Copy a row-major pixel block to `(x, y)`, clipping at the edges.
    /// Negative coordinates are allowed; off-surface rows and columns are
    /// dropped.
    fn blit(&mut self, pixels: &[Rgba], width: u32, height: u32, x: i32, y: i32);

    /// Diagnostic text drawn above the pixels: top-left and bottom-right
    /// lines, in the style of the frame-rate overlay.
    fn set_overlay(&mut self, top: String, bottom: String);

    /// Translate an input cell coordinate (terminal column/row) into the
    /// surface's pixel space.
    fn cell_to_pixel(&self, col: u16, row: u16) -> (i32, i32);

    /// React to a terminal resize; returns the new pixel size.
    fn handle_resize(&mut self, cols: u16, rows: u16) -> (u32, u32);

    /// Toggle fullscreen presentation. Backends without a real fullscreen
    /// concept treat this as a clear-and-refit.
    fn set_fullscreen(&mut self, on: bool) -> Result<(), SurfaceError>;

    /// Push the composited frame to the display.
    fn present(&mut self) -> Result<(), SurfaceError>;
}
