//! Half-block cell fallback surface.
//!
//! Renders the framebuffer through Ratatui using `▀` glyphs, packing two
//! vertical pixels into each terminal cell (foreground = upper pixel,
//! background = lower pixel). Works on any true-color terminal; pixel
//! resolution is columns x (2 * rows).

use crate::engine::colormap::Rgba;
use crate::engine::surface::{Surface, SurfaceError};
use crate::render::framebuffer::FrameBuffer;
use ratatui::backend::CrosstermBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::Terminal;
use std::io::{self, Stdout};

const UPPER_HALF_BLOCK: &str = "\u{2580}";

pub struct CellSurface {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    fb: FrameBuffer,
}

impl CellSurface {
    /// Build a surface sized from the current terminal dimensions.
    pub fn new() -> Result<Self, SurfaceError> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;
        let size = terminal.size()?;
        let fb = FrameBuffer::new(size.width as u32, size.height as u32 * 2);
        Ok(Self { terminal, fb })
    }
}

fn draw_text(buf: &mut Buffer, area: Rect, x: u16, y: u16, text: &str) {
    let mut col = x;
    for c in text.chars() {
        if col >= area.width || y >= area.height {
            break;
        }
        if let Some(cell) = buf.cell_mut((col, y)) {
            cell.set_char(c);
            cell.set_fg(Color::Green);
            cell.set_bg(Color::Black);
        }
        col += 1;
    }
}

impl Surface for CellSurface {
    fn size(&self) -> (u32, u32) {
        self.fb.size()
    }

    fn clear(&mut self, color: Rgba) {
        self.fb.clear(color);
    }

    fn blit(&mut self, pixels: &[Rgba], width: u32, height: u32, x: i32, y: i32) {
        self.fb.blit(pixels, width, height, x, y);
    }

    fn set_overlay(&mut self, top: String, bottom: String) {
        self.fb.set_overlay(top, bottom);
    }

    fn cell_to_pixel(&self, col: u16, row: u16) -> (i32, i32) {
        // Two pixels per cell vertically.
        (col as i32, row as i32 * 2)
    }

    fn handle_resize(&mut self, cols: u16, rows: u16) -> (u32, u32) {
        self.fb.resize(cols as u32, rows as u32 * 2);
        self.fb.size()
    }

    fn set_fullscreen(&mut self, on: bool) -> Result<(), SurfaceError> {
        // The alternate screen already fills the terminal; a toggle just
        // forces a clean redraw at the current size.
        let _ = self.fb.set_fullscreen(on);
        self.terminal.clear()?;
        Ok(())
    }

    fn present(&mut self) -> Result<(), SurfaceError> {
        let fb = &self.fb;
        self.terminal.draw(|frame| {
            let area = frame.area();
            let buf = frame.buffer_mut();
            for row in 0..area.height {
                for col in 0..area.width {
                    let top = fb.pixel(col as u32, row as u32 * 2);
                    let bottom = fb.pixel(col as u32, row as u32 * 2 + 1);
                    let Some(cell) = buf.cell_mut((col, row)) else {
                        continue;
                    };
                    let t = top.unwrap_or([0, 0, 0, 255]);
                    let b = bottom.unwrap_or(t);
                    cell.set_symbol(UPPER_HALF_BLOCK);
                    cell.set_fg(Color::Rgb(t[0], t[1], t[2]));
                    cell.set_bg(Color::Rgb(b[0], b[1], b[2]));
                }
            }

            let (top_text, bottom_text) = fb.overlay();
            draw_text(buf, area, 0, 0, top_text);
            if area.height > 0 {
                let x = (area.width as usize).saturating_sub(bottom_text.chars().count()) as u16;
                draw_text(buf, area, x, area.height - 1, bottom_text);
            }
        })?;
        Ok(())
    }
}
