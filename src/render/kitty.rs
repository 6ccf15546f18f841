//! Kitty Graphics Protocol surface.
//!
//! Transmits the composited framebuffer once per frame as a 32-bit RGBA
//! image over APC sequences:
//! - `ESC _ G a=T,f=32,s=<w>,v=<h>,i=<id>,m=<more> ; <base64> ESC \` to
//!   transmit (chunked at 4096 base64 bytes, continuation chunks carry
//!   only `m`),
//! - `ESC _ G a=d,d=I,i=<id>` to delete a frame,
//! - `ESC _ G a=d,d=A` to delete everything on teardown.

use crate::engine::colormap::Rgba;
use crate::engine::surface::{Surface, SurfaceError};
use crate::render::framebuffer::FrameBuffer;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::{queue, terminal};
use std::io::{self, Write};

const APC_START: &str = "\x1b_G";
const APC_END: &str = "\x1b\\";
const CHUNK_SIZE: usize = 4096;

pub struct KittySurface {
    fb: FrameBuffer,
    cell_cols: u16,
    cell_rows: u16,
    /// Incremented per frame; the previous frame is deleted after the next
    /// one is on screen, so there is never a blank gap.
    image_id: u32,
}

impl KittySurface {
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        let (cell_cols, cell_rows) = terminal::size()?;
        Ok(Self {
            fb: FrameBuffer::new(width, height),
            cell_cols: cell_cols.max(1),
            cell_rows: cell_rows.max(1),
            image_id: 1,
        })
    }

    fn transmit<W: Write>(&self, out: &mut W, image_id: u32) -> io::Result<()> {
        let raw: Vec<u8> = self.fb.pixels().iter().flatten().copied().collect();
        let encoded = STANDARD.encode(&raw);
        let (width, height) = self.fb.size();

        let chunks: Vec<&[u8]> = encoded.as_bytes().chunks(CHUNK_SIZE).collect();
        for (i, chunk) in chunks.iter().enumerate() {
            let more = if i + 1 == chunks.len() { 0 } else { 1 };
            let payload = std::str::from_utf8(chunk).unwrap_or("");
            if i == 0 {
                queue!(
                    out,
                    Print(format!(
                        "{}a=T,f=32,s={},v={},i={},q=2,m={};{}{}",
                        APC_START, width, height, image_id, more, payload, APC_END
                    ))
                )?;
            } else {
                queue!(
                    out,
                    Print(format!("{}m={};{}{}", APC_START, more, payload, APC_END))
                )?;
            }
        }
        Ok(())
    }

    fn delete_image<W: Write>(&self, out: &mut W, image_id: u32) -> io::Result<()> {
        queue!(
            out,
            Print(format!("{}a=d,d=I,i={},q=2{}", APC_START, image_id, APC_END))
        )
    }

    fn delete_all_graphics<W: Write>(&self, out: &mut W) -> io::Result<()> {
        queue!(out, Print(format!("{}a=d,d=A,q=2{}", APC_START, APC_END)))
    }

    fn draw_overlay<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let (top, bottom) = self.fb.overlay();
        queue!(
            out,
            SetForegroundColor(Color::Green),
            MoveTo(0, 0),
            Print(top)
        )?;
        let x = (self.cell_cols as usize).saturating_sub(bottom.chars().count()) as u16;
        queue!(
            out,
            MoveTo(x, self.cell_rows.saturating_sub(1)),
            Print(bottom),
            ResetColor
        )
    }
}

impl Surface for KittySurface {
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
        let (width, height) = self.fb.size();
        let x = col as i64 * width as i64 / self.cell_cols as i64;
        let y = row as i64 * height as i64 / self.cell_rows as i64;
        (x as i32, y as i32)
    }

    fn handle_resize(&mut self, cols: u16, rows: u16) -> (u32, u32) {
        // The framebuffer keeps its pixel size; only the cell-to-pixel
        // scale changes.
        self.cell_cols = cols.max(1);
        self.cell_rows = rows.max(1);
        self.fb.size()
    }

    fn set_fullscreen(&mut self, on: bool) -> Result<(), SurfaceError> {
        let _ = self.fb.set_fullscreen(on);
        let mut out = io::stdout().lock();
        self.delete_all_graphics(&mut out)?;
        out.flush()?;
        Ok(())
    }

    fn present(&mut self) -> Result<(), SurfaceError> {
        let mut out = io::stdout().lock();
        let new_id = self.image_id + 1;
        queue!(out, MoveTo(0, 0))?;
        self.transmit(&mut out, new_id)?;
        self.delete_image(&mut out, self.image_id)?;
        self.draw_overlay(&mut out)?;
        out.flush()?;
        self.image_id = new_id;
        Ok(())
    }
}

impl Drop for KittySurface {
    fn drop(&mut self) {
        let mut out = io::stdout().lock();
        let _ = self.delete_all_graphics(&mut out);
        let _ = out.flush();
    }
}
