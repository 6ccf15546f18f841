//! In-memory RGBA compositing target shared by the presentation backends.
//!
//! Also a complete `Surface` in its own right (present is a no-op), which
//! is what headless tests draw on.

use crate::engine::colormap::Rgba;
use crate::engine::surface::{Surface, SurfaceError};

#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
    overlay_top: String,
    overlay_bottom: String,
    fullscreen: bool,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            pixels: vec![[0, 0, 0, 255]; (width * height) as usize],
            overlay_top: String::new(),
            overlay_bottom: String::new(),
            fullscreen: false,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x < self.width && y < self.height {
            Some(self.pixels[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    /// Raw row-major pixel data.
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    pub fn overlay(&self) -> (&str, &str) {
        (&self.overlay_top, &self.overlay_bottom)
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Drop the current contents and reallocate at a new size.
    pub fn resize(&mut self, width: u32, height: u32) {
        let width = width.max(1);
        let height = height.max(1);
        self.width = width;
        self.height = height;
        self.pixels = vec![[0, 0, 0, 255]; (width * height) as usize];
    }
}

impl Surface for FrameBuffer {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    fn blit(&mut self, pixels: &[Rgba], width: u32, height: u32, x: i32, y: i32) {
        if pixels.len() < (width * height) as usize {
            return;
        }
        for row in 0..height as i32 {
            let dst_y = y + row;
            if dst_y < 0 || dst_y >= self.height as i32 {
                continue;
            }
            for col in 0..width as i32 {
                let dst_x = x + col;
                if dst_x < 0 || dst_x >= self.width as i32 {
                    continue;
                }
                let src = (row as u32 * width + col as u32) as usize;
                let dst = (dst_y as u32 * self.width + dst_x as u32) as usize;
                self.pixels[dst] = pixels[src];
            }
        }
    }

    fn set_overlay(&mut self, top: String, bottom: String) {
        self.overlay_top = top;
        self.overlay_bottom = bottom;
    }

    fn cell_to_pixel(&self, col: u16, row: u16) -> (i32, i32) {
        (col as i32, row as i32)
    }

    fn handle_resize(&mut self, cols: u16, rows: u16) -> (u32, u32) {
        self.resize(cols as u32, rows as u32);
        (self.width, self.height)
    }

    fn set_fullscreen(&mut self, on: bool) -> Result<(), SurfaceError> {
        self.fullscreen = on;
        Ok(())
    }

    fn present(&mut self) -> Result<(), SurfaceError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_fills_every_pixel() {
        let mut fb = FrameBuffer::new(4, 4);
        fb.clear([7, 8, 9, 255]);
        assert!(fb.pixels().iter().all(|&p| p == [7, 8, 9, 255]));
    }

    #[test]
    fn test_blit_in_bounds() {
        let mut fb = FrameBuffer::new(4, 4);
        let block = vec![[1, 1, 1, 255]; 4];
        fb.blit(&block, 2, 2, 1, 1);
        assert_eq!(fb.pixel(1, 1), Some([1, 1, 1, 255]));
        assert_eq!(fb.pixel(2, 2), Some([1, 1, 1, 255]));
        assert_eq!(fb.pixel(0, 0), Some([0, 0, 0, 255]));
        assert_eq!(fb.pixel(3, 3), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_blit_clips_at_edges() {
        let mut fb = FrameBuffer::new(4, 4);
        let block = vec![[9, 9, 9, 255]; 9];
        // Partially off the top-left corner.
        fb.blit(&block, 3, 3, -2, -2);
        assert_eq!(fb.pixel(0, 0), Some([9, 9, 9, 255]));
        assert_eq!(fb.pixel(1, 1), Some([0, 0, 0, 255]));
        // Partially off the bottom-right corner; must not panic.
        fb.blit(&block, 3, 3, 3, 3);
        assert_eq!(fb.pixel(3, 3), Some([9, 9, 9, 255]));
    }

    #[test]
    fn test_short_pixel_slice_ignored() {
        let mut fb = FrameBuffer::new(4, 4);
        fb.blit(&[[9, 9, 9, 255]], 3, 3, 0, 0);
        assert_eq!(fb.pixel(0, 0), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_resize_reallocates() {
        let mut fb = FrameBuffer::new(4, 4);
        fb.clear([5, 5, 5, 255]);
        fb.resize(8, 2);
        assert_eq!(fb.size(), (8, 2));
        assert_eq!(fb.pixel(7, 1), Some([0, 0, 0, 255]));
        assert_eq!(fb.pixel(0, 2), None);
    }
}
