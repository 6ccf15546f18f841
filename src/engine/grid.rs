//! Deterministic partition of a viewport into a lazy grid of tiles.
//!
//! Tiles come out in column-major strip order: every tile of strip 0 from
//! top to bottom, then strip 1, and so on. The order is stable so tests can
//! assert full coverage. The sequence is lazy (tiles are constructed on
//! demand, never materialized here) and restartable by building a fresh
//! grid from the same viewport.

use crate::engine::error::EngineError;
use crate::engine::geometry::Rect;
use crate::engine::tile::Tile;
use crate::engine::viewport::Viewport;

/// A finite, restartable tile sequence over a fixed snapshot of the
/// viewport's bounds and pixel size.
#[derive(Debug, Clone)]
pub struct TileGrid {
    bounds: Rect,
    pixel_width: u32,
    pixel_height: u32,
    cols: u32,
    rows: u32,
    next_index: u32,
}

impl TileGrid {
    /// Snapshot the viewport and plan a `cols x rows` partition.
    ///
    /// Each column is `floor(width / cols)` pixels wide except the last,
    /// which absorbs the integer-division remainder; rows likewise. The
    /// union of all tiles therefore covers the pixel rectangle exactly,
    /// with no gaps and no overlaps.
    pub fn new(viewport: &Viewport, cols: u32, rows: u32) -> Result<Self, EngineError> {
        let (pixel_width, pixel_height) = viewport.pixel_size();
        if cols == 0 || rows == 0 || cols > pixel_width || rows > pixel_height {
            return Err(EngineError::InvalidBounds(format!(
                "grid {}x{} does not fit a {}x{} pixel viewport",
                cols, rows, pixel_width, pixel_height
            )));
        }
        Ok(Self {
            bounds: *viewport.bounds(),
            pixel_width,
            pixel_height,
            cols,
            rows,
            next_index: 0,
        })
    }

    /// Total number of tiles the full sequence yields.
    pub fn len(&self) -> u32 {
        self.cols * self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of tiles not yet pulled from the sequence.
    pub fn remaining(&self) -> u32 {
        self.len() - self.next_index
    }

    fn tile_at(&self, col: u32, row: u32) -> Result<Tile, EngineError> {
        let base_w = self.pixel_width / self.cols;
        let base_h = self.pixel_height / self.rows;
        let offset_x = col * base_w;
        let offset_y = row * base_h;
        // Last column and row absorb the remainder.
        let width = if col == self.cols - 1 {
            self.pixel_width - offset_x
        } else {
            base_w
        };
        let height = if row == self.rows - 1 {
            self.pixel_height - offset_y
        } else {
            base_h
        };
        let bounds = self.bounds.subdivide(col, self.cols, row, self.rows)?;
        Ok(Tile::new(bounds, width, height, offset_x, offset_y))
    }
}

impl Iterator for TileGrid {
    type Item = Tile;

    fn next(&mut self) -> Option<Tile> {
        if self.next_index >= self.len() {
            return None;
        }
        let col = self.next_index / self.rows;
        let row = self.next_index % self.rows;
        self.next_index += 1;
        // Subdivision indices are in range by construction.
        self.tile_at(col, row).ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining() as usize;
        (remaining, Some(remaining))
    }
}
