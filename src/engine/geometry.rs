//! World-space geometry and pixel-to-world coordinate mapping.
//!
//! Pixel rows grow downward while world Y grows upward, so every mapping
//! through here inverts the Y axis. The mapping is exact at all four
//! corners: pixel (0, 0) lands on `top_left` and pixel (w, h) lands on
//! `bottom_right`.

use crate::engine::error::EngineError;

/// Axis-aligned rectangle in world space.
///
/// Invariants: `top_left.1 > bottom_right.1` (top edge above bottom edge)
/// and `bottom_right.0 > top_left.0`. Zero-area rectangles are rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    top_left: (f64, f64),
    bottom_right: (f64, f64),
}

impl Rect {
    pub fn new(top_left: (f64, f64), bottom_right: (f64, f64)) -> Result<Self, EngineError> {
        if !(top_left.0.is_finite()
            && top_left.1.is_finite()
            && bottom_right.0.is_finite()
            && bottom_right.1.is_finite())
        {
            return Err(EngineError::InvalidBounds(format!(
                "non-finite corner: {:?} {:?}",
                top_left, bottom_right
            )));
        }
        if bottom_right.0 <= top_left.0 || top_left.1 <= bottom_right.1 {
            return Err(EngineError::InvalidBounds(format!(
                "degenerate or inverted rectangle: {:?} {:?}",
                top_left, bottom_right
            )));
        }
        Ok(Self {
            top_left,
            bottom_right,
        })
    }

    pub fn top_left(&self) -> (f64, f64) {
        self.top_left
    }

    pub fn bottom_right(&self) -> (f64, f64) {
        self.bottom_right
    }

    /// Horizontal extent; always positive for a valid rectangle.
    pub fn width(&self) -> f64 {
        self.bottom_right.0 - self.top_left.0
    }

    /// Vertical extent; always positive for a valid rectangle.
    pub fn height(&self) -> f64 {
        self.top_left.1 - self.bottom_right.1
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.top_left.0 + self.bottom_right.0) / 2.0,
            (self.top_left.1 + self.bottom_right.1) / 2.0,
        )
    }

    /// Shift both corners by the same world-space offset.
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self {
            top_left: (self.top_left.0 + dx, self.top_left.1 + dy),
            bottom_right: (self.bottom_right.0 + dx, self.bottom_right.1 + dy),
        }
    }

    /// Move each edge inward (positive half-steps) or outward (negative).
    ///
    /// Fails with `InvalidBounds` when the contraction would collapse the
    /// rectangle, so a valid `Rect` can never become degenerate.
    pub fn inset(&self, half_x: f64, half_y: f64) -> Result<Self, EngineError> {
        Rect::new(
            (self.top_left.0 + half_x, self.top_left.1 - half_y),
            (self.bottom_right.0 - half_x, self.bottom_right.1 + half_y),
        )
    }

    /// True when the two rectangles share any area.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.top_left.0 < other.bottom_right.0
            && other.top_left.0 < self.bottom_right.0
            && self.bottom_right.1 < other.top_left.1
            && other.bottom_right.1 < self.top_left.1
    }

    /// The proportional sub-rectangle covering column strip `col` of `cols`
    /// and row band `row` of `rows`. Strips divide the X extent, bands
    /// divide the Y extent top-to-bottom.
    pub fn subdivide(&self, col: u32, cols: u32, row: u32, rows: u32) -> Result<Self, EngineError> {
        if cols == 0 || rows == 0 || col >= cols || row >= rows {
            return Err(EngineError::InvalidBounds(format!(
                "subdivision ({}/{}, {}/{}) out of range",
                col, cols, row, rows
            )));
        }
        let w = self.width();
        let h = self.height();
        let x0 = self.top_left.0 + w * col as f64 / cols as f64;
        let x1 = self.top_left.0 + w * (col + 1) as f64 / cols as f64;
        let y0 = self.top_left.1 - h * row as f64 / rows as f64;
        let y1 = self.top_left.1 - h * (row + 1) as f64 / rows as f64;
        Rect::new((x0, y0), (x1, y1))
    }

    /// Linearly map a pixel coordinate in `[0, width] x [0, height]` onto
    /// this rectangle. `(0, 0)` maps to the top-left corner and
    /// `(width, height)` to the bottom-right corner.
    pub fn to_world(
        &self,
        px: f64,
        py: f64,
        width: f64,
        height: f64,
    ) -> Result<(f64, f64), EngineError> {
        if width <= 0.0 || height <= 0.0 {
            return Err(EngineError::InvalidBounds(format!(
                "zero pixel extent ({}, {})",
                width, height
            )));
        }
        let wx = self.top_left.0 + (px / width) * self.width();
        let wy = self.top_left.1 - (py / height) * self.height();
        Ok((wx, wy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_rect() {
        let rect = Rect::new((-1.0, 1.0), (1.0, -1.0)).unwrap();
        assert_eq!(rect.width(), 2.0);
        assert_eq!(rect.height(), 2.0);
        assert_eq!(rect.center(), (0.0, 0.0));
    }

    #[test]
    fn test_degenerate_rect_rejected() {
        assert!(matches!(
            Rect::new((0.0, 0.0), (0.0, 0.0)),
            Err(EngineError::InvalidBounds(_))
        ));
        // Inverted on X
        assert!(Rect::new((1.0, 1.0), (-1.0, -1.0)).is_err());
        // Inverted on Y (top edge below bottom edge)
        assert!(Rect::new((-1.0, -1.0), (1.0, 1.0)).is_err());
        assert!(Rect::new((f64::NAN, 1.0), (1.0, -1.0)).is_err());
    }

    #[test]
    fn test_to_world_exact_at_corners() {
        let rect = Rect::new((-2.5, 2.0), (1.5, -2.0)).unwrap();
        assert_eq!(rect.to_world(0.0, 0.0, 640.0, 400.0).unwrap(), (-2.5, 2.0));
        assert_eq!(
            rect.to_world(640.0, 400.0, 640.0, 400.0).unwrap(),
            (1.5, -2.0)
        );
        assert_eq!(rect.to_world(640.0, 0.0, 640.0, 400.0).unwrap(), (1.5, 2.0));
        assert_eq!(
            rect.to_world(0.0, 400.0, 640.0, 400.0).unwrap(),
            (-2.5, -2.0)
        );
    }

    #[test]
    fn test_to_world_y_inverted() {
        let rect = Rect::new((-1.0, 1.0), (1.0, -1.0)).unwrap();
        // Pixel rows grow downward: the row below the top edge must map to
        // a smaller world Y.
        let (_, y_top) = rect.to_world(0.0, 1.0, 100.0, 100.0).unwrap();
        let (_, y_lower) = rect.to_world(0.0, 99.0, 100.0, 100.0).unwrap();
        assert!(y_top > y_lower);
    }

    #[test]
    fn test_to_world_zero_extent_fails() {
        let rect = Rect::new((-1.0, 1.0), (1.0, -1.0)).unwrap();
        assert!(matches!(
            rect.to_world(0.0, 0.0, 0.0, 100.0),
            Err(EngineError::InvalidBounds(_))
        ));
    }

    #[test]
    fn test_subdivide_covers_parent() {
        let rect = Rect::new((-1.0, 1.0), (1.0, -1.0)).unwrap();
        let first = rect.subdivide(0, 4, 0, 4).unwrap();
        let last = rect.subdivide(3, 4, 3, 4).unwrap();
        assert_eq!(first.top_left(), rect.top_left());
        assert_eq!(last.bottom_right(), rect.bottom_right());

        // Adjacent strips share an edge exactly.
        let a = rect.subdivide(1, 4, 2, 4).unwrap();
        let b = rect.subdivide(2, 4, 2, 4).unwrap();
        assert_eq!(a.bottom_right().0, b.top_left().0);
    }

    #[test]
    fn test_subdivide_out_of_range() {
        let rect = Rect::new((-1.0, 1.0), (1.0, -1.0)).unwrap();
        assert!(rect.subdivide(4, 4, 0, 4).is_err());
        assert!(rect.subdivide(0, 0, 0, 4).is_err());
    }

    #[test]
    fn test_intersects() {
        let a = Rect::new((-1.0, 1.0), (1.0, -1.0)).unwrap();
        let b = Rect::new((0.5, 0.5), (2.0, -0.5)).unwrap();
        let c = Rect::new((5.0, 1.0), (6.0, -1.0)).unwrap();
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_translate() {
        let rect = Rect::new((-1.0, 1.0), (1.0, -1.0)).unwrap();
        let moved = rect.translate(2.0, -3.0);
        assert_eq!(moved.top_left(), (1.0, -2.0));
        assert_eq!(moved.bottom_right(), (3.0, -4.0));
        assert_eq!(moved.width(), rect.width());
    }
}
