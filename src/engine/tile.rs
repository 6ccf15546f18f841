//! A tile is the unit of progressive rendering: a world sub-rectangle plus
//! the pixel rectangle it covers on screen, with a lazily computed raster.

use crate::engine::colormap::ColorMap;
use crate::engine::error::EngineError;
use crate::engine::field::{FieldFault, ScalarField, MAX_INTENSITY};
use crate::engine::geometry::Rect;
use crate::engine::surface::Surface;
use log::debug;

/// One rectangular unit of work within a tile grid.
///
/// The raster is `None` until `materialize` runs; once computed the tile
/// exclusively owns its buffer and never recomputes it. Pixel coordinates
/// inside the tile map through the tile's *own* world rectangle, so nested
/// subdivision composes without referring back to the full viewport.
#[derive(Debug, Clone)]
pub struct Tile {
    bounds: Rect,
    width: u32,
    height: u32,
    offset_x: u32,
    offset_y: u32,
    raster: Option<Vec<u16>>,
}

impl Tile {
    pub fn new(bounds: Rect, width: u32, height: u32, offset_x: u32, offset_y: u32) -> Self {
        Self {
            bounds,
            width,
            height,
            offset_x,
            offset_y,
            raster: None,
        }
    }

    pub fn bounds(&self) -> &Rect {
        &self.bounds
    }

    /// Pixel geometry as (width, height, offset_x, offset_y).
    pub fn pixel_rect(&self) -> (u32, u32, u32, u32) {
        (self.width, self.height, self.offset_x, self.offset_y)
    }

    pub fn is_materialized(&self) -> bool {
        self.raster.is_some()
    }

    /// Compute and cache the intensity raster.
    ///
    /// The field is sampled exactly once per pixel on the first call; later
    /// calls are pure cache hits and never sample again. A `FieldFault` is
    /// absorbed here: the offending pixel gets the escaped sentinel so a
    /// single bad sample can never abort the tile.
    pub fn materialize<F: ScalarField + ?Sized>(&mut self, field: &F) -> Result<&[u16], EngineError> {
        if self.raster.is_none() {
            let mut buffer = Vec::with_capacity(self.width as usize * self.height as usize);
            for py in 0..self.height {
                for px in 0..self.width {
                    let (wx, wy) = self.bounds.to_world(
                        px as f64,
                        py as f64,
                        self.width as f64,
                        self.height as f64,
                    )?;
                    let intensity = field
                        .sample(wx, wy)
                        .unwrap_or_else(|fault: FieldFault| {
                            debug!("field fault absorbed: {fault}");
                            MAX_INTENSITY
                        });
                    buffer.push(intensity);
                }
            }
            self.raster = Some(buffer);
        }
        Ok(self.raster.as_deref().unwrap_or_default())
    }

    /// Colorize the cached raster and composite it onto the surface at the
    /// tile's pixel offset shifted by the live pan offset.
    pub fn blit(
        &self,
        surface: &mut dyn Surface,
        colormap: &ColorMap,
        pan: (i32, i32),
    ) -> Result<(), EngineError> {
        let raster = self
            .raster
            .as_ref()
            .ok_or(EngineError::NotMaterialized(self.offset_x, self.offset_y))?;
        let pixels: Vec<_> = raster.iter().map(|&v| colormap.lookup(v)).collect();
        surface.blit(
            &pixels,
            self.width,
            self.height,
            self.offset_x as i32 + pan.0,
            self.offset_y as i32 + pan.1,
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::colormap::Rgba;
    use crate::engine::field::FieldFault;
    use crate::engine::surface::SurfaceError;
    use std::cell::Cell;

    struct CountingField<'a> {
        calls: &'a Cell<usize>,
    }

    impl ScalarField for CountingField<'_> {
        fn sample(&self, _wx: f64, _wy: f64) -> Result<u16, FieldFault> {
            self.calls.set(self.calls.get() + 1);
            Ok(1)
        }
    }

    struct NullSurface {
        blits: usize,
        last_pos: (i32, i32),
    }

    impl Surface for NullSurface {
        fn size(&self) -> (u32, u32) {
            (64, 64)
        }
        fn clear(&mut self, _color: Rgba) {}
        fn blit(&mut self, _pixels: &[Rgba], _width: u32, _height: u32, x: i32, y: i32) {
            self.blits += 1;
            self.last_pos = (x, y);
        }
        fn set_overlay(&mut self, _top: String, _bottom: String) {}
        fn cell_to_pixel(&self, col: u16, row: u16) -> (i32, i32) {
            (col as i32, row as i32)
        }
        fn handle_resize(&mut self, _cols: u16, _rows: u16) -> (u32, u32) {
            (64, 64)
        }
        fn set_fullscreen(&mut self, _on: bool) -> Result<(), SurfaceError> {
            Ok(())
        }
        fn present(&mut self) -> Result<(), SurfaceError> {
            Ok(())
        }
    }

    fn unit_tile() -> Tile {
        let bounds = Rect::new((-1.0, 1.0), (1.0, -1.0)).unwrap();
        Tile::new(bounds, 4, 4, 8, 12)
    }

    #[test]
    fn test_materialize_samples_once_per_pixel() {
        let calls = Cell::new(0);
        let field = CountingField { calls: &calls };
        let mut tile = unit_tile();

        tile.materialize(&field).unwrap();
        assert_eq!(calls.get(), 16);

        // Second call is a pure cache hit.
        tile.materialize(&field).unwrap();
        assert_eq!(calls.get(), 16);
        assert!(tile.is_materialized());
    }

    #[test]
    fn test_materialize_maps_through_own_bounds() {
        let bounds = Rect::new((10.0, 20.0), (14.0, 16.0)).unwrap();
        let mut tile = Tile::new(bounds, 2, 2, 0, 0);
        // Record the sampled coordinates via a closure field.
        let raster = tile
            .materialize(&|wx: f64, wy: f64| {
                assert!((10.0..14.0).contains(&wx), "wx {wx} outside tile bounds");
                assert!((16.0..=20.0).contains(&wy), "wy {wy} outside tile bounds");
                (wx + wy) as u16
            })
            .unwrap();
        assert_eq!(raster.len(), 4);
    }

    #[test]
    fn test_field_fault_maps_to_sentinel() {
        let mut tile = unit_tile();
        struct FaultyField;
        impl ScalarField for FaultyField {
            fn sample(&self, wx: f64, wy: f64) -> Result<u16, FieldFault> {
                Err(FieldFault {
                    x: wx,
                    y: wy,
                    reason: "overflow".into(),
                })
            }
        }
        let raster = tile.materialize(&FaultyField).unwrap();
        assert!(raster.iter().all(|&v| v == MAX_INTENSITY));
    }

    #[test]
    fn test_blit_before_materialize_fails() {
        let tile = unit_tile();
        let mut surface = NullSurface {
            blits: 0,
            last_pos: (0, 0),
        };
        let result = tile.blit(&mut surface, &ColorMap::grayscale(), (0, 0));
        assert_eq!(result, Err(EngineError::NotMaterialized(8, 12)));
        assert_eq!(surface.blits, 0);
    }

    #[test]
    fn test_blit_applies_pan_offset() {
        let mut tile = unit_tile();
        tile.materialize(&|_: f64, _: f64| 1u16).unwrap();
        let mut surface = NullSurface {
            blits: 0,
            last_pos: (0, 0),
        };
        tile.blit(&mut surface, &ColorMap::grayscale(), (-3, 5))
            .unwrap();
        assert_eq!(surface.blits, 1);
        assert_eq!(surface.last_pos, (5, 17));
    }
}
