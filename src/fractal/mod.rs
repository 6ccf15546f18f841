//! Built-in escape-time fields.
//!
//! The engine treats the pixel function as an opaque contract; this module
//! is the host-side supplier of the canonical one.

use crate::engine::config::FractalConfig;
use crate::engine::field::{FieldFault, ScalarField, INTERIOR, MAX_INTENSITY};

/// Classic `z <- z^2 + c` escape-time iteration.
///
/// Interior points (never escaped within the budget) map to the interior
/// sentinel. Escapes map onto `[1, 254]`, brighter for faster escapes, so
/// both colormap sentinels stay reserved. Overflow to a non-finite value
/// is caught internally and counts as an immediate escape.
#[derive(Debug, Clone)]
pub struct Mandelbrot {
    max_iterations: u32,
    escape_radius_sq: f64,
}

impl Mandelbrot {
    pub fn new(config: &FractalConfig) -> Self {
        Self {
            max_iterations: config.max_iterations.max(1),
            escape_radius_sq: config.escape_radius * config.escape_radius,
        }
    }

    /// Scale an escape iteration onto the rotating palette range `[1, 254]`.
    fn escape_intensity(&self, iteration: u32) -> u16 {
        let span = (self.max_iterations - 1).max(1);
        let inverted = span - iteration.min(span);
        (1 + inverted * 253 / span) as u16
    }
}

impl ScalarField for Mandelbrot {
    fn sample(&self, wx: f64, wy: f64) -> Result<u16, FieldFault> {
        let (cx, cy) = (wx, wy);
        let (mut zx, mut zy) = (cx, cy);
        for k in 0..self.max_iterations {
            let x2 = zx * zx;
            let y2 = zy * zy;
            let mag_sq = x2 + y2;
            if !mag_sq.is_finite() {
                // Overflow: the orbit left the plane, treat as escaped.
                return Ok(MAX_INTENSITY);
            }
            if mag_sq > self.escape_radius_sq {
                return Ok(self.escape_intensity(k));
            }
            zy = 2.0 * zx * zy + cy;
            zx = x2 - y2 + cx;
        }
        Ok(INTERIOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> Mandelbrot {
        Mandelbrot::new(&FractalConfig::default())
    }

    #[test]
    fn test_origin_is_interior() {
        assert_eq!(field().sample(0.0, 0.0), Ok(INTERIOR));
    }

    #[test]
    fn test_far_point_escapes_bright() {
        // c far outside the set escapes on the first check.
        let intensity = field().sample(50.0, 50.0).unwrap();
        assert!(intensity >= 200, "expected fast escape, got {intensity}");
    }

    #[test]
    fn test_intensity_stays_off_sentinels_for_normal_escapes() {
        let f = field();
        for &(x, y) in &[(0.5, 0.5), (-1.5, 0.8), (0.3, 0.6), (2.0, 0.0)] {
            let v = f.sample(x, y).unwrap();
            if v != INTERIOR {
                assert!((1..=254).contains(&v), "({x}, {y}) -> {v}");
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let f = field();
        assert_eq!(f.sample(0.3, -0.7), f.sample(0.3, -0.7));
    }

    #[test]
    fn test_escape_intensity_monotone() {
        let f = Mandelbrot::new(&FractalConfig {
            max_iterations: 30,
            escape_radius: 100.0,
        });
        // Faster escapes are brighter.
        assert!(f.escape_intensity(0) > f.escape_intensity(10));
        assert!(f.escape_intensity(10) > f.escape_intensity(29));
        assert_eq!(f.escape_intensity(0), 254);
        assert_eq!(f.escape_intensity(29), 1);
    }

    #[test]
    fn test_single_iteration_budget() {
        // max_iterations = 1 must not divide by zero or underflow.
        let f = Mandelbrot::new(&FractalConfig {
            max_iterations: 1,
            escape_radius: 2.0,
        });
        assert_eq!(f.sample(10.0, 10.0).unwrap(), 254);
        assert_eq!(f.sample(0.0, 0.0).unwrap(), INTERIOR);
    }
}
