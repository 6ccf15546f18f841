//! The pixel function contract.
//!
//! A scalar field is the pluggable "what to draw" half of the engine: given
//! a world coordinate it returns a bounded intensity. Implementations must
//! be pure and deterministic so that cached tile rasters stay valid for as
//! long as the tile's world bounds do.

use thiserror::Error;

/// Highest intensity a field may produce; also the conventional "escaped"
/// colormap sentinel.
pub const MAX_INTENSITY: u16 = 255;

/// Intensity reserved for points inside the set (never escaped); the
/// conventional "interior" colormap sentinel.
pub const INTERIOR: u16 = 0;

/// Signalled by a field when its internal arithmetic faults (e.g. overflow
/// to a non-finite value). Tiles catch this at the sampling boundary and
/// substitute a sentinel intensity; it never escapes a materialization.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("pixel function fault at ({x}, {y}): {reason}")]
pub struct FieldFault {
    pub x: f64,
    pub y: f64,
    pub reason: String,
}

/// A pure scalar function over the world plane.
pub trait ScalarField {
    /// Sample the field at a world coordinate.
    ///
    /// Must be total over the plane: numeric trouble is either mapped to a
    /// sentinel intensity internally or reported as a `FieldFault`, never
    /// panicked on. Output is clamped by consumers to the colormap range.
    fn sample(&self, wx: f64, wy: f64) -> Result<u16, FieldFault>;
}

/// Blanket impl so plain closures work as fields in tests and simple hosts.
impl<F> ScalarField for F
where
    F: Fn(f64, f64) -> u16,
{
    fn sample(&self, wx: f64, wy: f64) -> Result<u16, FieldFault> {
        Ok(self(wx, wy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_as_field() {
        let field = |x: f64, y: f64| (x + y) as u16;
        assert_eq!(field.sample(1.0, 2.0), Ok(3));
    }

    #[test]
    fn test_trait_object_safety() {
        let field = |_: f64, _: f64| 7u16;
        let boxed: Box<dyn ScalarField> = Box::new(field);
        assert_eq!(boxed.sample(0.0, 0.0), Ok(7));
    }
}
