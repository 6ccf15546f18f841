//! Palette mapping from field intensities to displayable colors.
//!
//! The two sentinel entries (index 0 for "interior", index N-1 for
//! "escaped") are fixed; everything between them rotates one slot per
//! `animate()` call, which cycles the on-screen colors every frame without
//! touching any tile's cached intensity buffer.

use lazy_static::lazy_static;
use std::path::Path;
use thiserror::Error;

/// One displayable color sample.
pub type Rgba = [u8; 4];

/// Minimum number of samples a palette must provide. Field intensities are
/// clamped to the palette range, so anything smaller than this flattens the
/// picture badly.
pub const MIN_PALETTE_LEN: usize = 256;

lazy_static! {
    /// Process-wide default palette, built once on first use. Index 0 is
    /// black (interior sentinel), index 255 is white (escaped sentinel).
    static ref GRAYSCALE: Vec<Rgba> = (0..=255u16)
        .map(|v| [v as u8, v as u8, v as u8, 255])
        .collect();
}

#[derive(Error, Debug)]
pub enum ColorMapError {
    #[error("palette needs at least {MIN_PALETTE_LEN} samples, got {0}")]
    TooFewSamples(usize),

    #[error("palette image error: {0}")]
    Image(String),
}

/// An ordered RGBA palette indexed by clamped field intensity.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMap {
    entries: Vec<Rgba>,
}

impl ColorMap {
    pub fn new(entries: Vec<Rgba>) -> Result<Self, ColorMapError> {
        if entries.len() < MIN_PALETTE_LEN {
            return Err(ColorMapError::TooFewSamples(entries.len()));
        }
        Ok(Self { entries })
    }

    /// The built-in black-to-white ramp.
    pub fn grayscale() -> Self {
        Self {
            entries: GRAYSCALE.clone(),
        }
    }

    /// Load a palette from an image file, reading pixels in row-major
    /// order. Images larger than 256 samples are resampled evenly down to
    /// 256 entries so intensity indices stay in a compact range.
    pub fn from_image<P: AsRef<Path>>(path: P) -> Result<Self, ColorMapError> {
        let image = imageproc::image::open(path.as_ref())
            .map_err(|e| ColorMapError::Image(e.to_string()))?
            .to_rgba8();
        let samples: Vec<Rgba> = image.pixels().map(|p| p.0).collect();
        if samples.len() < MIN_PALETTE_LEN {
            return Err(ColorMapError::TooFewSamples(samples.len()));
        }
        let entries = (0..MIN_PALETTE_LEN)
            .map(|i| samples[i * samples.len() / MIN_PALETTE_LEN])
            .collect();
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Map an intensity to a color, clamping to the palette range.
    pub fn lookup(&self, intensity: u16) -> Rgba {
        let idx = (intensity as usize).min(self.entries.len() - 1);
        self.entries[idx]
    }

    /// Rotate the interior slice left by one position. The sentinel entries
    /// at index 0 and N-1 never move.
    pub fn animate(&mut self) {
        let n = self.entries.len();
        if n > 3 {
            self.entries[1..n - 1].rotate_left(1);
        }
    }
}

impl Default for ColorMap {
    fn default() -> Self {
        Self::grayscale()
    }
}
