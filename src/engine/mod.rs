//! The tile engine: lazy, progressive rendering of a scalar field over a
//! pannable, zoomable world window.

pub mod colormap;
pub mod config;
pub mod error;
pub mod field;
pub mod geometry;
pub mod grid;
pub mod queue;
pub mod surface;
pub mod tile;
pub mod viewport;

pub use colormap::{ColorMap, ColorMapError, Rgba};
pub use config::{Config, DisplayConfig, FractalConfig, GridConfig};
pub use error::EngineError;
pub use field::{FieldFault, ScalarField, INTERIOR, MAX_INTENSITY};
pub use geometry::Rect;
pub use grid::TileGrid;
pub use queue::{QueueState, RenderQueue};
pub use surface::{Surface, SurfaceError};
pub use tile::Tile;
pub use viewport::{Viewport, ZoomDirection};
