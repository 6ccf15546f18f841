use thiserror::Error;

/// Errors raised by the tile engine.
///
/// `InvalidBounds` is fatal to the operation that produced it and must be
/// rejected before the bad rectangle is used anywhere. `NotMaterialized`
/// indicates a caller tried to blit a tile before computing it, which the
/// render queue ordering normally makes impossible.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("invalid world bounds: {0}")]
    InvalidBounds(String),

    #[error("tile at pixel offset ({0}, {1}) blitted before materialization")]
    NotMaterialized(u32, u32),
}
