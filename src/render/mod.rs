//! Presentation backends implementing the engine's `Surface` contract.

pub mod capability;
pub mod cell;
pub mod framebuffer;
pub mod kitty;

pub use capability::{CapabilityDetector, GraphicsCapability};
pub use cell::CellSurface;
pub use framebuffer::FrameBuffer;
pub use kitty::KittySurface;
