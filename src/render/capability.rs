//! Terminal capability detection for graphics protocol support.
//!
//! Detects whether the terminal can take Kitty Graphics Protocol frames
//! and falls back to half-block cell rendering when it cannot.

use std::env;

/// Graphics protocol support levels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GraphicsCapability {
    /// No graphics support - use the half-block cell fallback.
    None,
    /// Kitty Graphics Protocol supported.
    Kitty,
}

impl GraphicsCapability {
    /// Returns true if the terminal supports pixel-perfect graphics.
    pub fn supports_graphics(&self) -> bool {
        matches!(self, GraphicsCapability::Kitty)
    }
}

/// Environment-based capability detector.
pub struct CapabilityDetector;

impl CapabilityDetector {
    pub fn new() -> Self {
        Self
    }

    /// Detect terminal graphics capability.
    ///
    /// `FRACTILE_FORCE_TUI` / `FRACTILE_FORCE_KITTY` override detection;
    /// otherwise `$TERM` and `$TERM_PROGRAM` are consulted. Unknown
    /// terminals get the cell fallback.
    pub fn detect(&self) -> GraphicsCapability {
        if env::var("FRACTILE_FORCE_TUI").is_ok() {
            return GraphicsCapability::None;
        }
        if env::var("FRACTILE_FORCE_KITTY").is_ok() {
            return GraphicsCapability::Kitty;
        }
        self.detect_from_env().unwrap_or(GraphicsCapability::None)
    }

    fn detect_from_env(&self) -> Option<GraphicsCapability> {
        if let Ok(term) = env::var("TERM") {
            let term_lower = term.to_lowercase();
            // Kitty itself, and Konsole which speaks the same protocol.
            if term_lower.contains("kitty") || term_lower.contains("konsole") {
                return Some(GraphicsCapability::Kitty);
            }
        }
        if let Ok(term_program) = env::var("TERM_PROGRAM") {
            if term_program.to_lowercase().contains("kitty") {
                return Some(GraphicsCapability::Kitty);
            }
        }
        None
    }
}

impl Default for CapabilityDetector {
    fn default() -> Self {
        Self::new()
    }
}
