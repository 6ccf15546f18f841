// Configuration for the fractile engine and presentation layer.
// Defaults follow the original viewer: 640x400 at 30 fps, 16x16 grid.

use std::env;

/// Presentation configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayConfig {
    /// Framebuffer width in pixels (graphics backends; cell backends size
    /// themselves from the terminal).
    pub width: u32,
    /// Framebuffer height in pixels.
    pub height: u32,
    /// Target frame rate (default 30).
    pub fps: u32,
    /// Start in fullscreen presentation mode.
    pub fullscreen: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 400,
            fps: 30,
            fullscreen: false,
        }
    }
}

/// Tile subdivision factors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    pub cols: u32,
    pub rows: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { cols: 16, rows: 16 }
    }
}

/// Escape-time iteration parameters for the built-in field.
#[derive(Debug, Clone, PartialEq)]
pub struct FractalConfig {
    /// Iteration budget before a point counts as interior (default 30).
    pub max_iterations: u32,
    /// Escape radius; |z| beyond this counts as escaped (default 100).
    pub escape_radius: f64,
}

impl Default for FractalConfig {
    fn default() -> Self {
        Self {
            max_iterations: 30,
            escape_radius: 100.0,
        }
    }
}

/// Master configuration combining all fractile settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub display: DisplayConfig,
    pub grid: GridConfig,
    pub fractal: FractalConfig,
}

impl Config {
    /// Defaults overridden by `FRACTILE_*` environment variables.
    /// Unparsable values fall back silently to the default.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(v) = env_u32("FRACTILE_WIDTH") {
            config.display.width = v.max(1);
        }
        if let Some(v) = env_u32("FRACTILE_HEIGHT") {
            config.display.height = v.max(1);
        }
        if let Some(v) = env_u32("FRACTILE_FPS") {
            config.display.fps = v.clamp(1, 240);
        }
        if let Ok(v) = env::var("FRACTILE_FULLSCREEN") {
            config.display.fullscreen = v == "1" || v.eq_ignore_ascii_case("true");
        }
        if let Some(v) = env_u32("FRACTILE_GRID_COLS") {
            config.grid.cols = v.max(1);
        }
        if let Some(v) = env_u32("FRACTILE_GRID_ROWS") {
            config.grid.rows = v.max(1);
        }
        if let Some(v) = env_u32("FRACTILE_MAX_ITERATIONS") {
            config.fractal.max_iterations = v.max(1);
        }
        config
    }
}

fn env_u32(name: &str) -> Option<u32> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.display.width, 640);
        assert_eq!(config.display.height, 400);
        assert_eq!(config.display.fps, 30);
        assert!(!config.display.fullscreen);
        assert_eq!(config.grid.cols, 16);
        assert_eq!(config.grid.rows, 16);
        assert_eq!(config.fractal.max_iterations, 30);
    }
}
