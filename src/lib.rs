//! fractile - progressive tiled rendering of scalar fields in the
//! terminal.
//!
//! The `engine` module is the reusable core: viewport, tile grid, render
//! queue, and colormap. `fractal` supplies the built-in escape-time field,
//! `render` the presentation backends, and `app`/`ui` the interactive
//! session glue.

pub mod app;
pub mod engine;
pub mod fractal;
pub mod render;
pub mod ui;
