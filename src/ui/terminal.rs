//! Terminal session management and the main frame loop.
//!
//! One `tick` per frame: input is processed first, then the render queue
//! steps, then compositing, then presentation, so drag feedback lands in
//! the same frame as the motion that caused it. Any fault inside a frame
//! is logged and swallowed; a malfunctioning frame degrades gracefully
//! instead of terminating the viewer.

use crate::app::{App, AppMode, InputEvent, Key};
use crate::engine::config::Config;
use crate::engine::surface::Surface;
use crate::render::{CapabilityDetector, CellSurface, GraphicsCapability, KittySurface};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEventKind,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{cursor, execute};
use log::{info, warn};
use std::error::Error;
use std::io;
use std::time::{Duration, Instant};

pub struct TuiManager {
    surface: Box<dyn Surface>,
    fps_target: u32,
    fullscreen: bool,
}

impl TuiManager {
    /// Enter raw mode and the alternate screen, pick a presentation
    /// backend from the terminal's capabilities, and capture the mouse.
    pub fn new(config: &Config) -> Result<Self, io::Error> {
        enable_raw_mode()?;
        execute!(
            io::stdout(),
            EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;

        let capability = CapabilityDetector::new().detect();
        info!("terminal graphics capability: {:?}", capability);
        let surface: Box<dyn Surface> = match capability {
            GraphicsCapability::Kitty => Box::new(
                KittySurface::new(config.display.width, config.display.height)
                    .map_err(|e| io::Error::other(e.to_string()))?,
            ),
            GraphicsCapability::None => {
                Box::new(CellSurface::new().map_err(|e| io::Error::other(e.to_string()))?)
            }
        };

        let mut manager = TuiManager {
            surface,
            fps_target: config.display.fps.max(1),
            fullscreen: false,
        };
        if config.display.fullscreen {
            manager.toggle_fullscreen();
        }
        Ok(manager)
    }

    /// Pixel size of the active surface; the viewport is built over this.
    pub fn surface_size(&self) -> (u32, u32) {
        self.surface.size()
    }

    pub fn run_event_loop(&mut self, app: &mut App) -> io::Result<()> {
        let frame_budget = Duration::from_millis(1000 / self.fps_target as u64);
        let mut last_tick = Instant::now();
        let mut playtime = 0.0f64;
        let mut measured_fps = 0.0f64;

        while app.mode() != AppMode::Quit {
            let timeout = frame_budget.saturating_sub(last_tick.elapsed());
            if event::poll(timeout)? {
                self.dispatch_event(event::read()?, app);
            }

            if last_tick.elapsed() >= frame_budget {
                let dt = last_tick.elapsed().as_secs_f64();
                last_tick = Instant::now();
                playtime += dt;
                measured_fps = if measured_fps == 0.0 {
                    1.0 / dt
                } else {
                    measured_fps * 0.9 + 0.1 / dt
                };

                // Availability over strict reporting: a bad frame is
                // logged and the loop moves on.
                if let Err(e) = self.frame(app, measured_fps, playtime) {
                    warn!("frame fault: {e}");
                }
            }
        }
        Ok(())
    }

    /// Translate one backend event and feed it to the app. The fullscreen
    /// toggle never reaches the engine; it is a presentation concern.
    fn dispatch_event(&mut self, raw: Event, app: &mut App) {
        let translated = match raw {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Esc => Some(InputEvent::Quit),
                KeyCode::Up => Some(InputEvent::KeyDown(Key::Up)),
                KeyCode::Down => Some(InputEvent::KeyDown(Key::Down)),
                KeyCode::Enter => {
                    self.toggle_fullscreen();
                    Some(InputEvent::KeyDown(Key::Enter))
                }
                _ => None,
            },
            Event::Mouse(mouse) => {
                let (x, y) = self.surface.cell_to_pixel(mouse.column, mouse.row);
                match mouse.kind {
                    MouseEventKind::Down(MouseButton::Left) => Some(InputEvent::MouseDown(x, y)),
                    MouseEventKind::Drag(MouseButton::Left) => Some(InputEvent::MouseMove(x, y)),
                    MouseEventKind::Up(MouseButton::Left) => Some(InputEvent::MouseUp(x, y)),
                    _ => None,
                }
            }
            Event::Resize(cols, rows) => {
                let (width, height) = self.surface.handle_resize(cols, rows);
                if let Err(e) = app.handle_resize(width, height) {
                    warn!("resize fault: {e}");
                }
                None
            }
            _ => None,
        };

        if let Some(event) = translated {
            if let Err(e) = app.handle_input(event) {
                warn!("input fault: {e}");
            }
        }
    }

    fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
        if let Err(e) = self.surface.set_fullscreen(self.fullscreen) {
            warn!("fullscreen toggle failed: {e}");
        }
    }

    fn frame(&mut self, app: &mut App, fps: f64, playtime: f64) -> Result<(), Box<dyn Error>> {
        app.tick(self.surface.as_mut())?;

        let bounds = app.viewport().bounds();
        let (cx, cy) = app.viewport().drag_offset();
        let top = format!("FPS: {:6.1}  PLAYTIME: {:6.1} SECONDS", fps, playtime);
        let bottom = format!(
            "c: ({},{})  x: [{:.2},{:.2}]  y: [{:.2},{:.2}]",
            cx,
            cy,
            bounds.top_left().0,
            bounds.bottom_right().0,
            bounds.bottom_right().1,
            bounds.top_left().1,
        );
        self.surface.set_overlay(top, bottom);
        self.surface.present()?;
        Ok(())
    }
}

impl Drop for TuiManager {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            cursor::Show
        );
    }
}
