/// Keys the viewer reacts to.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Key {
    /// Stop the session.
    Escape,
    /// Zoom in.
    Up,
    /// Zoom out.
    Down,
    /// Toggle fullscreen presentation (handled by the presentation layer).
    Enter,
}

/// Input events, decoupled from any particular backend.
///
/// Mouse positions are in surface pixel coordinates; the presentation
/// layer translates from terminal cells before events reach the engine.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum InputEvent {
    Quit,
    KeyDown(Key),
    MouseDown(i32, i32),
    MouseUp(i32, i32),
    MouseMove(i32, i32),
}
