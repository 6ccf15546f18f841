pub mod app;
pub mod event;
pub mod mode;

pub use app::App;
pub use event::{InputEvent, Key};
pub use mode::AppMode;
