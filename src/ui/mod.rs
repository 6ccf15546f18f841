pub mod terminal;

pub use terminal::TuiManager;
