#[derive(Debug, PartialEq, Clone, Copy)]
pub enum AppMode {
    Running,
    Quit,
}
