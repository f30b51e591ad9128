pub mod controller;
pub mod global;

pub use controller::{CursorController, PositionHandle, DEFAULT_REPEAT};
pub use global::{global, install_global, GlobalController, SharedDriver};
