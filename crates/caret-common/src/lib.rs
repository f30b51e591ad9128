pub mod error;
pub mod traits;
pub mod types;

pub use error::{CaretError, Result};
pub use traits::TerminalDriver;
pub use types::{ClearMode, Point};
