//! [`TerminalDriver`](caret_common::traits::TerminalDriver) implementations.
//!
//! - [`AnsiDriver`] talks to a real terminal through escape sequences
//! - [`RecordingDriver`] models a terminal in memory and logs every call

pub mod ansi;
pub mod recording;

pub use ansi::AnsiDriver;
pub use recording::{DriverCall, RecordingDriver};
