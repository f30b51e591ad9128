//! Cursor control and event notification for text-terminal UIs.
//!
//! - [`event::EventChannel`] delivers notifications from a sender to its
//!   subscribed handlers, synchronously and in subscription order.
//! - [`cursor::CursorController`] moves the cursor in 0-based coordinates
//!   over a [`TerminalDriver`] and keeps a list of saved positions.

pub mod cursor;
pub mod driver;
pub mod event;

pub use caret_common::error::{CaretError, Result};
pub use caret_common::traits::TerminalDriver;
pub use caret_common::types::{ClearMode, Point};
pub use cursor::{CursorController, PositionHandle};
pub use event::{EventChannel, SubscriptionId};
