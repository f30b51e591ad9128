use caret_common::error::{CaretError, Result};
use caret_common::traits::TerminalDriver;
use caret_common::types::{ClearMode, Point};
use tracing::trace;

/// One call received by a [`RecordingDriver`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverCall {
    GetCursorPosition,
    MoveCursor(Point),
    MoveUp(u16),
    MoveLeft(u16),
    MoveDown(u16),
    MoveRight(u16),
    DeleteCharacters(u16),
    Clear(ClearMode),
    Flush,
}

/// In-memory terminal that tracks a 1-based cursor and records calls.
///
/// The cursor never goes above or left of `(1, 1)`; there is no lower or
/// right edge.
#[derive(Debug, Clone)]
pub struct RecordingDriver {
    position: Point,
    calls: Vec<DriverCall>,
    pending_failure: Option<String>,
}

impl RecordingDriver {
    /// Start with the cursor in the top-left cell
    pub fn new() -> Self {
        Self::at(Point::new(1, 1))
    }

    /// Start with the cursor at a 1-based position
    pub fn at(position: Point) -> Self {
        Self {
            position: Self::clamp(position),
            calls: Vec::new(),
            pending_failure: None,
        }
    }

    /// Current 1-based cursor position, without recording a call
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn calls(&self) -> &[DriverCall] {
        &self.calls
    }

    /// Return and forget the recorded calls
    pub fn take_calls(&mut self) -> Vec<DriverCall> {
        std::mem::take(&mut self.calls)
    }

    /// Make the next call fail with [`CaretError::Driver`]
    pub fn fail_next(&mut self, message: impl Into<String>) {
        self.pending_failure = Some(message.into());
    }

    fn clamp(position: Point) -> Point {
        Point::new(position.x.max(1), position.y.max(1))
    }

    fn record(&mut self, call: DriverCall) -> Result<()> {
        if let Some(message) = self.pending_failure.take() {
            trace!("Failing {:?}: {}", call, message);
            return Err(CaretError::Driver(message));
        }
        trace!("Recording {:?}", call);
        self.calls.push(call);
        Ok(())
    }
}

impl Default for RecordingDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalDriver for RecordingDriver {
    fn get_cursor_position(&mut self) -> Result<Point> {
        self.record(DriverCall::GetCursorPosition)?;
        Ok(self.position)
    }

    fn move_cursor(&mut self, position: Point) -> Result<()> {
        self.record(DriverCall::MoveCursor(position))?;
        self.position = Self::clamp(position);
        Ok(())
    }

    fn move_cursor_up(&mut self, n: u16) -> Result<()> {
        self.record(DriverCall::MoveUp(n))?;
        self.position.y = self.position.y.saturating_sub(n).max(1);
        Ok(())
    }

    fn move_cursor_left(&mut self, n: u16) -> Result<()> {
        self.record(DriverCall::MoveLeft(n))?;
        self.position.x = self.position.x.saturating_sub(n).max(1);
        Ok(())
    }

    fn move_cursor_down(&mut self, n: u16) -> Result<()> {
        self.record(DriverCall::MoveDown(n))?;
        self.position.y = self.position.y.saturating_add(n);
        Ok(())
    }

    fn move_cursor_right(&mut self, n: u16) -> Result<()> {
        self.record(DriverCall::MoveRight(n))?;
        self.position.x = self.position.x.saturating_add(n);
        Ok(())
    }

    fn delete_characters(&mut self, n: u16) -> Result<()> {
        self.record(DriverCall::DeleteCharacters(n))
    }

    fn clear_screen(&mut self) -> Result<()> {
        self.record(DriverCall::Clear(ClearMode::All))
    }

    fn clear_in_front(&mut self) -> Result<()> {
        self.record(DriverCall::Clear(ClearMode::FromCursorDown))
    }

    fn clear_behind(&mut self) -> Result<()> {
        self.record(DriverCall::Clear(ClearMode::FromCursorUp))
    }

    fn clear_row(&mut self) -> Result<()> {
        self.record(DriverCall::Clear(ClearMode::CurrentLine))
    }

    fn flush(&mut self) -> Result<()> {
        self.record(DriverCall::Flush)
    }
}
