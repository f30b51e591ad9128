use caret_common::error::{CaretError, Result};
use caret_common::traits::TerminalDriver;
use caret_common::types::Point;
use std::fmt;
use tracing::{debug, instrument};

/// Repeat count relative moves conventionally use
pub const DEFAULT_REPEAT: u16 = 1;

/// Handle to a saved cursor position.
///
/// Handles are indices into the saved-position list and stay valid until
/// [`CursorController::clear_saved_positions`] is called.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PositionHandle(usize);

impl PositionHandle {
    /// Position of the saved entry in save order, starting at 0
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for PositionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Cursor movement in 0-based coordinates over a 1-based [`TerminalDriver`].
///
/// The current position is never cached; every query goes to the driver.
/// Every operation that moves the cursor returns where it was before the
/// move, so the result can be fed back into [`move_to`](Self::move_to) to
/// undo it.
pub struct CursorController<D> {
    driver: D,
    saved_positions: Vec<Point>,
}

impl<D: TerminalDriver> CursorController<D> {
    /// Wrap a driver. Pass `&mut driver` to keep ownership elsewhere.
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            saved_positions: Vec::new(),
        }
    }

    /// Current cursor position
    pub fn position(&mut self) -> Result<Point> {
        Ok(self.driver.get_cursor_position()?.to_zero_based())
    }

    /// Move to `position`, returning the previous position
    pub fn set_position(&mut self, position: Point) -> Result<Point> {
        self.move_to(position)
    }

    /// Move to an absolute position, returning the previous position
    #[instrument(skip(self))]
    pub fn move_to(&mut self, position: Point) -> Result<Point> {
        let previous = self.position()?;
        debug!("Moving cursor from {} to {}", previous, position);
        self.driver.move_cursor(position.to_one_based())?;
        Ok(previous)
    }

    /// Move cursor up by n rows, returning the previous position
    #[instrument(skip(self))]
    pub fn move_up(&mut self, n: u16) -> Result<Point> {
        let previous = self.position()?;
        if n > 0 {
            self.driver.move_cursor_up(n)?;
        }
        Ok(previous)
    }

    /// Move cursor left by n columns, returning the previous position
    #[instrument(skip(self))]
    pub fn move_left(&mut self, n: u16) -> Result<Point> {
        let previous = self.position()?;
        if n > 0 {
            self.driver.move_cursor_left(n)?;
        }
        Ok(previous)
    }

    /// Move cursor down by n rows, returning the previous position
    #[instrument(skip(self))]
    pub fn move_down(&mut self, n: u16) -> Result<Point> {
        let previous = self.position()?;
        if n > 0 {
            self.driver.move_cursor_down(n)?;
        }
        Ok(previous)
    }

    /// Move cursor right by n columns, returning the previous position
    #[instrument(skip(self))]
    pub fn move_right(&mut self, n: u16) -> Result<Point> {
        let previous = self.position()?;
        if n > 0 {
            self.driver.move_cursor_right(n)?;
        }
        Ok(previous)
    }

    /// Delete n characters at the cursor
    pub fn delete_characters(&mut self, n: u16) -> Result<()> {
        self.driver.delete_characters(n)
    }

    /// Erase the whole screen
    pub fn clear_screen(&mut self) -> Result<()> {
        self.driver.clear_screen()
    }

    /// Erase from the cursor to the end of the screen
    pub fn clear_in_front(&mut self) -> Result<()> {
        self.driver.clear_in_front()
    }

    /// Erase from the start of the screen up to the cursor
    pub fn clear_behind(&mut self) -> Result<()> {
        self.driver.clear_behind()
    }

    /// Erase the row the cursor is on
    pub fn clear_row(&mut self) -> Result<()> {
        self.driver.clear_row()
    }

    /// Remember the current position and return a handle to it
    #[instrument(skip(self))]
    pub fn save_current_position(&mut self) -> Result<PositionHandle> {
        let position = self.position()?;
        self.saved_positions.push(position);
        let handle = PositionHandle(self.saved_positions.len() - 1);
        debug!("Saved cursor position {} as {}", position, handle);
        Ok(handle)
    }

    /// Move back to a saved position, returning the position before the move.
    ///
    /// Fails with [`CaretError::InvalidHandle`] without touching the cursor
    /// if `handle` is not in the saved list.
    #[instrument(skip(self))]
    pub fn retrieve_position(&mut self, handle: PositionHandle) -> Result<Point> {
        let target = self.saved_position(handle).ok_or(CaretError::InvalidHandle {
            handle: handle.index(),
            len: self.saved_positions.len(),
        })?;
        self.move_to(target)
    }

    /// Look up a saved position without moving
    pub fn saved_position(&self, handle: PositionHandle) -> Option<Point> {
        self.saved_positions.get(handle.index()).copied()
    }

    /// Number of saved positions
    pub fn saved_count(&self) -> usize {
        self.saved_positions.len()
    }

    /// Forget every saved position; outstanding handles become invalid
    pub fn clear_saved_positions(&mut self) {
        debug!("Clearing {} saved positions", self.saved_positions.len());
        self.saved_positions.clear();
    }

    /// Push buffered driver output to the terminal
    pub fn flush(&mut self) -> Result<()> {
        self.driver.flush()
    }

    /// Borrow the underlying driver
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Mutably borrow the underlying driver
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Swap in a new driver, keeping saved positions
    pub fn replace_driver(&mut self, driver: D) -> D {
        std::mem::replace(&mut self.driver, driver)
    }

    /// Unwrap the controller, returning its driver
    pub fn into_driver(self) -> D {
        self.driver
    }
}
