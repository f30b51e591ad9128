use crate::error::Result;
use crate::types::Point;

/// Low-level terminal capability consumed by the cursor controller.
///
/// All coordinates crossing this trait are **1-based**: `(1, 1)` is the
/// top-left cell. `get_cursor_position` reports in that form and
/// `move_cursor` expects it. Relative moves take plain counts; a count of
/// zero must leave the cursor where it is.
///
/// Errors are returned to the caller untouched, no retry is expected.
pub trait TerminalDriver {
    /// Query the hardware cursor location
    fn get_cursor_position(&mut self) -> Result<Point>;

    /// Move to an absolute location
    fn move_cursor(&mut self, position: Point) -> Result<()>;

    fn move_cursor_up(&mut self, n: u16) -> Result<()>;

    fn move_cursor_left(&mut self, n: u16) -> Result<()>;

    fn move_cursor_down(&mut self, n: u16) -> Result<()>;

    fn move_cursor_right(&mut self, n: u16) -> Result<()>;

    /// Delete `n` characters at the cursor, shifting the rest of the row left
    fn delete_characters(&mut self, n: u16) -> Result<()>;

    /// Erase the whole screen
    fn clear_screen(&mut self) -> Result<()>;

    /// Erase from the cursor to the end of the screen
    fn clear_in_front(&mut self) -> Result<()>;

    /// Erase from the start of the screen to the cursor
    fn clear_behind(&mut self) -> Result<()>;

    /// Erase the row the cursor is on
    fn clear_row(&mut self) -> Result<()>;

    /// Push buffered output to the terminal
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<D: TerminalDriver + ?Sized> TerminalDriver for &mut D {
    fn get_cursor_position(&mut self) -> Result<Point> {
        (**self).get_cursor_position()
    }

    fn move_cursor(&mut self, position: Point) -> Result<()> {
        (**self).move_cursor(position)
    }

    fn move_cursor_up(&mut self, n: u16) -> Result<()> {
        (**self).move_cursor_up(n)
    }

    fn move_cursor_left(&mut self, n: u16) -> Result<()> {
        (**self).move_cursor_left(n)
    }

    fn move_cursor_down(&mut self, n: u16) -> Result<()> {
        (**self).move_cursor_down(n)
    }

    fn move_cursor_right(&mut self, n: u16) -> Result<()> {
        (**self).move_cursor_right(n)
    }

    fn delete_characters(&mut self, n: u16) -> Result<()> {
        (**self).delete_characters(n)
    }

    fn clear_screen(&mut self) -> Result<()> {
        (**self).clear_screen()
    }

    fn clear_in_front(&mut self) -> Result<()> {
        (**self).clear_in_front()
    }

    fn clear_behind(&mut self) -> Result<()> {
        (**self).clear_behind()
    }

    fn clear_row(&mut self) -> Result<()> {
        (**self).clear_row()
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}

impl<D: TerminalDriver + ?Sized> TerminalDriver for Box<D> {
    fn get_cursor_position(&mut self) -> Result<Point> {
        (**self).get_cursor_position()
    }

    fn move_cursor(&mut self, position: Point) -> Result<()> {
        (**self).move_cursor(position)
    }

    fn move_cursor_up(&mut self, n: u16) -> Result<()> {
        (**self).move_cursor_up(n)
    }

    fn move_cursor_left(&mut self, n: u16) -> Result<()> {
        (**self).move_cursor_left(n)
    }

    fn move_cursor_down(&mut self, n: u16) -> Result<()> {
        (**self).move_cursor_down(n)
    }

    fn move_cursor_right(&mut self, n: u16) -> Result<()> {
        (**self).move_cursor_right(n)
    }

    fn delete_characters(&mut self, n: u16) -> Result<()> {
        (**self).delete_characters(n)
    }

    fn clear_screen(&mut self) -> Result<()> {
        (**self).clear_screen()
    }

    fn clear_in_front(&mut self) -> Result<()> {
        (**self).clear_in_front()
    }

    fn clear_behind(&mut self) -> Result<()> {
        (**self).clear_behind()
    }

    fn clear_row(&mut self) -> Result<()> {
        (**self).clear_row()
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}
