use caret_common::error::Result;
use caret_common::traits::TerminalDriver;
use caret_common::types::Point;
use crossterm::{
    cursor::{self, MoveDown, MoveLeft, MoveRight, MoveTo, MoveUp},
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};

/// `TerminalDriver` backed by crossterm on stdout.
///
/// crossterm works in 0-based coordinates; this driver converts to and
/// from the 1-based form the trait uses.
pub struct CrosstermDriver {
    out: io::Stdout,
}

impl CrosstermDriver {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for CrosstermDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalDriver for CrosstermDriver {
    fn get_cursor_position(&mut self) -> Result<Point> {
        self.out.flush()?;
        let (col, row) = cursor::position()?;
        Ok(Point::new(col, row).to_one_based())
    }

    fn move_cursor(&mut self, position: Point) -> Result<()> {
        let target = position.to_zero_based();
        queue!(self.out, MoveTo(target.x, target.y))?;
        Ok(())
    }

    fn move_cursor_up(&mut self, n: u16) -> Result<()> {
        queue!(self.out, MoveUp(n))?;
        Ok(())
    }

    fn move_cursor_left(&mut self, n: u16) -> Result<()> {
        queue!(self.out, MoveLeft(n))?;
        Ok(())
    }

    fn move_cursor_down(&mut self, n: u16) -> Result<()> {
        queue!(self.out, MoveDown(n))?;
        Ok(())
    }

    fn move_cursor_right(&mut self, n: u16) -> Result<()> {
        queue!(self.out, MoveRight(n))?;
        Ok(())
    }

    fn delete_characters(&mut self, n: u16) -> Result<()> {
        // crossterm has no DCH command
        if n > 0 {
            queue!(self.out, Print(format!("\x1b[{}P", n)))?;
        }
        Ok(())
    }

    fn clear_screen(&mut self) -> Result<()> {
        queue!(self.out, Clear(ClearType::All))?;
        Ok(())
    }

    fn clear_in_front(&mut self) -> Result<()> {
        queue!(self.out, Clear(ClearType::FromCursorDown))?;
        Ok(())
    }

    fn clear_behind(&mut self) -> Result<()> {
        queue!(self.out, Clear(ClearType::FromCursorUp))?;
        Ok(())
    }

    fn clear_row(&mut self) -> Result<()> {
        queue!(self.out, Clear(ClearType::CurrentLine))?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}
