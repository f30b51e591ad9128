use caret_common::error::{CaretError, Result};
use caret_common::traits::TerminalDriver;
use caret_common::types::{ClearMode, Point};
use caret_parser::{Reply, ReplyParser};
use std::io::{self, Read, Write};
use tracing::{debug, trace, warn};

/// Device Status Report: asks the terminal for a cursor position report
const REQUEST_CURSOR_POSITION: &[u8] = b"\x1b[6n";

/// Give up on a position report after this many bytes of unrelated input
const MAX_REPLY_BYTES: usize = 4096;

/// Driver that writes ANSI/VT100 control sequences to `output` and reads
/// cursor position reports from `input`.
///
/// Querying the position only works when the terminal delivers its reply
/// unbuffered, i.e. with the tty in raw mode. Setting that up is the
/// caller's job.
pub struct AnsiDriver<R, W> {
    input: R,
    output: W,
    parser: ReplyParser,
}

impl AnsiDriver<io::Stdin, io::Stdout> {
    /// Driver for the process's controlling terminal
    pub fn stdio() -> Self {
        Self::new(io::stdin(), io::stdout())
    }
}

impl<R: Read, W: Write> AnsiDriver<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            parser: ReplyParser::new(),
        }
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }

    fn csi(&mut self, n: u16, action: char) -> Result<()> {
        trace!("CSI {}{}", n, action);
        write!(self.output, "\x1b[{}{}", n, action)?;
        Ok(())
    }

    /// Relative moves with a zero count emit nothing: terminals read a CSI
    /// count of 0 as 1.
    fn relative(&mut self, n: u16, action: char) -> Result<()> {
        if n == 0 {
            return Ok(());
        }
        self.csi(n, action)
    }

    fn erase(&mut self, mode: ClearMode) -> Result<()> {
        match mode {
            ClearMode::FromCursorDown => self.csi(0, 'J'),
            ClearMode::FromCursorUp => self.csi(1, 'J'),
            ClearMode::All => self.csi(2, 'J'),
            ClearMode::CurrentLine => self.csi(2, 'K'),
        }
    }
}

impl<R: Read, W: Write> TerminalDriver for AnsiDriver<R, W> {
    fn get_cursor_position(&mut self) -> Result<Point> {
        self.output.write_all(REQUEST_CURSOR_POSITION)?;
        self.output.flush()?;

        // One byte at a time so input following the report stays unread
        let mut byte = [0u8; 1];
        let mut consumed = 0;
        while consumed < MAX_REPLY_BYTES {
            if self.input.read(&mut byte)? == 0 {
                return Err(CaretError::Driver(
                    "input closed before the terminal reported the cursor position".to_string(),
                ));
            }
            consumed += 1;

            for reply in self.parser.feed(&byte) {
                if let Reply::CursorPosition(position) = reply {
                    debug!("Terminal reported cursor at {}", position);
                    return Ok(position);
                }
            }
        }

        warn!("No cursor position report after {} bytes", consumed);
        Err(CaretError::Driver(format!(
            "no cursor position report within {} bytes of input",
            MAX_REPLY_BYTES
        )))
    }

    fn move_cursor(&mut self, position: Point) -> Result<()> {
        trace!("CUP {}", position);
        write!(self.output, "\x1b[{};{}H", position.y, position.x)?;
        Ok(())
    }

    fn move_cursor_up(&mut self, n: u16) -> Result<()> {
        self.relative(n, 'A')
    }

    fn move_cursor_left(&mut self, n: u16) -> Result<()> {
        self.relative(n, 'D')
    }

    fn move_cursor_down(&mut self, n: u16) -> Result<()> {
        self.relative(n, 'B')
    }

    fn move_cursor_right(&mut self, n: u16) -> Result<()> {
        self.relative(n, 'C')
    }

    fn delete_characters(&mut self, n: u16) -> Result<()> {
        self.relative(n, 'P')
    }

    fn clear_screen(&mut self) -> Result<()> {
        self.erase(ClearMode::All)
    }

    fn clear_in_front(&mut self) -> Result<()> {
        self.erase(ClearMode::FromCursorDown)
    }

    fn clear_behind(&mut self) -> Result<()> {
        self.erase(ClearMode::FromCursorUp)
    }

    fn clear_row(&mut self) -> Result<()> {
        self.erase(ClearMode::CurrentLine)
    }

    fn flush(&mut self) -> Result<()> {
        self.output.flush()?;
        Ok(())
    }
}
