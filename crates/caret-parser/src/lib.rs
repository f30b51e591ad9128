use caret_common::types::Point;
use tracing::trace;
use vte::{Params, Parser, Perform};

/// Something the terminal sent back on its input stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    /// Cursor Position Report (`ESC [ row ; col R`), 1-based as reported
    CursorPosition(Point),
    /// Any other input: typed characters, unrelated escape sequences
    Other,
}

/// Incremental parser for terminal replies.
///
/// Partial sequences are kept between calls to [`ReplyParser::feed`], so a
/// report split across two reads still decodes.
pub struct ReplyParser {
    parser: Parser,
    performer: ReplyPerformer,
}

impl ReplyParser {
    pub fn new() -> Self {
        Self {
            parser: Parser::new(),
            performer: ReplyPerformer::default(),
        }
    }

    /// Feed raw bytes and collect every reply they complete
    pub fn feed(&mut self, data: &[u8]) -> Vec<Reply> {
        for &byte in data {
            self.parser.advance(&mut self.performer, byte);
        }
        std::mem::take(&mut self.performer.replies)
    }
}

impl Default for ReplyParser {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Default)]
struct ReplyPerformer {
    replies: Vec<Reply>,
}

impl ReplyPerformer {
    /// ANSI default-parameter rule: missing or zero means 1
    fn param(params: &Params, index: usize) -> u16 {
        params
            .iter()
            .nth(index)
            .and_then(|p| p.first().copied())
            .filter(|&v| v != 0)
            .unwrap_or(1)
    }
}

impl Perform for ReplyPerformer {
    fn print(&mut self, c: char) {
        trace!("Ignoring printable input: {:?}", c);
        self.replies.push(Reply::Other);
    }

    fn csi_dispatch(&mut self, params: &Params, intermediates: &[u8], ignore: bool, action: char) {
        if action == 'R' && intermediates.is_empty() && !ignore {
            let row = Self::param(params, 0);
            let col = Self::param(params, 1);
            trace!("Cursor position report: row={} col={}", row, col);
            self.replies.push(Reply::CursorPosition(Point::new(col, row)));
        } else {
            trace!("Ignoring CSI sequence with action {:?}", action);
            self.replies.push(Reply::Other);
        }
    }

    fn esc_dispatch(&mut self, _intermediates: &[u8], _ignore: bool, _byte: u8) {
        self.replies.push(Reply::Other);
    }

    fn osc_dispatch(&mut self, _params: &[&[u8]], _bell_terminated: bool) {
        self.replies.push(Reply::Other);
    }
}
