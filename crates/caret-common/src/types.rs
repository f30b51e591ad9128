use std::fmt;

/// A cell coordinate. `x` is the column, `y` is the row.
///
/// Whether a `Point` is 0-based or 1-based depends on which side of the
/// [`TerminalDriver`](crate::traits::TerminalDriver) boundary it lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

impl Point {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    pub const fn origin() -> Self {
        Self { x: 0, y: 0 }
    }

    /// Convert a 0-based point into the 1-based form terminals use
    pub fn to_one_based(self) -> Self {
        Self {
            x: self.x.saturating_add(1),
            y: self.y.saturating_add(1),
        }
    }

    /// Convert a 1-based terminal point into 0-based form.
    /// A coordinate of 0 is clamped to 0.
    pub fn to_zero_based(self) -> Self {
        Self {
            x: self.x.saturating_sub(1),
            y: self.y.saturating_sub(1),
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Which part of the screen a clear operation erases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearMode {
    /// Whole screen
    All,
    /// From the cursor to the end of the screen
    FromCursorDown,
    /// From the start of the screen to the cursor
    FromCursorUp,
    /// The whole row the cursor is on
    CurrentLine,
}
