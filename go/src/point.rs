use std::fmt::{self, Display, Formatter};

/// An intersection of the board.
///
/// Row 0 is the bottom row of the board and column 0 is the left column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point {
    pub row: u8,
    pub col: u8,
}

impl Point {
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Reflects the point across the main diagonal.
    pub fn transpose(self) -> Self {
        Self {
            row: self.col,
            col: self.row,
        }
    }

    pub fn is_on_diagonal(&self) -> bool {
        self.row == self.col
    }
}

impl From<(u8, u8)> for Point {
    fn from((row, col): (u8, u8)) -> Self {
        Self::new(row, col)
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
