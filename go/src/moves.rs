use std::fmt::{self, Display, Formatter};

use crate::{Color, Point};

/// A single turn. A `point` of `None` is a pass.
///
/// Moves order by color, then passes before placed stones, then by point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Move {
    pub color: Color,
    pub point: Option<Point>,
}

impl Move {
    pub fn new(color: Color, point: impl Into<Point>) -> Self {
        Self {
            color,
            point: Some(point.into()),
        }
    }

    pub fn pass(color: Color) -> Self {
        Self { color, point: None }
    }

    /// The same move played by the other color.
    pub fn with_swapped_color(self) -> Self {
        Self {
            color: self.color.opponent(),
            point: self.point,
        }
    }

    pub fn map_point(self, f: impl FnOnce(Point) -> Point) -> Self {
        Self {
            color: self.color,
            point: self.point.map(f),
        }
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self.point {
            Some(point) => write!(f, "{} {}", self.color, point),
            None => write!(f, "{} pass", self.color),
        }
    }
}
