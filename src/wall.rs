use std::fmt::{Display, Formatter};

use thiserror::Error;

use crate::location::Location;
use crate::shape::SquareStep;

/// A wall along one unit of grid line, between two corner [`Location`]s.
///
/// Walls are only obtained through [`Grid::format_wall`](crate::Grid::format_wall) and are always normalized so that
/// `start` precedes `end` in `(row, col)` order.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub struct Wall {
    pub(crate) start: Location,
    pub(crate) end: Location,
}

impl Wall {
    pub fn start(&self) -> Location {
        self.start
    }

    pub fn end(&self) -> Location {
        self.end
    }

    /// Direction from `start` to `end`; always [`Down`](SquareStep::Down) or [`Right`](SquareStep::Right).
    pub fn direction(&self) -> SquareStep {
        if self.end.0 > self.start.0 {
            SquareStep::Down
        } else {
            SquareStep::Right
        }
    }
}

impl Display for Wall {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Wall({} - {})", self.start, self.end)
    }
}

/// Reasons a wall operation on a [`Grid`](crate::Grid) may be refused.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum WallError {
    /// An endpoint lies outside the grid, or the endpoints are not exactly one unit apart along one axis.
    #[error("wall between {0} and {1} does not span exactly one in-bounds grid edge")]
    Malformed(Location, Location),
    /// Removal was requested for a wall that was never placed.
    #[error("{0} is not present on the grid")]
    NotPresent(Wall),
}
