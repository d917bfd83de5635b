use strum::{Display, VariantArray};

use crate::location::Location;

/// A single step between adjacent corners of a rectangular grid.
///
/// Displays as the upper case direction token, e.g. `UP`.
#[derive(Copy, Clone, VariantArray, Display, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
#[strum(serialize_all = "UPPERCASE")]
pub enum SquareStep {
    Up,
    Down,
    Left,
    Right,
}

impl SquareStep {
    /// The order in which the solver tries directions from any location.
    ///
    /// Changing this changes which of several valid solutions is found first.
    pub const SEARCH_ORDER: [Self; 4] = [Self::Right, Self::Down, Self::Left, Self::Up];

    /// Attempt the step from `location` in the direction specified by `self` and return the resultant [`Location`].
    ///
    /// No bounds are checked; see [`Location::offset_by`].
    pub fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::Up => location.offset_by((-1, 0)),
            Self::Down => location.offset_by((1, 0)),
            Self::Left => location.offset_by((0, -1)),
            Self::Right => location.offset_by((0, 1)),
        }
    }

    /// Determine the direction from `a` to `b`, which must be unit adjacent.
    /// Returns [`None`] otherwise.
    pub fn direction_to(a: Location, b: Location) -> Option<Self> {
        Self::VARIANTS.iter().find(|dir| dir.attempt_from(a) == b).copied()
    }

    /// Whether this step moves between rows, i.e. follows a vertical grid line.
    pub(crate) fn is_vertical(&self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }
}
