use std::fmt::{Display, Formatter};

use crate::location::Location;

/// Identifies a color; the character it was written with in the puzzle text.
pub type Color = char;

/// Marker for an empty cell in the row table representation.
pub const EMPTY_MARKER: char = '0';
/// Marker for a cell outside the playable area in the row table representation.
pub const BLOCKED_MARKER: char = 'x';

#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum CellKind {
    #[default]
    Empty,
    Colored { color: Color },
    // not part of the playable area; never adjacent to anything
    Blocked,
}

impl CellKind {
    pub fn is_playable(&self) -> bool {
        *self != Self::Blocked
    }

    pub fn color(&self) -> Option<Color> {
        match self {
            Self::Colored { color } => Some(*color),
            _ => None,
        }
    }
}

impl From<char> for CellKind {
    fn from(value: char) -> Self {
        match value {
            EMPTY_MARKER => Self::Empty,
            BLOCKED_MARKER => Self::Blocked,
            color => Self::Colored { color },
        }
    }
}

impl Display for CellKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", match self {
            Self::Empty => EMPTY_MARKER,
            Self::Colored { color } => *color,
            Self::Blocked => BLOCKED_MARKER,
        })
    }
}

/// One square of a [`Grid`](crate::Grid).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Cell {
    pub location: Location,
    pub kind: CellKind,
}
