use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

use itertools::Itertools;
use log::warn;

use crate::location::Location;
use crate::shape::SquareStep;

/// A path of corners from start to end, as found by a [`Solver`](crate::Solver).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Solution {
    path: Vec<Location>,
}

impl From<Vec<Location>> for Solution {
    fn from(path: Vec<Location>) -> Self {
        Self { path }
    }
}

impl Solution {
    /// Every corner visited, start and end included.
    pub fn path(&self) -> &[Location] {
        &self.path
    }

    /// Number of steps along the path.
    pub fn len(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Whether the path starts where it ends.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The direction of each step along the path.
    ///
    /// Consecutive corners that differ along both axes make no sense as a step; if one is found, it is logged and the
    /// directions up to that point are returned.
    pub fn directions(&self) -> Vec<SquareStep> {
        let mut directions = Vec::with_capacity(self.len());

        for (index, (last, current)) in self.path.iter().tuple_windows().enumerate() {
            directions.push(match (current.0.cmp(&last.0), current.1.cmp(&last.1)) {
                (Ordering::Less, Ordering::Equal) => SquareStep::Up,
                (Ordering::Greater, Ordering::Equal) => SquareStep::Down,
                (Ordering::Equal, Ordering::Less) => SquareStep::Left,
                (Ordering::Equal, Ordering::Greater) => SquareStep::Right,
                // standing still
                (Ordering::Equal, Ordering::Equal) => continue,
                _ => {
                    warn!("solution incorrect at index {} ({last} -> {current})", index + 1);
                    break;
                }
            });
        }

        directions
    }
}

impl Display for Solution {
    /// Prints the directions as a list of quoted tokens, e.g. `["DOWN", "RIGHT"]`.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.directions().iter().map(|step| format!("\"{step}\"")).join(", "))
    }
}
