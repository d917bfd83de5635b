use std::str::FromStr;

use thiserror::Error;

use crate::builder::{BuilderInvalidReason, GridBuilder};
use crate::grid::Grid;
use crate::location::Location;
use crate::solution::Solution;
use crate::solver::{SearchLimits, Solver, SolverFailure};

/// Reasons puzzle text may fail to parse.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ParseError {
    #[error("missing {0} location line")]
    MissingLocation(&'static str),
    #[error("malformed {which} location {text:?}, expected `row,col`")]
    BadLocation { which: &'static str, text: String },
    #[error("invalid grid: {0:?}")]
    InvalidGrid(Vec<BuilderInvalidReason>),
    #[error("{which} location {location} lies outside the corners of a {rows}x{cols} grid")]
    OutOfBounds { which: &'static str, location: Location, rows: usize, cols: usize },
}

/// A grid together with the corners a solution must run between.
///
/// Parses from text: a `row,col` line for the start corner, another for the end corner, then one line per grid row.
/// ```text
/// 0,0
/// 3,5
/// x101x
/// 00000
/// 02220
/// ```
pub struct Puzzle {
    pub start: Location,
    pub end: Location,
    pub grid: Grid,
}

impl Puzzle {
    /// Search for a solution; see [`Solver::solve`].
    pub fn solve(&mut self, limits: SearchLimits) -> Result<Solution, SolverFailure> {
        Solver::new(&mut self.grid)
            .with_limits(limits)
            .solve(self.start, self.end)
    }
}

fn parse_location(which: &'static str, line: Option<&str>) -> Result<Location, ParseError> {
    let text = line.ok_or(ParseError::MissingLocation(which))?.trim();
    let malformed = || ParseError::BadLocation { which, text: text.to_string() };

    let (row, col) = text.split_once(',').ok_or_else(malformed)?;
    Ok(Location(
        row.trim().parse().map_err(|_| malformed())?,
        col.trim().parse().map_err(|_| malformed())?,
    ))
}

impl FromStr for Puzzle {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s.lines();
        let start = parse_location("start", lines.next())?;
        let end = parse_location("end", lines.next())?;

        let mut rows = lines.map(str::trim).collect::<Vec<_>>();
        while rows.last().is_some_and(|row| row.is_empty()) {
            rows.pop();
        }

        let grid = GridBuilder::from_rows(rows)
            .build()
            .map_err(|reasons| ParseError::InvalidGrid(reasons.clone()))?;

        for (which, location) in [("start", start), ("end", end)] {
            if location.0 > grid.rows() || location.1 > grid.cols() {
                return Err(ParseError::OutOfBounds { which, location, rows: grid.rows(), cols: grid.cols() });
            }
        }

        Ok(Self { start, end, grid })
    }
}
