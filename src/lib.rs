#![warn(missing_docs)]

//! # `colorsplit`
//!
//! A solver for "split the colors" puzzles: given a rectangular grid of empty, blocked and colored cells, draw one
//! continuous line of walls along the grid lines from a start corner to an end corner such that every color ends up
//! alone in a region of its own.
//! Begin by building a [`Grid`] with [`Grid::from_rows`] or a [`GridBuilder`], or parse a whole [`Puzzle`] from text.
//! Then call [`Grid::find_solution`] or drive a [`Solver`] directly to obtain a [`Solution`].
//!
//! # Internals
//! Cells are vertices of an undirected graph whose edges join cells sharing a side, so long as neither is blocked.
//! Drawing a wall removes the edge it lies on and erasing the wall puts the edge back.
//!
//! The solver walks the lattice of corners depth first, drawing a wall for every step it takes and erasing it when
//! stepping back, so the graph always reflects exactly the path currently being explored.
//! Whenever the path reaches the end corner, the graph is flood filled into regions; the path is a solution if no
//! region holds two colors and no color appears in two regions.
//! Grids are small and checks are only made at the end corner, so this is plenty fast for hand-made puzzles, but the
//! search is exhaustive and can take exponential time on large open grids; see [`SearchLimits`].

pub use builder::{BuilderInvalidReason, GridBuilder};
pub use cell::{Cell, CellKind, Color};
pub use grid::{Grid, PartitionViolation, Region};
pub use location::Location;
pub use puzzle::{ParseError, Puzzle};
pub use shape::SquareStep;
pub use solution::Solution;
pub use solver::{SearchLimits, Solver, SolverFailure};
pub use wall::{Wall, WallError};

pub mod builder;
pub(crate) mod cell;
pub(crate) mod grid;
pub(crate) mod location;
pub(crate) mod puzzle;
pub(crate) mod shape;
pub(crate) mod solution;
pub(crate) mod solver;
mod tests;
pub(crate) mod wall;
#[cfg(feature = "wasm")]
pub mod wasm;
