use std::collections::HashSet;
use std::num::NonZero;

use itertools::Itertools;
use log::{debug, trace, warn};
use thiserror::Error;
use unordered_pair::UnorderedPair;

use crate::grid::Grid;
use crate::location::Location;
use crate::shape::SquareStep;
use crate::solution::Solution;
use crate::wall::WallError;

/// Bounds on how much work a [`Solver`] may do before giving up.
///
/// The default places no bound, so the search is exhaustive.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct SearchLimits {
    /// Maximum number of walls the search may draw in total, counting ones later erased when backtracking.
    pub max_steps: Option<NonZero<u64>>,
}

/// Reasons a [`Solver`] may fail.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum SolverFailure {
    /// Every simple path from start to end was tried and none splits the colors.
    #[error("No solutions!")]
    NoSolution,
    /// The search hit [`SearchLimits::max_steps`] before finding a solution.
    #[error("search gave up after {steps} steps")]
    BudgetExhausted { steps: u64 },
    /// A wall the search drew could not be erased again.
    /// This should never happen.
    #[error("search lost track of its walls: {0}")]
    Inconsistent(#[from] WallError),
}

// a location on the current path and the index into SEARCH_ORDER of the next direction to try from it
struct Frame {
    at: Location,
    next: usize,
}

/// Depth-first search for a wall path between two corners of a [`Grid`] that leaves every color in a region of its own.
///
/// Every step along the path draws the wall it follows, and every step taken back erases it again,
/// so the grid only ever holds the walls of the path currently being explored.
/// Directions are tried in the fixed order [`SquareStep::SEARCH_ORDER`], making the result deterministic.
pub struct Solver<'a> {
    grid: &'a mut Grid,
    limits: SearchLimits,
    steps: u64,
}

impl<'a> Solver<'a> {
    pub fn new(grid: &'a mut Grid) -> Self {
        Self {
            grid,
            limits: SearchLimits::default(),
            steps: 0,
        }
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Walls drawn by the most recent call to [`Self::solve`].
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Search for a path from corner `start` to corner `end`.
    ///
    /// On success the walls of the returned path are left drawn on the grid.
    /// On any failure the grid is returned to the state it was in before the call.
    pub fn solve(&mut self, start: Location, end: Location) -> Result<Solution, SolverFailure> {
        debug!("searching {}x{} grid for a path from {start} to {end}", self.grid.rows(), self.grid.cols());
        self.steps = 0;

        let outcome = self.search(start, end);
        match &outcome {
            Ok(solution) => debug!("found a path of {} steps after drawing {} walls", solution.len(), self.steps),
            Err(failure) => debug!("search failed after drawing {} walls: {failure}", self.steps),
        }

        outcome
    }

    fn search(&mut self, start: Location, end: Location) -> Result<Solution, SolverFailure> {
        if start == end {
            return match self.grid.check() {
                true => Ok(Solution::from(vec![start])),
                false => Err(SolverFailure::NoSolution),
            };
        }

        let mut path = vec![start];
        let mut on_path = HashSet::from([start]);
        let mut frames = vec![Frame { at: start, next: 0 }];

        while let Some(frame) = frames.last_mut() {
            let Some(step) = SquareStep::SEARCH_ORDER.get(frame.next).copied() else {
                // out of directions; step back over the wall that led here
                frames.pop();
                if let Some(here) = path.pop() {
                    on_path.remove(&here);
                    if let Some(previous) = path.last() {
                        self.erase(*previous, here)?;
                    }
                }
                continue;
            };
            frame.next += 1;

            let from = frame.at;
            let to = step.attempt_from(from);
            if on_path.contains(&to) {
                continue;
            }

            if self.limits.max_steps.is_some_and(|max| self.steps >= max.get()) {
                warn!("giving up after drawing {} walls", self.steps);
                self.unwind(&path)?;
                return Err(SolverFailure::BudgetExhausted { steps: self.steps });
            }

            // off the grid
            if self.grid.add_wall(UnorderedPair(from, to)).is_err() {
                continue;
            }
            self.steps += 1;

            if to == end {
                trace!("reached {end} after {} steps", path.len());
                if self.grid.check() {
                    path.push(to);
                    return Ok(Solution::from(path));
                }

                // the end is on every continuation of this path, so none of them can finish
                self.erase(from, to)?;
                continue;
            }

            path.push(to);
            on_path.insert(to);
            frames.push(Frame { at: to, next: 0 });
        }

        Err(SolverFailure::NoSolution)
    }

    fn erase(&mut self, a: Location, b: Location) -> Result<(), SolverFailure> {
        match self.grid.remove_wall(UnorderedPair(a, b)) {
            Ok(_) => Ok(()),
            Err(error) => {
                if cfg!(debug_assertions) {
                    panic!("search lost track of its walls: {error}");
                }
                Err(SolverFailure::from(error))
            }
        }
    }

    // erase every wall along `path`, newest first
    fn unwind(&mut self, path: &[Location]) -> Result<(), SolverFailure> {
        for (a, b) in path.iter().tuple_windows().collect_vec().into_iter().rev() {
            self.erase(*a, *b)?;
        }

        Ok(())
    }
}
