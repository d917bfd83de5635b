use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use itertools::Itertools;
use log::trace;
use ndarray::Array2;
use petgraph::graphmap::UnGraphMap;
use petgraph::visit::Bfs;
use thiserror::Error;
use unordered_pair::UnorderedPair;

use crate::builder::{BuilderInvalidReason, GridBuilder};
use crate::cell::{Cell, CellKind, Color};
use crate::location::{Coord, Dimension, Location};
use crate::shape::SquareStep;
use crate::solution::Solution;
use crate::solver::{SearchLimits, Solver, SolverFailure};
use crate::wall::{Wall, WallError};

/// Why a grid's current regions do not split its colors.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum PartitionViolation {
    /// A single region holds more than one color.
    #[error("one region holds several colors: {colors:?}")]
    MixedColors { colors: Vec<Color> },
    /// A color appears in more than one region.
    #[error("color {color:?} is split across several regions")]
    SplitColor { color: Color },
}

/// A maximal set of cells mutually reachable under the current walls.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Region {
    /// The one color found in this region, if any.
    pub color: Option<Color>,
    /// Member cells in discovery order, starting from the lowest indexed one.
    pub cells: Vec<Location>,
}

/// A rectangular grid of cells along with the walls currently drawn on it.
///
/// Two playable cells sharing a side are adjacent unless a wall lies on that side.
/// Blocked cells are never adjacent to anything.
///
/// [`Grid`]s should be built using a [`GridBuilder`], or [`Grid::from_rows`] for the common case.
#[derive(Clone, Debug)]
pub struct Grid {
    pub(crate) cells: Array2<CellKind>,
    // one node per playable cell; an edge means the two cells are adjacent
    pub(crate) graph: UnGraphMap<Location, ()>,
    // rows, columns
    pub(crate) dims: (Dimension, Dimension),
    pub(crate) walls: Vec<Wall>,
}

impl Grid {
    /// Build a grid from its row table, one string per row and one character per cell.
    /// See [`GridBuilder::from_rows`].
    pub fn from_rows<I, S>(rows: I) -> Result<Self, Vec<BuilderInvalidReason>>
    where
        I: IntoIterator<Item=S>,
        S: AsRef<str>,
    {
        GridBuilder::from_rows(rows).build().map_err(|reasons| reasons.clone())
    }

    #[inline]
    pub fn rows(&self) -> Coord {
        self.dims.0.get()
    }

    #[inline]
    pub fn cols(&self) -> Coord {
        self.dims.1.get()
    }

    /// `(rows, columns)`.
    pub fn dims(&self) -> (Coord, Coord) {
        (self.rows(), self.cols())
    }

    /// The cell whose top left corner is `location`, if there is one.
    pub fn cell(&self, location: Location) -> Option<Cell> {
        self.cells.get(location.as_index()).map(|kind| Cell { location, kind: *kind })
    }

    /// Cells currently adjacent to the cell at `location`.
    /// Empty for blocked cells and locations off the grid.
    pub fn neighbors(&self, location: Location) -> impl Iterator<Item=Location> + '_ {
        self.graph.contains_node(location)
            .then(|| self.graph.neighbors(location))
            .into_iter()
            .flatten()
    }

    pub fn is_adjacent(&self, a: Location, b: Location) -> bool {
        self.graph.contains_edge(a, b)
    }

    /// Walls currently drawn, in the order they were added.
    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    /// Validate and normalize a wall between two corners, given in either order.
    ///
    /// Both corners must lie within `[0, rows] x [0, cols]` and be exactly one unit apart along one axis.
    pub fn format_wall(&self, endpoints: UnorderedPair<Location>) -> Result<Wall, WallError> {
        let UnorderedPair(a, b) = endpoints;
        let (start, end) = if a <= b { (a, b) } else { (b, a) };

        let in_bounds = |location: Location| location.0 <= self.rows() && location.1 <= self.cols();
        if !in_bounds(start) || !in_bounds(end) {
            return Err(WallError::Malformed(start, end));
        }

        match SquareStep::direction_to(start, end) {
            Some(SquareStep::Down | SquareStep::Right) => Ok(Wall { start, end }),
            _ => Err(WallError::Malformed(start, end)),
        }
    }

    /// The two cells on either side of `wall`, or [`None`] if it lies on the outer boundary.
    fn separated_cells(&self, wall: Wall) -> Option<(Location, Location)> {
        let Location(row, col) = wall.start;
        if row == self.rows() || col == self.cols() {
            return None;
        }

        if wall.direction().is_vertical() {
            // along a column line; cells to the left and right
            (col > 0).then(|| (Location(row, col - 1), Location(row, col)))
        } else {
            // along a row line; cells above and below
            (row > 0).then(|| (Location(row - 1, col), Location(row, col)))
        }
    }

    fn link(&mut self, a: Location, b: Location) {
        // blocked cells are not in the graph and stay unlinked
        if self.graph.contains_node(a) && self.graph.contains_node(b) {
            self.graph.add_edge(a, b, ());
        }
    }

    /// Draw a wall between two corners, cutting the adjacency of the cells it separates.
    ///
    /// Walls on the outer boundary are recorded but separate nothing.
    /// Drawing the same wall more than once is allowed; each copy must be removed before the cells reconnect.
    pub fn add_wall(&mut self, endpoints: UnorderedPair<Location>) -> Result<Wall, WallError> {
        let wall = self.format_wall(endpoints)?;
        self.walls.push(wall);

        if let Some((a, b)) = self.separated_cells(wall) {
            self.graph.remove_edge(a, b);
        }

        Ok(wall)
    }

    /// Erase a wall previously drawn with [`Self::add_wall`], restoring the adjacency it cut.
    ///
    /// Fails with [`WallError::NotPresent`] if no such wall is drawn.
    pub fn remove_wall(&mut self, endpoints: UnorderedPair<Location>) -> Result<Wall, WallError> {
        let wall = self.format_wall(endpoints)?;
        let index = self.walls.iter()
            .position(|existing| *existing == wall)
            .ok_or(WallError::NotPresent(wall))?;
        self.walls.remove(index);

        // another copy still stands
        if self.walls.contains(&wall) {
            return Ok(wall);
        }

        if let Some((a, b)) = self.separated_cells(wall) {
            self.link(a, b);
        }

        Ok(wall)
    }

    /// Split the playable cells into regions under the current walls.
    ///
    /// Succeeds only if every region holds at most one color and no color spans more than one region.
    /// Regions are listed in order of their lowest indexed cell.
    pub fn partition(&self) -> Result<Vec<Region>, PartitionViolation> {
        let mut touched: HashSet<Location> = HashSet::with_capacity(self.graph.node_count());
        let mut claimed: HashSet<Color> = HashSet::new();
        let mut regions = Vec::new();

        for (index, kind) in self.cells.indexed_iter() {
            let origin = Location::from(index);
            if !kind.is_playable() || touched.contains(&origin) {
                continue;
            }

            let mut members = Vec::new();
            let mut bfs = Bfs::new(&self.graph, origin);
            while let Some(location) = bfs.next(&self.graph) {
                touched.insert(location);
                members.push(location);
            }

            let colors = members.iter()
                .filter_map(|location| self.cells[location.as_index()].color())
                .unique()
                .sorted()
                .collect_vec();

            let color = match colors.as_slice() {
                [] => None,
                [color] => {
                    if !claimed.insert(*color) {
                        return Err(PartitionViolation::SplitColor { color: *color });
                    }
                    Some(*color)
                }
                _ => return Err(PartitionViolation::MixedColors { colors }),
            };

            regions.push(Region { color, cells: members });
        }

        Ok(regions)
    }

    /// Whether the current walls split this grid's colors; see [`Self::partition`].
    pub fn check(&self) -> bool {
        match self.partition() {
            Ok(_) => true,
            Err(violation) => {
                trace!("partition rejected: {violation}");
                false
            }
        }
    }

    /// Search for a wall path from corner `start` to corner `end` splitting this grid's colors, deferring to a [`Solver`]
    /// without any search limit.
    ///
    /// On success the walls of the solution are left drawn on the grid.
    pub fn find_solution(&mut self, start: Location, end: Location) -> Result<Solution, SolverFailure> {
        Solver::new(self)
            .with_limits(SearchLimits::default())
            .solve(start, end)
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.rows() {
            for kind in row {
                write!(f, "{kind}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
