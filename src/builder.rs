use std::num::NonZero;
use std::ops::IndexMut;

use itertools::Itertools;
use ndarray::{Array2, AssignElem};
use petgraph::graphmap::UnGraphMap;
use thiserror::Error;

use crate::cell::{CellKind, Color, BLOCKED_MARKER, EMPTY_MARKER};
use crate::grid::Grid;
use crate::location::{Dimension, Location};
use crate::shape::SquareStep;

/// Reasons a builder may become invalid while building.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum BuilderInvalidReason {
    /// A feature like a color was placed outside the bounds specified by `dims` on a builder.
    #[error("feature placed outside the grid")]
    FeatureOutOfBounds,
    /// A color was given using one of the markers reserved for empty or blocked cells.
    #[error("{0:?} is reserved and cannot name a color")]
    ReservedColor(char),
    /// A row of the table does not have as many cells as the first row.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },
    /// The table has no rows, or its rows have no cells.
    #[error("grid has no cells")]
    EmptyGrid,
}

/// A builder for [`Grid`]s.
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
/// Once any [`BuilderInvalidReason`] arises, further changes are ignored.
#[derive(Clone, Debug)]
pub struct GridBuilder {
    // rows, columns
    dims: (Dimension, Dimension),
    cells: Array2<CellKind>,
    invalid_reasons: Vec<BuilderInvalidReason>,
}

impl Default for GridBuilder {
    fn default() -> Self {
        Self::with_dims((NonZero::new(5).unwrap(), NonZero::new(5).unwrap()))
    }
}

impl GridBuilder {
    /// Construct a new [`Self`] of all empty cells with the specified dimensions, specified in `(rows, columns)` order.
    pub fn with_dims(dims: (Dimension, Dimension)) -> Self {
        Self {
            dims,
            cells: Array2::from_elem((dims.0.get(), dims.1.get()), CellKind::Empty),
            invalid_reasons: Default::default(),
        }
    }

    /// Construct a new [`Self`] from a row table, one string per row and one character per cell:
    /// `'0'` for an empty cell, `'x'` for a blocked cell and any other character for a cell of that color.
    ///
    /// Rows must all be as long as the first; the builder is invalid otherwise.
    pub fn from_rows<I, S>(rows: I) -> Self
    where
        I: IntoIterator<Item=S>,
        S: AsRef<str>,
    {
        let table = rows.into_iter()
            .map(|row| row.as_ref().chars().collect_vec())
            .collect_vec();

        let width = table.first().map_or(0, Vec::len);
        let (Some(rows), Some(cols)) = (NonZero::new(table.len()), NonZero::new(width)) else {
            let mut builder = Self::with_dims((NonZero::<usize>::MIN, NonZero::<usize>::MIN));
            builder.invalid_reasons.push(BuilderInvalidReason::EmptyGrid);
            return builder;
        };

        let mut builder = Self::with_dims((rows, cols));
        if let Some((row, found)) = table.iter()
            .map(Vec::len)
            .enumerate()
            .find(|(_, len)| *len != width) {
            builder.invalid_reasons.push(BuilderInvalidReason::RaggedRow { row, expected: width, found });
            return builder;
        }

        builder.cells = Array2::from_shape_fn((rows.get(), cols.get()), |(row, col)| CellKind::from(table[row][col]));
        builder
    }

    fn contains(&self, location: Location) -> bool {
        location.0 < self.dims.0.get() && location.1 < self.dims.1.get()
    }

    /// Color the cell at `location`.
    ///
    /// May cause the builder to enter a [`FeatureOutOfBounds`](BuilderInvalidReason::FeatureOutOfBounds) invalid state if
    /// `location` is out of bounds, or a [`ReservedColor`](BuilderInvalidReason::ReservedColor) one if `color` is a marker
    /// for empty or blocked cells.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn add_color(&mut self, color: Color, location: Location) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if color == EMPTY_MARKER || color == BLOCKED_MARKER {
            self.invalid_reasons.push(BuilderInvalidReason::ReservedColor(color));
            return self;
        }

        if !self.contains(location) {
            self.invalid_reasons.push(BuilderInvalidReason::FeatureOutOfBounds);
            return self;
        }

        self.cells.index_mut(location.as_index()).assign_elem(CellKind::Colored { color });
        self
    }

    /// Drop a cell from the playable area. Any color here is deleted.
    ///
    /// May cause the builder to enter a [`FeatureOutOfBounds`](BuilderInvalidReason::FeatureOutOfBounds) invalid state if
    /// `location` is out of bounds.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn drop_location(&mut self, location: Location) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if !self.contains(location) {
            self.invalid_reasons.push(BuilderInvalidReason::FeatureOutOfBounds);
            return self;
        }

        self.cells.index_mut(location.as_index()).assign_elem(CellKind::Blocked);
        self
    }

    /// Check the validity of this builder, ensuring no [`BuilderInvalidReason`] condition has arisen.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<BuilderInvalidReason>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Convert the state of this builder into a [`Grid`] with no walls, every pair of neighboring playable cells adjacent.
    /// If the builder is invalid for any reason, a reference to a [`Vec`] of [`BuilderInvalidReason`] will indicate why.
    pub fn build(&self) -> Result<Grid, &Vec<BuilderInvalidReason>> {
        if !self.invalid_reasons.is_empty() {
            return Err(&self.invalid_reasons);
        }

        let (rows, cols) = (self.dims.0.get(), self.dims.1.get());
        let mut graph = UnGraphMap::with_capacity(
            self.cells.len(),
            // "vertical" edges
            (rows - 1) * cols
                // "horizontal" edges
                + (cols - 1) * rows,
        );

        for (index, kind) in self.cells.indexed_iter() {
            if kind.is_playable() {
                graph.add_node(Location::from(index));
            }
        }

        for location in graph.nodes().collect_vec() {
            // link down and to the right, if possible
            for step in [SquareStep::Down, SquareStep::Right] {
                let other = step.attempt_from(location);
                if graph.contains_node(other) {
                    graph.add_edge(location, other, ());
                }
            }
        }

        Ok(Grid {
            cells: self.cells.clone(),
            graph,
            dims: self.dims,
            walls: Vec::new(),
        })
    }
}
