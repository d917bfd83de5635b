#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::num::NonZero;

    use itertools::Itertools;
    use unordered_pair::UnorderedPair;

    use crate::builder::{BuilderInvalidReason, GridBuilder};
    use crate::cell::CellKind;
    use crate::grid::{Grid, PartitionViolation};
    use crate::location::Location;
    use crate::puzzle::{ParseError, Puzzle};
    use crate::shape::SquareStep;
    use crate::solution::Solution;
    use crate::solver::{SearchLimits, Solver, SolverFailure};
    use crate::wall::WallError;

    fn edge(a: (usize, usize), b: (usize, usize)) -> UnorderedPair<Location> {
        UnorderedPair(Location(a.0, a.1), Location(b.0, b.1))
    }

    fn adjacency(grid: &Grid) -> HashSet<(Location, Location)> {
        (0..grid.rows())
            .cartesian_product(0..grid.cols())
            .map(|(row, col)| Location(row, col))
            .flat_map(|location| grid.neighbors(location).map(move |other| (location, other)))
            .collect()
    }

    fn assert_valid_path(solution: &Solution, start: Location, end: Location) {
        let path = solution.path();
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&end));
        assert_eq!(path.iter().unique().count(), path.len());
        for (a, b) in path.iter().tuple_windows() {
            assert!(SquareStep::direction_to(*a, *b).is_some(), "{a} -> {b} is not a unit step");
        }
    }

    #[test]
    fn builds_full_adjacency() {
        let grid = Grid::from_rows(["1x2", "000"]).unwrap();

        assert_eq!(grid.dims(), (2, 3));
        assert_eq!(grid.cell(Location(0, 1)).unwrap().kind, CellKind::Blocked);
        assert_eq!(grid.cell(Location(0, 2)).unwrap().kind, CellKind::Colored { color: '2' });
        assert!(grid.cell(Location(2, 0)).is_none());

        assert!(grid.is_adjacent(Location(0, 0), Location(1, 0)));
        assert!(grid.is_adjacent(Location(1, 1), Location(1, 2)));
        assert!(!grid.is_adjacent(Location(0, 0), Location(0, 1)));
        assert_eq!(grid.neighbors(Location(0, 1)).count(), 0);
        assert_eq!(grid.neighbors(Location(1, 1)).sorted().collect_vec(), vec![Location(1, 0), Location(1, 2)]);
        // every pair listed from both sides
        assert_eq!(adjacency(&grid).len(), 2 * 4);
    }

    #[test]
    fn displays_row_table() {
        let grid = Grid::from_rows(["x101x", "00000", "02220"]).unwrap();
        assert_eq!(format!("{}", grid), "x101x
00000
02220
");
    }

    #[test]
    fn format_wall_normalizes() {
        let grid = Grid::from_rows(["00", "00"]).unwrap();

        let wall = grid.format_wall(edge((1, 1), (0, 1))).unwrap();
        assert_eq!((wall.start(), wall.end()), (Location(0, 1), Location(1, 1)));
        assert_eq!(wall.direction(), SquareStep::Down);

        let wall = grid.format_wall(edge((2, 2), (2, 1))).unwrap();
        assert_eq!((wall.start(), wall.end()), (Location(2, 1), Location(2, 2)));
        assert_eq!(wall.direction(), SquareStep::Right);
    }

    #[test]
    fn format_wall_rejects_malformed() {
        let grid = Grid::from_rows(["00", "00"]).unwrap();

        // past the outer boundary
        assert!(grid.format_wall(edge((2, 0), (3, 0))).is_err());
        assert!(grid.format_wall(edge((0, 2), (0, 3))).is_err());
        // off the top and left edges
        assert!(grid.format_wall(UnorderedPair(Location(0, 0), SquareStep::Up.attempt_from(Location(0, 0)))).is_err());
        assert!(grid.format_wall(UnorderedPair(Location(1, 0), SquareStep::Left.attempt_from(Location(1, 0)))).is_err());
        // too long, diagonal, zero length
        assert!(grid.format_wall(edge((0, 0), (0, 2))).is_err());
        assert!(grid.format_wall(edge((0, 1), (1, 0))).is_err());
        assert!(grid.format_wall(edge((1, 1), (1, 1))).is_err());
        assert_eq!(
            grid.format_wall(edge((1, 1), (0, 0))),
            Err(WallError::Malformed(Location(0, 0), Location(1, 1)))
        );
    }

    #[test]
    fn walls_cut_the_cells_they_separate() {
        let mut grid = Grid::from_rows(["12", "34"]).unwrap();

        // along the column line between the two top cells
        grid.add_wall(edge((0, 1), (1, 1))).unwrap();
        assert!(!grid.is_adjacent(Location(0, 0), Location(0, 1)));
        assert!(grid.is_adjacent(Location(1, 0), Location(1, 1)));

        // along the row line between the two left cells
        grid.add_wall(edge((1, 1), (1, 0))).unwrap();
        assert!(!grid.is_adjacent(Location(0, 0), Location(1, 0)));
        assert!(grid.is_adjacent(Location(0, 1), Location(1, 1)));

        assert_eq!(grid.walls().len(), 2);
    }

    #[test]
    fn boundary_walls_are_only_recorded() {
        let mut grid = Grid::from_rows(["00", "00"]).unwrap();
        let before = adjacency(&grid);

        for endpoints in [edge((0, 0), (0, 1)), edge((0, 0), (1, 0)), edge((2, 1), (2, 2)), edge((1, 2), (2, 2))] {
            grid.add_wall(endpoints).unwrap();
        }

        assert_eq!(grid.walls().len(), 4);
        assert_eq!(adjacency(&grid), before);
    }

    #[test]
    fn add_then_remove_restores_adjacency() {
        let mut grid = Grid::from_rows(["10x", "020", "003"]).unwrap();
        let before = adjacency(&grid);

        for (row, col) in (0..=grid.rows()).cartesian_product(0..=grid.cols()) {
            let here = Location(row, col);
            for step in [SquareStep::Down, SquareStep::Right] {
                let endpoints = UnorderedPair(here, step.attempt_from(here));
                if grid.add_wall(endpoints).is_ok() {
                    grid.remove_wall(endpoints).unwrap();
                }
                assert_eq!(adjacency(&grid), before, "wall {here} {step:?}");
                assert!(grid.walls().is_empty());
            }
        }
    }

    #[test]
    fn removing_absent_wall_fails() {
        let mut grid = Grid::from_rows(["00", "00"]).unwrap();
        let before = adjacency(&grid);

        let result = grid.remove_wall(edge((0, 1), (1, 1)));
        assert!(matches!(result, Err(WallError::NotPresent(_))));
        assert_eq!(adjacency(&grid), before);

        assert!(matches!(grid.remove_wall(edge((0, 0), (5, 5))), Err(WallError::Malformed(..))));
    }

    #[test]
    fn duplicate_walls_keep_cells_apart() {
        let mut grid = Grid::from_rows(["00"]).unwrap();
        let endpoints = edge((0, 1), (1, 1));

        grid.add_wall(endpoints).unwrap();
        grid.add_wall(endpoints).unwrap();
        grid.remove_wall(endpoints).unwrap();
        assert!(!grid.is_adjacent(Location(0, 0), Location(0, 1)));

        grid.remove_wall(endpoints).unwrap();
        assert!(grid.is_adjacent(Location(0, 0), Location(0, 1)));
    }

    #[test]
    fn enclosed_cell_has_no_neighbors() {
        let mut grid = Grid::from_rows(["000", "010", "000"]).unwrap();

        let corners = [(1, 1), (1, 2), (2, 2), (2, 1), (1, 1)];
        for (a, b) in corners.iter().tuple_windows() {
            grid.add_wall(edge(*a, *b)).unwrap();
        }

        assert_eq!(grid.neighbors(Location(1, 1)).count(), 0);
        assert_eq!(grid.neighbors(Location(0, 0)).count(), 2);
        let regions = grid.partition().unwrap();
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[1].color, Some('1'));
        assert_eq!(regions[1].cells, vec![Location(1, 1)]);
    }

    #[test]
    fn check_without_walls() {
        assert!(Grid::from_rows(["1"]).unwrap().check());
        assert!(Grid::from_rows(["1001", "0000"]).unwrap().check());
        // blocked cells split the grid in two
        assert!(Grid::from_rows(["10x20"]).unwrap().check());
        assert!(Grid::from_rows(["0x0"]).unwrap().check());

        assert_eq!(
            Grid::from_rows(["1002", "0330", "0440", "1002"]).unwrap().partition(),
            Err(PartitionViolation::MixedColors { colors: vec!['1', '2', '3', '4'] })
        );
        assert_eq!(
            Grid::from_rows(["1x1"]).unwrap().partition(),
            Err(PartitionViolation::SplitColor { color: '1' })
        );
    }

    #[test]
    fn check_is_repeatable() {
        let mut grid = Grid::from_rows(["12", "12"]).unwrap();
        assert!(!grid.check());
        assert!(!grid.check());

        grid.add_wall(edge((0, 1), (1, 1))).unwrap();
        grid.add_wall(edge((1, 1), (2, 1))).unwrap();
        assert!(grid.check());
        assert!(grid.check());
    }

    #[test]
    fn solves_split_across_open_rows() {
        let mut grid = Grid::from_rows(["x101x", "00000", "02220"]).unwrap();
        let (start, end) = (Location(0, 0), Location(3, 5));

        let solution = grid.find_solution(start, end).unwrap();
        assert_valid_path(&solution, start, end);
        assert_eq!(format!("{}", solution), r#"["RIGHT", "RIGHT", "RIGHT", "RIGHT", "RIGHT", "DOWN", "DOWN", "LEFT", "LEFT", "LEFT", "LEFT", "DOWN", "RIGHT", "RIGHT", "RIGHT", "RIGHT"]"#);

        // the walls of the path stay drawn and split the grid
        assert_eq!(grid.walls().len(), solution.len());
        assert!(grid.check());
    }

    #[test]
    fn solves_small_grids() {
        let cases: [(&[&str], (usize, usize), (usize, usize), &[SquareStep]); 6] = [
            (&["12", "12"], (0, 1), (2, 1), &[SquareStep::Down, SquareStep::Down]),
            (&["10", "01"], (0, 0), (2, 2), &[SquareStep::Right, SquareStep::Right, SquareStep::Down, SquareStep::Down]),
            (&["12"], (0, 0), (1, 2), &[SquareStep::Right, SquareStep::Down, SquareStep::Right]),
            (&["11"], (0, 1), (1, 1), &[SquareStep::Right, SquareStep::Down, SquareStep::Left]),
            (&["1x", "01"], (0, 2), (2, 0), &[SquareStep::Down, SquareStep::Down, SquareStep::Left, SquareStep::Left]),
            (
                &["102", "000"], (0, 1), (2, 2),
                &[SquareStep::Right, SquareStep::Down, SquareStep::Right, SquareStep::Down, SquareStep::Left],
            ),
        ];

        for (rows, start, end, expected) in cases {
            let mut grid = Grid::from_rows(rows).unwrap();
            let (start, end) = (Location(start.0, start.1), Location(end.0, end.1));
            let solution = grid.find_solution(start, end).unwrap();

            assert_valid_path(&solution, start, end);
            assert_eq!(solution.directions(), expected, "{rows:?}");
        }
    }

    #[test]
    fn start_equal_to_end() {
        let mut grid = Grid::from_rows(["1"]).unwrap();
        let solution = grid.find_solution(Location(0, 0), Location(0, 0)).unwrap();
        assert!(solution.is_empty());
        assert_eq!(format!("{}", solution), "[]");

        let mut grid = Grid::from_rows(["1", "2"]).unwrap();
        assert_eq!(grid.find_solution(Location(0, 0), Location(0, 0)), Err(SolverFailure::NoSolution));
    }

    #[test]
    fn unsolvable_grids_are_left_untouched() {
        let cases: [(&[&str], (usize, usize), (usize, usize)); 4] = [
            (&["1002", "0330", "0440", "1002"], (0, 0), (3, 3)),
            (&["1002", "0330", "0440", "1002"], (0, 0), (4, 4)),
            // the two halves of color 1 can never meet again
            (&["1x1"], (0, 0), (1, 3)),
            (&["12", "34"], (0, 1), (2, 1)),
        ];

        for (rows, start, end) in cases {
            let mut grid = Grid::from_rows(rows).unwrap();
            let before = adjacency(&grid);

            let result = grid.find_solution(Location(start.0, start.1), Location(end.0, end.1));
            assert_eq!(result, Err(SolverFailure::NoSolution), "{rows:?}");
            assert!(grid.walls().is_empty());
            assert_eq!(adjacency(&grid), before);
        }
    }

    #[test]
    fn search_is_deterministic() {
        let rows = ["1001", "0000", "2002"];
        let solve = || Grid::from_rows(rows).unwrap().find_solution(Location(0, 0), Location(3, 4)).unwrap();

        let first = solve();
        assert_eq!(first, solve());
        assert_eq!(format!("{}", first), r#"["RIGHT", "RIGHT", "RIGHT", "RIGHT", "DOWN", "DOWN", "LEFT", "LEFT", "LEFT", "LEFT", "DOWN", "RIGHT", "RIGHT", "RIGHT", "RIGHT"]"#);
    }

    #[test]
    fn budget_stops_search_and_restores_grid() {
        let mut grid = Grid::from_rows(["x101x", "00000", "02220"]).unwrap();
        let before = adjacency(&grid);
        let limits = SearchLimits { max_steps: NonZero::new(3) };

        let mut solver = Solver::new(&mut grid).with_limits(limits);
        assert_eq!(solver.solve(Location(0, 0), Location(3, 5)), Err(SolverFailure::BudgetExhausted { steps: 3 }));
        assert_eq!(solver.steps(), 3);

        assert!(grid.walls().is_empty());
        assert_eq!(adjacency(&grid), before);
    }

    #[test]
    fn directions_stop_at_bad_step() {
        let solution = Solution::from(vec![Location(1, 1), Location(0, 1), Location(0, 1), Location(0, 0), Location(1, 1), Location(1, 2)]);
        assert_eq!(solution.directions(), vec![SquareStep::Up, SquareStep::Left]);

        let solution = Solution::from(vec![Location(0, 0), Location(1, 0), Location(1, 1)]);
        assert_eq!(format!("{}", solution), r#"["DOWN", "RIGHT"]"#);
    }

    #[test]
    fn builder_places_features() {
        let grid = GridBuilder::with_dims((NonZero::new(2).unwrap(), NonZero::new(3).unwrap()))
            .add_color('a', Location(0, 0))
            .add_color('b', Location(1, 2))
            .drop_location(Location(0, 1))
            .build()
            .unwrap();

        assert_eq!(format!("{}", grid), "ax0
00b
");
        assert!(!grid.check());
    }

    #[test]
    fn builder_invalid_states() {
        let mut builder = GridBuilder::default();
        builder.add_color('x', Location(0, 0));
        assert_eq!(builder.is_valid(), Some(&vec![BuilderInvalidReason::ReservedColor('x')]));

        let mut builder = GridBuilder::default();
        builder.add_color('a', Location(5, 0))
            // ignored once invalid
            .drop_location(Location(9, 9));
        assert_eq!(builder.build().err(), Some(&vec![BuilderInvalidReason::FeatureOutOfBounds]));

        assert_eq!(
            Grid::from_rows(["000", "00", "000"]).err(),
            Some(vec![BuilderInvalidReason::RaggedRow { row: 1, expected: 3, found: 2 }])
        );
        assert_eq!(Grid::from_rows(Vec::<&str>::new()).err(), Some(vec![BuilderInvalidReason::EmptyGrid]));
        assert_eq!(Grid::from_rows([""]).err(), Some(vec![BuilderInvalidReason::EmptyGrid]));
    }

    #[test]
    fn parses_and_solves_puzzle() {
        let mut puzzle: Puzzle = "0,0
3,5
x101x
00000
02220

".parse().unwrap();

        assert_eq!((puzzle.start, puzzle.end), (Location(0, 0), Location(3, 5)));
        assert_eq!(puzzle.grid.dims(), (3, 5));

        let solution = puzzle.solve(SearchLimits::default()).unwrap();
        assert_eq!(solution.len(), 16);
    }

    #[test]
    fn rejects_malformed_puzzles() {
        assert_eq!("".parse::<Puzzle>().err(), Some(ParseError::MissingLocation("start")));
        assert_eq!("0,0".parse::<Puzzle>().err(), Some(ParseError::MissingLocation("end")));
        assert_eq!(
            "0,0\n1;1\n00".parse::<Puzzle>().err(),
            Some(ParseError::BadLocation { which: "end", text: "1;1".to_string() })
        );
        assert_eq!(
            "-1,0\n1,1\n00".parse::<Puzzle>().err(),
            Some(ParseError::BadLocation { which: "start", text: "-1,0".to_string() })
        );
        assert_eq!(
            "0,0\n1,1\n00\n0".parse::<Puzzle>().err(),
            Some(ParseError::InvalidGrid(vec![BuilderInvalidReason::RaggedRow { row: 1, expected: 2, found: 1 }]))
        );
        assert_eq!(
            "0,0\n2,1\n00".parse::<Puzzle>().err(),
            Some(ParseError::OutOfBounds { which: "end", location: Location(2, 1), rows: 1, cols: 2 })
        );
        assert!(matches!("0,0\n1,1\n".parse::<Puzzle>(), Err(ParseError::InvalidGrid(_))));
    }
}
