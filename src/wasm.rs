use js_sys::Array;
use wasm_bindgen::prelude::*;

use crate::puzzle::Puzzle;
use crate::solver::SearchLimits;

/// Solve puzzle text in the format accepted by [`Puzzle`], returning the direction tokens of the first solution found.
///
/// Throws if the text does not parse or the puzzle has no solution.
#[wasm_bindgen(js_name = solvePuzzle)]
pub fn solve_puzzle(text: &str) -> Result<Array, JsError> {
    let mut puzzle: Puzzle = text.parse()?;
    let solution = puzzle.solve(SearchLimits::default())?;

    Ok(solution.directions()
        .iter()
        .map(|step| JsValue::from_str(&step.to_string()))
        .collect())
}
