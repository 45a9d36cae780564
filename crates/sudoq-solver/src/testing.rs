//! Test utilities for technique implementations.
//!
//! [`parse_puzzle`] builds fixture puzzles from grid literals, and
//! [`TechniqueTester`] is a small fluent harness for asserting what a
//! technique changed. Both are used by this crate's own tests and benches;
//! they are not part of the solving API.

use sudoq_core::{Pos, Puzzle};

use crate::{Solver, technique::Technique};

/// Parses a grid literal into a puzzle of givens.
///
/// Digits 1-9 are givens; `.`, `_`, and `0` are empty cells; every other
/// character (whitespace, separators) is ignored.
///
/// # Panics
///
/// Panics if the literal does not contain exactly 81 cells, or if the
/// givens are contradictory.
#[must_use]
#[track_caller]
#[expect(clippy::cast_possible_truncation)]
pub fn parse_puzzle(s: &str) -> Puzzle {
    let mut puzzle = Puzzle::new();
    let mut index = 0u8;
    for ch in s.chars() {
        let value = match ch {
            '1'..='9' => Some(ch as u8 - b'0'),
            '.' | '_' | '0' => None,
            _ => continue,
        };
        assert!(index < 81, "grid literal has more than 81 cells");
        if let Some(value) = value {
            puzzle
                .given_value(Pos::from_index(index), value)
                .expect("contradictory givens in grid literal");
        }
        index += 1;
    }
    assert_eq!(index, 81, "grid literal has fewer than 81 cells");
    puzzle
}

/// A fluent harness for exercising one technique at a time.
///
/// The tester snapshots the puzzle after setup, applies a technique, and
/// asserts on the difference. All assertion methods panic with
/// `#[track_caller]` diagnostics and return `self` for chaining.
pub struct TechniqueTester {
    solver: Solver,
    initial: Puzzle,
}

impl TechniqueTester {
    /// Creates a tester from a grid literal (see [`parse_puzzle`]).
    ///
    /// # Panics
    ///
    /// Panics if the literal is malformed or the givens are contradictory.
    #[must_use]
    #[track_caller]
    pub fn new(grid: &str) -> Self {
        let solver = Solver::new(parse_puzzle(grid)).expect("invalid fixture puzzle");
        let initial = solver.puzzle().clone();
        Self { solver, initial }
    }

    /// Restricts the cell at `pos` to the given candidates, as setup.
    ///
    /// The baseline snapshot is refreshed, so later assertions measure only
    /// the technique's effect.
    ///
    /// # Panics
    ///
    /// Panics if a removal corrupts the puzzle.
    #[must_use]
    #[track_caller]
    pub fn keep_only(mut self, pos: Pos, keep: &[u8]) -> Self {
        for value in 1..=9 {
            if !keep.contains(&value) {
                self.solver
                    .remove_cell_candidate(pos, value)
                    .expect("fixture setup corrupted the puzzle");
            }
        }
        self.initial = self.solver.puzzle().clone();
        self
    }

    /// Returns the solver under test.
    #[must_use]
    pub const fn solver(&self) -> &Solver {
        &self.solver
    }

    /// Applies the technique's first step, if it finds one.
    ///
    /// # Panics
    ///
    /// Panics if applying the step corrupts the puzzle.
    #[must_use]
    #[track_caller]
    pub fn apply_once<T: Technique>(mut self, technique: &T) -> Self {
        if let Some(step) = technique.find(&self.solver) {
            self.solver
                .apply_step(step)
                .expect("applying step corrupted the puzzle");
        }
        self
    }

    /// Asserts that the cell at `pos` went from undecided to `value`.
    #[must_use]
    #[track_caller]
    pub fn assert_placed(self, pos: Pos, value: u8) -> Self {
        assert!(
            !self.initial.cell(pos).is_solved(),
            "expected {pos} to start unsolved"
        );
        let placed = self.solver.cell(pos).value();
        assert_eq!(
            placed,
            Some(value),
            "expected {pos} to be placed as {value}, got {placed:?}"
        );
        self
    }

    /// Asserts that every listed candidate was present initially and has
    /// been removed from the cell at `pos`.
    #[must_use]
    #[track_caller]
    pub fn assert_removed(self, pos: Pos, values: &[u8]) -> Self {
        for &value in values {
            assert!(
                self.initial.cell(pos).has_candidate(value),
                "expected {value} to start as a candidate of {pos}"
            );
            assert!(
                !self.solver.cell(pos).has_candidate(value),
                "expected {value} to be removed from {pos}, candidates are {:?}",
                self.solver.cell(pos).candidates()
            );
        }
        self
    }

    /// Asserts that the candidates of the cell at `pos` are unchanged.
    #[must_use]
    #[track_caller]
    pub fn assert_no_change(self, pos: Pos) -> Self {
        let initial = self.initial.cell(pos).candidates();
        let current = self.solver.cell(pos).candidates();
        assert_eq!(
            initial, current,
            "expected no change at {pos}, candidates changed from {initial:?} to {current:?}"
        );
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_puzzle_counts_givens() {
        let puzzle = parse_puzzle(
            "53. .7. ...
             6.. 195 ...
             .98 ... .6.
             8.. .6. ..3
             4.. 8.3 ..1
             7.. .2. ..6
             .6. ... 28.
             ... 419 ..5
             ... .8. .79",
        );
        assert_eq!(puzzle.num_unsolved(), 81 - 30);
        assert_eq!(puzzle.cell(Pos::new(0, 0)).value(), Some(5));
        assert!(puzzle.cell(Pos::new(0, 0)).is_given());
        assert_eq!(puzzle.cell(Pos::new(8, 8)).value(), Some(9));
    }

    #[test]
    #[should_panic(expected = "fewer than 81 cells")]
    fn test_parse_puzzle_rejects_short_literal() {
        let _ = parse_puzzle("53. .7.");
    }

    #[test]
    fn test_assert_no_change_on_untouched_grid() {
        let tester = TechniqueTester::new(&".".repeat(81));
        let _ = tester.assert_no_change(Pos::new(4, 4));
    }
}
