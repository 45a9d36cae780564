//! The 9×9 puzzle grid.
//!
//! [`Puzzle`] owns the 81 cells together with an array of unsolved counters:
//! index 0 counts the unsolved cells overall, and index `d` counts how many
//! of digit `d` still need to be placed. Every transition from unsolved to
//! solved decrements both counters atomically; a violation of either bound
//! is a [`StateError`] and the puzzle must be considered corrupt.

use thiserror::Error;

use crate::{Cell, Pos};

/// A fatal puzzle-state violation.
///
/// These indicate a programming error or a malformed puzzle; the core makes
/// no attempt to recover from them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// A placement conflicted with the value already in the cell.
    #[error("conflicting cell values {existing} and {value} at {pos}")]
    ConflictingValue {
        /// The affected cell.
        pos: Pos,
        /// The value already placed there.
        existing: u8,
        /// The rejected value.
        value: u8,
    },

    /// A digit was placed a tenth time.
    #[error("too many instances of digit {value} when placing cell {pos}")]
    DigitOvercount {
        /// The cell whose placement overflowed the count.
        pos: Pos,
        /// The overcounted digit.
        value: u8,
    },
}

/// The 9×9 grid of cells with unsolved-count bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    cells: Vec<Cell>,
    unsolved_counts: [u8; 10],
}

impl Default for Puzzle {
    fn default() -> Self {
        Self::new()
    }
}

impl Puzzle {
    /// Creates an empty puzzle: 81 unsolved cells, all candidates open.
    #[must_use]
    pub fn new() -> Self {
        let cells = Pos::all().map(Cell::new).collect();
        let mut unsolved_counts = [9; 10];
        unsolved_counts[0] = 81;
        Self {
            cells,
            unsolved_counts,
        }
    }

    /// Returns `true` once every cell holds a value.
    #[must_use]
    pub const fn is_solved(&self) -> bool {
        self.unsolved_counts[0] == 0
    }

    /// Returns `true` if all nine instances of `digit` have been placed.
    #[must_use]
    pub fn is_digit_solved(&self, digit: u8) -> bool {
        self.unsolved_counts[usize::from(digit)] == 0
    }

    /// Returns the number of cells still unsolved.
    #[must_use]
    pub const fn num_unsolved(&self) -> u8 {
        self.unsolved_counts[0]
    }

    /// Returns the cell at `pos`.
    #[must_use]
    pub fn cell(&self, pos: Pos) -> &Cell {
        &self.cells[usize::from(pos.index())]
    }

    /// Returns an iterator over all 81 cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Places an initial clue at `pos` and marks it as a given.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::DigitOvercount`] if the clue would be the tenth
    /// instance of its digit.
    pub fn given_value(&mut self, pos: Pos, value: u8) -> Result<(), StateError> {
        self.cells[usize::from(pos.index())].given_value(value);
        self.update_unsolved_counts(pos, value)
    }

    /// Places a solved value at `pos`.
    ///
    /// Idempotent: returns `Ok(false)` when the cell already holds `value`.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::ConflictingValue`] when the cell holds a
    /// different value, and [`StateError::DigitOvercount`] when the digit
    /// counter would go negative.
    pub fn place_value(&mut self, pos: Pos, value: u8) -> Result<bool, StateError> {
        let cell = &mut self.cells[usize::from(pos.index())];
        if let Some(existing) = cell.value() {
            if existing != value {
                return Err(StateError::ConflictingValue {
                    pos,
                    existing,
                    value,
                });
            }
            return Ok(false);
        }

        cell.place_value(value);
        self.update_unsolved_counts(pos, value)?;
        Ok(true)
    }

    /// Removes `value` from the candidates of the cell at `pos`.
    ///
    /// No-op on solved cells. Returns `true` if a candidate was removed.
    pub fn remove_candidate(&mut self, pos: Pos, value: u8) -> bool {
        let cell = &mut self.cells[usize::from(pos.index())];
        !cell.is_solved() && cell.remove_candidate(value)
    }

    fn update_unsolved_counts(&mut self, pos: Pos, value: u8) -> Result<(), StateError> {
        self.unsolved_counts[0] -= 1;
        let count = &mut self.unsolved_counts[usize::from(value)];
        *count = count
            .checked_sub(1)
            .ok_or(StateError::DigitOvercount { pos, value })?;
        Ok(())
    }
}
