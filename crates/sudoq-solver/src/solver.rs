//! The logical solver core.
//!
//! [`Solver`] owns the puzzle and the twenty-seven houses, and keeps the two
//! mirrored candidate representations consistent: the per-cell candidate
//! sets and the per-house value→locations index. Every update flows through
//! [`Solver::remove_cell_candidate`], which touches both sides and cascades
//! naked-single placements. Techniques never mutate state; they produce
//! [`SolutionStep`]s that the solver logs and applies.

use sudoq_core::{DigitSet, LocSet, Pos, Puzzle, StateError};
use tracing::{debug, trace};

use crate::{
    house::{House, HouseKind},
    step::{SolutionStep, TechniqueKind},
    technique,
};

/// Receives each solution step as it is applied.
///
/// The solver always keeps its own ordered step log; a sink is for callers
/// that want to observe steps as they happen (rendering, tracing, replay).
pub trait StepSink {
    /// Called once per applied step, before the step's changes take effect.
    fn record(&mut self, step: &SolutionStep);
}

impl<F: FnMut(&SolutionStep)> StepSink for F {
    fn record(&mut self, step: &SolutionStep) {
        self(step);
    }
}

/// The constraint-propagating logical solver.
pub struct Solver {
    puzzle: Puzzle,
    rows: [House; 9],
    columns: [House; 9],
    boxes: [House; 9],
    steps: Vec<SolutionStep>,
    sink: Option<Box<dyn StepSink>>,
}

impl Solver {
    /// Creates a solver for `puzzle` and initializes candidates from the
    /// givens.
    ///
    /// Initialization already cascades naked singles, so the returned solver
    /// may hold a partially (or fully) solved puzzle.
    ///
    /// # Errors
    ///
    /// Returns a [`StateError`] if the givens are contradictory.
    pub fn new(puzzle: Puzzle) -> Result<Self, StateError> {
        Self::build(puzzle, None)
    }

    /// Like [`Solver::new`], with a sink observing every step from
    /// initialization onwards.
    ///
    /// # Errors
    ///
    /// Returns a [`StateError`] if the givens are contradictory.
    pub fn with_sink(puzzle: Puzzle, sink: Box<dyn StepSink>) -> Result<Self, StateError> {
        Self::build(puzzle, Some(sink))
    }

    #[expect(clippy::cast_possible_truncation)]
    fn build(puzzle: Puzzle, sink: Option<Box<dyn StepSink>>) -> Result<Self, StateError> {
        let mut solver = Self {
            puzzle,
            rows: std::array::from_fn(|i| House::new(HouseKind::Row, i as u8)),
            columns: std::array::from_fn(|i| House::new(HouseKind::Column, i as u8)),
            boxes: std::array::from_fn(|i| House::new(HouseKind::Box, i as u8)),
            steps: Vec::new(),
            sink,
        };
        solver.initialize()?;
        Ok(solver)
    }

    fn initialize(&mut self) -> Result<(), StateError> {
        debug!("processing initial puzzle state");
        let givens: Vec<(Pos, u8)> = self
            .puzzle
            .cells()
            .filter(|cell| cell.is_given())
            .filter_map(|cell| cell.value().map(|value| (cell.pos(), value)))
            .collect();
        for (pos, value) in givens {
            self.eliminate_candidates(pos, value)?;
        }
        Ok(())
    }

    /// Returns the puzzle in its current state.
    #[must_use]
    pub const fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    /// Consumes the solver and returns the puzzle.
    #[must_use]
    pub fn into_puzzle(self) -> Puzzle {
        self.puzzle
    }

    /// Returns the ordered log of applied steps.
    #[must_use]
    pub fn steps(&self) -> &[SolutionStep] {
        &self.steps
    }

    /// Returns the nine row houses.
    #[must_use]
    pub const fn rows(&self) -> &[House; 9] {
        &self.rows
    }

    /// Returns the nine column houses.
    #[must_use]
    pub const fn columns(&self) -> &[House; 9] {
        &self.columns
    }

    /// Returns the nine box houses.
    #[must_use]
    pub const fn boxes(&self) -> &[House; 9] {
        &self.boxes
    }

    /// Returns all twenty-seven houses: rows, then columns, then boxes.
    pub fn houses(&self) -> impl Iterator<Item = &House> {
        self.rows
            .iter()
            .chain(self.columns.iter())
            .chain(self.boxes.iter())
    }

    /// Returns the cell at `pos`.
    #[must_use]
    pub fn cell(&self, pos: Pos) -> &sudoq_core::Cell {
        self.puzzle.cell(pos)
    }

    /// Drives the fixpoint loop until the puzzle is solved or no technique
    /// makes progress.
    ///
    /// Each pass tries the catalog in order and applies the first step found,
    /// then restarts from the simplest technique. Exiting without a solved
    /// puzzle is not an error; the caller may escalate to the exact-cover
    /// engine via [`Solver::solve_exact_cover`].
    ///
    /// # Errors
    ///
    /// Returns a [`StateError`] if applying a step corrupts the puzzle,
    /// which indicates a malformed puzzle or a solver bug.
    pub fn solve(&mut self) -> Result<(), StateError> {
        let techniques = technique::catalog();
        let mut pass = 0u32;
        while !self.puzzle.is_solved() {
            pass += 1;
            debug!(pass, "solver pass");

            let mut found = None;
            for technique in &techniques {
                trace!(technique = technique.kind().name(), "trying technique");
                if let Some(step) = technique.find(self) {
                    found = Some(step);
                    break;
                }
            }
            let Some(step) = found else {
                break;
            };
            self.apply_step(step)?;
        }
        debug!(
            passes = pass,
            solved = self.puzzle.is_solved(),
            "solver finished"
        );
        Ok(())
    }

    /// Solves the puzzle with the exact-cover engine, writing the solution
    /// back on success.
    ///
    /// # Errors
    ///
    /// Returns a [`StateError`] if the recovered assignment conflicts with
    /// the puzzle, which indicates an inconsistent matrix.
    pub fn solve_exact_cover(&mut self) -> Result<bool, StateError> {
        crate::dlx::Dlx::new(&mut self.puzzle).solve()
    }

    /// Places `value` at `pos`, recording a step of the given kind.
    ///
    /// No-op when the cell already holds `value`. Placement removes `value`
    /// from the candidates of every cell seeing `pos`, cascading further
    /// naked singles.
    ///
    /// # Errors
    ///
    /// Returns a [`StateError`] on a conflicting placement.
    pub fn place_value(
        &mut self,
        pos: Pos,
        value: u8,
        kind: TechniqueKind,
    ) -> Result<(), StateError> {
        self.place_step(SolutionStep::new(kind).with_placed_value(pos, value))
    }

    /// Applies a step produced by a technique: removes its deleted
    /// candidates and, for placement steps, places the value.
    ///
    /// The step is recorded in the log (and the sink) before its changes
    /// take effect.
    ///
    /// # Errors
    ///
    /// Returns a [`StateError`] if a placement conflicts.
    pub fn apply_step(&mut self, step: SolutionStep) -> Result<(), StateError> {
        if step.is_single() {
            return self.place_step(step);
        }
        debug!(step = %step, "applying step");
        let deleted = step.deleted_candidates().to_vec();
        self.record(step);
        for candidate in deleted {
            self.remove_cell_candidate(Pos::from_index(candidate.index), candidate.value)?;
        }
        Ok(())
    }

    fn place_step(&mut self, step: SolutionStep) -> Result<(), StateError> {
        let Some((pos, value)) = step.placed_value() else {
            return Ok(());
        };
        if self.puzzle.place_value(pos, value)? {
            debug!(step = %step, "placed value");
            self.record(step);
            self.eliminate_candidates(pos, value)?;
        }
        Ok(())
    }

    /// Removes `value` as a candidate from the row, column, and box of
    /// `pos`, and removes `pos` as a location for every other value in
    /// those houses.
    ///
    /// # Errors
    ///
    /// Returns a [`StateError`] if the cascade reaches a conflicting
    /// placement.
    pub fn eliminate_candidates(&mut self, pos: Pos, value: u8) -> Result<(), StateError> {
        let (row, col) = (pos.row(), pos.col());
        let (box_index, slot) = pos.box_coords();
        self.rows[usize::from(row)].remove_candidate_value(value, col);
        self.columns[usize::from(col)].remove_candidate_value(value, row);
        self.boxes[usize::from(box_index)].remove_candidate_value(value, slot);

        let (base_row, base_col) = (row / 3 * 3, col / 3 * 3);
        for i in 0..9 {
            self.remove_cell_candidate(Pos::new(row, i), value)?;
            self.remove_cell_candidate(Pos::new(i, col), value)?;
            self.remove_cell_candidate(Pos::new(base_row + i / 3, base_col + i % 3), value)?;
        }
        Ok(())
    }

    /// Removes `value` from the candidates of the cell at `pos`, mirroring
    /// the removal into the three houses containing the cell.
    ///
    /// No-op when the cell is solved or lacks the candidate. A cell left
    /// with exactly one candidate is immediately placed as a naked single;
    /// the recursion is bounded by the number of unsolved cells.
    ///
    /// # Errors
    ///
    /// Returns a [`StateError`] if the cascade reaches a conflicting
    /// placement.
    pub fn remove_cell_candidate(&mut self, pos: Pos, value: u8) -> Result<(), StateError> {
        {
            let cell = self.puzzle.cell(pos);
            if cell.is_solved() || !cell.has_candidate(value) {
                return Ok(());
            }
        }
        self.puzzle.remove_candidate(pos, value);

        let (box_index, slot) = pos.box_coords();
        self.rows[usize::from(pos.row())].remove_candidate_cell(value, pos.col());
        self.columns[usize::from(pos.col())].remove_candidate_cell(value, pos.row());
        self.boxes[usize::from(box_index)].remove_candidate_cell(value, slot);

        if let Some(only) = self.puzzle.cell(pos).candidates().single() {
            self.place_value(pos, only, TechniqueKind::NakedSingle)?;
        }
        Ok(())
    }

    fn record(&mut self, step: SolutionStep) {
        if let Some(sink) = &mut self.sink {
            sink.record(&step);
        }
        self.steps.push(step);
    }

    /// Schedules deletion of every candidate in `values` from the cells of
    /// `house` whose local index is not in `locs`. Returns `true` if at
    /// least one deletion was scheduled.
    pub(crate) fn eliminate_from_other_locs(
        &self,
        house: &House,
        values: DigitSet,
        locs: LocSet,
        step: &mut SolutionStep,
    ) -> bool {
        let mut found = false;
        for l in 0..9 {
            if locs.contains(l) {
                continue;
            }
            let cell = self.puzzle.cell(house.cell(l));
            for value in values {
                if cell.has_candidate(value) {
                    step.delete_candidate(cell.pos(), value);
                    found = true;
                }
            }
        }
        found
    }

    /// [`Self::eliminate_from_other_locs`] across several houses. Every
    /// house is evaluated; there is no short-circuit between them.
    pub(crate) fn eliminate_from_other_locs_multi<'a>(
        &self,
        houses: impl IntoIterator<Item = &'a House>,
        values: DigitSet,
        locs: LocSet,
        step: &mut SolutionStep,
    ) -> bool {
        let mut updated = false;
        for house in houses {
            updated |= self.eliminate_from_other_locs(house, values, locs, step);
        }
        updated
    }

    /// Schedules deletion of every candidate not in `values` from the cells
    /// of `house` at the local indices in `locs`.
    pub(crate) fn eliminate_other_values(
        &self,
        house: &House,
        values: DigitSet,
        locs: LocSet,
        step: &mut SolutionStep,
    ) -> bool {
        let mut found = false;
        for pos in house.cells_at(locs) {
            for value in self.puzzle.cell(pos).candidates() {
                if !values.contains(value) {
                    step.delete_candidate(pos, value);
                    found = true;
                }
            }
        }
        found
    }

    /// Schedules deletion of every candidate in `values` from the cell at
    /// `pos`.
    pub(crate) fn eliminate_values_from_cell(
        &self,
        pos: Pos,
        values: DigitSet,
        step: &mut SolutionStep,
    ) -> bool {
        let cell = self.puzzle.cell(pos);
        let mut found = false;
        for value in values {
            if cell.has_candidate(value) {
                step.delete_candidate(pos, value);
                found = true;
            }
        }
        found
    }
}
