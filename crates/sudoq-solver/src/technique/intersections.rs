//! Line/box intersections: locked candidates and pointing tuples.
//!
//! The two techniques are deliberately disjoint mirrors of each other:
//! a locked candidate is a value confined to a single box *within a line*,
//! eliminating the value from the rest of that box; a pointing tuple is a
//! value confined to a single line *within a box*, eliminating the value
//! from the rest of that line.

use sudoq_core::{DigitSet, LocSet};

use crate::{SolutionStep, Solver, TechniqueKind, house::House, technique::Technique};

/// A value confined to one box within a row or column.
#[derive(Debug, Default, Clone, Copy)]
pub struct LockedCandidate;

impl Technique for LockedCandidate {
    fn kind(&self) -> TechniqueKind {
        TechniqueKind::LockedCandidate
    }

    fn find(&self, solver: &Solver) -> Option<SolutionStep> {
        solver
            .rows()
            .iter()
            .chain(solver.columns().iter())
            .find_map(|line| check_line(solver, line))
    }
}

fn check_line(solver: &Solver, line: &House) -> Option<SolutionStep> {
    for (value, locs) in line.iter_unsolved() {
        // More than 3 locations cannot all fall in one box.
        if locs.len() > 3 {
            continue;
        }
        let Some(box_index) = line.shared_box(locs) else {
            continue;
        };

        let box_house = &solver.boxes()[usize::from(box_index)];
        let box_locs: LocSet = line.cells_at(locs).map(|pos| pos.box_coords().1).collect();
        let mut step = SolutionStep::new(TechniqueKind::LockedCandidate)
            .with_house(line.id())
            .with_values([value]);
        if solver.eliminate_from_other_locs(box_house, DigitSet::from_value(value), box_locs, &mut step)
        {
            return Some(step);
        }
    }
    None
}

/// A value confined to one row or column within a box.
#[derive(Debug, Default, Clone, Copy)]
pub struct PointingTuple;

impl Technique for PointingTuple {
    fn kind(&self) -> TechniqueKind {
        TechniqueKind::PointingTuple
    }

    fn find(&self, solver: &Solver) -> Option<SolutionStep> {
        solver
            .boxes()
            .iter()
            .find_map(|box_house| check_box(solver, box_house))
    }
}

fn check_box(solver: &Solver, box_house: &House) -> Option<SolutionStep> {
    for (value, locs) in box_house.iter_unsolved() {
        // More than 3 locations cannot all fall in one line.
        if locs.len() > 3 {
            continue;
        }
        let value_set = DigitSet::from_value(value);

        if let Some(row) = box_house.shared_row(locs) {
            let cols: LocSet = box_house.cells_at(locs).map(sudoq_core::Pos::col).collect();
            let mut step = SolutionStep::new(TechniqueKind::PointingTuple)
                .with_house(box_house.id())
                .with_values([value]);
            if solver.eliminate_from_other_locs(
                &solver.rows()[usize::from(row)],
                value_set,
                cols,
                &mut step,
            ) {
                return Some(step);
            }
        }
        if let Some(col) = box_house.shared_col(locs) {
            let rows: LocSet = box_house.cells_at(locs).map(sudoq_core::Pos::row).collect();
            let mut step = SolutionStep::new(TechniqueKind::PointingTuple)
                .with_house(box_house.id())
                .with_values([value]);
            if solver.eliminate_from_other_locs(
                &solver.columns()[usize::from(col)],
                value_set,
                rows,
                &mut step,
            ) {
                return Some(step);
            }
        }
    }
    None
}
