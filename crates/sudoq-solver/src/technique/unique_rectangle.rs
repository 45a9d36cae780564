//! Unique rectangles.

use sudoq_core::Pos;

use crate::{SolutionStep, Solver, TechniqueKind, technique::Technique};

/// Three corners of a rectangle sharing one candidate pair.
///
/// If the fourth corner kept either value of the pair, the four corners
/// could host the pair two ways and the puzzle would not have a unique
/// solution. Assuming uniqueness, both values can be eliminated from the
/// fourth corner. The wings must lie in different boxes with exactly one of
/// them in the base's box, otherwise the four corners span only two boxes
/// and the argument does not hold.
#[derive(Debug, Default, Clone, Copy)]
pub struct UniqueRectangle;

impl Technique for UniqueRectangle {
    fn kind(&self) -> TechniqueKind {
        TechniqueKind::UniqueRectangle
    }

    fn find(&self, solver: &Solver) -> Option<SolutionStep> {
        Pos::all()
            .filter(|&pos| solver.cell(pos).num_candidates() == 2)
            .find_map(|base| check_base_corner(solver, base))
    }
}

fn check_base_corner(solver: &Solver, base: Pos) -> Option<SolutionStep> {
    let pair = solver.cell(base).candidates();
    let same_pair = |pos: Pos| solver.cell(pos).candidates() == pair;

    let row_wing = (0..9)
        .map(|col| Pos::new(base.row(), col))
        .find(|&pos| pos != base && same_pair(pos))?;
    let col_wing = (0..9)
        .map(|row| Pos::new(row, base.col()))
        .find(|&pos| pos != base && same_pair(pos))?;

    if row_wing.box_index() == col_wing.box_index()
        || (row_wing.box_index() != base.box_index() && col_wing.box_index() != base.box_index())
    {
        return None;
    }

    // The fourth corner closes the rectangle: the column wing's row crossed
    // with the row wing's column.
    let fourth = Pos::new(col_wing.row(), row_wing.col());
    let mut step = SolutionStep::new(TechniqueKind::UniqueRectangle)
        .with_values(pair)
        .with_cells([base, row_wing, col_wing, fourth]);
    solver
        .eliminate_values_from_cell(fourth, pair, &mut step)
        .then_some(step)
}
