//! XY-Wing and XYZ-Wing.
//!
//! Both patterns hinge on a pivot cell and two pincer cells that the pivot
//! sees but which cannot see each other. Whichever way the pivot resolves,
//! one pincer must hold the shared value z, so z can be eliminated from
//! every cell that sees all the pattern's z-carrying cells.

use sudoq_core::Pos;

use crate::{SolutionStep, Solver, TechniqueKind, technique::Technique};

/// A bicandidate pivot `{x,y}` with pincers `{x,z}` and `{y,z}`.
#[derive(Debug, Default, Clone, Copy)]
pub struct XyWing;

impl Technique for XyWing {
    fn kind(&self) -> TechniqueKind {
        TechniqueKind::XyWing
    }

    fn find(&self, solver: &Solver) -> Option<SolutionStep> {
        let bicandidates: Vec<Pos> = Pos::all()
            .filter(|&pos| solver.cell(pos).num_candidates() == 2)
            .collect();
        // A pivot and two pincers are needed.
        if bicandidates.len() < 3 {
            return None;
        }
        bicandidates
            .iter()
            .find_map(|&pivot| check_xy_pivot(solver, pivot, &bicandidates))
    }
}

fn check_xy_pivot(solver: &Solver, pivot: Pos, bicandidates: &[Pos]) -> Option<SolutionStep> {
    let mut values = solver.cell(pivot).candidates().iter();
    let x = values.next()?;
    let y = values.next()?;

    // Partition the visible bicandidates into cells holding x but not y and
    // cells holding y but not x.
    let mut x_cells = Vec::new();
    let mut y_cells = Vec::new();
    for &pos in bicandidates {
        if pos == pivot || !pos.sees(pivot) {
            continue;
        }
        let cell = solver.cell(pos);
        match (cell.has_candidate(x), cell.has_candidate(y)) {
            (true, false) => x_cells.push(pos),
            (false, true) => y_cells.push(pos),
            _ => {}
        }
    }
    if x_cells.is_empty() || y_cells.is_empty() {
        return None;
    }

    for &x_cell in &x_cells {
        let Some(z) = solver
            .cell(x_cell)
            .candidates()
            .iter()
            .find(|&v| v != x)
        else {
            continue;
        };
        for &y_cell in &y_cells {
            if !solver.cell(y_cell).has_candidate(z) || x_cell.sees(y_cell) {
                continue;
            }
            let mut step = SolutionStep::new(TechniqueKind::XyWing)
                .with_values([x, y, z])
                .with_cells([pivot, x_cell, y_cell]);
            if eliminate_seen_by_both(solver, z, x_cell, y_cell, &mut step) {
                return Some(step);
            }
        }
    }
    None
}

/// Schedules removal of `z` from every cell that sees both pincers,
/// scanning the houses containing `x_cell`. Assumes the pincers cannot see
/// each other.
fn eliminate_seen_by_both(
    solver: &Solver,
    z: u8,
    x_cell: Pos,
    y_cell: Pos,
    step: &mut SolutionStep,
) -> bool {
    let houses = [
        &solver.rows()[usize::from(x_cell.row())],
        &solver.columns()[usize::from(x_cell.col())],
        &solver.boxes()[usize::from(x_cell.box_index())],
    ];
    let mut found = false;
    for house in houses {
        for pos in house.cells_at(house.locations(z)) {
            if pos.sees(y_cell) {
                step.delete_candidate(pos, z);
                found = true;
            }
        }
    }
    found
}

/// A tricandidate pivot `{x,y,z}` with a box pincer `{x,z}` and a line
/// pincer `{y,z}`.
#[derive(Debug, Default, Clone, Copy)]
pub struct XyzWing;

impl Technique for XyzWing {
    fn kind(&self) -> TechniqueKind {
        TechniqueKind::XyzWing
    }

    fn find(&self, solver: &Solver) -> Option<SolutionStep> {
        Pos::all()
            .filter(|&pos| solver.cell(pos).num_candidates() == 3)
            .find_map(|pivot| check_xyz_pivot(solver, pivot))
    }
}

fn check_xyz_pivot(solver: &Solver, pivot: Pos) -> Option<SolutionStep> {
    let pivot_values = solver.cell(pivot).candidates();

    // The box pincer holds two of the pivot's three values. The pivot
    // itself cannot match: it has three candidates.
    let box_house = &solver.boxes()[usize::from(pivot.box_index())];
    let xz_cells: Vec<Pos> = (0..9)
        .map(|l| box_house.cell(l))
        .filter(|&pos| {
            let cell = solver.cell(pos);
            cell.num_candidates() == 2 && cell.candidates().is_subset(pivot_values)
        })
        .collect();

    for &xz_cell in &xz_cells {
        // The pivot value missing from the box pincer.
        let Some(y) = pivot_values
            .iter()
            .find(|&v| !solver.cell(xz_cell).has_candidate(v))
        else {
            continue;
        };

        let is_yz_pincer = |pos: Pos| {
            let cell = solver.cell(pos);
            pos.box_index() != pivot.box_index()
                && cell.num_candidates() == 2
                && cell.has_candidate(y)
                && cell
                    .candidates()
                    .iter()
                    .all(|v| v == y || solver.cell(xz_cell).has_candidate(v))
        };

        let row_house = &solver.rows()[usize::from(pivot.row())];
        let col_house = &solver.columns()[usize::from(pivot.col())];
        for yz_cell in (0..9)
            .map(|l| row_house.cell(l))
            .chain((0..9).map(|l| col_house.cell(l)))
            .filter(|&pos| is_yz_pincer(pos))
        {
            let mut step = SolutionStep::new(TechniqueKind::XyzWing)
                .with_values(pivot_values)
                .with_cells([pivot, xz_cell, yz_cell]);
            if eliminate_seen_by_all(solver, pivot, xz_cell, yz_cell, &mut step) {
                return Some(step);
            }
        }
    }
    None
}

/// Schedules removal of the shared value z from cells seeing all three wing
/// cells. Only the pivot's box can contain such cells, so the scan is the
/// box's z locations that see the line pincer.
fn eliminate_seen_by_all(
    solver: &Solver,
    pivot: Pos,
    xz_cell: Pos,
    yz_cell: Pos,
    step: &mut SolutionStep,
) -> bool {
    let Some(z) = solver
        .cell(xz_cell)
        .candidates()
        .intersection(solver.cell(yz_cell).candidates())
        .single()
    else {
        return false;
    };

    let box_house = &solver.boxes()[usize::from(pivot.box_index())];
    let mut found = false;
    for pos in box_house.cells_at(box_house.locations(z)) {
        if pos != pivot && pos != xz_cell && pos.sees(yz_cell) {
            step.delete_candidate(pos, z);
            found = true;
        }
    }
    found
}
