//! Basic fish: X-Wing, Swordfish, and Jellyfish.
//!
//! A fish of size N picks N base lines in which a value is confined to at
//! most N locations, such that the union of those locations spans exactly N
//! cross-lines. The value must then land on the base lines within those
//! cross-lines, so it can be eliminated from every other cell of the
//! cross-lines. Rows are tried as bases with columns as covers, then the
//! orientation is swapped.

use itertools::Itertools as _;
use sudoq_core::{DigitSet, LocSet};

use crate::{SolutionStep, Solver, TechniqueKind, house::House, technique::Technique};

fn find_fish(solver: &Solver, size: usize, kind: TechniqueKind) -> Option<SolutionStep> {
    find_in_lines(solver, solver.rows(), solver.columns(), size, kind)
        .or_else(|| find_in_lines(solver, solver.columns(), solver.rows(), size, kind))
}

#[expect(clippy::cast_possible_truncation)]
fn find_in_lines(
    solver: &Solver,
    bases: &[House; 9],
    covers: &[House; 9],
    size: usize,
    kind: TechniqueKind,
) -> Option<SolutionStep> {
    for value in 1..=9 {
        // Base lines where the value still fits but is confined to at most
        // `size` locations. A single location would be a hidden single, not
        // part of a fish.
        let eligible: Vec<usize> = (0..9)
            .filter(|&i| (2..=size).contains(&bases[i].num_locations(value)))
            .collect();
        if eligible.len() < size {
            continue;
        }

        for combo in eligible.iter().copied().combinations(size) {
            let union = combo
                .iter()
                .fold(LocSet::EMPTY, |acc, &i| acc.union(bases[i].locations(value)));
            if union.len() != size {
                continue;
            }

            let base_locs: LocSet = combo.iter().map(|&i| i as u8).collect();
            let mut step = SolutionStep::new(kind)
                .with_values([value])
                .with_bases(combo.iter().map(|&i| bases[i].id()))
                .with_covers(union.iter().map(|l| covers[usize::from(l)].id()));
            if solver.eliminate_from_other_locs_multi(
                union.iter().map(|l| &covers[usize::from(l)]),
                DigitSet::from_value(value),
                base_locs,
                &mut step,
            ) {
                return Some(step);
            }
        }
    }
    None
}

macro_rules! fish_technique {
    ($(#[$doc:meta])* $name:ident, $size:expr, $kind:expr) => {
        $(#[$doc])*
        #[derive(Debug, Default, Clone, Copy)]
        pub struct $name;

        impl Technique for $name {
            fn kind(&self) -> TechniqueKind {
                $kind
            }

            fn find(&self, solver: &Solver) -> Option<SolutionStep> {
                find_fish(solver, $size, $kind)
            }
        }
    };
}

fish_technique!(
    /// A fish of size two: a value appearing in exactly two cells of two
    /// lines, aligned in two cross-lines.
    XWing,
    2,
    TechniqueKind::XWing
);

fish_technique!(
    /// A fish of size three.
    Swordfish,
    3,
    TechniqueKind::Swordfish
);

fish_technique!(
    /// A fish of size four.
    Jellyfish,
    4,
    TechniqueKind::Jellyfish
);

#[cfg(test)]
mod tests {
    use sudoq_core::{Pos, Puzzle};

    use super::*;

    fn confine_value_in_row(solver: &mut Solver, row: u8, value: u8, cols: &[u8]) {
        for col in 0..9 {
            if !cols.contains(&col) {
                solver
                    .remove_cell_candidate(Pos::new(row, col), value)
                    .unwrap();
            }
        }
    }

    #[test]
    fn test_x_wing_eliminates_in_cover_columns() {
        let mut solver = Solver::new(Puzzle::new()).unwrap();
        confine_value_in_row(&mut solver, 1, 5, &[2, 6]);
        confine_value_in_row(&mut solver, 4, 5, &[2, 6]);

        let step = XWing.find(&solver).expect("x-wing");
        assert_eq!(step.to_string().split(" => ").next(), Some("X-Wing: 5 r25 c37"));
        solver.apply_step(step).unwrap();

        for row in [0, 2, 3, 5, 6, 7, 8] {
            assert!(!solver.cell(Pos::new(row, 2)).has_candidate(5));
            assert!(!solver.cell(Pos::new(row, 6)).has_candidate(5));
        }
        for pos in [Pos::new(1, 2), Pos::new(1, 6), Pos::new(4, 2), Pos::new(4, 6)] {
            assert!(solver.cell(pos).has_candidate(5), "corner {pos} must keep 5");
        }
    }

    #[test]
    fn test_swordfish_with_two_location_bases() {
        // Three rows whose locations pairwise overlap and union to three
        // columns; no single row holds all three.
        let mut solver = Solver::new(Puzzle::new()).unwrap();
        confine_value_in_row(&mut solver, 0, 4, &[1, 4]);
        confine_value_in_row(&mut solver, 3, 4, &[4, 7]);
        confine_value_in_row(&mut solver, 6, 4, &[1, 7]);

        let step = Swordfish.find(&solver).expect("swordfish");
        solver.apply_step(step).unwrap();

        for row in [1, 2, 4, 5, 7, 8] {
            for col in [1, 4, 7] {
                assert!(
                    !solver.cell(Pos::new(row, col)).has_candidate(4),
                    "expected 4 gone at r{}c{}",
                    row + 1,
                    col + 1
                );
            }
        }
    }

    #[test]
    fn test_jellyfish_eliminates_in_four_columns() {
        let mut solver = Solver::new(Puzzle::new()).unwrap();
        for row in [0, 2, 4, 6] {
            confine_value_in_row(&mut solver, row, 9, &[0, 3, 6, 8]);
        }

        let step = Jellyfish.find(&solver).expect("jellyfish");
        solver.apply_step(step).unwrap();

        for row in [1, 3, 5, 7, 8] {
            for col in [0, 3, 6, 8] {
                assert!(!solver.cell(Pos::new(row, col)).has_candidate(9));
            }
        }
    }

    #[test]
    fn test_no_fish_on_empty_puzzle() {
        let solver = Solver::new(Puzzle::new()).unwrap();
        assert!(XWing.find(&solver).is_none());
        assert!(Swordfish.find(&solver).is_none());
        assert!(Jellyfish.find(&solver).is_none());
    }
}
