//! Naked and hidden subsets of sizes two to four.
//!
//! A naked k-tuple is k cells of a house whose candidate union has exactly
//! k values: those values can go nowhere else in the house. A hidden
//! k-tuple is the mirror image: k values whose location union has exactly
//! k cells, so those cells can hold nothing else. Both searches share one
//! parameterized implementation; the six catalog entries fix the size.

use itertools::Itertools as _;
use sudoq_core::{DigitSet, LocSet};

use crate::{SolutionStep, Solver, TechniqueKind, technique::Technique};

fn find_naked_subset(solver: &Solver, size: usize, kind: TechniqueKind) -> Option<SolutionStep> {
    for house in solver.houses() {
        // Only cells with 2..=size candidates can participate.
        let locs: Vec<u8> = (0..9)
            .filter(|&l| {
                let n = solver.cell(house.cell(l)).num_candidates();
                (2..=size).contains(&n)
            })
            .collect();
        if locs.len() < size {
            continue;
        }

        for combo in locs.iter().copied().combinations(size) {
            let values = combo
                .iter()
                .map(|&l| solver.cell(house.cell(l)).candidates())
                .fold(DigitSet::EMPTY, DigitSet::union);
            if values.len() != size {
                continue;
            }

            let loc_set: LocSet = combo.iter().copied().collect();
            let mut step = SolutionStep::new(kind)
                .with_house(house.id())
                .with_values(values)
                .with_cells(house.cells_at(loc_set));
            if solver.eliminate_from_other_locs(house, values, loc_set, &mut step) {
                return Some(step);
            }
        }
    }
    None
}

fn find_hidden_subset(solver: &Solver, size: usize, kind: TechniqueKind) -> Option<SolutionStep> {
    for house in solver.houses() {
        // Only values with 2..=size remaining locations can participate.
        let values: Vec<u8> = house
            .iter_unsolved()
            .filter(|(_, locs)| (2..=size).contains(&locs.len()))
            .map(|(value, _)| value)
            .collect();
        if values.len() < size {
            continue;
        }

        for combo in values.iter().copied().combinations(size) {
            let loc_set = combo
                .iter()
                .map(|&v| house.locations(v))
                .fold(LocSet::EMPTY, LocSet::union);
            if loc_set.len() != size {
                continue;
            }

            let value_set: DigitSet = combo.iter().copied().collect();
            let mut step = SolutionStep::new(kind)
                .with_house(house.id())
                .with_values(value_set)
                .with_cells(house.cells_at(loc_set));
            if solver.eliminate_other_values(house, value_set, loc_set, &mut step) {
                return Some(step);
            }
        }
    }
    None
}

macro_rules! subset_technique {
    ($(#[$doc:meta])* $name:ident, $finder:ident, $size:expr, $kind:expr) => {
        $(#[$doc])*
        #[derive(Debug, Default, Clone, Copy)]
        pub struct $name;

        impl Technique for $name {
            fn kind(&self) -> TechniqueKind {
                $kind
            }

            fn find(&self, solver: &Solver) -> Option<SolutionStep> {
                $finder(solver, $size, $kind)
            }
        }
    };
}

subset_technique!(
    /// Two cells in a house sharing the same two candidates eliminate those
    /// values from the rest of the house.
    NakedPair,
    find_naked_subset,
    2,
    TechniqueKind::NakedPair
);

subset_technique!(
    /// Three cells whose candidate union has size three.
    NakedTriple,
    find_naked_subset,
    3,
    TechniqueKind::NakedTriple
);

subset_technique!(
    /// Four cells whose candidate union has size four.
    NakedQuadruple,
    find_naked_subset,
    4,
    TechniqueKind::NakedQuadruple
);

subset_technique!(
    /// Two values confined to the same two cells eliminate every other
    /// candidate from those cells.
    HiddenPair,
    find_hidden_subset,
    2,
    TechniqueKind::HiddenPair
);

subset_technique!(
    /// Three values confined to the same three cells.
    HiddenTriple,
    find_hidden_subset,
    3,
    TechniqueKind::HiddenTriple
);

subset_technique!(
    /// Four values confined to the same four cells.
    HiddenQuadruple,
    find_hidden_subset,
    4,
    TechniqueKind::HiddenQuadruple
);
