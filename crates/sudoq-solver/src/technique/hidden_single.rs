//! Hidden singles.

use crate::{SolutionStep, Solver, TechniqueKind, technique::Technique};

/// Places the value of any cell matching the "Hidden Single" pattern.
///
/// A hidden single is the only remaining location for a value within a
/// house. Together with the naked single (checked eagerly on every
/// candidate removal), this is the only pattern that detects an exact
/// solution for a cell; everything later in the catalog merely eliminates
/// candidates.
#[derive(Debug, Default, Clone, Copy)]
pub struct HiddenSingle;

impl Technique for HiddenSingle {
    fn kind(&self) -> TechniqueKind {
        TechniqueKind::HiddenSingle
    }

    fn find(&self, solver: &Solver) -> Option<SolutionStep> {
        for house in solver.houses() {
            for (value, locs) in house.iter_unsolved() {
                if let Some(loc) = locs.single() {
                    let pos = house.cell(loc);
                    return Some(
                        SolutionStep::new(TechniqueKind::HiddenSingle)
                            .with_house(house.id())
                            .with_placed_value(pos, value),
                    );
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use sudoq_core::{Pos, Puzzle};

    use super::*;

    #[test]
    fn test_finds_single_location_in_row() {
        let mut solver = Solver::new(Puzzle::new()).unwrap();
        let target = Pos::new(0, 4);
        for col in 0..9 {
            if col != 4 {
                solver.remove_cell_candidate(Pos::new(0, col), 7).unwrap();
            }
        }

        let step = HiddenSingle.find(&solver).expect("hidden single");
        assert_eq!(step.placed_value(), Some((target, 7)));
        assert_eq!(step.to_string(), "Hidden Single: 7 in r1 => r1c5=7");

        solver.apply_step(step).unwrap();
        assert_eq!(solver.cell(target).value(), Some(7));
    }

    #[test]
    fn test_no_match_on_empty_puzzle() {
        let solver = Solver::new(Puzzle::new()).unwrap();
        assert!(HiddenSingle.find(&solver).is_none());
    }
}
