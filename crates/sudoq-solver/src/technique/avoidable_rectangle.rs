//! Avoidable rectangles.

use crate::{SolutionStep, Solver, TechniqueKind, technique::Technique};

/// Placeholder for the "Avoidable Rectangle" technique.
///
/// The kind is part of the step vocabulary, but no detection is implemented:
/// [`Technique::find`] always reports no progress and the fixpoint loop
/// moves on to the next technique.
#[derive(Debug, Default, Clone, Copy)]
pub struct AvoidableRectangle;

impl Technique for AvoidableRectangle {
    fn kind(&self) -> TechniqueKind {
        TechniqueKind::AvoidableRectangle
    }

    fn find(&self, _solver: &Solver) -> Option<SolutionStep> {
        None
    }
}

#[cfg(test)]
mod tests {
    use sudoq_core::Puzzle;

    use super::*;

    #[test]
    fn test_never_matches() {
        let solver = Solver::new(Puzzle::new()).unwrap();
        assert!(AvoidableRectangle.find(&solver).is_none());
    }
}
