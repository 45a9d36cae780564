//! The deductive technique catalog.
//!
//! Each technique implements the [`Technique`] trait: it inspects the
//! solver's candidate indices and returns the first applicable
//! [`SolutionStep`], or `None` when the pattern yields nothing. Techniques
//! never mutate state and never fail; the solver applies the returned step.
//!
//! [`catalog`] lists the techniques in fixpoint-loop order, simplest first.
//! The loop restarts from the top after every applied step, so the ordering
//! doubles as an implicit difficulty rating of the solution path.

pub use self::{
    avoidable_rectangle::AvoidableRectangle,
    fish::{Jellyfish, Swordfish, XWing},
    hidden_single::HiddenSingle,
    intersections::{LockedCandidate, PointingTuple},
    subsets::{HiddenPair, HiddenQuadruple, HiddenTriple, NakedPair, NakedQuadruple, NakedTriple},
    unique_rectangle::UniqueRectangle,
    wings::{XyWing, XyzWing},
};

use crate::{SolutionStep, Solver, TechniqueKind};

mod avoidable_rectangle;
mod fish;
mod hidden_single;
mod intersections;
mod subsets;
mod unique_rectangle;
mod wings;

/// A deductive solving technique.
pub trait Technique {
    /// Returns the kind identifier of this technique.
    fn kind(&self) -> TechniqueKind;

    /// Finds the first applicable instance of the pattern.
    ///
    /// Returns a step with at least one scheduled elimination (or, for
    /// hidden singles, a placement), or `None` when the technique makes no
    /// progress.
    fn find(&self, solver: &Solver) -> Option<SolutionStep>;
}

/// A boxed technique.
pub type BoxedTechnique = Box<dyn Technique>;

/// Returns the full catalog in fixpoint-loop order.
#[must_use]
pub fn catalog() -> Vec<BoxedTechnique> {
    vec![
        Box::new(HiddenSingle),
        Box::new(NakedPair),
        Box::new(LockedCandidate),
        Box::new(PointingTuple),
        Box::new(HiddenPair),
        Box::new(NakedTriple),
        Box::new(XWing),
        Box::new(HiddenTriple),
        Box::new(NakedQuadruple),
        Box::new(XyWing),
        Box::new(AvoidableRectangle),
        Box::new(XyzWing),
        Box::new(HiddenQuadruple),
        Box::new(UniqueRectangle),
        Box::new(Swordfish),
        Box::new(Jellyfish),
    ]
}
