//! Logical and exact-cover sudoku solvers.
//!
//! Two tightly coupled cores share the puzzle model from [`sudoq_core`]:
//!
//! - [`Solver`] applies a prioritized cascade of deductive techniques,
//!   keeping per-cell candidate sets and per-house location indices in
//!   lockstep, and records every deduction as a [`SolutionStep`].
//! - [`Dlx`] encodes the puzzle as a 324-column exact-cover problem and
//!   runs Algorithm X over Dancing Links as a complete fallback.
//!
//! The usual flow: build a [`Puzzle`](sudoq_core::Puzzle) from the givens,
//! run [`Solver::solve`], and escalate to
//! [`Solver::solve_exact_cover`] if the fixpoint loop exits with cells
//! still open.
//!
//! ```
//! use sudoq_core::{Pos, Puzzle};
//! use sudoq_solver::Solver;
//!
//! let mut puzzle = Puzzle::new();
//! puzzle.given_value(Pos::new(0, 0), 5)?;
//!
//! let mut solver = Solver::new(puzzle)?;
//! solver.solve()?;
//! if !solver.puzzle().is_solved() {
//!     solver.solve_exact_cover()?;
//! }
//! # Ok::<(), sudoq_core::StateError>(())
//! ```

pub use self::{
    dlx::{Dlx, MatrixInfo, SearchStats, ValidationError},
    house::{House, HouseId, HouseKind},
    solver::{Solver, StepSink},
    step::{Candidate, SolutionStep, TechniqueKind},
};

pub mod dlx;
pub mod house;
pub mod solver;
pub mod step;
pub mod technique;
pub mod testing;
