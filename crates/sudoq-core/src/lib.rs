//! Core data model for the sudoq solvers.
//!
//! This crate provides the puzzle-side building blocks shared by the logical
//! and exact-cover solvers:
//!
//! - [`bit_set_9`]: generic 9-bit set over a `u16` mask
//! - [`digit_set`]: set of digits 1-9 ([`DigitSet`])
//! - [`loc_set`]: set of local indices 0-8 within a house ([`LocSet`])
//! - [`pos`]: grid coordinates and the `row*9 + col` cell encoding
//! - [`cell`]: a single cell with its candidate set
//! - [`puzzle`]: the 9×9 grid with per-digit unsolved counters

pub use self::{
    bit_set_9::{BitSet9, BitSet9Semantics},
    cell::Cell,
    digit_set::DigitSet,
    loc_set::LocSet,
    pos::Pos,
    puzzle::{Puzzle, StateError},
};

pub mod bit_set_9;
pub mod cell;
pub mod digit_set;
pub mod loc_set;
pub mod pos;
pub mod puzzle;
