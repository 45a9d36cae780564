//! A set of local indices 0-8 within a house.
//!
//! Each house addresses its nine member cells by a local index: the column
//! for a row, the row for a column, and the row-major slot for a box.
//! [`LocSet`] collects such indices, and is the value type of the per-house
//! value→locations index.

use crate::bit_set_9::{BitSet9, BitSet9Semantics};

/// Semantics for local indices 0-8 (identity mapping).
///
/// # Panics
///
/// `to_bit` panics if the index is 9 or greater.
#[derive(Debug)]
pub struct LocSemantics;

impl BitSet9Semantics for LocSemantics {
    type Value = u8;

    fn to_bit(value: u8) -> u8 {
        assert!(value < 9, "local index must be between 0 and 8, got {value}");
        value
    }

    fn from_bit(bit: u8) -> u8 {
        bit
    }
}

/// A set of local indices 0-8, represented as a bitmask.
pub type LocSet = BitSet9<LocSemantics>;
