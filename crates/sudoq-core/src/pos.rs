//! Grid coordinates.
//!
//! [`Pos`] names a cell by 0-based row and column. Step records and the
//! exact-cover engine encode a position as the single index `row*9 + col`;
//! the conversion round-trips for all 81 cells.

use std::fmt;

/// A cell position on the 9×9 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    row: u8,
    col: u8,
}

impl Pos {
    /// Creates a position from 0-based row and column.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is 9 or greater.
    #[must_use]
    pub fn new(row: u8, col: u8) -> Self {
        assert!(row < 9 && col < 9, "position out of range: ({row},{col})");
        Self { row, col }
    }

    /// Recovers a position from its `row*9 + col` encoding.
    ///
    /// # Panics
    ///
    /// Panics if `index` is 81 or greater.
    #[must_use]
    pub fn from_index(index: u8) -> Self {
        assert!(index < 81, "cell index out of range: {index}");
        Self {
            row: index / 9,
            col: index % 9,
        }
    }

    /// Returns the 0-based row.
    #[must_use]
    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Returns the 0-based column.
    #[must_use]
    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Returns the `row*9 + col` encoding.
    #[must_use]
    #[inline]
    pub const fn index(self) -> u8 {
        self.row * 9 + self.col
    }

    /// Returns the index of the 3×3 box containing this position.
    ///
    /// Boxes are numbered 0-8 left-to-right, top-to-bottom.
    #[must_use]
    #[inline]
    pub const fn box_index(self) -> u8 {
        self.row / 3 * 3 + self.col / 3
    }

    /// Returns the box index and the row-major slot (0-8) within that box.
    #[must_use]
    #[inline]
    pub const fn box_coords(self) -> (u8, u8) {
        (self.box_index(), self.row % 3 * 3 + self.col % 3)
    }

    /// Returns `true` if the two positions are distinct and share a row,
    /// column, or box.
    #[must_use]
    pub fn sees(self, other: Self) -> bool {
        self != other
            && (self.row == other.row
                || self.col == other.col
                || self.box_index() == other.box_index())
    }

    /// Returns an iterator over all 81 positions in row-major order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..81).map(Self::from_index)
    }
}

impl fmt::Display for Pos {
    /// Formats as a 1-based `r{row}c{col}` cell reference.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}c{}", self.row + 1, self.col + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for index in 0..81 {
            assert_eq!(Pos::from_index(index).index(), index);
        }
    }

    #[test]
    fn test_box_index() {
        assert_eq!(Pos::new(0, 0).box_index(), 0);
        assert_eq!(Pos::new(0, 8).box_index(), 2);
        assert_eq!(Pos::new(4, 4).box_index(), 4);
        assert_eq!(Pos::new(8, 0).box_index(), 6);
        assert_eq!(Pos::new(8, 8).box_index(), 8);
    }

    #[test]
    fn test_box_coords() {
        assert_eq!(Pos::new(0, 0).box_coords(), (0, 0));
        assert_eq!(Pos::new(1, 1).box_coords(), (0, 4));
        assert_eq!(Pos::new(5, 3).box_coords(), (4, 6));
        assert_eq!(Pos::new(8, 8).box_coords(), (8, 8));
    }

    #[test]
    fn test_sees() {
        let a = Pos::new(2, 3);
        assert!(a.sees(Pos::new(2, 8))); // same row
        assert!(a.sees(Pos::new(7, 3))); // same column
        assert!(a.sees(Pos::new(0, 5))); // same box
        assert!(!a.sees(a)); // a cell never sees itself
        assert!(!a.sees(Pos::new(4, 6)));
    }

    #[test]
    fn test_display_is_one_based() {
        assert_eq!(Pos::new(0, 0).to_string(), "r1c1");
        assert_eq!(Pos::new(8, 8).to_string(), "r9c9");
    }
}
