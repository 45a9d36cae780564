//! Exact-cover solver: Algorithm X over Dancing Links.
//!
//! The puzzle is encoded as a 324-column exact-cover problem (cell, row-value,
//! column-value, and box-value constraints) with one matrix row per still
//! possible `(row, col, value)` assignment. The four-way toroidal node graph
//! is arena-allocated in a single vector and addressed by index, which keeps
//! the cyclic structure in safe Rust; cover and uncover splice nodes without
//! ever deallocating, so every search step is exactly reversible.

use sudoq_core::{Pos, Puzzle, StateError};
use thiserror::Error;
use tracing::trace;

use crate::{
    house::{HouseId, HouseKind},
    step::Candidate,
};

/// The master header's node id.
const HEAD: usize = 0;
/// Node ids of the 324 column headers are `1..=NUM_COLUMNS`.
const NUM_COLUMNS: usize = 324;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Node {
    left: usize,
    right: usize,
    up: usize,
    down: usize,
    column: usize,
    row: usize,
}

/// A solved puzzle that fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A cell is still unsolved.
    #[error("cell {pos} is not filled")]
    UnfilledCell {
        /// The unsolved cell.
        pos: Pos,
    },

    /// A house contains the same value twice.
    #[error("duplicate value {value} in {house}")]
    DuplicateValue {
        /// The duplicated value.
        value: u8,
        /// The offending house.
        house: HouseId,
    },
}

/// Shape of the constraint matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixInfo {
    /// Number of uncovered columns.
    pub columns: usize,
    /// Number of matrix rows.
    pub rows: usize,
    /// Number of row nodes (four per row).
    pub total_nodes: usize,
    /// Percentage of non-zero entries.
    pub density: f64,
}

/// Counters collected by [`Dlx::solve_with_stats`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchStats {
    /// Search invocations, including the root.
    pub nodes_visited: usize,
    /// Times a chosen row was retracted.
    pub backtracks: usize,
    /// Solutions encountered.
    pub solutions_found: usize,
    /// Matrix shape at the start of the search.
    pub matrix: MatrixInfo,
}

/// Dancing Links solver for one puzzle.
///
/// The matrix is built once from the puzzle's current candidates. Solving
/// writes the recovered assignment back into the puzzle; counting solutions
/// leaves it untouched.
pub struct Dlx<'a> {
    puzzle: &'a mut Puzzle,
    nodes: Vec<Node>,
    /// Per-column node counts, indexed by header node id.
    sizes: Vec<usize>,
    /// Maps each matrix row id to the candidate it represents.
    candidates: Vec<Candidate>,
    /// Row ids selected along the current search path.
    solution: Vec<usize>,
}

impl<'a> Dlx<'a> {
    /// Builds the exact-cover matrix for the puzzle's current state.
    ///
    /// Solved cells contribute a single row; unsolved cells contribute one
    /// row per remaining candidate.
    #[must_use]
    pub fn new(puzzle: &'a mut Puzzle) -> Self {
        let mut dlx = Self {
            puzzle,
            nodes: Vec::with_capacity(1 + NUM_COLUMNS + 4 * 729),
            sizes: vec![0; 1 + NUM_COLUMNS],
            candidates: Vec::new(),
            solution: Vec::with_capacity(81),
        };

        dlx.nodes.push(Node {
            left: HEAD,
            right: HEAD,
            up: HEAD,
            down: HEAD,
            column: HEAD,
            row: usize::MAX,
        });
        for id in 1..=NUM_COLUMNS {
            let left = dlx.nodes[HEAD].left;
            dlx.nodes.push(Node {
                left,
                right: HEAD,
                up: id,
                down: id,
                column: id,
                row: usize::MAX,
            });
            dlx.nodes[left].right = id;
            dlx.nodes[HEAD].left = id;
        }

        for pos in Pos::all() {
            let cell = dlx.puzzle.cell(pos);
            let (value, candidates) = (cell.value(), cell.candidates());
            if let Some(value) = value {
                dlx.add_row(pos, value);
            } else {
                for value in candidates {
                    dlx.add_row(pos, value);
                }
            }
        }
        dlx
    }

    /// Inserts the four nodes of assignment `(pos, value)`.
    fn add_row(&mut self, pos: Pos, value: u8) {
        let row_id = self.candidates.len();
        self.candidates.push(Candidate {
            index: pos.index(),
            value,
        });

        let (r, c) = (usize::from(pos.row()), usize::from(pos.col()));
        let v = usize::from(value) - 1;
        let constraints = [
            r * 9 + c,
            81 + r * 9 + v,
            162 + c * 9 + v,
            243 + usize::from(pos.box_index()) * 9 + v,
        ];

        let mut ids = [0; 4];
        for (slot, &constraint) in constraints.iter().enumerate() {
            let header = constraint + 1;
            let id = self.nodes.len();
            // Insert at the head of the column's vertical list.
            let down = self.nodes[header].down;
            self.nodes.push(Node {
                left: id,
                right: id,
                up: header,
                down,
                column: header,
                row: row_id,
            });
            self.nodes[down].up = id;
            self.nodes[header].down = id;
            self.sizes[header] += 1;
            ids[slot] = id;
        }
        for slot in 0..4 {
            self.nodes[ids[slot]].left = ids[(slot + 3) % 4];
            self.nodes[ids[slot]].right = ids[(slot + 1) % 4];
        }
    }

    /// Returns a descriptive name for the constraint at `index` (0-323).
    #[must_use]
    pub fn column_name(index: usize) -> String {
        match index {
            0..=80 => format!("R{}C{}", index / 9, index % 9),
            81..=161 => {
                let index = index - 81;
                format!("R{}#{}", index / 9, index % 9 + 1)
            }
            162..=242 => {
                let index = index - 162;
                format!("C{}#{}", index / 9, index % 9 + 1)
            }
            _ => {
                let index = index - 243;
                format!("B{}#{}", index / 9, index % 9 + 1)
            }
        }
    }

    /// Finds one solution and writes it back into the puzzle.
    ///
    /// Returns `false` when the puzzle has no solution; in that case the
    /// puzzle is left untouched.
    ///
    /// # Errors
    ///
    /// Returns a [`StateError`] if a recovered placement conflicts with the
    /// puzzle, which indicates an inconsistent matrix.
    pub fn solve(&mut self) -> Result<bool, StateError> {
        self.search(None)
    }

    /// Like [`Dlx::solve`], collecting search statistics.
    ///
    /// # Errors
    ///
    /// Returns a [`StateError`] if a recovered placement conflicts with the
    /// puzzle.
    pub fn solve_with_stats(&mut self) -> Result<(bool, SearchStats), StateError> {
        let mut stats = SearchStats {
            nodes_visited: 0,
            backtracks: 0,
            solutions_found: 0,
            matrix: self.matrix_info(),
        };
        let solved = self.search(Some(&mut stats))?;
        Ok((solved, stats))
    }

    fn search(&mut self, mut stats: Option<&mut SearchStats>) -> Result<bool, StateError> {
        if let Some(stats) = stats.as_deref_mut() {
            stats.nodes_visited += 1;
        }
        if self.nodes[HEAD].right == HEAD {
            // All columns covered.
            if let Some(stats) = stats.as_deref_mut() {
                stats.solutions_found += 1;
            }
            self.apply_solution()?;
            return Ok(true);
        }

        let col = self.choose_column();
        trace!(
            column = %Self::column_name(col - 1),
            size = self.sizes[col],
            "covering column"
        );
        self.cover(col);

        let mut row_node = self.nodes[col].down;
        while row_node != col {
            self.solution.push(self.nodes[row_node].row);
            let mut j = self.nodes[row_node].right;
            while j != row_node {
                self.cover(self.nodes[j].column);
                j = self.nodes[j].right;
            }

            if self.search(stats.as_deref_mut())? {
                return Ok(true);
            }

            let mut j = self.nodes[row_node].left;
            while j != row_node {
                self.uncover(self.nodes[j].column);
                j = self.nodes[j].left;
            }
            self.solution.pop();
            if let Some(stats) = stats.as_deref_mut() {
                stats.backtracks += 1;
            }
            row_node = self.nodes[row_node].down;
        }

        self.uncover(col);
        Ok(false)
    }

    /// Counts solutions up to `max` without mutating the puzzle.
    ///
    /// The matrix is fully restored afterwards, so counting can precede a
    /// `solve` on the same instance.
    pub fn count_solutions(&mut self, max: usize) -> usize {
        let depth = self.solution.len();
        let mut count = 0;
        self.count_recursive(&mut count, max);
        self.solution.truncate(depth);
        count
    }

    fn count_recursive(&mut self, count: &mut usize, max: usize) {
        if *count >= max {
            return;
        }
        if self.nodes[HEAD].right == HEAD {
            *count += 1;
            return;
        }

        let col = self.choose_column();
        self.cover(col);

        let mut row_node = self.nodes[col].down;
        while row_node != col {
            self.solution.push(self.nodes[row_node].row);
            let mut j = self.nodes[row_node].right;
            while j != row_node {
                self.cover(self.nodes[j].column);
                j = self.nodes[j].right;
            }

            self.count_recursive(count, max);

            let mut j = self.nodes[row_node].left;
            while j != row_node {
                self.uncover(self.nodes[j].column);
                j = self.nodes[j].left;
            }
            self.solution.pop();
            if *count >= max {
                break;
            }
            row_node = self.nodes[row_node].down;
        }

        self.uncover(col);
    }

    /// Chooses the uncovered column with the fewest nodes; ties go to the
    /// leftmost column.
    fn choose_column(&self) -> usize {
        let mut chosen = self.nodes[HEAD].right;
        let mut min_size = self.sizes[chosen];

        let mut col = self.nodes[chosen].right;
        while col != HEAD {
            if self.sizes[col] < min_size {
                chosen = col;
                min_size = self.sizes[col];
            }
            col = self.nodes[col].right;
        }
        chosen
    }

    /// Splices `col` out of the header list and removes every row that uses
    /// it from all other columns.
    fn cover(&mut self, col: usize) {
        let Node { left, right, .. } = self.nodes[col];
        self.nodes[right].left = left;
        self.nodes[left].right = right;

        let mut i = self.nodes[col].down;
        while i != col {
            let mut j = self.nodes[i].right;
            while j != i {
                let Node { up, down, column, .. } = self.nodes[j];
                self.nodes[down].up = up;
                self.nodes[up].down = down;
                self.sizes[column] -= 1;
                j = self.nodes[j].right;
            }
            i = self.nodes[i].down;
        }
    }

    /// Reverses [`Dlx::cover`] in mirror order, restoring splices and
    /// counts.
    fn uncover(&mut self, col: usize) {
        let mut i = self.nodes[col].up;
        while i != col {
            let mut j = self.nodes[i].left;
            while j != i {
                let Node { up, down, column, .. } = self.nodes[j];
                self.sizes[column] += 1;
                self.nodes[down].up = j;
                self.nodes[up].down = j;
                j = self.nodes[j].left;
            }
            i = self.nodes[i].up;
        }

        let Node { left, right, .. } = self.nodes[col];
        self.nodes[right].left = col;
        self.nodes[left].right = col;
    }

    fn apply_solution(&mut self) -> Result<(), StateError> {
        for i in 0..self.solution.len() {
            let Candidate { index, value } = self.candidates[self.solution[i]];
            let pos = Pos::from_index(index);
            if !self.puzzle.cell(pos).is_solved() {
                self.puzzle.place_value(pos, value)?;
            }
        }
        Ok(())
    }

    /// Asserts that all 27 houses of the puzzle hold a permutation of 1-9.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first unfilled cell or
    /// duplicated value.
    pub fn validate_solution(&self) -> Result<(), ValidationError> {
        for cell in self.puzzle.cells() {
            if !cell.is_solved() {
                return Err(ValidationError::UnfilledCell { pos: cell.pos() });
            }
        }

        for kind in [HouseKind::Row, HouseKind::Column, HouseKind::Box] {
            for index in 0..9 {
                let house = crate::house::House::new(kind, index);
                let mut seen = sudoq_core::DigitSet::EMPTY;
                for l in 0..9 {
                    let Some(value) = self.puzzle.cell(house.cell(l)).value() else {
                        unreachable!("all cells checked solved above");
                    };
                    if !seen.insert(value) {
                        return Err(ValidationError::DuplicateValue {
                            value,
                            house: house.id(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Returns the current shape of the constraint matrix.
    #[must_use]
    pub fn matrix_info(&self) -> MatrixInfo {
        let mut columns = 0;
        let mut col = self.nodes[HEAD].right;
        while col != HEAD {
            columns += 1;
            col = self.nodes[col].right;
        }

        let rows = self.candidates.len();
        let total_nodes = self.nodes.len() - 1 - NUM_COLUMNS;
        #[expect(clippy::cast_precision_loss)]
        let density = if columns > 0 && rows > 0 {
            total_nodes as f64 / (columns * rows) as f64 * 100.0
        } else {
            0.0
        };
        MatrixInfo {
            columns,
            rows,
            total_nodes,
            density,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::parse_puzzle;

    const EASY: &str = "530 070 000
                        600 195 000
                        098 000 060
                        800 060 003
                        400 803 001
                        700 020 006
                        060 000 280
                        000 419 005
                        000 080 079";

    #[test]
    fn test_empty_puzzle_matrix_shape() {
        let mut puzzle = Puzzle::new();
        let dlx = Dlx::new(&mut puzzle);
        let info = dlx.matrix_info();
        assert_eq!(info.columns, 324);
        assert_eq!(info.rows, 729);
        assert_eq!(info.total_nodes, 4 * 729);

        // Row ids encode (row, col, value) in construction order.
        assert_eq!(dlx.candidates[0], Candidate { index: 0, value: 1 });
        assert_eq!(
            dlx.candidates[728],
            Candidate {
                index: 80,
                value: 9
            }
        );
    }

    #[test]
    fn test_easy_puzzle_matrix_shape() {
        let mut puzzle = parse_puzzle(EASY);
        let dlx = Dlx::new(&mut puzzle);
        let info = dlx.matrix_info();
        assert_eq!(info.columns, 324);
        assert!(info.rows < 729);
        let expected_density = 4.0 / 324.0 * 100.0;
        assert!((info.density - expected_density).abs() < 1e-9);
    }

    #[test]
    fn test_solved_puzzle_builds_81_rows() {
        let mut puzzle = parse_puzzle(
            "534678912
             672195348
             198342567
             859761423
             426853791
             713924856
             961537284
             287419635
             345286179",
        );
        let mut dlx = Dlx::new(&mut puzzle);
        assert_eq!(dlx.matrix_info().rows, 81);
        assert_eq!(dlx.solve(), Ok(true));
    }

    #[test]
    fn test_column_names() {
        let cases = [
            (0, "R0C0"),
            (80, "R8C8"),
            (81, "R0#1"),
            (161, "R8#9"),
            (162, "C0#1"),
            (242, "C8#9"),
            (243, "B0#1"),
            (323, "B8#9"),
        ];
        for (index, expected) in cases {
            assert_eq!(Dlx::column_name(index), expected);
        }
    }

    #[test]
    fn test_cover_uncover_restores_matrix() {
        let mut puzzle = parse_puzzle(EASY);
        let mut dlx = Dlx::new(&mut puzzle);

        let nodes_before = dlx.nodes.clone();
        let sizes_before = dlx.sizes.clone();

        let col = dlx.nodes[HEAD].right;
        dlx.cover(col);
        assert_ne!(dlx.nodes[HEAD].right, col);
        dlx.uncover(col);

        assert_eq!(dlx.nodes, nodes_before);
        assert_eq!(dlx.sizes, sizes_before);
    }

    #[test]
    fn test_failed_search_restores_matrix() {
        let mut puzzle = Puzzle::new();
        // A cell with no candidates leaves its cell column empty, so the
        // search must fail without touching the puzzle.
        for value in 1..=9 {
            puzzle.remove_candidate(Pos::new(0, 0), value);
        }
        let mut dlx = Dlx::new(&mut puzzle);

        let nodes_before = dlx.nodes.clone();
        let sizes_before = dlx.sizes.clone();
        assert_eq!(dlx.solve(), Ok(false));
        assert_eq!(dlx.nodes, nodes_before);
        assert_eq!(dlx.sizes, sizes_before);
        assert_eq!(dlx.puzzle.num_unsolved(), 81);
    }

    #[test]
    fn test_choose_column_prefers_constrained_cells() {
        let mut puzzle = Puzzle::new();
        let dlx = Dlx::new(&mut puzzle);
        // All columns tie at size 9; the leftmost wins.
        let chosen = dlx.choose_column();
        assert_eq!(chosen, 1);
        assert_eq!(dlx.sizes[chosen], 9);

        let mut puzzle = Puzzle::new();
        puzzle.given_value(Pos::new(0, 0), 1).unwrap();
        let dlx = Dlx::new(&mut puzzle);
        let chosen = dlx.choose_column();
        assert_eq!(dlx.sizes[chosen], 1);
    }

    #[test]
    fn test_solves_easy_puzzle() {
        let mut puzzle = parse_puzzle(EASY);
        let mut dlx = Dlx::new(&mut puzzle);
        assert_eq!(dlx.solve(), Ok(true));
        dlx.validate_solution().unwrap();

        let expected = parse_puzzle(
            "534678912
             672195348
             198342567
             859761423
             426853791
             713924856
             961537284
             287419635
             345286179",
        );
        for pos in Pos::all() {
            assert_eq!(puzzle.cell(pos).value(), expected.cell(pos).value());
        }
    }

    #[test]
    fn test_count_solutions_caps_at_max() {
        let mut puzzle = Puzzle::new();
        let mut dlx = Dlx::new(&mut puzzle);
        assert_eq!(dlx.count_solutions(10), 10);
        assert_eq!(puzzle.num_unsolved(), 81);
    }

    #[test]
    fn test_count_solutions_unique_puzzle() {
        let mut puzzle = parse_puzzle(EASY);
        let mut dlx = Dlx::new(&mut puzzle);
        assert_eq!(dlx.count_solutions(2), 1);
    }

    #[test]
    fn test_solve_with_stats() {
        let mut puzzle = parse_puzzle(EASY);
        let mut dlx = Dlx::new(&mut puzzle);
        let (solved, stats) = dlx.solve_with_stats().unwrap();
        assert!(solved);
        assert_eq!(stats.solutions_found, 1);
        assert!(stats.nodes_visited >= 1);
        assert_eq!(stats.matrix.columns, 324);
    }

    #[test]
    fn test_validate_rejects_unsolved_puzzle() {
        let mut puzzle = parse_puzzle(EASY);
        let dlx = Dlx::new(&mut puzzle);
        assert!(matches!(
            dlx.validate_solution(),
            Err(ValidationError::UnfilledCell { .. })
        ));
    }
}
