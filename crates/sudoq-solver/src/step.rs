//! Solution-step records.
//!
//! Every technique application is captured as an immutable [`SolutionStep`]:
//! the technique kind, the cells/values/houses identifying the pattern, and
//! the candidates it eliminates. Techniques build steps without touching
//! solver state; the solver core logs each step and then applies it. The
//! separation keeps techniques testable in isolation and lets consumers
//! replay or render the solution path.

use std::fmt;

use sudoq_core::Pos;

use crate::house::HouseId;

/// Identifies a solving technique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TechniqueKind {
    /// A cell with a single remaining candidate.
    NakedSingle,
    /// The only location for a value within a house.
    HiddenSingle,
    /// Two cells in a house sharing the same two candidates.
    NakedPair,
    /// A value confined to one box within a line.
    LockedCandidate,
    /// A value confined to one line within a box.
    PointingTuple,
    /// Two values confined to the same two cells of a house.
    HiddenPair,
    /// Three cells whose candidate union has size three.
    NakedTriple,
    /// A size-2 fish.
    XWing,
    /// Three values confined to the same three cells of a house.
    HiddenTriple,
    /// Four cells whose candidate union has size four.
    NakedQuadruple,
    /// A bicandidate pivot with two pincers sharing a third value.
    XyWing,
    /// Declared but never matched; reserved for future use.
    AvoidableRectangle,
    /// A tricandidate pivot with box and line pincers.
    XyzWing,
    /// Four values confined to the same four cells of a house.
    HiddenQuadruple,
    /// Three rectangle corners sharing a candidate pair.
    UniqueRectangle,
    /// A size-3 fish.
    Swordfish,
    /// A size-4 fish.
    Jellyfish,
}

impl TechniqueKind {
    /// Returns the display name of the technique.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NakedSingle => "Naked Single",
            Self::HiddenSingle => "Hidden Single",
            Self::NakedPair => "Naked Pair",
            Self::LockedCandidate => "Locked Candidate",
            Self::PointingTuple => "Pointing Tuple",
            Self::HiddenPair => "Hidden Pair",
            Self::NakedTriple => "Naked Triple",
            Self::XWing => "X-Wing",
            Self::HiddenTriple => "Hidden Triple",
            Self::NakedQuadruple => "Naked Quadruple",
            Self::XyWing => "XY-Wing",
            Self::AvoidableRectangle => "Avoidable Rectangle",
            Self::XyzWing => "XYZ-Wing",
            Self::HiddenQuadruple => "Hidden Quadruple",
            Self::UniqueRectangle => "Unique Rectangle",
            Self::Swordfish => "Swordfish",
            Self::Jellyfish => "Jellyfish",
        }
    }
}

/// A single candidate named by cell index (`row*9 + col`) and value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Candidate {
    /// The cell, encoded as `row*9 + col`.
    pub index: u8,
    /// The candidate value.
    pub value: u8,
}

/// One step of the solution process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionStep {
    kind: TechniqueKind,
    house: Option<HouseId>,
    values: Vec<u8>,
    indices: Vec<u8>,
    bases: Vec<HouseId>,
    covers: Vec<HouseId>,
    deleted_candidates: Vec<Candidate>,
}

impl SolutionStep {
    /// Creates an empty step for the given technique.
    #[must_use]
    pub fn new(kind: TechniqueKind) -> Self {
        Self {
            kind,
            house: None,
            values: Vec::new(),
            indices: Vec::new(),
            bases: Vec::new(),
            covers: Vec::new(),
            deleted_candidates: Vec::new(),
        }
    }

    /// Attaches the house the pattern was found in.
    #[must_use]
    pub fn with_house(mut self, house: HouseId) -> Self {
        self.house = Some(house);
        self
    }

    /// Appends pattern values.
    #[must_use]
    pub fn with_values<I: IntoIterator<Item = u8>>(mut self, values: I) -> Self {
        self.values.extend(values);
        self
    }

    /// Appends pattern cells.
    #[must_use]
    pub fn with_cells<I: IntoIterator<Item = Pos>>(mut self, cells: I) -> Self {
        self.indices.extend(cells.into_iter().map(Pos::index));
        self
    }

    /// Marks this step as placing `value` at `pos`.
    #[must_use]
    pub fn with_placed_value(mut self, pos: Pos, value: u8) -> Self {
        self.indices = vec![pos.index()];
        self.values = vec![value];
        self
    }

    /// Appends fish base lines.
    #[must_use]
    pub fn with_bases<I: IntoIterator<Item = HouseId>>(mut self, bases: I) -> Self {
        self.bases.extend(bases);
        self
    }

    /// Appends fish cover lines.
    #[must_use]
    pub fn with_covers<I: IntoIterator<Item = HouseId>>(mut self, covers: I) -> Self {
        self.covers.extend(covers);
        self
    }

    /// Schedules the removal of `value` from the candidates of `pos`.
    pub fn delete_candidate(&mut self, pos: Pos, value: u8) {
        self.deleted_candidates.push(Candidate {
            index: pos.index(),
            value,
        });
    }

    /// Returns the technique kind.
    #[must_use]
    pub const fn kind(&self) -> TechniqueKind {
        self.kind
    }

    /// Returns the house the pattern was found in, if recorded.
    #[must_use]
    pub const fn house(&self) -> Option<HouseId> {
        self.house
    }

    /// Returns the pattern values.
    #[must_use]
    pub fn values(&self) -> &[u8] {
        &self.values
    }

    /// Returns the pattern cell indices (`row*9 + col`).
    #[must_use]
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    /// Returns the candidates scheduled for deletion.
    #[must_use]
    pub fn deleted_candidates(&self) -> &[Candidate] {
        &self.deleted_candidates
    }

    /// Returns `true` for the two placement techniques.
    #[must_use]
    pub const fn is_single(&self) -> bool {
        matches!(
            self.kind,
            TechniqueKind::NakedSingle | TechniqueKind::HiddenSingle
        )
    }

    /// Returns the placed cell and value for placement steps.
    #[must_use]
    pub fn placed_value(&self) -> Option<(Pos, u8)> {
        if !self.is_single() {
            return None;
        }
        Some((Pos::from_index(*self.indices.first()?), *self.values.first()?))
    }

    fn format_placed_value(&self) -> String {
        if self.values.is_empty() || self.indices.is_empty() {
            return String::new();
        }
        format!("{}={}", Pos::from_index(self.indices[0]), self.values[0])
    }

    fn format_elimination(&self, pattern: &str) -> String {
        let deleted = format_deleted_candidates(&self.deleted_candidates);
        if pattern.is_empty() {
            format!("{}: {deleted}", self.kind.name())
        } else {
            format!("{}: {pattern} => {deleted}", self.kind.name())
        }
    }

    fn format_subset(&self) -> String {
        self.format_elimination(&format!(
            "{} in {}",
            format_values_list(&self.values),
            format_cells_compact(&self.indices)
        ))
    }

    fn format_locked_candidate(&self) -> String {
        let house = self
            .house
            .map_or_else(String::new, |h| format!(" in {h}"));
        self.format_elimination(&format!("{}{house}", self.values[0]))
    }

    fn format_fish(&self) -> String {
        self.format_elimination(&format!(
            "{} {} {}",
            self.values[0],
            format_houses(&self.bases),
            format_houses(&self.covers)
        ))
    }

    fn format_wing(&self) -> String {
        // The eliminated z value renders last; the remaining values render in
        // ascending order ahead of it.
        let z = self.deleted_candidates[0].value;
        let mut values: Vec<u8> = self.values.iter().copied().filter(|&v| v != z).collect();
        values.sort_unstable();
        values.push(z);
        self.format_elimination(&format!(
            "{} in {}",
            format_values_wing(&values),
            format_cells_compact(&self.indices)
        ))
    }

    fn format_unique_rectangle(&self) -> String {
        let mut values = self.values.clone();
        values.sort_unstable();
        self.format_elimination(&format!(
            "{} in {}",
            format_values_wing(&values),
            format_rect_compact(&self.indices)
        ))
    }
}

impl fmt::Display for SolutionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self.kind {
            TechniqueKind::NakedSingle => {
                format!("{}: {}", self.kind.name(), self.format_placed_value())
            }
            TechniqueKind::HiddenSingle => {
                let house = self
                    .house
                    .map_or_else(String::new, |h| format!(" in {h}"));
                format!(
                    "{}: {}{house} => {}",
                    self.kind.name(),
                    self.values[0],
                    self.format_placed_value()
                )
            }
            TechniqueKind::NakedPair
            | TechniqueKind::NakedTriple
            | TechniqueKind::NakedQuadruple
            | TechniqueKind::HiddenPair
            | TechniqueKind::HiddenTriple
            | TechniqueKind::HiddenQuadruple => self.format_subset(),
            TechniqueKind::LockedCandidate | TechniqueKind::PointingTuple => {
                self.format_locked_candidate()
            }
            TechniqueKind::XWing | TechniqueKind::Swordfish | TechniqueKind::Jellyfish => {
                self.format_fish()
            }
            TechniqueKind::XyWing | TechniqueKind::XyzWing => self.format_wing(),
            TechniqueKind::AvoidableRectangle | TechniqueKind::UniqueRectangle => {
                self.format_unique_rectangle()
            }
        };
        f.write_str(&text)
    }
}

/// Formats deleted candidates grouped by value: `r1c25<>3, r4c5<>7`.
fn format_deleted_candidates(deleted: &[Candidate]) -> String {
    let mut values: Vec<u8> = deleted.iter().map(|c| c.value).collect();
    values.sort_unstable();
    values.dedup();

    let mut parts = Vec::with_capacity(values.len());
    for value in values {
        let cells: Vec<u8> = deleted
            .iter()
            .filter(|c| c.value == value)
            .map(|c| c.index)
            .collect();
        parts.push(format!("{}<>{value}", format_cells_compact(&cells)));
    }
    parts.join(", ")
}

/// Formats cell indices as a compact reference string, e.g. `r1c12,r3c1`.
///
/// Cells sharing the row or column of the leading cell collapse into one
/// `r..c..` group; leftovers start a new group.
fn format_cells_compact(cells: &[u8]) -> String {
    if cells.is_empty() {
        return String::new();
    }
    let mut cells: Vec<u8> = cells.to_vec();
    cells.sort_unstable();
    cells.dedup();

    let mut groups = Vec::new();
    while !cells.is_empty() {
        if cells.len() == 1 {
            groups.push(Pos::from_index(cells[0]).to_string());
            break;
        }

        let mut remaining = Vec::new();
        let mut rows = String::new();
        let mut cols = String::new();
        let first = Pos::from_index(cells[0]);
        rows.push(char::from(b'1' + first.row()));
        cols.push(char::from(b'1' + first.col()));
        for &index in &cells[1..] {
            let pos = Pos::from_index(index);
            if pos.row() == first.row() && rows.len() == 1 {
                cols.push(char::from(b'1' + pos.col()));
            } else if pos.col() == first.col() && cols.len() == 1 {
                rows.push(char::from(b'1' + pos.row()));
            } else {
                remaining.push(index);
            }
        }
        groups.push(format!("r{rows}c{cols}"));
        cells = remaining;
    }
    groups.join(",")
}

/// Formats three or four rectangle corners as `r13c12`.
fn format_rect_compact(cells: &[u8]) -> String {
    if cells.len() != 3 && cells.len() != 4 {
        return format_cells_compact(cells);
    }

    // Any three corners define the rectangle; a fourth is redundant.
    let (mut r1, mut c1) = {
        let p = Pos::from_index(cells[0]);
        (p.row(), p.col())
    };
    let (mut r2, mut c2) = {
        let p = Pos::from_index(cells[1]);
        (p.row(), p.col())
    };
    let p3 = Pos::from_index(cells[2]);
    if r1 == r2 {
        if r2 < p3.row() {
            r2 = p3.row();
        } else {
            r1 = p3.row();
        }
    }
    if c1 == c2 {
        if c2 < p3.col() {
            c2 = p3.col();
        } else {
            c1 = p3.col();
        }
    }
    format!("r{}{}c{}{}", r1 + 1, r2 + 1, c1 + 1, c2 + 1)
}

/// Formats same-kind houses compactly, e.g. `r25` for rows 2 and 5.
fn format_houses(houses: &[HouseId]) -> String {
    let mut houses = houses.to_vec();
    houses.sort_unstable();

    let kind = houses[0].kind;
    let digits: String = houses
        .iter()
        .take_while(|h| h.kind == kind)
        .map(|h| char::from(b'1' + h.index))
        .collect();
    format!("{}{digits}", kind.short_name())
}

/// Formats values as a sorted comma-separated list: `1,2,4`.
fn format_values_list(values: &[u8]) -> String {
    let mut values = values.to_vec();
    values.sort_unstable();
    values
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Formats values as a slash-separated wing sequence: `3/4/7`.
///
/// Values are assumed to already be in the desired order.
fn format_values_wing(values: &[u8]) -> String {
    values
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::house::HouseKind;

    fn house(kind: HouseKind, index: u8) -> HouseId {
        HouseId { kind, index }
    }

    #[test]
    fn test_format_naked_single() {
        let step =
            SolutionStep::new(TechniqueKind::NakedSingle).with_placed_value(Pos::new(0, 1), 5);
        assert_eq!(step.to_string(), "Naked Single: r1c2=5");
    }

    #[test]
    fn test_format_hidden_single() {
        let step = SolutionStep::new(TechniqueKind::HiddenSingle)
            .with_house(house(HouseKind::Row, 0))
            .with_placed_value(Pos::new(0, 1), 5);
        assert_eq!(step.to_string(), "Hidden Single: 5 in r1 => r1c2=5");
    }

    #[test]
    fn test_format_naked_pair() {
        let mut step = SolutionStep::new(TechniqueKind::NakedPair)
            .with_house(house(HouseKind::Row, 0))
            .with_values([2, 1])
            .with_cells([Pos::new(0, 0), Pos::new(0, 3)]);
        step.delete_candidate(Pos::new(0, 4), 1);
        step.delete_candidate(Pos::new(0, 4), 2);
        assert_eq!(
            step.to_string(),
            "Naked Pair: 1,2 in r1c14 => r1c5<>1, r1c5<>2"
        );
    }

    #[test]
    fn test_format_fish() {
        let mut step = SolutionStep::new(TechniqueKind::XWing)
            .with_values([5])
            .with_bases([house(HouseKind::Row, 1), house(HouseKind::Row, 4)])
            .with_covers([house(HouseKind::Column, 2), house(HouseKind::Column, 6)]);
        step.delete_candidate(Pos::new(6, 2), 5);
        assert_eq!(step.to_string(), "X-Wing: 5 r25 c37 => r7c3<>5");
    }

    #[test]
    fn test_format_wing_puts_eliminated_value_last() {
        let mut step = SolutionStep::new(TechniqueKind::XyWing)
            .with_values([7, 3, 4])
            .with_cells([Pos::new(0, 0), Pos::new(0, 4), Pos::new(2, 1)]);
        step.delete_candidate(Pos::new(2, 4), 7);
        assert_eq!(step.to_string(), "XY-Wing: 3/4/7 in r1c15,r3c2 => r3c5<>7");
    }

    #[test]
    fn test_format_unique_rectangle() {
        let mut step = SolutionStep::new(TechniqueKind::UniqueRectangle)
            .with_values([2, 1])
            .with_cells([
                Pos::new(0, 0),
                Pos::new(0, 3),
                Pos::new(4, 0),
                Pos::new(4, 3),
            ]);
        step.delete_candidate(Pos::new(4, 3), 1);
        step.delete_candidate(Pos::new(4, 3), 2);
        assert_eq!(
            step.to_string(),
            "Unique Rectangle: 1/2 in r15c14 => r5c4<>1, r5c4<>2"
        );
    }

    #[test]
    fn test_format_cells_compact_splits_mixed_lines() {
        let cells = [
            Pos::new(0, 0).index(),
            Pos::new(0, 3).index(),
            Pos::new(2, 0).index(),
        ];
        assert_eq!(format_cells_compact(&cells), "r1c14,r3c1");
    }

    #[test]
    fn test_placed_value_only_for_singles() {
        let step =
            SolutionStep::new(TechniqueKind::NakedSingle).with_placed_value(Pos::new(4, 4), 9);
        assert_eq!(step.placed_value(), Some((Pos::new(4, 4), 9)));

        let step = SolutionStep::new(TechniqueKind::NakedPair).with_values([1, 2]);
        assert_eq!(step.placed_value(), None);
    }
}
