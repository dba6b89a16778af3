use std::fmt;

use super::class::ClassTag;
use crate::error::{Result, ScheduleError};

/// The content of one (student, slot) cell.
pub type Cell = Option<ClassTag>;

/// Position of a cell inside a class block.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlotRole {
    Empty,
    /// First slot of a class. One-slot classes are always a start.
    Start,
    /// Any later slot of a multi-slot class.
    Continuation,
}

/// Computes the role of every cell of a row.
///
/// The row is walked left to right with a remaining-duration counter, so two
/// identical two-slot classes placed back to back resolve to
/// `Start, Continuation, Start, Continuation`.
pub fn compute_roles(row: &[Cell]) -> Vec<SlotRole> {
    let mut roles = Vec::with_capacity(row.len());
    let mut carried: Option<&ClassTag> = None;
    let mut remaining = 0;

    for cell in row {
        match (cell, carried) {
            (Some(tag), Some(open)) if remaining > 0 && tag == open => {
                roles.push(SlotRole::Continuation);
                remaining -= 1;
            }
            (Some(tag), _) => {
                roles.push(SlotRole::Start);
                carried = Some(tag);
                remaining = tag.duration.saturating_sub(1);
            }
            (None, _) => {
                roles.push(SlotRole::Empty);
                carried = None;
                remaining = 0;
            }
        }
    }

    roles
}

/// A candidate timetable: one row of slots per student.
///
/// Slot roles are computed when the grid is built and kept in sync by every
/// method that rewrites a row.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleGrid {
    rows: Vec<Vec<Cell>>,
    roles: Vec<Vec<SlotRole>>,
    num_slots: usize,
}

impl ScheduleGrid {
    /// Creates a grid with every cell empty.
    pub fn empty(num_students: usize, num_slots: usize) -> Self {
        Self {
            rows: vec![vec![None; num_slots]; num_students],
            roles: vec![vec![SlotRole::Empty; num_slots]; num_students],
            num_slots,
        }
    }

    /// Builds a grid from explicit rows.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the rows differ in length and
    /// `BrokenClassBlock` if a multi-slot class is split or truncated.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self> {
        let num_slots = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().find(|row| row.len() != num_slots) {
            return Err(ScheduleError::DimensionMismatch {
                expected_students: rows.len(),
                expected_slots: num_slots,
                found_students: rows.len(),
                found_slots: bad.len(),
            });
        }

        let grid = Self::from_rows_unchecked(rows);
        grid.validate()?;
        Ok(grid)
    }

    /// Builds a grid from rectangular rows without checking class blocks.
    pub(crate) fn from_rows_unchecked(rows: Vec<Vec<Cell>>) -> Self {
        let num_slots = rows.first().map_or(0, Vec::len);
        let roles = rows.iter().map(|row| compute_roles(row)).collect();
        Self {
            rows,
            roles,
            num_slots,
        }
    }

    pub fn num_students(&self) -> usize {
        self.rows.len()
    }

    pub fn num_slots(&self) -> usize {
        self.num_slots
    }

    /// True if the grid has no students or no slots.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.num_slots == 0
    }

    pub fn same_shape(&self, other: &Self) -> bool {
        self.num_students() == other.num_students() && self.num_slots == other.num_slots
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row(&self, student: usize) -> &[Cell] {
        &self.rows[student]
    }

    pub fn row_roles(&self, student: usize) -> &[SlotRole] {
        &self.roles[student]
    }

    pub fn cell(&self, student: usize, slot: usize) -> Option<&ClassTag> {
        self.rows.get(student)?.get(slot)?.as_ref()
    }

    /// Role of a cell; out-of-range positions read as `Empty`.
    pub fn role(&self, student: usize, slot: usize) -> SlotRole {
        self.roles
            .get(student)
            .and_then(|roles| roles.get(slot))
            .copied()
            .unwrap_or(SlotRole::Empty)
    }

    /// Number of slots the block starting at this cell spans: the class
    /// duration for a start, 1 for an empty cell and 0 for a continuation.
    pub fn block_width(&self, student: usize, slot: usize) -> usize {
        match self.role(student, slot) {
            SlotRole::Empty => 1,
            SlotRole::Continuation => 0,
            SlotRole::Start => self.cell(student, slot).map_or(1, |tag| tag.duration),
        }
    }

    /// Checks that every multi-slot class occupies exactly `duration`
    /// contiguous slots.
    pub fn validate(&self) -> Result<()> {
        for (student, (row, roles)) in self.rows.iter().zip(&self.roles).enumerate() {
            for (slot, role) in roles.iter().enumerate() {
                if *role != SlotRole::Start {
                    continue;
                }
                let Some(tag) = &row[slot] else {
                    return Err(ScheduleError::BrokenClassBlock { student, slot });
                };
                let end = slot + tag.duration;
                if end > self.num_slots {
                    return Err(ScheduleError::BrokenClassBlock { student, slot });
                }
                let complete = (slot + 1..end).all(|next| {
                    roles[next] == SlotRole::Continuation && row[next].as_ref() == Some(tag)
                });
                if !complete {
                    return Err(ScheduleError::BrokenClassBlock { student, slot });
                }
            }
        }
        Ok(())
    }

    pub fn is_contiguous(&self) -> bool {
        self.validate().is_ok()
    }

    /// Places a class for a student if it fits within the row, every slot
    /// is available and every slot is still empty.
    ///
    /// Returns `false` and leaves the grid untouched otherwise.
    pub fn place(
        &mut self,
        student: usize,
        slot: usize,
        tag: &ClassTag,
        availability: &[bool],
    ) -> bool {
        if student >= self.rows.len() || slot + tag.duration > self.num_slots {
            return false;
        }

        let span = slot..slot + tag.duration;
        let fits = span.clone().all(|j| {
            availability.get(j).copied().unwrap_or(false) && self.rows[student][j].is_none()
        });
        if !fits {
            return false;
        }

        for j in span {
            self.rows[student][j] = Some(tag.clone());
        }
        self.refresh_roles(student);
        true
    }

    /// Slots where the student has a class but is not available.
    pub fn conflicts(&self, student: usize, availability: &[bool]) -> Vec<usize> {
        self.rows
            .get(student)
            .map(|row| {
                row.iter()
                    .enumerate()
                    .filter(|(j, cell)| {
                        cell.is_some() && !availability.get(*j).copied().unwrap_or(false)
                    })
                    .map(|(j, _)| j)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of occupied cells.
    pub fn occupied(&self) -> usize {
        self.rows.iter().flatten().filter(|cell| cell.is_some()).count()
    }

    /// Exchanges two cells. Roles are not refreshed.
    pub(crate) fn swap_cells(&mut self, a: (usize, usize), b: (usize, usize)) {
        if a == b {
            return;
        }
        if a.0 == b.0 {
            self.rows[a.0].swap(a.1, b.1);
        } else {
            let taken = self.rows[a.0][a.1].take();
            self.rows[a.0][a.1] = self.rows[b.0][b.1].take();
            self.rows[b.0][b.1] = taken;
        }
    }

    pub(crate) fn refresh_roles(&mut self, student: usize) {
        self.roles[student] = compute_roles(&self.rows[student]);
    }
}

impl fmt::Display for ScheduleGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (student, row) in self.rows.iter().enumerate() {
            write!(f, "S{:<3}", student)?;
            for cell in row {
                match cell {
                    Some(tag) => write!(f, "| {:<6}", tag.to_string())?,
                    None => write!(f, "| {:<6}", "-")?,
                }
            }
            writeln!(f, "|")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(name: &str, duration: usize) -> Cell {
        Some(ClassTag::new(name, duration))
    }

    #[test]
    fn test_roles_for_mixed_row() {
        let row = vec![p("P1", 2), p("P1", 2), None, p("P2", 1), p("P2", 1)];
        assert_eq!(
            compute_roles(&row),
            vec![
                SlotRole::Start,
                SlotRole::Continuation,
                SlotRole::Empty,
                SlotRole::Start,
                SlotRole::Start,
            ]
        );
    }

    #[test]
    fn test_roles_for_back_to_back_blocks() {
        let row = vec![p("P1", 2), p("P1", 2), p("P1", 2), p("P1", 2)];
        assert_eq!(
            compute_roles(&row),
            vec![
                SlotRole::Start,
                SlotRole::Continuation,
                SlotRole::Start,
                SlotRole::Continuation,
            ]
        );
    }

    #[test]
    fn test_from_rows_rejects_truncated_block() {
        let rows = vec![vec![None, p("P1", 2)]];
        assert_eq!(
            ScheduleGrid::from_rows(rows),
            Err(ScheduleError::BrokenClassBlock {
                student: 0,
                slot: 1
            })
        );
    }

    #[test]
    fn test_from_rows_rejects_split_block() {
        let rows = vec![vec![p("P1", 2), p("P2", 1), None]];
        assert!(matches!(
            ScheduleGrid::from_rows(rows),
            Err(ScheduleError::BrokenClassBlock { student: 0, slot: 0 })
        ));
    }

    #[test]
    fn test_from_rows_rejects_ragged_rows() {
        let rows = vec![vec![None, None], vec![None]];
        assert!(matches!(
            ScheduleGrid::from_rows(rows),
            Err(ScheduleError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_place_respects_availability_and_bounds() {
        let mut grid = ScheduleGrid::empty(1, 4);
        let availability = vec![true, false, true, true];
        let two_hour = ClassTag::new("P1", 2);

        assert!(!grid.place(0, 0, &two_hour, &availability));
        assert!(!grid.place(0, 3, &two_hour, &availability));
        assert!(grid.place(0, 2, &two_hour, &availability));
        assert!(!grid.place(0, 2, &ClassTag::new("P2", 1), &availability));

        assert_eq!(grid.role(0, 2), SlotRole::Start);
        assert_eq!(grid.role(0, 3), SlotRole::Continuation);
        assert_eq!(grid.block_width(0, 2), 2);
        assert_eq!(grid.block_width(0, 3), 0);
        assert_eq!(grid.block_width(0, 0), 1);
        assert!(grid.is_contiguous());
    }

    #[test]
    fn test_conflicts() {
        let grid = ScheduleGrid::from_rows(vec![vec![p("P2", 1), None, p("P3", 1)]]).unwrap();
        assert_eq!(grid.conflicts(0, &[false, false, true]), vec![0]);
        assert_eq!(grid.conflicts(0, &[true]), vec![2]);
        assert!(grid.conflicts(5, &[true]).is_empty());
        assert_eq!(grid.occupied(), 2);
    }

    #[test]
    fn test_display() {
        let grid = ScheduleGrid::from_rows(vec![vec![p("P2", 1), None]]).unwrap();
        let text = grid.to_string();
        assert!(text.contains("P2 1h"));
        assert!(text.contains("| -"));
    }
}
