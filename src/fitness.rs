//! # Fitness
//!
//! Scores a `ScheduleGrid` against per-student preferences and availability.
//!
//! For every student row the score adds:
//!
//! - `-1.0` for each occupied slot the student cannot attend;
//! - the student's preference for each other occupied slot, except the
//!   continuation slots of a multi-slot class;
//! - `-2.0` for each occupied slot holding a class already seen earlier in
//!   the row, so the second slot of a two-slot class counts as a repeat;
//! - a priority/earliness bonus for each occupied slot,
//!   `(max_rank + 1 - rank) * (num_slots - slot) / num_slots`, where `rank`
//!   is parsed from the class id (unparseable ids add nothing).
//!
//! The sum over all rows is floored at `0.0`.
//!
//! ## Example
//!
//! ```rust
//! use classched::fitness::evaluate;
//! use classched::schedule::{ClassTag, ScheduleGrid};
//!
//! let mut grid = ScheduleGrid::empty(1, 4);
//! grid.place(0, 0, &ClassTag::new("P1", 1), &[true; 4]);
//!
//! // preference 1.0 + bonus (4 + 1 - 1) * 4 / 4
//! assert_eq!(evaluate(&grid, &[1.0], &[vec![true; 4]]), 5.0);
//! assert_eq!(evaluate(&grid, &[1.0], &[]), 0.0);
//! ```

use std::collections::HashMap;

use crate::{
    evolution::Challenge,
    schedule::{split_profiles, Cell, ClassId, ScheduleGrid, SlotRole, StudentProfile},
};

pub const UNAVAILABLE_PENALTY: f64 = 1.0;
pub const DUPLICATE_PENALTY: f64 = 2.0;
pub const DEFAULT_MAX_PRIORITY_RANK: u32 = 4;

/// Scores a grid with the default maximum priority rank.
///
/// Returns `0.0` if the grid or either table is empty. Rows without a
/// matching preference or availability entry are skipped.
pub fn evaluate(grid: &ScheduleGrid, preferences: &[f64], availability: &[Vec<bool>]) -> f64 {
    evaluate_with_rank(grid, preferences, availability, DEFAULT_MAX_PRIORITY_RANK)
}

/// Scores a grid, using `max_priority_rank` in the priority bonus.
pub fn evaluate_with_rank(
    grid: &ScheduleGrid,
    preferences: &[f64],
    availability: &[Vec<bool>],
    max_priority_rank: u32,
) -> f64 {
    if grid.is_empty() || preferences.is_empty() || availability.is_empty() {
        return 0.0;
    }

    let total: f64 = grid
        .rows()
        .iter()
        .enumerate()
        .filter_map(|(student, row)| {
            let preference = preferences.get(student)?;
            let available = availability.get(student)?;
            Some(score_row(
                row,
                grid.row_roles(student),
                *preference,
                available,
                max_priority_rank,
            ))
        })
        .sum();

    total.max(0.0)
}

fn score_row(
    row: &[Cell],
    roles: &[SlotRole],
    preference: f64,
    availability: &[bool],
    max_priority_rank: u32,
) -> f64 {
    let num_slots = row.len() as f64;
    let mut occupancy: HashMap<&ClassId, usize> = HashMap::new();
    let mut score = 0.0;

    for (slot, (cell, role)) in row.iter().zip(roles).enumerate() {
        let Some(tag) = cell else {
            continue;
        };

        if !availability.get(slot).copied().unwrap_or(false) {
            score -= UNAVAILABLE_PENALTY;
        } else if *role != SlotRole::Continuation {
            score += preference;
        }

        let count = occupancy.entry(&tag.class_id).or_insert(0);
        *count += 1;
        if *count > 1 {
            score -= DUPLICATE_PENALTY;
        }

        if let Some(rank) = tag.class_id.priority_rank() {
            let weight = f64::from(max_priority_rank) + 1.0 - f64::from(rank);
            score += weight * (num_slots - slot as f64) / num_slots;
        }
    }

    score
}

/// Fitness function bound to a fixed set of students.
#[derive(Clone, Debug)]
pub struct FitnessEvaluator {
    preferences: Vec<f64>,
    availability: Vec<Vec<bool>>,
    max_priority_rank: u32,
}

impl FitnessEvaluator {
    pub fn new(profiles: &[StudentProfile]) -> Self {
        let (preferences, availability) = split_profiles(profiles);
        Self {
            preferences,
            availability,
            max_priority_rank: DEFAULT_MAX_PRIORITY_RANK,
        }
    }

    pub fn from_tables(preferences: Vec<f64>, availability: Vec<Vec<bool>>) -> Self {
        Self {
            preferences,
            availability,
            max_priority_rank: DEFAULT_MAX_PRIORITY_RANK,
        }
    }

    pub fn with_max_priority_rank(mut self, max_priority_rank: u32) -> Self {
        self.max_priority_rank = max_priority_rank;
        self
    }

    pub fn preferences(&self) -> &[f64] {
        &self.preferences
    }

    pub fn availability(&self) -> &[Vec<bool>] {
        &self.availability
    }

    pub fn evaluate(&self, grid: &ScheduleGrid) -> f64 {
        evaluate_with_rank(
            grid,
            &self.preferences,
            &self.availability,
            self.max_priority_rank,
        )
    }
}

impl Challenge<ScheduleGrid> for FitnessEvaluator {
    fn score(&self, phenotype: &ScheduleGrid) -> f64 {
        self.evaluate(phenotype)
    }
}
