//! # Environment
//!
//! Sets up a run: the class catalog, one profile per student, and random
//! initial schedules that respect each student's availability.
//!
//! ## Example
//!
//! ```rust
//! use classched::environment::Environment;
//! use classched::rng::RandomNumberGenerator;
//! use classched::schedule::ClassCatalog;
//!
//! let mut rng = RandomNumberGenerator::from_seed(5);
//! let env = Environment::random(8, 5, ClassCatalog::standard(), &mut rng);
//!
//! let population = env.random_population(10, &mut rng);
//! assert_eq!(population.len(), 10);
//! assert!(population.iter().all(|grid| grid.is_contiguous()));
//! assert!(population.iter().all(|grid| env.count_conflicts(grid) == 0));
//! ```

use crate::{
    fitness::FitnessEvaluator,
    rng::RandomNumberGenerator,
    schedule::{ClassCatalog, ClassDefinition, ScheduleGrid, StudentProfile},
};

/// Instances of each catalog class available to one random schedule.
const COPIES_PER_CLASS: usize = 2;
const PREFERENCE_RANGE: (f32, f32) = (0.5, 1.5);

#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    num_slots: usize,
    catalog: ClassCatalog,
    students: Vec<StudentProfile>,
}

impl Environment {
    pub fn new(num_slots: usize, catalog: ClassCatalog, students: Vec<StudentProfile>) -> Self {
        Self {
            num_slots,
            catalog,
            students,
        }
    }

    /// Generates students with random preferences in `[0.5, 1.5)`, rounded
    /// to two decimals, and one or two unavailable slots each.
    pub fn random(
        num_slots: usize,
        num_students: usize,
        catalog: ClassCatalog,
        rng: &mut RandomNumberGenerator,
    ) -> Self {
        let preferences = rng.fetch_uniform(PREFERENCE_RANGE.0, PREFERENCE_RANGE.1, num_students);

        let students = preferences
            .into_iter()
            .enumerate()
            .map(|(id, preference)| {
                let preference = (f64::from(preference) * 100.0).round() / 100.0;
                StudentProfile::new(id, random_availability(num_slots, rng), preference)
            })
            .collect();

        Self::new(num_slots, catalog, students)
    }

    pub fn num_slots(&self) -> usize {
        self.num_slots
    }

    pub fn num_students(&self) -> usize {
        self.students.len()
    }

    pub fn catalog(&self) -> &ClassCatalog {
        &self.catalog
    }

    pub fn students(&self) -> &[StudentProfile] {
        &self.students
    }

    /// Fitness function for this environment's students.
    pub fn evaluator(&self) -> FitnessEvaluator {
        FitnessEvaluator::new(&self.students)
    }

    /// Builds a random schedule.
    ///
    /// A pool holding each catalog class twice is shared by all students.
    /// Each row is filled left to right: on an available slot a random class
    /// is drawn from the pool and placed if all its slots are available and
    /// free, otherwise the slot is left empty.
    pub fn random_schedule(&self, rng: &mut RandomNumberGenerator) -> ScheduleGrid {
        let mut grid = ScheduleGrid::empty(self.students.len(), self.num_slots);
        let mut pool: Vec<&ClassDefinition> = self
            .catalog
            .classes()
            .iter()
            .flat_map(|class| std::iter::repeat(class).take(COPIES_PER_CLASS))
            .collect();

        for (student, profile) in self.students.iter().enumerate() {
            let mut slot = 0;
            while slot < self.num_slots && !pool.is_empty() {
                if !profile.is_available(slot) {
                    slot += 1;
                    continue;
                }

                let pick = rng.gen_index(pool.len());
                let class = pool[pick];
                if grid.place(student, slot, &class.tag(), &profile.availability) {
                    pool.swap_remove(pick);
                    slot += class.duration;
                } else {
                    slot += 1;
                }
            }
        }

        grid
    }

    pub fn random_population(&self, size: usize, rng: &mut RandomNumberGenerator) -> Vec<ScheduleGrid> {
        (0..size).map(|_| self.random_schedule(rng)).collect()
    }

    /// Number of occupied cells the student cannot attend.
    pub fn count_conflicts(&self, grid: &ScheduleGrid) -> usize {
        self.students
            .iter()
            .enumerate()
            .map(|(student, profile)| grid.conflicts(student, &profile.availability).len())
            .sum()
    }

    /// Sum of each student's preference over their occupied cells.
    pub fn preference_score(&self, grid: &ScheduleGrid) -> f64 {
        self.students
            .iter()
            .enumerate()
            .filter(|(student, _)| *student < grid.num_students())
            .map(|(student, profile)| {
                let occupied = grid.row(student).iter().filter(|cell| cell.is_some()).count();
                profile.preference * occupied as f64
            })
            .sum()
    }
}

fn random_availability(num_slots: usize, rng: &mut RandomNumberGenerator) -> Vec<bool> {
    let mut availability = vec![true; num_slots];
    if num_slots == 0 {
        return availability;
    }

    let unavailable = 1 + rng.gen_index(2);
    for slot in rng.sample_distinct(num_slots, unavailable) {
        availability[slot] = false;
    }
    availability
}
