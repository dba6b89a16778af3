//! # Schedule
//!
//! The data model shared by every operator: class definitions, the tagged
//! cell value, student profiles and the student × slot `ScheduleGrid`.
//!
//! ## Example
//!
//! ```rust
//! use classched::schedule::{ClassTag, ScheduleGrid, SlotRole};
//!
//! let mut grid = ScheduleGrid::empty(1, 4);
//! let availability = vec![true; 4];
//!
//! assert!(grid.place(0, 1, &ClassTag::new("P1", 2), &availability));
//! assert_eq!(grid.role(0, 1), SlotRole::Start);
//! assert_eq!(grid.role(0, 2), SlotRole::Continuation);
//! assert!(grid.is_contiguous());
//! ```
pub mod class;
pub mod grid;
pub mod student;

pub use class::{ClassCatalog, ClassDefinition, ClassId, ClassTag};
pub use grid::{compute_roles, Cell, ScheduleGrid, SlotRole};
pub use student::{split_profiles, StudentProfile};
