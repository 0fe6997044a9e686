//! Shared types and scheduling core for the Orchard Watering Scheduler
//!
//! This crate contains the demand planner, the weekly allocator and the row
//! formatter, shared between the backend, the browser front end (via WASM),
//! and other components of the system.

pub mod allocator;
pub mod formatter;
pub mod generator;
pub mod models;
pub mod planner;
pub mod types;
pub mod validation;

pub use allocator::{allocate, even_targets, rotate_left, DayAssignment, WeekAllocation};
pub use generator::generate_schedule;
pub use models::*;
pub use planner::{plan, DemandPlan, WeekWindow};
pub use types::*;
pub use validation::*;
