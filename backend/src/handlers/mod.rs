//! HTTP request handlers

pub mod health;
pub mod schedule;

pub use health::health_check;
pub use schedule::{generate_schedule, schedule_csv, schedule_workbook};
