//! Business logic services for the Orchard Watering Scheduler

pub mod export;
pub mod schedule;

pub use export::ExportService;
pub use schedule::ScheduleService;
