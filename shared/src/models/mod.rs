//! Domain models for the Orchard Watering Scheduler

mod orchard;
mod params;
mod schedule;
mod warning;

pub use orchard::*;
pub use params::*;
pub use schedule::*;
pub use warning::*;
