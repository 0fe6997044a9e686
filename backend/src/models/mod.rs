//! Request models for the Orchard Watering Scheduler API
//!
//! Re-exports models from the shared crate and adds backend-specific models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::{Validate, ValidationError};

pub use shared::models::*;
use shared::{Language, WaterSplitMode};

/// Body of a schedule generation request.
///
/// Every field is optional; missing values fall back to the configured
/// defaults.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct GenerateScheduleRequest {
    #[validate(custom = "non_negative")]
    pub area: Option<Decimal>,
    #[validate(range(min = 1))]
    pub blocks_per_unit_area: Option<u32>,
    #[validate(range(min = 1))]
    pub trees_per_block: Option<u32>,
    /// Defaults to today
    pub start_date: Option<NaiveDate>,
    #[validate(range(min = 1))]
    pub weeks: Option<u32>,
    #[validate(range(min = 1, max = 7))]
    pub events_per_week: Option<u32>,
    #[validate(range(min = 1))]
    pub max_blocks_per_day: Option<u32>,
    pub rest_day_enabled: Option<bool>,
    /// Weekday name, e.g. "sun" or "日"
    pub rest_day: Option<String>,
    /// Set to false to leave out the water volume columns
    pub include_water: Option<bool>,
    #[validate(custom = "non_negative")]
    pub liters_per_tree_per_week: Option<Decimal>,
    pub split_mode: Option<WaterSplitMode>,
    pub language: Option<Language>,
}

fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::new("negative"));
    }
    Ok(())
}
