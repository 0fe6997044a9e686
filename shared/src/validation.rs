//! Validation utilities for the Orchard Watering Scheduler
//!
//! The generator accepts any input without panicking; these checks reject
//! the values a caller should never send in the first place.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::ScheduleParams;

/// Most watering events a block can have in one week
pub const MAX_EVENTS_PER_WEEK: u32 = 7;

/// Hard ceiling on `round(area × blocks_per_unit_area)`.
/// Callers may configure a lower limit but never a higher one.
pub const MAX_TOTAL_BLOCKS: u32 = 100_000;

/// A parameter outside its accepted range
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ParamsError {
    pub field: &'static str,
    pub message: &'static str,
}

impl ParamsError {
    fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }

    pub fn field(&self) -> &'static str {
        self.field
    }
}

// ============================================================================
// Orchard Validations
// ============================================================================

/// Validate planted area (zero is allowed and produces an empty schedule)
pub fn validate_area(area: Decimal) -> Result<(), &'static str> {
    if area < Decimal::ZERO {
        return Err("Area cannot be negative");
    }
    Ok(())
}

/// Validate the rounded block count against `max_blocks` (or
/// [`MAX_TOTAL_BLOCKS`], whichever is lower). `None` means the count
/// overflowed.
pub fn validate_total_blocks(total_blocks: Option<i64>, max_blocks: Option<u32>) -> Result<(), &'static str> {
    let limit = max_blocks.map_or(MAX_TOTAL_BLOCKS, |max| max.min(MAX_TOTAL_BLOCKS));
    match total_blocks {
        None => Err("Area is too large to divide into blocks"),
        Some(total) if total > i64::from(limit) => {
            Err("Area × blocks per unit area exceeds the maximum number of blocks")
        }
        Some(_) => Ok(()),
    }
}

/// Validate block density
pub fn validate_blocks_per_unit_area(blocks: u32) -> Result<(), &'static str> {
    if blocks == 0 {
        return Err("Blocks per unit area must be at least 1");
    }
    Ok(())
}

/// Validate trees per block
pub fn validate_trees_per_block(trees: u32) -> Result<(), &'static str> {
    if trees == 0 {
        return Err("Trees per block must be at least 1");
    }
    Ok(())
}

// ============================================================================
// Scheduling Validations
// ============================================================================

/// Validate horizon length, optionally against an upper bound
pub fn validate_weeks(weeks: u32, max_weeks: Option<u32>) -> Result<(), &'static str> {
    if weeks == 0 {
        return Err("Horizon must be at least 1 week");
    }
    if max_weeks.is_some_and(|max| weeks > max) {
        return Err("Horizon exceeds the configured maximum number of weeks");
    }
    Ok(())
}

/// Validate watering frequency (1-7 events per block per week)
pub fn validate_events_per_week(events: u32) -> Result<(), &'static str> {
    if events == 0 {
        return Err("Events per week must be at least 1");
    }
    if events > MAX_EVENTS_PER_WEEK {
        return Err("Events per week cannot exceed 7");
    }
    Ok(())
}

/// Validate the daily block cap
pub fn validate_max_blocks_per_day(max_blocks: u32) -> Result<(), &'static str> {
    if max_blocks == 0 {
        return Err("Max blocks per day must be at least 1");
    }
    Ok(())
}

/// Validate the weekly per-tree water requirement
pub fn validate_liters_per_tree(liters: Decimal) -> Result<(), &'static str> {
    if liters < Decimal::ZERO {
        return Err("Liters per tree per week cannot be negative");
    }
    Ok(())
}

/// Validate every schedule parameter, reporting the first failure
pub fn validate_params(params: &ScheduleParams) -> Result<(), ParamsError> {
    let checks = [
        ("area", validate_area(params.orchard.area)),
        (
            "area",
            validate_total_blocks(params.orchard.total_blocks(), None),
        ),
        (
            "blocks_per_unit_area",
            validate_blocks_per_unit_area(params.orchard.blocks_per_unit_area),
        ),
        (
            "trees_per_block",
            validate_trees_per_block(params.orchard.trees_per_block),
        ),
        ("weeks", validate_weeks(params.weeks, None)),
        (
            "events_per_week",
            validate_events_per_week(params.events_per_week),
        ),
        (
            "max_blocks_per_day",
            validate_max_blocks_per_day(params.max_blocks_per_day),
        ),
        (
            "liters_per_tree_per_week",
            params
                .water
                .map_or(Ok(()), |w| validate_liters_per_tree(w.liters_per_tree_per_week)),
        ),
    ];

    for (field, result) in checks {
        result.map_err(|message| ParamsError::new(field, message))?;
    }
    Ok(())
}
