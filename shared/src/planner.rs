//! Weekly demand planning
//!
//! Turns orchard size and watering frequency into per-week demand, and
//! works out which days of each week are available for watering.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::models::{CapacityShortfall, ScheduleParams, ScheduleWarning};
use crate::types::HorizonRange;
use crate::validation::MAX_TOTAL_BLOCKS;

/// One 7-day window of the horizon with its workdays and demand
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WeekWindow {
    /// 0-based week index
    pub index: u32,
    pub start: NaiveDate,
    /// Last day of the window, clipped to the horizon
    pub end: NaiveDate,
    /// Days in the window that are not the rest day, in order. Never empty.
    pub eligible_days: Vec<NaiveDate>,
    /// `total_blocks × events_per_week`
    pub required: u32,
    /// `eligible_days × max_blocks_per_day`
    pub capacity: u32,
    total_blocks: u32,
    events_per_week: u32,
    max_blocks_per_day: u32,
}

impl WeekWindow {
    /// 1-based week number used in rows and messages
    pub fn number(&self) -> u32 {
        self.index + 1
    }

    pub fn workdays(&self) -> u32 {
        self.eligible_days.len() as u32
    }

    /// Assignments the allocator may place: `min(required, capacity)`
    pub fn assignable(&self) -> u32 {
        self.required.min(self.capacity)
    }

    pub fn shortfall(&self) -> Option<CapacityShortfall> {
        (self.required > self.capacity).then(|| CapacityShortfall {
            week: self.number(),
            required: self.required,
            total_blocks: self.total_blocks,
            events_per_week: self.events_per_week,
            capacity: self.capacity,
            workdays: self.workdays(),
            max_blocks_per_day: self.max_blocks_per_day,
        })
    }
}

/// Demand for a whole run
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DemandPlan {
    pub total_blocks: u32,
    pub horizon: HorizonRange,
    /// Weeks with at least one eligible day, in order
    pub weeks: Vec<WeekWindow>,
}

impl DemandPlan {
    pub fn shortfalls(&self) -> impl Iterator<Item = CapacityShortfall> + '_ {
        self.weeks.iter().filter_map(WeekWindow::shortfall)
    }
}

/// Build the demand plan for a run.
///
/// Returns the warning to report when there is nothing to schedule: the
/// orchard rounds to zero blocks, has more blocks than the scheduler
/// accepts, or the horizon is empty.
pub fn plan(params: &ScheduleParams) -> Result<DemandPlan, ScheduleWarning> {
    let oversized = || ScheduleWarning::OversizedOrchard {
        area: params.orchard.area,
        blocks_per_unit_area: params.orchard.blocks_per_unit_area,
        max_blocks: MAX_TOTAL_BLOCKS,
    };
    let total_blocks = params.orchard.total_blocks().ok_or_else(oversized)?;
    if total_blocks <= 0 {
        return Err(ScheduleWarning::EmptyOrchard {
            area: params.orchard.area,
            blocks_per_unit_area: params.orchard.blocks_per_unit_area,
        });
    }
    let total_blocks = u32::try_from(total_blocks)
        .ok()
        .filter(|total| *total <= MAX_TOTAL_BLOCKS)
        .ok_or_else(oversized)?;
    let horizon = HorizonRange::from_weeks(params.start_date, params.weeks).ok_or(
        ScheduleWarning::EmptyHorizon {
            weeks: params.weeks,
        },
    )?;

    let required = total_blocks.saturating_mul(params.events_per_week);
    let weeks = (0..params.weeks)
        .filter_map(|index| {
            let start = params
                .start_date
                .checked_add_days(Days::new(u64::from(index) * 7))?;
            let end = start
                .checked_add_days(Days::new(6))
                .map_or(horizon.end, |end| end.min(horizon.end));
            let eligible_days = eligible_days(params, &horizon, start, end);
            if eligible_days.is_empty() {
                return None;
            }
            let capacity = (eligible_days.len() as u32).saturating_mul(params.max_blocks_per_day);
            Some(WeekWindow {
                index,
                start,
                end,
                eligible_days,
                required,
                capacity,
                total_blocks,
                events_per_week: params.events_per_week,
                max_blocks_per_day: params.max_blocks_per_day,
            })
        })
        .collect();

    Ok(DemandPlan {
        total_blocks,
        horizon,
        weeks,
    })
}

/// Days in `[start, end]` inside the horizon that are not the rest day
fn eligible_days(
    params: &ScheduleParams,
    horizon: &HorizonRange,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<NaiveDate> {
    start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| horizon.contains(*day) && !params.is_rest_day(*day))
        .collect()
}
