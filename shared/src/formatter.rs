//! Schedule row formatting and water volume estimates

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::allocator::WeekAllocation;
use crate::models::{BlockId, ScheduleParams, ScheduleRow, WaterEstimate, WaterPlan};
use crate::planner::WeekWindow;
use crate::types::{round_half_even, Language, WaterSplitMode};

const LITERS_PER_CUBIC_METER: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

/// Liters per tree for one row of a week with `workdays` eligible days.
///
/// Event split divides by `events_per_week` (at least 1); workday split
/// divides by `workdays`. Unrounded.
pub fn liters_per_tree_per_unit(plan: &WaterPlan, events_per_week: u32, workdays: u32) -> Decimal {
    let divisor = match plan.split_mode {
        WaterSplitMode::ByEvents => events_per_week.max(1),
        WaterSplitMode::ByWorkdays => workdays.max(1),
    };
    plan.liters_per_tree_per_week / Decimal::from(divisor)
}

/// Water figures for `trees` trees at `per_tree` liters each
pub fn water_estimate(
    plan: &WaterPlan,
    per_tree: Decimal,
    trees: u64,
    language: Language,
) -> WaterEstimate {
    let liters = Decimal::from(trees) * per_tree;
    WaterEstimate {
        split_mode: plan.split_mode,
        split_label: plan.split_mode.label(language).to_string(),
        liters_per_tree: round_half_even(per_tree, 2),
        liters_total: round_half_even(liters, 0),
        cubic_meters: round_half_even(liters / LITERS_PER_CUBIC_METER, 2),
    }
}

/// Build one row
pub fn format_row(
    params: &ScheduleParams,
    week: &WeekWindow,
    date: NaiveDate,
    blocks: &[BlockId],
) -> ScheduleRow {
    let trees = params.orchard.trees_for(blocks.len());
    let water = params.water.as_ref().map(|plan| {
        let per_tree = liters_per_tree_per_unit(plan, params.events_per_week, week.workdays());
        water_estimate(plan, per_tree, trees, params.language)
    });

    ScheduleRow {
        date,
        weekday: params.language.weekday_label(date).to_string(),
        week: week.number(),
        block_count: blocks.len(),
        blocks: blocks.to_vec(),
        trees_estimated: trees,
        water,
    }
}

/// Rows for every eligible day of a week, in day order
pub fn format_week(
    params: &ScheduleParams,
    week: &WeekWindow,
    allocation: &WeekAllocation,
) -> Vec<ScheduleRow> {
    week.eligible_days
        .iter()
        .map(|&date| format_row(params, week, date, allocation.blocks_on(date)))
        .collect()
}
