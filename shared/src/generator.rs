//! Schedule generation for a whole horizon

use crate::allocator::allocate;
use crate::formatter::format_week;
use crate::models::{block_ids, RunMetadata, Schedule, ScheduleParams, ScheduleWarning};
use crate::planner::plan;

/// Generate the watering schedule for `params`.
///
/// Never fails: when there is nothing to schedule the result is empty with
/// exactly one warning explaining why, and weeks whose demand exceeds
/// capacity are clamped and reported in `metadata.warnings`.
pub fn generate_schedule(params: &ScheduleParams) -> Schedule {
    let demand = match plan(params) {
        Ok(demand) => demand,
        Err(warning) => {
            let total_blocks = params
                .orchard
                .total_blocks()
                .and_then(|total| u32::try_from(total).ok())
                .unwrap_or(0);
            return Schedule {
                rows: Vec::new(),
                metadata: RunMetadata::from_params(
                    params,
                    total_blocks,
                    None,
                    vec![warning.message(params.language)],
                ),
            };
        }
    };

    let blocks = block_ids(demand.total_blocks);
    let warnings = demand
        .shortfalls()
        .map(|shortfall| ScheduleWarning::CapacityShortfall(shortfall).message(params.language))
        .collect();
    let mut rows = Vec::new();

    for week in &demand.weeks {
        let allocation = allocate(
            &blocks,
            &week.eligible_days,
            params.events_per_week,
            params.max_blocks_per_day,
            week.assignable(),
        );
        rows.extend(format_week(params, week, &allocation));
    }

    Schedule {
        rows,
        metadata: RunMetadata::from_params(
            params,
            demand.total_blocks,
            Some(demand.horizon.end),
            warnings,
        ),
    }
}
