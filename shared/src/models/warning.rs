//! Non-fatal schedule warnings

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Language;

/// A condition worth reporting that did not stop schedule generation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScheduleWarning {
    /// `round(area × blocks_per_unit_area)` came out zero or negative
    EmptyOrchard {
        area: Decimal,
        blocks_per_unit_area: u32,
    },
    /// The block count overflowed or is above the scheduler's ceiling
    OversizedOrchard {
        area: Decimal,
        blocks_per_unit_area: u32,
        max_blocks: u32,
    },
    /// The horizon has no days in it
    EmptyHorizon { weeks: u32 },
    /// A week needs more assignments than its workdays can absorb
    CapacityShortfall(CapacityShortfall),
}

/// Weekly demand above weekly capacity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CapacityShortfall {
    /// 1-based week number
    pub week: u32,
    pub required: u32,
    pub total_blocks: u32,
    pub events_per_week: u32,
    pub capacity: u32,
    pub workdays: u32,
    pub max_blocks_per_day: u32,
}

impl CapacityShortfall {
    /// Assignments that will not be scheduled this week
    pub fn unscheduled(&self) -> u32 {
        self.required.saturating_sub(self.capacity)
    }
}

impl ScheduleWarning {
    pub fn message(&self, language: Language) -> String {
        match (self, language) {
            (ScheduleWarning::EmptyOrchard { .. }, Language::Japanese) => {
                "ha または blocks_per_ha が0以下のため生成できません。".to_string()
            }
            (ScheduleWarning::EmptyOrchard { area, blocks_per_unit_area }, Language::English) => {
                format!(
                    "No blocks to schedule: area ({}) × blocks per unit area ({}) rounds to zero or less.",
                    area, blocks_per_unit_area
                )
            }
            (ScheduleWarning::OversizedOrchard { max_blocks, .. }, Language::Japanese) => format!(
                "ha × blocks_per_ha のブロック数が上限({}ブロック)を超えるため生成できません。",
                max_blocks
            ),
            (
                ScheduleWarning::OversizedOrchard {
                    area,
                    blocks_per_unit_area,
                    max_blocks,
                },
                Language::English,
            ) => format!(
                "Too many blocks to schedule: area ({}) × blocks per unit area ({}) exceeds {} blocks.",
                area, blocks_per_unit_area, max_blocks
            ),
            (ScheduleWarning::EmptyHorizon { weeks }, Language::Japanese) => {
                format!("期間({}週)に日付がないため生成できません。", weeks)
            }
            (ScheduleWarning::EmptyHorizon { weeks }, Language::English) => {
                format!("No days to schedule: a horizon of {} weeks is empty.", weeks)
            }
            (ScheduleWarning::CapacityShortfall(s), Language::Japanese) => format!(
                "Week {}: 必要割当({}件=ブロック{}×{}回/週)が、週の上限枠({}件=稼働日{}×{}ブロック/日)を超えています({}件未割当)。 → max_blocks_per_day を増やすか、events_per_week を下げてください。",
                s.week,
                s.required,
                s.total_blocks,
                s.events_per_week,
                s.capacity,
                s.workdays,
                s.max_blocks_per_day,
                s.unscheduled()
            ),
            (ScheduleWarning::CapacityShortfall(s), Language::English) => format!(
                "Week {}: required assignments ({} = {} blocks × {} events/week) exceed weekly capacity ({} = {} workdays × {} blocks/day); {} left unscheduled. Raise max_blocks_per_day or lower events_per_week.",
                s.week,
                s.required,
                s.total_blocks,
                s.events_per_week,
                s.capacity,
                s.workdays,
                s.max_blocks_per_day,
                s.unscheduled()
            ),
        }
    }
}

impl std::fmt::Display for ScheduleWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message(Language::English))
    }
}
