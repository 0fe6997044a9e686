//! Schedule input parameters

use chrono::{NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::OrchardLayout;
use crate::types::{Language, WaterSplitMode};

/// Default planted area
pub const DEFAULT_AREA: Decimal = Decimal::ONE;
/// Default blocks per unit of area
pub const DEFAULT_BLOCKS_PER_UNIT_AREA: u32 = 17;
/// Default trees per block
pub const DEFAULT_TREES_PER_BLOCK: u32 = 117;
/// Default horizon length in weeks
pub const DEFAULT_WEEKS: u32 = 8;
/// Default watering events per block per week
pub const DEFAULT_EVENTS_PER_WEEK: u32 = 1;
/// Default cap on blocks watered per day
pub const DEFAULT_MAX_BLOCKS_PER_DAY: u32 = 10;
/// Default weekly water requirement per tree, in liters
pub const DEFAULT_LITERS_PER_TREE_PER_WEEK: Decimal = Decimal::from_parts(15, 0, 0, false, 0);

/// Everything a schedule run depends on
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleParams {
    pub orchard: OrchardLayout,
    /// First day of the horizon
    pub start_date: NaiveDate,
    /// Horizon length in weeks
    pub weeks: u32,
    pub events_per_week: u32,
    pub max_blocks_per_day: u32,
    /// Skip `rest_day` when allocating
    #[serde(default = "default_rest_day_enabled")]
    pub rest_day_enabled: bool,
    #[serde(default = "default_rest_day")]
    pub rest_day: Weekday,
    /// Water volume columns; `None` leaves them out
    #[serde(default)]
    pub water: Option<WaterPlan>,
    #[serde(default)]
    pub language: Language,
}

/// Weekly water requirement and how it is split into row figures
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WaterPlan {
    pub liters_per_tree_per_week: Decimal,
    #[serde(default)]
    pub split_mode: WaterSplitMode,
}

impl Default for WaterPlan {
    fn default() -> Self {
        Self {
            liters_per_tree_per_week: DEFAULT_LITERS_PER_TREE_PER_WEEK,
            split_mode: WaterSplitMode::ByEvents,
        }
    }
}

fn default_rest_day_enabled() -> bool {
    true
}

fn default_rest_day() -> Weekday {
    Weekday::Sun
}

impl ScheduleParams {
    /// Default parameters for a horizon starting at `start_date`
    pub fn starting(start_date: NaiveDate) -> Self {
        Self {
            orchard: OrchardLayout {
                area: DEFAULT_AREA,
                blocks_per_unit_area: DEFAULT_BLOCKS_PER_UNIT_AREA,
                trees_per_block: DEFAULT_TREES_PER_BLOCK,
            },
            start_date,
            weeks: DEFAULT_WEEKS,
            events_per_week: DEFAULT_EVENTS_PER_WEEK,
            max_blocks_per_day: DEFAULT_MAX_BLOCKS_PER_DAY,
            rest_day_enabled: default_rest_day_enabled(),
            rest_day: default_rest_day(),
            water: Some(WaterPlan::default()),
            language: Language::default(),
        }
    }

    /// Whether `date` is the weekly rest day under these parameters
    pub fn is_rest_day(&self, date: NaiveDate) -> bool {
        use chrono::Datelike;
        self.rest_day_enabled && date.weekday() == self.rest_day
    }
}
