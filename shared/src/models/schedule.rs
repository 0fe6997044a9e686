//! Generated schedule models

use chrono::{NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{BlockId, ScheduleParams};
use crate::types::{Language, WaterSplitMode};

/// Column names for tabular exports, in cell order
pub const SCHEDULE_COLUMNS: [&str; 10] = [
    "date",
    "weekday",
    "week",
    "block_count",
    "blocks",
    "trees_estimated",
    "split_mode",
    "liters_per_tree",
    "liters_total",
    "cubic_meters",
];

/// One day of the schedule
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleRow {
    pub date: NaiveDate,
    pub weekday: String,
    /// 1-based week number
    pub week: u32,
    pub block_count: usize,
    /// Blocks watered on this day, in assignment order
    pub blocks: Vec<BlockId>,
    pub trees_estimated: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water: Option<WaterEstimate>,
}

impl ScheduleRow {
    /// Block list as shown in tables, e.g. `"1, 2, 3"`
    pub fn blocks_display(&self) -> String {
        self.blocks
            .iter()
            .map(|b| b.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Row as text cells matching [`SCHEDULE_COLUMNS`]. Water cells are
    /// blank when volumes are disabled.
    pub fn cells(&self) -> Vec<String> {
        let mut cells = vec![
            self.date.to_string(),
            self.weekday.clone(),
            self.week.to_string(),
            self.block_count.to_string(),
            self.blocks_display(),
            self.trees_estimated.to_string(),
        ];
        match &self.water {
            Some(water) => cells.extend([
                water.split_label.clone(),
                water.liters_per_tree.to_string(),
                water.liters_total.to_string(),
                water.cubic_meters.to_string(),
            ]),
            None => cells.extend(std::iter::repeat(String::new()).take(4)),
        }
        cells
    }
}

/// Water volume figures for one row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WaterEstimate {
    pub split_mode: WaterSplitMode,
    pub split_label: String,
    /// Liters per tree for this row, 2 decimals
    pub liters_per_tree: Decimal,
    /// Whole liters
    pub liters_total: Decimal,
    /// Cubic meters, 2 decimals
    pub cubic_meters: Decimal,
}

/// Inputs echoed back with the run's warnings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunMetadata {
    pub area: Decimal,
    pub blocks_per_unit_area: u32,
    pub trees_per_block: u32,
    pub total_blocks: u32,
    pub events_per_week: u32,
    pub max_blocks_per_day: u32,
    pub weeks: u32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub rest_day_enabled: bool,
    pub rest_day: Weekday,
    pub liters_per_tree_per_week: Option<Decimal>,
    pub water_split_mode: Option<WaterSplitMode>,
    pub language: Language,
    pub warnings: Vec<String>,
}

impl RunMetadata {
    pub fn from_params(
        params: &ScheduleParams,
        total_blocks: u32,
        end_date: Option<NaiveDate>,
        warnings: Vec<String>,
    ) -> Self {
        Self {
            area: params.orchard.area,
            blocks_per_unit_area: params.orchard.blocks_per_unit_area,
            trees_per_block: params.orchard.trees_per_block,
            total_blocks,
            events_per_week: params.events_per_week,
            max_blocks_per_day: params.max_blocks_per_day,
            weeks: params.weeks,
            start_date: params.start_date,
            end_date,
            rest_day_enabled: params.rest_day_enabled,
            rest_day: params.rest_day,
            liters_per_tree_per_week: params.water.map(|w| w.liters_per_tree_per_week),
            water_split_mode: params.water.map(|w| w.split_mode),
            language: params.language,
            warnings,
        }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Input summary as key/value pairs, in display order
    pub fn summary_pairs(&self) -> Vec<(&'static str, String)> {
        let optional = |value: Option<String>| value.unwrap_or_default();
        vec![
            ("area", self.area.to_string()),
            ("blocks_per_unit_area", self.blocks_per_unit_area.to_string()),
            ("trees_per_block", self.trees_per_block.to_string()),
            ("total_blocks", self.total_blocks.to_string()),
            ("events_per_week", self.events_per_week.to_string()),
            ("max_blocks_per_day", self.max_blocks_per_day.to_string()),
            ("weeks", self.weeks.to_string()),
            ("start_date", self.start_date.to_string()),
            ("end_date", optional(self.end_date.map(|d| d.to_string()))),
            ("rest_day_enabled", self.rest_day_enabled.to_string()),
            ("rest_day", self.rest_day.to_string()),
            ("language", self.language.code().to_string()),
            (
                "liters_per_tree_per_week",
                optional(self.liters_per_tree_per_week.map(|l| l.to_string())),
            ),
            (
                "water_split_mode",
                optional(self.water_split_mode.map(|m| m.to_string())),
            ),
        ]
    }
}

/// A complete run: rows in day order plus metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Schedule {
    pub rows: Vec<ScheduleRow>,
    pub metadata: RunMetadata,
}

impl Schedule {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows belonging to a 1-based week number
    pub fn week_rows(&self, week: u32) -> impl Iterator<Item = &ScheduleRow> {
        self.rows.iter().filter(move |row| row.week == week)
    }

    /// Total assignments scheduled in a 1-based week number
    pub fn week_total(&self, week: u32) -> usize {
        self.week_rows(week).map(|row| row.block_count).sum()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
