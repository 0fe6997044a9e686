//! Schedule service: turns API requests into schedule runs

use std::sync::Arc;

use chrono::NaiveDate;
use validator::Validate;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{GenerateScheduleRequest, OrchardLayout, Schedule, ScheduleParams, WaterPlan};
use shared::{
    generate_schedule, parse_weekday, validate_params, validate_total_blocks, validate_weeks,
};

/// Schedule service
#[derive(Clone)]
pub struct ScheduleService {
    config: Arc<Config>,
}

impl ScheduleService {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    /// Resolve a request into full parameters.
    ///
    /// Request values win, then configured defaults, then the built-in
    /// defaults. `today` fills in a missing start date.
    pub fn resolve_params(
        &self,
        request: &GenerateScheduleRequest,
        today: NaiveDate,
    ) -> AppResult<ScheduleParams> {
        request.validate()?;

        let defaults = &self.config.schedule;
        let base = ScheduleParams::starting(request.start_date.unwrap_or(today));

        let rest_day = match request.rest_day.as_deref() {
            Some(name) => parse_weekday(name).map_err(|message| AppError::Validation {
                field: "rest_day".to_string(),
                message: message.to_string(),
                message_ja: "休みの曜日が不正です".to_string(),
            })?,
            None => defaults
                .rest_day_weekday()
                .map_err(|e| AppError::Configuration(e.to_string()))?,
        };
        let language = match request.language {
            Some(language) => language,
            None => defaults
                .language()
                .map_err(|e| AppError::Configuration(e.to_string()))?,
        };
        let split_mode = match request.split_mode {
            Some(mode) => mode,
            None => defaults
                .split_mode()
                .map_err(|e| AppError::Configuration(e.to_string()))?,
        };
        let water = request.include_water.unwrap_or(true).then(|| WaterPlan {
            liters_per_tree_per_week: request
                .liters_per_tree_per_week
                .unwrap_or(defaults.liters_per_tree_per_week),
            split_mode,
        });

        let weeks = request.weeks.unwrap_or(defaults.default_weeks);
        validate_weeks(weeks, Some(defaults.max_weeks)).map_err(|message| AppError::Validation {
            field: "weeks".to_string(),
            message: message.to_string(),
            message_ja: format!("期間は最大{}週までです", defaults.max_weeks),
        })?;

        let params = ScheduleParams {
            orchard: OrchardLayout {
                area: request.area.unwrap_or(base.orchard.area),
                blocks_per_unit_area: request
                    .blocks_per_unit_area
                    .unwrap_or(base.orchard.blocks_per_unit_area),
                trees_per_block: request
                    .trees_per_block
                    .unwrap_or(base.orchard.trees_per_block),
            },
            weeks,
            events_per_week: request.events_per_week.unwrap_or(base.events_per_week),
            max_blocks_per_day: request
                .max_blocks_per_day
                .unwrap_or(base.max_blocks_per_day),
            rest_day_enabled: request.rest_day_enabled.unwrap_or(base.rest_day_enabled),
            rest_day,
            water,
            language,
            ..base
        };

        validate_total_blocks(params.orchard.total_blocks(), Some(defaults.max_total_blocks))
            .map_err(|message| AppError::Validation {
                field: "area".to_string(),
                message: message.to_string(),
                message_ja: format!(
                    "ブロック数(面積×ブロック数/面積)は最大{}までです",
                    defaults.max_total_blocks
                ),
            })?;

        validate_params(&params)?;
        Ok(params)
    }

    /// Generate a schedule for a request
    pub fn generate(&self, request: &GenerateScheduleRequest) -> AppResult<Schedule> {
        let today = chrono::Local::now().date_naive();
        let params = self.resolve_params(request, today)?;
        Ok(self.run(&params))
    }

    /// Run the generator and log the outcome
    pub fn run(&self, params: &ScheduleParams) -> Schedule {
        let schedule = generate_schedule(params);

        tracing::info!(
            start_date = %params.start_date,
            weeks = params.weeks,
            total_blocks = schedule.metadata.total_blocks,
            rows = schedule.rows.len(),
            "Generated watering schedule"
        );
        for warning in &schedule.metadata.warnings {
            tracing::warn!("{}", warning);
        }

        schedule
    }
}
