//! Schedule handlers: JSON, CSV and workbook downloads

use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::AppResult;
use crate::models::{GenerateScheduleRequest, Schedule};
use crate::services::{ExportService, ScheduleService};
use crate::AppState;

const CSV_FILENAME: &str = "watering_schedule.csv";
const WORKBOOK_FILENAME: &str = "watering_schedule.xlsx";
const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

fn attachment(filename: &str) -> String {
    format!("attachment; filename=\"{}\"", filename)
}

/// Generate a schedule and return it as JSON
pub async fn generate_schedule(
    State(state): State<AppState>,
    payload: Result<Json<GenerateScheduleRequest>, JsonRejection>,
) -> AppResult<Json<Schedule>> {
    let Json(request) = payload?;
    let service = ScheduleService::new(state.config.clone());
    let schedule = service.generate(&request)?;
    Ok(Json(schedule))
}

/// Generate a schedule and return it as a CSV download
pub async fn schedule_csv(
    State(state): State<AppState>,
    payload: Result<Json<GenerateScheduleRequest>, JsonRejection>,
) -> AppResult<Response> {
    let Json(request) = payload?;
    let service = ScheduleService::new(state.config.clone());
    let schedule = service.generate(&request)?;
    let csv = ExportService::new().schedule_csv(&schedule, state.config.export.csv_bom)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, attachment(CSV_FILENAME)),
        ],
        csv,
    )
        .into_response())
}

/// Generate a schedule and return the three-sheet workbook as a download
pub async fn schedule_workbook(
    State(state): State<AppState>,
    payload: Result<Json<GenerateScheduleRequest>, JsonRejection>,
) -> AppResult<Response> {
    let Json(request) = payload?;
    let service = ScheduleService::new(state.config.clone());
    let schedule = service.generate(&request)?;
    let workbook = ExportService::new().workbook_xlsx(&schedule)?;

    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, attachment(WORKBOOK_FILENAME)),
        ],
        workbook,
    )
        .into_response())
}
