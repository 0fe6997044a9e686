//! WebAssembly module for the Orchard Watering Scheduler
//!
//! Provides client-side computation for:
//! - Full schedule generation (JSON and CSV)
//! - Block count and capacity calculations
//! - Offline parameter validation

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    if cfg!(target_arch = "wasm32") {
        web_sys::console::debug_1(&JsValue::from_str("orchard watering scheduler ready"));
    }
}

fn to_js_error(message: String) -> JsValue {
    js_sys::Error::new(&message).into()
}

fn parse_params(params_json: &str) -> Result<ScheduleParams, String> {
    let params: ScheduleParams = serde_json::from_str(params_json)
        .map_err(|e| format!("Invalid parameters JSON: {}", e))?;
    validate_params(&params).map_err(|e| e.to_string())?;
    Ok(params)
}

fn schedule_for(params_json: &str) -> Result<Schedule, String> {
    let params = parse_params(params_json)?;
    let schedule = shared::generate_schedule(&params);

    if cfg!(target_arch = "wasm32") {
        for warning in &schedule.metadata.warnings {
            web_sys::console::warn_1(&JsValue::from_str(warning));
        }
    }

    Ok(schedule)
}

fn render_json(params_json: &str) -> Result<String, String> {
    let schedule = schedule_for(params_json)?;
    schedule
        .to_json()
        .map_err(|e| format!("Schedule serialization error: {}", e))
}

fn render_csv(params_json: &str) -> Result<String, String> {
    let schedule = schedule_for(params_json)?;
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(SCHEDULE_COLUMNS).map_err(|e| e.to_string())?;
    for row in &schedule.rows {
        wtr.write_record(row.cells()).map_err(|e| e.to_string())?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.to_string())?;
    String::from_utf8(bytes).map_err(|e| e.to_string())
}

/// Generate a schedule and return it as JSON
#[wasm_bindgen]
pub fn generate_schedule_json(params_json: &str) -> Result<String, JsValue> {
    render_json(params_json).map_err(to_js_error)
}

/// Generate a schedule and return it as CSV text (no byte order mark)
#[wasm_bindgen]
pub fn schedule_csv(params_json: &str) -> Result<String, JsValue> {
    render_csv(params_json).map_err(to_js_error)
}

/// Check parameters without generating
#[wasm_bindgen]
pub fn validate_schedule_params(params_json: &str) -> Result<(), JsValue> {
    parse_params(params_json).map(|_| ()).map_err(to_js_error)
}

/// Total blocks for an orchard, rounded half to even; 0 when it rounds below
/// 1 and saturating at `u32::MAX`
#[wasm_bindgen]
pub fn calculate_total_blocks(area: f64, blocks_per_unit_area: u32) -> u32 {
    let area = Decimal::try_from(area).unwrap_or(Decimal::ZERO);
    match shared::calculate_total_blocks(area, blocks_per_unit_area) {
        Some(total) if total <= 0 => 0,
        Some(total) => u32::try_from(total).unwrap_or(u32::MAX),
        None => u32::MAX,
    }
}

/// Liters per tree for one event or workday, 2 decimals
#[wasm_bindgen]
pub fn calculate_liters_per_tree(liters_per_week: f64, divisor: u32) -> f64 {
    let liters = Decimal::try_from(liters_per_week).unwrap_or(Decimal::ZERO);
    let per_tree = liters / Decimal::from(divisor.max(1));
    round_half_even(per_tree, 2).to_f64().unwrap_or(0.0)
}

/// Block assignments a week can hold
#[wasm_bindgen]
pub fn weekly_capacity(workdays: u32, max_blocks_per_day: u32) -> u32 {
    workdays.saturating_mul(max_blocks_per_day)
}
