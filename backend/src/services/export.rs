//! Export service for schedule downloads
//! Provides CSV and three-sheet xlsx workbook exports

use anyhow::Context;
use rust_xlsxwriter::Format;

use crate::error::{AppError, AppResult};
use crate::models::{Schedule, SCHEDULE_COLUMNS};

/// UTF-8 byte order mark, so spreadsheet tools detect the encoding
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Export service
#[derive(Clone, Copy, Default)]
pub struct ExportService;

/// A named table of string cells
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    fn new(name: &str, headers: &[&str], rows: Vec<Vec<String>>) -> Self {
        Self {
            name: name.to_string(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows,
        }
    }
}

/// Schedule, Meta and (when there are any) Warnings sheets
#[derive(Debug, Clone, PartialEq)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }

    /// Render as an xlsx file: one worksheet per sheet, bold header row,
    /// every cell written as text
    pub fn to_xlsx(&self) -> anyhow::Result<Vec<u8>> {
        let mut xlsx = rust_xlsxwriter::Workbook::new();
        let header = Format::new().set_bold();

        for sheet in &self.sheets {
            let worksheet = xlsx.add_worksheet();
            worksheet
                .set_name(&sheet.name)
                .with_context(|| format!("invalid sheet name {:?}", sheet.name))?;
            for (col, title) in (0u16..).zip(&sheet.headers) {
                worksheet.write_string_with_format(0, col, title, &header)?;
            }
            for (row, cells) in (1u32..).zip(&sheet.rows) {
                for (col, cell) in (0u16..).zip(cells) {
                    worksheet.write_string(row, col, cell)?;
                }
            }
            worksheet.autofit();
        }

        xlsx.save_to_buffer().context("failed to write xlsx workbook")
    }
}

impl ExportService {
    pub fn new() -> Self {
        Self
    }

    /// Export schedule rows as CSV. An empty schedule gives a header-only file.
    pub fn schedule_csv(&self, schedule: &Schedule, with_bom: bool) -> AppResult<Vec<u8>> {
        let mut buffer = Vec::new();
        if with_bom {
            buffer.extend_from_slice(UTF8_BOM);
        }

        let mut wtr = csv::Writer::from_writer(buffer);
        wtr.write_record(SCHEDULE_COLUMNS)?;
        for row in &schedule.rows {
            wtr.write_record(row.cells())?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| AppError::Export(format!("CSV writer error: {}", e)))?;
        Ok(bytes)
    }

    /// Build the three-sheet workbook for a schedule
    pub fn workbook(&self, schedule: &Schedule) -> Workbook {
        let schedule_rows = schedule
            .rows
            .iter()
            .map(|row| row.cells())
            .collect();

        let meta_rows = schedule
            .metadata
            .summary_pairs()
            .into_iter()
            .map(|(key, value)| vec![key.to_string(), value])
            .collect();

        let mut sheets = vec![
            Sheet::new("Schedule", &SCHEDULE_COLUMNS, schedule_rows),
            Sheet::new("Meta", &["item", "value"], meta_rows),
        ];

        if schedule.metadata.has_warnings() {
            let warning_rows = schedule
                .metadata
                .warnings
                .iter()
                .map(|warning| vec![warning.clone()])
                .collect();
            sheets.push(Sheet::new("Warnings", &["warning"], warning_rows));
        }

        Workbook { sheets }
    }

    /// Three-sheet workbook as xlsx bytes
    pub fn workbook_xlsx(&self, schedule: &Schedule) -> AppResult<Vec<u8>> {
        Ok(self.workbook(schedule).to_xlsx()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use shared::{generate_schedule, Language, ScheduleParams};

    fn params() -> ScheduleParams {
        let mut params = ScheduleParams::starting(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
        params.weeks = 1;
        params.language = Language::English;
        params
    }

    fn csv_text(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_csv_header_and_rows() {
        let schedule = generate_schedule(&params());
        let text = csv_text(ExportService::new().schedule_csv(&schedule, false).unwrap());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], SCHEDULE_COLUMNS.join(","));
        assert!(lines[1].starts_with("2024-06-03,Mon,1,3,\"1, 7, 13\",351,"));
        assert!(lines[1].ends_with(",15,5265,5.26"));
    }

    #[test]
    fn test_csv_bom_prefix() {
        let schedule = generate_schedule(&params());
        let bytes = ExportService::new().schedule_csv(&schedule, true).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));
    }

    #[test]
    fn test_csv_empty_schedule_is_header_only() {
        let mut params = params();
        params.orchard.area = Decimal::ZERO;
        let schedule = generate_schedule(&params);
        let text = csv_text(ExportService::new().schedule_csv(&schedule, false).unwrap());
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_csv_blank_water_columns_when_disabled() {
        let mut params = params();
        params.water = None;
        let schedule = generate_schedule(&params);
        let text = csv_text(ExportService::new().schedule_csv(&schedule, false).unwrap());
        let first = text.lines().nth(1).unwrap();
        assert!(first.ends_with(",,,,"));
    }

    #[test]
    fn test_workbook_without_warnings_has_two_sheets() {
        let schedule = generate_schedule(&params());
        let workbook = ExportService::new().workbook(&schedule);
        assert_eq!(workbook.sheets.len(), 2);
        assert_eq!(workbook.sheet("Schedule").unwrap().rows.len(), 6);
        let meta = workbook.sheet("Meta").unwrap();
        assert!(meta
            .rows
            .iter()
            .any(|row| row[0] == "total_blocks" && row[1] == "17"));
        assert!(workbook.sheet("Warnings").is_none());
    }

    #[test]
    fn test_workbook_xlsx_is_zip_container() {
        let schedule = generate_schedule(&params());
        let bytes = ExportService::new().workbook_xlsx(&schedule).unwrap();
        assert!(bytes.starts_with(b"PK\x03\x04"));
    }

    #[test]
    fn test_bad_sheet_name_is_internal_error() {
        let workbook = Workbook {
            sheets: vec![Sheet::new("Week [1]", &["date"], vec![])],
        };
        let err: AppError = workbook.to_xlsx().unwrap_err().into();
        assert!(matches!(err, AppError::InternalError(_)));
    }

    #[test]
    fn test_workbook_warning_sheet() {
        let mut params = params();
        params.max_blocks_per_day = 2;
        let schedule = generate_schedule(&params);
        let workbook = ExportService::new().workbook(&schedule);
        let warnings = workbook.sheet("Warnings").unwrap();
        assert_eq!(warnings.rows.len(), 1);
        assert!(warnings.rows[0][0].contains("Week 1"));
    }
}
