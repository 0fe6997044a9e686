//! Common types used across the platform

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Japanese weekday labels, Monday first
pub const WEEKDAYS_JA: [&str; 7] = ["月", "火", "水", "木", "金", "土", "日"];

/// English weekday labels, Monday first
pub const WEEKDAYS_EN: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Supported label languages
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    #[serde(alias = "ja")]
    Japanese,
    #[serde(alias = "en")]
    English,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::Japanese => "ja",
            Language::English => "en",
        }
    }

    /// Short weekday label for a date
    pub fn weekday_label(&self, date: NaiveDate) -> &'static str {
        let index = date.weekday().num_days_from_monday() as usize;
        match self {
            Language::Japanese => WEEKDAYS_JA[index],
            Language::English => WEEKDAYS_EN[index],
        }
    }
}

impl std::str::FromStr for Language {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ja" | "japanese" => Ok(Language::Japanese),
            "en" | "english" => Ok(Language::English),
            _ => Err("Unknown language, expected \"ja\" or \"en\""),
        }
    }
}

/// How the weekly per-tree water requirement is divided into row figures
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum WaterSplitMode {
    /// Divide by the number of watering events per week (liters per event)
    #[default]
    #[serde(rename = "events")]
    ByEvents,
    /// Divide by the number of eligible workdays in the week (liters per day)
    #[serde(rename = "workdays")]
    ByWorkdays,
}

impl WaterSplitMode {
    pub fn key(&self) -> &'static str {
        match self {
            WaterSplitMode::ByEvents => "events",
            WaterSplitMode::ByWorkdays => "workdays",
        }
    }

    /// Column label shown next to the per-tree figure
    pub fn label(&self, language: Language) -> &'static str {
        match (self, language) {
            (WaterSplitMode::ByEvents, Language::Japanese) => "潅水回数割(ℓ/回)",
            (WaterSplitMode::ByWorkdays, Language::Japanese) => "稼働日割(ℓ/日)",
            (WaterSplitMode::ByEvents, Language::English) => "Per event (L/event)",
            (WaterSplitMode::ByWorkdays, Language::English) => "Per workday (L/day)",
        }
    }
}

impl std::str::FromStr for WaterSplitMode {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "events" => Ok(WaterSplitMode::ByEvents),
            "workdays" => Ok(WaterSplitMode::ByWorkdays),
            _ => Err("Unknown split mode, expected \"events\" or \"workdays\""),
        }
    }
}

impl std::fmt::Display for WaterSplitMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Inclusive date range covered by a schedule
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct HorizonRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl HorizonRange {
    /// Horizon of `weeks` whole weeks starting at `start`.
    /// Returns `None` for zero weeks or when the end date overflows.
    pub fn from_weeks(start: NaiveDate, weeks: u32) -> Option<Self> {
        if weeks == 0 {
            return None;
        }
        let days = u64::from(weeks) * 7 - 1;
        let end = start.checked_add_days(chrono::Days::new(days))?;
        Some(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Round to `dp` decimal places, half to even.
///
/// Every rounded figure in a schedule (block count, liters, cubic meters)
/// goes through this function.
pub fn round_half_even(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven)
}

/// Parse a weekday name ("sun", "Sunday", "日") into a `Weekday`
pub fn parse_weekday(s: &str) -> Result<Weekday, &'static str> {
    if let Some(index) = WEEKDAYS_JA.iter().position(|label| *label == s) {
        return Ok(WEEK[index]);
    }
    s.parse::<Weekday>().map_err(|_| "Invalid weekday")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_weekday_labels() {
        // 2024-06-03 is a Monday
        assert_eq!(Language::Japanese.weekday_label(date(2024, 6, 3)), "月");
        assert_eq!(Language::English.weekday_label(date(2024, 6, 9)), "Sun");
        assert_eq!(Language::Japanese.weekday_label(date(2024, 6, 9)), "日");
    }

    #[test]
    fn test_horizon_from_weeks() {
        let horizon = HorizonRange::from_weeks(date(2024, 6, 3), 2).unwrap();
        assert_eq!(horizon.end, date(2024, 6, 16));
        assert!(horizon.contains(date(2024, 6, 16)));
        assert!(!horizon.contains(date(2024, 6, 17)));
        assert!(HorizonRange::from_weeks(date(2024, 6, 3), 0).is_none());
    }

    #[test]
    fn test_split_mode_serde_keys() {
        let json = serde_json::to_string(&WaterSplitMode::ByWorkdays).unwrap();
        assert_eq!(json, "\"workdays\"");
        let mode: WaterSplitMode = serde_json::from_str("\"events\"").unwrap();
        assert_eq!(mode, WaterSplitMode::ByEvents);
        assert_eq!("workdays".parse::<WaterSplitMode>(), Ok(WaterSplitMode::ByWorkdays));
        assert!("weekly".parse::<WaterSplitMode>().is_err());
    }

    #[test]
    fn test_parse_weekday() {
        assert_eq!(parse_weekday("sun"), Ok(Weekday::Sun));
        assert_eq!(parse_weekday("Saturday"), Ok(Weekday::Sat));
        assert_eq!(parse_weekday("日"), Ok(Weekday::Sun));
        assert_eq!(parse_weekday("月"), Ok(Weekday::Mon));
        assert!(parse_weekday("someday").is_err());
    }

    #[test]
    fn test_round_half_even() {
        use std::str::FromStr;
        let d = |s: &str| Decimal::from_str(s).unwrap();
        assert_eq!(round_half_even(d("2.5"), 0), d("2"));
        assert_eq!(round_half_even(d("3.5"), 0), d("4"));
        assert_eq!(round_half_even(d("1.125"), 2), d("1.12"));
        assert_eq!(round_half_even(d("1.135"), 2), d("1.14"));
    }

    #[test]
    fn test_language_parse() {
        assert_eq!("EN".parse::<Language>(), Ok(Language::English));
        assert_eq!("ja".parse::<Language>(), Ok(Language::Japanese));
        assert!("th".parse::<Language>().is_err());
    }
}
