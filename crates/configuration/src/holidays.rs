use crate::error::ConfigError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The calendar shipped with the binary, used when the config file has no `[[holidays]]`.
const DEFAULT_HOLIDAYS: &str = include_str!("holidays.toml");

/// A single dated event drawn on top of the order trend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub date: NaiveDate,
    pub label: String,
}

#[derive(Debug, Deserialize)]
struct HolidayTable {
    holidays: Vec<Holiday>,
}

/// A static date → label lookup table, kept sorted by date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayCalendar {
    entries: Vec<Holiday>,
}

impl HolidayCalendar {
    /// Builds a calendar from arbitrary entries, rejecting duplicate dates.
    pub fn from_entries(mut entries: Vec<Holiday>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        for holiday in &entries {
            if !seen.insert(holiday.date) {
                return Err(ConfigError::ValidationError(format!(
                    "holiday date {} is listed more than once",
                    holiday.date
                )));
            }
        }
        entries.sort_by_key(|h| h.date);
        Ok(Self { entries })
    }

    /// Parses a calendar from a toml document containing a `[[holidays]]` array.
    pub fn from_toml(document: &str) -> Result<Self, ConfigError> {
        let table: HolidayTable = config::Config::builder()
            .add_source(config::File::from_str(document, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        Self::from_entries(table.holidays)
    }

    /// The embedded default calendar.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_toml(DEFAULT_HOLIDAYS)
    }

    pub fn entries(&self) -> &[Holiday] {
        &self.entries
    }

    /// All holidays falling in `year`, in date order.
    pub fn for_year(&self, year: i32) -> Vec<Holiday> {
        self.entries
            .iter()
            .filter(|h| h.date.year() == year)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn builtin_calendar_has_the_nine_events() {
        let calendar = HolidayCalendar::builtin().unwrap();
        assert_eq!(calendar.entries().len(), 9);
        let black_friday = calendar.entries().iter().find(|h| h.date == date(2017, 11, 24));
        assert_eq!(black_friday.map(|h| h.label.as_str()), Some("Black Friday"));
    }

    #[test]
    fn for_year_only_returns_that_year() {
        let calendar = HolidayCalendar::builtin().unwrap();
        let y2018 = calendar.for_year(2018);
        assert_eq!(y2018.len(), 4);
        assert!(y2018.iter().all(|h| h.date.year() == 2018));
        assert!(y2018.windows(2).all(|w| w[0].date < w[1].date));
        assert!(calendar.for_year(2016).is_empty());
    }

    #[test]
    fn entries_are_sorted_regardless_of_input_order() {
        let calendar = HolidayCalendar::from_entries(vec![
            Holiday { date: date(2018, 12, 25), label: "Christmas".into() },
            Holiday { date: date(2018, 1, 1), label: "New Year".into() },
        ])
        .unwrap();
        assert_eq!(calendar.entries()[0].label, "New Year");
    }

    #[test]
    fn duplicate_dates_are_rejected() {
        let err = HolidayCalendar::from_entries(vec![
            Holiday { date: date(2018, 1, 1), label: "New Year".into() },
            Holiday { date: date(2018, 1, 1), label: "Again".into() },
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn parses_a_custom_table() {
        let calendar = HolidayCalendar::from_toml(
            r#"
[[holidays]]
date = "2019-03-04"
label = "Carnival"
"#,
        )
        .unwrap();
        assert_eq!(calendar.for_year(2019)[0].label, "Carnival");
    }
}
