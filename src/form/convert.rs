//! Per-kind conversion table for raw control values.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

use super::FieldKind;

/// How the raw state of a control becomes a [`super::FormValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    Date,
    Number,
    Checked,
    SelectedOptions,
    Raw,
    Skip,
}

impl FieldKind {
    pub fn conversion(self) -> Conversion {
        match self {
            Self::Date
            | Self::DateTime
            | Self::DateTimeLocal
            | Self::Month
            | Self::Time
            | Self::Week => Conversion::Date,
            Self::Number | Self::Range => Conversion::Number,
            Self::Checkbox => Conversion::Checked,
            Self::SelectMultiple => Conversion::SelectedOptions,
            Self::Image => Conversion::Skip,
            Self::Text
            | Self::Password
            | Self::Email
            | Self::Search
            | Self::Tel
            | Self::Url
            | Self::Hidden
            | Self::TextArea
            | Self::Select
            | Self::Radio
            | Self::Submit
            | Self::Button
            | Self::Output => Conversion::Raw,
        }
    }
}

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];
const TIME_FORMATS: [&str; 3] = ["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"];

/// Parse the raw value of a date or time control.
///
/// Returns `None` for values that do not name a valid instant, and for
/// kinds that are not date-like.
pub fn parse_date_value(kind: FieldKind, raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    match kind {
        FieldKind::Date => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0)),
        FieldKind::DateTimeLocal => parse_local_datetime(raw),
        FieldKind::DateTime => DateTime::parse_from_rfc3339(raw)
            .map(|date| date.naive_utc())
            .ok()
            .or_else(|| parse_local_datetime(raw)),
        FieldKind::Month => {
            if raw.len() != 7 {
                return None;
            }
            NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        }
        FieldKind::Time => {
            let time = TIME_FORMATS
                .iter()
                .find_map(|format| NaiveTime::parse_from_str(raw, format).ok())?;
            Some(NaiveDate::from_ymd_opt(1970, 1, 1)?.and_time(time))
        }
        FieldKind::Week => {
            let (year, week) = raw.split_once("-W")?;
            let year: i32 = year.parse().ok()?;
            let week: u32 = week.parse().ok()?;
            NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)?.and_hms_opt(0, 0, 0)
        }
        _ => None,
    }
}

fn parse_local_datetime(raw: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}

/// Parse a numeric control. Empty or malformed input gives NaN.
pub fn parse_number_value(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(number) if number.is_finite() => number,
        _ => f64::NAN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(y, m, d)?.and_hms_opt(h, min, s)
    }

    #[test]
    fn test_date_kinds() {
        assert_eq!(parse_date_value(FieldKind::Date, "2024-02-29"), at(2024, 2, 29, 0, 0, 0));
        assert_eq!(parse_date_value(FieldKind::Date, "2023-02-29"), None);
        assert_eq!(
            parse_date_value(FieldKind::DateTimeLocal, "2024-03-01T09:15"),
            at(2024, 3, 1, 9, 15, 0)
        );
        assert_eq!(
            parse_date_value(FieldKind::DateTimeLocal, "2024-03-01T09:15:30"),
            at(2024, 3, 1, 9, 15, 30)
        );
        assert_eq!(parse_date_value(FieldKind::Month, "2024-07"), at(2024, 7, 1, 0, 0, 0));
        assert_eq!(parse_date_value(FieldKind::Month, "2024-13"), None);
        assert_eq!(parse_date_value(FieldKind::Time, "23:59"), at(1970, 1, 1, 23, 59, 0));
        assert_eq!(parse_date_value(FieldKind::Time, "24:00"), None);
    }

    #[test]
    fn test_week_is_monday_of_iso_week() {
        assert_eq!(parse_date_value(FieldKind::Week, "2024-W01"), at(2024, 1, 1, 0, 0, 0));
        assert_eq!(parse_date_value(FieldKind::Week, "2021-W01"), at(2021, 1, 4, 0, 0, 0));
        assert_eq!(parse_date_value(FieldKind::Week, "2021-W54"), None);
        assert_eq!(parse_date_value(FieldKind::Week, "2021-01"), None);
    }

    #[test]
    fn test_legacy_datetime_accepts_offsets() {
        assert_eq!(
            parse_date_value(FieldKind::DateTime, "2024-03-01T09:15:00+02:00"),
            at(2024, 3, 1, 7, 15, 0)
        );
        assert_eq!(
            parse_date_value(FieldKind::DateTime, "2024-03-01T09:15"),
            at(2024, 3, 1, 9, 15, 0)
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(parse_number_value("3.5"), 3.5);
        assert_eq!(parse_number_value(" -2 "), -2.0);
        assert_eq!(parse_number_value("1e3"), 1000.0);
        assert!(parse_number_value("").is_nan());
        assert!(parse_number_value("inf").is_nan());
        assert!(parse_number_value("ten").is_nan());
    }

    #[test]
    fn test_table() {
        assert_eq!(FieldKind::Week.conversion(), Conversion::Date);
        assert_eq!(FieldKind::Range.conversion(), Conversion::Number);
        assert_eq!(FieldKind::Image.conversion(), Conversion::Skip);
        assert_eq!(FieldKind::Password.conversion(), Conversion::Raw);
    }
}
