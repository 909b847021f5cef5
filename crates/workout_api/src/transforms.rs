use chrono::NaiveDateTime;

/// Output format for workout dates. Fractional seconds are printed only when
/// present.
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Parse a workout date, keeping the time when one is given.
///
/// Accepts:
/// - YYYY-MM-DD -> midnight of that day
/// - RFC3339 datetime -> the same instant in UTC
/// - Naive datetime YYYY-MM-DDTHH:MM:SS[.fff]
pub fn parse_workout_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(d) = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0);
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    if let Ok(ndt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(ndt);
    }
    None
}

pub fn format_workout_date(date: NaiveDateTime) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_date_only() {
        let d = parse_workout_date("2024-01-01").unwrap();
        assert_eq!(format_workout_date(d), "2024-01-01T00:00:00");
    }

    #[test]
    fn parse_preserves_datetime() {
        let d = parse_workout_date("2023-01-26T17:33:50").unwrap();
        assert_eq!(format_workout_date(d), "2023-01-26T17:33:50");
    }

    #[test]
    fn rfc3339_fraction_survives_formatting() {
        let d = parse_workout_date("2023-01-26T17:33:50.275Z").unwrap();
        assert_eq!(format_workout_date(d), "2023-01-26T17:33:50.275");
    }

    #[test]
    fn naive_fraction_survives_formatting() {
        let d = parse_workout_date("2024-01-01T10:00:00.750").unwrap();
        assert_eq!(format_workout_date(d), "2024-01-01T10:00:00.750");
        assert_eq!(parse_workout_date(&format_workout_date(d)), Some(d));
    }

    #[test]
    fn offsets_are_normalized_to_utc() {
        let d = parse_workout_date("2020-01-01T00:30:00+05:00").unwrap();
        assert_eq!(format_workout_date(d), "2019-12-31T19:30:00");
    }

    #[test]
    fn parse_rejects_invalid() {
        assert!(parse_workout_date("not-a-date").is_none());
        assert!(parse_workout_date("2024-13-01").is_none());
    }
}
