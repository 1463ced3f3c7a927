use chrono::{Local, NaiveDateTime};

/// Layout of every timestamp written to the stores.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local wall-clock time in [`TIMESTAMP_FORMAT`].
pub fn now_timestamp() -> String {
    format_timestamp(&Local::now().naive_local())
}

/// Render a naive local time in [`TIMESTAMP_FORMAT`].
pub fn format_timestamp(dt: &NaiveDateTime) -> String {
    dt.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a stored timestamp back into a naive local time.
///
/// Returns `None` for empty strings or anything not in [`TIMESTAMP_FORMAT`].
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    if s.is_empty() {
        return None;
    }
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_format_timestamp() {
        let dt = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(9, 5, 3)
            .unwrap();
        assert_eq!(format_timestamp(&dt), "2024-01-15 09:05:03");
    }

    #[test]
    fn test_now_timestamp_parses_back() {
        let ts = now_timestamp();
        assert_eq!(ts.len(), 19);
        assert!(parse_timestamp(&ts).is_some());
    }

    #[test]
    fn test_parse_timestamp_rejects_other_layouts() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("2024-01-15T09:05:03Z").is_none());
        assert!(parse_timestamp("not a time").is_none());
    }
}
