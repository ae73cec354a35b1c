use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// 接受 `HH:MM` 与 `HH:MM:SS`，秒数被丢弃
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
        .and_then(|t| t.with_second(0))
}

pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

pub fn timestamp_to_datetime(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        let date = parse_date("2025-03-14").unwrap();
        assert_eq!(format_date(date), "2025-03-14");
        assert!(parse_date("2025-02-30").is_none());
        assert!(parse_date("14/03/2025").is_none());
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(format_time(parse_time("08:30").unwrap()), "08:30");
        assert_eq!(format_time(parse_time("13:05:59").unwrap()), "13:05");
        assert!(parse_time("25:00").is_none());
    }

    #[test]
    fn test_timestamp_to_datetime() {
        assert_eq!(timestamp_to_datetime(0).timestamp(), 0);
        assert_eq!(timestamp_to_datetime(1_700_000_000).timestamp(), 1_700_000_000);
    }
}
