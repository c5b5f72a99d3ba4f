use chrono::{DateTime, Local, SecondsFormat, Utc};

pub const SECONDS_PER_DAY: i64 = 86_400;

pub fn now_utc() -> i64 {
    Utc::now().timestamp()
}

fn utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(ts, 0)
}

/// `2024-03-01T09:30:00Z`. Timestamps chrono cannot represent fall back to
/// the raw number.
pub fn format_rfc3339(ts: i64) -> String {
    match utc(ts) {
        Some(dt) => dt.to_rfc3339_opts(SecondsFormat::Secs, true),
        None => ts.to_string(),
    }
}

/// Calendar month of `ts` in UTC, as `YYYY-MM`.
pub fn month_key(ts: i64) -> Option<String> {
    utc(ts).map(|dt| dt.format("%Y-%m").to_string())
}

pub fn format_timestamp_datetime(ts: i64) -> String {
    match utc(ts) {
        Some(dt) => dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        None => ts.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{format_rfc3339, month_key};

    #[test]
    fn rfc3339_is_utc_with_seconds() {
        assert_eq!(format_rfc3339(1_709_285_400), "2024-03-01T09:30:00Z");
    }

    #[test]
    fn month_key_uses_utc_calendar() {
        assert_eq!(month_key(1_709_285_400).as_deref(), Some("2024-03"));
        // 2024-02-29T23:59:59Z
        assert_eq!(month_key(1_709_251_199).as_deref(), Some("2024-02"));
    }
}
