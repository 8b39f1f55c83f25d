use chrono::{DateTime, Utc};

/// Time since a job was added, as shown in the card corner: "today", "3d",
/// "5w", "4mo", "1y". Weeks start at 7 days, months at 8 weeks.
pub fn format_age(since: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = (now - since).num_days().max(0);
    match days {
        0 => "today".to_string(),
        1..=6 => format!("{days}d"),
        7..=55 => format!("{}w", days / 7),
        56..=364 => format!("{}mo", days / 30),
        _ => format!("{}y", days / 365),
    }
}

/// Format a timestamp with a chrono format string, falling back to ISO date
/// when the configured format is invalid.
pub fn format_date(ts: DateTime<Utc>, fmt: &str) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    if write!(out, "{}", ts.format(fmt)).is_err() {
        return ts.format("%Y-%m-%d").to_string();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    fn days_ago(days: i64) -> DateTime<Utc> {
        now() - chrono::Duration::days(days)
    }

    #[test]
    fn added_earlier_today() {
        let earlier = Utc.with_ymd_and_hms(2025, 6, 15, 1, 0, 0).unwrap();
        assert_eq!(format_age(earlier, now()), "today");
    }

    #[test]
    fn first_week_counts_days() {
        assert_eq!(format_age(days_ago(1), now()), "1d");
        assert_eq!(format_age(days_ago(6), now()), "6d");
        assert_eq!(format_age(days_ago(7), now()), "1w");
    }

    #[test]
    fn weeks_turn_into_months_at_eight_weeks() {
        assert_eq!(format_age(days_ago(55), now()), "7w");
        assert_eq!(format_age(days_ago(56), now()), "1mo");
        assert_eq!(format_age(days_ago(364), now()), "12mo");
        assert_eq!(format_age(days_ago(365), now()), "1y");
    }

    #[test]
    fn clock_skew_reads_as_today() {
        let future = Utc.with_ymd_and_hms(2025, 7, 1, 12, 0, 0).unwrap();
        assert_eq!(format_age(future, now()), "today");
    }

    #[test]
    fn format_date_uses_pattern() {
        let ts = Utc.with_ymd_and_hms(2025, 6, 15, 12, 30, 0).unwrap();
        assert_eq!(format_date(ts, "%Y-%m-%d"), "2025-06-15");
        assert_eq!(format_date(ts, "%d/%m %H:%M"), "15/06 12:30");
    }

    #[test]
    fn format_date_invalid_pattern_falls_back() {
        let ts = Utc.with_ymd_and_hms(2025, 6, 15, 12, 30, 0).unwrap();
        assert_eq!(format_date(ts, "%Q"), "2025-06-15");
    }
}
