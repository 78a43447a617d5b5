/// Format a second count as `HH:MM:SS`. Negative values clamp to zero.
pub fn format_hms(total_secs: i64) -> String {
    let secs = total_secs.max(0);
    format!(
        "{:02}:{:02}:{:02}",
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60
    )
}

/// Shorter `H:MM` form used for daily totals.
pub fn format_hm(total_secs: i64) -> String {
    let secs = total_secs.max(0);
    format!("{}:{:02}", secs / 3600, (secs % 3600) / 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_zero() {
        assert_eq!(format_hms(0), "00:00:00");
    }

    #[test]
    fn formats_hours_minutes_seconds() {
        assert_eq!(format_hms(3661), "01:01:01");
        assert_eq!(format_hms(42), "00:00:42");
    }

    #[test]
    fn hours_can_exceed_two_digits() {
        assert_eq!(format_hms(100 * 3600), "100:00:00");
    }

    #[test]
    fn negative_clamps_to_zero() {
        assert_eq!(format_hms(-5), "00:00:00");
        assert_eq!(format_hm(-5), "0:00");
    }

    #[test]
    fn formats_daily_total() {
        assert_eq!(format_hm(7 * 3600 + 30 * 60), "7:30");
    }
}
