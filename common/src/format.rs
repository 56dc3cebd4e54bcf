use chrono::{DateTime, Local, Utc};

/// Renders an absolute timestamp in the machine's local timezone with a
/// day-first date and a 24h clock.
pub fn format_time(timestamp: DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%d.%m.%Y %H:%M:%S")
        .to_string()
}

/// Human-readable duration. This is intentionally lossy: once the value
/// reaches a full hour the seconds are dropped, and the result is not meant
/// to be parsed back.
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_uses_the_seconds_branch() {
        assert_eq!(format_duration(0), "0s");
    }

    #[test]
    fn seconds_branch_below_one_minute() {
        assert_eq!(format_duration(59), "59s");
    }

    #[test]
    fn minutes_branch_from_one_minute_up() {
        assert_eq!(format_duration(60), "1m 0s");
        assert_eq!(format_duration(125), "2m 5s");
        assert_eq!(format_duration(3599), "59m 59s");
    }

    #[test]
    fn hours_branch_drops_seconds() {
        assert_eq!(format_duration(3600), "1h 0m");
        assert_eq!(format_duration(3661), "1h 1m");
        assert_eq!(format_duration(7322), "2h 2m");
    }
}
