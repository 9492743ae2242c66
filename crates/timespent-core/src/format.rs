/// Renders minutes as `"{h}h {m}m"`, leaving out either part when empty.
///
/// The separating space is always present, so `60` renders as `"1h "`, `45`
/// as `" 45m"` and `0` as `" "`. Fractional minutes keep their fraction.
pub fn format_duration(total_minutes: f64) -> String {
    let hours = if total_minutes >= 60.0 {
        format!("{}h", (total_minutes / 60.0).trunc())
    } else {
        String::new()
    };
    let remainder = total_minutes % 60.0;
    let minutes = if remainder != 0.0 {
        format!("{remainder}m")
    } else {
        String::new()
    };
    format!("{hours} {minutes}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hours_and_minutes() {
        assert_eq!(format_duration(65.0), "1h 5m");
        assert_eq!(format_duration(125.0), "2h 5m");
    }

    #[test]
    fn whole_hours_keep_trailing_space() {
        assert_eq!(format_duration(60.0), "1h ");
        assert_eq!(format_duration(180.0), "3h ");
    }

    #[test]
    fn minutes_only_keep_leading_space() {
        assert_eq!(format_duration(45.0), " 45m");
    }

    #[test]
    fn zero_is_a_single_space() {
        assert_eq!(format_duration(0.0), " ");
    }

    #[test]
    fn fractional_minutes() {
        assert_eq!(format_duration(52.5), " 52.5m");
        assert_eq!(format_duration(97.5), "1h 37.5m");
    }
}
