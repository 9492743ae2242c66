/// 24px is 30 minutes on normal screens.
pub const MINUTE_HEIGHT_NORMAL: f64 = 30.0 / 24.0;
/// 20px is 30 minutes on small screens.
pub const MINUTE_HEIGHT_SMALL: f64 = 30.0 / 20.0;
/// There is 2px of gap at the bottom of each event.
pub const EVENT_BORDER_SIZE: f64 = 2.0;
pub const SMALL_SCREEN_MAX_HEIGHT: f64 = 700.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenMode {
    Normal,
    Small,
}

impl ScreenMode {
    pub fn from_viewport_height(viewport_height: f64) -> Self {
        if viewport_height < SMALL_SCREEN_MAX_HEIGHT {
            Self::Small
        } else {
            Self::Normal
        }
    }

    pub fn minute_height(self) -> f64 {
        match self {
            Self::Normal => MINUTE_HEIGHT_NORMAL,
            Self::Small => MINUTE_HEIGHT_SMALL,
        }
    }
}

/// Calendar minutes covered by an event block of `pixel_height` pixels.
///
/// A zero-height block still yields the border gap worth of minutes.
pub fn duration_minutes(pixel_height: f64, mode: ScreenMode) -> f64 {
    (pixel_height.max(0.0) + EVENT_BORDER_SIZE) * mode.minute_height()
}

/// Reads an inline style height such as `"40px"`.
///
/// Only the leading integer counts (`"12.7px"` is 12). Absent, unparseable
/// or negative heights are 0.
pub fn parse_pixel_height(height: Option<&str>) -> f64 {
    height
        .map(|text| text.replace("px", ""))
        .and_then(|text| leading_int(&text))
        .map(|px| px.max(0) as f64)
        .unwrap_or(0.0)
}

/// Integer prefix of `text` after leading whitespace, with an optional sign.
pub(crate) fn leading_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value = digits[..end].parse::<i64>().ok()?;
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_height_keeps_border_gap() {
        assert_eq!(duration_minutes(0.0, ScreenMode::Normal), 2.0 * 30.0 / 24.0);
        assert_eq!(duration_minutes(0.0, ScreenMode::Small), 3.0);
    }

    #[test]
    fn thirty_minute_block_on_normal_screen() {
        // 24px per half hour, minus the 2px gap
        assert_eq!(duration_minutes(22.0, ScreenMode::Normal), 30.0);
        assert_eq!(duration_minutes(18.0, ScreenMode::Small), 30.0);
    }

    #[test]
    fn small_mode_below_700px() {
        assert_eq!(ScreenMode::from_viewport_height(699.0), ScreenMode::Small);
        assert_eq!(ScreenMode::from_viewport_height(700.0), ScreenMode::Normal);
        assert_eq!(ScreenMode::from_viewport_height(0.0), ScreenMode::Small);
    }

    #[test]
    fn pixel_height_parsing() {
        assert_eq!(parse_pixel_height(Some("40px")), 40.0);
        assert_eq!(parse_pixel_height(Some("12.7px")), 12.0);
        assert_eq!(parse_pixel_height(Some(" 8px")), 8.0);
        assert_eq!(parse_pixel_height(Some("")), 0.0);
        assert_eq!(parse_pixel_height(Some("auto")), 0.0);
        assert_eq!(parse_pixel_height(Some("-4px")), 0.0);
        assert_eq!(parse_pixel_height(None), 0.0);
    }

    #[test]
    fn leading_int_stops_at_first_non_digit() {
        assert_eq!(leading_int(" 30"), Some(30));
        assert_eq!(leading_int("-7abc"), Some(-7));
        assert_eq!(leading_int("+"), None);
        assert_eq!(leading_int("x1"), None);
    }
}
