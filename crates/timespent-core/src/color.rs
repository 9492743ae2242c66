use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::leading_int;

/// Background of events that have not been accepted yet (no inline color).
pub const NOT_ACCEPTED_YET_COLOR: &str = "rgb(255, 255, 255)";

/// Past events are drawn at this opacity over a white background.
pub const PAST_EVENT_OPACITY: f64 = 0.3;
/// White contribution of a past event channel, `255 * (1 - 0.3)`.
pub const PAST_EVENT_WHITE_OFFSET: f64 = 178.5;
/// Per-channel distance under which a color counts as the faded form of another.
pub const FADED_CHANNEL_TOLERANCE: f64 = 1.5;

/// Color text exactly as the page reports it; the grouping key of a pass.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorKey(String);

impl ColorKey {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn not_accepted_yet() -> Self {
        Self(NOT_ACCEPTED_YET_COLOR.to_owned())
    }

    /// Key of an event chip background; a missing or blank background is the
    /// not-accepted sentinel.
    pub fn from_background(background: Option<&str>) -> Self {
        match background.map(str::trim).filter(|value| !value.is_empty()) {
            Some(value) => Self(value.to_owned()),
            None => Self::not_accepted_yet(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_not_accepted_yet(&self) -> bool {
        self.0 == NOT_ACCEPTED_YET_COLOR
    }

    pub fn parse(&self) -> Option<Rgb> {
        parse_color(Some(&self.0))
    }
}

impl fmt::Display for ColorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// True when `self` is how the page draws `original` for a past event.
    pub fn is_faded_version_of(self, original: Rgb) -> bool {
        original
            .channels()
            .iter()
            .zip(self.channels())
            .all(|(&orig, faded)| within_tolerance(faded_channel(orig), f64::from(faded)))
    }
}

pub fn faded_channel(value: u8) -> f64 {
    f64::from(value) * PAST_EVENT_OPACITY + PAST_EVENT_WHITE_OFFSET
}

pub fn within_tolerance(expected: f64, observed: f64) -> bool {
    (expected - observed).abs() < FADED_CHANNEL_TOLERANCE
}

/// Parses `rgb(r, g, b)`. Absent or empty text stands for the not-accepted
/// sentinel. Anything else that is not three 0-255 integers yields `None`.
pub fn parse_color(text: Option<&str>) -> Option<Rgb> {
    let text = match text.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => value,
        None => NOT_ACCEPTED_YET_COLOR,
    };

    let inner = text.strip_prefix("rgb(")?.strip_suffix(')')?;
    let mut channels = inner.split(',').map(|part| {
        leading_int(part).and_then(|value| u8::try_from(value).ok())
    });
    let r = channels.next()??;
    let g = channels.next()??;
    let b = channels.next()??;
    if channels.next().is_some() {
        return None;
    }
    Some(Rgb::new(r, g, b))
}
