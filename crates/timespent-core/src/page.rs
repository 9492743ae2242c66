use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::color::ColorKey;
use crate::geometry::{duration_minutes, parse_pixel_height, ScreenMode};

/// One `[data-eventchip]` element of the calendar page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventChip {
    /// Inline style height, e.g. `"40px"`.
    pub height: Option<String>,
    /// Inline background color; unset for events not accepted yet.
    pub background_color: Option<String>,
    pub text: String,
}

impl EventChip {
    pub fn color_key(&self) -> ColorKey {
        ColorKey::from_background(self.background_color.as_deref())
    }

    pub fn minutes(&self, mode: ScreenMode) -> f64 {
        duration_minutes(parse_pixel_height(self.height.as_deref()), mode)
    }
}

/// What the page looks like at one poll.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSnapshot {
    pub viewport_height: f64,
    /// Whether the element the legend is anchored to has rendered yet.
    pub anchor_present: bool,
    pub chips: Vec<EventChip>,
}

impl PageSnapshot {
    pub fn screen_mode(&self) -> ScreenMode {
        ScreenMode::from_viewport_height(self.viewport_height)
    }
}

pub trait PageSource {
    fn snapshot(&mut self) -> Result<PageSnapshot>;
}

/// `%LOCALAPPDATA%/TimeSpent/page.json`, or `data/page.json` without it.
pub fn default_snapshot_path() -> PathBuf {
    if let Some(local) = env::var_os("LOCALAPPDATA") {
        return PathBuf::from(local).join("TimeSpent").join("page.json");
    }
    PathBuf::from("data").join("page.json")
}

/// Page snapshot exported as JSON by the browser side, re-read on every poll.
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PageSource for SnapshotFile {
    fn snapshot(&mut self) -> Result<PageSnapshot> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read page snapshot: {}", self.path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("invalid page snapshot: {}", self.path.display()))
    }
}

/// Plays back a fixed list of snapshots, then keeps returning the last one.
pub struct ReplaySource {
    snapshots: Vec<PageSnapshot>,
    next: usize,
}

impl ReplaySource {
    pub fn new(snapshots: Vec<PageSnapshot>) -> Self {
        Self { snapshots, next: 0 }
    }
}

impl PageSource for ReplaySource {
    fn snapshot(&mut self) -> Result<PageSnapshot> {
        let last = self
            .snapshots
            .len()
            .checked_sub(1)
            .context("replay source has no snapshots")?;
        let index = self.next.min(last);
        self.next = self.next.saturating_add(1);
        Ok(self.snapshots[index].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_snapshot_file_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "viewport_height": 650,
                "anchor_present": true,
                "chips": [
                    {{ "height": "22px", "background_color": "rgb(3, 155, 229)", "text": "Standup" }},
                    {{ "text": "Pending invite" }}
                ]
            }}"#
        )
        .unwrap();

        let snapshot = SnapshotFile::new(file.path()).snapshot().unwrap();
        assert_eq!(snapshot.screen_mode(), ScreenMode::Small);
        assert_eq!(snapshot.chips.len(), 2);
        assert_eq!(snapshot.chips[0].minutes(ScreenMode::Normal), 30.0);
        assert!(snapshot.chips[1].color_key().is_not_accepted_yet());
        assert_eq!(snapshot.chips[1].height, None);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = SnapshotFile::new(dir.path().join("absent.json"));
        let err = source.snapshot().unwrap_err();
        assert!(format!("{err:#}").contains("failed to read page snapshot"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = SnapshotFile::new(file.path()).snapshot().unwrap_err();
        assert!(format!("{err:#}").contains("invalid page snapshot"));
    }

    #[test]
    fn default_path_names_page_json() {
        let path = default_snapshot_path();
        assert_eq!(path.file_name().unwrap(), "page.json");
        assert!(path.parent().is_some());
    }

    #[test]
    fn replay_repeats_last_snapshot() {
        let first = PageSnapshot::default();
        let second = PageSnapshot {
            anchor_present: true,
            ..PageSnapshot::default()
        };
        let mut source = ReplaySource::new(vec![first.clone(), second.clone()]);
        assert_eq!(source.snapshot().unwrap(), first);
        assert_eq!(source.snapshot().unwrap(), second);
        assert_eq!(source.snapshot().unwrap(), second);
        assert!(ReplaySource::new(Vec::new()).snapshot().is_err());
    }
}
