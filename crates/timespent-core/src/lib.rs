//! Time-spent statistics for a calendar side panel.
//!
//! Event chips scraped from the page are grouped by background color (the
//! calendar category), past-event shades are folded back into their category,
//! and the per-group totals become legend rows. A second table totals events
//! by user-entered keywords.

pub mod aggregate;
pub mod color;
pub mod export;
pub mod format;
pub mod geometry;
pub mod i18n;
pub mod keywords;
pub mod merge;
pub mod page;
pub mod tracker;

pub use aggregate::{compute_color_rows, compute_keyword_rows, Row};
pub use color::{parse_color, ColorKey, Rgb, NOT_ACCEPTED_YET_COLOR};
pub use export::{write_report, ExportFormat};
pub use format::format_duration;
pub use geometry::{duration_minutes, ScreenMode};
pub use i18n::{tr, Language};
pub use keywords::{KeywordRegistry, KeywordSender};
pub use page::{
    default_snapshot_path, EventChip, PageSnapshot, PageSource, ReplaySource, SnapshotFile,
};
pub use tracker::{Report, TickOutcome, Tracker, DEFAULT_POLL_INTERVAL};
