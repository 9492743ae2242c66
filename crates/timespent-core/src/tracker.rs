use anyhow::Result;
use std::time::Duration;

use crate::aggregate::{compute_color_rows, compute_keyword_rows, Row};
use crate::geometry::ScreenMode;
use crate::keywords::{keyword_channel, KeywordInbox, KeywordRegistry, KeywordSender};
use crate::page::PageSource;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Both legend tables computed from one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub screen_mode: ScreenMode,
    pub color_rows: Vec<Row>,
    pub keyword_rows: Vec<Row>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// The legend anchor has not rendered yet.
    Waiting,
    Report(Report),
}

/// Drives aggregation passes over a page source.
///
/// Keywords arrive through the [`KeywordSender`] returned by [`Tracker::new`]
/// and are applied at the start of the next tick, so a pass always sees a
/// stable registry.
pub struct Tracker {
    registry: KeywordRegistry,
    inbox: KeywordInbox,
    anchored: bool,
}

impl Tracker {
    pub fn new(registry: KeywordRegistry) -> (Self, KeywordSender) {
        let (sender, inbox) = keyword_channel();
        let tracker = Self {
            registry,
            inbox,
            anchored: false,
        };
        (tracker, sender)
    }

    pub fn registry(&self) -> &KeywordRegistry {
        &self.registry
    }

    pub fn is_anchored(&self) -> bool {
        self.anchored
    }

    pub fn tick(&mut self, source: &mut dyn PageSource) -> Result<TickOutcome> {
        self.inbox.drain_into(&mut self.registry);

        let snapshot = source.snapshot()?;
        if !self.anchored {
            if !snapshot.anchor_present {
                log::debug!("calendar anchor not rendered yet");
                return Ok(TickOutcome::Waiting);
            }
            log::info!("calendar anchor found, starting aggregation");
            self.anchored = true;
        }

        let screen_mode = snapshot.screen_mode();
        let color_rows = compute_color_rows(&snapshot.chips, screen_mode);
        let keyword_rows = compute_keyword_rows(&snapshot.chips, screen_mode, &self.registry);
        log::debug!(
            "pass over {} chips ({:?}): {} colors, {} keywords",
            snapshot.chips.len(),
            screen_mode,
            color_rows.len(),
            keyword_rows.len()
        );

        Ok(TickOutcome::Report(Report {
            screen_mode,
            color_rows,
            keyword_rows,
        }))
    }
}
