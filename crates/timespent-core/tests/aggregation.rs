use timespent_core::{
    compute_color_rows, EventChip, KeywordRegistry, PageSnapshot, ReplaySource, ScreenMode,
    TickOutcome, Tracker,
};

fn chip(color: Option<&str>, height_px: u32, text: &str) -> EventChip {
    EventChip {
        height: Some(format!("{height_px}px")),
        background_color: color.map(str::to_owned),
        text: text.to_owned(),
    }
}

/// 30px, 14px and 6px are 40, 20 and 10 minutes at 24px per half hour.
fn calendar_chips() -> Vec<EventChip> {
    vec![
        chip(Some("rgb(10, 20, 30)"), 30, "Design review"),
        chip(Some("rgb(182, 184, 187)"), 14, "Yesterday's design review"),
        chip(Some("rgb(255, 255, 255)"), 6, "Invite"),
    ]
}

#[test]
fn past_events_merge_into_their_category() {
    let rows = compute_color_rows(&calendar_chips(), ScreenMode::Normal);
    let summary: Vec<(&str, f64, &str)> = rows
        .iter()
        .map(|row| (row.color.as_str(), row.duration_minutes, row.label.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("rgb(10, 20, 30)", 60.0, "1h "),
            ("rgb(255, 255, 255)", 10.0, " 10m"),
        ]
    );
}

#[test]
fn shade_outside_tolerance_stays_separate() {
    // red channel 185 is 3.5 away from 10 * 0.3 + 178.5
    let mut chips = calendar_chips();
    chips[1].background_color = Some("rgb(185, 184, 187)".to_owned());
    let rows = compute_color_rows(&chips, ScreenMode::Normal);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].color.as_str(), "rgb(10, 20, 30)");
    assert_eq!(rows[0].duration_minutes, 40.0);
}

#[test]
fn unset_background_joins_white_events() {
    let mut chips = calendar_chips();
    chips.push(chip(None, 6, "Another invite"));
    let rows = compute_color_rows(&chips, ScreenMode::Normal);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].duration_minutes, 20.0);
}

#[test]
fn tracker_reports_both_tables() {
    let waiting = PageSnapshot {
        viewport_height: 650.0,
        anchor_present: false,
        chips: Vec::new(),
    };
    let ready = PageSnapshot {
        viewport_height: 900.0,
        anchor_present: true,
        chips: calendar_chips(),
    };
    let mut source = ReplaySource::new(vec![waiting, ready]);
    let (mut tracker, sender) = Tracker::new(KeywordRegistry::with_seeds());

    assert_eq!(tracker.tick(&mut source).unwrap(), TickOutcome::Waiting);

    sender.submit("design review");
    sender.submit("Invite");
    let TickOutcome::Report(report) = tracker.tick(&mut source).unwrap() else {
        panic!("tracker should be anchored");
    };
    assert_eq!(report.screen_mode, ScreenMode::Normal);
    assert_eq!(report.color_rows.len(), 2);

    // the seeded keyword matches nothing; "Invite" is 10 minutes, under the floor
    let labels: Vec<&str> = report.keyword_rows.iter().map(|row| row.label.as_str()).collect();
    assert_eq!(labels, vec!["design review -  20m"]);
}
