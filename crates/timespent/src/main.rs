mod legend;

use std::env;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, Local};
use eframe::egui::{self, Color32};
use timespent_core::{
    default_snapshot_path, tr, write_report, ExportFormat, KeywordRegistry, KeywordSender,
    Language, Report, SnapshotFile, TickOutcome, Tracker, DEFAULT_POLL_INTERVAL,
};

use crate::legend::{draw_rows, draw_section_header};

const INFO_MESSAGE_TTL: Duration = Duration::from_secs(4);
const SEARCH_INPUT_ID: &str = "timespent-custom-search";

struct OverlayApp {
    tracker: Tracker,
    keywords: KeywordSender,
    source: SnapshotFile,
    poll_interval: Duration,
    language: Language,
    export_dir: PathBuf,
    last_poll: Option<Instant>,
    last_checked: Option<DateTime<Local>>,
    report: Option<Report>,
    search: String,
    info: Option<String>,
    info_expires_at: Option<Instant>,
    error: Option<String>,
}

impl OverlayApp {
    fn new(args: ViewerArgs) -> Self {
        let mut registry = KeywordRegistry::with_seeds();
        for keyword in &args.keywords {
            registry.register(keyword);
        }
        let (tracker, keywords) = Tracker::new(registry);
        Self {
            tracker,
            keywords,
            source: SnapshotFile::new(args.snapshot_path),
            poll_interval: args.poll_interval,
            language: args.language,
            export_dir: args.export_dir,
            last_poll: None,
            last_checked: None,
            report: None,
            search: String::new(),
            info: None,
            info_expires_at: None,
            error: None,
        }
    }

    fn t(&self, key: &'static str) -> &'static str {
        tr(self.language, key)
    }

    fn set_info_message(&mut self, message: impl Into<String>) {
        self.error = None;
        self.info = Some(message.into());
        self.info_expires_at = Some(Instant::now() + INFO_MESSAGE_TTL);
    }

    fn clear_info_message(&mut self) {
        self.info = None;
        self.info_expires_at = None;
    }

    fn poll_due(&self) -> bool {
        self.last_poll
            .map(|at| at.elapsed() >= self.poll_interval)
            .unwrap_or(true)
    }

    fn poll(&mut self) {
        self.last_poll = Some(Instant::now());
        match self.tracker.tick(&mut self.source) {
            Ok(TickOutcome::Waiting) => {
                self.error = None;
            }
            Ok(TickOutcome::Report(report)) => {
                self.error = None;
                self.last_checked = Some(Local::now());
                self.report = Some(report);
            }
            Err(err) => {
                let message = format!("{err:#}");
                if self.error.as_deref() != Some(message.as_str()) {
                    log::warn!("poll error: {message}");
                }
                self.error = Some(message);
            }
        }
    }

    fn submit_search(&mut self) {
        if !self.keywords.submit(&self.search) {
            log::error!("keyword channel closed");
        }
        self.search.clear();
    }

    fn export(&mut self, format: ExportFormat) {
        let Some(report) = self.report.as_ref() else {
            return;
        };
        match export_report(&self.export_dir, report, format) {
            Ok(path) => {
                log::info!("export saved: {}", path.display());
                self.set_info_message(format!("{} saved: {}", format.extension(), path.display()));
            }
            Err(err) => {
                self.clear_info_message();
                self.error = Some(format!("export failed: {err:#}"));
            }
        }
    }
}

impl eframe::App for OverlayApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(expires_at) = self.info_expires_at {
            if Instant::now() >= expires_at {
                self.clear_info_message();
            } else if let Some(remaining) = expires_at.checked_duration_since(Instant::now()) {
                ctx.request_repaint_after(remaining);
            }
        }

        if self.poll_due() {
            self.poll();
        }
        ctx.request_repaint_after(self.poll_interval);

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                if !self.tracker.is_anchored() {
                    ui.label(self.t("waiting"));
                }

                if let Some(report) = self.report.as_ref() {
                    draw_section_header(ui, self.t("title"));
                    draw_rows(ui, &report.color_rows);
                }

                ui.add_space(8.0);
                let placeholder = self.t("search_placeholder");
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.search)
                        .id_salt(SEARCH_INPUT_ID)
                        .hint_text(placeholder),
                );
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    self.submit_search();
                    response.request_focus();
                }

                if let Some(report) = self.report.as_ref() {
                    draw_section_header(ui, self.t("custom_title"));
                    draw_rows(ui, &report.keyword_rows);
                }

                ui.separator();
                ui.horizontal(|ui| {
                    ui.label(self.t("export"));
                    let enabled = self.report.is_some();
                    if ui.add_enabled(enabled, egui::Button::new("CSV")).clicked() {
                        self.export(ExportFormat::Csv);
                    }
                    if ui.add_enabled(enabled, egui::Button::new("JSON")).clicked() {
                        self.export(ExportFormat::Json);
                    }
                });

                if let Some(checked) = self.last_checked {
                    ui.small(format!("{}: {}", self.t("checked"), checked.format("%H:%M:%S")));
                }
                if let Some(info) = self.info.as_deref() {
                    ui.small(info);
                }
                if let Some(error) = self.error.as_deref() {
                    ui.colored_label(Color32::from_rgb(178, 24, 43), error);
                }
            });
        });
    }
}

fn export_report(export_dir: &Path, report: &Report, format: ExportFormat) -> Result<PathBuf> {
    fs::create_dir_all(export_dir)
        .with_context(|| format!("failed to create export directory: {}", export_dir.display()))?;

    let filename = format!(
        "timespent_{}.{}",
        Local::now().format("%Y%m%d_%H%M%S"),
        format.extension()
    );
    let path = export_dir.join(filename);
    let file = File::create(&path)
        .with_context(|| format!("failed to create export file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_report(report, format, &mut writer)?;
    writer
        .flush()
        .with_context(|| format!("failed to write export file: {}", path.display()))?;
    Ok(path)
}

struct ViewerArgs {
    snapshot_path: PathBuf,
    poll_interval: Duration,
    language: Language,
    keywords: Vec<String>,
    export_dir: PathBuf,
}

fn parse_args() -> Result<ViewerArgs> {
    parse_args_from(env::args().skip(1))
}

fn parse_args_from(args: impl IntoIterator<Item = String>) -> Result<ViewerArgs> {
    let mut snapshot_path = default_snapshot_path();
    let mut poll_ms = DEFAULT_POLL_INTERVAL.as_millis() as u64;
    let mut language = None;
    let mut keywords = Vec::new();
    let mut export_dir = PathBuf::from("exports");

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--snapshot" => {
                let value = args.next().context("missing value for --snapshot")?;
                snapshot_path = PathBuf::from(value);
            }
            "--poll-ms" => {
                let value = args.next().context("missing value for --poll-ms")?;
                poll_ms = value
                    .parse::<u64>()
                    .with_context(|| format!("invalid --poll-ms value: {value}"))?;
            }
            "--lang" => {
                let value = args.next().context("missing value for --lang")?;
                language = Some(Language::resolve(&value));
            }
            "--keyword" => {
                let value = args.next().context("missing value for --keyword")?;
                if value.trim().is_empty() {
                    bail!("--keyword must not be empty");
                }
                keywords.push(value);
            }
            "--export-dir" => {
                let value = args.next().context("missing value for --export-dir")?;
                export_dir = PathBuf::from(value);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            _ => return Err(anyhow!("unknown argument: {arg}")),
        }
    }

    if poll_ms == 0 {
        bail!("--poll-ms must be greater than zero");
    }

    Ok(ViewerArgs {
        snapshot_path,
        poll_interval: Duration::from_millis(poll_ms),
        language: language.unwrap_or_else(Language::detect),
        keywords,
        export_dir,
    })
}

fn print_help() {
    println!(
        "\
TimeSpent

Usage:
  timespent [--snapshot <path>] [--poll-ms <ms>] [--lang <tag>] [--keyword <text>]...
            [--export-dir <path>]

Options:
  --snapshot     Page snapshot JSON (default: %LOCALAPPDATA%\\TimeSpent\\page.json)
  --poll-ms      Polling interval in milliseconds (default: 500)
  --lang         Language tag for titles (default: $LANG)
  --keyword      Extra keyword to total, repeatable
  --export-dir   Directory for CSV/JSON exports (default: exports)
  -h, --help     Print this help"
    );
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args()?;
    log::info!(
        "TimeSpent started | snapshot={} | poll={}ms | lang={}",
        args.snapshot_path.display(),
        args.poll_interval.as_millis(),
        args.language.code()
    );

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([320.0, 640.0])
        .with_min_inner_size([240.0, 320.0]);
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "TimeSpent",
        native_options,
        Box::new(move |cc| {
            cc.egui_ctx.set_theme(egui::ThemePreference::Light);
            Ok(Box::new(OverlayApp::new(args)))
        }),
    )
    .map_err(|err| anyhow!("failed to start TimeSpent: {err}"))
}
