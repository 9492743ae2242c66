mod config;
mod render;

use anyhow::Result;
use std::io::{self, BufRead};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use timespent_core::{KeywordRegistry, KeywordSender, Report, SnapshotFile, TickOutcome, Tracker};

use crate::config::{print_help, Command, Config};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match Config::from_args()? {
        Command::Run(config) => config,
        Command::Help => {
            print_help();
            return Ok(());
        }
    };

    let mut registry = KeywordRegistry::with_seeds();
    for keyword in &config.keywords {
        registry.register(keyword);
    }
    let (mut tracker, sender) = Tracker::new(registry);
    let mut source = SnapshotFile::new(&config.snapshot_path);

    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_signal = Arc::clone(&shutdown);
    if let Err(err) = ctrlc::set_handler(move || {
        shutdown_signal.store(true, Ordering::SeqCst);
    }) {
        log::warn!("ctrlc handler registration warning: {err}");
    }

    if !config.once {
        spawn_keyword_reader(sender);
    }

    log::info!(
        "TimeSpent Backend started | snapshot={} | poll={}ms | lang={}",
        config.snapshot_path.display(),
        config.poll_interval.as_millis(),
        config.language.code()
    );

    let mut last_report: Option<Report> = None;
    let mut errors = PollErrors::default();
    while !shutdown.load(Ordering::Relaxed) {
        match tracker.tick(&mut source) {
            Ok(TickOutcome::Waiting) => errors.clear(),
            Ok(TickOutcome::Report(report)) => {
                errors.clear();
                if last_report.as_ref() != Some(&report) {
                    render::render(&report, config.format, config.language, io::stdout().lock())?;
                    last_report = Some(report);
                }
                if config.once {
                    break;
                }
            }
            Err(err) => {
                if let Some(message) = errors.record(&err) {
                    log::warn!("poll error: {message}");
                }
            }
        }
        thread::sleep(config.poll_interval);
    }

    log::info!("TimeSpent Backend stopped");
    Ok(())
}

/// Logs a run of identical poll failures once; any successful tick ends the run.
#[derive(Default)]
struct PollErrors {
    last: Option<String>,
}

impl PollErrors {
    fn clear(&mut self) {
        self.last = None;
    }

    /// The message to log, or `None` when it repeats the previous failure.
    fn record(&mut self, err: &anyhow::Error) -> Option<String> {
        let message = format!("{err:#}");
        if self.last.as_deref() == Some(message.as_str()) {
            return None;
        }
        self.last = Some(message.clone());
        Some(message)
    }
}

/// Each stdin line is a confirmed keyword search.
fn spawn_keyword_reader(sender: KeywordSender) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if !sender.submit(&line) {
                break;
            }
        }
        log::debug!("keyword input closed");
    });
}
