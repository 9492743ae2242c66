use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use timespent_core::{default_snapshot_path, ExportFormat, Language, DEFAULT_POLL_INTERVAL};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Export(ExportFormat),
}

#[derive(Debug)]
pub struct Config {
    pub snapshot_path: PathBuf,
    pub poll_interval: Duration,
    pub language: Language,
    pub keywords: Vec<String>,
    pub once: bool,
    pub format: OutputFormat,
}

pub enum Command {
    Run(Config),
    Help,
}

impl Config {
    pub fn from_args() -> Result<Command> {
        Self::parse(env::args().skip(1))
    }

    pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Command> {
        let mut snapshot_path = default_snapshot_path();
        let mut poll_ms = DEFAULT_POLL_INTERVAL.as_millis() as u64;
        let mut language = None;
        let mut keywords = Vec::new();
        let mut once = false;
        let mut format = OutputFormat::Text;

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
                "--once" => once = true,
                "--format" => {
                    let value = args.next().context("missing value for --format")?;
                    format = match value.as_str() {
                        "text" => OutputFormat::Text,
                        other => OutputFormat::Export(ExportFormat::from_name(other)?),
                    };
                }
                "--help" | "-h" => return Ok(Command::Help),
                _ => bail!("unknown argument: {arg}"),
            }
        }

        if poll_ms == 0 {
            bail!("--poll-ms must be greater than zero");
        }

        Ok(Command::Run(Self {
            snapshot_path,
            poll_interval: Duration::from_millis(poll_ms),
            language: language.unwrap_or_else(Language::detect),
            keywords,
            once,
            format,
        }))
    }
}

pub fn print_help() {
    println!(
        "\
TimeSpent Backend

Usage:
  timespent-backend [--snapshot <path>] [--poll-ms <ms>] [--lang <tag>]
                    [--keyword <text>]... [--once] [--format text|csv|json]

Options:
  --snapshot   Page snapshot JSON written by the browser side
               (default: %LOCALAPPDATA%\\TimeSpent\\page.json)
  --poll-ms    Polling interval in milliseconds (default: 500)
  --lang       Language tag for table titles (default: $LANG)
  --keyword    Extra keyword to total, repeatable
  --once       Print one report as soon as the calendar is ready, then exit
  --format     Output format (default: text)
  -h, --help   Print this help

Keywords typed on stdin, one per line, are added while running."
    );
}
