use anyhow::{Context, Result};
use std::io::Write;
use timespent_core::{tr, write_report, Language, Report, Row};

use crate::config::OutputFormat;

pub fn render<W: Write>(report: &Report, format: OutputFormat, language: Language, mut out: W) -> Result<()> {
    match format {
        OutputFormat::Export(export) => {
            write_report(report, export, &mut out)?;
            writeln!(out).context("failed to write report")?;
        }
        OutputFormat::Text => {
            write_table(&mut out, tr(language, "title"), &report.color_rows)?;
            write_table(&mut out, tr(language, "custom_title"), &report.keyword_rows)?;
        }
    }
    out.flush().context("failed to flush report")
}

fn write_table<W: Write>(out: &mut W, title: &str, rows: &[Row]) -> Result<()> {
    writeln!(out, "{title}").context("failed to write report")?;
    for row in rows {
        writeln!(out, "  \u{25CF} {:<24} {}", row.label, row.color).context("failed to write report")?;
    }
    Ok(())
}
