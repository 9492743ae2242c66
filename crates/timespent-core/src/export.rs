use anyhow::{bail, Context, Result};
use chrono::Local;
use serde_json::json;
use std::io::Write;

use crate::aggregate::Row;
use crate::tracker::Report;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn from_name(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => bail!("unknown export format: {name}"),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

pub fn write_report<W: Write>(report: &Report, format: ExportFormat, writer: W) -> Result<()> {
    match format {
        ExportFormat::Csv => write_csv(report, writer),
        ExportFormat::Json => write_json(report, writer),
    }
}

fn write_csv<W: Write>(report: &Report, writer: W) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(["table", "label", "color", "duration_minutes", "formatted"])
        .context("failed to write CSV header")?;

    let tables = [("colors", &report.color_rows), ("keywords", &report.keyword_rows)];
    for (table, rows) in tables {
        for row in rows.iter() {
            let minutes = row.duration_minutes.to_string();
            out.write_record([
                table,
                row.label.as_str(),
                row.color.as_str(),
                minutes.as_str(),
                row.formatted_duration.as_str(),
            ])
            .context("failed to write CSV row")?;
        }
    }
    out.flush().context("failed to flush CSV export")?;
    Ok(())
}

fn write_json<W: Write>(report: &Report, writer: W) -> Result<()> {
    let payload = json!({
        "generated_at": Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        "screen_mode": format!("{:?}", report.screen_mode).to_ascii_lowercase(),
        "colors": rows_json(&report.color_rows),
        "keywords": rows_json(&report.keyword_rows),
    });
    serde_json::to_writer_pretty(writer, &payload).context("failed to serialize JSON export")?;
    Ok(())
}

fn rows_json(rows: &[Row]) -> serde_json::Value {
    serde_json::Value::Array(
        rows.iter()
            .map(|row| {
                json!({
                    "label": row.label,
                    "color": row.color,
                    "duration_minutes": row.duration_minutes,
                    "formatted": row.formatted_duration,
                })
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorKey;
    use crate::geometry::ScreenMode;

    fn sample() -> Report {
        Report {
            screen_mode: ScreenMode::Normal,
            color_rows: vec![Row {
                label: "1h ".to_owned(),
                color: ColorKey::new("rgb(10, 20, 30)"),
                duration_minutes: 60.0,
                formatted_duration: "1h ".to_owned(),
            }],
            keyword_rows: vec![Row {
                label: "a, b -  20m".to_owned(),
                color: ColorKey::new("grey"),
                duration_minutes: 20.0,
                formatted_duration: " 20m".to_owned(),
            }],
        }
    }

    #[test]
    fn csv_quotes_labels_with_commas() {
        let mut buf = Vec::new();
        write_report(&sample(), ExportFormat::Csv, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "table,label,color,duration_minutes,formatted");
        assert_eq!(lines[1], "colors,1h ,\"rgb(10, 20, 30)\",60,1h ");
        assert_eq!(lines[2], "keywords,\"a, b -  20m\",grey,20, 20m");
    }

    #[test]
    fn json_lists_both_tables() {
        let mut buf = Vec::new();
        write_report(&sample(), ExportFormat::Json, &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["screen_mode"], "normal");
        assert_eq!(value["colors"][0]["color"], "rgb(10, 20, 30)");
        assert_eq!(value["keywords"][0]["duration_minutes"], 20.0);
        assert!(value["generated_at"].is_string());
    }

    #[test]
    fn format_names() {
        assert_eq!(ExportFormat::from_name("CSV").unwrap(), ExportFormat::Csv);
        assert!(ExportFormat::from_name("xml").is_err());
    }
}
