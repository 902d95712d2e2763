//! Artifact writers for the aggregated summary.
//!
//! The JSON file is the contract with the dashboard renderer; the CSV
//! export carries per-week channel counts for spreadsheet consumers.

use std::fs::{self, OpenOptions};
use std::path::Path;

use anyhow::Result;
use csv::WriterBuilder;
use serde::Serialize;
use tracing::{debug, info};

use crate::analyzers::types::{ChannelWeek, Summary};

/// Logs the summary using Rust's debug pretty-print format.
pub fn print_pretty(summary: &Summary) {
    debug!("{:#?}", summary);
}

/// Logs the summary as pretty-printed JSON.
pub fn print_json(summary: &Summary) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}

/// Writes the summary JSON artifact, creating parent directories as
/// needed. Overwrites any previous artifact at `path`.
pub fn write_summary(path: &str, summary: &Summary) -> Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(path, serde_json::to_string_pretty(summary)?)?;
    info!(path, "Summary written");
    Ok(())
}

/// One per-week per-channel row of the CSV export.
#[derive(Debug, Serialize)]
pub struct WeeklyChannelRecord {
    pub week: String,
    pub channel: String,
    pub reviewed: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub rejection_pct: f64,
}

/// Flattens the summary's weekly channel stats into CSV rows, web weeks
/// first, then app weeks.
pub fn weekly_records(summary: &Summary) -> Vec<WeeklyChannelRecord> {
    let rows = |weekly: &[ChannelWeek], channel: &str| {
        weekly
            .iter()
            .map(|w| WeeklyChannelRecord {
                week: w.week.clone(),
                channel: channel.to_string(),
                reviewed: w.reviewed,
                accepted: w.accepted,
                rejected: w.rejected,
                rejection_pct: w.rejection_pct,
            })
            .collect::<Vec<_>>()
    };

    let mut records = rows(&summary.web.weekly, "Web");
    records.extend(rows(&summary.app.weekly, "App"));
    records
}

/// Appends records to a CSV file, creating it with headers if it does not
/// already exist.
pub fn append_weekly_records(path: &str, records: &[WeeklyChannelRecord]) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending CSV records");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardTable, Channel, Decision, sample_card};
    use std::env;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn summary() -> Summary {
        let mut web = sample_card("w1");
        web.channel = Some(Channel::Web);
        web.decision = Decision::Rejected;
        let mut app = sample_card("w1");
        app.channel = Some(Channel::App);

        Summary::build(&CardTable {
            weeks: vec!["w1".to_string()],
            cards: vec![web, app],
            has_description: false,
        })
    }

    #[test]
    fn test_print_helpers_do_not_panic() {
        let summary = summary();
        print_pretty(&summary);
        print_json(&summary).unwrap();
    }

    #[test]
    fn test_write_summary_creates_artifact() {
        let path = temp_path("qa_card_reporter_test_summary.json");
        let _ = fs::remove_file(&path);

        write_summary(&path, &summary()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"total_weeks\": 1"));
        assert!(content.contains("\"weeks\""));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_weekly_records_cover_both_channels() {
        let records = weekly_records(&summary());

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].channel, "Web");
        assert_eq!(records[0].rejected, 1);
        assert_eq!(records[0].rejection_pct, 100.0);
        assert_eq!(records[1].channel, "App");
        assert_eq!(records[1].reviewed, 1);
    }

    #[test]
    fn test_append_records_writes_header_once() {
        let path = temp_path("qa_card_reporter_test_header.csv");
        let _ = fs::remove_file(&path);

        let records = weekly_records(&summary());
        append_weekly_records(&path, &records).unwrap();
        append_weekly_records(&path, &records).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let header_count = content.lines().filter(|l| l.contains("rejection_pct")).count();
        assert_eq!(header_count, 1);
        // 1 header + 2 rows per append.
        assert_eq!(content.lines().count(), 5);

        fs::remove_file(&path).unwrap();
    }
}
