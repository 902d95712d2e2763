//! Canonical column schema and the week-partition naming convention.
//!
//! Source spreadsheets spell column headers inconsistently across sheets
//! and over time. Each canonical concept has a fixed set of accepted
//! lowercase spellings, resolved once per load into column indices;
//! downstream code only ever sees canonical fields.

use tracing::{info, warn};

/// Sheets whose name contains this marker (case-insensitive) are week
/// partitions; everything else in the workbook is ignored.
pub const WEEK_SHEET_MARKER: &str = "weekly cards";

pub fn is_week_sheet(name: &str) -> bool {
    name.to_lowercase().contains(WEEK_SHEET_MARKER)
}

/// Developer columns are matched by substring rather than exact spelling,
/// and every match participates in row-wise coalescing.
pub const DEVELOPER_MARKER: &str = "developer";

pub fn is_developer_column(header: &str) -> bool {
    header.to_lowercase().contains(DEVELOPER_MARKER)
}

const REVIEWER_SPELLINGS: &[&str] = &["reviewer", "pm", "qa", "tester"];
const CHANNEL_SPELLINGS: &[&str] = &["channel", "web/app", "web or app"];
const SITE_SPELLINGS: &[&str] = &["site"];
const PLATFORM_SPELLINGS: &[&str] = &["platform"];
const PRIORITY_SPELLINGS: &[&str] = &["priority", "card priority"];
const DESCRIPTION_SPELLINGS: &[&str] = &["description"];
const DECISION_SPELLINGS: &[&str] = &["decision", "accepted/rejected", "approved/rejected"];
const REJECTION_COUNT_SPELLINGS: &[&str] =
    &["rejection count", "number of rejections", "rejections"];
const VALIDATION_DATE_SPELLINGS: &[&str] = &["validation date", "tentative qa validation date"];
const RESOLUTION_DATE_SPELLINGS: &[&str] = &["resolution date", "approval or rejection date"];

/// Column indices into the unified table, one per canonical concept.
/// `None` means no source column matched; every value of that concept is
/// then missing and defaults apply.
#[derive(Debug, Default)]
pub struct ResolvedSchema {
    pub reviewer: Option<usize>,
    pub channel: Option<usize>,
    pub site: Option<usize>,
    pub platform: Option<usize>,
    pub priority: Option<usize>,
    pub description: Option<usize>,
    pub decision: Option<usize>,
    pub rejection_count: Option<usize>,
    pub validation_date: Option<usize>,
    pub resolution_date: Option<usize>,
    /// Every developer-variant column, in unified column order.
    pub developer: Vec<usize>,
}

impl ResolvedSchema {
    /// Resolves canonical concepts against the unified header list. The
    /// first matching column wins for each concept.
    pub fn resolve(headers: &[String]) -> Self {
        let schema = ResolvedSchema {
            reviewer: find_column(headers, "reviewer", REVIEWER_SPELLINGS),
            channel: find_column(headers, "channel", CHANNEL_SPELLINGS),
            site: find_column(headers, "site", SITE_SPELLINGS),
            platform: find_column(headers, "platform", PLATFORM_SPELLINGS),
            priority: find_column(headers, "priority", PRIORITY_SPELLINGS),
            description: find_column(headers, "description", DESCRIPTION_SPELLINGS),
            decision: find_column(headers, "decision", DECISION_SPELLINGS),
            rejection_count: find_column(headers, "rejection count", REJECTION_COUNT_SPELLINGS),
            validation_date: find_column(headers, "validation date", VALIDATION_DATE_SPELLINGS),
            resolution_date: find_column(headers, "resolution date", RESOLUTION_DATE_SPELLINGS),
            developer: headers
                .iter()
                .enumerate()
                .filter(|(_, h)| is_developer_column(h))
                .map(|(i, _)| i)
                .collect(),
        };

        if schema.developer.is_empty() {
            warn!("No developer column found; every card gets the fallback label");
        } else if schema.developer.len() > 1 {
            info!(
                columns = schema.developer.len(),
                "Coalescing developer columns, first non-empty value wins"
            );
        }

        schema
    }
}

fn find_column(headers: &[String], canonical: &str, spellings: &[&str]) -> Option<usize> {
    let found = headers
        .iter()
        .position(|h| spellings.contains(&h.trim().to_lowercase().as_str()));

    match found {
        Some(index) => {
            if headers[index].trim().to_lowercase() != canonical {
                info!(column = %headers[index], canonical, "Resolved column spelling");
            }
            Some(index)
        }
        None => {
            warn!(column = canonical, "Column not found; values default to missing");
            None
        }
    }
}
