//! Serializable summary types consumed by the dashboard renderer.
//!
//! The renderer treats the summary as opaque data; every aggregate it
//! displays is computed here, never re-derived client-side. Ordered
//! collections are vectors of keyed entries so rankings and week order
//! survive serialization.

use serde::Serialize;

use crate::cards::{Card, Decision, UNKNOWN_DESCRIPTION};

/// `(description, decision)` digest of one card, as shown in weekly
/// drill-downs. `description` is omitted entirely when the source table
/// never had a description column.
#[derive(Debug, Serialize)]
pub struct CardDigest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub decision: Decision,
}

impl CardDigest {
    pub fn from_card(card: &Card, include_description: bool) -> Self {
        CardDigest {
            description: include_description.then(|| {
                card.description
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_DESCRIPTION.to_string())
            }),
            decision: card.decision,
        }
    }
}

/// One reviewer's activity within a single week.
#[derive(Debug, Serialize)]
pub struct ReviewerWeekEntry {
    pub reviewer: String,
    pub reviewed: usize,
    pub rejected: usize,
}

/// Per-week reviewer breakdown. `total`/`rejected` count every card in the
/// week, including cards with no reviewer.
#[derive(Debug, Serialize)]
pub struct ReviewerWeek {
    pub week: String,
    pub reviewers: Vec<ReviewerWeekEntry>,
    pub total: usize,
    pub rejected: usize,
}

#[derive(Debug, Serialize)]
pub struct ReviewerTotals {
    pub reviewer: String,
    pub reviewed: usize,
    pub rejected: usize,
    pub weekly_average: f64,
}

#[derive(Debug, Serialize)]
pub struct ReviewerHistorical {
    pub reviewers: Vec<ReviewerTotals>,
    pub total_reviewed: usize,
    pub total_rejected: usize,
}

#[derive(Debug, Serialize)]
pub struct ReviewerStats {
    pub weekly: Vec<ReviewerWeek>,
    pub historical: ReviewerHistorical,
}

/// Reviewed/accepted/rejected tally for one channel slice.
#[derive(Debug, Serialize)]
pub struct ChannelCounts {
    pub reviewed: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub rejection_pct: f64,
}

#[derive(Debug, Serialize)]
pub struct ChannelWeek {
    pub week: String,
    pub reviewed: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub rejection_pct: f64,
}

#[derive(Debug, Serialize)]
pub struct ChannelStats {
    pub weekly: Vec<ChannelWeek>,
    pub historical: ChannelCounts,
}

/// One developer's activity within a single week. Only weeks with at
/// least one card appear.
#[derive(Debug, Serialize)]
pub struct DeveloperWeek {
    pub week: String,
    pub total: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub rejection_pct: f64,
    pub cards: Vec<CardDigest>,
}

/// Historical totals plus the weekly drill-down for one developer.
/// Entries are ranked descending by `total`.
#[derive(Debug, Serialize)]
pub struct DeveloperEntry {
    pub developer: String,
    pub total: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub weekly_average: f64,
    pub rejection_pct: f64,
    pub weeks_active: usize,
    pub weekly: Vec<DeveloperWeek>,
}

#[derive(Debug, Serialize)]
pub struct PriorityLevel {
    pub total: usize,
    pub weekly_average: f64,
}

#[derive(Debug, Serialize)]
pub struct PriorityLevels {
    pub high: PriorityLevel,
    pub medium: PriorityLevel,
    pub low: PriorityLevel,
}

/// Mean weekly card volume per channel, over the weeks that channel
/// appears in.
#[derive(Debug, Serialize)]
pub struct ChannelAverages {
    pub web: f64,
    pub app: f64,
    pub total: f64,
}

#[derive(Debug, Serialize)]
pub struct PriorityWeek {
    pub week: String,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub web: usize,
    pub app: usize,
}

#[derive(Debug, Serialize)]
pub struct PriorityStats {
    pub levels: PriorityLevels,
    pub weekly_average: ChannelAverages,
    pub per_week: Vec<PriorityWeek>,
}

#[derive(Debug, Serialize)]
pub struct PlatformCount {
    pub platform: String,
    pub count: usize,
}

/// Per-site totals and averages. Weekly averages divide by the number of
/// distinct weeks the site appears in, not the total week count. Entries
/// are ranked descending by `total`.
#[derive(Debug, Serialize)]
pub struct SiteEntry {
    pub site: String,
    pub total: usize,
    pub web: usize,
    pub app: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub weekly_average: f64,
    pub accepted_weekly_average: f64,
    pub rejected_weekly_average: f64,
    pub platforms: Vec<PlatformCount>,
    pub weeks_active: usize,
}

#[derive(Debug, Serialize)]
pub struct WeekCards {
    pub week: String,
    pub cards: Vec<CardDigest>,
}

/// Complete aggregation result handed to the renderer, fully computed
/// before any output begins.
#[derive(Debug, Serialize)]
pub struct Summary {
    pub reviewers: ReviewerStats,
    pub web: ChannelStats,
    pub app: ChannelStats,
    pub developers_web: Vec<DeveloperEntry>,
    pub developers_app: Vec<DeveloperEntry>,
    pub priorities: PriorityStats,
    pub sites: Vec<SiteEntry>,
    pub platforms: Vec<PlatformCount>,
    pub weeks: Vec<String>,
    pub total_weeks: usize,
    pub cards_by_week: Vec<WeekCards>,
}
