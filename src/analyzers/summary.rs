//! The summary assembler and the per-week cards index.

use crate::analyzers::types::{CardDigest, Summary, WeekCards};
use crate::analyzers::{channel, developer, priority, reviewer, site};
use crate::cards::{CardTable, Channel};

/// Digest of every card in one week partition, in row order.
pub fn cards_by_week(table: &CardTable, week: &str) -> Vec<CardDigest> {
    table
        .week_cards(week)
        .map(|c| CardDigest::from_card(c, table.has_description))
        .collect()
}

impl Summary {
    /// Runs the whole analyzer battery over one table. Every aggregate is
    /// computed here; the renderer never re-derives anything.
    pub fn build(table: &CardTable) -> Summary {
        Summary {
            reviewers: reviewer::reviewer_stats(table),
            web: channel::channel_stats(table, Channel::Web),
            app: channel::channel_stats(table, Channel::App),
            developers_web: developer::developer_stats(table, Channel::Web),
            developers_app: developer::developer_stats(table, Channel::App),
            priorities: priority::priority_stats(table),
            sites: site::site_stats(table),
            platforms: site::platform_report(table),
            weeks: table.weeks.clone(),
            total_weeks: table.weeks.len(),
            cards_by_week: table
                .weeks
                .iter()
                .map(|week| WeekCards {
                    week: week.clone(),
                    cards: cards_by_week(table, week),
                })
                .collect(),
        }
    }
}
