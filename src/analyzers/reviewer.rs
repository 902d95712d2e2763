//! Reviewer (PM/QA/tester) statistics, weekly and historical.

use crate::analyzers::types::{
    ReviewerHistorical, ReviewerStats, ReviewerTotals, ReviewerWeek, ReviewerWeekEntry,
};
use crate::analyzers::utility::{distinct_week_count, group_in_order};
use crate::cards::{Card, CardTable};

pub fn reviewer_stats(table: &CardTable) -> ReviewerStats {
    let weekly = table
        .weeks
        .iter()
        .map(|week| {
            let week_cards: Vec<&Card> = table.week_cards(week).collect();
            let reviewers = group_in_order(week_cards.iter().copied(), |c| c.reviewer.clone())
                .into_iter()
                .map(|(reviewer, cards)| ReviewerWeekEntry {
                    reviewer,
                    reviewed: cards.len(),
                    rejected: rejected(&cards),
                })
                .collect();

            ReviewerWeek {
                week: week.clone(),
                reviewers,
                total: week_cards.len(),
                rejected: rejected(&week_cards),
            }
        })
        .collect();

    // Coarse ratio shared by every reviewer: distinct weeks present in the
    // table over week partitions loaded. Not a per-reviewer mean.
    let weekly_average = if table.weeks.is_empty() {
        0.0
    } else {
        distinct_week_count(table.cards.iter()) as f64 / table.weeks.len() as f64
    };

    let reviewers = group_in_order(table.cards.iter(), |c| c.reviewer.clone())
        .into_iter()
        .map(|(reviewer, cards)| ReviewerTotals {
            reviewer,
            reviewed: cards.len(),
            rejected: rejected(&cards),
            weekly_average,
        })
        .collect();

    ReviewerStats {
        weekly,
        historical: ReviewerHistorical {
            reviewers,
            total_reviewed: table.cards.len(),
            total_rejected: table.cards.iter().filter(|c| c.is_rejected()).count(),
        },
    }
}

fn rejected(cards: &[&Card]) -> usize {
    cards.iter().filter(|c| c.is_rejected()).count()
}
