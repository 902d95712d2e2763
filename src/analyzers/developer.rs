//! Per-developer statistics for one channel, ranked by card volume.

use crate::analyzers::types::{CardDigest, DeveloperEntry, DeveloperWeek};
use crate::analyzers::utility::{distinct_week_count, group_in_order, pct, round2};
use crate::cards::{Card, CardTable, Channel};

/// Every developer with at least one card in `channel`, ranked descending
/// by historical card count. Ties keep first-appearance order.
pub fn developer_stats(table: &CardTable, channel: Channel) -> Vec<DeveloperEntry> {
    let groups = group_in_order(
        table.cards.iter().filter(|c| c.channel == Some(channel)),
        |c| Some(c.developer.clone()),
    );

    let mut entries: Vec<DeveloperEntry> = groups
        .into_iter()
        .map(|(developer, cards)| entry(table, developer, cards))
        .collect();

    entries.sort_by(|a, b| b.total.cmp(&a.total));
    entries
}

fn entry(table: &CardTable, developer: String, cards: Vec<&Card>) -> DeveloperEntry {
    // Weeks with no cards for this developer are left out of the
    // drill-down entirely.
    let weekly = table
        .weeks
        .iter()
        .filter_map(|week| {
            let week_cards: Vec<&Card> =
                cards.iter().copied().filter(|c| c.week == *week).collect();
            if week_cards.is_empty() {
                return None;
            }

            let rejected = week_cards.iter().filter(|c| c.is_rejected()).count();
            Some(DeveloperWeek {
                week: week.clone(),
                total: week_cards.len(),
                accepted: week_cards.iter().filter(|c| c.is_approved()).count(),
                rejected,
                rejection_pct: pct(rejected, week_cards.len()),
                cards: week_cards
                    .iter()
                    .map(|c| CardDigest::from_card(c, table.has_description))
                    .collect(),
            })
        })
        .collect();

    let total = cards.len();
    let rejected = cards.iter().filter(|c| c.is_rejected()).count();
    let weekly_average = if table.weeks.is_empty() {
        0.0
    } else {
        round2(total as f64 / table.weeks.len() as f64)
    };

    DeveloperEntry {
        developer,
        total,
        accepted: cards.iter().filter(|c| c.is_approved()).count(),
        rejected,
        weekly_average,
        rejection_pct: pct(rejected, total),
        weeks_active: distinct_week_count(cards.iter().copied()),
        weekly,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Decision, sample_card};

    fn card(week: &str, developer: &str, decision: Decision) -> Card {
        let mut card = sample_card(week);
        card.channel = Some(Channel::Web);
        card.developer = developer.to_string();
        card.decision = decision;
        card.description = Some(format!("{developer} change"));
        card
    }

    fn table(cards: Vec<Card>) -> CardTable {
        CardTable {
            weeks: vec!["w1".to_string(), "w2".to_string()],
            cards,
            has_description: true,
        }
    }

    #[test]
    fn test_ranking_is_descending_with_stable_ties() {
        let entries = developer_stats(
            &table(vec![
                card("w1", "ana", Decision::Approved),
                card("w1", "bob", Decision::Approved),
                card("w1", "cara", Decision::Approved),
                card("w2", "bob", Decision::Approved),
            ]),
            Channel::Web,
        );

        let names: Vec<&str> = entries.iter().map(|e| e.developer.as_str()).collect();
        // bob leads on volume; ana and cara tie and keep source order.
        assert_eq!(names, vec!["bob", "ana", "cara"]);
    }

    #[test]
    fn test_channel_filter_excludes_other_surface() {
        let mut app_card = card("w1", "ana", Decision::Approved);
        app_card.channel = Some(Channel::App);

        let entries = developer_stats(
            &table(vec![app_card, card("w1", "bob", Decision::Approved)]),
            Channel::Web,
        );

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].developer, "bob");
    }

    #[test]
    fn test_historical_fields() {
        let entries = developer_stats(
            &table(vec![
                card("w1", "ana", Decision::Rejected),
                card("w1", "ana", Decision::Approved),
                card("w2", "ana", Decision::Rejected),
            ]),
            Channel::Web,
        );

        let ana = &entries[0];
        assert_eq!(ana.total, 3);
        assert_eq!(ana.rejected, 2);
        assert_eq!(ana.accepted, 1);
        assert_eq!(ana.weekly_average, 1.5);
        assert_eq!(ana.rejection_pct, 66.67);
        assert_eq!(ana.weeks_active, 2);
    }

    #[test]
    fn test_weekly_drilldown_skips_empty_weeks() {
        let entries = developer_stats(
            &table(vec![card("w2", "ana", Decision::Rejected)]),
            Channel::Web,
        );

        let ana = &entries[0];
        assert_eq!(ana.weekly.len(), 1);
        assert_eq!(ana.weekly[0].week, "w2");
        assert_eq!(ana.weekly[0].rejection_pct, 100.0);
        assert_eq!(ana.weekly[0].cards.len(), 1);
        assert_eq!(
            ana.weekly[0].cards[0].description.as_deref(),
            Some("ana change")
        );
    }

    #[test]
    fn test_missing_description_digest_falls_back() {
        let mut no_desc = card("w1", "ana", Decision::Approved);
        no_desc.description = None;

        let entries = developer_stats(&table(vec![no_desc]), Channel::Web);
        assert_eq!(
            entries[0].weekly[0].cards[0].description.as_deref(),
            Some("Unknown")
        );
    }
}
