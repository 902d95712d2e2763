//! Web/App channel statistics: one routine parameterized by channel.

use crate::analyzers::types::{ChannelCounts, ChannelStats, ChannelWeek};
use crate::analyzers::utility::pct;
use crate::cards::{Card, CardTable, Channel};

pub fn channel_stats(table: &CardTable, channel: Channel) -> ChannelStats {
    let weekly = table
        .weeks
        .iter()
        .map(|week| {
            let counts = tally(
                table
                    .week_cards(week)
                    .filter(|c| c.channel == Some(channel)),
            );
            ChannelWeek {
                week: week.clone(),
                reviewed: counts.reviewed,
                accepted: counts.accepted,
                rejected: counts.rejected,
                rejection_pct: counts.rejection_pct,
            }
        })
        .collect();

    let historical = tally(table.cards.iter().filter(|c| c.channel == Some(channel)));

    ChannelStats { weekly, historical }
}

fn tally<'a>(cards: impl Iterator<Item = &'a Card>) -> ChannelCounts {
    let mut reviewed = 0;
    let mut accepted = 0;
    let mut rejected = 0;

    for card in cards {
        reviewed += 1;
        if card.is_approved() {
            accepted += 1;
        } else if card.is_rejected() {
            rejected += 1;
        }
    }

    ChannelCounts {
        reviewed,
        accepted,
        rejected,
        rejection_pct: pct(rejected, reviewed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Decision, sample_card};

    fn card(week: &str, channel: Channel, decision: Decision) -> Card {
        let mut card = sample_card(week);
        card.channel = Some(channel);
        card.decision = decision;
        card
    }

    fn two_week_table() -> CardTable {
        CardTable {
            weeks: vec!["w1".to_string(), "w2".to_string()],
            cards: vec![
                card("w1", Channel::Web, Decision::Rejected),
                card("w1", Channel::Web, Decision::Rejected),
                card("w1", Channel::Web, Decision::Approved),
                card("w2", Channel::App, Decision::Pending),
                card("w2", Channel::App, Decision::Pending),
            ],
            has_description: false,
        }
    }

    #[test]
    fn test_historical_web_split() {
        let stats = channel_stats(&two_week_table(), Channel::Web);

        assert_eq!(stats.historical.reviewed, 3);
        assert_eq!(stats.historical.rejected, 2);
        assert_eq!(stats.historical.accepted, 1);
        assert_eq!(stats.historical.rejection_pct, 66.67);
    }

    #[test]
    fn test_historical_app_split() {
        let stats = channel_stats(&two_week_table(), Channel::App);

        assert_eq!(stats.historical.reviewed, 2);
        assert_eq!(stats.historical.rejected, 0);
        assert_eq!(stats.historical.accepted, 0);
        assert_eq!(stats.historical.rejection_pct, 0.0);
    }

    #[test]
    fn test_weekly_entries_cover_every_partition() {
        let stats = channel_stats(&two_week_table(), Channel::Web);

        assert_eq!(stats.weekly.len(), 2);
        assert_eq!(stats.weekly[0].week, "w1");
        assert_eq!(stats.weekly[0].reviewed, 3);
        // No web cards in w2: all counts zero, percentage zero.
        assert_eq!(stats.weekly[1].reviewed, 0);
        assert_eq!(stats.weekly[1].rejection_pct, 0.0);
    }

    #[test]
    fn test_rejection_pct_stays_in_bounds() {
        let stats = channel_stats(&two_week_table(), Channel::Web);

        for week in &stats.weekly {
            assert!(week.rejection_pct >= 0.0 && week.rejection_pct <= 100.0);
        }
        let h = &stats.historical;
        assert_eq!(h.rejection_pct, pct(h.rejected, h.reviewed));
    }

    #[test]
    fn test_unset_channel_is_excluded() {
        let mut cards = vec![card("w1", Channel::Web, Decision::Approved)];
        cards.push(sample_card("w1"));
        let table = CardTable {
            weeks: vec!["w1".to_string()],
            cards,
            has_description: false,
        };

        let stats = channel_stats(&table, Channel::Web);
        assert_eq!(stats.historical.reviewed, 1);
    }
}
