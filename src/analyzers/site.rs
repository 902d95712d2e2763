//! Per-site statistics and the global platform report.

use crate::analyzers::types::{PlatformCount, SiteEntry};
use crate::analyzers::utility::{count_values_desc, distinct_week_count, group_in_order, round2};
use crate::cards::{Card, CardTable, Channel, UNSPECIFIED_PLATFORM};

/// Every distinct site, ranked descending by total card count. Cards with
/// no site are not attributed to any entry.
pub fn site_stats(table: &CardTable) -> Vec<SiteEntry> {
    let groups = group_in_order(table.cards.iter(), |c| c.site.clone());

    let mut entries: Vec<SiteEntry> = groups
        .into_iter()
        .map(|(site, cards)| entry(site, cards))
        .collect();

    entries.sort_by(|a, b| b.total.cmp(&a.total));
    entries
}

fn entry(site: String, cards: Vec<&Card>) -> SiteEntry {
    let total = cards.len();
    let accepted = cards.iter().filter(|c| c.is_approved()).count();
    let rejected = cards.iter().filter(|c| c.is_rejected()).count();
    let weeks_active = distinct_week_count(cards.iter().copied());

    // Averages divide by the weeks this site appears in, not the total
    // week count.
    let weekly = |count: usize| {
        if weeks_active == 0 {
            0.0
        } else {
            round2(count as f64 / weeks_active as f64)
        }
    };

    let platforms = count_values_desc(cards.iter().filter_map(|c| c.platform.clone()))
        .into_iter()
        .map(|(platform, count)| PlatformCount { platform, count })
        .collect();

    SiteEntry {
        site,
        total,
        web: cards.iter().filter(|c| c.channel == Some(Channel::Web)).count(),
        app: cards.iter().filter(|c| c.channel == Some(Channel::App)).count(),
        accepted,
        rejected,
        weekly_average: weekly(total),
        accepted_weekly_average: weekly(accepted),
        rejected_weekly_average: weekly(rejected),
        platforms,
        weeks_active,
    }
}

/// Global card count per platform, descending. Cards without a platform
/// fall into the explicit "Unspecified" category.
pub fn platform_report(table: &CardTable) -> Vec<PlatformCount> {
    count_values_desc(
        table
            .cards
            .iter()
            .map(|c| c.platform.clone().unwrap_or_else(|| UNSPECIFIED_PLATFORM.to_string())),
    )
    .into_iter()
    .map(|(platform, count)| PlatformCount { platform, count })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Decision, sample_card};

    fn card(week: &str, site: Option<&str>, platform: Option<&str>) -> Card {
        let mut card = sample_card(week);
        card.site = site.map(|s| s.to_string());
        card.platform = platform.map(|p| p.to_string());
        card
    }

    fn table(cards: Vec<Card>) -> CardTable {
        CardTable {
            weeks: vec!["w1".to_string(), "w2".to_string(), "w3".to_string()],
            cards,
            has_description: false,
        }
    }

    #[test]
    fn test_sites_ranked_by_total() {
        let stats = site_stats(&table(vec![
            card("w1", Some("blog"), None),
            card("w1", Some("store"), None),
            card("w2", Some("store"), None),
        ]));

        let names: Vec<&str> = stats.iter().map(|s| s.site.as_str()).collect();
        assert_eq!(names, vec!["store", "blog"]);
        assert_eq!(stats[0].total, 2);
    }

    #[test]
    fn test_averages_use_active_weeks_only() {
        // store appears in 2 of the 3 weeks: averages divide by 2.
        let mut accepted = card("w1", Some("store"), None);
        accepted.decision = Decision::Approved;
        let stats = site_stats(&table(vec![
            accepted,
            card("w1", Some("store"), None),
            card("w2", Some("store"), None),
        ]));

        let store = &stats[0];
        assert_eq!(store.weeks_active, 2);
        assert_eq!(store.weekly_average, 1.5);
        assert_eq!(store.accepted_weekly_average, 0.5);
        assert_eq!(store.rejected_weekly_average, 0.0);
    }

    #[test]
    fn test_channel_split_per_site() {
        let mut web = card("w1", Some("store"), None);
        web.channel = Some(Channel::Web);
        let mut app = card("w1", Some("store"), None);
        app.channel = Some(Channel::App);

        let stats = site_stats(&table(vec![web, app, card("w1", Some("store"), None)]));

        assert_eq!(stats[0].total, 3);
        assert_eq!(stats[0].web, 1);
        assert_eq!(stats[0].app, 1);
    }

    #[test]
    fn test_site_platform_breakdown_skips_missing() {
        let stats = site_stats(&table(vec![
            card("w1", Some("store"), Some("iOS")),
            card("w1", Some("store"), Some("iOS")),
            card("w1", Some("store"), Some("Android")),
            card("w1", Some("store"), None),
        ]));

        let platforms: Vec<(&str, usize)> = stats[0]
            .platforms
            .iter()
            .map(|p| (p.platform.as_str(), p.count))
            .collect();
        assert_eq!(platforms, vec![("iOS", 2), ("Android", 1)]);
    }

    #[test]
    fn test_siteless_cards_are_unattributed() {
        let stats = site_stats(&table(vec![card("w1", None, None)]));
        assert!(stats.is_empty());
    }

    #[test]
    fn test_platform_report_maps_missing_to_unspecified() {
        let report = platform_report(&table(vec![
            card("w1", None, Some("iOS")),
            card("w1", None, None),
            card("w2", None, None),
        ]));

        let counts: Vec<(&str, usize)> = report
            .iter()
            .map(|p| (p.platform.as_str(), p.count))
            .collect();
        assert_eq!(counts, vec![("Unspecified", 2), ("iOS", 1)]);
    }
}
