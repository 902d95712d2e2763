//! Priority-level totals and weekly card volume per channel.

use crate::analyzers::types::{
    ChannelAverages, PriorityLevel, PriorityLevels, PriorityStats, PriorityWeek,
};
use crate::analyzers::utility::{mean, round2};
use crate::cards::{CardTable, Channel, Priority};

pub fn priority_stats(table: &CardTable) -> PriorityStats {
    let week_count = table.weeks.len();

    let level = |priority: Priority| {
        let total = table
            .cards
            .iter()
            .filter(|c| c.priority == Some(priority))
            .count();
        PriorityLevel {
            total,
            weekly_average: if week_count == 0 {
                0.0
            } else {
                round2(total as f64 / week_count as f64)
            },
        }
    };

    let web = channel_weekly_mean(table, Channel::Web);
    let app = channel_weekly_mean(table, Channel::App);

    let per_week = table
        .weeks
        .iter()
        .map(|week| {
            let cards: Vec<_> = table.week_cards(week).collect();
            PriorityWeek {
                week: week.clone(),
                high: cards.iter().filter(|c| c.priority == Some(Priority::High)).count(),
                medium: cards.iter().filter(|c| c.priority == Some(Priority::Medium)).count(),
                low: cards.iter().filter(|c| c.priority == Some(Priority::Low)).count(),
                web: cards.iter().filter(|c| c.channel == Some(Channel::Web)).count(),
                app: cards.iter().filter(|c| c.channel == Some(Channel::App)).count(),
            }
        })
        .collect();

    PriorityStats {
        levels: PriorityLevels {
            high: level(Priority::High),
            medium: level(Priority::Medium),
            low: level(Priority::Low),
        },
        weekly_average: ChannelAverages {
            web,
            app,
            total: round2(web + app),
        },
        per_week,
    }
}

/// Mean weekly card count for one channel, over the weeks in which that
/// channel appears. Zero when it appears in none.
fn channel_weekly_mean(table: &CardTable, channel: Channel) -> f64 {
    let counts: Vec<f64> = table
        .weeks
        .iter()
        .filter_map(|week| {
            let count = table
                .week_cards(week)
                .filter(|c| c.channel == Some(channel))
                .count();
            (count > 0).then_some(count as f64)
        })
        .collect();

    if counts.is_empty() {
        0.0
    } else {
        round2(mean(&counts))
    }
}
