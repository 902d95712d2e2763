//! Typed card records and the unified table produced by the loader.

use chrono::NaiveDate;
use serde::Serialize;

/// Label assigned when no developer column carries a value for a row.
pub const UNKNOWN_DEVELOPER: &str = "Unknown developer";

/// Category used in the global platform report for cards without a platform.
pub const UNSPECIFIED_PLATFORM: &str = "Unspecified";

/// Placeholder description in card digests when the cell is empty.
pub const UNKNOWN_DESCRIPTION: &str = "Unknown";

/// Release surface a card pertains to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Web,
    App,
}

impl Channel {
    /// Matches the exact categorical label; anything else is unset.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Web" => Some(Self::Web),
            "App" => Some(Self::App),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Web => "Web",
            Self::App => "App",
        }
    }
}

/// Priority assigned to a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "High" => Some(Self::High),
            "Medium" => Some(Self::Medium),
            "Low" => Some(Self::Low),
            _ => None,
        }
    }
}

/// Three-way review outcome. Always one of these after normalization;
/// missing or unrecognized source values fold into `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Approved,
    Rejected,
    #[default]
    Pending,
}

impl Decision {
    pub fn parse(value: &str) -> Self {
        match value {
            "APPROVED" => Self::Approved,
            "REJECTED" => Self::Rejected,
            _ => Self::Pending,
        }
    }
}

/// One review card: a single row of the unified table after normalization.
#[derive(Debug, Clone)]
pub struct Card {
    /// Name of the week-partition sheet the row came from.
    pub week: String,
    pub reviewer: Option<String>,
    pub channel: Option<Channel>,
    pub developer: String,
    pub site: Option<String>,
    pub platform: Option<String>,
    pub priority: Option<Priority>,
    pub description: Option<String>,
    pub decision: Decision,
    pub rejection_count: u32,
    pub validation_date: Option<NaiveDate>,
    pub resolution_date: Option<NaiveDate>,
}

impl Card {
    pub fn is_rejected(&self) -> bool {
        self.decision == Decision::Rejected
    }

    pub fn is_approved(&self) -> bool {
        self.decision == Decision::Approved
    }
}

/// The immutable unified table: every card from every week partition, in
/// sheet order then row order. Built once per load, never mutated after.
#[derive(Debug)]
pub struct CardTable {
    /// Week partition names in the order they appear in the workbook.
    pub weeks: Vec<String>,
    pub cards: Vec<Card>,
    /// Whether any description column existed in the source. When false,
    /// card digests carry the decision only.
    pub has_description: bool,
}

impl CardTable {
    /// Cards belonging to one week partition, in row order.
    pub fn week_cards<'a>(&'a self, week: &'a str) -> impl Iterator<Item = &'a Card> {
        self.cards.iter().filter(move |c| c.week == week)
    }
}

#[cfg(test)]
pub(crate) fn sample_card(week: &str) -> Card {
    Card {
        week: week.to_string(),
        reviewer: None,
        channel: None,
        developer: UNKNOWN_DEVELOPER.to_string(),
        site: None,
        platform: None,
        priority: None,
        description: None,
        decision: Decision::Pending,
        rejection_count: 0,
        validation_date: None,
        resolution_date: None,
    }
}
