use std::collections::{HashMap, HashSet};

use crate::cards::Card;

/// Rounds half-up to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Percentage of `part` in `total`, rounded to 2 decimals. Returns 0.0
/// when `total` is 0, never an error or NaN.
pub fn pct(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        round2(part as f64 / total as f64 * 100.0)
    }
}

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Groups items under a string key, preserving first-appearance order of
/// keys and item order within each group. Items whose key is `None` are
/// skipped.
pub fn group_in_order<'a, T, F>(
    items: impl IntoIterator<Item = &'a T>,
    mut key: F,
) -> Vec<(String, Vec<&'a T>)>
where
    F: FnMut(&'a T) -> Option<String>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<&'a T>)> = Vec::new();

    for item in items {
        let Some(k) = key(item) else { continue };
        match index.get(&k) {
            Some(&slot) => groups[slot].1.push(item),
            None => {
                index.insert(k.clone(), groups.len());
                groups.push((k, vec![item]));
            }
        }
    }

    groups
}

/// Occurrence counts per value, sorted descending by count. Ties keep
/// first-appearance order (the sort is stable).
pub fn count_values_desc(values: impl IntoIterator<Item = String>) -> Vec<(String, usize)> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for value in values {
        match index.get(&value) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(value.clone(), counts.len());
                counts.push((value, 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Number of distinct week partitions the given cards span.
pub fn distinct_week_count<'a>(cards: impl IntoIterator<Item = &'a Card>) -> usize {
    let mut seen = HashSet::new();
    cards.into_iter().filter(|c| seen.insert(c.week.as_str())).count()
}
