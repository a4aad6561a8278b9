use crate::report::{DailyCount, GroupCount, GroupMean};
use chrono::NaiveDate;
use core_types::Order;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::hash::Hash;

/// Distinct purchase years, ascending.
pub fn available_years<'a>(orders: impl IntoIterator<Item = &'a Order>) -> Vec<i32> {
    orders
        .into_iter()
        .filter_map(|o| o.purchase_year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Orders purchased in `year`, in their original order.
///
/// Orders without a purchase year never match.
pub fn filter_by_year<'a>(orders: impl IntoIterator<Item = &'a Order>, year: i32) -> Vec<&'a Order> {
    orders
        .into_iter()
        .filter(|o| o.purchase_year == Some(year))
        .collect()
}

/// Mean of `value` per `key`, ordered by key.
///
/// Rows with an undefined key or value are skipped, so a group whose values are all
/// undefined does not appear at all.
pub fn aggregate_mean<T, K, F, V>(rows: impl IntoIterator<Item = T>, mut key: F, mut value: V) -> Vec<GroupMean<K>>
where
    K: Ord,
    F: FnMut(&T) -> Option<K>,
    V: FnMut(&T) -> Option<f64>,
{
    let mut groups: BTreeMap<K, (f64, usize)> = BTreeMap::new();

    for row in rows {
        let (Some(k), Some(v)) = (key(&row), value(&row)) else {
            continue;
        };
        let entry = groups.entry(k).or_insert((0.0, 0));
        entry.0 += v;
        entry.1 += 1;
    }

    groups
        .into_iter()
        .map(|(key, (sum, samples))| GroupMean {
            key,
            mean: sum / samples as f64,
            samples,
        })
        .collect()
}

/// Row count per distinct `key`, largest first.
///
/// Ties keep the order in which keys were first seen. Rows with an undefined key
/// are not counted.
pub fn count_by<T, K, F>(rows: impl IntoIterator<Item = T>, mut key: F) -> Vec<GroupCount<K>>
where
    K: Eq + Hash + Clone,
    F: FnMut(&T) -> Option<K>,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut counts: Vec<GroupCount<K>> = Vec::new();

    for row in rows {
        let Some(k) = key(&row) else { continue };
        match index.get(&k) {
            Some(&slot) => counts[slot].count += 1,
            None => {
                index.insert(k.clone(), counts.len());
                counts.push(GroupCount { key: k, count: 1 });
            }
        }
    }

    // `sort_by` is stable, which gives the first-seen tie break.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Orders per purchase date, ascending by date.
pub fn daily_counts<'a>(orders: impl IntoIterator<Item = &'a Order>) -> Vec<DailyCount> {
    let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for ts in orders.into_iter().filter_map(|o| o.purchase_timestamp) {
        *per_day.entry(ts.date()).or_insert(0) += 1;
    }
    per_day
        .into_iter()
        .map(|(date, count)| DailyCount { date, count })
        .collect()
}
