use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::schedule::{format_class, Day, MergedDay, Schedule};

/// Collapse extracted days sharing a calendar date into one canonical day
/// per date. Slots combine position-wise: the first writer takes the slot,
/// later non-empty writers append with " | "; an empty addition leaves a
/// taken slot untouched. The group's slot count is the maximum over its
/// members, so differing week-block lengths reconcile without index gaps.
pub fn merge_days(days: Vec<Day>) -> Schedule {
    let mut groups: BTreeMap<NaiveDate, Vec<Day>> = BTreeMap::new();
    for day in days {
        groups.entry(day.date).or_default().push(day);
    }

    // BTreeMap iteration gives the ascending, unique-by-date order the
    // Schedule invariant requires; within a group, encounter order holds.
    let merged = groups.into_values().map(merge_group).collect();
    Schedule::from_sorted_days(merged)
}

fn merge_group(group: Vec<Day>) -> MergedDay {
    let max_len = group.iter().map(|d| d.classes.len()).max().unwrap_or(0);
    let mut slots = vec![String::new(); max_len];

    for day in &group {
        for (i, class) in day.classes.iter().enumerate() {
            let text = format_class(class);
            if slots[i].is_empty() {
                slots[i] = text;
            } else if !text.is_empty() {
                slots[i] = format!("{} | {}", slots[i], text);
            }
        }
    }

    let first = &group[0];
    MergedDay {
        date: first.date,
        slots,
        name: first.name.clone(),
    }
}

// ── Tests ──
