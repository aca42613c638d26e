use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// One class slot: what is taught and where. Both fields may be empty —
/// an empty slot is a real period with nothing scheduled and must keep
/// its position so later merges stay aligned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Class {
    pub subject: String,
    pub classroom: String,
}

impl Class {
    pub fn new(subject: impl Into<String>, classroom: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            classroom: classroom.into(),
        }
    }

    pub fn empty() -> Self {
        Self::new("", "")
    }

    pub fn is_empty(&self) -> bool {
        self.subject.is_empty() && self.classroom.is_empty()
    }
}

/// One extracted calendar day: date, ordered class slots (index = period
/// number), weekday label as written in the source sheet. Two `Day`s for
/// the same date may differ in slot count before merging.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Day {
    pub date: NaiveDate,
    pub classes: Vec<Class>,
    pub name: String,
}

/// One canonical day after merging. Slots are pre-formatted text, since
/// overlapping sources combine position-wise as "a | b".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedDay {
    pub date: NaiveDate,
    pub slots: Vec<String>,
    pub name: String,
}

/// The final schedule: merged days, ascending and unique by date.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Schedule {
    days: Vec<MergedDay>,
}

impl Schedule {
    /// Caller guarantees `days` is sorted ascending and unique by date;
    /// the merger constructs it that way.
    pub(crate) fn from_sorted_days(days: Vec<MergedDay>) -> Self {
        Self { days }
    }

    pub fn all(&self) -> &[MergedDay] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Day by calendar date. None is an explicit absence, not an error —
    /// a date with no recorded classes and a date outside the schedule's
    /// span look the same to the service.
    pub fn for_date(&self, date: NaiveDate) -> Option<&MergedDay> {
        self.days
            .binary_search_by_key(&date, |d| d.date)
            .ok()
            .map(|i| &self.days[i])
    }

    /// Schedule days falling in a month, ascending.
    pub fn for_month(&self, year: i32, month: u32) -> Vec<&MergedDay> {
        self.days
            .iter()
            .filter(|d| d.date.year() == year && d.date.month() == month)
            .collect()
    }
}

/// "<classroom> - <subject>", or the empty string unless both parts are
/// present. A half-specified slot renders as no class at all.
pub fn format_class(class: &Class) -> String {
    if class.subject.is_empty() || class.classroom.is_empty() {
        return String::new();
    }
    format!("{} - {}", class.classroom, class.subject)
}

/// Header line "<Weekday-capitalized> <dd.mm.yy>", then one numbered line
/// per slot. Empty slots still get their line so period numbers read true.
pub fn format_merged_day(day: &MergedDay) -> String {
    let mut out = format!("{} {}\n", capitalize(&day.name), day.date.format("%d.%m.%y"));
    for (idx, slot) in day.slots.iter().enumerate() {
        out.push_str(&format!("{}: {}\n", idx + 1, slot));
    }
    out
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn merged(date: NaiveDate, slots: Vec<&str>, name: &str) -> MergedDay {
        MergedDay {
            date,
            slots: slots.into_iter().map(String::from).collect(),
            name: name.to_string(),
        }
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn format_class_needs_both_fields() {
        assert_eq!(format_class(&Class::new("матан", "101")), "101 - матан");
        assert_eq!(format_class(&Class::new("матан", "")), "");
        assert_eq!(format_class(&Class::new("", "101")), "");
        assert_eq!(format_class(&Class::empty()), "");
    }

    #[test]
    fn format_day_numbers_slots_from_one() {
        let day = merged(d(2025, 11, 3), vec!["101 - матан", ""], "понедельник");
        assert_eq!(
            format_merged_day(&day),
            "Понедельник 03.11.25\n1: 101 - матан\n2: \n"
        );
    }

    #[test]
    fn capitalize_handles_cyrillic() {
        assert_eq!(capitalize("вторник"), "Вторник");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn for_date_hits_and_misses() {
        let schedule = Schedule::from_sorted_days(vec![
            merged(d(2025, 11, 3), vec!["x"], "понедельник"),
            merged(d(2025, 11, 4), vec!["y"], "вторник"),
        ]);
        assert_eq!(schedule.for_date(d(2025, 11, 4)).unwrap().slots, vec!["y"]);
        assert!(schedule.for_date(d(2025, 11, 5)).is_none());
        assert!(schedule.for_date(d(2024, 11, 3)).is_none());
    }

    #[test]
    fn for_month_filters_and_keeps_order() {
        let schedule = Schedule::from_sorted_days(vec![
            merged(d(2025, 11, 28), vec![], "пятница"),
            merged(d(2025, 12, 1), vec![], "понедельник"),
            merged(d(2025, 12, 2), vec![], "вторник"),
        ]);
        let december: Vec<_> = schedule
            .for_month(2025, 12)
            .iter()
            .map(|day| day.date)
            .collect();
        assert_eq!(december, vec![d(2025, 12, 1), d(2025, 12, 2)]);
        assert!(schedule.for_month(2026, 1).is_empty());
    }

    #[test]
    fn empty_class_is_placeholder_not_dropped() {
        let classes = vec![Class::empty(), Class::new("физика", "202")];
        assert_eq!(classes.len(), 2);
        assert!(classes[0].is_empty());
        assert_eq!(format_class(&classes[1]), "202 - физика");
    }
}
