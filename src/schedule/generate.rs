use chrono::{Datelike, Duration, NaiveDate};

use super::occurrence::Occurrence;
use super::rule::{RecurrenceRule, RulePattern};
use super::window::DateWindow;

/// Upper bound on occurrences produced for a single rule in one window.
pub const MAX_OCCURRENCES: usize = 1024;

/// Concrete dates on which the pattern fires inside the window.
///
/// Inclusive bounds, ascending order, no duplicates. Deterministic: the
/// result depends only on the pattern and the window.
pub fn occurrence_dates(pattern: &RulePattern, window: DateWindow) -> Vec<NaiveDate> {
    match *pattern {
        RulePattern::Once { date } => {
            if window.contains(date) {
                vec![date]
            } else {
                Vec::new()
            }
        }
        RulePattern::Weekly { anchor } => stepped_dates(anchor, 7, window),
        RulePattern::Biweekly { anchor } => stepped_dates(anchor, 14, window),
        RulePattern::Monthly { day_of_month } => monthly_dates(&[day_of_month], window),
        RulePattern::TwiceMonthly {
            first_day,
            second_day,
        } => {
            let days = [first_day.min(second_day), first_day.max(second_day)];
            monthly_dates(&days, window)
        }
        RulePattern::Yearly {
            month,
            day_of_month,
        } => yearly_dates(month, day_of_month, window),
    }
}

/// Generates the rule's classified occurrences inside the window.
pub fn occurrences_in_window(
    rule: &RecurrenceRule,
    window: DateWindow,
    reference: NaiveDate,
) -> Vec<Occurrence> {
    occurrence_dates(&rule.pattern, window)
        .into_iter()
        .map(|date| Occurrence::from_rule(rule, date, reference))
        .collect()
}

/// Merged calendar feed for a rule set, ordered by date then label.
pub fn forecast_for_window(
    rules: &[RecurrenceRule],
    window: DateWindow,
    reference: NaiveDate,
) -> Vec<Occurrence> {
    let mut occurrences: Vec<Occurrence> = rules
        .iter()
        .flat_map(|rule| occurrences_in_window(rule, window, reference))
        .collect();
    occurrences.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.label.cmp(&b.label)));
    occurrences
}

/// Steps `interval_days` at a time from the anchor. The anchor stays the
/// permanent epoch: the first in-window candidate is computed by whole
/// steps from the anchor, so a window far in the future lands on the same
/// cycle the anchor started.
fn stepped_dates(anchor: NaiveDate, interval_days: i64, window: DateWindow) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let base = window.start.max(anchor);
    let behind = (base - anchor).num_days();
    let steps =
        behind.div_euclid(interval_days) + i64::from(behind.rem_euclid(interval_days) != 0);
    let mut date = anchor + Duration::days(steps * interval_days);
    while date <= window.end && dates.len() < MAX_OCCURRENCES {
        dates.push(date);
        date = date + Duration::days(interval_days);
    }
    dates
}

/// Emits the given days for every month overlapping the window. A day the
/// month does not have is skipped, never clamped to month end.
fn monthly_dates(days: &[u32], window: DateWindow) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    for key in window.months() {
        for &day in days {
            if let Some(date) = NaiveDate::from_ymd_opt(key.year, key.month, day) {
                if window.contains(date) {
                    dates.push(date);
                }
            }
            if dates.len() >= MAX_OCCURRENCES {
                return dates;
            }
        }
    }
    dates
}

fn yearly_dates(month: u32, day_of_month: u32, window: DateWindow) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    for year in window.start.year()..=window.end.year() {
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day_of_month) {
            if window.contains(date) {
                dates.push(date);
            }
        }
    }
    dates
}
