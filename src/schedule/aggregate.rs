use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::category::CategorySet;
use super::occurrence::{Occurrence, OccurrenceStatus};
use super::rule::RuleKind;
use super::window::MonthKey;

/// Occurred/pending amount buckets for a window.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct PeriodTotals {
    pub occurred: f64,
    pub pending: f64,
}

impl PeriodTotals {
    pub fn total(&self) -> f64 {
        self.occurred + self.pending
    }

    pub(crate) fn add(&mut self, amount: f64, status: OccurrenceStatus) {
        match status {
            OccurrenceStatus::Occurred => self.occurred += amount,
            OccurrenceStatus::Pending => self.pending += amount,
        }
    }
}

/// Income/expense/net totals for one calendar month.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct MonthTotals {
    pub income: f64,
    pub expenses: f64,
    pub net: f64,
}

impl MonthTotals {
    fn add(&mut self, amount: f64, kind: RuleKind) {
        match kind {
            RuleKind::Income => self.income += amount,
            RuleKind::Expense => self.expenses += amount,
        }
        self.net = self.income - self.expenses;
    }
}

/// Window totals plus the optional groupings report consumers ask for.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AggregationResult {
    pub totals: PeriodTotals,
    pub by_category: BTreeMap<String, PeriodTotals>,
    pub by_month: BTreeMap<MonthKey, MonthTotals>,
}

/// Sums occurrences into occurred/pending buckets. Status is recomputed
/// from each occurrence date against `reference`, so totals agree exactly
/// whether a window is aggregated whole or in per-day pieces.
pub fn window_totals(occurrences: &[Occurrence], reference: NaiveDate) -> PeriodTotals {
    let mut totals = PeriodTotals::default();
    for occurrence in occurrences {
        totals.add(
            occurrence.amount,
            OccurrenceStatus::classify(occurrence.date, reference),
        );
    }
    totals
}

/// Per-label occurred/pending totals, keyed by display label.
pub fn label_breakdown(
    occurrences: &[Occurrence],
    reference: NaiveDate,
) -> BTreeMap<String, PeriodTotals> {
    let mut buckets: BTreeMap<String, PeriodTotals> = BTreeMap::new();
    for occurrence in occurrences {
        buckets.entry(occurrence.label.clone()).or_default().add(
            occurrence.amount,
            OccurrenceStatus::classify(occurrence.date, reference),
        );
    }
    buckets
}

/// Per-category occurred/pending totals. Unknown or missing category
/// references fall into the uncategorized bucket rather than failing.
pub fn category_breakdown(
    occurrences: &[Occurrence],
    reference: NaiveDate,
    categories: &CategorySet,
) -> BTreeMap<String, PeriodTotals> {
    let mut buckets: BTreeMap<String, PeriodTotals> = BTreeMap::new();
    for occurrence in occurrences {
        let bucket = categories.bucket_name(occurrence.category_id);
        buckets.entry(bucket).or_default().add(
            occurrence.amount,
            OccurrenceStatus::classify(occurrence.date, reference),
        );
    }
    buckets
}

/// Income/expense/net totals per calendar month.
pub fn monthly_breakdown(occurrences: &[Occurrence]) -> BTreeMap<MonthKey, MonthTotals> {
    let mut buckets: BTreeMap<MonthKey, MonthTotals> = BTreeMap::new();
    for occurrence in occurrences {
        buckets
            .entry(MonthKey::from_date(occurrence.date))
            .or_default()
            .add(occurrence.amount, occurrence.kind);
    }
    buckets
}

/// All-in-one aggregation entry point. The category grouping is filled
/// only when a category set is supplied.
pub fn aggregate_window(
    occurrences: &[Occurrence],
    reference: NaiveDate,
    categories: Option<&CategorySet>,
) -> AggregationResult {
    let totals = window_totals(occurrences, reference);
    let by_category = match categories {
        Some(set) => category_breakdown(occurrences, reference, set),
        None => BTreeMap::new(),
    };
    let by_month = monthly_breakdown(occurrences);
    AggregationResult {
        totals,
        by_category,
        by_month,
    }
}
