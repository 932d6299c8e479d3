use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::schedule::{
    aggregate_window, forecast_for_window, label_breakdown, monthly_breakdown, reconcile_window,
    AggregationResult, CategorySet, DateWindow, MonthKey, MonthTotals, PeriodTotals,
    ReconciledEntry, RecordedTransaction, RecurrenceRule, RuleKind,
};

use super::ServiceResult;

/// Reconciled view of one calendar month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthReport {
    pub key: MonthKey,
    pub window: DateWindow,
    pub entries: Vec<ReconciledEntry>,
    pub totals: PeriodTotals,
    pub skipped_invalid: usize,
}

/// Twelve month rows plus year totals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnnualReport {
    pub year: i32,
    pub months: Vec<MonthRow>,
    pub totals: MonthTotals,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MonthRow {
    pub key: MonthKey,
    pub totals: MonthTotals,
}

/// Aggregation over an arbitrary window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RangeReport {
    pub window: DateWindow,
    pub result: AggregationResult,
}

pub struct ReportService;

impl ReportService {
    /// Month view with recorded transactions merged against rule cadences.
    pub fn month_report(
        rules: &[RecurrenceRule],
        recorded: &[RecordedTransaction],
        year: i32,
        month: u32,
        reference: NaiveDate,
    ) -> ServiceResult<MonthReport> {
        let window = DateWindow::month(year, month)?;
        let outcome = reconcile_window(rules, recorded, window, reference);
        debug!(
            year,
            month,
            entries = outcome.entries.len(),
            "built month report"
        );
        Ok(MonthReport {
            key: MonthKey { year, month },
            window,
            entries: outcome.entries,
            totals: outcome.totals,
            skipped_invalid: outcome.skipped_invalid,
        })
    }

    /// Income/expense/net per month across a full calendar year.
    pub fn annual_report(
        rules: &[RecurrenceRule],
        year: i32,
        reference: NaiveDate,
    ) -> ServiceResult<AnnualReport> {
        let window = DateWindow::year(year)?;
        let occurrences = forecast_for_window(rules, window, reference);
        let breakdown = monthly_breakdown(&occurrences);
        let mut months = Vec::with_capacity(12);
        let mut totals = MonthTotals::default();
        for month in 1..=12 {
            let key = MonthKey { year, month };
            let month_totals = breakdown.get(&key).copied().unwrap_or_default();
            totals.income += month_totals.income;
            totals.expenses += month_totals.expenses;
            months.push(MonthRow {
                key,
                totals: month_totals,
            });
        }
        totals.net = totals.income - totals.expenses;
        debug!(year, "built annual report");
        Ok(AnnualReport {
            year,
            months,
            totals,
        })
    }

    /// Aggregated totals for an arbitrary window, with category grouping
    /// when a category set is supplied.
    pub fn range_report(
        rules: &[RecurrenceRule],
        window: DateWindow,
        reference: NaiveDate,
        categories: Option<&CategorySet>,
    ) -> RangeReport {
        let occurrences = forecast_for_window(rules, window, reference);
        RangeReport {
            window,
            result: aggregate_window(&occurrences, reference, categories),
        }
    }

    /// Per-source occurred/pending totals for income rules only.
    pub fn income_report(
        rules: &[RecurrenceRule],
        window: DateWindow,
        reference: NaiveDate,
    ) -> BTreeMap<String, PeriodTotals> {
        Self::kind_breakdown(rules, window, reference, RuleKind::Income)
    }

    /// Per-bill occurred/pending totals for expense rules only.
    pub fn expense_report(
        rules: &[RecurrenceRule],
        window: DateWindow,
        reference: NaiveDate,
    ) -> BTreeMap<String, PeriodTotals> {
        Self::kind_breakdown(rules, window, reference, RuleKind::Expense)
    }

    fn kind_breakdown(
        rules: &[RecurrenceRule],
        window: DateWindow,
        reference: NaiveDate,
        kind: RuleKind,
    ) -> BTreeMap<String, PeriodTotals> {
        let filtered: Vec<RecurrenceRule> = rules
            .iter()
            .filter(|rule| rule.kind == kind)
            .cloned()
            .collect();
        let occurrences = forecast_for_window(&filtered, window, reference);
        label_breakdown(&occurrences, reference)
    }
}
