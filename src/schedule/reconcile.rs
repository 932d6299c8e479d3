use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::aggregate::PeriodTotals;
use super::generate::occurrence_dates;
use super::occurrence::OccurrenceStatus;
use super::rule::RecurrenceRule;
use super::window::DateWindow;

/// An already-posted transaction supplied by the caller. Amounts arrive as
/// raw text from the outer layer and are parsed during reconciliation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordedTransaction {
    pub date: NaiveDate,
    pub amount: String,
    pub label: String,
    pub category_id: Option<Uuid>,
}

impl RecordedTransaction {
    pub fn new(date: NaiveDate, amount: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            date,
            amount: amount.into(),
            label: label.into(),
            category_id: None,
        }
    }

    pub fn with_category(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }
}

/// One line of a reconciled window: either a recorded transaction or a
/// projection implied by a rule's cadence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReconciledEntry {
    pub date: NaiveDate,
    pub label: String,
    pub amount: f64,
    pub category_id: Option<Uuid>,
    pub rule_id: Option<Uuid>,
    pub status: OccurrenceStatus,
    pub projected: bool,
    pub amount_valid: bool,
}

/// Outcome of merging recorded transactions with rule projections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReconciliationResult {
    pub window: DateWindow,
    pub reference_date: NaiveDate,
    pub entries: Vec<ReconciledEntry>,
    pub totals: PeriodTotals,
    pub skipped_invalid: usize,
}

/// Merges recorded transactions with the occurrences each rule expects in
/// the window.
///
/// A projection is suppressed when a recorded transaction carries the same
/// normalized label on the same date, and a rule never projects more
/// occurrences than its cadence minus the recorded transactions matching
/// its label. Recorded amounts that do not parse as non-negative numbers
/// are flagged and excluded from totals instead of aborting the merge.
pub fn reconcile_window(
    rules: &[RecurrenceRule],
    recorded: &[RecordedTransaction],
    window: DateWindow,
    reference: NaiveDate,
) -> ReconciliationResult {
    let mut entries = Vec::new();
    let mut totals = PeriodTotals::default();
    let mut skipped_invalid = 0usize;

    for txn in recorded.iter().filter(|txn| window.contains(txn.date)) {
        let status = OccurrenceStatus::classify(txn.date, reference);
        match parse_amount(&txn.amount) {
            Some(amount) => {
                totals.add(amount, status);
                entries.push(ReconciledEntry {
                    date: txn.date,
                    label: txn.label.clone(),
                    amount,
                    category_id: txn.category_id,
                    rule_id: None,
                    status,
                    projected: false,
                    amount_valid: true,
                });
            }
            None => {
                skipped_invalid += 1;
                debug!(
                    label = %txn.label,
                    date = %txn.date,
                    raw = %txn.amount,
                    "skipping transaction with unparsable amount"
                );
                entries.push(ReconciledEntry {
                    date: txn.date,
                    label: txn.label.clone(),
                    amount: 0.0,
                    category_id: txn.category_id,
                    rule_id: None,
                    status,
                    projected: false,
                    amount_valid: false,
                });
            }
        }
    }

    for rule in rules {
        let expected = occurrence_dates(&rule.pattern, window);
        if expected.is_empty() {
            continue;
        }
        let rule_label = normalize_label(&rule.label);
        let matching: Vec<NaiveDate> = recorded
            .iter()
            .filter(|txn| {
                window.contains(txn.date) && normalize_label(&txn.label) == rule_label
            })
            .map(|txn| txn.date)
            .collect();
        let cap = expected.len().saturating_sub(matching.len());
        let mut surviving: Vec<NaiveDate> = expected
            .into_iter()
            .filter(|date| !matching.contains(date))
            .collect();
        // Recorded dates that drifted off cadence still consume projections,
        // starting with the earliest.
        let excess = surviving.len().saturating_sub(cap);
        if excess > 0 {
            surviving.drain(..excess);
        }
        for date in surviving {
            totals.add(rule.amount, OccurrenceStatus::Pending);
            entries.push(ReconciledEntry {
                date,
                label: rule.label.clone(),
                amount: rule.amount,
                category_id: rule.category_id,
                rule_id: Some(rule.id),
                status: OccurrenceStatus::Pending,
                projected: true,
                amount_valid: true,
            });
        }
    }

    entries.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.label.cmp(&b.label)));
    ReconciliationResult {
        window,
        reference_date: reference,
        entries,
        totals,
        skipped_invalid,
    }
}

fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}

fn parse_amount(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}
