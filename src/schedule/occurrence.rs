use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::rule::{RecurrenceRule, RuleKind};

/// Whether an occurrence falls on or before the reference date.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OccurrenceStatus {
    Occurred,
    Pending,
}

impl OccurrenceStatus {
    /// Same-day occurrences count as occurred. The reference date is always
    /// caller-supplied; the engine never reads the system clock.
    pub fn classify(date: NaiveDate, reference: NaiveDate) -> OccurrenceStatus {
        if date <= reference {
            OccurrenceStatus::Occurred
        } else {
            OccurrenceStatus::Pending
        }
    }

    pub fn is_occurred(&self) -> bool {
        matches!(self, OccurrenceStatus::Occurred)
    }
}

/// A single dated firing of a rule. Always derived on demand, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Occurrence {
    pub rule_id: Uuid,
    pub date: NaiveDate,
    pub amount: f64,
    pub label: String,
    pub kind: RuleKind,
    pub category_id: Option<Uuid>,
    pub status: OccurrenceStatus,
}

impl Occurrence {
    pub(crate) fn from_rule(rule: &RecurrenceRule, date: NaiveDate, reference: NaiveDate) -> Self {
        Self {
            rule_id: rule.id,
            date,
            amount: rule.amount,
            label: rule.label.clone(),
            kind: rule.kind,
            category_id: rule.category_id,
            status: OccurrenceStatus::classify(date, reference),
        }
    }
}
