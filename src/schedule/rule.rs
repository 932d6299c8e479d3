use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ScheduleError;

/// Direction of money flow for a rule.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RuleKind {
    Income,
    Expense,
}

/// How a rule repeats on the calendar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RulePattern {
    /// Fires exactly once.
    Once { date: NaiveDate },
    /// Every 7 days from the anchor, forward only.
    Weekly { anchor: NaiveDate },
    /// Every 14 days from the anchor. The anchor is the permanent parity
    /// epoch: skipping a window far forward never flips which weeks fire.
    Biweekly { anchor: NaiveDate },
    /// Once per month on the given day. Months without that day are
    /// skipped, never clamped to month end.
    Monthly { day_of_month: u32 },
    /// Monthly applied independently to two distinct days.
    TwiceMonthly { first_day: u32, second_day: u32 },
    Yearly { month: u32, day_of_month: u32 },
}

impl RulePattern {
    fn validate(&self) -> Result<(), ScheduleError> {
        match *self {
            RulePattern::Once { .. }
            | RulePattern::Weekly { .. }
            | RulePattern::Biweekly { .. } => Ok(()),
            RulePattern::Monthly { day_of_month } => check_day(day_of_month),
            RulePattern::TwiceMonthly {
                first_day,
                second_day,
            } => {
                check_day(first_day)?;
                check_day(second_day)?;
                if first_day == second_day {
                    return Err(ScheduleError::InvalidRule(
                        "twice-monthly days must differ".into(),
                    ));
                }
                Ok(())
            }
            RulePattern::Yearly {
                month,
                day_of_month,
            } => {
                if !(1..=12).contains(&month) {
                    return Err(ScheduleError::InvalidRule(format!(
                        "month {month} out of range"
                    )));
                }
                check_day(day_of_month)
            }
        }
    }
}

fn check_day(day: u32) -> Result<(), ScheduleError> {
    if (1..=31).contains(&day) {
        Ok(())
    } else {
        Err(ScheduleError::InvalidRule(format!(
            "day of month {day} out of range"
        )))
    }
}

/// A recurring income source or bill.
///
/// Rules are immutable once constructed; an edit replaces the rule rather
/// than rewriting occurrences already reported as occurred.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecurrenceRule {
    pub id: Uuid,
    pub label: String,
    pub amount: f64,
    pub kind: RuleKind,
    pub category_id: Option<Uuid>,
    pub pattern: RulePattern,
}

impl RecurrenceRule {
    pub fn new(
        label: impl Into<String>,
        amount: f64,
        kind: RuleKind,
        pattern: RulePattern,
    ) -> Result<Self, ScheduleError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(ScheduleError::InvalidRule(format!(
                "amount {amount} must be a non-negative number"
            )));
        }
        pattern.validate()?;
        Ok(Self {
            id: Uuid::new_v4(),
            label: label.into(),
            amount,
            kind,
            category_id: None,
            pattern,
        })
    }

    pub fn with_category(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn is_income(&self) -> bool {
        matches!(self.kind, RuleKind::Income)
    }
}
