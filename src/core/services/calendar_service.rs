use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::schedule::{
    reconcile_window, DateWindow, MonthKey, PeriodTotals, ReconciledEntry, RecordedTransaction,
    RecurrenceRule,
};

use super::ServiceResult;

/// One day cell of the calendar grid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub entries: Vec<ReconciledEntry>,
}

/// A month of day cells plus the month's reconciled totals. Cells carry
/// data only; rendering belongs to the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarMonth {
    pub key: MonthKey,
    pub days: Vec<CalendarDay>,
    pub totals: PeriodTotals,
    pub skipped_invalid: usize,
}

pub struct CalendarService;

impl CalendarService {
    /// Builds the per-day cells for one month, merging recorded
    /// transactions with projected occurrences.
    pub fn month_grid(
        rules: &[RecurrenceRule],
        recorded: &[RecordedTransaction],
        year: i32,
        month: u32,
        reference: NaiveDate,
    ) -> ServiceResult<CalendarMonth> {
        let window = DateWindow::month(year, month)?;
        let outcome = reconcile_window(rules, recorded, window, reference);
        let mut days: Vec<CalendarDay> = window
            .days()
            .map(|date| CalendarDay {
                date,
                entries: Vec::new(),
            })
            .collect();
        for entry in outcome.entries {
            let slot = (entry.date - window.start).num_days() as usize;
            days[slot].entries.push(entry);
        }
        Ok(CalendarMonth {
            key: MonthKey { year, month },
            days,
            totals: outcome.totals,
            skipped_invalid: outcome.skipped_invalid,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{RuleKind, RulePattern};
    use chrono::NaiveDate;

    #[test]
    fn month_grid_has_one_cell_per_day() {
        let rule = RecurrenceRule::new(
            "Internet",
            60.0,
            RuleKind::Expense,
            RulePattern::Monthly { day_of_month: 12 },
        )
        .expect("valid rule");
        let reference = NaiveDate::from_ymd_opt(2025, 2, 2).unwrap();
        let grid =
            CalendarService::month_grid(&[rule], &[], 2025, 2, reference).expect("month grid");
        assert_eq!(grid.days.len(), 28);
        assert_eq!(grid.days[0].date, NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
    }

    #[test]
    fn month_grid_places_entries_on_their_day() {
        let rule = RecurrenceRule::new(
            "Internet",
            60.0,
            RuleKind::Expense,
            RulePattern::Monthly { day_of_month: 12 },
        )
        .expect("valid rule");
        let reference = NaiveDate::from_ymd_opt(2025, 2, 2).unwrap();
        let grid =
            CalendarService::month_grid(&[rule], &[], 2025, 2, reference).expect("month grid");
        let cell = &grid.days[11];
        assert_eq!(cell.date, NaiveDate::from_ymd_opt(2025, 2, 12).unwrap());
        assert_eq!(cell.entries.len(), 1);
        assert!(cell.entries[0].projected);
        let occupied: usize = grid.days.iter().filter(|day| !day.entries.is_empty()).count();
        assert_eq!(occupied, 1);
    }
}
