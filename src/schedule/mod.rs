//! Recurring-event domain models and the projection engine.

pub mod aggregate;
pub mod category;
pub mod generate;
pub mod occurrence;
pub mod reconcile;
pub mod rule;
pub mod window;

pub use aggregate::{
    aggregate_window, category_breakdown, label_breakdown, monthly_breakdown, window_totals,
    AggregationResult, MonthTotals, PeriodTotals,
};
pub use category::{Category, CategorySet, UNCATEGORIZED};
pub use generate::{
    forecast_for_window, occurrence_dates, occurrences_in_window, MAX_OCCURRENCES,
};
pub use occurrence::{Occurrence, OccurrenceStatus};
pub use reconcile::{
    reconcile_window, ReconciledEntry, ReconciliationResult, RecordedTransaction,
};
pub use rule::{RecurrenceRule, RuleKind, RulePattern};
pub use window::{days_in_month, DateWindow, MonthKey};
