use cadence_core::schedule::{
    reconcile_window, DateWindow, OccurrenceStatus, RecordedTransaction, RecurrenceRule, RuleKind,
    RulePattern,
};
use chrono::NaiveDate;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn rent_rule() -> RecurrenceRule {
    RecurrenceRule::new(
        "Rent",
        1500.0,
        RuleKind::Expense,
        RulePattern::Monthly { day_of_month: 1 },
    )
    .unwrap()
}

fn march() -> DateWindow {
    DateWindow::new(date(2025, 3, 1), date(2025, 3, 31)).unwrap()
}

#[test]
fn recorded_transaction_suppresses_matching_projection() {
    let recorded = vec![RecordedTransaction::new(date(2025, 3, 1), "1500", "Rent")];
    let outcome = reconcile_window(&[rent_rule()], &recorded, march(), date(2025, 3, 15));

    let rent_entries: Vec<_> = outcome
        .entries
        .iter()
        .filter(|entry| entry.label.eq_ignore_ascii_case("rent"))
        .collect();
    assert_eq!(rent_entries.len(), 1, "projection must be deduplicated");
    assert!(!rent_entries[0].projected);
    assert_eq!(rent_entries[0].status, OccurrenceStatus::Occurred);
}

#[test]
fn dedup_normalizes_labels() {
    let recorded = vec![RecordedTransaction::new(date(2025, 3, 1), "1500", "  rent ")];
    let outcome = reconcile_window(&[rent_rule()], &recorded, march(), date(2025, 3, 15));
    assert_eq!(outcome.entries.len(), 1);
    assert!(!outcome.entries[0].projected);
}

#[test]
fn unmatched_expectation_becomes_pending_projection() {
    let outcome = reconcile_window(&[rent_rule()], &[], march(), date(2025, 3, 15));
    assert_eq!(outcome.entries.len(), 1);
    let entry = &outcome.entries[0];
    assert!(entry.projected);
    assert_eq!(entry.date, date(2025, 3, 1));
    // Projections stay pending even when their date is already behind the
    // reference: nothing has actually been posted.
    assert_eq!(entry.status, OccurrenceStatus::Pending);
    assert_eq!(outcome.totals.pending, 1500.0);
    assert_eq!(outcome.totals.occurred, 0.0);
}

#[test]
fn drifted_recorded_date_still_consumes_the_projection() {
    // Rent posted late, on the 3rd instead of the 1st. The date-keyed dedup
    // misses it, but the cadence cap keeps the month at a single entry.
    let recorded = vec![RecordedTransaction::new(date(2025, 3, 3), "1500", "Rent")];
    let outcome = reconcile_window(&[rent_rule()], &recorded, march(), date(2025, 3, 15));

    assert_eq!(outcome.entries.len(), 1);
    assert!(!outcome.entries[0].projected);
    assert_eq!(outcome.entries[0].date, date(2025, 3, 3));
}

#[test]
fn cap_drops_earliest_surviving_projections() {
    let window = DateWindow::new(date(2025, 1, 1), date(2025, 3, 31)).unwrap();
    let recorded = vec![
        RecordedTransaction::new(date(2025, 1, 1), "1500", "Rent"),
        RecordedTransaction::new(date(2025, 2, 2), "1500", "Rent"),
    ];
    let outcome = reconcile_window(&[rent_rule()], &recorded, window, date(2025, 2, 10));

    // Cadence expects Jan 1, Feb 1, Mar 1. Jan 1 matched exactly; the
    // drifted Feb posting consumes the Feb 1 projection, leaving March.
    let projected: Vec<_> = outcome
        .entries
        .iter()
        .filter(|entry| entry.projected)
        .collect();
    assert_eq!(projected.len(), 1);
    assert_eq!(projected[0].date, date(2025, 3, 1));
    assert_eq!(outcome.entries.len(), 3, "two recorded plus one projection");
}

#[test]
fn extra_recorded_transactions_never_go_negative() {
    let recorded = vec![
        RecordedTransaction::new(date(2025, 3, 1), "1500", "Rent"),
        RecordedTransaction::new(date(2025, 3, 18), "1500", "Rent"),
    ];
    let outcome = reconcile_window(&[rent_rule()], &recorded, march(), date(2025, 3, 20));
    assert!(outcome.entries.iter().all(|entry| !entry.projected));
    assert_eq!(outcome.entries.len(), 2);
}

#[test]
fn unparsable_amount_is_flagged_and_excluded() {
    let recorded = vec![
        RecordedTransaction::new(date(2025, 3, 1), "1500", "Rent"),
        RecordedTransaction::new(date(2025, 3, 10), "n/a", "Groceries"),
        RecordedTransaction::new(date(2025, 3, 12), "-44", "Refund"),
    ];
    let outcome = reconcile_window(&[rent_rule()], &recorded, march(), date(2025, 3, 15));

    assert_eq!(outcome.skipped_invalid, 2);
    assert_eq!(outcome.totals.occurred, 1500.0);
    let invalid: Vec<_> = outcome
        .entries
        .iter()
        .filter(|entry| !entry.amount_valid)
        .collect();
    assert_eq!(invalid.len(), 2);
    assert!(invalid.iter().all(|entry| entry.amount == 0.0));
}

#[test]
fn recorded_outside_window_is_ignored() {
    let recorded = vec![RecordedTransaction::new(date(2025, 4, 1), "1500", "Rent")];
    let outcome = reconcile_window(&[rent_rule()], &recorded, march(), date(2025, 3, 15));
    // The April posting neither appears nor suppresses March's projection.
    assert_eq!(outcome.entries.len(), 1);
    assert!(outcome.entries[0].projected);
}

#[test]
fn entries_are_sorted_by_date() {
    let rules = vec![
        rent_rule(),
        RecurrenceRule::new(
            "Salary",
            4739.0,
            RuleKind::Income,
            RulePattern::Monthly { day_of_month: 15 },
        )
        .unwrap(),
    ];
    let recorded = vec![RecordedTransaction::new(date(2025, 3, 20), "80", "Dinner")];
    let outcome = reconcile_window(&rules, &recorded, march(), date(2025, 3, 21));
    let dates: Vec<_> = outcome.entries.iter().map(|entry| entry.date).collect();
    let mut sorted = dates.clone();
    sorted.sort();
    assert_eq!(dates, sorted);
}
