mod common;

use budget_ledger::domain::{
    Category, MonthKey, PaymentMethod, PeriodLabel, TransactionDraft,
};
use chrono::{Duration, TimeZone, Utc};
use common::{clock_at, memory_engine};

#[test]
fn first_read_of_a_new_month_opens_zero_bucket() {
    let (mut engine, clock) = memory_engine();
    engine.add_income(20_000.0, PaymentMethod::Cash).unwrap();

    clock.set(Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap());
    let bucket = engine.current_month_allocation();
    assert_eq!(bucket.month, PeriodLabel::Month(MonthKey::new(2024, 4).unwrap()));
    assert!(bucket.amounts.is_zero());
    assert_eq!(engine.monthly_series().len(), 2);
}

#[test]
fn repeated_rollover_keeps_one_bucket() {
    let (mut engine, _clock) = memory_engine();
    engine
        .add_transaction(TransactionDraft::expense(300.0, Category::Wants, "Movie"))
        .unwrap();
    let first = engine.current_month_allocation();
    let second = engine.current_month_allocation();
    let explicit = engine.accrue(MonthKey::new(2024, 3).unwrap());
    assert_eq!(first, second);
    assert_eq!(first, explicit);
    assert_eq!(first.wants(), -300.0);
    assert_eq!(engine.monthly_series().len(), 1);
}

#[test]
fn series_is_strictly_ascending() {
    let clock = clock_at(2024, 1, 15);
    let mut engine = budget_ledger::BudgetEngine::new(Default::default(), clock.clone());
    engine.accrue(MonthKey::new(2024, 6).unwrap());
    engine.add_income(1_000.0, PaymentMethod::Online).unwrap();
    clock.set(Utc.with_ymd_and_hms(2024, 3, 2, 8, 0, 0).unwrap());
    engine
        .add_transaction(TransactionDraft::expense(100.0, Category::Needs, "Bus pass"))
        .unwrap();

    let months: Vec<_> = engine
        .monthly_series()
        .iter()
        .filter_map(|bucket| bucket.month_key())
        .map(|month| month.to_string())
        .collect();
    assert_eq!(months, vec!["2024-01", "2024-03", "2024-06"]);
    assert!(engine
        .monthly_series()
        .windows(2)
        .all(|pair| pair[0].month_key() < pair[1].month_key()));
}

#[test]
fn closed_months_are_not_recomputed() {
    let (mut engine, clock) = memory_engine();
    let salary = engine.add_income(10_000.0, PaymentMethod::Cash).unwrap();
    clock.advance(Duration::days(31));
    assert_eq!(engine.current_month().to_string(), "2024-04");

    engine.remove_transaction(salary.id);
    let march = engine.monthly_series()[0];
    assert_eq!(march.needs(), 10_000.0);
    // The baseline is derived from live transactions, not from history.
    assert_eq!(engine.income_baseline(), 0.0);
}

#[test]
fn budget_resets_with_the_month() {
    let (mut engine, clock) = memory_engine();
    engine.add_income(30_000.0, PaymentMethod::Cash).unwrap();
    assert_eq!(engine.budget().needs, 12_000.0);

    clock.set(Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 1).unwrap());
    assert_eq!(engine.budget().needs, 0.0);
    assert_eq!(engine.daily_limit(), 0.0);
}

#[test]
fn accumulated_totals_sum_every_bucket() {
    let (mut engine, clock) = memory_engine();
    engine.add_income(10_000.0, PaymentMethod::Cash).unwrap();
    clock.set(Utc.with_ymd_and_hms(2024, 4, 10, 9, 0, 0).unwrap());
    engine.add_income(5_000.0, PaymentMethod::Online).unwrap();
    engine
        .add_transaction(TransactionDraft::expense(2_000.0, Category::Investments, "Index fund"))
        .unwrap();

    let totals = engine.accumulated_totals();
    assert_eq!(totals.month, PeriodLabel::Total);
    assert_eq!(totals.needs(), 15_000.0);
    assert_eq!(totals.investments(), -2_000.0);
    assert_eq!(totals.wants(), 0.0);
}
