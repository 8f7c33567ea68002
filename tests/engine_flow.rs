mod common;

use budget_ledger::{
    config::Config,
    core::{services::AlertPolicy, BudgetEngine},
    domain::{
        AlertLevel, BudgetPercentages, Category, CategoryAmounts, PaymentMethod, SavingsGoalDraft,
        SpendingStatus, TransactionDraft,
    },
    errors::LedgerError,
    utils::format_currency,
};
use chrono::NaiveDate;
use common::{clock_at, memory_engine};
use regex::Regex;

fn fifty_thirty_twenty() -> BudgetPercentages {
    BudgetPercentages::new(50.0, 30.0, 20.0)
}

#[test]
fn income_split_and_daily_limit() {
    let (mut engine, _clock) = memory_engine();
    engine.set_percentages(fifty_thirty_twenty()).unwrap();
    engine.add_income(50_000.0, PaymentMethod::Online).unwrap();

    assert_eq!(
        engine.budget(),
        CategoryAmounts::new(25_000.0, 15_000.0, 10_000.0)
    );
    let limit = engine.daily_limit();
    assert!((limit - 806.451_612_9).abs() < 1e-6, "got {limit}");
}

#[test]
fn needs_expense_crosses_warning_then_danger() {
    let (mut engine, _clock) = memory_engine();
    engine.set_percentages(fifty_thirty_twenty()).unwrap();
    engine.add_income(50_000.0, PaymentMethod::Cash).unwrap();

    engine
        .add_transaction(TransactionDraft::expense(21_000.0, Category::Needs, "Rent"))
        .unwrap();
    assert_eq!(engine.category_status(Category::Needs), SpendingStatus::Warning);
    assert_eq!(engine.alerts().len(), 1);
    assert_eq!(engine.alerts()[0].level, AlertLevel::Warning);
    assert_eq!(engine.alerts()[0].category, Category::Needs);

    engine
        .add_transaction(TransactionDraft::expense(5_000.0, Category::Needs, "Repairs"))
        .unwrap();
    assert_eq!(engine.category_status(Category::Needs), SpendingStatus::Danger);
    assert_eq!(engine.alerts().len(), 2);
    assert_eq!(engine.alerts()[1].level, AlertLevel::Danger);
    assert_eq!(engine.alerts()[1].message, "You're exceeding your needs budget!");
}

#[test]
fn once_per_level_policy_suppresses_repeats() {
    let config = Config {
        alert_policy: AlertPolicy::OncePerLevel,
        ..Config::default()
    };
    let mut engine = BudgetEngine::new(config, clock_at(2024, 3, 1));
    engine.set_percentages(fifty_thirty_twenty()).unwrap();
    engine.add_income(50_000.0, PaymentMethod::Cash).unwrap();
    for _ in 0..5 {
        engine
            .add_transaction(TransactionDraft::expense(7_000.0, Category::Needs, "Groceries"))
            .unwrap();
    }
    // 84% warns, 112% and 140% are both danger.
    let levels: Vec<_> = engine.alerts().iter().map(|alert| alert.level).collect();
    assert_eq!(levels, vec![AlertLevel::Warning, AlertLevel::Danger]);
}

#[test]
fn income_does_not_raise_alerts() {
    let (mut engine, _clock) = memory_engine();
    engine.add_income(1_000.0, PaymentMethod::Cash).unwrap();
    assert!(engine.alerts().is_empty());
}

#[test]
fn payment_method_never_changes_budgets() {
    let (mut cash, _) = memory_engine();
    let (mut online, _) = memory_engine();

    cash.add_income(42_000.0, PaymentMethod::Cash).unwrap();
    cash.add_transaction(
        TransactionDraft::expense(3_000.0, Category::Wants, "Dinner").paid_with(PaymentMethod::Cash),
    )
    .unwrap();

    online.add_income(42_000.0, PaymentMethod::Online).unwrap();
    online
        .add_transaction(
            TransactionDraft::expense(3_000.0, Category::Wants, "Dinner")
                .paid_with(PaymentMethod::Online),
        )
        .unwrap();

    assert_eq!(cash.budget(), online.budget());
    assert_eq!(cash.daily_limit(), online.daily_limit());
    assert_eq!(cash.monthly_series(), online.monthly_series());
}

#[test]
fn budget_is_independent_of_insertion_order() {
    let drafts = vec![
        TransactionDraft::income(30_000.0, Category::Needs, "Salary"),
        TransactionDraft::expense(2_500.0, Category::Wants, "Concert"),
        TransactionDraft::income(12_000.0, Category::Investments, "Dividends"),
        TransactionDraft::expense(7_000.0, Category::Needs, "Rent"),
    ];

    let (mut forward, _) = memory_engine();
    for draft in drafts.iter().cloned() {
        forward.add_transaction(draft).unwrap();
    }
    let (mut backward, _) = memory_engine();
    for draft in drafts.into_iter().rev() {
        backward.add_transaction(draft).unwrap();
    }

    assert_eq!(forward.budget(), backward.budget());
    assert_eq!(forward.income_baseline(), 42_000.0);
    assert_eq!(forward.monthly_series(), backward.monthly_series());
}

#[test]
fn rejected_input_leaves_state_untouched() {
    let (mut engine, _clock) = memory_engine();
    let err = engine
        .add_transaction(TransactionDraft::expense(0.0, Category::Needs, "Nothing"))
        .expect_err("zero amount");
    assert!(matches!(err, LedgerError::Validation(_)));
    let err = engine
        .add_transaction(TransactionDraft::expense(10.0, Category::Needs, "   "))
        .expect_err("blank description");
    assert!(err.is_input_error());
    assert!(engine.transactions().is_empty());
    assert!(engine.monthly_series().is_empty());

    let err = engine
        .set_percentages(BudgetPercentages::new(50.0, 30.0, 30.0))
        .expect_err("110%");
    assert!(matches!(err, LedgerError::InvalidSplit(_)));
    assert_eq!(engine.percentages(), BudgetPercentages::default());
}

#[test]
fn edit_moves_amounts_between_categories() {
    let (mut engine, _clock) = memory_engine();
    let txn = engine
        .add_transaction(TransactionDraft::expense(1_200.0, Category::Wants, "Shoes"))
        .unwrap();
    engine
        .edit_transaction(
            txn.id,
            TransactionDraft::expense(1_500.0, Category::Needs, "Work shoes"),
        )
        .unwrap();

    let bucket = engine.current_month_allocation();
    assert_eq!(bucket.wants(), 0.0);
    assert_eq!(bucket.needs(), -1_500.0);
    assert_eq!(engine.transactions()[0].date, txn.date);

    let missing = engine.edit_transaction(
        uuid::Uuid::new_v4(),
        TransactionDraft::expense(1.0, Category::Needs, "Ghost"),
    );
    assert!(matches!(missing, Err(LedgerError::NotFound(_))));
}

#[test]
fn remove_reverses_accrual_and_ignores_unknown_ids() {
    let (mut engine, _clock) = memory_engine();
    let txn = engine.add_income(8_000.0, PaymentMethod::Cash).unwrap();
    assert!(engine.remove_transaction(uuid::Uuid::new_v4()).is_none());
    assert_eq!(engine.remove_transaction(txn.id).map(|t| t.id), Some(txn.id));
    assert_eq!(engine.income_baseline(), 0.0);
    assert!(engine.current_month_allocation().amounts.is_zero());
}

#[test]
fn transactions_are_most_recent_first() {
    let (mut engine, clock) = memory_engine();
    let first = engine.add_income(100.0, PaymentMethod::Cash).unwrap();
    clock.advance(chrono::Duration::hours(1));
    let second = engine
        .add_transaction(TransactionDraft::expense(40.0, Category::Wants, "Snacks"))
        .unwrap();
    let ids: Vec<_> = engine.transactions().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
}

#[test]
fn goals_track_contributions() {
    let (mut engine, _clock) = memory_engine();
    let deadline = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
    let goal = engine
        .create_goal(SavingsGoalDraft::new(
            "Emergency fund",
            10_000.0,
            deadline,
            budget_ledger::domain::GoalHorizon::ShortTerm,
        ))
        .unwrap();
    assert_eq!(goal.current_amount, 0.0);
    assert_eq!(engine.goal_days_remaining(&goal), 10);

    let updated = engine.contribute(goal.id, 2_500.0).unwrap();
    assert_eq!(updated.current_amount, 2_500.0);
    assert_eq!(updated.progress_percent(), 25.0);

    assert!(matches!(
        engine.contribute(goal.id, 0.0),
        Err(LedgerError::Validation(_))
    ));
    assert!(matches!(
        engine.contribute(uuid::Uuid::new_v4(), 10.0),
        Err(LedgerError::NotFound(_))
    ));
    assert!(engine.delete_goal(uuid::Uuid::new_v4()).is_none());
    assert!(engine.delete_goal(goal.id).is_some());
    assert!(engine.goals().is_empty());
}

#[test]
fn overview_formats_for_display() {
    let (mut engine, _clock) = memory_engine();
    engine.add_income(123_456.0, PaymentMethod::Online).unwrap();
    let overview = engine.overview();
    assert_eq!(overview.month.to_string(), "2024-03");
    assert_eq!(overview.categories.len(), 3);

    let symbol = &engine.config().currency_symbol;
    let income = format_currency(overview.income, symbol);
    let pattern = Regex::new(r"^₹\d{1,2}(,\d{2})*,\d{3}$").unwrap();
    assert!(pattern.is_match(&income), "unexpected format {income}");
    assert_eq!(income, "₹1,23,456");
}

#[test]
fn reset_restores_defaults() {
    let (mut engine, _clock) = memory_engine();
    engine.set_percentages(fifty_thirty_twenty()).unwrap();
    engine.add_income(5_000.0, PaymentMethod::Cash).unwrap();
    engine.reset();
    assert!(engine.transactions().is_empty());
    assert!(engine.monthly_series().is_empty());
    assert_eq!(engine.percentages(), BudgetPercentages::default());
}
