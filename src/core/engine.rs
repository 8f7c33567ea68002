//! Facade that sequences ledger mutations, month accounting, alerts, and persistence.

use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::core::services::{
    AlertService, BudgetOverview, BudgetService, CategorySpend, GoalService, StatusService,
    SummaryService, TransactionService,
};
use crate::core::time::Clock;
use crate::domain::{
    Category, CategoryAmounts, EngineSnapshot, MonthKey, MonthlyAllocation, PaymentMethod,
    SavingsGoal, SavingsGoalDraft, SpendingAlert, SpendingStatus, Transaction, TransactionDraft,
    BudgetPercentages, CURRENT_SCHEMA_VERSION,
};
use crate::errors::{LedgerError, Result};
use crate::ledger::{Ledger, MonthlyHistory};
use crate::storage::SnapshotStore;

/// An engine guarded by one mutex, held for the whole of each public call.
pub type SharedEngine = Arc<Mutex<BudgetEngine>>;

/// A storage failure reported back to the host. Engine state is unaffected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistenceWarning {
    pub operation: &'static str,
    pub message: String,
}

pub struct BudgetEngine {
    ledger: Ledger,
    history: MonthlyHistory,
    percentages: BudgetPercentages,
    goals: Vec<SavingsGoal>,
    alerts: Vec<SpendingAlert>,
    config: Config,
    clock: Arc<dyn Clock>,
    store: Option<Box<dyn SnapshotStore>>,
    warnings: Vec<PersistenceWarning>,
}

impl BudgetEngine {
    /// A fresh engine with no persistence attached.
    pub fn new(config: Config, clock: impl Clock + 'static) -> Self {
        Self::with_clock(config, Arc::new(clock))
    }

    fn with_clock(config: Config, clock: Arc<dyn Clock>) -> Self {
        Self {
            ledger: Ledger::new(),
            history: MonthlyHistory::new(),
            percentages: config.default_percentages,
            goals: Vec::new(),
            alerts: Vec::new(),
            config,
            clock,
            store: None,
            warnings: Vec::new(),
        }
    }

    /// Rehydrates from `store`, starting fresh when nothing usable is stored.
    ///
    /// A payload that cannot be loaded is moved aside with
    /// [`SnapshotStore::quarantine`] before the store is attached, so auto-save never
    /// overwrites it. If it cannot be moved, the engine runs without the store.
    /// Problems are reported through
    /// [`take_persistence_warnings`](Self::take_persistence_warnings).
    pub fn open(config: Config, clock: impl Clock + 'static, store: Box<dyn SnapshotStore>) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(clock);
        let restored = store
            .load()
            .and_then(|loaded| match loaded {
                Some(snapshot) => Self::restore(config.clone(), Arc::clone(&clock), snapshot),
                None => Ok(Self::with_clock(config.clone(), Arc::clone(&clock))),
            });

        let engine = match restored {
            Ok(mut engine) => {
                engine.store = Some(store);
                engine
            }
            Err(err) => {
                let mut engine = Self::with_clock(config, clock);
                engine.record_warning("load", err);
                match store.quarantine() {
                    Ok(()) => engine.store = Some(store),
                    Err(err) => {
                        warn!("unreadable snapshot left in place; auto-save disabled");
                        engine.record_warning("quarantine", err);
                    }
                }
                engine
            }
        };
        info!(
            transactions = engine.ledger.len(),
            months = engine.history.len(),
            goals = engine.goals.len(),
            persisting = engine.store.is_some(),
            "budget engine opened"
        );
        engine
    }

    /// Builds an engine from a snapshot. Income and budgets are recomputed from the
    /// transactions, and stored month history is reconciled against them.
    pub fn from_snapshot(
        config: Config,
        clock: impl Clock + 'static,
        snapshot: EngineSnapshot,
    ) -> Result<Self> {
        Self::restore(config, Arc::new(clock), snapshot)
    }

    fn restore(config: Config, clock: Arc<dyn Clock>, snapshot: EngineSnapshot) -> Result<Self> {
        if snapshot.schema_version > CURRENT_SCHEMA_VERSION {
            return Err(LedgerError::Persistence(format!(
                "snapshot schema v{} is newer than supported v{}",
                snapshot.schema_version, CURRENT_SCHEMA_VERSION
            )));
        }
        snapshot.percentages.validate()?;
        let accruals = snapshot.transactions.iter().map(Transaction::accrual);
        let history = match snapshot.monthly_history {
            Some(rows) => MonthlyHistory::reconcile(rows, accruals, clock.current_month()),
            None => MonthlyHistory::backfill(accruals),
        };
        Ok(Self {
            ledger: Ledger::from_transactions(snapshot.transactions),
            history,
            percentages: snapshot.percentages,
            goals: snapshot.savings_goals,
            alerts: snapshot.alerts,
            config,
            clock,
            store: None,
            warnings: Vec::new(),
        })
    }

    pub fn with_store(mut self, store: Box<dyn SnapshotStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn into_shared(self) -> SharedEngine {
        Arc::new(Mutex::new(self))
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            schema_version: CURRENT_SCHEMA_VERSION,
            transactions: self.ledger.all().to_vec(),
            percentages: self.percentages,
            savings_goals: self.goals.clone(),
            alerts: self.alerts.clone(),
            monthly_history: Some(self.history.series().to_vec()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn current_month(&self) -> MonthKey {
        self.clock.current_month()
    }

    // ----- transactions -------------------------------------------------------------

    /// Records a transaction. For expenses the category is classified against the
    /// budget as it stands after the insert, and an alert is raised if needed.
    pub fn add_transaction(&mut self, draft: TransactionDraft) -> Result<Transaction> {
        let now = self.clock.now();
        let transaction =
            TransactionService::add(&mut self.ledger, &mut self.history, draft, now)?;
        if transaction.is_expense() {
            let evaluation = AlertService::evaluate(
                &self.ledger,
                &self.percentages,
                transaction.category,
                MonthKey::from_datetime(now),
            );
            AlertService::raise(&mut self.alerts, &evaluation, self.config.alert_policy);
        }
        self.persist("add_transaction");
        Ok(transaction)
    }

    /// Records this month's income under `needs`. The payment method only shows up in
    /// the description and the record's metadata.
    pub fn add_income(&mut self, amount: f64, method: PaymentMethod) -> Result<Transaction> {
        let draft =
            TransactionDraft::income(amount, Category::Needs, format!("Monthly Income ({method})"))
                .paid_with(method);
        self.add_transaction(draft)
    }

    pub fn edit_transaction(&mut self, id: Uuid, draft: TransactionDraft) -> Result<Transaction> {
        let current = self.current_month();
        let transaction =
            TransactionService::edit(&mut self.ledger, &mut self.history, id, draft, current)?;
        self.persist("edit_transaction");
        Ok(transaction)
    }

    /// Removes a transaction. Unknown ids are a no-op.
    pub fn remove_transaction(&mut self, id: Uuid) -> Option<Transaction> {
        let current = self.current_month();
        let removed = TransactionService::remove(&mut self.ledger, &mut self.history, id, current);
        if removed.is_some() {
            self.persist("remove_transaction");
        }
        removed
    }

    /// Most recent first.
    pub fn transactions(&self) -> &[Transaction] {
        self.ledger.all()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    // ----- allocation ---------------------------------------------------------------

    pub fn percentages(&self) -> BudgetPercentages {
        self.percentages
    }

    /// Replaces the split atomically. An invalid split leaves the active one in place.
    pub fn set_percentages(&mut self, percentages: BudgetPercentages) -> Result<()> {
        if let Err(err) = BudgetService::check_split(&percentages) {
            warn!(error = %err, "rejected budget split");
            return Err(err);
        }
        self.percentages = percentages;
        self.persist("set_percentages");
        Ok(())
    }

    /// Income recorded in the current UTC month.
    pub fn income_baseline(&self) -> f64 {
        BudgetService::income_baseline(&self.ledger, self.current_month())
    }

    pub fn budget(&self) -> CategoryAmounts {
        BudgetService::current_budget(&self.ledger, &self.percentages, self.clock.as_ref())
    }

    pub fn daily_limit(&self) -> f64 {
        BudgetService::current_daily_limit(self.budget().needs, self.clock.as_ref())
    }

    // ----- month history ------------------------------------------------------------

    /// The bucket for the current month, opening it if this is the month's first read.
    pub fn current_month_allocation(&mut self) -> MonthlyAllocation {
        let month = self.current_month();
        self.accrue(month)
    }

    /// Opens the bucket for `month` if needed and returns it. Idempotent.
    pub fn accrue(&mut self, month: MonthKey) -> MonthlyAllocation {
        let before = self.history.len();
        let bucket = self.history.accrue(month);
        if self.history.len() != before {
            info!(%month, "rolled over to new allocation month");
            self.persist("accrue");
        }
        bucket
    }

    /// Buckets in ascending month order.
    pub fn monthly_series(&self) -> &[MonthlyAllocation] {
        self.history.series()
    }

    pub fn accumulated_totals(&self) -> MonthlyAllocation {
        self.history.accumulated_totals()
    }

    // ----- spending -----------------------------------------------------------------

    pub fn category_spend(&self, category: Category) -> f64 {
        SummaryService::category_spend(&self.ledger, self.current_month(), category)
    }

    pub fn category_status(&self, category: Category) -> SpendingStatus {
        StatusService::classify(self.category_spend(category), self.budget().get(category))
    }

    pub fn spending_overview(&self) -> Vec<CategorySpend> {
        SummaryService::spending_overview(&self.ledger, &self.percentages, self.current_month())
    }

    pub fn overview(&self) -> BudgetOverview {
        SummaryService::overview(&self.ledger, &self.percentages, self.current_month())
    }

    // ----- alerts -------------------------------------------------------------------

    pub fn alerts(&self) -> &[SpendingAlert] {
        &self.alerts
    }

    pub fn dismiss_alert(&mut self, index: usize) -> Option<SpendingAlert> {
        let dismissed = AlertService::dismiss(&mut self.alerts, index);
        if dismissed.is_some() {
            self.persist("dismiss_alert");
        }
        dismissed
    }

    pub fn clear_alerts(&mut self) {
        if !self.alerts.is_empty() {
            self.alerts.clear();
            self.persist("clear_alerts");
        }
    }

    // ----- savings goals ------------------------------------------------------------

    pub fn goals(&self) -> &[SavingsGoal] {
        &self.goals
    }

    pub fn create_goal(&mut self, draft: SavingsGoalDraft) -> Result<SavingsGoal> {
        let goal = GoalService::create(&mut self.goals, draft)?;
        self.persist("create_goal");
        Ok(goal)
    }

    pub fn contribute(&mut self, id: Uuid, amount: f64) -> Result<SavingsGoal> {
        let goal = GoalService::contribute(&mut self.goals, id, amount)?;
        self.persist("contribute");
        Ok(goal)
    }

    /// Deletes a goal. Unknown ids are a no-op.
    pub fn delete_goal(&mut self, id: Uuid) -> Option<SavingsGoal> {
        let removed = GoalService::delete(&mut self.goals, id);
        if removed.is_some() {
            self.persist("delete_goal");
        }
        removed
    }

    pub fn goal_days_remaining(&self, goal: &SavingsGoal) -> i64 {
        goal.days_remaining(self.clock.now())
    }

    // ----- lifecycle ----------------------------------------------------------------

    /// Wipes stored data and returns to the configured defaults.
    pub fn reset(&mut self) {
        if let Some(store) = self.store.as_ref() {
            if let Err(err) = store.clear() {
                self.record_warning("reset", err);
            }
        }
        self.ledger = Ledger::new();
        self.history.clear();
        self.percentages = self.config.default_percentages;
        self.goals.clear();
        self.alerts.clear();
        info!("budget engine reset to defaults");
    }

    /// Drains storage failures collected since the last call.
    pub fn take_persistence_warnings(&mut self) -> Vec<PersistenceWarning> {
        std::mem::take(&mut self.warnings)
    }

    fn persist(&mut self, operation: &'static str) {
        let Some(store) = self.store.as_ref() else {
            return;
        };
        match store.save(&self.snapshot()) {
            Ok(()) => debug!(operation, "snapshot persisted"),
            Err(err) => self.record_warning(operation, err),
        }
    }

    fn record_warning(&mut self, operation: &'static str, err: LedgerError) {
        warn!(operation, error = %err, "persistence failed; in-memory state kept");
        self.warnings.push(PersistenceWarning {
            operation,
            message: err.to_string(),
        });
    }
}
