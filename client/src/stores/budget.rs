//! # Budget Store
//!
//! Holds budgets, the category catalog, and the server-computed spending
//! analytics for the selected account.

use chrono::Utc;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::error;

use super::collection::{Collection, Entity, StoreStatus};
use crate::core::error::{AppError, Result};
use crate::core::service::BudgetApi;
use shared::{Budget, BudgetCategory, BudgetRequest, BudgetStatus, SpendingAnalytics};

const FETCH_BUDGETS_FAILED: &str = "Failed to fetch budgets";
const FETCH_ANALYTICS_FAILED: &str = "Failed to fetch analytics";
const CREATE_BUDGET_FAILED: &str = "Failed to create budget";
const UPDATE_BUDGET_FAILED: &str = "Failed to update budget";
const DELETE_BUDGET_FAILED: &str = "Failed to delete budget";

impl Entity for Budget {
    fn entity_id(&self) -> &str {
        &self.id
    }
}

#[derive(Default)]
struct BudgetState {
    budgets: Collection<Budget>,
    categories: Collection<BudgetCategory>,
    analytics: Option<SpendingAnalytics>,
    current: Option<Budget>,
    status: StoreStatus,
}

/// State container for spending budgets.
pub struct BudgetStore {
    api: Arc<dyn BudgetApi>,
    state: RwLock<BudgetState>,
}

impl BudgetStore {
    pub fn new(api: Arc<dyn BudgetApi>) -> Self {
        Self {
            api,
            state: RwLock::new(BudgetState::default()),
        }
    }

    /// Reload the budget list.
    pub async fn fetch_budgets(&self) {
        let token = {
            let mut state = self.state.write();
            state.status.begin();
            state.budgets.begin_load()
        };

        match self.api.get_budgets().await {
            Ok(budgets) => {
                let mut state = self.state.write();
                if state.budgets.commit(token, budgets) {
                    state.status.succeed();
                }
            }
            Err(e) => {
                error!(error = %e, "failed to fetch budgets");
                let mut state = self.state.write();
                if state.budgets.is_current(token) {
                    state.status.fail(FETCH_BUDGETS_FAILED);
                }
            }
        }
    }

    /// Refresh the category catalog. Background fetch.
    pub async fn fetch_categories(&self) {
        let token = self.state.write().categories.begin_load();

        match self.api.get_budget_categories().await {
            Ok(categories) => {
                self.state.write().categories.commit(token, categories);
            }
            Err(e) => error!(error = %e, "failed to fetch categories"),
        }
    }

    /// Load the server-computed analytics for an account.
    pub async fn fetch_analytics(&self, account_id: &str) {
        self.state.write().status.begin();

        match self.api.get_spending_analytics(account_id).await {
            Ok(analytics) => {
                let mut state = self.state.write();
                state.analytics = Some(analytics);
                state.status.succeed();
            }
            Err(e) => {
                error!(error = %e, account_id, "failed to fetch analytics");
                self.state.write().status.fail(FETCH_ANALYTICS_FAILED);
            }
        }
    }

    /// Create a budget; the server's representation is appended.
    pub async fn create_budget(&self, request: BudgetRequest) -> Result<Budget> {
        {
            let mut state = self.state.write();
            if !state.status.begin_write() {
                return Err(AppError::State("budget create already in flight".into()));
            }
            state.status.begin();
        }

        let result = self.api.create_budget(request).await;

        let mut state = self.state.write();
        state.status.end_write();
        match result {
            Ok(budget) => {
                state.budgets.push(budget.clone());
                state.status.succeed();
                Ok(budget)
            }
            Err(e) => {
                error!(error = %e, "failed to create budget");
                state.status.fail(CREATE_BUDGET_FAILED);
                Err(AppError::Api(e))
            }
        }
    }

    /// Update a budget; the element is replaced in place.
    pub async fn update_budget(&self, id: &str, request: BudgetRequest) -> Result<Budget> {
        match self.api.update_budget(id, request).await {
            Ok(updated) => {
                self.state.write().budgets.replace(updated.clone());
                Ok(updated)
            }
            Err(e) => {
                error!(error = %e, id, "failed to update budget");
                self.state.write().status.fail(UPDATE_BUDGET_FAILED);
                Err(AppError::Api(e))
            }
        }
    }

    /// Delete a budget from the server and the held collection.
    pub async fn delete_budget(&self, id: &str) -> Result<()> {
        match self.api.delete_budget(id).await {
            Ok(()) => {
                self.state.write().budgets.remove(id);
                Ok(())
            }
            Err(e) => {
                error!(error = %e, id, "failed to delete budget");
                self.state.write().status.fail(DELETE_BUDGET_FAILED);
                Err(AppError::Api(e))
            }
        }
    }

    pub fn set_current_budget(&self, budget: Option<Budget>) {
        self.state.write().current = budget;
    }

    // ---- snapshot readers ----

    pub fn budgets(&self) -> Vec<Budget> {
        self.state.read().budgets.to_vec()
    }

    pub fn categories(&self) -> Vec<BudgetCategory> {
        self.state.read().categories.to_vec()
    }

    pub fn analytics(&self) -> Option<SpendingAnalytics> {
        self.state.read().analytics.clone()
    }

    pub fn current_budget(&self) -> Option<Budget> {
        self.state.read().current.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().status.is_loading()
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().status.error().map(str::to_string)
    }

    // ---- derived views ----

    /// Budgets whose period has not ended yet.
    pub fn active_budgets(&self) -> Vec<Budget> {
        let now = Utc::now();
        self.state
            .read()
            .budgets
            .items()
            .iter()
            .filter(|b| b.end_date >= now)
            .cloned()
            .collect()
    }

    pub fn exceeded_budgets(&self) -> Vec<Budget> {
        self.by_status(BudgetStatus::Exceeded)
    }

    pub fn warning_budgets(&self) -> Vec<Budget> {
        self.by_status(BudgetStatus::Warning)
    }

    pub fn total_budgeted(&self) -> f64 {
        self.state
            .read()
            .budgets
            .items()
            .iter()
            .map(|b| b.budget_amount)
            .sum()
    }

    pub fn total_spent(&self) -> f64 {
        self.state
            .read()
            .budgets
            .items()
            .iter()
            .map(|b| b.spent_amount)
            .sum()
    }

    fn by_status(&self, status: BudgetStatus) -> Vec<Budget> {
        self.state
            .read()
            .budgets
            .items()
            .iter()
            .filter(|b| b.status == status)
            .cloned()
            .collect()
    }
}
