//! # Investment Store
//!
//! Holds the portfolio aggregate, the holdings list, and the transaction
//! feed of the holding being viewed. Buy and sell orders move server-side
//! valuations, so both re-sync the portfolio instead of patching figures
//! locally.

use parking_lot::RwLock;
use std::sync::Arc;
use tracing::error;

use super::collection::{Collection, Entity, StoreStatus};
use crate::core::error::{AppError, Result};
use crate::core::service::InvestmentApi;
use shared::{
    BuyInvestmentRequest, Investment, InvestmentTransaction, Portfolio, SellInvestmentRequest,
};

const FETCH_PORTFOLIO_FAILED: &str = "Failed to fetch portfolio";
const FETCH_INVESTMENT_TRANSACTIONS_FAILED: &str = "Failed to fetch investment transactions";
const BUY_INVESTMENT_FAILED: &str = "Failed to buy investment";
const SELL_INVESTMENT_FAILED: &str = "Failed to sell investment";

impl Entity for Investment {
    fn entity_id(&self) -> &str {
        &self.id
    }
}

impl Entity for InvestmentTransaction {
    fn entity_id(&self) -> &str {
        &self.id
    }
}

#[derive(Default)]
struct InvestmentState {
    portfolio: Option<Portfolio>,
    investments: Collection<Investment>,
    current: Option<Investment>,
    transactions: Collection<InvestmentTransaction>,
    status: StoreStatus,
}

/// State container for the investment portfolio.
pub struct InvestmentStore {
    api: Arc<dyn InvestmentApi>,
    state: RwLock<InvestmentState>,
}

impl InvestmentStore {
    pub fn new(api: Arc<dyn InvestmentApi>) -> Self {
        Self {
            api,
            state: RwLock::new(InvestmentState::default()),
        }
    }

    /// Reload the portfolio aggregate. The holdings list is taken from the
    /// portfolio's embedded investments.
    pub async fn fetch_portfolio(&self) {
        let token = {
            let mut state = self.state.write();
            state.status.begin();
            state.investments.begin_load()
        };

        match self.api.get_portfolio().await {
            Ok(portfolio) => {
                let mut state = self.state.write();
                if state.investments.commit(token, portfolio.investments.clone()) {
                    state.portfolio = Some(portfolio);
                    state.status.succeed();
                }
            }
            Err(e) => {
                error!(error = %e, "failed to fetch portfolio");
                let mut state = self.state.write();
                if state.investments.is_current(token) {
                    state.status.fail(FETCH_PORTFOLIO_FAILED);
                }
            }
        }
    }

    /// Load the buy/sell feed for one holding.
    pub async fn fetch_investment_transactions(&self, id: &str) {
        let token = {
            let mut state = self.state.write();
            state.status.begin();
            state.transactions.begin_load()
        };

        match self.api.get_investment_transactions(id).await {
            Ok(transactions) => {
                let mut state = self.state.write();
                if state.transactions.commit(token, transactions) {
                    state.status.succeed();
                }
            }
            Err(e) => {
                error!(error = %e, id, "failed to fetch investment transactions");
                let mut state = self.state.write();
                if state.transactions.is_current(token) {
                    state.status.fail(FETCH_INVESTMENT_TRANSACTIONS_FAILED);
                }
            }
        }
    }

    /// Place a buy order. The returned holding is appended, then the
    /// portfolio is re-synced because totals and diversification moved
    /// server-side.
    pub async fn buy_investment(
        &self,
        symbol: &str,
        quantity: f64,
        account_id: &str,
    ) -> Result<Investment> {
        {
            let mut state = self.state.write();
            if !state.status.begin_write() {
                return Err(AppError::State("buy order already in flight".into()));
            }
            state.status.begin();
        }

        let request = BuyInvestmentRequest {
            symbol: symbol.to_string(),
            quantity,
            account_id: account_id.to_string(),
        };
        let result = self.api.buy_investment(request).await;

        let outcome = {
            let mut state = self.state.write();
            state.status.end_write();
            match result {
                Ok(investment) => {
                    state.investments.push(investment.clone());
                    state.status.succeed();
                    Ok(investment)
                }
                Err(e) => {
                    error!(error = %e, symbol, "failed to buy investment");
                    state.status.fail(BUY_INVESTMENT_FAILED);
                    Err(AppError::Api(e))
                }
            }
        };

        if outcome.is_ok() {
            self.fetch_portfolio().await;
        }
        outcome
    }

    /// Place a sell order, then re-sync the portfolio.
    pub async fn sell_investment(
        &self,
        id: &str,
        quantity: f64,
    ) -> Result<InvestmentTransaction> {
        let result = self
            .api
            .sell_investment(id, SellInvestmentRequest { quantity })
            .await;

        match result {
            Ok(transaction) => {
                self.fetch_portfolio().await;
                Ok(transaction)
            }
            Err(e) => {
                error!(error = %e, id, "failed to sell investment");
                self.state.write().status.fail(SELL_INVESTMENT_FAILED);
                Err(AppError::Api(e))
            }
        }
    }

    pub fn set_current_investment(&self, investment: Option<Investment>) {
        self.state.write().current = investment;
    }

    // ---- snapshot readers ----

    pub fn portfolio(&self) -> Option<Portfolio> {
        self.state.read().portfolio.clone()
    }

    pub fn investments(&self) -> Vec<Investment> {
        self.state.read().investments.to_vec()
    }

    pub fn current_investment(&self) -> Option<Investment> {
        self.state.read().current.clone()
    }

    pub fn transactions(&self) -> Vec<InvestmentTransaction> {
        self.state.read().transactions.to_vec()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().status.is_loading()
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().status.error().map(str::to_string)
    }

    // ---- derived views ----

    /// Portfolio total, zero until the first sync.
    pub fn total_value(&self) -> f64 {
        self.state
            .read()
            .portfolio
            .as_ref()
            .map(|p| p.total_value)
            .unwrap_or(0.0)
    }

    pub fn total_gain_loss(&self) -> f64 {
        self.state
            .read()
            .portfolio
            .as_ref()
            .map(|p| p.total_gain_loss)
            .unwrap_or(0.0)
    }

    pub fn percentage_return(&self) -> f64 {
        self.state
            .read()
            .portfolio
            .as_ref()
            .map(|p| p.percentage_return)
            .unwrap_or(0.0)
    }

    pub fn profitable_investments(&self) -> Vec<Investment> {
        self.state
            .read()
            .investments
            .items()
            .iter()
            .filter(|i| i.total_gain_loss > 0.0)
            .cloned()
            .collect()
    }

    pub fn losing_investments(&self) -> Vec<Investment> {
        self.state
            .read()
            .investments
            .items()
            .iter()
            .filter(|i| i.total_gain_loss < 0.0)
            .cloned()
            .collect()
    }
}
