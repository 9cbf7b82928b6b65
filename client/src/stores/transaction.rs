//! # Transaction Store
//!
//! Holds the transaction list and the filter it was fetched with. This
//! store is read-only with respect to entities; transactions are created
//! by other domains (transfers, payments) server-side.

use parking_lot::RwLock;
use std::sync::Arc;
use tracing::error;

use super::collection::{Collection, Entity, StoreStatus};
use crate::core::error::{AppError, Result};
use crate::core::service::TransactionApi;
use shared::{Transaction, TransactionFilter, TransactionStatus, TransactionType};

const FETCH_TRANSACTIONS_FAILED: &str = "Failed to fetch transactions";
const FETCH_ACCOUNT_TRANSACTIONS_FAILED: &str = "Failed to fetch account transactions";
const SEARCH_TRANSACTIONS_FAILED: &str = "Failed to search transactions";

/// How many transactions the recent view returns.
const RECENT_COUNT: usize = 10;

impl Entity for Transaction {
    fn entity_id(&self) -> &str {
        &self.id
    }
}

#[derive(Default)]
struct TransactionState {
    transactions: Collection<Transaction>,
    current: Option<Transaction>,
    filter: Option<TransactionFilter>,
    status: StoreStatus,
}

/// State container for account transactions.
pub struct TransactionStore {
    api: Arc<dyn TransactionApi>,
    state: RwLock<TransactionState>,
}

impl TransactionStore {
    pub fn new(api: Arc<dyn TransactionApi>) -> Self {
        Self {
            api,
            state: RwLock::new(TransactionState::default()),
        }
    }

    /// Reload the transaction list, remembering the filter used.
    pub async fn fetch_transactions(&self, filter: Option<TransactionFilter>) {
        let token = {
            let mut state = self.state.write();
            state.status.begin();
            state.filter = filter.clone();
            state.transactions.begin_load()
        };

        match self.api.get_transactions(filter).await {
            Ok(transactions) => {
                let mut state = self.state.write();
                if state.transactions.commit(token, transactions) {
                    state.status.succeed();
                }
            }
            Err(e) => {
                error!(error = %e, "failed to fetch transactions");
                let mut state = self.state.write();
                if state.transactions.is_current(token) {
                    state.status.fail(FETCH_TRANSACTIONS_FAILED);
                }
            }
        }
    }

    /// Reload the list narrowed to one account.
    pub async fn fetch_account_transactions(&self, account_id: &str) {
        let token = {
            let mut state = self.state.write();
            state.status.begin();
            state.transactions.begin_load()
        };

        match self.api.get_account_transactions(account_id).await {
            Ok(transactions) => {
                let mut state = self.state.write();
                if state.transactions.commit(token, transactions) {
                    state.status.succeed();
                }
            }
            Err(e) => {
                error!(error = %e, account_id, "failed to fetch account transactions");
                let mut state = self.state.write();
                if state.transactions.is_current(token) {
                    state.status.fail(FETCH_ACCOUNT_TRANSACTIONS_FAILED);
                }
            }
        }
    }

    /// Replace the list with a search result.
    pub async fn search_transactions(&self, query: &str) {
        let token = {
            let mut state = self.state.write();
            state.status.begin();
            state.transactions.begin_load()
        };

        match self.api.search_transactions(query).await {
            Ok(transactions) => {
                let mut state = self.state.write();
                if state.transactions.commit(token, transactions) {
                    state.status.succeed();
                }
            }
            Err(e) => {
                error!(error = %e, query, "failed to search transactions");
                let mut state = self.state.write();
                if state.transactions.is_current(token) {
                    state.status.fail(SEARCH_TRANSACTIONS_FAILED);
                }
            }
        }
    }

    /// Export the transactions matching the current filter. Passthrough;
    /// the file bytes go straight to the caller.
    pub async fn export(&self, format: &str) -> Result<Vec<u8>> {
        let filter = self.state.read().filter.clone().unwrap_or_default();
        self.api
            .export_transactions(filter, format)
            .await
            .map_err(|e| {
                error!(error = %e, format, "failed to export transactions");
                AppError::Api(e)
            })
    }

    pub fn set_current_transaction(&self, transaction: Option<Transaction>) {
        self.state.write().current = transaction;
    }

    pub fn clear_filter(&self) {
        self.state.write().filter = None;
    }

    // ---- snapshot readers ----

    pub fn transactions(&self) -> Vec<Transaction> {
        self.state.read().transactions.to_vec()
    }

    pub fn current_transaction(&self) -> Option<Transaction> {
        self.state.read().current.clone()
    }

    pub fn filter(&self) -> Option<TransactionFilter> {
        self.state.read().filter.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().status.is_loading()
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().status.error().map(str::to_string)
    }

    // ---- derived views ----

    pub fn debit_transactions(&self) -> Vec<Transaction> {
        self.by_type(TransactionType::Debit)
    }

    pub fn credit_transactions(&self) -> Vec<Transaction> {
        self.by_type(TransactionType::Credit)
    }

    pub fn pending_transactions(&self) -> Vec<Transaction> {
        self.state
            .read()
            .transactions
            .items()
            .iter()
            .filter(|t| t.status == TransactionStatus::Pending)
            .cloned()
            .collect()
    }

    /// The first ten transactions in list order.
    pub fn recent_transactions(&self) -> Vec<Transaction> {
        self.state
            .read()
            .transactions
            .items()
            .iter()
            .take(RECENT_COUNT)
            .cloned()
            .collect()
    }

    pub fn total_debit(&self) -> f64 {
        self.sum_by_type(TransactionType::Debit)
    }

    pub fn total_credit(&self) -> f64 {
        self.sum_by_type(TransactionType::Credit)
    }

    fn by_type(&self, transaction_type: TransactionType) -> Vec<Transaction> {
        self.state
            .read()
            .transactions
            .items()
            .iter()
            .filter(|t| t.transaction_type == transaction_type)
            .cloned()
            .collect()
    }

    fn sum_by_type(&self, transaction_type: TransactionType) -> f64 {
        self.state
            .read()
            .transactions
            .items()
            .iter()
            .filter(|t| t.transaction_type == transaction_type)
            .map(|t| t.amount)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use parking_lot::Mutex;
    use shared::TransactionCategory;

    fn transaction(id: &str, kind: TransactionType, amount: f64) -> Transaction {
        Transaction {
            id: id.to_string(),
            account_id: "a1".to_string(),
            transaction_type: kind,
            category: TransactionCategory::Payment,
            amount,
            currency: "USD".to_string(),
            description: "coffee".to_string(),
            date: Utc::now(),
            status: TransactionStatus::Completed,
            balance: 1000.0,
            reference: None,
            merchant: None,
            location: None,
        }
    }

    #[derive(Default)]
    struct MockApi {
        transactions: Mutex<Option<std::result::Result<Vec<Transaction>, String>>>,
        export: Mutex<Option<std::result::Result<Vec<u8>, String>>>,
        seen_filter: Mutex<Option<TransactionFilter>>,
    }

    #[async_trait::async_trait]
    impl TransactionApi for MockApi {
        async fn get_transactions(
            &self,
            filter: Option<TransactionFilter>,
        ) -> std::result::Result<Vec<Transaction>, String> {
            *self.seen_filter.lock() = filter;
            self.transactions
                .lock()
                .clone()
                .unwrap_or_else(|| Err("unexpected get_transactions".into()))
        }

        async fn get_account_transactions(
            &self,
            _account_id: &str,
        ) -> std::result::Result<Vec<Transaction>, String> {
            self.transactions
                .lock()
                .clone()
                .unwrap_or_else(|| Err("unexpected get_account_transactions".into()))
        }

        async fn search_transactions(
            &self,
            _query: &str,
        ) -> std::result::Result<Vec<Transaction>, String> {
            self.transactions
                .lock()
                .clone()
                .unwrap_or_else(|| Err("unexpected search_transactions".into()))
        }

        async fn export_transactions(
            &self,
            filter: TransactionFilter,
            _format: &str,
        ) -> std::result::Result<Vec<u8>, String> {
            *self.seen_filter.lock() = Some(filter);
            self.export
                .lock()
                .clone()
                .unwrap_or_else(|| Err("unexpected export_transactions".into()))
        }
    }

    #[tokio::test]
    async fn fetch_remembers_filter_and_views_split_by_type() {
        let api = Arc::new(MockApi {
            transactions: Mutex::new(Some(Ok(vec![
                transaction("t1", TransactionType::Debit, 40.0),
                transaction("t2", TransactionType::Credit, 100.0),
                transaction("t3", TransactionType::Debit, 60.0),
            ]))),
            ..Default::default()
        });
        let store = TransactionStore::new(api.clone());

        let filter = TransactionFilter {
            account_id: Some("a1".to_string()),
            ..Default::default()
        };
        store.fetch_transactions(Some(filter.clone())).await;

        assert_eq!(store.filter(), Some(filter.clone()));
        assert_eq!(*api.seen_filter.lock(), Some(filter));
        assert_eq!(store.debit_transactions().len(), 2);
        assert_eq!(store.credit_transactions().len(), 1);
        assert_eq!(store.total_debit(), 100.0);
        assert_eq!(store.total_credit(), 100.0);
    }

    #[tokio::test]
    async fn recent_view_caps_at_ten() {
        let items: Vec<Transaction> = (0..15)
            .map(|i| transaction(&format!("t{}", i), TransactionType::Debit, 1.0))
            .collect();
        let api = Arc::new(MockApi {
            transactions: Mutex::new(Some(Ok(items))),
            ..Default::default()
        });
        let store = TransactionStore::new(api);
        store.fetch_transactions(None).await;

        let recent = store.recent_transactions();
        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0].id, "t0");
    }

    #[tokio::test]
    async fn failed_search_keeps_previous_results() {
        let api = Arc::new(MockApi {
            transactions: Mutex::new(Some(Ok(vec![transaction(
                "t1",
                TransactionType::Debit,
                40.0,
            )]))),
            ..Default::default()
        });
        let store = TransactionStore::new(api.clone());
        store.fetch_transactions(None).await;

        *api.transactions.lock() = Some(Err("Network error: reset".into()));
        store.search_transactions("coffee").await;

        assert_eq!(store.transactions().len(), 1);
        assert_eq!(store.error(), Some(SEARCH_TRANSACTIONS_FAILED.to_string()));
    }

    #[tokio::test]
    async fn export_uses_the_stored_filter() {
        let api = Arc::new(MockApi {
            transactions: Mutex::new(Some(Ok(vec![]))),
            export: Mutex::new(Some(Ok(b"id,amount\n".to_vec()))),
            ..Default::default()
        });
        let store = TransactionStore::new(api.clone());
        store
            .fetch_transactions(Some(TransactionFilter {
                account_id: Some("a1".to_string()),
                ..Default::default()
            }))
            .await;

        let bytes = store.export("csv").await.unwrap();

        assert_eq!(bytes, b"id,amount\n");
        assert_eq!(
            api.seen_filter.lock().as_ref().unwrap().account_id.as_deref(),
            Some("a1")
        );
    }
}
