//! # Account Store
//!
//! Holds the customer's accounts, the currently selected account, and the
//! server-computed summary.

use parking_lot::RwLock;
use std::sync::Arc;
use tracing::error;

use super::collection::{Collection, Entity, StoreStatus};
use crate::core::error::{AppError, Result};
use crate::core::service::AccountApi;
use shared::{Account, AccountRequest, AccountStatus, AccountSummary, AccountType};

const FETCH_ACCOUNTS_FAILED: &str = "Failed to fetch accounts";
const FETCH_ACCOUNT_FAILED: &str = "Failed to fetch account details";
const CREATE_ACCOUNT_FAILED: &str = "Failed to create account";
const UPDATE_ACCOUNT_FAILED: &str = "Failed to update account";
const CLOSE_ACCOUNT_FAILED: &str = "Failed to close account";
const FREEZE_ACCOUNT_FAILED: &str = "Failed to freeze account";
const UNFREEZE_ACCOUNT_FAILED: &str = "Failed to unfreeze account";

impl Entity for Account {
    fn entity_id(&self) -> &str {
        &self.id
    }
}

#[derive(Default)]
struct AccountState {
    accounts: Collection<Account>,
    current: Option<Account>,
    summary: Option<AccountSummary>,
    status: StoreStatus,
}

/// State container for the customer's accounts.
pub struct AccountStore {
    api: Arc<dyn AccountApi>,
    state: RwLock<AccountState>,
}

impl AccountStore {
    pub fn new(api: Arc<dyn AccountApi>) -> Self {
        Self {
            api,
            state: RwLock::new(AccountState::default()),
        }
    }

    /// Reload the account list. On failure the previous snapshot stays
    /// displayed and the store error is set.
    pub async fn fetch_accounts(&self) {
        let token = {
            let mut state = self.state.write();
            state.status.begin();
            state.accounts.begin_load()
        };

        match self.api.get_accounts().await {
            Ok(accounts) => {
                let mut state = self.state.write();
                if state.accounts.commit(token, accounts) {
                    state.status.succeed();
                }
            }
            Err(e) => {
                error!(error = %e, "failed to fetch accounts");
                let mut state = self.state.write();
                if state.accounts.is_current(token) {
                    state.status.fail(FETCH_ACCOUNTS_FAILED);
                }
            }
        }
    }

    /// Load one account into the `current` slot.
    pub async fn fetch_account(&self, id: &str) {
        self.state.write().status.begin();

        match self.api.get_account(id).await {
            Ok(account) => {
                let mut state = self.state.write();
                state.current = Some(account);
                state.status.succeed();
            }
            Err(e) => {
                error!(error = %e, id, "failed to fetch account");
                self.state.write().status.fail(FETCH_ACCOUNT_FAILED);
            }
        }
    }

    /// Refresh the server-computed summary. Background fetch: no loading
    /// flag, failures only reach the diagnostic channel.
    pub async fn fetch_summary(&self) {
        match self.api.get_account_summary().await {
            Ok(summary) => self.state.write().summary = Some(summary),
            Err(e) => error!(error = %e, "failed to fetch account summary"),
        }
    }

    /// Open an account. The server's representation is appended to the
    /// held collection; no re-fetch.
    pub async fn create_account(&self, request: AccountRequest) -> Result<Account> {
        {
            let mut state = self.state.write();
            if !state.status.begin_write() {
                return Err(AppError::State("account create already in flight".into()));
            }
            state.status.begin();
        }

        let result = self.api.create_account(request).await;

        let mut state = self.state.write();
        state.status.end_write();
        match result {
            Ok(account) => {
                state.accounts.push(account.clone());
                state.status.succeed();
                Ok(account)
            }
            Err(e) => {
                error!(error = %e, "failed to create account");
                state.status.fail(CREATE_ACCOUNT_FAILED);
                Err(AppError::Api(e))
            }
        }
    }

    /// Update account details; the element is replaced in place.
    pub async fn update_account(&self, id: &str, request: AccountRequest) -> Result<Account> {
        let result = self.api.update_account(id, request).await;
        self.apply_replace(result, UPDATE_ACCOUNT_FAILED)
    }

    /// Freeze an account.
    pub async fn freeze_account(&self, id: &str) -> Result<Account> {
        let result = self.api.freeze_account(id).await;
        self.apply_replace(result, FREEZE_ACCOUNT_FAILED)
    }

    /// Lift a freeze.
    pub async fn unfreeze_account(&self, id: &str) -> Result<Account> {
        let result = self.api.unfreeze_account(id).await;
        self.apply_replace(result, UNFREEZE_ACCOUNT_FAILED)
    }

    /// Close an account and drop it from the held collection.
    pub async fn close_account(&self, id: &str) -> Result<()> {
        match self.api.close_account(id).await {
            Ok(()) => {
                self.state.write().accounts.remove(id);
                Ok(())
            }
            Err(e) => {
                error!(error = %e, id, "failed to close account");
                self.state.write().status.fail(CLOSE_ACCOUNT_FAILED);
                Err(AppError::Api(e))
            }
        }
    }

    /// Select an account. Identity copy: later collection updates do not
    /// touch the selection.
    pub fn set_current_account(&self, account: Option<Account>) {
        self.state.write().current = account;
    }

    fn apply_replace(&self, result: std::result::Result<Account, String>, fixed: &str) -> Result<Account> {
        match result {
            Ok(updated) => {
                self.state.write().accounts.replace(updated.clone());
                Ok(updated)
            }
            Err(e) => {
                error!(error = %e, "account update failed");
                self.state.write().status.fail(fixed);
                Err(AppError::Api(e))
            }
        }
    }

    // ---- snapshot readers ----

    pub fn accounts(&self) -> Vec<Account> {
        self.state.read().accounts.to_vec()
    }

    pub fn current_account(&self) -> Option<Account> {
        self.state.read().current.clone()
    }

    pub fn summary(&self) -> Option<AccountSummary> {
        self.state.read().summary.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().status.is_loading()
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().status.error().map(str::to_string)
    }

    // ---- derived views, recomputed on every read ----

    pub fn active_accounts(&self) -> Vec<Account> {
        self.state
            .read()
            .accounts
            .items()
            .iter()
            .filter(|account| account.status == AccountStatus::Active)
            .cloned()
            .collect()
    }

    pub fn total_balance(&self) -> f64 {
        self.state
            .read()
            .accounts
            .items()
            .iter()
            .map(|account| account.balance)
            .sum()
    }

    pub fn checking_accounts(&self) -> Vec<Account> {
        self.by_type(AccountType::Checking)
    }

    pub fn savings_accounts(&self) -> Vec<Account> {
        self.by_type(AccountType::Savings)
    }

    fn by_type(&self, account_type: AccountType) -> Vec<Account> {
        self.state
            .read()
            .accounts
            .items()
            .iter()
            .filter(|account| account.account_type == account_type)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use parking_lot::Mutex;

    fn account(id: &str, balance: f64, status: AccountStatus) -> Account {
        Account {
            id: id.to_string(),
            account_number: format!("11002233{}", id),
            account_type: AccountType::Checking,
            account_name: format!("Account {}", id),
            balance,
            currency: "USD".to_string(),
            status,
            opened_date: Utc::now(),
            last_transaction: None,
            interest_rate: None,
            overdraft_limit: None,
        }
    }

    /// Scriptable mock: each slot holds the next response for its method.
    #[derive(Default)]
    struct MockApi {
        accounts: Mutex<Option<std::result::Result<Vec<Account>, String>>>,
        created: Mutex<Option<std::result::Result<Account, String>>>,
        updated: Mutex<Option<std::result::Result<Account, String>>>,
        create_delay_ms: u64,
    }

    impl MockApi {
        fn with_accounts(accounts: Vec<Account>) -> Self {
            Self {
                accounts: Mutex::new(Some(Ok(accounts))),
                ..Default::default()
            }
        }
    }

    #[async_trait::async_trait]
    impl AccountApi for MockApi {
        async fn get_accounts(&self) -> std::result::Result<Vec<Account>, String> {
            self.accounts
                .lock()
                .clone()
                .unwrap_or_else(|| Err("unexpected get_accounts".into()))
        }

        async fn get_account(&self, id: &str) -> std::result::Result<Account, String> {
            Ok(account(id, 0.0, AccountStatus::Active))
        }

        async fn get_account_summary(&self) -> std::result::Result<AccountSummary, String> {
            Err("unexpected get_account_summary".into())
        }

        async fn create_account(
            &self,
            _request: AccountRequest,
        ) -> std::result::Result<Account, String> {
            if self.create_delay_ms > 0 {
                tokio::time::sleep(std::time::Duration::from_millis(self.create_delay_ms)).await;
            }
            self.created
                .lock()
                .clone()
                .unwrap_or_else(|| Err("unexpected create_account".into()))
        }

        async fn update_account(
            &self,
            _id: &str,
            _request: AccountRequest,
        ) -> std::result::Result<Account, String> {
            self.updated
                .lock()
                .clone()
                .unwrap_or_else(|| Err("unexpected update_account".into()))
        }

        async fn close_account(&self, _id: &str) -> std::result::Result<(), String> {
            Ok(())
        }

        async fn freeze_account(&self, id: &str) -> std::result::Result<Account, String> {
            Ok(account(id, 0.0, AccountStatus::Frozen))
        }

        async fn unfreeze_account(&self, id: &str) -> std::result::Result<Account, String> {
            Ok(account(id, 0.0, AccountStatus::Active))
        }
    }

    #[tokio::test]
    async fn successful_fetch_replaces_wholesale_and_clears_error() {
        let api = Arc::new(MockApi::with_accounts(vec![
            account("a1", 100.0, AccountStatus::Active),
            account("a2", 50.0, AccountStatus::Frozen),
        ]));
        let store = AccountStore::new(api.clone());

        store.fetch_accounts().await;

        assert_eq!(store.accounts().len(), 2);
        assert!(!store.is_loading());
        assert_eq!(store.error(), None);

        // Derived views over the fetched snapshot.
        let active = store.active_accounts();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, "a1");
        assert_eq!(store.total_balance(), 150.0);
    }

    #[tokio::test]
    async fn failed_fetch_keeps_stale_snapshot_and_sets_fixed_error() {
        let api = Arc::new(MockApi::with_accounts(vec![account(
            "a1",
            100.0,
            AccountStatus::Active,
        )]));
        let store = AccountStore::new(api.clone());
        store.fetch_accounts().await;

        *api.accounts.lock() = Some(Err("Network error: connection refused".into()));
        store.fetch_accounts().await;

        // Stale-but-displayed: the first snapshot survives.
        assert_eq!(store.accounts().len(), 1);
        assert_eq!(store.accounts()[0].id, "a1");
        assert_eq!(store.error(), Some(FETCH_ACCOUNTS_FAILED.to_string()));
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn fetch_is_idempotent_against_unchanged_backend() {
        let api = Arc::new(MockApi::with_accounts(vec![
            account("a1", 100.0, AccountStatus::Active),
            account("a2", 50.0, AccountStatus::Inactive),
        ]));
        let store = AccountStore::new(api);

        store.fetch_accounts().await;
        let first = store.accounts();
        store.fetch_accounts().await;

        assert_eq!(store.accounts(), first);
        assert_eq!(store.error(), None);
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn create_appends_servers_representation() {
        let api = Arc::new(MockApi::with_accounts(vec![account(
            "a1",
            100.0,
            AccountStatus::Active,
        )]));
        *api.created.lock() = Some(Ok(account("a9", 0.0, AccountStatus::Active)));
        let store = AccountStore::new(api.clone());
        store.fetch_accounts().await;

        let created = store
            .create_account(AccountRequest::default())
            .await
            .unwrap();

        let accounts = store.accounts();
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts.last().unwrap(), &created);
        assert_eq!(store.error(), None);
    }

    #[tokio::test]
    async fn failed_create_records_fixed_error_and_rethrows() {
        let api = Arc::new(MockApi::default());
        *api.created.lock() = Some(Err("Network error: timeout".into()));
        let store = AccountStore::new(api);

        let err = store
            .create_account(AccountRequest::default())
            .await
            .unwrap_err();

        // The caller sees the detailed cause; the store keeps the fixed
        // message only.
        assert!(matches!(err, AppError::Api(ref detail) if detail.contains("timeout")));
        assert_eq!(store.error(), Some(CREATE_ACCOUNT_FAILED.to_string()));
        assert!(store.accounts().is_empty());
    }

    #[tokio::test]
    async fn duplicate_create_is_rejected_while_first_is_in_flight() {
        let api = Arc::new(MockApi {
            created: Mutex::new(Some(Ok(account("a9", 0.0, AccountStatus::Active)))),
            create_delay_ms: 50,
            ..Default::default()
        });
        let store = AccountStore::new(api);

        let (first, second) = tokio::join!(
            store.create_account(AccountRequest::default()),
            store.create_account(AccountRequest::default()),
        );

        assert!(first.is_ok());
        assert!(matches!(second, Err(AppError::State(_))));
        // Exactly one structural change.
        assert_eq!(store.accounts().len(), 1);
    }

    #[tokio::test]
    async fn update_replaces_in_place_preserving_position() {
        let api = Arc::new(MockApi::with_accounts(vec![
            account("a1", 100.0, AccountStatus::Active),
            account("a2", 50.0, AccountStatus::Active),
            account("a3", 25.0, AccountStatus::Active),
        ]));
        *api.updated.lock() = Some(Ok(account("a2", 75.0, AccountStatus::Active)));
        let store = AccountStore::new(api);
        store.fetch_accounts().await;

        store
            .update_account("a2", AccountRequest::default())
            .await
            .unwrap();

        let ids: Vec<String> = store.accounts().iter().map(|a| a.id.clone()).collect();
        assert_eq!(ids, ["a1", "a2", "a3"]);
        assert_eq!(store.accounts()[1].balance, 75.0);
    }

    #[tokio::test]
    async fn update_of_unloaded_account_is_silently_dropped() {
        let api = Arc::new(MockApi::with_accounts(vec![account(
            "a1",
            100.0,
            AccountStatus::Active,
        )]));
        *api.updated.lock() = Some(Ok(account("ghost", 1.0, AccountStatus::Active)));
        let store = AccountStore::new(api);
        store.fetch_accounts().await;

        let result = store.update_account("ghost", AccountRequest::default()).await;

        assert!(result.is_ok());
        let accounts = store.accounts();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].id, "a1");
    }

    #[tokio::test]
    async fn close_removes_account_and_absent_id_is_noop() {
        let api = Arc::new(MockApi::with_accounts(vec![
            account("a1", 100.0, AccountStatus::Active),
            account("a2", 50.0, AccountStatus::Active),
        ]));
        let store = AccountStore::new(api);
        store.fetch_accounts().await;

        store.close_account("a1").await.unwrap();
        assert_eq!(store.accounts().len(), 1);

        store.close_account("a1").await.unwrap();
        assert_eq!(store.accounts().len(), 1);
    }

    #[tokio::test]
    async fn current_selection_is_an_identity_copy() {
        let api = Arc::new(MockApi::with_accounts(vec![account(
            "a1",
            100.0,
            AccountStatus::Active,
        )]));
        *api.updated.lock() = Some(Ok(account("a1", 999.0, AccountStatus::Active)));
        let store = AccountStore::new(api);
        store.fetch_accounts().await;
        store.set_current_account(store.accounts().first().cloned());

        store
            .update_account("a1", AccountRequest::default())
            .await
            .unwrap();

        // Collection moved on; the selection did not.
        assert_eq!(store.accounts()[0].balance, 999.0);
        assert_eq!(store.current_account().unwrap().balance, 100.0);
    }

    #[tokio::test]
    async fn freeze_updates_status_in_place() {
        let api = Arc::new(MockApi::with_accounts(vec![
            account("a1", 100.0, AccountStatus::Active),
            account("a2", 50.0, AccountStatus::Active),
        ]));
        let store = AccountStore::new(api);
        store.fetch_accounts().await;

        store.freeze_account("a2").await.unwrap();

        assert_eq!(store.accounts()[1].status, AccountStatus::Frozen);
        assert_eq!(store.active_accounts().len(), 1);
    }
}
