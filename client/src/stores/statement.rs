//! # Statement Store
//!
//! Holds the statements of the account being viewed. Downloads are pure
//! passthroughs; the opaque file bytes never enter store state.

use parking_lot::RwLock;
use std::sync::Arc;
use tracing::error;

use super::collection::{Collection, Entity, StoreStatus};
use crate::core::error::{AppError, Result};
use crate::core::service::StatementApi;
use shared::{EmailStatementRequest, Statement, StatementFormat, StatementRequest};

const FETCH_STATEMENTS_FAILED: &str = "Failed to fetch statements";
const FETCH_STATEMENT_FAILED: &str = "Failed to fetch statement details";
const GENERATE_STATEMENT_FAILED: &str = "Failed to generate statement";

impl Entity for Statement {
    fn entity_id(&self) -> &str {
        &self.id
    }
}

#[derive(Default)]
struct StatementState {
    statements: Collection<Statement>,
    current: Option<Statement>,
    status: StoreStatus,
}

/// State container for account statements.
pub struct StatementStore {
    api: Arc<dyn StatementApi>,
    state: RwLock<StatementState>,
}

impl StatementStore {
    pub fn new(api: Arc<dyn StatementApi>) -> Self {
        Self {
            api,
            state: RwLock::new(StatementState::default()),
        }
    }

    /// Reload the statements of one account.
    pub async fn fetch_statements(&self, account_id: &str) {
        let token = {
            let mut state = self.state.write();
            state.status.begin();
            state.statements.begin_load()
        };

        match self.api.get_statements(account_id).await {
            Ok(statements) => {
                let mut state = self.state.write();
                if state.statements.commit(token, statements) {
                    state.status.succeed();
                }
            }
            Err(e) => {
                error!(error = %e, account_id, "failed to fetch statements");
                let mut state = self.state.write();
                if state.statements.is_current(token) {
                    state.status.fail(FETCH_STATEMENTS_FAILED);
                }
            }
        }
    }

    /// Load one statement into the `current` slot.
    pub async fn fetch_statement(&self, id: &str) {
        self.state.write().status.begin();

        match self.api.get_statement(id).await {
            Ok(statement) => {
                let mut state = self.state.write();
                state.current = Some(statement);
                state.status.succeed();
            }
            Err(e) => {
                error!(error = %e, id, "failed to fetch statement");
                self.state.write().status.fail(FETCH_STATEMENT_FAILED);
            }
        }
    }

    /// Ask the server to generate a statement; the result is prepended so
    /// the newest statement lists first.
    pub async fn generate_statement(&self, request: StatementRequest) -> Result<Statement> {
        {
            let mut state = self.state.write();
            if !state.status.begin_write() {
                return Err(AppError::State(
                    "statement generation already in flight".into(),
                ));
            }
            state.status.begin();
        }

        let result = self.api.generate_statement(request).await;

        let mut state = self.state.write();
        state.status.end_write();
        match result {
            Ok(statement) => {
                state.statements.push_front(statement.clone());
                state.status.succeed();
                Ok(statement)
            }
            Err(e) => {
                error!(error = %e, "failed to generate statement");
                state.status.fail(GENERATE_STATEMENT_FAILED);
                Err(AppError::Api(e))
            }
        }
    }

    /// Download the statement file. Passthrough; the bytes go straight to
    /// the caller.
    pub async fn download_statement(&self, id: &str) -> Result<Vec<u8>> {
        self.api.download_statement(id).await.map_err(|e| {
            error!(error = %e, id, "failed to download statement");
            AppError::Api(e)
        })
    }

    /// Ask the server to email a statement. Passthrough.
    pub async fn email_statement(&self, id: &str, email: &str) -> Result<()> {
        self.api
            .email_statement(
                id,
                EmailStatementRequest {
                    email: email.to_string(),
                },
            )
            .await
            .map_err(|e| {
                error!(error = %e, id, "failed to email statement");
                AppError::Api(e)
            })
    }

    pub fn set_current_statement(&self, statement: Option<Statement>) {
        self.state.write().current = statement;
    }

    // ---- snapshot readers ----

    pub fn statements(&self) -> Vec<Statement> {
        self.state.read().statements.to_vec()
    }

    pub fn current_statement(&self) -> Option<Statement> {
        self.state.read().current.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().status.is_loading()
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().status.error().map(str::to_string)
    }

    // ---- derived views ----

    /// Statements available in a given file format.
    pub fn statements_in_format(&self, format: StatementFormat) -> Vec<Statement> {
        self.state
            .read()
            .statements
            .items()
            .iter()
            .filter(|s| s.format == format)
            .cloned()
            .collect()
    }

    /// The most recently dated statement.
    pub fn latest_statement(&self) -> Option<Statement> {
        self.state
            .read()
            .statements
            .items()
            .iter()
            .max_by_key(|s| s.statement_date)
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use parking_lot::Mutex;

    fn statement(id: &str, days_ago: i64, format: StatementFormat) -> Statement {
        let date = Utc::now() - Duration::days(days_ago);
        Statement {
            id: id.to_string(),
            account_id: "a1".to_string(),
            statement_date: date,
            start_date: date - Duration::days(30),
            end_date: date,
            opening_balance: 1000.0,
            closing_balance: 1200.0,
            total_credits: 500.0,
            total_debits: 300.0,
            transaction_count: 14,
            file_url: None,
            format,
        }
    }

    #[derive(Default)]
    struct MockApi {
        statements: Mutex<Option<std::result::Result<Vec<Statement>, String>>>,
        generated: Mutex<Option<std::result::Result<Statement, String>>>,
        download: Mutex<Option<std::result::Result<Vec<u8>, String>>>,
    }

    #[async_trait::async_trait]
    impl StatementApi for MockApi {
        async fn get_statements(
            &self,
            _account_id: &str,
        ) -> std::result::Result<Vec<Statement>, String> {
            self.statements
                .lock()
                .clone()
                .unwrap_or_else(|| Err("unexpected get_statements".into()))
        }

        async fn get_statement(&self, id: &str) -> std::result::Result<Statement, String> {
            Ok(statement(id, 0, StatementFormat::Pdf))
        }

        async fn generate_statement(
            &self,
            _request: StatementRequest,
        ) -> std::result::Result<Statement, String> {
            self.generated
                .lock()
                .clone()
                .unwrap_or_else(|| Err("unexpected generate_statement".into()))
        }

        async fn download_statement(&self, _id: &str) -> std::result::Result<Vec<u8>, String> {
            self.download
                .lock()
                .clone()
                .unwrap_or_else(|| Err("unexpected download_statement".into()))
        }

        async fn email_statement(
            &self,
            _id: &str,
            _request: EmailStatementRequest,
        ) -> std::result::Result<(), String> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn generate_prepends_newest_statement() {
        let api = Arc::new(MockApi {
            statements: Mutex::new(Some(Ok(vec![statement("s1", 40, StatementFormat::Pdf)]))),
            generated: Mutex::new(Some(Ok(statement("s2", 1, StatementFormat::Csv)))),
            ..Default::default()
        });
        let store = StatementStore::new(api);
        store.fetch_statements("a1").await;

        store
            .generate_statement(StatementRequest {
                account_id: "a1".to_string(),
                start_date: Utc::now() - Duration::days(30),
                end_date: Utc::now(),
                format: StatementFormat::Csv,
                include_details: None,
            })
            .await
            .unwrap();

        let statements = store.statements();
        assert_eq!(statements.len(), 2);
        assert_eq!(statements[0].id, "s2");
        assert_eq!(store.latest_statement().unwrap().id, "s2");
        assert_eq!(store.statements_in_format(StatementFormat::Csv).len(), 1);
    }

    #[tokio::test]
    async fn download_passes_bytes_through_without_touching_state() {
        let api = Arc::new(MockApi {
            statements: Mutex::new(Some(Ok(vec![statement("s1", 0, StatementFormat::Pdf)]))),
            download: Mutex::new(Some(Ok(b"%PDF-1.7 ...".to_vec()))),
            ..Default::default()
        });
        let store = StatementStore::new(api);
        store.fetch_statements("a1").await;
        let before = store.statements();

        let bytes = store.download_statement("s1").await.unwrap();

        assert!(bytes.starts_with(b"%PDF"));
        assert_eq!(store.statements(), before);
        assert_eq!(store.error(), None);
    }

    #[tokio::test]
    async fn failed_generate_records_fixed_error_and_rethrows() {
        let api = Arc::new(MockApi {
            generated: Mutex::new(Some(Err("Network error: refused".into()))),
            ..Default::default()
        });
        let store = StatementStore::new(api);

        let err = store
            .generate_statement(StatementRequest {
                account_id: "a1".to_string(),
                start_date: Utc::now(),
                end_date: Utc::now(),
                format: StatementFormat::Pdf,
                include_details: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Api(_)));
        assert_eq!(store.error(), Some(GENERATE_STATEMENT_FAILED.to_string()));
        assert!(store.statements().is_empty());
    }
}
