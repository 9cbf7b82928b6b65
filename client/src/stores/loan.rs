//! # Loan Store
//!
//! Holds loans, loan applications, and the repayment feed of the loan
//! being viewed. Making a repayment moves server-side balances, so the
//! loans collection is re-synced rather than patched locally.

use parking_lot::RwLock;
use std::sync::Arc;
use tracing::error;

use super::collection::{Collection, Entity, StoreStatus};
use crate::core::error::{AppError, Result};
use crate::core::service::LoanApi;
use shared::{
    Loan, LoanApplication, LoanApplicationStatus, LoanPayment, LoanPaymentRequest, LoanStatus,
};

const FETCH_LOANS_FAILED: &str = "Failed to fetch loans";
const APPLY_LOAN_FAILED: &str = "Failed to submit loan application";
const FETCH_LOAN_PAYMENTS_FAILED: &str = "Failed to fetch loan payments";
const MAKE_PAYMENT_FAILED: &str = "Failed to make payment";

impl Entity for Loan {
    fn entity_id(&self) -> &str {
        &self.id
    }
}

impl Entity for LoanPayment {
    fn entity_id(&self) -> &str {
        &self.id
    }
}

#[derive(Default)]
struct LoanState {
    loans: Collection<Loan>,
    applications: Collection<LoanApplication>,
    current: Option<Loan>,
    loan_payments: Collection<LoanPayment>,
    status: StoreStatus,
}

/// State container for loans and loan applications.
pub struct LoanStore {
    api: Arc<dyn LoanApi>,
    state: RwLock<LoanState>,
}

impl LoanStore {
    pub fn new(api: Arc<dyn LoanApi>) -> Self {
        Self {
            api,
            state: RwLock::new(LoanState::default()),
        }
    }

    /// Reload the loan list.
    pub async fn fetch_loans(&self) {
        let token = {
            let mut state = self.state.write();
            state.status.begin();
            state.loans.begin_load()
        };

        match self.api.get_loans().await {
            Ok(loans) => {
                let mut state = self.state.write();
                if state.loans.commit(token, loans) {
                    state.status.succeed();
                }
            }
            Err(e) => {
                error!(error = %e, "failed to fetch loans");
                let mut state = self.state.write();
                if state.loans.is_current(token) {
                    state.status.fail(FETCH_LOANS_FAILED);
                }
            }
        }
    }

    /// Refresh the application list. Background fetch.
    pub async fn fetch_loan_applications(&self) {
        let token = self.state.write().applications.begin_load();

        match self.api.get_loan_applications().await {
            Ok(applications) => {
                self.state.write().applications.commit(token, applications);
            }
            Err(e) => error!(error = %e, "failed to fetch loan applications"),
        }
    }

    /// Submit a loan application; the server's representation is
    /// prepended so the newest application lists first.
    pub async fn apply_for_loan(&self, application: LoanApplication) -> Result<LoanApplication> {
        {
            let mut state = self.state.write();
            if !state.status.begin_write() {
                return Err(AppError::State("loan application already in flight".into()));
            }
            state.status.begin();
        }

        let result = self.api.apply_for_loan(application).await;

        let mut state = self.state.write();
        state.status.end_write();
        match result {
            Ok(submitted) => {
                state.applications.push_front(submitted.clone());
                state.status.succeed();
                Ok(submitted)
            }
            Err(e) => {
                error!(error = %e, "failed to submit loan application");
                state.status.fail(APPLY_LOAN_FAILED);
                Err(AppError::Api(e))
            }
        }
    }

    /// Load the repayment feed for one loan.
    pub async fn fetch_loan_payments(&self, loan_id: &str) {
        let token = {
            let mut state = self.state.write();
            state.status.begin();
            state.loan_payments.begin_load()
        };

        match self.api.get_loan_payments(loan_id).await {
            Ok(payments) => {
                let mut state = self.state.write();
                if state.loan_payments.commit(token, payments) {
                    state.status.succeed();
                }
            }
            Err(e) => {
                error!(error = %e, loan_id, "failed to fetch loan payments");
                let mut state = self.state.write();
                if state.loan_payments.is_current(token) {
                    state.status.fail(FETCH_LOAN_PAYMENTS_FAILED);
                }
            }
        }
    }

    /// Make a repayment. The returned payment is prepended, then the
    /// loans collection is re-synced so outstanding balances reflect the
    /// server's arithmetic, never ours.
    pub async fn make_payment(&self, loan_id: &str, amount: f64) -> Result<LoanPayment> {
        let result = self
            .api
            .make_payment(loan_id, LoanPaymentRequest { amount })
            .await;

        match result {
            Ok(payment) => {
                self.state.write().loan_payments.push_front(payment.clone());
                self.fetch_loans().await;
                Ok(payment)
            }
            Err(e) => {
                error!(error = %e, loan_id, "failed to make payment");
                self.state.write().status.fail(MAKE_PAYMENT_FAILED);
                Err(AppError::Api(e))
            }
        }
    }

    pub fn set_current_loan(&self, loan: Option<Loan>) {
        self.state.write().current = loan;
    }

    // ---- snapshot readers ----

    pub fn loans(&self) -> Vec<Loan> {
        self.state.read().loans.to_vec()
    }

    pub fn applications(&self) -> Vec<LoanApplication> {
        self.state.read().applications.to_vec()
    }

    pub fn current_loan(&self) -> Option<Loan> {
        self.state.read().current.clone()
    }

    pub fn loan_payments(&self) -> Vec<LoanPayment> {
        self.state.read().loan_payments.to_vec()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().status.is_loading()
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().status.error().map(str::to_string)
    }

    // ---- derived views ----

    pub fn active_loans(&self) -> Vec<Loan> {
        self.state
            .read()
            .loans
            .items()
            .iter()
            .filter(|l| l.status == LoanStatus::Active)
            .cloned()
            .collect()
    }

    pub fn total_outstanding(&self) -> f64 {
        self.state
            .read()
            .loans
            .items()
            .iter()
            .map(|l| l.outstanding_balance)
            .sum()
    }

    pub fn total_monthly_payment(&self) -> f64 {
        self.state
            .read()
            .loans
            .items()
            .iter()
            .filter(|l| l.status == LoanStatus::Active)
            .map(|l| l.monthly_payment)
            .sum()
    }

    /// Applications still moving through review.
    pub fn pending_applications(&self) -> Vec<LoanApplication> {
        self.state
            .read()
            .applications
            .items()
            .iter()
            .filter(|a| {
                matches!(
                    a.status,
                    Some(LoanApplicationStatus::Submitted)
                        | Some(LoanApplicationStatus::UnderReview)
                )
            })
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use parking_lot::Mutex;
    use shared::LoanType;

    fn loan(id: &str, outstanding: f64, status: LoanStatus) -> Loan {
        Loan {
            id: id.to_string(),
            loan_type: LoanType::Personal,
            account_id: "a1".to_string(),
            principal_amount: 10000.0,
            outstanding_balance: outstanding,
            interest_rate: 6.5,
            term: 48,
            monthly_payment: 240.0,
            start_date: Utc::now(),
            end_date: Utc::now(),
            next_payment_date: Utc::now(),
            status,
            total_paid: 10000.0 - outstanding,
            total_interest_paid: 320.0,
            remaining_payments: 30,
        }
    }

    fn loan_payment(id: &str, remaining: f64) -> LoanPayment {
        LoanPayment {
            id: id.to_string(),
            loan_id: "l1".to_string(),
            amount: 240.0,
            payment_date: Utc::now(),
            principal_paid: 190.0,
            interest_paid: 50.0,
            remaining_balance: remaining,
        }
    }

    fn application(id: &str, status: LoanApplicationStatus) -> LoanApplication {
        LoanApplication {
            id: Some(id.to_string()),
            loan_type: LoanType::Auto,
            requested_amount: 15000.0,
            term: 60,
            purpose: "vehicle".to_string(),
            employment_status: "employed".to_string(),
            annual_income: 80000.0,
            status: Some(status),
            application_date: Some(Utc::now()),
        }
    }

    #[derive(Default)]
    struct MockApi {
        loans: Mutex<Option<std::result::Result<Vec<Loan>, String>>>,
        applications: Mutex<Option<std::result::Result<Vec<LoanApplication>, String>>>,
        payment: Mutex<Option<std::result::Result<LoanPayment, String>>>,
        loan_fetches: Mutex<u32>,
    }

    #[async_trait::async_trait]
    impl LoanApi for MockApi {
        async fn get_loans(&self) -> std::result::Result<Vec<Loan>, String> {
            *self.loan_fetches.lock() += 1;
            self.loans
                .lock()
                .clone()
                .unwrap_or_else(|| Err("unexpected get_loans".into()))
        }

        async fn get_loan_applications(
            &self,
        ) -> std::result::Result<Vec<LoanApplication>, String> {
            self.applications
                .lock()
                .clone()
                .unwrap_or_else(|| Err("unexpected get_loan_applications".into()))
        }

        async fn apply_for_loan(
            &self,
            application: LoanApplication,
        ) -> std::result::Result<LoanApplication, String> {
            let mut submitted = application;
            submitted.id = Some("app-9".to_string());
            submitted.status = Some(LoanApplicationStatus::Submitted);
            Ok(submitted)
        }

        async fn get_loan_payments(
            &self,
            _loan_id: &str,
        ) -> std::result::Result<Vec<LoanPayment>, String> {
            Ok(vec![])
        }

        async fn make_payment(
            &self,
            _loan_id: &str,
            _request: LoanPaymentRequest,
        ) -> std::result::Result<LoanPayment, String> {
            self.payment
                .lock()
                .clone()
                .unwrap_or_else(|| Err("unexpected make_payment".into()))
        }
    }

    #[tokio::test]
    async fn failed_fetch_keeps_loans_and_sets_fixed_error() {
        let api = Arc::new(MockApi {
            loans: Mutex::new(Some(Ok(vec![loan("l1", 8000.0, LoanStatus::Active)]))),
            ..Default::default()
        });
        let store = LoanStore::new(api.clone());
        store.fetch_loans().await;

        *api.loans.lock() = Some(Err("Network error: unreachable".into()));
        store.fetch_loans().await;

        assert_eq!(store.loans().len(), 1);
        assert_eq!(store.error(), Some(FETCH_LOANS_FAILED.to_string()));
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn payment_prepends_and_resyncs_loans() {
        let api = Arc::new(MockApi {
            loans: Mutex::new(Some(Ok(vec![loan("l1", 8000.0, LoanStatus::Active)]))),
            payment: Mutex::new(Some(Ok(loan_payment("p1", 7760.0)))),
            ..Default::default()
        });
        let store = LoanStore::new(api.clone());
        store.fetch_loans().await;

        // The server reduces the balance as part of processing the payment.
        *api.loans.lock() = Some(Ok(vec![loan("l1", 7760.0, LoanStatus::Active)]));
        let payment = store.make_payment("l1", 240.0).await.unwrap();

        assert_eq!(payment.remaining_balance, 7760.0);
        assert_eq!(store.loan_payments()[0].id, "p1");
        // One initial fetch plus the post-payment re-sync.
        assert_eq!(*api.loan_fetches.lock(), 2);
        assert_eq!(store.loans()[0].outstanding_balance, 7760.0);
        assert_eq!(store.total_outstanding(), 7760.0);
    }

    #[tokio::test]
    async fn failed_payment_leaves_everything_untouched() {
        let api = Arc::new(MockApi {
            loans: Mutex::new(Some(Ok(vec![loan("l1", 8000.0, LoanStatus::Active)]))),
            payment: Mutex::new(Some(Err("Network error: timeout".into()))),
            ..Default::default()
        });
        let store = LoanStore::new(api.clone());
        store.fetch_loans().await;

        let err = store.make_payment("l1", 240.0).await.unwrap_err();

        assert!(matches!(err, AppError::Api(_)));
        assert!(store.loan_payments().is_empty());
        assert_eq!(*api.loan_fetches.lock(), 1);
        assert_eq!(store.error(), Some(MAKE_PAYMENT_FAILED.to_string()));
    }

    #[tokio::test]
    async fn application_prepends_and_pending_view_filters() {
        let api = Arc::new(MockApi {
            applications: Mutex::new(Some(Ok(vec![
                application("app-1", LoanApplicationStatus::Approved),
                application("app-2", LoanApplicationStatus::UnderReview),
            ]))),
            ..Default::default()
        });
        let store = LoanStore::new(api);
        store.fetch_loan_applications().await;

        store
            .apply_for_loan(LoanApplication {
                id: None,
                loan_type: LoanType::Auto,
                requested_amount: 15000.0,
                term: 60,
                purpose: "vehicle".to_string(),
                employment_status: "employed".to_string(),
                annual_income: 80000.0,
                status: None,
                application_date: None,
            })
            .await
            .unwrap();

        let applications = store.applications();
        assert_eq!(applications.len(), 3);
        assert_eq!(applications[0].id.as_deref(), Some("app-9"));
        assert_eq!(store.pending_applications().len(), 2);
    }

    #[tokio::test]
    async fn monthly_payment_totals_active_loans_only() {
        let api = Arc::new(MockApi {
            loans: Mutex::new(Some(Ok(vec![
                loan("l1", 8000.0, LoanStatus::Active),
                loan("l2", 0.0, LoanStatus::PaidOff),
            ]))),
            ..Default::default()
        });
        let store = LoanStore::new(api);
        store.fetch_loans().await;

        assert_eq!(store.active_loans().len(), 1);
        assert_eq!(store.total_monthly_payment(), 240.0);
        assert_eq!(store.total_outstanding(), 8000.0);
    }
}
