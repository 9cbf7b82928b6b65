//! # Bill Store
//!
//! Holds the biller catalog, the customer's bill payments, and the
//! scheduled subset.

use parking_lot::RwLock;
use std::sync::Arc;
use tracing::error;

use super::collection::{Collection, Entity, StoreStatus};
use crate::core::error::{AppError, Result};
use crate::core::service::BillApi;
use shared::{AutoPayRequest, BillPayment, BillPaymentRequest, BillPaymentStatus, Biller};

const FETCH_BILLERS_FAILED: &str = "Failed to fetch billers";
const FETCH_PAYMENTS_FAILED: &str = "Failed to fetch payments";
const CREATE_PAYMENT_FAILED: &str = "Failed to create payment";
const CANCEL_PAYMENT_FAILED: &str = "Failed to cancel payment";
const UPDATE_AUTO_PAY_FAILED: &str = "Failed to update auto-pay";

impl Entity for Biller {
    fn entity_id(&self) -> &str {
        &self.id
    }
}

impl Entity for BillPayment {
    fn entity_id(&self) -> &str {
        &self.id
    }
}

#[derive(Default)]
struct BillState {
    billers: Collection<Biller>,
    payments: Collection<BillPayment>,
    scheduled_payments: Collection<BillPayment>,
    current_payment: Option<BillPayment>,
    status: StoreStatus,
}

/// State container for billers and bill payments.
pub struct BillStore {
    api: Arc<dyn BillApi>,
    state: RwLock<BillState>,
}

impl BillStore {
    pub fn new(api: Arc<dyn BillApi>) -> Self {
        Self {
            api,
            state: RwLock::new(BillState::default()),
        }
    }

    /// Reload the biller catalog.
    pub async fn fetch_billers(&self) {
        let token = {
            let mut state = self.state.write();
            state.status.begin();
            state.billers.begin_load()
        };

        match self.api.get_billers().await {
            Ok(billers) => {
                let mut state = self.state.write();
                if state.billers.commit(token, billers) {
                    state.status.succeed();
                }
            }
            Err(e) => {
                error!(error = %e, "failed to fetch billers");
                let mut state = self.state.write();
                if state.billers.is_current(token) {
                    state.status.fail(FETCH_BILLERS_FAILED);
                }
            }
        }
    }

    /// Narrow the biller catalog to a search result. Background fetch.
    pub async fn search_billers(&self, query: &str) {
        let token = self.state.write().billers.begin_load();

        match self.api.search_billers(query).await {
            Ok(results) => {
                self.state.write().billers.commit(token, results);
            }
            Err(e) => error!(error = %e, query, "failed to search billers"),
        }
    }

    /// Reload all bill payments.
    pub async fn fetch_payments(&self) {
        let token = {
            let mut state = self.state.write();
            state.status.begin();
            state.payments.begin_load()
        };

        match self.api.get_payments().await {
            Ok(payments) => {
                let mut state = self.state.write();
                if state.payments.commit(token, payments) {
                    state.status.succeed();
                }
            }
            Err(e) => {
                error!(error = %e, "failed to fetch payments");
                let mut state = self.state.write();
                if state.payments.is_current(token) {
                    state.status.fail(FETCH_PAYMENTS_FAILED);
                }
            }
        }
    }

    /// Refresh the scheduled subset. Background fetch.
    pub async fn fetch_scheduled_payments(&self) {
        let token = self.state.write().scheduled_payments.begin_load();

        match self.api.get_scheduled_payments().await {
            Ok(payments) => {
                self.state.write().scheduled_payments.commit(token, payments);
            }
            Err(e) => error!(error = %e, "failed to fetch scheduled payments"),
        }
    }

    /// Schedule a payment; the server's representation is prepended so the
    /// newest payment lists first.
    pub async fn create_payment(&self, request: BillPaymentRequest) -> Result<BillPayment> {
        {
            let mut state = self.state.write();
            if !state.status.begin_write() {
                return Err(AppError::State("payment create already in flight".into()));
            }
            state.status.begin();
        }

        let result = self.api.create_payment(request).await;

        let mut state = self.state.write();
        state.status.end_write();
        match result {
            Ok(payment) => {
                state.payments.push_front(payment.clone());
                state.status.succeed();
                Ok(payment)
            }
            Err(e) => {
                error!(error = %e, "failed to create payment");
                state.status.fail(CREATE_PAYMENT_FAILED);
                Err(AppError::Api(e))
            }
        }
    }

    /// Cancel a scheduled payment; the element is replaced in place.
    pub async fn cancel_payment(&self, id: &str) -> Result<BillPayment> {
        let result = self.api.cancel_payment(id).await;
        self.apply_replace(result, CANCEL_PAYMENT_FAILED)
    }

    /// Toggle auto-pay on a payment.
    pub async fn set_auto_pay(&self, id: &str, enabled: bool) -> Result<BillPayment> {
        let result = self.api.update_auto_pay(id, AutoPayRequest { enabled }).await;
        self.apply_replace(result, UPDATE_AUTO_PAY_FAILED)
    }

    pub fn set_current_payment(&self, payment: Option<BillPayment>) {
        self.state.write().current_payment = payment;
    }

    fn apply_replace(
        &self,
        result: std::result::Result<BillPayment, String>,
        fixed: &str,
    ) -> Result<BillPayment> {
        match result {
            Ok(updated) => {
                self.state.write().payments.replace(updated.clone());
                Ok(updated)
            }
            Err(e) => {
                error!(error = %e, "bill payment update failed");
                self.state.write().status.fail(fixed);
                Err(AppError::Api(e))
            }
        }
    }

    // ---- snapshot readers ----

    pub fn billers(&self) -> Vec<Biller> {
        self.state.read().billers.to_vec()
    }

    pub fn payments(&self) -> Vec<BillPayment> {
        self.state.read().payments.to_vec()
    }

    pub fn scheduled_payments(&self) -> Vec<BillPayment> {
        self.state.read().scheduled_payments.to_vec()
    }

    pub fn current_payment(&self) -> Option<BillPayment> {
        self.state.read().current_payment.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().status.is_loading()
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().status.error().map(str::to_string)
    }

    // ---- derived views ----

    pub fn paid_bills(&self) -> Vec<BillPayment> {
        self.by_status(BillPaymentStatus::Paid)
    }

    pub fn overdue_bills(&self) -> Vec<BillPayment> {
        self.by_status(BillPaymentStatus::Overdue)
    }

    pub fn upcoming_bills(&self) -> Vec<BillPayment> {
        self.by_status(BillPaymentStatus::Scheduled)
    }

    pub fn recurring_payments(&self) -> Vec<BillPayment> {
        self.state
            .read()
            .payments
            .items()
            .iter()
            .filter(|p| p.recurring)
            .cloned()
            .collect()
    }

    fn by_status(&self, status: BillPaymentStatus) -> Vec<BillPayment> {
        self.state
            .read()
            .payments
            .items()
            .iter()
            .filter(|p| p.status == status)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use parking_lot::Mutex;

    fn payment(id: &str, status: BillPaymentStatus, recurring: bool) -> BillPayment {
        BillPayment {
            id: id.to_string(),
            biller_id: "biller-1".to_string(),
            biller_name: "City Power".to_string(),
            account_id: "a1".to_string(),
            amount: 120.0,
            due_date: Utc::now(),
            payment_date: None,
            status,
            recurring,
            frequency: None,
            auto_pay_enabled: false,
            reference: None,
        }
    }

    #[derive(Default)]
    struct MockApi {
        payments: Mutex<Option<std::result::Result<Vec<BillPayment>, String>>>,
        created: Mutex<Option<std::result::Result<BillPayment, String>>>,
        cancelled: Mutex<Option<std::result::Result<BillPayment, String>>>,
        auto_pay: Mutex<Option<std::result::Result<BillPayment, String>>>,
    }

    #[async_trait::async_trait]
    impl BillApi for MockApi {
        async fn get_billers(&self) -> std::result::Result<Vec<Biller>, String> {
            Ok(vec![])
        }

        async fn search_billers(&self, _query: &str) -> std::result::Result<Vec<Biller>, String> {
            Ok(vec![])
        }

        async fn get_payments(&self) -> std::result::Result<Vec<BillPayment>, String> {
            self.payments
                .lock()
                .clone()
                .unwrap_or_else(|| Err("unexpected get_payments".into()))
        }

        async fn get_scheduled_payments(&self) -> std::result::Result<Vec<BillPayment>, String> {
            Ok(vec![])
        }

        async fn create_payment(
            &self,
            _request: BillPaymentRequest,
        ) -> std::result::Result<BillPayment, String> {
            self.created
                .lock()
                .clone()
                .unwrap_or_else(|| Err("unexpected create_payment".into()))
        }

        async fn cancel_payment(&self, _id: &str) -> std::result::Result<BillPayment, String> {
            self.cancelled
                .lock()
                .clone()
                .unwrap_or_else(|| Err("unexpected cancel_payment".into()))
        }

        async fn update_auto_pay(
            &self,
            _id: &str,
            _request: AutoPayRequest,
        ) -> std::result::Result<BillPayment, String> {
            self.auto_pay
                .lock()
                .clone()
                .unwrap_or_else(|| Err("unexpected update_auto_pay".into()))
        }
    }

    #[tokio::test]
    async fn create_prepends_newest_payment() {
        let api = Arc::new(MockApi {
            payments: Mutex::new(Some(Ok(vec![payment(
                "p1",
                BillPaymentStatus::Paid,
                false,
            )]))),
            created: Mutex::new(Some(Ok(payment("p2", BillPaymentStatus::Scheduled, true)))),
            ..Default::default()
        });
        let store = BillStore::new(api);
        store.fetch_payments().await;

        store
            .create_payment(BillPaymentRequest {
                biller_id: "biller-1".to_string(),
                account_id: "a1".to_string(),
                amount: 60.0,
                payment_date: Utc::now(),
                recurring: Some(true),
                frequency: None,
                auto_pay_enabled: None,
            })
            .await
            .unwrap();

        let payments = store.payments();
        assert_eq!(payments.len(), 2);
        assert_eq!(payments[0].id, "p2");
        assert_eq!(store.upcoming_bills().len(), 1);
        assert_eq!(store.recurring_payments().len(), 1);
    }

    #[tokio::test]
    async fn cancel_replaces_in_place() {
        let api = Arc::new(MockApi {
            payments: Mutex::new(Some(Ok(vec![
                payment("p1", BillPaymentStatus::Scheduled, false),
                payment("p2", BillPaymentStatus::Scheduled, false),
            ]))),
            cancelled: Mutex::new(Some(Ok(payment("p1", BillPaymentStatus::Cancelled, false)))),
            ..Default::default()
        });
        let store = BillStore::new(api);
        store.fetch_payments().await;

        store.cancel_payment("p1").await.unwrap();

        let payments = store.payments();
        assert_eq!(payments[0].status, BillPaymentStatus::Cancelled);
        assert_eq!(payments[1].status, BillPaymentStatus::Scheduled);
        assert_eq!(store.upcoming_bills().len(), 1);
    }

    #[tokio::test]
    async fn auto_pay_failure_records_fixed_error() {
        let api = Arc::new(MockApi {
            payments: Mutex::new(Some(Ok(vec![payment(
                "p1",
                BillPaymentStatus::Scheduled,
                true,
            )]))),
            auto_pay: Mutex::new(Some(Err("Network error: reset".into()))),
            ..Default::default()
        });
        let store = BillStore::new(api);
        store.fetch_payments().await;

        let err = store.set_auto_pay("p1", true).await.unwrap_err();

        assert!(matches!(err, AppError::Api(_)));
        assert_eq!(store.error(), Some(UPDATE_AUTO_PAY_FAILED.to_string()));
        assert!(!store.payments()[0].auto_pay_enabled);
    }
}
