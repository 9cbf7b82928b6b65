//! # Transfer Store
//!
//! Holds transfers plus the scheduled and recurring subsets. Transfer
//! statuses are assigned by the server; this store never advances one
//! locally.

use parking_lot::RwLock;
use std::sync::Arc;
use tracing::error;

use super::collection::{Collection, Entity, StoreStatus};
use crate::core::error::{AppError, Result};
use crate::core::service::TransferApi;
use shared::{Transfer, TransferRequest, TransferStatus, TransferType, TransferValidation};

const FETCH_TRANSFERS_FAILED: &str = "Failed to fetch transfers";
const CREATE_TRANSFER_FAILED: &str = "Failed to create transfer";
const CANCEL_TRANSFER_FAILED: &str = "Failed to cancel transfer";

impl Entity for Transfer {
    fn entity_id(&self) -> &str {
        &self.id
    }
}

#[derive(Default)]
struct TransferState {
    transfers: Collection<Transfer>,
    scheduled_transfers: Collection<Transfer>,
    recurring_transfers: Collection<Transfer>,
    current: Option<Transfer>,
    status: StoreStatus,
}

/// State container for money transfers.
pub struct TransferStore {
    api: Arc<dyn TransferApi>,
    state: RwLock<TransferState>,
}

impl TransferStore {
    pub fn new(api: Arc<dyn TransferApi>) -> Self {
        Self {
            api,
            state: RwLock::new(TransferState::default()),
        }
    }

    /// Reload the transfer list.
    pub async fn fetch_transfers(&self) {
        let token = {
            let mut state = self.state.write();
            state.status.begin();
            state.transfers.begin_load()
        };

        match self.api.get_transfers().await {
            Ok(transfers) => {
                let mut state = self.state.write();
                if state.transfers.commit(token, transfers) {
                    state.status.succeed();
                }
            }
            Err(e) => {
                error!(error = %e, "failed to fetch transfers");
                let mut state = self.state.write();
                if state.transfers.is_current(token) {
                    state.status.fail(FETCH_TRANSFERS_FAILED);
                }
            }
        }
    }

    /// Refresh the scheduled subset. Background fetch.
    pub async fn fetch_scheduled_transfers(&self) {
        let token = self.state.write().scheduled_transfers.begin_load();

        match self.api.get_scheduled_transfers().await {
            Ok(transfers) => {
                self.state.write().scheduled_transfers.commit(token, transfers);
            }
            Err(e) => error!(error = %e, "failed to fetch scheduled transfers"),
        }
    }

    /// Refresh the recurring subset. Background fetch.
    pub async fn fetch_recurring_transfers(&self) {
        let token = self.state.write().recurring_transfers.begin_load();

        match self.api.get_recurring_transfers().await {
            Ok(transfers) => {
                self.state.write().recurring_transfers.commit(token, transfers);
            }
            Err(e) => error!(error = %e, "failed to fetch recurring transfers"),
        }
    }

    /// Initiate a transfer; the server's representation is prepended so
    /// the newest transfer lists first.
    pub async fn create_transfer(&self, request: TransferRequest) -> Result<Transfer> {
        {
            let mut state = self.state.write();
            if !state.status.begin_write() {
                return Err(AppError::State("transfer create already in flight".into()));
            }
            state.status.begin();
        }

        let result = self.api.create_transfer(request).await;

        let mut state = self.state.write();
        state.status.end_write();
        match result {
            Ok(transfer) => {
                state.transfers.push_front(transfer.clone());
                state.status.succeed();
                Ok(transfer)
            }
            Err(e) => {
                error!(error = %e, "failed to create transfer");
                state.status.fail(CREATE_TRANSFER_FAILED);
                Err(AppError::Api(e))
            }
        }
    }

    /// Pre-flight a transfer request. Passthrough; no state change.
    pub async fn validate_transfer(&self, request: TransferRequest) -> Result<TransferValidation> {
        self.api.validate_transfer(request).await.map_err(|e| {
            error!(error = %e, "failed to validate transfer");
            AppError::Api(e)
        })
    }

    /// Cancel a pending transfer; the element is replaced in place.
    pub async fn cancel_transfer(&self, id: &str) -> Result<Transfer> {
        match self.api.cancel_transfer(id).await {
            Ok(cancelled) => {
                self.state.write().transfers.replace(cancelled.clone());
                Ok(cancelled)
            }
            Err(e) => {
                error!(error = %e, id, "failed to cancel transfer");
                self.state.write().status.fail(CANCEL_TRANSFER_FAILED);
                Err(AppError::Api(e))
            }
        }
    }

    pub fn set_current_transfer(&self, transfer: Option<Transfer>) {
        self.state.write().current = transfer;
    }

    // ---- snapshot readers ----

    pub fn transfers(&self) -> Vec<Transfer> {
        self.state.read().transfers.to_vec()
    }

    pub fn scheduled_transfers(&self) -> Vec<Transfer> {
        self.state.read().scheduled_transfers.to_vec()
    }

    pub fn recurring_transfers(&self) -> Vec<Transfer> {
        self.state.read().recurring_transfers.to_vec()
    }

    pub fn current_transfer(&self) -> Option<Transfer> {
        self.state.read().current.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().status.is_loading()
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().status.error().map(str::to_string)
    }

    // ---- derived views ----

    pub fn completed_transfers(&self) -> Vec<Transfer> {
        self.by_status(TransferStatus::Completed)
    }

    pub fn pending_transfers(&self) -> Vec<Transfer> {
        self.by_status(TransferStatus::Pending)
    }

    pub fn internal_transfers(&self) -> Vec<Transfer> {
        self.by_type(TransferType::Internal)
    }

    pub fn external_transfers(&self) -> Vec<Transfer> {
        self.by_type(TransferType::External)
    }

    fn by_status(&self, status: TransferStatus) -> Vec<Transfer> {
        self.state
            .read()
            .transfers
            .items()
            .iter()
            .filter(|t| t.status == status)
            .cloned()
            .collect()
    }

    fn by_type(&self, transfer_type: TransferType) -> Vec<Transfer> {
        self.state
            .read()
            .transfers
            .items()
            .iter()
            .filter(|t| t.transfer_type == transfer_type)
            .cloned()
            .collect()
    }
}
