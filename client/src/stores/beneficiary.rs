//! # Beneficiary Store
//!
//! Holds the customer's saved payees.

use parking_lot::RwLock;
use std::sync::Arc;
use tracing::error;

use super::collection::{Collection, Entity, StoreStatus};
use crate::core::error::{AppError, Result};
use crate::core::service::BeneficiaryApi;
use shared::{Beneficiary, BeneficiaryRequest, BeneficiaryType, BeneficiaryUpdate};

const FETCH_BENEFICIARIES_FAILED: &str = "Failed to fetch beneficiaries";
const ADD_BENEFICIARY_FAILED: &str = "Failed to add beneficiary";
const UPDATE_BENEFICIARY_FAILED: &str = "Failed to update beneficiary";
const DELETE_BENEFICIARY_FAILED: &str = "Failed to delete beneficiary";
const VERIFY_BENEFICIARY_FAILED: &str = "Failed to verify beneficiary";

impl Entity for Beneficiary {
    fn entity_id(&self) -> &str {
        &self.id
    }
}

#[derive(Default)]
struct BeneficiaryState {
    beneficiaries: Collection<Beneficiary>,
    current: Option<Beneficiary>,
    status: StoreStatus,
}

/// State container for saved payees.
pub struct BeneficiaryStore {
    api: Arc<dyn BeneficiaryApi>,
    state: RwLock<BeneficiaryState>,
}

impl BeneficiaryStore {
    pub fn new(api: Arc<dyn BeneficiaryApi>) -> Self {
        Self {
            api,
            state: RwLock::new(BeneficiaryState::default()),
        }
    }

    /// Reload the payee list.
    pub async fn fetch_beneficiaries(&self) {
        let token = {
            let mut state = self.state.write();
            state.status.begin();
            state.beneficiaries.begin_load()
        };

        match self.api.get_beneficiaries().await {
            Ok(beneficiaries) => {
                let mut state = self.state.write();
                if state.beneficiaries.commit(token, beneficiaries) {
                    state.status.succeed();
                }
            }
            Err(e) => {
                error!(error = %e, "failed to fetch beneficiaries");
                let mut state = self.state.write();
                if state.beneficiaries.is_current(token) {
                    state.status.fail(FETCH_BENEFICIARIES_FAILED);
                }
            }
        }
    }

    /// Narrow the held list to a search result. Background fetch; the
    /// collection is replaced on success, failures are only logged.
    pub async fn search_beneficiaries(&self, query: &str) {
        let token = self.state.write().beneficiaries.begin_load();

        match self.api.search_beneficiaries(query).await {
            Ok(results) => {
                self.state.write().beneficiaries.commit(token, results);
            }
            Err(e) => error!(error = %e, query, "failed to search beneficiaries"),
        }
    }

    /// Register a new payee; the server's representation is appended.
    pub async fn add_beneficiary(&self, request: BeneficiaryRequest) -> Result<Beneficiary> {
        {
            let mut state = self.state.write();
            if !state.status.begin_write() {
                return Err(AppError::State("beneficiary add already in flight".into()));
            }
            state.status.begin();
        }

        let result = self.api.add_beneficiary(request).await;

        let mut state = self.state.write();
        state.status.end_write();
        match result {
            Ok(beneficiary) => {
                state.beneficiaries.push(beneficiary.clone());
                state.status.succeed();
                Ok(beneficiary)
            }
            Err(e) => {
                error!(error = %e, "failed to add beneficiary");
                state.status.fail(ADD_BENEFICIARY_FAILED);
                Err(AppError::Api(e))
            }
        }
    }

    /// Edit a payee; the element is replaced in place.
    pub async fn update_beneficiary(
        &self,
        id: &str,
        update: BeneficiaryUpdate,
    ) -> Result<Beneficiary> {
        let result = self.api.update_beneficiary(id, update).await;
        self.apply_replace(result, UPDATE_BENEFICIARY_FAILED)
    }

    /// Mark a payee as verified.
    pub async fn verify_beneficiary(&self, id: &str) -> Result<Beneficiary> {
        let result = self.api.verify_beneficiary(id).await;
        self.apply_replace(result, VERIFY_BENEFICIARY_FAILED)
    }

    /// Remove a payee from the server and the held collection.
    pub async fn delete_beneficiary(&self, id: &str) -> Result<()> {
        match self.api.delete_beneficiary(id).await {
            Ok(()) => {
                self.state.write().beneficiaries.remove(id);
                Ok(())
            }
            Err(e) => {
                error!(error = %e, id, "failed to delete beneficiary");
                self.state.write().status.fail(DELETE_BENEFICIARY_FAILED);
                Err(AppError::Api(e))
            }
        }
    }

    pub fn set_current_beneficiary(&self, beneficiary: Option<Beneficiary>) {
        self.state.write().current = beneficiary;
    }

    fn apply_replace(
        &self,
        result: std::result::Result<Beneficiary, String>,
        fixed: &str,
    ) -> Result<Beneficiary> {
        match result {
            Ok(updated) => {
                self.state.write().beneficiaries.replace(updated.clone());
                Ok(updated)
            }
            Err(e) => {
                error!(error = %e, "beneficiary update failed");
                self.state.write().status.fail(fixed);
                Err(AppError::Api(e))
            }
        }
    }

    // ---- snapshot readers ----

    pub fn beneficiaries(&self) -> Vec<Beneficiary> {
        self.state.read().beneficiaries.to_vec()
    }

    pub fn current_beneficiary(&self) -> Option<Beneficiary> {
        self.state.read().current.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().status.is_loading()
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().status.error().map(str::to_string)
    }

    // ---- derived views ----

    pub fn verified_beneficiaries(&self) -> Vec<Beneficiary> {
        self.state
            .read()
            .beneficiaries
            .items()
            .iter()
            .filter(|b| b.is_verified)
            .cloned()
            .collect()
    }

    pub fn personal_beneficiaries(&self) -> Vec<Beneficiary> {
        self.by_type(BeneficiaryType::Personal)
    }

    pub fn business_beneficiaries(&self) -> Vec<Beneficiary> {
        self.by_type(BeneficiaryType::Business)
    }

    fn by_type(&self, beneficiary_type: BeneficiaryType) -> Vec<Beneficiary> {
        self.state
            .read()
            .beneficiaries
            .items()
            .iter()
            .filter(|b| b.beneficiary_type == beneficiary_type)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use parking_lot::Mutex;

    fn beneficiary(id: &str, verified: bool, kind: BeneficiaryType) -> Beneficiary {
        Beneficiary {
            id: id.to_string(),
            name: format!("Payee {}", id),
            account_number: "9900112233".to_string(),
            bank_name: "First Harbor".to_string(),
            bank_code: None,
            swift_code: None,
            iban: None,
            email: None,
            phone: None,
            beneficiary_type: kind,
            country: "US".to_string(),
            currency: "USD".to_string(),
            is_verified: verified,
            added_date: Utc::now(),
            last_used: None,
            nickname: None,
        }
    }

    #[derive(Default)]
    struct MockApi {
        list: Mutex<Option<std::result::Result<Vec<Beneficiary>, String>>>,
        search: Mutex<Option<std::result::Result<Vec<Beneficiary>, String>>>,
        verified: Mutex<Option<std::result::Result<Beneficiary, String>>>,
        delete: Mutex<Option<std::result::Result<(), String>>>,
    }

    #[async_trait::async_trait]
    impl BeneficiaryApi for MockApi {
        async fn get_beneficiaries(&self) -> std::result::Result<Vec<Beneficiary>, String> {
            self.list
                .lock()
                .clone()
                .unwrap_or_else(|| Err("unexpected get_beneficiaries".into()))
        }

        async fn add_beneficiary(
            &self,
            request: BeneficiaryRequest,
        ) -> std::result::Result<Beneficiary, String> {
            let mut created = beneficiary("b9", false, request.beneficiary_type);
            created.name = request.name;
            Ok(created)
        }

        async fn update_beneficiary(
            &self,
            _id: &str,
            _update: BeneficiaryUpdate,
        ) -> std::result::Result<Beneficiary, String> {
            Err("unexpected update_beneficiary".into())
        }

        async fn delete_beneficiary(&self, _id: &str) -> std::result::Result<(), String> {
            self.delete.lock().clone().unwrap_or(Ok(()))
        }

        async fn verify_beneficiary(
            &self,
            _id: &str,
        ) -> std::result::Result<Beneficiary, String> {
            self.verified
                .lock()
                .clone()
                .unwrap_or_else(|| Err("unexpected verify_beneficiary".into()))
        }

        async fn search_beneficiaries(
            &self,
            _query: &str,
        ) -> std::result::Result<Vec<Beneficiary>, String> {
            self.search
                .lock()
                .clone()
                .unwrap_or_else(|| Err("unexpected search_beneficiaries".into()))
        }
    }

    #[tokio::test]
    async fn add_appends_and_views_split_by_type() {
        let api = Arc::new(MockApi {
            list: Mutex::new(Some(Ok(vec![beneficiary(
                "b1",
                true,
                BeneficiaryType::Personal,
            )]))),
            ..Default::default()
        });
        let store = BeneficiaryStore::new(api);
        store.fetch_beneficiaries().await;

        let request = BeneficiaryRequest {
            name: "Acme Supplies".to_string(),
            account_number: "5500334455".to_string(),
            bank_name: "First Harbor".to_string(),
            bank_code: None,
            beneficiary_type: BeneficiaryType::Business,
            country: "US".to_string(),
            currency: "USD".to_string(),
            email: None,
            phone: None,
            nickname: None,
        };
        store.add_beneficiary(request).await.unwrap();

        assert_eq!(store.beneficiaries().len(), 2);
        assert_eq!(store.personal_beneficiaries().len(), 1);
        assert_eq!(store.business_beneficiaries().len(), 1);
        assert_eq!(store.verified_beneficiaries().len(), 1);
    }

    #[tokio::test]
    async fn verify_replaces_in_place() {
        let api = Arc::new(MockApi {
            list: Mutex::new(Some(Ok(vec![
                beneficiary("b1", false, BeneficiaryType::Personal),
                beneficiary("b2", false, BeneficiaryType::Personal),
            ]))),
            verified: Mutex::new(Some(Ok(beneficiary("b1", true, BeneficiaryType::Personal)))),
            ..Default::default()
        });
        let store = BeneficiaryStore::new(api);
        store.fetch_beneficiaries().await;

        store.verify_beneficiary("b1").await.unwrap();

        assert!(store.beneficiaries()[0].is_verified);
        assert!(!store.beneficiaries()[1].is_verified);
    }

    #[tokio::test]
    async fn delete_failure_keeps_collection_and_rethrows() {
        let api = Arc::new(MockApi {
            list: Mutex::new(Some(Ok(vec![beneficiary(
                "b1",
                true,
                BeneficiaryType::Personal,
            )]))),
            delete: Mutex::new(Some(Err("Network error: timeout".into()))),
            ..Default::default()
        });
        let store = BeneficiaryStore::new(api);
        store.fetch_beneficiaries().await;

        let err = store.delete_beneficiary("b1").await.unwrap_err();

        assert!(matches!(err, AppError::Api(_)));
        assert_eq!(store.beneficiaries().len(), 1);
        assert_eq!(store.error(), Some(DELETE_BENEFICIARY_FAILED.to_string()));
    }

    #[tokio::test]
    async fn search_replaces_collection_without_loading_flag() {
        let api = Arc::new(MockApi {
            list: Mutex::new(Some(Ok(vec![
                beneficiary("b1", true, BeneficiaryType::Personal),
                beneficiary("b2", true, BeneficiaryType::Personal),
            ]))),
            search: Mutex::new(Some(Ok(vec![beneficiary(
                "b2",
                true,
                BeneficiaryType::Personal,
            )]))),
            ..Default::default()
        });
        let store = BeneficiaryStore::new(api);
        store.fetch_beneficiaries().await;

        store.search_beneficiaries("b2").await;

        assert_eq!(store.beneficiaries().len(), 1);
        assert!(!store.is_loading());
        assert_eq!(store.error(), None);
    }
}
