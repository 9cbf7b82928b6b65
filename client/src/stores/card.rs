//! # Card Store
//!
//! Holds the customer's cards and the transaction feed of the card being
//! viewed. Card lifecycle transitions (activate, block, report lost or
//! stolen) all replace the affected card in place with the server's
//! representation.

use parking_lot::RwLock;
use std::sync::Arc;
use tracing::error;

use super::collection::{Collection, Entity, StoreStatus};
use crate::core::error::{AppError, Result};
use crate::core::service::CardApi;
use crate::utils::validation::validate_pin;
use shared::{
    BlockCardRequest, Card, CardApplication, CardStatus, CardTransaction, CardType,
    CreditLimitRequest, SetPinRequest,
};

const FETCH_CARDS_FAILED: &str = "Failed to fetch cards";
const FETCH_CARD_TRANSACTIONS_FAILED: &str = "Failed to fetch card transactions";
const APPLY_CARD_FAILED: &str = "Failed to apply for card";
const ACTIVATE_CARD_FAILED: &str = "Failed to activate card";
const BLOCK_CARD_FAILED: &str = "Failed to block card";
const UNBLOCK_CARD_FAILED: &str = "Failed to unblock card";
const REPORT_LOST_FAILED: &str = "Failed to report card as lost";
const REPORT_STOLEN_FAILED: &str = "Failed to report card as stolen";
const UPDATE_CREDIT_LIMIT_FAILED: &str = "Failed to update credit limit";

impl Entity for Card {
    fn entity_id(&self) -> &str {
        &self.id
    }
}

impl Entity for CardTransaction {
    fn entity_id(&self) -> &str {
        &self.id
    }
}

#[derive(Default)]
struct CardState {
    cards: Collection<Card>,
    current: Option<Card>,
    card_transactions: Collection<CardTransaction>,
    status: StoreStatus,
}

/// State container for payment cards.
pub struct CardStore {
    api: Arc<dyn CardApi>,
    state: RwLock<CardState>,
}

impl CardStore {
    pub fn new(api: Arc<dyn CardApi>) -> Self {
        Self {
            api,
            state: RwLock::new(CardState::default()),
        }
    }

    /// Reload the card list.
    pub async fn fetch_cards(&self) {
        let token = {
            let mut state = self.state.write();
            state.status.begin();
            state.cards.begin_load()
        };

        match self.api.get_cards().await {
            Ok(cards) => {
                let mut state = self.state.write();
                if state.cards.commit(token, cards) {
                    state.status.succeed();
                }
            }
            Err(e) => {
                error!(error = %e, "failed to fetch cards");
                let mut state = self.state.write();
                if state.cards.is_current(token) {
                    state.status.fail(FETCH_CARDS_FAILED);
                }
            }
        }
    }

    /// Load the transaction feed for one card.
    pub async fn fetch_card_transactions(&self, card_id: &str) {
        let token = {
            let mut state = self.state.write();
            state.status.begin();
            state.card_transactions.begin_load()
        };

        match self.api.get_card_transactions(card_id).await {
            Ok(transactions) => {
                let mut state = self.state.write();
                if state.card_transactions.commit(token, transactions) {
                    state.status.succeed();
                }
            }
            Err(e) => {
                error!(error = %e, card_id, "failed to fetch card transactions");
                let mut state = self.state.write();
                if state.card_transactions.is_current(token) {
                    state.status.fail(FETCH_CARD_TRANSACTIONS_FAILED);
                }
            }
        }
    }

    /// Apply for a card; the issuer's representation is appended.
    pub async fn apply_for_card(&self, application: CardApplication) -> Result<Card> {
        {
            let mut state = self.state.write();
            if !state.status.begin_write() {
                return Err(AppError::State("card application already in flight".into()));
            }
            state.status.begin();
        }

        let result = self.api.apply_for_card(application).await;

        let mut state = self.state.write();
        state.status.end_write();
        match result {
            Ok(card) => {
                state.cards.push(card.clone());
                state.status.succeed();
                Ok(card)
            }
            Err(e) => {
                error!(error = %e, "failed to apply for card");
                state.status.fail(APPLY_CARD_FAILED);
                Err(AppError::Api(e))
            }
        }
    }

    /// Activate a newly issued card.
    pub async fn activate_card(&self, id: &str) -> Result<Card> {
        let result = self.api.activate_card(id).await;
        self.apply_replace(result, ACTIVATE_CARD_FAILED)
    }

    /// Block a card, giving a reason.
    pub async fn block_card(&self, id: &str, reason: &str) -> Result<Card> {
        let request = BlockCardRequest {
            reason: reason.to_string(),
        };
        let result = self.api.block_card(id, request).await;
        self.apply_replace(result, BLOCK_CARD_FAILED)
    }

    /// Lift a block.
    pub async fn unblock_card(&self, id: &str) -> Result<Card> {
        let result = self.api.unblock_card(id).await;
        self.apply_replace(result, UNBLOCK_CARD_FAILED)
    }

    /// Report a card lost.
    pub async fn report_lost(&self, id: &str) -> Result<Card> {
        let result = self.api.report_lost(id).await;
        self.apply_replace(result, REPORT_LOST_FAILED)
    }

    /// Report a card stolen.
    pub async fn report_stolen(&self, id: &str) -> Result<Card> {
        let result = self.api.report_stolen(id).await;
        self.apply_replace(result, REPORT_STOLEN_FAILED)
    }

    /// Request a credit limit change.
    pub async fn update_credit_limit(&self, id: &str, limit: f64) -> Result<Card> {
        let result = self
            .api
            .update_credit_limit(id, CreditLimitRequest { limit })
            .await;
        self.apply_replace(result, UPDATE_CREDIT_LIMIT_FAILED)
    }

    /// Set the card PIN. Pure passthrough: the PIN is validated locally,
    /// sent, and never stored.
    pub async fn set_pin(&self, id: &str, pin: &str) -> Result<()> {
        if let Err(reason) = validate_pin(pin) {
            return Err(AppError::Validation(reason));
        }
        self.api
            .set_pin(id, SetPinRequest { pin: pin.to_string() })
            .await
            .map_err(|e| {
                error!(error = %e, id, "failed to set PIN");
                AppError::Api(e)
            })
    }

    pub fn set_current_card(&self, card: Option<Card>) {
        self.state.write().current = card;
    }

    fn apply_replace(
        &self,
        result: std::result::Result<Card, String>,
        fixed: &str,
    ) -> Result<Card> {
        match result {
            Ok(updated) => {
                self.state.write().cards.replace(updated.clone());
                Ok(updated)
            }
            Err(e) => {
                error!(error = %e, "card update failed");
                self.state.write().status.fail(fixed);
                Err(AppError::Api(e))
            }
        }
    }

    // ---- snapshot readers ----

    pub fn cards(&self) -> Vec<Card> {
        self.state.read().cards.to_vec()
    }

    pub fn current_card(&self) -> Option<Card> {
        self.state.read().current.clone()
    }

    pub fn card_transactions(&self) -> Vec<CardTransaction> {
        self.state.read().card_transactions.to_vec()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().status.is_loading()
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().status.error().map(str::to_string)
    }

    // ---- derived views ----

    pub fn active_cards(&self) -> Vec<Card> {
        self.by_status(CardStatus::Active)
    }

    pub fn blocked_cards(&self) -> Vec<Card> {
        self.by_status(CardStatus::Blocked)
    }

    pub fn credit_cards(&self) -> Vec<Card> {
        self.by_type(CardType::Credit)
    }

    pub fn debit_cards(&self) -> Vec<Card> {
        self.by_type(CardType::Debit)
    }

    pub fn total_credit_limit(&self) -> f64 {
        self.state
            .read()
            .cards
            .items()
            .iter()
            .filter(|c| c.card_type == CardType::Credit)
            .map(|c| c.credit_limit.unwrap_or(0.0))
            .sum()
    }

    pub fn total_available_credit(&self) -> f64 {
        self.state
            .read()
            .cards
            .items()
            .iter()
            .filter(|c| c.card_type == CardType::Credit)
            .map(|c| c.available_credit.unwrap_or(0.0))
            .sum()
    }

    fn by_status(&self, status: CardStatus) -> Vec<Card> {
        self.state
            .read()
            .cards
            .items()
            .iter()
            .filter(|c| c.status == status)
            .cloned()
            .collect()
    }

    fn by_type(&self, card_type: CardType) -> Vec<Card> {
        self.state
            .read()
            .cards
            .items()
            .iter()
            .filter(|c| c.card_type == card_type)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use parking_lot::Mutex;
    use shared::CardBrand;

    fn card(id: &str, status: CardStatus, card_type: CardType) -> Card {
        Card {
            id: id.to_string(),
            card_number: "4532015112830366".to_string(),
            card_type,
            card_name: "Everyday".to_string(),
            account_id: "a1".to_string(),
            holder_name: "A. Customer".to_string(),
            expiry_date: Utc::now(),
            cvv: None,
            status,
            issued_date: Utc::now(),
            credit_limit: match card_type {
                CardType::Credit => Some(5000.0),
                _ => None,
            },
            available_credit: match card_type {
                CardType::Credit => Some(4200.0),
                _ => None,
            },
            outstanding_balance: None,
            minimum_payment: None,
            due_date: None,
            rewards_points: None,
            card_brand: CardBrand::Visa,
        }
    }

    #[derive(Default)]
    struct MockApi {
        cards: Mutex<Option<std::result::Result<Vec<Card>, String>>>,
        blocked: Mutex<Option<std::result::Result<Card, String>>>,
        pin: Mutex<Option<std::result::Result<(), String>>>,
    }

    #[async_trait::async_trait]
    impl CardApi for MockApi {
        async fn get_cards(&self) -> std::result::Result<Vec<Card>, String> {
            self.cards
                .lock()
                .clone()
                .unwrap_or_else(|| Err("unexpected get_cards".into()))
        }

        async fn get_card_transactions(
            &self,
            _card_id: &str,
        ) -> std::result::Result<Vec<CardTransaction>, String> {
            Ok(vec![])
        }

        async fn apply_for_card(
            &self,
            application: CardApplication,
        ) -> std::result::Result<Card, String> {
            Ok(card("c9", CardStatus::Active, application.card_type))
        }

        async fn activate_card(&self, id: &str) -> std::result::Result<Card, String> {
            Ok(card(id, CardStatus::Active, CardType::Debit))
        }

        async fn block_card(
            &self,
            _id: &str,
            _request: BlockCardRequest,
        ) -> std::result::Result<Card, String> {
            self.blocked
                .lock()
                .clone()
                .unwrap_or_else(|| Err("unexpected block_card".into()))
        }

        async fn unblock_card(&self, id: &str) -> std::result::Result<Card, String> {
            Ok(card(id, CardStatus::Active, CardType::Debit))
        }

        async fn report_lost(&self, id: &str) -> std::result::Result<Card, String> {
            Ok(card(id, CardStatus::Lost, CardType::Debit))
        }

        async fn report_stolen(&self, id: &str) -> std::result::Result<Card, String> {
            Ok(card(id, CardStatus::Stolen, CardType::Debit))
        }

        async fn update_credit_limit(
            &self,
            id: &str,
            request: CreditLimitRequest,
        ) -> std::result::Result<Card, String> {
            let mut updated = card(id, CardStatus::Active, CardType::Credit);
            updated.credit_limit = Some(request.limit);
            Ok(updated)
        }

        async fn set_pin(
            &self,
            _id: &str,
            _request: SetPinRequest,
        ) -> std::result::Result<(), String> {
            self.pin.lock().clone().unwrap_or(Ok(()))
        }
    }

    #[tokio::test]
    async fn block_card_updates_only_target_preserving_order() {
        let api = Arc::new(MockApi {
            cards: Mutex::new(Some(Ok(vec![
                card("c1", CardStatus::Active, CardType::Debit),
                card("c2", CardStatus::Active, CardType::Credit),
            ]))),
            blocked: Mutex::new(Some(Ok(card("c1", CardStatus::Blocked, CardType::Debit)))),
            ..Default::default()
        });
        let store = CardStore::new(api);
        store.fetch_cards().await;

        let blocked = store.block_card("c1", "lost").await.unwrap();

        assert_eq!(blocked.status, CardStatus::Blocked);
        let cards = store.cards();
        assert_eq!(cards[0].id, "c1");
        assert_eq!(cards[0].status, CardStatus::Blocked);
        assert_eq!(cards[1].id, "c2");
        assert_eq!(cards[1].status, CardStatus::Active);
        assert_eq!(store.blocked_cards().len(), 1);
    }

    #[tokio::test]
    async fn credit_views_sum_credit_cards_only() {
        let api = Arc::new(MockApi {
            cards: Mutex::new(Some(Ok(vec![
                card("c1", CardStatus::Active, CardType::Debit),
                card("c2", CardStatus::Active, CardType::Credit),
                card("c3", CardStatus::Active, CardType::Credit),
            ]))),
            ..Default::default()
        });
        let store = CardStore::new(api);
        store.fetch_cards().await;

        assert_eq!(store.credit_cards().len(), 2);
        assert_eq!(store.debit_cards().len(), 1);
        assert_eq!(store.total_credit_limit(), 10000.0);
        assert_eq!(store.total_available_credit(), 8400.0);
    }

    #[tokio::test]
    async fn invalid_pin_is_rejected_before_any_request() {
        let api = Arc::new(MockApi {
            pin: Mutex::new(Some(Err("should not be called".into()))),
            ..Default::default()
        });
        let store = CardStore::new(api);

        let err = store.set_pin("c1", "12").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = store.set_pin("c1", "12ab").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn valid_pin_passes_through() {
        let api = Arc::new(MockApi::default());
        let store = CardStore::new(api);

        store.set_pin("c1", "4821").await.unwrap();
    }

    #[tokio::test]
    async fn report_stolen_moves_card_out_of_active_view() {
        let api = Arc::new(MockApi {
            cards: Mutex::new(Some(Ok(vec![card(
                "c1",
                CardStatus::Active,
                CardType::Debit,
            )]))),
            ..Default::default()
        });
        let store = CardStore::new(api);
        store.fetch_cards().await;

        store.report_stolen("c1").await.unwrap();

        assert!(store.active_cards().is_empty());
        assert_eq!(store.cards()[0].status, CardStatus::Stolen);
    }
}
