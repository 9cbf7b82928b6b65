//! # Card Endpoints
//!
//! Card listing, lifecycle transitions (activate, block, report), limits,
//! PIN, and the card transaction feed.

use super::client::ApiClient;
use serde_json::json;
use shared::{
    BlockCardRequest, Card, CardApplication, CardTransaction, CreditLimitRequest, SetPinRequest,
};

/// List all cards.
pub async fn get_cards(client: &ApiClient) -> Result<Vec<Card>, String> {
    let url = format!("{}/api/cards", client.base_url());

    let response = client
        .client
        .get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Vec<Card>>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to fetch cards: {}", response.status()))
    }
}

/// Get a single card by id.
pub async fn get_card(client: &ApiClient, id: &str) -> Result<Card, String> {
    let url = format!("{}/api/cards/{}", client.base_url(), id);

    let response = client
        .client
        .get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Card>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to fetch card: {}", response.status()))
    }
}

/// Apply for a new card.
pub async fn apply_for_card(
    client: &ApiClient,
    application: CardApplication,
) -> Result<Card, String> {
    let response = client
        .client
        .post(format!("{}/api/cards/apply", client.base_url()))
        .json(&application)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Card>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to apply for card: {}", response.status()))
    }
}

/// Activate a newly issued card.
pub async fn activate_card(client: &ApiClient, id: &str) -> Result<Card, String> {
    lifecycle(client, id, "activate").await
}

/// Block a card, giving a reason.
#[tracing::instrument(skip(client, request), fields(reason = %request.reason))]
pub async fn block_card(
    client: &ApiClient,
    id: &str,
    request: BlockCardRequest,
) -> Result<Card, String> {
    let response = client
        .client
        .put(format!("{}/api/cards/{}/block", client.base_url(), id))
        .json(&request)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Card>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to block card: {}", response.status()))
    }
}

/// Lift a block.
pub async fn unblock_card(client: &ApiClient, id: &str) -> Result<Card, String> {
    lifecycle(client, id, "unblock").await
}

/// Report a card lost.
pub async fn report_lost(client: &ApiClient, id: &str) -> Result<Card, String> {
    lifecycle(client, id, "report-lost").await
}

/// Report a card stolen.
pub async fn report_stolen(client: &ApiClient, id: &str) -> Result<Card, String> {
    lifecycle(client, id, "report-stolen").await
}

/// Card lifecycle transitions share a verb/path/body shape.
async fn lifecycle(client: &ApiClient, id: &str, action: &str) -> Result<Card, String> {
    let response = client
        .client
        .put(format!("{}/api/cards/{}/{}", client.base_url(), id, action))
        .json(&json!({}))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Card>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to {} card: {}", action, response.status()))
    }
}

/// List transactions made with a card.
pub async fn get_card_transactions(
    client: &ApiClient,
    card_id: &str,
) -> Result<Vec<CardTransaction>, String> {
    let url = format!("{}/api/cards/{}/transactions", client.base_url(), card_id);

    let response = client
        .client
        .get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Vec<CardTransaction>>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to fetch card transactions: {}", response.status()))
    }
}

/// Request a credit limit change.
pub async fn update_credit_limit(
    client: &ApiClient,
    id: &str,
    request: CreditLimitRequest,
) -> Result<Card, String> {
    let response = client
        .client
        .put(format!("{}/api/cards/{}/credit-limit", client.base_url(), id))
        .json(&request)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Card>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to update credit limit: {}", response.status()))
    }
}

/// Set the card PIN. The PIN travels only in the request body and is never
/// logged.
pub async fn set_pin(client: &ApiClient, id: &str, request: SetPinRequest) -> Result<(), String> {
    let response = client
        .client
        .put(format!("{}/api/cards/{}/pin", client.base_url(), id))
        .json(&request)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        Ok(())
    } else {
        Err(format!("Failed to set PIN: {}", response.status()))
    }
}
