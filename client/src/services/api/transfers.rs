//! # Transfer Endpoints
//!
//! Transfer listing, creation, pre-flight validation, and cancellation.

use super::client::ApiClient;
use serde_json::json;
use shared::{mask_number, Transfer, TransferRequest, TransferValidation};

/// List all transfers.
pub async fn get_transfers(client: &ApiClient) -> Result<Vec<Transfer>, String> {
    let url = format!("{}/api/transfers", client.base_url());

    let response = client
        .client
        .get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Vec<Transfer>>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to fetch transfers: {}", response.status()))
    }
}

/// Get a single transfer by id.
pub async fn get_transfer(client: &ApiClient, id: &str) -> Result<Transfer, String> {
    let url = format!("{}/api/transfers/{}", client.base_url(), id);

    let response = client
        .client
        .get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Transfer>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to fetch transfer: {}", response.status()))
    }
}

/// Initiate a transfer.
pub async fn create_transfer(
    client: &ApiClient,
    request: TransferRequest,
) -> Result<Transfer, String> {
    tracing::info!(
        to_account = %mask_number(&request.to_account_number, 4),
        amount = request.amount,
        transfer_type = ?request.transfer_type,
        "Submitting transfer"
    );

    let response = client
        .client
        .post(format!("{}/api/transfers", client.base_url()))
        .json(&request)
        .send()
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Transfer network error");
            format!("Network error: {}", e)
        })?;

    if response.status().is_success() {
        response
            .json::<Transfer>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to create transfer: {}", response.status()))
    }
}

/// Ask the server to validate a transfer request without executing it.
pub async fn validate_transfer(
    client: &ApiClient,
    request: TransferRequest,
) -> Result<TransferValidation, String> {
    let response = client
        .client
        .post(format!("{}/api/transfers/validate", client.base_url()))
        .json(&request)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<TransferValidation>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to validate transfer: {}", response.status()))
    }
}

/// Cancel a pending transfer.
pub async fn cancel_transfer(client: &ApiClient, id: &str) -> Result<Transfer, String> {
    let response = client
        .client
        .put(format!("{}/api/transfers/{}/cancel", client.base_url(), id))
        .json(&json!({}))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Transfer>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to cancel transfer: {}", response.status()))
    }
}

/// List transfers scheduled for a future date.
pub async fn get_scheduled_transfers(client: &ApiClient) -> Result<Vec<Transfer>, String> {
    let url = format!("{}/api/transfers/scheduled", client.base_url());

    let response = client
        .client
        .get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Vec<Transfer>>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to fetch scheduled transfers: {}", response.status()))
    }
}

/// List standing recurring transfers.
pub async fn get_recurring_transfers(client: &ApiClient) -> Result<Vec<Transfer>, String> {
    let url = format!("{}/api/transfers/recurring", client.base_url());

    let response = client
        .client
        .get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Vec<Transfer>>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to fetch recurring transfers: {}", response.status()))
    }
}
