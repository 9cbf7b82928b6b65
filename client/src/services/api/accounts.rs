//! # Account Endpoints
//!
//! Account listing, lifecycle operations, and the server-computed summary.

use super::client::ApiClient;
use serde_json::json;
use shared::{Account, AccountRequest, AccountSummary};

/// List all accounts for the current customer.
pub async fn get_accounts(client: &ApiClient) -> Result<Vec<Account>, String> {
    let url = format!("{}/api/accounts", client.base_url());

    let response = client
        .client
        .get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Vec<Account>>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to fetch accounts: {}", response.status()))
    }
}

/// Get a single account by id.
pub async fn get_account(client: &ApiClient, id: &str) -> Result<Account, String> {
    let url = format!("{}/api/accounts/{}", client.base_url(), id);

    let response = client
        .client
        .get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Account>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to fetch account: {}", response.status()))
    }
}

/// Get the server-computed totals across all accounts.
pub async fn get_account_summary(client: &ApiClient) -> Result<AccountSummary, String> {
    let url = format!("{}/api/accounts/summary", client.base_url());

    let response = client
        .client
        .get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<AccountSummary>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to fetch account summary: {}", response.status()))
    }
}

/// Open a new account.
pub async fn create_account(
    client: &ApiClient,
    request: AccountRequest,
) -> Result<Account, String> {
    let response = client
        .client
        .post(format!("{}/api/accounts", client.base_url()))
        .json(&request)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Account>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to create account: {}", response.status()))
    }
}

/// Update account details.
pub async fn update_account(
    client: &ApiClient,
    id: &str,
    request: AccountRequest,
) -> Result<Account, String> {
    let response = client
        .client
        .put(format!("{}/api/accounts/{}", client.base_url(), id))
        .json(&request)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Account>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to update account: {}", response.status()))
    }
}

/// Close an account.
pub async fn close_account(client: &ApiClient, id: &str) -> Result<(), String> {
    let response = client
        .client
        .delete(format!("{}/api/accounts/{}", client.base_url(), id))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        Ok(())
    } else {
        Err(format!("Failed to close account: {}", response.status()))
    }
}

/// Freeze an account.
#[tracing::instrument(skip(client))]
pub async fn freeze_account(client: &ApiClient, id: &str) -> Result<Account, String> {
    status_change(client, id, "freeze").await
}

/// Lift a freeze.
#[tracing::instrument(skip(client))]
pub async fn unfreeze_account(client: &ApiClient, id: &str) -> Result<Account, String> {
    status_change(client, id, "unfreeze").await
}

async fn status_change(client: &ApiClient, id: &str, action: &str) -> Result<Account, String> {
    let response = client
        .client
        .put(format!("{}/api/accounts/{}/{}", client.base_url(), id, action))
        .json(&json!({}))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Account>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to {} account: {}", action, response.status()))
    }
}
