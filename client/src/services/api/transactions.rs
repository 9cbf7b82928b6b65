//! # Transaction Endpoints
//!
//! Transaction listing with filters, search, and the binary export.

use super::client::ApiClient;
use shared::{Transaction, TransactionFilter};

/// List transactions, optionally narrowed by a filter. Filter fields
/// travel as query parameters.
pub async fn get_transactions(
    client: &ApiClient,
    filter: Option<TransactionFilter>,
) -> Result<Vec<Transaction>, String> {
    let url = format!("{}/api/transactions", client.base_url());
    let pairs = filter.map(|f| f.query_pairs()).unwrap_or_default();

    let response = client
        .client
        .get(&url)
        .query(&pairs)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Vec<Transaction>>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to fetch transactions: {}", response.status()))
    }
}

/// Get a single transaction by id.
pub async fn get_transaction(client: &ApiClient, id: &str) -> Result<Transaction, String> {
    let url = format!("{}/api/transactions/{}", client.base_url(), id);

    let response = client
        .client
        .get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Transaction>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to fetch transaction: {}", response.status()))
    }
}

/// List the transactions of one account.
pub async fn get_account_transactions(
    client: &ApiClient,
    account_id: &str,
) -> Result<Vec<Transaction>, String> {
    let url = format!("{}/api/accounts/{}/transactions", client.base_url(), account_id);

    let response = client
        .client
        .get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Vec<Transaction>>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to fetch account transactions: {}", response.status()))
    }
}

/// Full-text search over transaction descriptions and merchants.
pub async fn search_transactions(
    client: &ApiClient,
    query: &str,
) -> Result<Vec<Transaction>, String> {
    let url = format!("{}/api/transactions/search", client.base_url());

    let response = client
        .client
        .get(&url)
        .query(&[("q", query)])
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Vec<Transaction>>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to search transactions: {}", response.status()))
    }
}

/// Export filtered transactions as a file. The payload is opaque bytes
/// (CSV or PDF), not JSON.
pub async fn export_transactions(
    client: &ApiClient,
    filter: TransactionFilter,
    format: &str,
) -> Result<Vec<u8>, String> {
    let url = format!("{}/api/transactions/export", client.base_url());
    let mut pairs = vec![("format", format.to_string())];
    pairs.extend(filter.query_pairs());

    let response = client
        .client
        .get(&url)
        .query(&pairs)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .bytes()
            .await
            .map(|body| body.to_vec())
            .map_err(|e| format!("Failed to read export: {}", e))
    } else {
        Err(format!("Failed to export transactions: {}", response.status()))
    }
}
