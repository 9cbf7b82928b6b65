//! # Statement Endpoints
//!
//! Statement listing, generation, email delivery, and the binary download.

use super::client::ApiClient;
use shared::{EmailStatementRequest, Statement, StatementRequest};

/// List statements for an account.
pub async fn get_statements(
    client: &ApiClient,
    account_id: &str,
) -> Result<Vec<Statement>, String> {
    let url = format!("{}/api/statements", client.base_url());

    let response = client
        .client
        .get(&url)
        .query(&[("accountId", account_id)])
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Vec<Statement>>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to fetch statements: {}", response.status()))
    }
}

/// Get a single statement by id.
pub async fn get_statement(client: &ApiClient, id: &str) -> Result<Statement, String> {
    let url = format!("{}/api/statements/{}", client.base_url(), id);

    let response = client
        .client
        .get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Statement>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to fetch statement: {}", response.status()))
    }
}

/// Ask the server to generate a statement for a period.
pub async fn generate_statement(
    client: &ApiClient,
    request: StatementRequest,
) -> Result<Statement, String> {
    let response = client
        .client
        .post(format!("{}/api/statements/generate", client.base_url()))
        .json(&request)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Statement>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to generate statement: {}", response.status()))
    }
}

/// Download a statement file. The payload is opaque bytes (PDF/Excel/CSV),
/// not JSON.
pub async fn download_statement(client: &ApiClient, id: &str) -> Result<Vec<u8>, String> {
    let url = format!("{}/api/statements/{}/download", client.base_url(), id);

    let response = client
        .client
        .get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .bytes()
            .await
            .map(|body| body.to_vec())
            .map_err(|e| format!("Failed to read download: {}", e))
    } else {
        Err(format!("Failed to download statement: {}", response.status()))
    }
}

/// Ask the server to email a statement to an address.
pub async fn email_statement(
    client: &ApiClient,
    id: &str,
    request: EmailStatementRequest,
) -> Result<(), String> {
    let response = client
        .client
        .post(format!("{}/api/statements/{}/email", client.base_url(), id))
        .json(&request)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        Ok(())
    } else {
        Err(format!("Failed to email statement: {}", response.status()))
    }
}
