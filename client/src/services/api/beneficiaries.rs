//! # Beneficiary Endpoints
//!
//! Saved payee management and verification.

use super::client::ApiClient;
use serde_json::json;
use shared::{Beneficiary, BeneficiaryRequest, BeneficiaryUpdate};

/// List all saved payees.
pub async fn get_beneficiaries(client: &ApiClient) -> Result<Vec<Beneficiary>, String> {
    let url = format!("{}/api/beneficiaries", client.base_url());

    let response = client
        .client
        .get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Vec<Beneficiary>>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to fetch beneficiaries: {}", response.status()))
    }
}

/// Get a single payee by id.
pub async fn get_beneficiary(client: &ApiClient, id: &str) -> Result<Beneficiary, String> {
    let url = format!("{}/api/beneficiaries/{}", client.base_url(), id);

    let response = client
        .client
        .get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Beneficiary>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to fetch beneficiary: {}", response.status()))
    }
}

/// Register a new payee.
pub async fn add_beneficiary(
    client: &ApiClient,
    request: BeneficiaryRequest,
) -> Result<Beneficiary, String> {
    let response = client
        .client
        .post(format!("{}/api/beneficiaries", client.base_url()))
        .json(&request)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Beneficiary>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to add beneficiary: {}", response.status()))
    }
}

/// Edit an existing payee's details.
pub async fn update_beneficiary(
    client: &ApiClient,
    id: &str,
    update: BeneficiaryUpdate,
) -> Result<Beneficiary, String> {
    let response = client
        .client
        .put(format!("{}/api/beneficiaries/{}", client.base_url(), id))
        .json(&update)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Beneficiary>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to update beneficiary: {}", response.status()))
    }
}

/// Remove a payee.
pub async fn delete_beneficiary(client: &ApiClient, id: &str) -> Result<(), String> {
    let response = client
        .client
        .delete(format!("{}/api/beneficiaries/{}", client.base_url(), id))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        Ok(())
    } else {
        Err(format!("Failed to delete beneficiary: {}", response.status()))
    }
}

/// Mark a payee as verified.
pub async fn verify_beneficiary(client: &ApiClient, id: &str) -> Result<Beneficiary, String> {
    let response = client
        .client
        .put(format!("{}/api/beneficiaries/{}/verify", client.base_url(), id))
        .json(&json!({}))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Beneficiary>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to verify beneficiary: {}", response.status()))
    }
}

/// Search payees by name or bank.
pub async fn search_beneficiaries(
    client: &ApiClient,
    query: &str,
) -> Result<Vec<Beneficiary>, String> {
    let url = format!("{}/api/beneficiaries/search", client.base_url());

    let response = client
        .client
        .get(&url)
        .query(&[("q", query)])
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Vec<Beneficiary>>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to search beneficiaries: {}", response.status()))
    }
}
