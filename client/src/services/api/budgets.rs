//! # Budget Endpoints
//!
//! Budget CRUD, the category catalog, and spending analytics.

use super::client::ApiClient;
use shared::{Budget, BudgetCategory, BudgetRequest, SpendingAnalytics};

/// List all budgets.
pub async fn get_budgets(client: &ApiClient) -> Result<Vec<Budget>, String> {
    let url = format!("{}/api/budgets", client.base_url());

    let response = client
        .client
        .get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Vec<Budget>>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to fetch budgets: {}", response.status()))
    }
}

/// Get a single budget by id.
pub async fn get_budget(client: &ApiClient, id: &str) -> Result<Budget, String> {
    let url = format!("{}/api/budgets/{}", client.base_url(), id);

    let response = client
        .client
        .get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Budget>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to fetch budget: {}", response.status()))
    }
}

/// Fetch the category catalog.
pub async fn get_budget_categories(client: &ApiClient) -> Result<Vec<BudgetCategory>, String> {
    let url = format!("{}/api/budgets/categories", client.base_url());

    let response = client
        .client
        .get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Vec<BudgetCategory>>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to fetch categories: {}", response.status()))
    }
}

/// Fetch the server-computed spending analytics for an account.
pub async fn get_spending_analytics(
    client: &ApiClient,
    account_id: &str,
) -> Result<SpendingAnalytics, String> {
    let url = format!("{}/api/budgets/analytics/{}", client.base_url(), account_id);

    let response = client
        .client
        .get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<SpendingAnalytics>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to fetch analytics: {}", response.status()))
    }
}

/// Create a budget.
pub async fn create_budget(client: &ApiClient, request: BudgetRequest) -> Result<Budget, String> {
    let response = client
        .client
        .post(format!("{}/api/budgets", client.base_url()))
        .json(&request)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Budget>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to create budget: {}", response.status()))
    }
}

/// Update a budget.
pub async fn update_budget(
    client: &ApiClient,
    id: &str,
    request: BudgetRequest,
) -> Result<Budget, String> {
    let response = client
        .client
        .put(format!("{}/api/budgets/{}", client.base_url(), id))
        .json(&request)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Budget>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to update budget: {}", response.status()))
    }
}

/// Delete a budget.
pub async fn delete_budget(client: &ApiClient, id: &str) -> Result<(), String> {
    let response = client
        .client
        .delete(format!("{}/api/budgets/{}", client.base_url(), id))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        Ok(())
    } else {
        Err(format!("Failed to delete budget: {}", response.status()))
    }
}
