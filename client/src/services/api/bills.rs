//! # Biller and Bill Payment Endpoints

use super::client::ApiClient;
use serde_json::json;
use shared::{AutoPayRequest, BillPayment, BillPaymentRequest, Biller};

/// List registered billers.
pub async fn get_billers(client: &ApiClient) -> Result<Vec<Biller>, String> {
    let url = format!("{}/api/billers", client.base_url());

    let response = client
        .client
        .get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Vec<Biller>>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to fetch billers: {}", response.status()))
    }
}

/// Get a single biller by id.
pub async fn get_biller(client: &ApiClient, id: &str) -> Result<Biller, String> {
    let url = format!("{}/api/billers/{}", client.base_url(), id);

    let response = client
        .client
        .get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Biller>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to fetch biller: {}", response.status()))
    }
}

/// Search billers by name.
pub async fn search_billers(client: &ApiClient, query: &str) -> Result<Vec<Biller>, String> {
    let url = format!("{}/api/billers/search", client.base_url());

    let response = client
        .client
        .get(&url)
        .query(&[("q", query)])
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Vec<Biller>>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to search billers: {}", response.status()))
    }
}

/// List all bill payments.
pub async fn get_payments(client: &ApiClient) -> Result<Vec<BillPayment>, String> {
    let url = format!("{}/api/bill-payments", client.base_url());

    let response = client
        .client
        .get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Vec<BillPayment>>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to fetch payments: {}", response.status()))
    }
}

/// Get a single bill payment by id.
pub async fn get_payment(client: &ApiClient, id: &str) -> Result<BillPayment, String> {
    let url = format!("{}/api/bill-payments/{}", client.base_url(), id);

    let response = client
        .client
        .get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<BillPayment>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to fetch payment: {}", response.status()))
    }
}

/// List payments still in the scheduled state.
pub async fn get_scheduled_payments(client: &ApiClient) -> Result<Vec<BillPayment>, String> {
    let url = format!("{}/api/bill-payments/scheduled", client.base_url());

    let response = client
        .client
        .get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Vec<BillPayment>>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to fetch scheduled payments: {}", response.status()))
    }
}

/// Schedule a bill payment.
pub async fn create_payment(
    client: &ApiClient,
    request: BillPaymentRequest,
) -> Result<BillPayment, String> {
    let response = client
        .client
        .post(format!("{}/api/bill-payments", client.base_url()))
        .json(&request)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<BillPayment>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to create payment: {}", response.status()))
    }
}

/// Cancel a scheduled payment.
pub async fn cancel_payment(client: &ApiClient, id: &str) -> Result<BillPayment, String> {
    let response = client
        .client
        .put(format!("{}/api/bill-payments/{}/cancel", client.base_url(), id))
        .json(&json!({}))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<BillPayment>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to cancel payment: {}", response.status()))
    }
}

/// Toggle auto-pay on a recurring payment.
pub async fn update_auto_pay(
    client: &ApiClient,
    id: &str,
    request: AutoPayRequest,
) -> Result<BillPayment, String> {
    let response = client
        .client
        .put(format!("{}/api/bill-payments/{}/auto-pay", client.base_url(), id))
        .json(&request)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<BillPayment>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to update auto-pay: {}", response.status()))
    }
}
