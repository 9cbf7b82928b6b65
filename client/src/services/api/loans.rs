//! # Loan Endpoints
//!
//! Loans, applications, repayments, the EMI calculator, and the
//! amortization schedule. All figures come from the server.

use super::client::ApiClient;
use shared::{EmiRequest, EmiResponse, Loan, LoanApplication, LoanPayment, LoanPaymentRequest};

/// List all loans.
pub async fn get_loans(client: &ApiClient) -> Result<Vec<Loan>, String> {
    let url = format!("{}/api/loans", client.base_url());

    let response = client
        .client
        .get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Vec<Loan>>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to fetch loans: {}", response.status()))
    }
}

/// Get a single loan by id.
pub async fn get_loan(client: &ApiClient, id: &str) -> Result<Loan, String> {
    let url = format!("{}/api/loans/{}", client.base_url(), id);

    let response = client
        .client
        .get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Loan>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to fetch loan: {}", response.status()))
    }
}

/// Submit a loan application.
#[tracing::instrument(skip(client, application), fields(loan_type = ?application.loan_type, requested = application.requested_amount))]
pub async fn apply_for_loan(
    client: &ApiClient,
    application: LoanApplication,
) -> Result<LoanApplication, String> {
    let response = client
        .client
        .post(format!("{}/api/loans/apply", client.base_url()))
        .json(&application)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<LoanApplication>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to submit loan application: {}", response.status()))
    }
}

/// List the customer's loan applications.
pub async fn get_loan_applications(client: &ApiClient) -> Result<Vec<LoanApplication>, String> {
    let url = format!("{}/api/loans/applications", client.base_url());

    let response = client
        .client
        .get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Vec<LoanApplication>>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to fetch loan applications: {}", response.status()))
    }
}

/// List repayments applied to a loan.
pub async fn get_loan_payments(
    client: &ApiClient,
    loan_id: &str,
) -> Result<Vec<LoanPayment>, String> {
    let url = format!("{}/api/loans/{}/payments", client.base_url(), loan_id);

    let response = client
        .client
        .get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Vec<LoanPayment>>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to fetch loan payments: {}", response.status()))
    }
}

/// Make a repayment against a loan.
pub async fn make_payment(
    client: &ApiClient,
    loan_id: &str,
    request: LoanPaymentRequest,
) -> Result<LoanPayment, String> {
    let response = client
        .client
        .post(format!("{}/api/loans/{}/payments", client.base_url(), loan_id))
        .json(&request)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<LoanPayment>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to make payment: {}", response.status()))
    }
}

/// Ask the server to quote a monthly installment. The response carries a
/// single figure, returned here as the narrowed `f64`.
pub async fn calculate_emi(
    client: &ApiClient,
    principal: f64,
    rate: f64,
    term: u32,
) -> Result<f64, String> {
    let request = EmiRequest {
        principal,
        rate,
        term,
    };

    let response = client
        .client
        .post(format!("{}/api/loans/calculate-emi", client.base_url()))
        .json(&request)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<EmiResponse>()
            .await
            .map(|quote| quote.emi)
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to calculate EMI: {}", response.status()))
    }
}

/// Fetch the server-computed amortization schedule for a loan.
pub async fn get_amortization_schedule(
    client: &ApiClient,
    loan_id: &str,
) -> Result<Vec<LoanPayment>, String> {
    let url = format!("{}/api/loans/{}/amortization", client.base_url(), loan_id);

    let response = client
        .client
        .get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Vec<LoanPayment>>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to fetch amortization schedule: {}", response.status()))
    }
}
