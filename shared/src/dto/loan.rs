//! # Loan DTOs
//!
//! Loans, loan applications, repayments, and EMI quotes. Amortization
//! figures come from the server and are never recomputed client-side.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Loan product type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanType {
    Personal,
    Home,
    Auto,
    Business,
    Student,
}

/// Loan lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    Active,
    PaidOff,
    Defaulted,
    PendingApproval,
}

/// An active or settled loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub id: String,
    pub loan_type: LoanType,
    pub account_id: String,
    pub principal_amount: f64,
    pub outstanding_balance: f64,
    pub interest_rate: f64,
    /// Term in months.
    pub term: u32,
    pub monthly_payment: f64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub next_payment_date: DateTime<Utc>,
    pub status: LoanStatus,
    pub total_paid: f64,
    pub total_interest_paid: f64,
    pub remaining_payments: u32,
}

/// Review status of a loan application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanApplicationStatus {
    Draft,
    Submitted,
    UnderReview,
    Approved,
    Rejected,
}

/// A loan application. `id`, `status`, and `application_date` are assigned
/// by the server and absent before submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanApplication {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub loan_type: LoanType,
    pub requested_amount: f64,
    pub term: u32,
    pub purpose: String,
    pub employment_status: String,
    pub annual_income: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LoanApplicationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_date: Option<DateTime<Utc>>,
}

/// One repayment applied to a loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanPayment {
    pub id: String,
    pub loan_id: String,
    pub amount: f64,
    pub payment_date: DateTime<Utc>,
    pub principal_paid: f64,
    pub interest_paid: f64,
    pub remaining_balance: f64,
}

/// Body for the repayment endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanPaymentRequest {
    pub amount: f64,
}

/// Body for the EMI calculator endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmiRequest {
    pub principal: f64,
    pub rate: f64,
    pub term: u32,
}

/// EMI calculator response; callers unwrap the single figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmiResponse {
    pub emi: f64,
}
