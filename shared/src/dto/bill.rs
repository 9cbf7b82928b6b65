//! # Biller and Bill Payment DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Biller vertical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillerCategory {
    Utilities,
    Telecom,
    Insurance,
    Loan,
    CreditCard,
    Subscription,
    Other,
}

/// A payee company registered with the bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Biller {
    pub id: String,
    pub name: String,
    pub category: BillerCategory,
    pub account_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_amount: Option<f64>,
}

/// Bill payment lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillPaymentStatus {
    Scheduled,
    Paid,
    Overdue,
    Cancelled,
}

/// Repeat cadence for recurring payments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillFrequency {
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

/// A scheduled or settled bill payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillPayment {
    pub id: String,
    pub biller_id: String,
    pub biller_name: String,
    pub account_id: String,
    pub amount: f64,
    pub due_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<DateTime<Utc>>,
    pub status: BillPaymentStatus,
    pub recurring: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<BillFrequency>,
    pub auto_pay_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

/// Payload for scheduling a bill payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillPaymentRequest {
    pub biller_id: String,
    pub account_id: String,
    pub amount: f64,
    pub payment_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurring: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<BillFrequency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_pay_enabled: Option<bool>,
}

/// Body for the auto-pay toggle endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoPayRequest {
    pub enabled: bool,
}
