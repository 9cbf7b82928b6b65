//! # Statement DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Statement file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementFormat {
    Pdf,
    Excel,
    Csv,
}

/// A generated account statement for a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statement {
    pub id: String,
    pub account_id: String,
    pub statement_date: DateTime<Utc>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub opening_balance: f64,
    pub closing_balance: f64,
    pub total_credits: f64,
    pub total_debits: f64,
    pub transaction_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    pub format: StatementFormat,
}

/// Payload for generating a statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementRequest {
    pub account_id: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub format: StatementFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_details: Option<bool>,
}

/// Body for the email-delivery endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailStatementRequest {
    pub email: String,
}
