//! # Account DTOs
//!
//! Bank accounts and the server-computed account summary aggregate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    Checking,
    Savings,
    Business,
    Investment,
}

/// Account lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    Active,
    Inactive,
    Frozen,
}

/// A bank account as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub account_number: String,
    pub account_type: AccountType,
    pub account_name: String,
    pub balance: f64,
    pub currency: String,
    pub status: AccountStatus,
    pub opened_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_transaction: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overdraft_limit: Option<f64>,
}

/// Server-computed account totals, displayed verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub total_accounts: u32,
    pub total_balance: f64,
    pub active_accounts: u32,
    pub inactive_accounts: u32,
}

/// Partial account payload for open/update requests; the server fills in
/// everything it owns (id, number, balance, dates).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_type: Option<AccountType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overdraft_limit: Option<f64>,
}
