//! # Transaction DTOs
//!
//! Account transactions and the list/export filter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Debit,
    Credit,
}

/// Transaction category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionCategory {
    Transfer,
    Payment,
    Deposit,
    Withdrawal,
    Fee,
    Interest,
}

/// Settlement status of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Completed,
    Pending,
    Failed,
}

/// A ledger entry on an account. `balance` is the running balance after the
/// entry, computed server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub account_id: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category: TransactionCategory,
    pub amount: f64,
    pub currency: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub status: TransactionStatus,
    pub balance: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Filter for transaction listing and export. Values travel as query
/// parameters, so type/category stay loose strings here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_amount: Option<f64>,
}

impl TransactionFilter {
    /// Render the set fields as query-string pairs, in declaration order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(account_id) = &self.account_id {
            pairs.push(("accountId", account_id.clone()));
        }
        if let Some(start_date) = &self.start_date {
            pairs.push(("startDate", start_date.to_rfc3339()));
        }
        if let Some(end_date) = &self.end_date {
            pairs.push(("endDate", end_date.to_rfc3339()));
        }
        if let Some(transaction_type) = &self.transaction_type {
            pairs.push(("type", transaction_type.clone()));
        }
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        if let Some(min_amount) = self.min_amount {
            pairs.push(("minAmount", min_amount.to_string()));
        }
        if let Some(max_amount) = self.max_amount {
            pairs.push(("maxAmount", max_amount.to_string()));
        }
        pairs
    }
}
