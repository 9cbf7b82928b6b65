//! # Budget DTOs
//!
//! Budgets, their category catalog, and the server-computed spending
//! analytics aggregate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Budgeting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetPeriod {
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

/// Server-assigned health of a budget versus its spend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    OnTrack,
    Warning,
    Exceeded,
}

/// A spending budget tied to an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub account_id: String,
    pub category: String,
    pub budget_amount: f64,
    pub spent_amount: f64,
    pub period: BudgetPeriod,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    /// Alert trigger as a percentage of the budget amount.
    pub alert_threshold: f64,
    pub status: BudgetStatus,
}

/// Partial budget payload for create/update requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<BudgetPeriod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_threshold: Option<f64>,
}

/// Catalog entry for picking a budget category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetCategory {
    pub name: String,
    pub icon: String,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_amount: Option<f64>,
}

/// One category slice of the analytics breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySpend {
    pub category: String,
    pub amount: f64,
    pub percentage: f64,
}

/// One month of the analytics comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySpend {
    pub month: String,
    pub amount: f64,
}

/// One merchant row of the analytics top list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantSpend {
    pub name: String,
    pub amount: f64,
    pub count: u32,
}

/// Server-computed spending analytics for an account, displayed verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingAnalytics {
    pub total_spending: f64,
    pub category_breakdown: Vec<CategorySpend>,
    pub monthly_comparison: Vec<MonthlySpend>,
    pub top_merchants: Vec<MerchantSpend>,
}
