//! # Investment DTOs
//!
//! Holdings, the portfolio aggregate, and buy/sell orders. All valuations
//! and gain/loss figures are computed server-side and displayed verbatim.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Asset class of a holding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestmentType {
    Stock,
    Bond,
    MutualFund,
    Etf,
    Crypto,
}

/// A single holding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    pub id: String,
    pub account_id: String,
    pub symbol: String,
    pub name: String,
    #[serde(rename = "type")]
    pub investment_type: InvestmentType,
    pub quantity: f64,
    pub purchase_price: f64,
    pub current_price: f64,
    pub purchase_date: DateTime<Utc>,
    pub current_value: f64,
    pub total_gain_loss: f64,
    pub percentage_change: f64,
}

/// Portfolio allocation percentages by asset class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diversification {
    pub stocks: f64,
    pub bonds: f64,
    pub mutual_funds: f64,
    pub etfs: f64,
    pub crypto: f64,
}

/// Server-computed portfolio aggregate with the full holdings list embedded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub total_value: f64,
    pub total_invested: f64,
    pub total_gain_loss: f64,
    pub percentage_return: f64,
    pub investments: Vec<Investment>,
    pub diversification: Diversification,
}

/// Buy or sell side of an investment transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderSide {
    Buy,
    Sell,
}

/// A settled buy/sell against a holding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentTransaction {
    pub id: String,
    pub investment_id: String,
    #[serde(rename = "type")]
    pub side: OrderSide,
    pub quantity: f64,
    pub price_per_unit: f64,
    pub total_amount: f64,
    pub fees: f64,
    pub date: DateTime<Utc>,
}

/// Body for the buy endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyInvestmentRequest {
    pub symbol: String,
    pub quantity: f64,
    pub account_id: String,
}

/// Body for the sell endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellInvestmentRequest {
    pub quantity: f64,
}
