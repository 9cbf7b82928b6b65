//! # Card DTOs
//!
//! Debit/credit cards and their transaction feed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Card product type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardType {
    Debit,
    Credit,
    Prepaid,
}

/// Card lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardStatus {
    Active,
    Blocked,
    Expired,
    Lost,
    Stolen,
}

/// Card network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardBrand {
    Visa,
    Mastercard,
    Amex,
    Discover,
}

/// A payment card as returned by the API. Credit-specific fields are absent
/// on debit and prepaid cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub card_number: String,
    pub card_type: CardType,
    pub card_name: String,
    pub account_id: String,
    pub holder_name: String,
    pub expiry_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cvv: Option<String>,
    pub status: CardStatus,
    pub issued_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_credit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outstanding_balance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_payment: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rewards_points: Option<f64>,
    pub card_brand: CardBrand,
}

/// Card transaction settlement status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardTransactionStatus {
    Posted,
    Pending,
    Declined,
}

/// One purchase on a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardTransaction {
    pub id: String,
    pub card_id: String,
    pub merchant: String,
    pub amount: f64,
    pub currency: String,
    pub date: DateTime<Utc>,
    pub category: String,
    pub status: CardTransactionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Payload for a new card application; the issuer assigns number, dates,
/// and limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardApplication {
    pub card_type: CardType,
    pub account_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_brand: Option<CardBrand>,
}

/// Body for the block endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockCardRequest {
    pub reason: String,
}

/// Body for the credit-limit endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditLimitRequest {
    pub limit: f64,
}

/// Body for the PIN endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetPinRequest {
    pub pin: String,
}
