//! # Data Transfer Objects (DTOs)
//!
//! All data structures exchanged with the banking REST API, one module per
//! domain.
//!
//! ## Module Organization
//!
//! - [`account`] - Accounts and the account summary aggregate
//! - [`beneficiary`] - Saved payees for transfers
//! - [`bill`] - Billers and bill payments
//! - [`budget`] - Budgets, categories, and spending analytics
//! - [`card`] - Debit/credit cards and card transactions
//! - [`investment`] - Holdings, portfolio, and investment orders
//! - [`loan`] - Loans, applications, payments, and EMI quotes
//! - [`statement`] - Account statements
//! - [`transaction`] - Account transactions and list filters
//! - [`transfer`] - Money transfers between accounts
//!
//! ## Serialization Format
//!
//! The API speaks camelCase JSON; every struct carries
//! `#[serde(rename_all = "camelCase")]` and closed string vocabularies are
//! `#[serde(rename_all = "snake_case")]` enums. Timestamps are RFC 3339
//! (`chrono::DateTime<Utc>`).

pub mod account;
pub mod beneficiary;
pub mod bill;
pub mod budget;
pub mod card;
pub mod investment;
pub mod loan;
pub mod statement;
pub mod transaction;
pub mod transfer;

pub use account::*;
pub use beneficiary::*;
pub use bill::*;
pub use budget::*;
pub use card::*;
pub use investment::*;
pub use loan::*;
pub use statement::*;
pub use transaction::*;
pub use transfer::*;
