//! # Banking API Client Module
//!
//! HTTP client for the banking REST API. One module per domain; each
//! function maps a method to exactly one endpoint and verb.
//!
//! ## Module Structure
//!
//! ```text
//! api/
//! ├── mod.rs           - Module exports
//! ├── client.rs        - ApiClient struct and service trait impls
//! ├── accounts.rs      - Account endpoints
//! ├── beneficiaries.rs - Saved payee endpoints
//! ├── bills.rs         - Biller and bill payment endpoints
//! ├── budgets.rs       - Budget and analytics endpoints
//! ├── cards.rs         - Card lifecycle endpoints
//! ├── investments.rs   - Portfolio and order endpoints
//! ├── loans.rs         - Loan, application, and repayment endpoints
//! ├── statements.rs    - Statement generation and download
//! ├── transactions.rs  - Transaction listing, search, and export
//! └── transfers.rs     - Transfer endpoints
//! ```

pub mod accounts;
pub mod beneficiaries;
pub mod bills;
pub mod budgets;
pub mod cards;
pub mod client;
pub mod investments;
pub mod loans;
pub mod statements;
pub mod transactions;
pub mod transfers;

pub use client::ApiClient;
