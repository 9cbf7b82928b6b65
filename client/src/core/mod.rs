//! # Core Abstractions
//!
//! Error types and the dependency-injection service traits used throughout
//! the data layer.
//!
//! - **[`error`]**: application error types (`AppError`, `Result<T>`)
//! - **[`service`]**: per-domain service traits implemented by
//!   [`crate::services::api::ApiClient`] and mocked in store tests

pub mod error;
pub mod service;

pub use error::{AppError, Result};
pub use service::{
    AccountApi, BeneficiaryApi, BillApi, BudgetApi, CardApi, InvestmentApi, LoanApi, StatementApi,
    TransactionApi, TransferApi,
};
