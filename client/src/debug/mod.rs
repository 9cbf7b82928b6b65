//! # Diagnostics
//!
//! File-based logging for the data layer. The stores keep only fixed
//! human-readable error messages in state; everything else - the detailed
//! service error, the request that caused it - goes through `tracing` and
//! ends up here.
//!
//! ## Usage
//!
//! The embedding application calls [`logger::init`] once at startup:
//!
//! ```rust,no_run
//! client::debug::logger::init();
//! ```
//!
//! Configure with environment variables:
//!
//! - `RUST_LOG` / `BANK_CLIENT_LOG` - filter, e.g. `client=debug,info`
//! - `BANK_CLIENT_LOG_DIR` - log directory (default `logs`)

pub mod config;
pub mod logger;

pub use config::DebugConfig;
