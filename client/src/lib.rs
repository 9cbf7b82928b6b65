//! # Banking Client Data Layer - Library Root
//!
//! Typed data access for a consumer banking application: REST service
//! wrappers and client-side entity stores. The surrounding UI consumes
//! store state and dispatches store actions; nothing here renders, routes,
//! or computes financial figures - all balances, rates, and schedules are
//! produced by the backend API and displayed verbatim.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                client (this crate)                   │
//! ├──────────────────────────────────────────────────────┤
//! │  stores     - per-domain state containers            │
//! │               (collections, loading/error, views)    │
//! │  services   - per-domain REST endpoint wrappers      │
//! │  core       - AppError + service traits (DI)         │
//! │  debug      - tracing initialization                 │
//! └──────────────────────────────────────────────────────┘
//!                          │ HTTP/JSON
//!                          ▼
//!               ┌─────────────────────┐
//!               │  Banking REST API   │
//!               │  /api/accounts/*    │
//!               │  /api/transfers/*   │
//!               │  /api/loans/* ...   │
//!               └─────────────────────┘
//! ```
//!
//! ## State Management
//!
//! Each store guards its snapshot with a `parking_lot::RwLock` held only
//! for the duration of a state transition, never across an await. Store
//! actions perform exactly one network call and apply exactly one
//! structural mutation (replace wholesale, append/prepend one, replace one
//! by id, remove one by id). Derived views are recomputed on every read.
//!
//! ## Error Convention
//!
//! Fetch-style actions swallow failures into the store's error field;
//! write-style actions record the fixed message *and* return the error to
//! the caller. The detailed cause goes to the `tracing` diagnostic channel
//! and is never kept in state.

pub mod core;
pub mod debug;
pub mod services;
pub mod stores;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::{AppError, Result};
pub use crate::services::api::ApiClient;
pub use crate::stores::Stores;
