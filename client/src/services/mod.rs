//! # Services Module
//!
//! External service integrations for the banking client.
//!
//! ```text
//! services/
//! └── api/    - Banking REST API client
//!              (accounts, cards, transfers, loans, ...)
//! ```
//!
//! Every service function performs exactly one HTTP request and returns
//! the decoded domain model; there are no retries, no caching, and no
//! batching at this layer.

pub mod api;
