//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the client data layer and the
//! banking REST API. All DTOs use JSON serialization via `serde`.
//!
//! ## Structure
//!
//! - **[`dto`]**: one module per banking domain (accounts, cards, loans, ...)
//! - **[`utils`]**: shared display helpers (account/card number masking)
//!
//! ## Wire Format
//!
//! The API speaks camelCase JSON with RFC 3339 timestamps:
//! - Struct fields are Rust snake_case mapped with `#[serde(rename_all = "camelCase")]`
//! - Closed status/type/category vocabularies are enums mapped with
//!   `#[serde(rename_all = "snake_case")]`
//! - Optional fields are omitted when `None` (`#[serde(skip_serializing_if = "Option::is_none")]`)
//! - All types implement both `Serialize` and `Deserialize`

pub mod dto;
pub mod utils;

// Re-export commonly used types for convenience.
// Wildcard re-exports are deliberate: shared is a DTO library where every
// export is public API.
pub use dto::*;
pub use utils::*;
