//! # Stores Module
//!
//! Client-side state containers, one per banking domain. Each store owns
//! the last-fetched collections for its domain, an optional `current`
//! selection, and a loading/error pair, all behind a `parking_lot::RwLock`
//! held only for the duration of a state transition.
//!
//! ## Action classification
//!
//! - **Primary fetch**: toggles `loading`; on success replaces the
//!   collection wholesale; on failure keeps the stale snapshot and sets
//!   the action's fixed error message. Returns `()`.
//! - **Background fetch**: same replacement semantics without the loading
//!   flag; failures only reach the diagnostic channel.
//! - **Create**: guarded against duplicate submission; appends or
//!   prepends the server's returned representation; records the fixed
//!   message *and* returns the error on failure.
//! - **Update/status transition**: replaces the entity in place by id
//!   (position preserved); the result of an update against an id that was
//!   never loaded is dropped.
//! - **Delete**: removes by id; absent ids are a no-op.
//!
//! Derived views are recomputed from the snapshot on every read and never
//! cached.

pub mod account;
pub mod beneficiary;
pub mod bill;
pub mod budget;
pub mod card;
pub mod collection;
pub mod investment;
pub mod loan;
pub mod statement;
pub mod transaction;
pub mod transfer;

pub use account::AccountStore;
pub use beneficiary::BeneficiaryStore;
pub use bill::BillStore;
pub use budget::BudgetStore;
pub use card::CardStore;
pub use collection::{Collection, Entity, StoreStatus};
pub use investment::InvestmentStore;
pub use loan::LoanStore;
pub use statement::StatementStore;
pub use transaction::TransactionStore;
pub use transfer::TransferStore;

use crate::services::api::ApiClient;
use std::sync::Arc;

/// The full set of domain stores, created once at application start and
/// alive for the process lifetime.
pub struct Stores {
    pub accounts: AccountStore,
    pub beneficiaries: BeneficiaryStore,
    pub bills: BillStore,
    pub budgets: BudgetStore,
    pub cards: CardStore,
    pub investments: InvestmentStore,
    pub loans: LoanStore,
    pub statements: StatementStore,
    pub transactions: TransactionStore,
    pub transfers: TransferStore,
}

impl Stores {
    /// Build every store against one shared API client.
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            accounts: AccountStore::new(api.clone()),
            beneficiaries: BeneficiaryStore::new(api.clone()),
            bills: BillStore::new(api.clone()),
            budgets: BudgetStore::new(api.clone()),
            cards: CardStore::new(api.clone()),
            investments: InvestmentStore::new(api.clone()),
            loans: LoanStore::new(api.clone()),
            statements: StatementStore::new(api.clone()),
            transactions: TransactionStore::new(api.clone()),
            transfers: TransferStore::new(api),
        }
    }
}
