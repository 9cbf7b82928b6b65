//! Stores are created once at application start and must begin with
//! empty/idle defaults, without touching the network.

use client::{ApiClient, Stores};
use std::sync::Arc;

#[test]
fn stores_start_empty_and_idle() {
    let stores = Stores::new(Arc::new(ApiClient::new()));

    assert!(stores.accounts.accounts().is_empty());
    assert!(stores.accounts.current_account().is_none());
    assert!(stores.accounts.summary().is_none());
    assert!(!stores.accounts.is_loading());
    assert_eq!(stores.accounts.error(), None);

    assert!(stores.beneficiaries.beneficiaries().is_empty());
    assert!(stores.bills.billers().is_empty());
    assert!(stores.bills.payments().is_empty());
    assert!(stores.budgets.budgets().is_empty());
    assert!(stores.budgets.analytics().is_none());
    assert!(stores.cards.cards().is_empty());
    assert!(stores.investments.portfolio().is_none());
    assert!(stores.investments.investments().is_empty());
    assert!(stores.loans.loans().is_empty());
    assert!(stores.loans.applications().is_empty());
    assert!(stores.statements.statements().is_empty());
    assert!(stores.transactions.transactions().is_empty());
    assert!(stores.transactions.filter().is_none());
    assert!(stores.transfers.transfers().is_empty());

    // Empty snapshots mean empty derived views and zero aggregates.
    assert!(stores.accounts.active_accounts().is_empty());
    assert_eq!(stores.accounts.total_balance(), 0.0);
    assert_eq!(stores.loans.total_outstanding(), 0.0);
    assert_eq!(stores.investments.total_value(), 0.0);
}
