//! # Service Traits
//!
//! Per-domain traits over the REST endpoints the stores call, enabling
//! dependency injection: each store holds an `Arc<dyn ...Api>` so tests can
//! substitute a mock without any network. [`crate::services::api::ApiClient`]
//! implements every trait by delegating to the endpoint modules.
//!
//! Endpoints no store consumes (lookups by id, the EMI calculator, the
//! securities search) are exposed as free functions in
//! `crate::services::api` only.
//!
//! All methods use the service layer's `Result<T, String>` convention: the
//! `Err` string carries the detailed cause (network, status, or decode
//! failure) and the store decides what, if anything, to retain.

use async_trait::async_trait;
use shared::{
    Account, AccountRequest, AccountSummary, AutoPayRequest, Beneficiary, BeneficiaryRequest,
    BeneficiaryUpdate, BillPayment, BillPaymentRequest, Biller, BlockCardRequest, Budget,
    BudgetCategory, BudgetRequest, BuyInvestmentRequest, Card, CardApplication, CardTransaction,
    CreditLimitRequest, EmailStatementRequest, Investment, InvestmentTransaction, Loan,
    LoanApplication, LoanPayment, LoanPaymentRequest, Portfolio, SellInvestmentRequest,
    SetPinRequest, SpendingAnalytics, Statement, StatementRequest, Transaction, TransactionFilter,
    Transfer, TransferRequest, TransferValidation,
};

/// Account endpoints used by the account store.
#[async_trait]
pub trait AccountApi: Send + Sync {
    async fn get_accounts(&self) -> Result<Vec<Account>, String>;
    async fn get_account(&self, id: &str) -> Result<Account, String>;
    async fn get_account_summary(&self) -> Result<AccountSummary, String>;
    async fn create_account(&self, request: AccountRequest) -> Result<Account, String>;
    async fn update_account(&self, id: &str, request: AccountRequest) -> Result<Account, String>;
    async fn close_account(&self, id: &str) -> Result<(), String>;
    async fn freeze_account(&self, id: &str) -> Result<Account, String>;
    async fn unfreeze_account(&self, id: &str) -> Result<Account, String>;
}

/// Beneficiary endpoints used by the beneficiary store.
#[async_trait]
pub trait BeneficiaryApi: Send + Sync {
    async fn get_beneficiaries(&self) -> Result<Vec<Beneficiary>, String>;
    async fn add_beneficiary(&self, request: BeneficiaryRequest) -> Result<Beneficiary, String>;
    async fn update_beneficiary(
        &self,
        id: &str,
        update: BeneficiaryUpdate,
    ) -> Result<Beneficiary, String>;
    async fn delete_beneficiary(&self, id: &str) -> Result<(), String>;
    async fn verify_beneficiary(&self, id: &str) -> Result<Beneficiary, String>;
    async fn search_beneficiaries(&self, query: &str) -> Result<Vec<Beneficiary>, String>;
}

/// Biller and bill payment endpoints used by the bill store.
#[async_trait]
pub trait BillApi: Send + Sync {
    async fn get_billers(&self) -> Result<Vec<Biller>, String>;
    async fn search_billers(&self, query: &str) -> Result<Vec<Biller>, String>;
    async fn get_payments(&self) -> Result<Vec<BillPayment>, String>;
    async fn get_scheduled_payments(&self) -> Result<Vec<BillPayment>, String>;
    async fn create_payment(&self, request: BillPaymentRequest) -> Result<BillPayment, String>;
    async fn cancel_payment(&self, id: &str) -> Result<BillPayment, String>;
    async fn update_auto_pay(&self, id: &str, request: AutoPayRequest)
        -> Result<BillPayment, String>;
}

/// Budget endpoints used by the budget store.
#[async_trait]
pub trait BudgetApi: Send + Sync {
    async fn get_budgets(&self) -> Result<Vec<Budget>, String>;
    async fn get_budget_categories(&self) -> Result<Vec<BudgetCategory>, String>;
    async fn get_spending_analytics(&self, account_id: &str)
        -> Result<SpendingAnalytics, String>;
    async fn create_budget(&self, request: BudgetRequest) -> Result<Budget, String>;
    async fn update_budget(&self, id: &str, request: BudgetRequest) -> Result<Budget, String>;
    async fn delete_budget(&self, id: &str) -> Result<(), String>;
}

/// Card endpoints used by the card store.
#[async_trait]
pub trait CardApi: Send + Sync {
    async fn get_cards(&self) -> Result<Vec<Card>, String>;
    async fn get_card_transactions(&self, card_id: &str) -> Result<Vec<CardTransaction>, String>;
    async fn apply_for_card(&self, application: CardApplication) -> Result<Card, String>;
    async fn activate_card(&self, id: &str) -> Result<Card, String>;
    async fn block_card(&self, id: &str, request: BlockCardRequest) -> Result<Card, String>;
    async fn unblock_card(&self, id: &str) -> Result<Card, String>;
    async fn report_lost(&self, id: &str) -> Result<Card, String>;
    async fn report_stolen(&self, id: &str) -> Result<Card, String>;
    async fn update_credit_limit(
        &self,
        id: &str,
        request: CreditLimitRequest,
    ) -> Result<Card, String>;
    async fn set_pin(&self, id: &str, request: SetPinRequest) -> Result<(), String>;
}

/// Investment endpoints used by the investment store.
#[async_trait]
pub trait InvestmentApi: Send + Sync {
    async fn get_portfolio(&self) -> Result<Portfolio, String>;
    async fn get_investments(&self) -> Result<Vec<Investment>, String>;
    async fn get_investment_transactions(
        &self,
        id: &str,
    ) -> Result<Vec<InvestmentTransaction>, String>;
    async fn buy_investment(&self, request: BuyInvestmentRequest) -> Result<Investment, String>;
    async fn sell_investment(
        &self,
        id: &str,
        request: SellInvestmentRequest,
    ) -> Result<InvestmentTransaction, String>;
}

/// Loan endpoints used by the loan store.
#[async_trait]
pub trait LoanApi: Send + Sync {
    async fn get_loans(&self) -> Result<Vec<Loan>, String>;
    async fn get_loan_applications(&self) -> Result<Vec<LoanApplication>, String>;
    async fn apply_for_loan(&self, application: LoanApplication)
        -> Result<LoanApplication, String>;
    async fn get_loan_payments(&self, loan_id: &str) -> Result<Vec<LoanPayment>, String>;
    async fn make_payment(
        &self,
        loan_id: &str,
        request: LoanPaymentRequest,
    ) -> Result<LoanPayment, String>;
}

/// Statement endpoints used by the statement store.
#[async_trait]
pub trait StatementApi: Send + Sync {
    async fn get_statements(&self, account_id: &str) -> Result<Vec<Statement>, String>;
    async fn get_statement(&self, id: &str) -> Result<Statement, String>;
    async fn generate_statement(&self, request: StatementRequest) -> Result<Statement, String>;
    async fn download_statement(&self, id: &str) -> Result<Vec<u8>, String>;
    async fn email_statement(
        &self,
        id: &str,
        request: EmailStatementRequest,
    ) -> Result<(), String>;
}

/// Transaction endpoints used by the transaction store.
#[async_trait]
pub trait TransactionApi: Send + Sync {
    async fn get_transactions(
        &self,
        filter: Option<TransactionFilter>,
    ) -> Result<Vec<Transaction>, String>;
    async fn get_account_transactions(&self, account_id: &str)
        -> Result<Vec<Transaction>, String>;
    async fn search_transactions(&self, query: &str) -> Result<Vec<Transaction>, String>;
    async fn export_transactions(
        &self,
        filter: TransactionFilter,
        format: &str,
    ) -> Result<Vec<u8>, String>;
}

/// Transfer endpoints used by the transfer store.
#[async_trait]
pub trait TransferApi: Send + Sync {
    async fn get_transfers(&self) -> Result<Vec<Transfer>, String>;
    async fn get_scheduled_transfers(&self) -> Result<Vec<Transfer>, String>;
    async fn get_recurring_transfers(&self) -> Result<Vec<Transfer>, String>;
    async fn create_transfer(&self, request: TransferRequest) -> Result<Transfer, String>;
    async fn validate_transfer(
        &self,
        request: TransferRequest,
    ) -> Result<TransferValidation, String>;
    async fn cancel_transfer(&self, id: &str) -> Result<Transfer, String>;
}
