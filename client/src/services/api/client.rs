//! # API Client
//!
//! Main HTTP client for banking API communication.

use crate::core::service::{
    AccountApi, BeneficiaryApi, BillApi, BudgetApi, CardApi, InvestmentApi, LoanApi, StatementApi,
    TransactionApi, TransferApi,
};
use reqwest::Client;
use shared::{
    Account, AccountRequest, AccountSummary, AutoPayRequest, Beneficiary, BeneficiaryRequest,
    BeneficiaryUpdate, BillPayment, BillPaymentRequest, Biller, BlockCardRequest, Budget,
    BudgetCategory, BudgetRequest, BuyInvestmentRequest, Card, CardApplication, CardTransaction,
    CreditLimitRequest, EmailStatementRequest, Investment, InvestmentTransaction, Loan,
    LoanApplication, LoanPayment, LoanPaymentRequest, Portfolio, SellInvestmentRequest,
    SetPinRequest, SpendingAnalytics, Statement, StatementRequest, Transaction, TransactionFilter,
    Transfer, TransferRequest, TransferValidation,
};

/// Default base URL for the banking API gateway.
const API_BASE_URL: &str = "http://127.0.0.1:3001";

/// Request timeout. A hung backend must not leave a store loading forever.
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// HTTP client for communicating with the banking REST API.
///
/// Maintains a connection pool; cheap to clone behind an `Arc`. The
/// embedding application is expected to hold one instance for its whole
/// lifetime and hand it to [`crate::stores::Stores`].
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client against the default base URL.
    pub fn new() -> Self {
        Self::with_base_url(API_BASE_URL)
    }

    /// Create a client against a specific gateway, e.g. a staging
    /// environment.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Base URL requests are built against.
    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl AccountApi for ApiClient {
    async fn get_accounts(&self) -> Result<Vec<Account>, String> {
        super::accounts::get_accounts(self).await
    }

    async fn get_account(&self, id: &str) -> Result<Account, String> {
        super::accounts::get_account(self, id).await
    }

    async fn get_account_summary(&self) -> Result<AccountSummary, String> {
        super::accounts::get_account_summary(self).await
    }

    async fn create_account(&self, request: AccountRequest) -> Result<Account, String> {
        super::accounts::create_account(self, request).await
    }

    async fn update_account(&self, id: &str, request: AccountRequest) -> Result<Account, String> {
        super::accounts::update_account(self, id, request).await
    }

    async fn close_account(&self, id: &str) -> Result<(), String> {
        super::accounts::close_account(self, id).await
    }

    async fn freeze_account(&self, id: &str) -> Result<Account, String> {
        super::accounts::freeze_account(self, id).await
    }

    async fn unfreeze_account(&self, id: &str) -> Result<Account, String> {
        super::accounts::unfreeze_account(self, id).await
    }
}

#[async_trait::async_trait]
impl BeneficiaryApi for ApiClient {
    async fn get_beneficiaries(&self) -> Result<Vec<Beneficiary>, String> {
        super::beneficiaries::get_beneficiaries(self).await
    }

    async fn add_beneficiary(&self, request: BeneficiaryRequest) -> Result<Beneficiary, String> {
        super::beneficiaries::add_beneficiary(self, request).await
    }

    async fn update_beneficiary(
        &self,
        id: &str,
        update: BeneficiaryUpdate,
    ) -> Result<Beneficiary, String> {
        super::beneficiaries::update_beneficiary(self, id, update).await
    }

    async fn delete_beneficiary(&self, id: &str) -> Result<(), String> {
        super::beneficiaries::delete_beneficiary(self, id).await
    }

    async fn verify_beneficiary(&self, id: &str) -> Result<Beneficiary, String> {
        super::beneficiaries::verify_beneficiary(self, id).await
    }

    async fn search_beneficiaries(&self, query: &str) -> Result<Vec<Beneficiary>, String> {
        super::beneficiaries::search_beneficiaries(self, query).await
    }
}

#[async_trait::async_trait]
impl BillApi for ApiClient {
    async fn get_billers(&self) -> Result<Vec<Biller>, String> {
        super::bills::get_billers(self).await
    }

    async fn search_billers(&self, query: &str) -> Result<Vec<Biller>, String> {
        super::bills::search_billers(self, query).await
    }

    async fn get_payments(&self) -> Result<Vec<BillPayment>, String> {
        super::bills::get_payments(self).await
    }

    async fn get_scheduled_payments(&self) -> Result<Vec<BillPayment>, String> {
        super::bills::get_scheduled_payments(self).await
    }

    async fn create_payment(&self, request: BillPaymentRequest) -> Result<BillPayment, String> {
        super::bills::create_payment(self, request).await
    }

    async fn cancel_payment(&self, id: &str) -> Result<BillPayment, String> {
        super::bills::cancel_payment(self, id).await
    }

    async fn update_auto_pay(
        &self,
        id: &str,
        request: AutoPayRequest,
    ) -> Result<BillPayment, String> {
        super::bills::update_auto_pay(self, id, request).await
    }
}

#[async_trait::async_trait]
impl BudgetApi for ApiClient {
    async fn get_budgets(&self) -> Result<Vec<Budget>, String> {
        super::budgets::get_budgets(self).await
    }

    async fn get_budget_categories(&self) -> Result<Vec<BudgetCategory>, String> {
        super::budgets::get_budget_categories(self).await
    }

    async fn get_spending_analytics(
        &self,
        account_id: &str,
    ) -> Result<SpendingAnalytics, String> {
        super::budgets::get_spending_analytics(self, account_id).await
    }

    async fn create_budget(&self, request: BudgetRequest) -> Result<Budget, String> {
        super::budgets::create_budget(self, request).await
    }

    async fn update_budget(&self, id: &str, request: BudgetRequest) -> Result<Budget, String> {
        super::budgets::update_budget(self, id, request).await
    }

    async fn delete_budget(&self, id: &str) -> Result<(), String> {
        super::budgets::delete_budget(self, id).await
    }
}

#[async_trait::async_trait]
impl CardApi for ApiClient {
    async fn get_cards(&self) -> Result<Vec<Card>, String> {
        super::cards::get_cards(self).await
    }

    async fn get_card_transactions(&self, card_id: &str) -> Result<Vec<CardTransaction>, String> {
        super::cards::get_card_transactions(self, card_id).await
    }

    async fn apply_for_card(&self, application: CardApplication) -> Result<Card, String> {
        super::cards::apply_for_card(self, application).await
    }

    async fn activate_card(&self, id: &str) -> Result<Card, String> {
        super::cards::activate_card(self, id).await
    }

    async fn block_card(&self, id: &str, request: BlockCardRequest) -> Result<Card, String> {
        super::cards::block_card(self, id, request).await
    }

    async fn unblock_card(&self, id: &str) -> Result<Card, String> {
        super::cards::unblock_card(self, id).await
    }

    async fn report_lost(&self, id: &str) -> Result<Card, String> {
        super::cards::report_lost(self, id).await
    }

    async fn report_stolen(&self, id: &str) -> Result<Card, String> {
        super::cards::report_stolen(self, id).await
    }

    async fn update_credit_limit(
        &self,
        id: &str,
        request: CreditLimitRequest,
    ) -> Result<Card, String> {
        super::cards::update_credit_limit(self, id, request).await
    }

    async fn set_pin(&self, id: &str, request: SetPinRequest) -> Result<(), String> {
        super::cards::set_pin(self, id, request).await
    }
}

#[async_trait::async_trait]
impl InvestmentApi for ApiClient {
    async fn get_portfolio(&self) -> Result<Portfolio, String> {
        super::investments::get_portfolio(self).await
    }

    async fn get_investments(&self) -> Result<Vec<Investment>, String> {
        super::investments::get_investments(self).await
    }

    async fn get_investment_transactions(
        &self,
        id: &str,
    ) -> Result<Vec<InvestmentTransaction>, String> {
        super::investments::get_investment_transactions(self, id).await
    }

    async fn buy_investment(&self, request: BuyInvestmentRequest) -> Result<Investment, String> {
        super::investments::buy_investment(self, request).await
    }

    async fn sell_investment(
        &self,
        id: &str,
        request: SellInvestmentRequest,
    ) -> Result<InvestmentTransaction, String> {
        super::investments::sell_investment(self, id, request).await
    }
}

#[async_trait::async_trait]
impl LoanApi for ApiClient {
    async fn get_loans(&self) -> Result<Vec<Loan>, String> {
        super::loans::get_loans(self).await
    }

    async fn get_loan_applications(&self) -> Result<Vec<LoanApplication>, String> {
        super::loans::get_loan_applications(self).await
    }

    async fn apply_for_loan(
        &self,
        application: LoanApplication,
    ) -> Result<LoanApplication, String> {
        super::loans::apply_for_loan(self, application).await
    }

    async fn get_loan_payments(&self, loan_id: &str) -> Result<Vec<LoanPayment>, String> {
        super::loans::get_loan_payments(self, loan_id).await
    }

    async fn make_payment(
        &self,
        loan_id: &str,
        request: LoanPaymentRequest,
    ) -> Result<LoanPayment, String> {
        super::loans::make_payment(self, loan_id, request).await
    }
}

#[async_trait::async_trait]
impl StatementApi for ApiClient {
    async fn get_statements(&self, account_id: &str) -> Result<Vec<Statement>, String> {
        super::statements::get_statements(self, account_id).await
    }

    async fn get_statement(&self, id: &str) -> Result<Statement, String> {
        super::statements::get_statement(self, id).await
    }

    async fn generate_statement(&self, request: StatementRequest) -> Result<Statement, String> {
        super::statements::generate_statement(self, request).await
    }

    async fn download_statement(&self, id: &str) -> Result<Vec<u8>, String> {
        super::statements::download_statement(self, id).await
    }

    async fn email_statement(
        &self,
        id: &str,
        request: EmailStatementRequest,
    ) -> Result<(), String> {
        super::statements::email_statement(self, id, request).await
    }
}

#[async_trait::async_trait]
impl TransactionApi for ApiClient {
    async fn get_transactions(
        &self,
        filter: Option<TransactionFilter>,
    ) -> Result<Vec<Transaction>, String> {
        super::transactions::get_transactions(self, filter).await
    }

    async fn get_account_transactions(
        &self,
        account_id: &str,
    ) -> Result<Vec<Transaction>, String> {
        super::transactions::get_account_transactions(self, account_id).await
    }

    async fn search_transactions(&self, query: &str) -> Result<Vec<Transaction>, String> {
        super::transactions::search_transactions(self, query).await
    }

    async fn export_transactions(
        &self,
        filter: TransactionFilter,
        format: &str,
    ) -> Result<Vec<u8>, String> {
        super::transactions::export_transactions(self, filter, format).await
    }
}

#[async_trait::async_trait]
impl TransferApi for ApiClient {
    async fn get_transfers(&self) -> Result<Vec<Transfer>, String> {
        super::transfers::get_transfers(self).await
    }

    async fn get_scheduled_transfers(&self) -> Result<Vec<Transfer>, String> {
        super::transfers::get_scheduled_transfers(self).await
    }

    async fn get_recurring_transfers(&self) -> Result<Vec<Transfer>, String> {
        super::transfers::get_recurring_transfers(self).await
    }

    async fn create_transfer(&self, request: TransferRequest) -> Result<Transfer, String> {
        super::transfers::create_transfer(self, request).await
    }

    async fn validate_transfer(
        &self,
        request: TransferRequest,
    ) -> Result<TransferValidation, String> {
        super::transfers::validate_transfer(self, request).await
    }

    async fn cancel_transfer(&self, id: &str) -> Result<Transfer, String> {
        super::transfers::cancel_transfer(self, id).await
    }
}
