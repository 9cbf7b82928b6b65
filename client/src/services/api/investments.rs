//! # Investment Endpoints
//!
//! Portfolio, holdings, orders, and market lookups. The securities search
//! and market data endpoints return provider-shaped JSON the client does
//! not model; they stay `serde_json::Value`.

use super::client::ApiClient;
use shared::{
    BuyInvestmentRequest, Investment, InvestmentTransaction, Portfolio, SellInvestmentRequest,
};

/// Fetch the server-computed portfolio aggregate.
pub async fn get_portfolio(client: &ApiClient) -> Result<Portfolio, String> {
    let url = format!("{}/api/investments/portfolio", client.base_url());

    let response = client
        .client
        .get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Portfolio>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to fetch portfolio: {}", response.status()))
    }
}

/// List all holdings.
pub async fn get_investments(client: &ApiClient) -> Result<Vec<Investment>, String> {
    let url = format!("{}/api/investments", client.base_url());

    let response = client
        .client
        .get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Vec<Investment>>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to fetch investments: {}", response.status()))
    }
}

/// Get a single holding by id.
pub async fn get_investment(client: &ApiClient, id: &str) -> Result<Investment, String> {
    let url = format!("{}/api/investments/{}", client.base_url(), id);

    let response = client
        .client
        .get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Investment>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to fetch investment: {}", response.status()))
    }
}

/// Place a buy order.
#[tracing::instrument(skip(client, request), fields(symbol = %request.symbol, quantity = request.quantity))]
pub async fn buy_investment(
    client: &ApiClient,
    request: BuyInvestmentRequest,
) -> Result<Investment, String> {
    let response = client
        .client
        .post(format!("{}/api/investments/buy", client.base_url()))
        .json(&request)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Investment>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to buy investment: {}", response.status()))
    }
}

/// Place a sell order against a holding.
pub async fn sell_investment(
    client: &ApiClient,
    id: &str,
    request: SellInvestmentRequest,
) -> Result<InvestmentTransaction, String> {
    let response = client
        .client
        .post(format!("{}/api/investments/{}/sell", client.base_url(), id))
        .json(&request)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<InvestmentTransaction>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to sell investment: {}", response.status()))
    }
}

/// List settled buys/sells for a holding.
pub async fn get_investment_transactions(
    client: &ApiClient,
    id: &str,
) -> Result<Vec<InvestmentTransaction>, String> {
    let url = format!("{}/api/investments/{}/transactions", client.base_url(), id);

    let response = client
        .client
        .get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Vec<InvestmentTransaction>>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to fetch investment transactions: {}", response.status()))
    }
}

/// Search tradable securities. Provider-shaped payload.
pub async fn search_securities(
    client: &ApiClient,
    query: &str,
) -> Result<Vec<serde_json::Value>, String> {
    let url = format!("{}/api/investments/search", client.base_url());

    let response = client
        .client
        .get(&url)
        .query(&[("q", query)])
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<Vec<serde_json::Value>>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to search securities: {}", response.status()))
    }
}

/// Fetch market data for a symbol. Provider-shaped payload.
pub async fn get_market_data(
    client: &ApiClient,
    symbol: &str,
) -> Result<serde_json::Value, String> {
    let url = format!("{}/api/investments/market-data/{}", client.base_url(), symbol);

    let response = client
        .client
        .get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.status().is_success() {
        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(format!("Failed to fetch market data: {}", response.status()))
    }
}
