use crate::core::{
    errors::ExchangeError,
    types::{Balance, Order, OrderRequest, Price, Quantity},
};
use async_trait::async_trait;

#[async_trait]
pub trait MarketDataSource {
    /// Get all tradable symbols
    async fn get_symbols(&self) -> Result<Vec<String>, ExchangeError>;

    /// Current lowest ask for a symbol
    async fn get_current_price(&self, symbol: &str) -> Result<Price, ExchangeError>;
}

#[async_trait]
pub trait OrderPlacer {
    /// Place a new order
    async fn place_order(&self, order: OrderRequest) -> Result<Order, ExchangeError>;

    /// Stop-limit buy spending `dollar_amount` at `limit_price`; requires `stop_price < limit_price`
    async fn stop_limit_buy(
        &self,
        symbol: &str,
        dollar_amount: Quantity,
        stop_price: Price,
        limit_price: Price,
    ) -> Result<Order, ExchangeError>;

    /// Stop-limit sell of `amount` units; requires `stop_price > limit_price`
    async fn stop_limit_sell(
        &self,
        symbol: &str,
        amount: Quantity,
        stop_price: Price,
        limit_price: Price,
    ) -> Result<Order, ExchangeError>;

    async fn cancel_order(&self, order_id: u64) -> Result<Order, ExchangeError>;
}

#[async_trait]
pub trait AccountInfo {
    async fn get_account_balance(&self) -> Result<Vec<Balance>, ExchangeError>;
}

// Composite trait for callers that need every capability
pub trait ExchangeConnector: MarketDataSource + OrderPlacer + AccountInfo {}
