use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::core::traits::{AccountInfo, ExchangeConnector, MarketDataSource, OrderPlacer};
use crate::core::types::{Balance, Order, OrderRequest, Price, Quantity};
use async_trait::async_trait;

pub mod account;
pub mod market_data;
pub mod trading;

pub use account::Account;
pub use market_data::MarketData;
pub use trading::Trading;

/// Gemini connector that composes all sub-trait implementations
#[derive(Debug)]
pub struct GeminiConnector<R: RestClient> {
    pub market: MarketData<R>,
    pub trading: Trading<R>,
    pub account: Account<R>,
}

impl<R: RestClient + Clone> GeminiConnector<R> {
    pub fn new(rest: R) -> Self {
        Self {
            market: MarketData::new(&rest),
            trading: Trading::new(&rest),
            account: Account::new(&rest),
        }
    }
}

#[async_trait]
impl<R: RestClient> MarketDataSource for GeminiConnector<R> {
    async fn get_symbols(&self) -> Result<Vec<String>, ExchangeError> {
        self.market.get_symbols().await
    }

    async fn get_current_price(&self, symbol: &str) -> Result<Price, ExchangeError> {
        self.market.get_current_price(symbol).await
    }
}

#[async_trait]
impl<R: RestClient> OrderPlacer for GeminiConnector<R> {
    async fn place_order(&self, order: OrderRequest) -> Result<Order, ExchangeError> {
        self.trading.place_order(order).await
    }

    async fn stop_limit_buy(
        &self,
        symbol: &str,
        dollar_amount: Quantity,
        stop_price: Price,
        limit_price: Price,
    ) -> Result<Order, ExchangeError> {
        self.trading
            .stop_limit_buy(symbol, dollar_amount, stop_price, limit_price)
            .await
    }

    async fn stop_limit_sell(
        &self,
        symbol: &str,
        amount: Quantity,
        stop_price: Price,
        limit_price: Price,
    ) -> Result<Order, ExchangeError> {
        self.trading
            .stop_limit_sell(symbol, amount, stop_price, limit_price)
            .await
    }

    async fn cancel_order(&self, order_id: u64) -> Result<Order, ExchangeError> {
        self.trading.cancel_order(order_id).await
    }
}

#[async_trait]
impl<R: RestClient> AccountInfo for GeminiConnector<R> {
    async fn get_account_balance(&self) -> Result<Vec<Balance>, ExchangeError> {
        self.account.get_account_balance().await
    }
}

impl<R: RestClient> ExchangeConnector for GeminiConnector<R> {}
