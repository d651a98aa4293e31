//! Polling stop-limit trading loop
//!
//! Every tick fetches the current ask. At or below the buy stop it places a
//! stop-limit buy for `trading_amount` dollars; at or above the sell stop it
//! places a stop-limit sell for `trading_amount / price` units. Failures are
//! logged and the loop keeps going.

use crate::core::errors::ExchangeError;
use crate::core::traits::{MarketDataSource, OrderPlacer};
use crate::core::types::{Order, Price, Quantity};
use crate::exchanges::gemini::conversions;
use rust_decimal::Decimal;
use std::time::Duration;
use tracing::{error, info, instrument, warn};

/// Thresholds and sizing for [`TradingBot`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotConfig {
    pub symbol: String,
    /// Dollars committed per order
    pub trading_amount: Quantity,
    pub buy_stop_price: Price,
    pub buy_limit_price: Price,
    pub sell_stop_price: Price,
    pub sell_limit_price: Price,
    pub interval: Duration,
}

impl BotConfig {
    /// Default thresholds: buy 101 / 101.5, sell 109 / 108.5, every 10 seconds
    pub fn new(symbol: impl Into<String>, trading_amount: Quantity) -> Self {
        Self {
            symbol: symbol.into(),
            trading_amount,
            buy_stop_price: Price::new(Decimal::new(101, 0)),
            buy_limit_price: Price::new(Decimal::new(1015, 1)),
            sell_stop_price: Price::new(Decimal::new(109, 0)),
            sell_limit_price: Price::new(Decimal::new(1085, 1)),
            interval: Duration::from_secs(10),
        }
    }

    pub fn with_buy_prices(mut self, stop_price: Price, limit_price: Price) -> Self {
        self.buy_stop_price = stop_price;
        self.buy_limit_price = limit_price;
        self
    }

    pub fn with_sell_prices(mut self, stop_price: Price, limit_price: Price) -> Self {
        self.sell_stop_price = stop_price;
        self.sell_limit_price = limit_price;
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn validate(&self) -> Result<(), ExchangeError> {
        if self.symbol.trim().is_empty() {
            return Err(ExchangeError::ValidationError(
                "bot symbol must not be empty".to_string(),
            ));
        }
        if self.trading_amount.value() <= Decimal::ZERO {
            return Err(ExchangeError::ValidationError(format!(
                "trading amount must be greater than zero, got {}",
                self.trading_amount
            )));
        }
        conversions::validate_stop_limit_buy(self.buy_stop_price, self.buy_limit_price)?;
        conversions::validate_stop_limit_sell(self.sell_stop_price, self.sell_limit_price)?;
        Ok(())
    }
}

/// What a single tick did
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Price was between the buy and sell stops
    Hold { price: Price },
    Bought { price: Price, order: Box<Order> },
    Sold { price: Price, order: Box<Order> },
    /// Order placement failed; the error was logged
    OrderFailed { price: Price },
    /// Price fetch failed; the error was logged
    PriceUnavailable,
}

pub struct TradingBot<C> {
    connector: C,
    config: BotConfig,
}

impl<C> TradingBot<C>
where
    C: MarketDataSource + OrderPlacer + Send + Sync,
{
    /// Fails with `ValidationError` if the thresholds are inconsistent
    pub fn new(connector: C, config: BotConfig) -> Result<Self, ExchangeError> {
        config.validate()?;
        Ok(Self { connector, config })
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    /// Fetch the price once and act on it
    #[instrument(skip(self), fields(symbol = %self.config.symbol))]
    pub async fn tick(&self) -> TickOutcome {
        let price = match self.connector.get_current_price(&self.config.symbol).await {
            Ok(price) => price,
            Err(e) => {
                warn!("Failed to fetch current price, retrying next tick: {}", e);
                return TickOutcome::PriceUnavailable;
            }
        };

        if price <= self.config.buy_stop_price {
            info!(
                price = %price,
                stop = %self.config.buy_stop_price,
                limit = %self.config.buy_limit_price,
                "Placing stop-limit buy"
            );
            match self.buy().await {
                Ok(order) => {
                    info!(order_id = %order.order_id, "Buy order placed");
                    TickOutcome::Bought {
                        price,
                        order: Box::new(order),
                    }
                }
                Err(e) => {
                    error!("Buy order failed: {}", e);
                    TickOutcome::OrderFailed { price }
                }
            }
        } else if price >= self.config.sell_stop_price {
            info!(
                price = %price,
                stop = %self.config.sell_stop_price,
                limit = %self.config.sell_limit_price,
                "Placing stop-limit sell"
            );
            match self.sell(price).await {
                Ok(order) => {
                    info!(order_id = %order.order_id, "Sell order placed");
                    TickOutcome::Sold {
                        price,
                        order: Box::new(order),
                    }
                }
                Err(e) => {
                    error!("Sell order failed: {}", e);
                    TickOutcome::OrderFailed { price }
                }
            }
        } else {
            info!(price = %price, "Holding");
            TickOutcome::Hold { price }
        }
    }

    /// Run `ticks` iterations, sleeping the configured interval between them
    pub async fn run_for(&self, ticks: usize) -> Vec<TickOutcome> {
        let mut outcomes = Vec::with_capacity(ticks);
        for i in 0..ticks {
            if i > 0 {
                tokio::time::sleep(self.config.interval).await;
            }
            outcomes.push(self.tick().await);
        }
        outcomes
    }

    /// Tick forever; stop it by dropping the future
    pub async fn run(&self) {
        info!(
            symbol = %self.config.symbol,
            trading_amount = %self.config.trading_amount,
            interval_secs = self.config.interval.as_secs(),
            "Trading bot started"
        );
        loop {
            self.tick().await;
            tokio::time::sleep(self.config.interval).await;
        }
    }

    async fn buy(&self) -> Result<Order, ExchangeError> {
        self.connector
            .stop_limit_buy(
                &self.config.symbol,
                self.config.trading_amount,
                self.config.buy_stop_price,
                self.config.buy_limit_price,
            )
            .await
    }

    async fn sell(&self, price: Price) -> Result<Order, ExchangeError> {
        let amount = conversions::dollars_to_units(self.config.trading_amount, price)?;
        self.connector
            .stop_limit_sell(
                &self.config.symbol,
                amount,
                self.config.sell_stop_price,
                self.config.sell_limit_price,
            )
            .await
    }
}
