use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::core::traits::OrderPlacer;
use crate::core::types::{Order, OrderRequest, OrderSide, Price, Quantity};
use crate::exchanges::gemini::{conversions, rest::GeminiRest, types::{OrderIdentifier, OrderStatusOptions}};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Gemini order entry and order queries
#[derive(Debug)]
pub struct Trading<R: RestClient> {
    rest: GeminiRest<R>,
}

impl<R: RestClient + Clone> Trading<R> {
    pub fn new(rest: &R) -> Self {
        Self {
            rest: GeminiRest::new(rest.clone()),
        }
    }
}

impl<R: RestClient> Trading<R> {
    /// Closed orders for the account, newest first
    #[instrument(skip(self), fields(exchange = "gemini"))]
    pub async fn get_closed_orders_history(&self) -> Result<Vec<Order>, ExchangeError> {
        self.rest.get_orders_history().await
    }

    #[instrument(skip(self), fields(exchange = "gemini"))]
    pub async fn get_order_status(
        &self,
        identifier: &OrderIdentifier,
        options: &OrderStatusOptions,
    ) -> Result<Order, ExchangeError> {
        self.rest.get_order_status(identifier, options).await
    }
}

#[async_trait]
impl<R: RestClient> OrderPlacer for Trading<R> {
    #[instrument(skip(self, order), fields(exchange = "gemini", symbol = %order.symbol, side = %order.side, order_type = %order.order_type))]
    async fn place_order(&self, order: OrderRequest) -> Result<Order, ExchangeError> {
        let payload = conversions::order_request_to_payload(&order)?;
        debug!(payload = ?payload, "Submitting new order");

        let placed = self.rest.new_order(&payload).await?;
        info!(order_id = %placed.order_id, "Order accepted");
        Ok(placed)
    }

    #[instrument(skip(self), fields(exchange = "gemini"))]
    async fn stop_limit_buy(
        &self,
        symbol: &str,
        dollar_amount: Quantity,
        stop_price: Price,
        limit_price: Price,
    ) -> Result<Order, ExchangeError> {
        conversions::validate_stop_limit_buy(stop_price, limit_price)?;
        let amount = conversions::dollars_to_units(dollar_amount, limit_price)?;

        self.place_order(OrderRequest::stop_limit(
            symbol,
            OrderSide::Buy,
            amount,
            stop_price,
            limit_price,
        ))
        .await
    }

    #[instrument(skip(self), fields(exchange = "gemini"))]
    async fn stop_limit_sell(
        &self,
        symbol: &str,
        amount: Quantity,
        stop_price: Price,
        limit_price: Price,
    ) -> Result<Order, ExchangeError> {
        conversions::validate_stop_limit_sell(stop_price, limit_price)?;

        self.place_order(OrderRequest::stop_limit(
            symbol,
            OrderSide::Sell,
            amount,
            stop_price,
            limit_price,
        ))
        .await
    }

    #[instrument(skip(self), fields(exchange = "gemini"))]
    async fn cancel_order(&self, order_id: u64) -> Result<Order, ExchangeError> {
        self.rest.cancel_order(order_id).await
    }
}
