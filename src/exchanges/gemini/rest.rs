use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::core::types::{Balance, Order, TimeFrame};
use crate::exchanges::gemini::types::{
    FundingReportRequest, GeminiCandle, GeminiFeePromos, GeminiFundingAmount, GeminiNetwork,
    GeminiOrderBook, GeminiPriceFeedEntry, GeminiSymbolDetails, GeminiTickerV1, GeminiTickerV2,
    GeminiTrade, OrderBookQuery, OrderIdentifier, OrderStatusOptions, TradeHistoryQuery,
};
use serde_json::{Map, Value};

/// Gemini REST API client: one typed call per endpoint, no domain logic
#[derive(Debug, Clone)]
pub struct GeminiRest<R: RestClient> {
    rest_client: R,
}

impl<R: RestClient> GeminiRest<R> {
    pub fn new(rest_client: R) -> Self {
        Self { rest_client }
    }

    // Public market data endpoints

    pub async fn get_symbols(&self) -> Result<Vec<String>, ExchangeError> {
        self.rest_client.get_json("/v1/symbols", &[]).await
    }

    pub async fn get_symbol_details(
        &self,
        symbol: &str,
    ) -> Result<GeminiSymbolDetails, ExchangeError> {
        let endpoint = format!("/v1/symbols/details/{}", symbol);
        self.rest_client.get_json(&endpoint, &[]).await
    }

    pub async fn get_network(&self, token: &str) -> Result<GeminiNetwork, ExchangeError> {
        let endpoint = format!("/v1/network/{}", token);
        self.rest_client.get_json(&endpoint, &[]).await
    }

    pub async fn get_ticker(&self, symbol: &str) -> Result<GeminiTickerV1, ExchangeError> {
        let endpoint = format!("/v1/pubticker/{}", symbol);
        self.rest_client.get_json(&endpoint, &[]).await
    }

    /// The v2 ticker path only accepts lower-case symbols
    pub async fn get_ticker_v2(&self, symbol: &str) -> Result<GeminiTickerV2, ExchangeError> {
        let endpoint = format!("/v2/ticker/{}", symbol.to_lowercase());
        self.rest_client.get_json(&endpoint, &[]).await
    }

    pub async fn get_candles(
        &self,
        symbol: &str,
        time_frame: TimeFrame,
    ) -> Result<Vec<GeminiCandle>, ExchangeError> {
        let endpoint = format!("/v2/candles/{}/{}", symbol, time_frame.as_str());
        self.rest_client.get_json(&endpoint, &[]).await
    }

    /// Perpetual symbols only (e.g. `BTCGUSDPERP`)
    pub async fn get_derivatives_candles(
        &self,
        symbol: &str,
        time_frame: TimeFrame,
    ) -> Result<Vec<GeminiCandle>, ExchangeError> {
        let endpoint = format!("/v2/derivatives/candles/{}/{}", symbol, time_frame.as_str());
        self.rest_client.get_json(&endpoint, &[]).await
    }

    pub async fn get_fee_promos(&self) -> Result<GeminiFeePromos, ExchangeError> {
        self.rest_client.get_json("/v1/feepromos", &[]).await
    }

    pub async fn get_order_book(
        &self,
        symbol: &str,
        query: OrderBookQuery,
    ) -> Result<GeminiOrderBook, ExchangeError> {
        let endpoint = format!("/v1/book/{}", symbol);

        let limit_bids = query.limit_bids.map(|v| v.to_string());
        let limit_asks = query.limit_asks.map(|v| v.to_string());
        let mut query_params = Vec::new();
        if let Some(ref value) = limit_bids {
            query_params.push(("limit_bids", value.as_str()));
        }
        if let Some(ref value) = limit_asks {
            query_params.push(("limit_asks", value.as_str()));
        }

        self.rest_client.get_json(&endpoint, &query_params).await
    }

    pub async fn get_trade_history(
        &self,
        symbol: &str,
        query: TradeHistoryQuery,
    ) -> Result<Vec<GeminiTrade>, ExchangeError> {
        let endpoint = format!("/v1/trades/{}", symbol);

        let timestamp = query.timestamp.map(|v| v.to_string());
        let since_tid = query.since_tid.map(|v| v.to_string());
        let limit_trades = query.limit_trades.map(|v| v.to_string());
        let mut query_params = Vec::new();
        if let Some(ref value) = timestamp {
            query_params.push(("timestamp", value.as_str()));
        }
        if let Some(ref value) = since_tid {
            query_params.push(("since_tid", value.as_str()));
        }
        if let Some(ref value) = limit_trades {
            query_params.push(("limit_trades", value.as_str()));
        }
        if query.include_breaks {
            query_params.push(("include_breaks", "true"));
        }

        self.rest_client.get_json(&endpoint, &query_params).await
    }

    pub async fn get_price_feed(&self) -> Result<Vec<GeminiPriceFeedEntry>, ExchangeError> {
        self.rest_client.get_json("/v1/pricefeed", &[]).await
    }

    pub async fn get_funding_amount(
        &self,
        symbol: &str,
    ) -> Result<GeminiFundingAmount, ExchangeError> {
        let endpoint = format!("/v1/fundingamount/{}", symbol);
        self.rest_client.get_json(&endpoint, &[]).await
    }

    /// Raw xlsx bytes of the funding amount report
    pub async fn get_funding_amount_report(
        &self,
        request: &FundingReportRequest,
    ) -> Result<Vec<u8>, ExchangeError> {
        let num_rows = request.num_rows.to_string();
        let query_params = [
            ("symbol", request.symbol.as_str()),
            ("fromDate", request.from_date.as_str()),
            ("toDate", request.to_date.as_str()),
            ("numRows", num_rows.as_str()),
        ];

        self.rest_client
            .get_bytes("/v1/fundingamountreport/records.xlsx", &query_params)
            .await
    }

    // Private endpoints (signed)

    pub async fn get_orders_history(&self) -> Result<Vec<Order>, ExchangeError> {
        self.rest_client
            .post_signed_json("/v1/orders/history", &Map::new())
            .await
    }

    pub async fn get_order_status(
        &self,
        identifier: &OrderIdentifier,
        options: &OrderStatusOptions,
    ) -> Result<Order, ExchangeError> {
        let mut payload = Map::new();
        identifier.insert_into(&mut payload);
        if let Some(account) = &options.account {
            payload.insert("account".to_string(), Value::String(account.clone()));
        }
        if options.include_trades {
            payload.insert("include_trades".to_string(), Value::Bool(true));
        }

        self.rest_client
            .post_signed_json("/v1/order/status", &payload)
            .await
    }

    pub async fn new_order(&self, payload: &Map<String, Value>) -> Result<Order, ExchangeError> {
        self.rest_client
            .post_signed_json("/v1/order/new", payload)
            .await
    }

    pub async fn cancel_order(&self, order_id: u64) -> Result<Order, ExchangeError> {
        let mut payload = Map::new();
        payload.insert("order_id".to_string(), Value::from(order_id));

        self.rest_client
            .post_signed_json("/v1/order/cancel", &payload)
            .await
    }

    pub async fn get_balances(&self) -> Result<Vec<Balance>, ExchangeError> {
        self.rest_client
            .post_signed_json("/v1/balances", &Map::new())
            .await
    }
}
