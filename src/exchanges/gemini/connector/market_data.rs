use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::core::traits::MarketDataSource;
use crate::core::types::{Price, Quantity, TimeFrame};
use crate::exchanges::gemini::{
    conversions,
    rest::GeminiRest,
    types::{
        FundingReportRequest, GeminiCandle, GeminiFeePromos, GeminiFundingAmount, GeminiNetwork,
        GeminiOrderBook, GeminiPriceFeedEntry, GeminiSymbolDetails, GeminiTickerV1,
        GeminiTickerV2, GeminiTrade, OrderBookQuery, TradeHistoryQuery,
    },
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Gemini public market data
#[derive(Debug)]
pub struct MarketData<R: RestClient> {
    rest: GeminiRest<R>,
}

impl<R: RestClient + Clone> MarketData<R> {
    pub fn new(rest: &R) -> Self {
        Self {
            rest: GeminiRest::new(rest.clone()),
        }
    }
}

impl<R: RestClient> MarketData<R> {
    #[instrument(skip(self), fields(exchange = "gemini"))]
    pub async fn get_symbol_details(
        &self,
        symbol: &str,
    ) -> Result<GeminiSymbolDetails, ExchangeError> {
        self.rest.get_symbol_details(symbol).await
    }

    #[instrument(skip(self), fields(exchange = "gemini"))]
    pub async fn get_network(&self, token: &str) -> Result<GeminiNetwork, ExchangeError> {
        self.rest.get_network(token).await
    }

    #[instrument(skip(self), fields(exchange = "gemini"))]
    pub async fn get_ticker(&self, symbol: &str) -> Result<GeminiTickerV1, ExchangeError> {
        self.rest.get_ticker(symbol).await
    }

    #[instrument(skip(self), fields(exchange = "gemini"))]
    pub async fn get_ticker_v2(&self, symbol: &str) -> Result<GeminiTickerV2, ExchangeError> {
        self.rest.get_ticker_v2(symbol).await
    }

    #[instrument(skip(self), fields(exchange = "gemini", time_frame = %time_frame))]
    pub async fn get_candles(
        &self,
        symbol: &str,
        time_frame: TimeFrame,
    ) -> Result<Vec<GeminiCandle>, ExchangeError> {
        self.rest.get_candles(symbol, time_frame).await
    }

    #[instrument(skip(self), fields(exchange = "gemini", time_frame = %time_frame))]
    pub async fn get_derivatives_candles(
        &self,
        symbol: &str,
        time_frame: TimeFrame,
    ) -> Result<Vec<GeminiCandle>, ExchangeError> {
        self.rest.get_derivatives_candles(symbol, time_frame).await
    }

    #[instrument(skip(self), fields(exchange = "gemini"))]
    pub async fn get_fee_promos(&self) -> Result<GeminiFeePromos, ExchangeError> {
        self.rest.get_fee_promos().await
    }

    #[instrument(skip(self), fields(exchange = "gemini"))]
    pub async fn get_order_book(
        &self,
        symbol: &str,
        query: OrderBookQuery,
    ) -> Result<GeminiOrderBook, ExchangeError> {
        self.rest.get_order_book(symbol, query).await
    }

    #[instrument(skip(self), fields(exchange = "gemini"))]
    pub async fn get_trade_history(
        &self,
        symbol: &str,
        query: TradeHistoryQuery,
    ) -> Result<Vec<GeminiTrade>, ExchangeError> {
        self.rest.get_trade_history(symbol, query).await
    }

    #[instrument(skip(self), fields(exchange = "gemini"))]
    pub async fn get_price_feed(&self) -> Result<Vec<GeminiPriceFeedEntry>, ExchangeError> {
        self.rest.get_price_feed().await
    }

    #[instrument(skip(self), fields(exchange = "gemini"))]
    pub async fn get_funding_amount(
        &self,
        symbol: &str,
    ) -> Result<GeminiFundingAmount, ExchangeError> {
        self.rest.get_funding_amount(symbol).await
    }

    /// Download the funding amount report into `dir` and return the written path
    #[instrument(skip(self, dir), fields(exchange = "gemini", symbol = %request.symbol))]
    pub async fn download_funding_amount_report(
        &self,
        request: &FundingReportRequest,
        dir: &Path,
    ) -> Result<PathBuf, ExchangeError> {
        let bytes = self.rest.get_funding_amount_report(request).await?;

        let path = dir.join(request.file_name());
        tokio::fs::write(&path, &bytes).await?;

        info!(path = %path.display(), bytes = bytes.len(), "Funding amount report saved");
        Ok(path)
    }

    /// Units of `symbol` bought by `dollar_amount` at the current ask
    #[instrument(skip(self), fields(exchange = "gemini", dollar_amount = %dollar_amount))]
    pub async fn convert_usd_to_crypto(
        &self,
        dollar_amount: Quantity,
        symbol: &str,
    ) -> Result<Quantity, ExchangeError> {
        let ask = self.current_ask(symbol).await?;
        let amount = conversions::dollars_to_units(dollar_amount, ask)?;

        info!(symbol, amount = %amount, "Converted {} USD at ask {}", dollar_amount, ask);
        Ok(amount)
    }

    async fn current_ask(&self, symbol: &str) -> Result<Price, ExchangeError> {
        let ticker = self.rest.get_ticker_v2(symbol).await?;
        ticker.ask.parse::<Price>().map_err(|e| {
            ExchangeError::DecodeError(format!(
                "Invalid ask price {:?} for {}: {}",
                ticker.ask, symbol, e
            ))
        })
    }
}

#[async_trait]
impl<R: RestClient> MarketDataSource for MarketData<R> {
    #[instrument(skip(self), fields(exchange = "gemini"))]
    async fn get_symbols(&self) -> Result<Vec<String>, ExchangeError> {
        self.rest.get_symbols().await
    }

    #[instrument(skip(self), fields(exchange = "gemini"))]
    async fn get_current_price(&self, symbol: &str) -> Result<Price, ExchangeError> {
        self.current_ask(symbol).await
    }
}
