use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// `/v1/symbols/details/{symbol}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeminiSymbolDetails {
    pub symbol: String,
    pub base_currency: String,
    pub quote_currency: String,
    pub tick_size: f64,
    pub quote_increment: f64,
    pub min_order_size: String,
    pub status: String,
    #[serde(default)]
    pub wrap_enabled: bool,
    #[serde(default)]
    pub product_type: Option<String>,
    #[serde(default)]
    pub contract_type: Option<String>,
    #[serde(default)]
    pub contract_price_currency: Option<String>,
}

/// `/v1/network/{token}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeminiNetwork {
    pub token: String,
    pub network: Vec<String>,
}

/// `/v1/pubticker/{symbol}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeminiTickerV1 {
    pub ask: String,
    pub bid: String,
    pub last: String,
    /// Keyed by currency code plus `timestamp`
    #[serde(default)]
    pub volume: HashMap<String, Value>,
}

/// `/v2/ticker/{symbol}`; prices stay decimal strings exactly as sent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeminiTickerV2 {
    pub symbol: String,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
    #[serde(default)]
    pub changes: Vec<String>,
    pub bid: String,
    pub ask: String,
}

/// One `[time, open, high, low, close, volume]` row from the candles endpoints
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeminiCandle(pub i64, pub f64, pub f64, pub f64, pub f64, pub f64);

impl GeminiCandle {
    /// Candle open time in milliseconds
    pub const fn time(&self) -> i64 {
        self.0
    }

    pub const fn open(&self) -> f64 {
        self.1
    }

    pub const fn high(&self) -> f64 {
        self.2
    }

    pub const fn low(&self) -> f64 {
        self.3
    }

    pub const fn close(&self) -> f64 {
        self.4
    }

    pub const fn volume(&self) -> f64 {
        self.5
    }
}

/// `/v1/feepromos`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeminiFeePromos {
    pub symbols: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeminiBookEntry {
    pub price: String,
    pub amount: String,
    /// Placeholder value kept by the exchange for compatibility
    #[serde(default)]
    pub timestamp: String,
}

/// `/v1/book/{symbol}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeminiOrderBook {
    pub bids: Vec<GeminiBookEntry>,
    pub asks: Vec<GeminiBookEntry>,
}

/// Element of `/v1/trades/{symbol}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeminiTrade {
    pub timestamp: i64,
    pub timestampms: i64,
    pub tid: u64,
    pub price: String,
    pub amount: String,
    pub exchange: String,
    #[serde(rename = "type")]
    pub trade_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub broken: Option<bool>,
}

/// Element of `/v1/pricefeed`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeminiPriceFeedEntry {
    pub pair: String,
    pub price: String,
    #[serde(rename = "percentChange24h")]
    pub percent_change_24h: String,
}

/// `/v1/fundingamount/{symbol}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiFundingAmount {
    pub symbol: String,
    pub funding_date_time: String,
    pub funding_timestamp_milli_secs: i64,
    pub next_funding_timestamp: i64,
    #[serde(alias = "amount")]
    pub funding_amount: f64,
    pub estimated_funding_amount: f64,
}

/// Optional filters for `/v1/book/{symbol}`; `Some(0)` asks for the full side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderBookQuery {
    pub limit_bids: Option<u32>,
    pub limit_asks: Option<u32>,
}

/// Optional filters for `/v1/trades/{symbol}`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TradeHistoryQuery {
    pub timestamp: Option<i64>,
    pub since_tid: Option<u64>,
    pub limit_trades: Option<u32>,
    pub include_breaks: bool,
}

/// Parameters for `/v1/fundingamountreport/records.xlsx`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FundingReportRequest {
    pub symbol: String,
    /// `yyyy-MM-dd`
    pub from_date: String,
    /// `yyyy-MM-dd`
    pub to_date: String,
    pub num_rows: u32,
}

impl FundingReportRequest {
    /// Local file name the report is saved under
    pub fn file_name(&self) -> String {
        format!(
            "funding_amount_report_{}_{}_to_{}.xlsx",
            self.symbol, self.from_date, self.to_date
        )
    }
}

/// Which order `/v1/order/status` looks up; the exchange rejects both keys together
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderIdentifier {
    OrderId(u64),
    ClientOrderId(String),
}

impl OrderIdentifier {
    pub fn insert_into(&self, payload: &mut Map<String, Value>) {
        match self {
            Self::OrderId(order_id) => {
                payload.insert("order_id".to_string(), Value::from(*order_id));
            }
            Self::ClientOrderId(client_order_id) => {
                payload.insert(
                    "client_order_id".to_string(),
                    Value::String(client_order_id.clone()),
                );
            }
        }
    }
}

/// Optional fields for `/v1/order/status`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderStatusOptions {
    pub account: Option<String>,
    pub include_trades: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICKER_V2_FIXTURE: &str = r#"{"symbol":"BTCUSD","open":"9121.76","high":"9440.66","low":"9106.51","close":"9347.66","changes":["9365.1","9386.16","9373.41"],"bid":"9345.70","ask":"9347.67"}"#;

    #[test]
    fn test_ticker_v2_round_trip_preserves_decimal_strings() {
        let ticker: GeminiTickerV2 = serde_json::from_str(TICKER_V2_FIXTURE).unwrap();
        assert_eq!(ticker.bid, "9345.70");

        let reserialized = serde_json::to_string(&ticker).unwrap();
        assert_eq!(reserialized, TICKER_V2_FIXTURE);
    }

    #[test]
    fn test_ticker_v1_volume_map() {
        let ticker: GeminiTickerV1 = serde_json::from_str(
            r#"{"ask":"977.59","bid":"977.35","last":"977.65","volume":{"BTC":"2210.505328803","USD":"2135477.463379586263","timestamp":1483018200000}}"#,
        )
        .unwrap();
        assert_eq!(ticker.last, "977.65");
        assert_eq!(ticker.volume["BTC"], "2210.505328803");
        assert_eq!(ticker.volume["timestamp"], 1_483_018_200_000_i64);
    }

    #[test]
    fn test_candle_rows_decode_positionally() {
        let candles: Vec<GeminiCandle> = serde_json::from_str(
            "[[1559755800000,7781.6,7820.23,7776.56,7819.39,34.7624802159],[1714126740000,68038,68038,68038,68038,0]]",
        )
        .unwrap();
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[0].time(), 1_559_755_800_000);
        assert!((candles[0].high() - 7820.23).abs() < f64::EPSILON);
        assert!((candles[1].close() - 68038.0).abs() < f64::EPSILON);
        assert!(candles[1].volume().abs() < f64::EPSILON);
    }

    #[test]
    fn test_funding_amount_decodes() {
        let funding: GeminiFundingAmount = serde_json::from_str(
            r#"{"symbol":"btcgusdperp","fundingDateTime":"2023-06-12T03:00:00.000Z","fundingTimestampMilliSecs":1686538800000,"nextFundingTimestamp":1686542400000,"fundingAmount":0.51692,"estimatedFundingAmount":0.27694}"#,
        )
        .unwrap();
        assert_eq!(funding.next_funding_timestamp, 1_686_542_400_000);
        assert!((funding.funding_amount - 0.51692).abs() < f64::EPSILON);
    }

    #[test]
    fn test_funding_report_file_name() {
        let request = FundingReportRequest {
            symbol: "BTCGUSDPERP".to_string(),
            from_date: "2024-04-10".to_string(),
            to_date: "2024-04-25".to_string(),
            num_rows: 1000,
        };
        assert_eq!(
            request.file_name(),
            "funding_amount_report_BTCGUSDPERP_2024-04-10_to_2024-04-25.xlsx"
        );
    }
}
