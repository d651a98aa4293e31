use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TypesError {
    #[error("Invalid decimal: {0}")]
    InvalidDecimal(#[from] rust_decimal::Error),
    #[error("Parsing error: {0}")]
    ParseError(String),
}

/// Type-safe price representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::str")] pub Decimal);

impl Price {
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> Decimal {
        self.0
    }
}

impl FromStr for Price {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Decimal::from_str(s.trim())?))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Type-safe quantity representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(#[serde(with = "rust_decimal::serde::str")] pub Decimal);

impl Quantity {
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> Decimal {
        self.0
    }
}

impl FromStr for Quantity {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Decimal::from_str(s.trim())?))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderSide {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "buy" => Ok(Self::Buy),
            "sell" => Ok(Self::Sell),
            other => Err(TypesError::ParseError(format!("Unknown order side: {}", other))),
        }
    }
}

/// Order types accepted by `/v1/order/new`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderType {
    #[serde(rename = "exchange limit")]
    ExchangeLimit,
    #[serde(rename = "exchange stop limit")]
    ExchangeStopLimit,
}

impl OrderType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ExchangeLimit => "exchange limit",
            Self::ExchangeStopLimit => "exchange stop limit",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderType {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], " ").as_str() {
            "exchange limit" | "limit" => Ok(Self::ExchangeLimit),
            "exchange stop limit" | "stop limit" => Ok(Self::ExchangeStopLimit),
            other => Err(TypesError::ParseError(format!("Unknown order type: {}", other))),
        }
    }
}

/// Execution options for limit orders; the exchange accepts at most one per order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderExecutionOption {
    MakerOrCancel,
    ImmediateOrCancel,
    FillOrKill,
    AuctionOnly,
    IndicationOfInterest,
}

impl OrderExecutionOption {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MakerOrCancel => "maker-or-cancel",
            Self::ImmediateOrCancel => "immediate-or-cancel",
            Self::FillOrKill => "fill-or-kill",
            Self::AuctionOnly => "auction-only",
            Self::IndicationOfInterest => "indication-of-interest",
        }
    }
}

impl FromStr for OrderExecutionOption {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "maker-or-cancel" => Ok(Self::MakerOrCancel),
            "immediate-or-cancel" => Ok(Self::ImmediateOrCancel),
            "fill-or-kill" => Ok(Self::FillOrKill),
            "auction-only" => Ok(Self::AuctionOnly),
            "indication-of-interest" => Ok(Self::IndicationOfInterest),
            other => Err(TypesError::ParseError(format!(
                "Unknown execution option: {}",
                other
            ))),
        }
    }
}

/// Typed order placement request, converted to a signed payload before sending
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub symbol: String,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub amount: Quantity,
    pub price: Price,
    pub stop_price: Option<Price>,
    pub client_order_id: Option<String>,
    pub options: Vec<OrderExecutionOption>,
    pub account: Option<String>,
}

impl OrderRequest {
    pub fn limit(symbol: impl Into<String>, side: OrderSide, amount: Quantity, price: Price) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type: OrderType::ExchangeLimit,
            amount,
            price,
            stop_price: None,
            client_order_id: None,
            options: Vec::new(),
            account: None,
        }
    }

    /// `limit_price` is where the order rests once `stop_price` triggers it
    pub fn stop_limit(
        symbol: impl Into<String>,
        side: OrderSide,
        amount: Quantity,
        stop_price: Price,
        limit_price: Price,
    ) -> Self {
        Self {
            order_type: OrderType::ExchangeStopLimit,
            stop_price: Some(stop_price),
            ..Self::limit(symbol, side, amount, limit_price)
        }
    }

    pub fn with_client_order_id(mut self, client_order_id: impl Into<String>) -> Self {
        self.client_order_id = Some(client_order_id.into());
        self
    }

    pub fn with_option(mut self, option: OrderExecutionOption) -> Self {
        self.options.push(option);
        self
    }

    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }
}

/// Order as reported by the exchange (new order, status, cancel and history calls)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Order {
    pub order_id: String,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_order_id: Option<String>,
    pub symbol: String,
    pub exchange: String,
    pub avg_execution_price: String,
    pub side: String,
    #[serde(rename = "type")]
    pub order_type: String,
    pub timestamp: String,
    pub timestampms: i64,
    pub is_live: bool,
    pub is_cancelled: bool,
    pub is_hidden: bool,
    pub was_forced: bool,
    pub executed_amount: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_amount: Option<String>,
    pub options: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_price: Option<String>,
    pub price: String,
    pub original_amount: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trades: Option<Vec<Value>>,
}

/// Per-currency balance from `/v1/balances`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    #[serde(rename = "type", default)]
    pub balance_type: String,
    pub currency: String,
    pub amount: String,
    pub available: String,
    #[serde(rename = "availableForWithdrawal", default)]
    pub available_for_withdrawal: String,
}

/// Candle time frames supported by the candles endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeFrame {
    #[serde(rename = "1m")]
    Minutes1,
    #[serde(rename = "5m")]
    Minutes5,
    #[serde(rename = "15m")]
    Minutes15,
    #[serde(rename = "30m")]
    Minutes30,
    #[serde(rename = "1hr")]
    Hours1,
    #[serde(rename = "6hr")]
    Hours6,
    #[serde(rename = "1day")]
    Days1,
}

impl TimeFrame {
    /// Path segment used by `/v2/candles/{symbol}/{time_frame}`
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Minutes1 => "1m",
            Self::Minutes5 => "5m",
            Self::Minutes15 => "15m",
            Self::Minutes30 => "30m",
            Self::Hours1 => "1hr",
            Self::Hours6 => "6hr",
            Self::Days1 => "1day",
        }
    }

    pub fn all() -> Vec<Self> {
        vec![
            Self::Minutes1,
            Self::Minutes5,
            Self::Minutes15,
            Self::Minutes30,
            Self::Hours1,
            Self::Hours6,
            Self::Days1,
        ]
    }
}

impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeFrame {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|tf| tf.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| TypesError::ParseError(format!("Unknown time frame: {}", s)))
    }
}
