pub mod conversions;
pub mod signer;
pub mod types;

pub mod builder;
pub mod connector;
pub mod rest;

// Re-export main components
pub use builder::{build_connector, build_connector_from_env, GeminiBuilder};
pub use connector::{Account, GeminiConnector, MarketData, Trading};
pub use rest::GeminiRest;
pub use signer::GeminiSigner;
pub use types::{
    FundingReportRequest, GeminiBookEntry, GeminiCandle, GeminiFeePromos, GeminiFundingAmount,
    GeminiNetwork, GeminiOrderBook, GeminiPriceFeedEntry, GeminiSymbolDetails, GeminiTickerV1,
    GeminiTickerV2, GeminiTrade, OrderBookQuery, OrderIdentifier, OrderStatusOptions, TradeHistoryQuery,
};
