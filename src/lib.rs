pub mod bot;
pub mod core;
pub mod exchanges;

pub use bot::{BotConfig, TickOutcome, TradingBot};
pub use crate::core::{
    config::{ApiEnvironment, ExchangeConfig},
    errors::ExchangeError,
    traits::ExchangeConnector,
    types::*,
};
pub use exchanges::gemini::GeminiConnector;
