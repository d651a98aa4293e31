#![allow(dead_code)]

use gemini_client::core::config::{ApiEnvironment, ExchangeConfig};
use std::env;

/// Test configuration utilities
pub struct TestConfig;

impl TestConfig {
    /// Check if live API tests should run (hits the real sandbox host)
    pub fn should_run_live_tests() -> bool {
        env::var("RUN_LIVE_TESTS").unwrap_or_default() == "true"
    }

    /// Check if order placement tests should run (very careful - places sandbox orders)
    pub fn should_run_order_tests() -> bool {
        env::var("RUN_ORDER_TESTS").unwrap_or_default() == "true"
    }

    /// Get test timeout duration
    pub fn test_timeout_seconds() -> u64 {
        env::var("TEST_TIMEOUT_SECONDS")
            .unwrap_or_default()
            .parse()
            .unwrap_or(30)
    }

    /// Credentials that sign correctly but are unknown to the exchange
    pub fn create_safe_config() -> ExchangeConfig {
        ExchangeConfig::new("test_api_key".to_string(), "test_secret_key".to_string())
            .environment(ApiEnvironment::Sandbox)
    }

    /// Sandbox config from the environment, falling back to the safe config
    pub fn create_config_from_env() -> ExchangeConfig {
        ExchangeConfig::from_env()
            .map(|config| config.environment(ApiEnvironment::Sandbox))
            .unwrap_or_else(|_| Self::create_safe_config())
    }

    /// Safe credentials pointed at a local mock server
    pub fn create_mock_config(base_url: &str) -> ExchangeConfig {
        Self::create_safe_config().base_url(base_url.to_string())
    }
}

/// Common test utilities
pub mod utils {
    use super::TestConfig;
    use std::time::Duration;

    pub fn default_timeout() -> Duration {
        Duration::from_secs(TestConfig::test_timeout_seconds())
    }

    /// Print test result with emoji
    pub fn print_test_result(test_name: &str, success: bool, message: &str) {
        let emoji = if success { "✅" } else { "❌" };
        println!("{} {}: {}", emoji, test_name, message);
    }

    /// Print warning with emoji
    pub fn print_warning(test_name: &str, message: &str) {
        println!("⚠️ {}: {}", test_name, message);
    }

    /// Check if a string represents a valid positive decimal
    pub fn is_valid_positive_number(s: &str) -> bool {
        s.parse::<rust_decimal::Decimal>()
            .is_ok_and(|n| n > rust_decimal::Decimal::ZERO)
    }
}

/// Test data validation utilities
pub mod validation {
    use gemini_client::exchanges::gemini::{GeminiCandle, GeminiTickerV2};

    pub fn validate_ticker(ticker: &GeminiTickerV2) -> Result<(), String> {
        if ticker.symbol.is_empty() {
            return Err("Ticker symbol should not be empty".to_string());
        }
        if !super::utils::is_valid_positive_number(&ticker.ask) {
            return Err("Ask should be a valid positive number".to_string());
        }
        if !super::utils::is_valid_positive_number(&ticker.bid) {
            return Err("Bid should be a valid positive number".to_string());
        }
        Ok(())
    }

    pub fn validate_candle(candle: &GeminiCandle) -> Result<(), String> {
        if candle.time() <= 0 {
            return Err("Candle time should be positive".to_string());
        }
        if candle.high() < candle.low() {
            return Err("High price should be >= low price".to_string());
        }
        if candle.high() < candle.open() || candle.high() < candle.close() {
            return Err("High price should be >= open and close prices".to_string());
        }
        if candle.low() > candle.open() || candle.low() > candle.close() {
            return Err("Low price should be <= open and close prices".to_string());
        }
        Ok(())
    }
}
