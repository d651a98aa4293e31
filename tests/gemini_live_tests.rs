//! Public endpoint checks against the sandbox host
//!
//! Skipped unless `RUN_LIVE_TESTS=true`. Order placement additionally needs
//! `RUN_ORDER_TESTS=true` and real sandbox credentials.

mod integration_test_config;

use gemini_client::core::traits::{AccountInfo, MarketDataSource};
use gemini_client::core::types::TimeFrame;
use gemini_client::exchanges::gemini::{build_connector, OrderBookQuery};
use integration_test_config::{utils, validation, TestConfig};
use tokio::time::timeout;

#[tokio::test]
async fn test_live_public_market_data() {
    if !TestConfig::should_run_live_tests() {
        utils::print_warning("live_public_market_data", "RUN_LIVE_TESTS not set, skipping");
        return;
    }

    let connector = build_connector(TestConfig::create_config_from_env()).unwrap();

    let symbols = timeout(utils::default_timeout(), connector.get_symbols())
        .await
        .expect("symbols timed out")
        .unwrap();
    assert!(symbols.iter().any(|s| s == "btcusd"));
    utils::print_test_result("symbols", true, &format!("{} symbols", symbols.len()));

    let ticker = timeout(
        utils::default_timeout(),
        connector.market.get_ticker_v2("BTCUSD"),
    )
    .await
    .expect("ticker timed out")
    .unwrap();
    validation::validate_ticker(&ticker).unwrap();

    let candles = timeout(
        utils::default_timeout(),
        connector.market.get_candles("btcusd", TimeFrame::Hours1),
    )
    .await
    .expect("candles timed out")
    .unwrap();
    for candle in candles.iter().take(10) {
        validation::validate_candle(candle).unwrap();
    }

    let book = timeout(
        utils::default_timeout(),
        connector.market.get_order_book(
            "btcusd",
            OrderBookQuery {
                limit_bids: Some(5),
                limit_asks: Some(5),
            },
        ),
    )
    .await
    .expect("order book timed out")
    .unwrap();
    assert!(book.bids.len() <= 5);
    assert!(book.asks.len() <= 5);
}

#[tokio::test]
async fn test_live_balances() {
    if !TestConfig::should_run_order_tests() {
        utils::print_warning("live_balances", "RUN_ORDER_TESTS not set, skipping");
        return;
    }

    let connector = build_connector(TestConfig::create_config_from_env()).unwrap();
    let balances = timeout(utils::default_timeout(), connector.get_account_balance())
        .await
        .expect("balances timed out")
        .unwrap();
    for balance in &balances {
        assert!(!balance.currency.is_empty());
    }
    utils::print_test_result("balances", true, &format!("{} currencies", balances.len()));
}
