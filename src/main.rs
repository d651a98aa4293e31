//! Command-line entry point for the Gemini REST client
//!
//! Every endpoint call has a subcommand; results are printed to stdout as
//! pretty JSON, logs go to stderr. Credentials come from
//! `GEMINI_EXCHANGE_API_KEY` / `GEMINI_EXCHANGE_API_SECRET` (optionally via `.env`).

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use gemini_client::core::config::{ApiEnvironment, ExchangeConfig};
use gemini_client::core::traits::{AccountInfo, MarketDataSource, OrderPlacer};
use gemini_client::core::types::{
    OrderExecutionOption, OrderRequest, OrderSide, OrderType, Price, Quantity, TimeFrame,
};
use gemini_client::exchanges::gemini::{
    build_connector, FundingReportRequest, OrderBookQuery, OrderIdentifier, OrderStatusOptions, TradeHistoryQuery,
};
use gemini_client::{BotConfig, TradingBot};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "gemini-client")]
#[command(about = "Gemini exchange REST client and stop-limit trading bot", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to a .env file with credentials
    #[arg(long, global = true, default_value = ".env")]
    env_file: String,

    /// Override GEMINI_EXCHANGE_API_ENVIRONMENT (production or sandbox)
    #[arg(long, global = true)]
    environment: Option<ApiEnvironment>,

    /// Override the API base URL
    #[arg(long, global = true)]
    base_url: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List all tradable symbols
    Symbols,

    /// Tick size, minimum order size and status of a symbol
    SymbolDetails { symbol: String },

    /// Networks a token can be transferred on
    Network { token: String },

    /// v1 ticker (bid, ask, last, volume)
    Ticker { symbol: String },

    /// v2 ticker (open, high, low, close, recent changes)
    TickerV2 { symbol: String },

    /// Candles for a symbol
    Candles {
        symbol: String,

        /// 1m, 5m, 15m, 30m, 1hr, 6hr or 1day
        #[arg(short, long, default_value = "1day")]
        time_frame: TimeFrame,
    },

    /// Candles for a perpetual symbol (e.g. BTCGUSDPERP)
    DerivativesCandles {
        symbol: String,

        #[arg(short, long, default_value = "1m")]
        time_frame: TimeFrame,
    },

    /// Symbols with a fee promotion
    FeePromos,

    /// Current order book
    OrderBook {
        symbol: String,

        /// Bids to return (0 for all)
        #[arg(long)]
        limit_bids: Option<u32>,

        /// Asks to return (0 for all)
        #[arg(long)]
        limit_asks: Option<u32>,
    },

    /// Recent public trades
    Trades {
        symbol: String,

        /// Only trades at or after this timestamp
        #[arg(long)]
        timestamp: Option<i64>,

        /// Only trades after this trade id
        #[arg(long)]
        since_tid: Option<u64>,

        #[arg(long)]
        limit_trades: Option<u32>,

        /// Include broken trades
        #[arg(long)]
        include_breaks: bool,
    },

    /// Price and 24h change for every pair
    PriceFeed,

    /// Funding amount of a perpetual symbol
    FundingAmount { symbol: String },

    /// Download the funding amount report (xlsx)
    FundingReport {
        #[arg(long)]
        symbol: String,

        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: String,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: String,

        #[arg(long, default_value = "1000")]
        num_rows: u32,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Current ask price
    Price { symbol: String },

    /// Units of a symbol bought by a dollar amount at the current ask
    Convert { dollars: Quantity, symbol: String },

    /// Closed orders history
    OrdersHistory,

    /// Status of an order
    OrderStatus {
        #[arg(required_unless_present = "client_order_id", conflicts_with = "client_order_id")]
        order_id: Option<u64>,

        #[arg(long)]
        client_order_id: Option<String>,

        #[arg(long)]
        account: Option<String>,

        #[arg(long)]
        include_trades: bool,
    },

    /// Place a new order
    NewOrder {
        #[arg(long)]
        symbol: String,

        #[arg(long)]
        amount: Quantity,

        #[arg(long)]
        price: Price,

        /// buy or sell
        #[arg(long)]
        side: OrderSide,

        /// "exchange limit" or "exchange stop limit"
        #[arg(long, default_value = "exchange limit")]
        order_type: OrderType,

        #[arg(long)]
        stop_price: Option<Price>,

        #[arg(long)]
        client_order_id: Option<String>,

        /// Execution option, e.g. maker-or-cancel
        #[arg(long)]
        option: Option<OrderExecutionOption>,

        #[arg(long)]
        account: Option<String>,
    },

    /// Stop-limit buy spending a dollar amount
    StopLimitBuy {
        symbol: String,
        dollars: Quantity,
        stop_price: Price,
        limit_price: Price,
    },

    /// Stop-limit sell of an amount of units
    StopLimitSell {
        symbol: String,
        amount: Quantity,
        stop_price: Price,
        limit_price: Price,
    },

    /// Cancel an order
    CancelOrder { order_id: u64 },

    /// All account balances
    Balances,

    /// Balance of one currency (exact match, e.g. BTC)
    Balance { currency: String },

    /// Run the stop-limit trading bot
    Bot {
        #[arg(long)]
        symbol: String,

        /// Dollars committed per order
        #[arg(long)]
        amount: Quantity,

        #[arg(long, default_value = "101")]
        buy_stop: Price,

        #[arg(long, default_value = "101.5")]
        buy_limit: Price,

        #[arg(long, default_value = "109")]
        sell_stop: Price,

        #[arg(long, default_value = "108.5")]
        sell_limit: Price,

        /// Seconds between ticks
        #[arg(long, default_value = "10")]
        interval: u64,

        /// Stop after this many ticks (runs until Ctrl+C otherwise)
        #[arg(long)]
        ticks: Option<usize>,
    },
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter_str = format!("{},hyper=warn,reqwest=warn", level);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn load_config(cli: &Cli) -> Result<ExchangeConfig> {
    #[cfg(feature = "env-file")]
    let mut config = ExchangeConfig::from_env_file_with_path(&cli.env_file)
        .context("Failed to load configuration")?;
    #[cfg(not(feature = "env-file"))]
    let mut config = ExchangeConfig::from_env().context("Failed to load configuration")?;

    if let Some(environment) = cli.environment {
        config = config.environment(environment);
    }
    if let Some(base_url) = &cli.base_url {
        config = config.base_url(base_url.clone());
    }
    Ok(config)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_date(value: &str) -> Result<String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", value))?;
    Ok(value.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = load_config(&cli)?;
    let connector = build_connector(config)?;

    match cli.command {
        Commands::Symbols => print_json(&connector.get_symbols().await?)?,
        Commands::SymbolDetails { symbol } => {
            print_json(&connector.market.get_symbol_details(&symbol).await?)?;
        }
        Commands::Network { token } => print_json(&connector.market.get_network(&token).await?)?,
        Commands::Ticker { symbol } => print_json(&connector.market.get_ticker(&symbol).await?)?,
        Commands::TickerV2 { symbol } => {
            print_json(&connector.market.get_ticker_v2(&symbol).await?)?;
        }
        Commands::Candles { symbol, time_frame } => {
            print_json(&connector.market.get_candles(&symbol, time_frame).await?)?;
        }
        Commands::DerivativesCandles { symbol, time_frame } => {
            print_json(
                &connector
                    .market
                    .get_derivatives_candles(&symbol, time_frame)
                    .await?,
            )?;
        }
        Commands::FeePromos => print_json(&connector.market.get_fee_promos().await?)?,
        Commands::OrderBook {
            symbol,
            limit_bids,
            limit_asks,
        } => {
            let query = OrderBookQuery {
                limit_bids,
                limit_asks,
            };
            print_json(&connector.market.get_order_book(&symbol, query).await?)?;
        }
        Commands::Trades {
            symbol,
            timestamp,
            since_tid,
            limit_trades,
            include_breaks,
        } => {
            let query = TradeHistoryQuery {
                timestamp,
                since_tid,
                limit_trades,
                include_breaks,
            };
            print_json(&connector.market.get_trade_history(&symbol, query).await?)?;
        }
        Commands::PriceFeed => print_json(&connector.market.get_price_feed().await?)?,
        Commands::FundingAmount { symbol } => {
            print_json(&connector.market.get_funding_amount(&symbol).await?)?;
        }
        Commands::FundingReport {
            symbol,
            from,
            to,
            num_rows,
            output,
        } => {
            let request = FundingReportRequest {
                symbol,
                from_date: parse_date(&from)?,
                to_date: parse_date(&to)?,
                num_rows,
            };
            let path = connector
                .market
                .download_funding_amount_report(&request, &output)
                .await?;
            println!("{}", path.display());
        }
        Commands::Price { symbol } => print_json(&connector.get_current_price(&symbol).await?)?,
        Commands::Convert { dollars, symbol } => {
            print_json(
                &connector
                    .market
                    .convert_usd_to_crypto(dollars, &symbol)
                    .await?,
            )?;
        }
        Commands::OrdersHistory => {
            print_json(&connector.trading.get_closed_orders_history().await?)?;
        }
        Commands::OrderStatus {
            order_id,
            client_order_id,
            account,
            include_trades,
        } => {
            let identifier = match (order_id, client_order_id) {
                (Some(order_id), _) => OrderIdentifier::OrderId(order_id),
                (None, Some(client_order_id)) => OrderIdentifier::ClientOrderId(client_order_id),
                (None, None) => anyhow::bail!("either an order id or --client-order-id is required"),
            };
            let options = OrderStatusOptions {
                account,
                include_trades,
            };
            print_json(
                &connector
                    .trading
                    .get_order_status(&identifier, &options)
                    .await?,
            )?;
        }
        Commands::NewOrder {
            symbol,
            amount,
            price,
            side,
            order_type,
            stop_price,
            client_order_id,
            option,
            account,
        } => {
            let mut order = OrderRequest::limit(symbol, side, amount, price);
            order.order_type = order_type;
            order.stop_price = stop_price;
            order.client_order_id = client_order_id;
            order.account = account;
            if let Some(option) = option {
                order = order.with_option(option);
            }
            print_json(&connector.place_order(order).await?)?;
        }
        Commands::StopLimitBuy {
            symbol,
            dollars,
            stop_price,
            limit_price,
        } => {
            print_json(
                &connector
                    .stop_limit_buy(&symbol, dollars, stop_price, limit_price)
                    .await?,
            )?;
        }
        Commands::StopLimitSell {
            symbol,
            amount,
            stop_price,
            limit_price,
        } => {
            print_json(
                &connector
                    .stop_limit_sell(&symbol, amount, stop_price, limit_price)
                    .await?,
            )?;
        }
        Commands::CancelOrder { order_id } => print_json(&connector.cancel_order(order_id).await?)?,
        Commands::Balances => print_json(&connector.get_account_balance().await?)?,
        Commands::Balance { currency } => {
            match connector
                .account
                .get_available_currency_balance(&currency)
                .await?
            {
                Some(balance) => print_json(&balance)?,
                None => anyhow::bail!("No balance found for currency {}", currency),
            }
        }
        Commands::Bot {
            symbol,
            amount,
            buy_stop,
            buy_limit,
            sell_stop,
            sell_limit,
            interval,
            ticks,
        } => {
            let bot_config = BotConfig::new(symbol, amount)
                .with_buy_prices(buy_stop, buy_limit)
                .with_sell_prices(sell_stop, sell_limit)
                .with_interval(Duration::from_secs(interval));
            let bot = TradingBot::new(connector, bot_config)?;

            if let Some(ticks) = ticks {
                let outcomes = bot.run_for(ticks).await;
                info!("Bot finished after {} ticks", outcomes.len());
            } else {
                tokio::select! {
                    () = bot.run() => {}
                    result = tokio::signal::ctrl_c() => {
                        result.context("Failed to listen for Ctrl+C")?;
                        info!("Ctrl+C received, stopping bot");
                    }
                }
            }
        }
    }

    Ok(())
}
