// Liquidity Quote CLI
// Prices a trade against a ledger order book plus AMM pool, offline or live

use clap::{Parser, Subcommand};
use ledger_liquidity::{
    AmmSnapshot, BookOfferSnapshot, BookSide, Config, DisplayConfig, Issue, LiquidityEngine,
    MarketQuote, QuoteRequest, QuoteService,
};
use rust_decimal::Decimal;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn, Level};

#[derive(Parser)]
#[command(name = "liquidity-quote")]
#[command(version)]
#[command(about = "Order-book and AMM liquidity quotes for ledger DEX pairs", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init,

    /// Quote from order-book / AMM snapshot files
    Offline {
        /// Asset received (e.g. XRP or USD.rIssuer)
        #[arg(long)]
        gets: Issue,

        /// Asset paid
        #[arg(long)]
        pays: Issue,

        /// book_offers result for the forward book
        #[arg(long)]
        book: PathBuf,

        /// book_offers result for the inverse book
        #[arg(long)]
        inverse: Option<PathBuf>,

        /// amm_info result for the pair
        #[arg(long)]
        amm: Option<PathBuf>,

        /// Amount of the paid asset to spend
        #[arg(short, long)]
        size: Option<Decimal>,
    },

    /// Quote against the configured ledger node
    Live {
        #[arg(long)]
        gets: Issue,

        #[arg(long)]
        pays: Issue,

        #[arg(short, long)]
        size: Option<Decimal>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(log_level).init();

    match cli.command {
        Commands::Init => {
            if Path::new(&cli.config).exists() {
                warn!("⚠️  {} already exists, skipping", cli.config);
            } else {
                Config::load_or_create(&cli.config)?;
            }
        }

        Commands::Offline { gets, pays, book, inverse, amm, size } => {
            let config = load_config_or_default(&cli.config);
            let side = BookSide::new(gets, pays);
            let trade_size = size.unwrap_or(config.engine.default_trade_size);

            let forward = read_offers(&book)?;
            let inverse = match inverse {
                Some(path) => read_offers(&path)?,
                None => Vec::new(),
            };
            let amm = match amm {
                Some(path) => read_amm(&path)?,
                None => None,
            };

            let engine = LiquidityEngine::new(config.engine.clone());
            let quote = engine.quote(&side, trade_size, &forward, &inverse, amm.as_ref());
            print_quote(&quote, &config.display);
        }

        Commands::Live { gets, pays, size } => {
            let config = load_config_or_default(&cli.config);
            let request = QuoteRequest {
                side: BookSide::new(gets, pays),
                trade_size: size.unwrap_or(config.engine.default_trade_size),
            };

            info!("📡 Querying {}", config.ledger.rpc_url);
            let service = QuoteService::from_config(&config)?;
            match service.quote_now(&request).await {
                Ok(quote) => print_quote(&quote, &config.display),
                Err(e) => {
                    error!("❌ Quote failed: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

/// Missing config falls back to defaults; an invalid one is fatal
fn load_config_or_default(path: &str) -> Config {
    if !Path::new(path).exists() {
        info!("📁 No config at {}, using defaults", path);
        return Config::default();
    }

    match Config::from_file(path) {
        Ok(config) => config,
        Err(e) => {
            error!("❌ Configuration Error");
            error!("{}", e);
            std::process::exit(1);
        }
    }
}

/// Accepts a bare offer array, a `book_offers` result, or a full response
fn read_offers(path: &Path) -> Result<Vec<BookOfferSnapshot>, Box<dyn std::error::Error>> {
    let mut value: Value = serde_json::from_str(&fs::read_to_string(path)?)?;
    if let Some(result) = value.get_mut("result") {
        value = result.take();
    }
    if let Some(offers) = value.get_mut("offers") {
        value = offers.take();
    }
    Ok(serde_json::from_value(value)?)
}

fn read_amm(path: &Path) -> Result<Option<AmmSnapshot>, Box<dyn std::error::Error>> {
    let mut value: Value = serde_json::from_str(&fs::read_to_string(path)?)?;
    if let Some(result) = value.get_mut("result") {
        value = result.take();
    }
    if let Some(amm) = value.get_mut("amm") {
        value = amm.take();
    }
    if value.is_null() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_value(value)?))
}

fn print_quote(quote: &MarketQuote, display: &DisplayConfig) {
    let rate = |d: Decimal| d.round_dp(display.rate_precision);
    let depth = |d: Decimal| d.round_dp(display.depth_precision);
    let exec = &quote.execution;
    let side = &quote.side;

    println!("📊 {} for {} {}", side.gets, quote.trade_size, side.pays);
    println!(
        "   Offers: {} ({} skipped, AMM {})",
        quote.offers_considered,
        quote.offers_skipped,
        if quote.synthetic_included { "included" } else { "absent" }
    );
    println!("   Received: {} {}", rate(exec.received_total), side.gets);
    println!("   Spent:    {} {}", rate(exec.spent_total), side.pays);
    println!("   VWAP:     {} {} per {}", rate(exec.vwap), side.gets, side.pays);
    println!("   Price:    {} {} per {}", rate(exec.execution_price), side.pays, side.gets);
    println!("   Best/worst rate: {} / {}", rate(exec.best_rate), rate(exec.worst_rate));
    println!(
        "   Depth within slippage band: {} {} for {} {}",
        depth(exec.depth_received),
        side.gets,
        depth(exec.depth_spent),
        side.pays
    );
    println!(
        "   Spread: {} ({}%), liquidity ratio {}",
        rate(quote.spread.spread),
        depth(quote.spread.spread_percent),
        depth(quote.spread.liquidity_ratio)
    );
    println!(
        "   Volatility: {} ({}%)",
        rate(exec.volatility),
        depth(exec.volatility_percent)
    );

    if exec.insufficient_liquidity {
        println!("⚠️  Insufficient liquidity: only {} {} could be spent", rate(exec.spent_total), side.pays);
    }
}
