use std::path::PathBuf;

use anyhow::Context;
use bigdecimal::BigDecimal;
use clap::Parser;
use log::{info, warn, LevelFilter};
use num_traits::Zero;
use serde::Serialize;
use simple_logger::SimpleLogger;

use pairprice::{
    db::{models::Bundle, PairLookup},
    utils::Create2PairLookup,
    EntityStore, MemoryStore, PriceResolver, PricingSettings, Settings,
};

#[derive(Parser)]
#[command(name = "pairprice")]
#[command(about = "Price tokens and tracked liquidity from an index snapshot")]
struct Cli {
    /// JSON snapshot of tokens, pairs and the bundle
    snapshot: PathBuf,

    /// Config file name (any format the config crate reads), defaults to `config`
    #[arg(long)]
    config: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TokenPrice {
    id: String,
    symbol: String,
    #[serde(rename = "derivedETH")]
    derived_eth: BigDecimal,
    #[serde(rename = "derivedUSD")]
    derived_usd: BigDecimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PairLiquidity {
    id: String,
    #[serde(rename = "trackedReserveUSD")]
    tracked_reserve_usd: BigDecimal,
    #[serde(rename = "trackedReserveETH")]
    tracked_reserve_eth: BigDecimal,
}

/// Every USD figure in the report uses `eth_price`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PriceReport {
    eth_price: BigDecimal,
    basket_eth_price: BigDecimal,
    snapshot_eth_price: Option<BigDecimal>,
    tokens: Vec<TokenPrice>,
    pairs: Vec<PairLiquidity>,
}

fn main() -> anyhow::Result<()> {
    SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .init()
        .context("Failed to initialize logger")?;

    let cli = Cli::parse();

    // Load configuration
    let settings = match &cli.config {
        Some(name) => Settings::from_file(name),
        None => Settings::new(),
    }
    .context("Failed to load config. Please ensure it is valid or remove it to use defaults")?;

    let mut store = MemoryStore::load(&cli.snapshot)?;
    let (basket_eth_price, snapshot_eth_price) = refresh_bundle(&mut store, &settings.pricing);

    // Offline CREATE2 lookup when a factory is configured, otherwise only the
    // pairs present in the snapshot can be found
    let create2 = match &settings.factory {
        Some(factory) => Some(
            Create2PairLookup::from_hex(&factory.address, &factory.init_code_hash)
                .context("Invalid factory configuration")?,
        ),
        None => None,
    };
    let lookup: &dyn PairLookup = match &create2 {
        Some(lookup) => lookup,
        None => &store,
    };

    let resolver = PriceResolver::new(&settings.pricing, &store, lookup);

    let report = build_report(&resolver, &store, basket_eth_price, snapshot_eth_price);
    info!(
        "Priced {} tokens and {} pairs at {} USD per native",
        report.tokens.len(),
        report.pairs.len(),
        report.eth_price
    );

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Replace the snapshot bundle with the basket price, as a sync handler would.
///
/// A basket that cannot price yet leaves the snapshot bundle in place.
/// Returns `(basket price, snapshot bundle price)`.
fn refresh_bundle(
    store: &mut MemoryStore,
    pricing: &PricingSettings,
) -> (BigDecimal, Option<BigDecimal>) {
    let basket = PriceResolver::new(pricing, &*store, &*store).eth_price_usd();
    let snapshot = store.bundle().map(|bundle| bundle.eth_price);

    if basket.is_zero() {
        warn!("Stable basket cannot price the native asset, keeping snapshot bundle");
    } else {
        if let Some(previous) = &snapshot {
            if *previous != basket {
                info!("Bundle ethPrice {} replaced by basket {}", previous, basket);
            }
        }
        store.set_bundle(Bundle::new(basket.clone()));
    }

    (basket, snapshot)
}

fn build_report<P>(
    resolver: &PriceResolver<'_, MemoryStore, P>,
    store: &MemoryStore,
    basket_eth_price: BigDecimal,
    snapshot_eth_price: Option<BigDecimal>,
) -> PriceReport
where
    P: PairLookup + ?Sized,
{
    let eth_price = match store.bundle() {
        Some(bundle) => bundle.eth_price,
        None => {
            warn!("Snapshot has no bundle, USD values will be zero");
            BigDecimal::zero()
        },
    };
    let mut tokens: Vec<TokenPrice> = store
        .tokens()
        .map(|token| {
            let derived_eth = resolver.find_eth_per_token(token);
            let derived_usd = &derived_eth * &eth_price;
            TokenPrice {
                id: token.id.clone(),
                symbol: token.symbol.clone(),
                derived_eth,
                derived_usd,
            }
        })
        .collect();
    tokens.sort_by(|a, b| a.id.cmp(&b.id));

    let mut pairs: Vec<PairLiquidity> = store
        .pairs()
        .filter_map(|pair| {
            let (Some(token0), Some(token1)) = (store.token(&pair.token0), store.token(&pair.token1))
            else {
                warn!("Pair {} references a token missing from the snapshot", pair.id);
                return None;
            };
            Some(PairLiquidity {
                id: pair.id.clone(),
                tracked_reserve_usd: resolver.tracked_liquidity_usd(
                    &pair.reserve0,
                    &token0,
                    &pair.reserve1,
                    &token1,
                ),
                tracked_reserve_eth: resolver.tracked_liquidity_eth(
                    &pair.reserve0,
                    &token0,
                    &pair.reserve1,
                    &token1,
                ),
            })
        })
        .collect();
    pairs.sort_by(|a, b| a.id.cmp(&b.id));

    PriceReport {
        eth_price,
        basket_eth_price,
        snapshot_eth_price,
        tokens,
        pairs,
    }
}
