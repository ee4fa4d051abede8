use bigdecimal::BigDecimal;
use config::{Config, ConfigError, File};
use num_traits::One;
use serde::Deserialize;

use crate::pricing::Whitelist;

/// Which side of a stablecoin pool holds the native asset.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NativeSide {
    Token0,
    Token1,
}

/// A stablecoin/native pool used by the ETH price basket.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct StablePool {
    pub address: String,
    pub native_side: NativeSide,
}

impl StablePool {
    pub fn new(address: &str, native_side: NativeSide) -> Self {
        Self {
            address: address.to_lowercase(),
            native_side,
        }
    }
}

/// Price derivation and tracking configuration.
///
/// Deploy-time constants: loaded once at startup and never mutated.
/// Defaults are the OKExChain deployment (WOKT native, USDK/USDC/USDT basket).
#[derive(Debug, Deserialize, Clone)]
pub struct PricingSettings {
    /// Wrapped native token; always priced at exactly 1 native unit
    #[serde(default = "default_native_token")]
    pub native_token: String,
    /// Anchor tokens in priority order, native first
    #[serde(default = "default_whitelist")]
    pub whitelist: Whitelist,
    /// Basket pools in cascade order. The third pool alone is enough to price.
    #[serde(default = "default_stable_pools")]
    pub stable_pools: [StablePool; 3],
    /// Minimum reserve USD for a pair with few LPs to count toward tracked volume
    #[serde(default = "default_threshold")]
    pub minimum_usd_threshold_new_pairs: BigDecimal,
    /// Minimum pair reserveETH (exclusive) for a pair to be used as a price anchor
    #[serde(default = "default_threshold")]
    pub minimum_liquidity_threshold_eth: BigDecimal,
    /// Pairs with fewer LPs than this go through the new-pair reserve check
    #[serde(default = "default_minimum_liquidity_providers")]
    pub minimum_liquidity_providers: u64,
}

fn default_native_token() -> String {
    "0x70c1c53e991f31981d592c2d865383ac0d212225".to_string() // WOKT
}

fn default_whitelist() -> Whitelist {
    Whitelist::new([
        "0x70c1c53e991f31981d592c2d865383ac0d212225", // WOKT
        "0x533367b864d9b9aa59d0dcb6554df0c89feef1ff", // USDK
        "0x3e33590013b24bf21d4ccca3a965ea10e570d5b2", // USDC
        "0xe579156f9decc4134b5e3a30a24ac46bb8b01281", // USDT
        "0x09973e7e3914eb5ba69c7c025f30ab9446e3e4e0", // BTCK
        "0xdf950cecf33e64176ada5dd733e170a56d11478e", // ETHK
        "0x72f8fa5da80dc6e20e00d02724cf05ebd302c35f", // DOTK
        "0xf6a0dc1fd1d2c0122ab075d7ef93ad79f02ccb93", // FILK
        "0xd616388f6533b6f1c31968a305fbee1727f55850", // LTCK
        "0x4888097d1b29b439c55c6d3e44031ee658237de3", // KKT
        "0x6fd9db63dbc6be452ae7b0fe9995c81d967870bb", // NAS
    ])
}

fn default_stable_pools() -> [StablePool; 3] {
    [
        // USDK/WOKT, usdk is token0
        StablePool::new("0xc3a9967c7ab0a4312e225feef19103168995643d", NativeSide::Token1),
        // USDC/WOKT, usdc is token0
        StablePool::new("0x4a8123ac977380198241e9edc64a986e483ba75d", NativeSide::Token1),
        // WOKT/USDT, usdt is token1
        StablePool::new("0x695ef962b4ee88ed193148e486208d58d184d203", NativeSide::Token0),
    ]
}

fn default_threshold() -> BigDecimal {
    BigDecimal::one()
}

fn default_minimum_liquidity_providers() -> u64 {
    1
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            native_token: default_native_token(),
            whitelist: default_whitelist(),
            stable_pools: default_stable_pools(),
            minimum_usd_threshold_new_pairs: default_threshold(),
            minimum_liquidity_threshold_eth: default_threshold(),
            minimum_liquidity_providers: default_minimum_liquidity_providers(),
        }
    }
}

impl PricingSettings {
    /// Lowercase every configured address so lookups compare equal.
    fn normalize(&mut self) {
        self.native_token = self.native_token.to_lowercase();
        for pool in self.stable_pools.iter_mut() {
            pool.address = pool.address.to_lowercase();
        }
    }

    pub fn is_native(&self, token: &str) -> bool {
        self.native_token.eq_ignore_ascii_case(token)
    }
}

/// V2 factory used to derive pair addresses offline.
#[derive(Debug, Deserialize, Clone)]
pub struct FactorySettings {
    pub address: String,
    pub init_code_hash: String,
}

/// Root application configuration.
///
/// Loaded from an optional `config.yaml` (or any format the `config` crate
/// understands) at startup. Every pricing field has a default.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub pricing: PricingSettings,
    #[serde(default)]
    pub factory: Option<FactorySettings>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_file("config")
    }

    pub fn from_file(name: &str) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name(name).required(false))
            .build()?;

        Self::from_config(s)
    }

    fn from_config(s: Config) -> Result<Self, ConfigError> {
        let mut settings: Settings = s.try_deserialize()?;
        settings.pricing.normalize();

        if settings.pricing.whitelist.is_empty() {
            return Err(ConfigError::Message("pricing.whitelist must not be empty".into()));
        }

        Ok(settings)
    }
}
