use bigdecimal::BigDecimal;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

/// ERC20 token snapshot.
///
/// Primary Key: address (lowercase)
/// `derived_eth` stays `None` until the token has been priced once.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Token {
    pub id: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub decimals: u8,

    /// Price of one unit in native-asset units
    #[serde(default, rename = "derivedETH")]
    pub derived_eth: Option<BigDecimal>,
}

impl Token {
    pub fn new(id: &str, symbol: &str, decimals: u8) -> Self {
        Self {
            // Always lowercase addresses for consistent comparisons
            id: id.to_lowercase(),
            symbol: symbol.to_string(),
            decimals,
            derived_eth: None,
        }
    }

    pub fn with_derived_eth(mut self, derived_eth: BigDecimal) -> Self {
        self.derived_eth = Some(derived_eth);
        self
    }

    /// Native-asset price, reading a token that was never priced as zero.
    pub fn derived_eth_or_zero(&self) -> BigDecimal {
        self.derived_eth.clone().unwrap_or_else(BigDecimal::zero)
    }
}
