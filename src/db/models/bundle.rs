use bigdecimal::BigDecimal;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

/// Key of the one and only bundle record.
pub const BUNDLE_ID: &str = "1";

/// Global singleton holding the native-asset USD price.
///
/// Refreshed by the ingestion layer (usually from
/// [`PriceResolver::eth_price_usd`](crate::pricing::PriceResolver::eth_price_usd))
/// before trades in the same block are priced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bundle {
    #[serde(default = "default_bundle_id")]
    pub id: String,
    #[serde(rename = "ethPrice")]
    pub eth_price: BigDecimal,
}

fn default_bundle_id() -> String {
    BUNDLE_ID.to_string()
}

impl Bundle {
    pub fn new(eth_price: BigDecimal) -> Self {
        Self {
            id: default_bundle_id(),
            eth_price,
        }
    }
}

impl Default for Bundle {
    fn default() -> Self {
        Self::new(BigDecimal::zero())
    }
}
