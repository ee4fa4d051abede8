//! USD pricing and tracked value attribution.
//!
//! [`PriceResolver`] borrows the immutable [`PricingSettings`], an entity store
//! and a pair lookup, and answers four questions for an ingestion handler:
//!
//! - what is the native asset worth in USD ([`eth_price_usd`](PriceResolver::eth_price_usd))
//! - what is a token worth in native units ([`find_eth_per_token`](PriceResolver::find_eth_per_token))
//! - how much of a swap counts as tracked volume ([`tracked_volume_usd`](PriceResolver::tracked_volume_usd))
//! - how much of a pair's reserves counts as tracked liquidity ([`tracked_liquidity_usd`](PriceResolver::tracked_liquidity_usd))
//!
//! Uses Uniswap's whitelist approach: only amounts of whitelisted tokens are
//! trusted, which keeps scam tokens with self-made prices out of the totals.
//! All arithmetic is `BigDecimal`; every division is guarded.

mod derived_eth;
mod eth_price;
mod tracked;
mod whitelist;

pub use eth_price::basket_weights;
pub use whitelist::Whitelist;

use crate::{
    config::PricingSettings,
    db::{EntityStore, PairLookup},
};

/// Stateless price resolver over a consistent entity snapshot.
///
/// Holds only shared references, so one resolver per event (or one per block)
/// costs nothing and any number can run side by side.
pub struct PriceResolver<'a, S: ?Sized, P: ?Sized> {
    settings: &'a PricingSettings,
    store: &'a S,
    pairs: &'a P,
}

impl<'a, S, P> PriceResolver<'a, S, P>
where
    S: EntityStore + ?Sized,
    P: PairLookup + ?Sized,
{
    pub fn new(settings: &'a PricingSettings, store: &'a S, pairs: &'a P) -> Self {
        Self {
            settings,
            store,
            pairs,
        }
    }

    fn is_whitelisted(&self, token: &str) -> bool {
        self.settings.whitelist.contains(token)
    }
}
