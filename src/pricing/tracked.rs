use bigdecimal::BigDecimal;
use log::{debug, warn};
use num_traits::Zero;

use super::PriceResolver;
use crate::{
    db::{
        models::{Pair, Token},
        EntityStore, PairLookup,
    },
    utils::safe_div,
};

fn two() -> BigDecimal {
    BigDecimal::from(2)
}

impl<S, P> PriceResolver<'_, S, P>
where
    S: EntityStore + ?Sized,
    P: PairLookup + ?Sized,
{
    /// Current native price from the bundle, zero if the bundle is missing.
    fn bundle_eth_price(&self) -> BigDecimal {
        match self.store.bundle() {
            Some(bundle) => bundle.eth_price,
            None => {
                warn!("Bundle not created yet, tracked values are zero");
                BigDecimal::zero()
            },
        }
    }

    /// USD price per unit of each token: `derivedETH * ethPrice`.
    fn usd_prices(&self, token0: &Token, token1: &Token) -> (BigDecimal, BigDecimal) {
        let eth_price = self.bundle_eth_price();
        (
            token0.derived_eth_or_zero() * &eth_price,
            token1.derived_eth_or_zero() * &eth_price,
        )
    }

    /// USD value of a swap that counts toward tracked volume.
    ///
    /// - Both tokens whitelisted → average of both USD amounts
    /// - One whitelisted → full USD amount of that side
    /// - Neither → 0
    ///
    /// Pairs with fewer than `minimum_liquidity_providers` LPs must first show
    /// `minimum_usd_threshold_new_pairs` of whitelisted reserves (one visible
    /// side counts double), otherwise the swap is not tracked at all.
    pub fn tracked_volume_usd(
        &self,
        amount0: &BigDecimal,
        token0: &Token,
        amount1: &BigDecimal,
        token1: &Token,
        pair: &Pair,
    ) -> BigDecimal {
        let (price0, price1) = self.usd_prices(token0, token1);
        let whitelisted = (self.is_whitelisted(&token0.id), self.is_whitelisted(&token1.id));

        if pair.liquidity_provider_count < self.settings.minimum_liquidity_providers {
            let reserve0_usd = &pair.reserve0 * &price0;
            let reserve1_usd = &pair.reserve1 * &price1;
            let minimum = &self.settings.minimum_usd_threshold_new_pairs;

            let too_thin = match whitelisted {
                (true, true) => reserve0_usd + reserve1_usd < *minimum,
                (true, false) => reserve0_usd * two() < *minimum,
                (false, true) => reserve1_usd * two() < *minimum,
                (false, false) => false,
            };

            if too_thin {
                debug!(
                    "Pair {} below new pair threshold ({} LPs), volume not tracked",
                    pair.id, pair.liquidity_provider_count
                );
                return BigDecimal::zero();
            }
        }

        match whitelisted {
            (true, true) => (amount0 * &price0 + amount1 * &price1) / two(),
            (true, false) => amount0 * &price0,
            (false, true) => amount1 * &price1,
            (false, false) => BigDecimal::zero(),
        }
    }

    /// USD value of pair reserves that counts toward tracked liquidity.
    ///
    /// - Both tokens whitelisted → sum of both USD amounts
    /// - One whitelisted → double that side (only half the pool is visible)
    /// - Neither → 0
    pub fn tracked_liquidity_usd(
        &self,
        amount0: &BigDecimal,
        token0: &Token,
        amount1: &BigDecimal,
        token1: &Token,
    ) -> BigDecimal {
        let (price0, price1) = self.usd_prices(token0, token1);

        match (self.is_whitelisted(&token0.id), self.is_whitelisted(&token1.id)) {
            (true, true) => amount0 * &price0 + amount1 * &price1,
            (true, false) => amount0 * &price0 * two(),
            (false, true) => amount1 * &price1 * two(),
            (false, false) => BigDecimal::zero(),
        }
    }

    /// Tracked liquidity expressed in native units (`trackedReserveETH`).
    ///
    /// Zero while the bundle has no native price.
    pub fn tracked_liquidity_eth(
        &self,
        amount0: &BigDecimal,
        token0: &Token,
        amount1: &BigDecimal,
        token1: &Token,
    ) -> BigDecimal {
        let tracked_usd = self.tracked_liquidity_usd(amount0, token0, amount1, token1);
        safe_div(&tracked_usd, &self.bundle_eth_price()).unwrap_or_else(BigDecimal::zero)
    }
}
