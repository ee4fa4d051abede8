use bigdecimal::BigDecimal;
use log::debug;
use num_traits::Zero;

use super::PriceResolver;
use crate::{
    config::{NativeSide, StablePool},
    db::{models::Pair, EntityStore, PairLookup},
    utils::safe_div,
};

/// Split `reserves` into weights proportional to each entry.
///
/// Returns `None` when the reserves sum to zero, since no weight is defined.
pub fn basket_weights(reserves: &[BigDecimal]) -> Option<Vec<BigDecimal>> {
    let total = reserves.iter().fold(BigDecimal::zero(), |acc, r| acc + r);
    reserves.iter().map(|reserve| safe_div(reserve, &total)).collect()
}

/// Native-side reserve and stable-per-native price of a basket pool.
fn native_leg<'p>(pair: &'p Pair, side: NativeSide) -> (&'p BigDecimal, &'p BigDecimal) {
    match side {
        // Stable is token1: token1 per token0 is USD per native
        NativeSide::Token0 => (&pair.reserve0, &pair.token1_price),
        // Stable is token0: token0 per token1 is USD per native
        NativeSide::Token1 => (&pair.reserve1, &pair.token0_price),
    }
}

/// Liquidity-weighted average of the stable-per-native price across `legs`.
fn weighted_price(legs: &[(&Pair, NativeSide)]) -> BigDecimal {
    let (reserves, prices): (Vec<BigDecimal>, Vec<&BigDecimal>) = legs
        .iter()
        .map(|(pair, side)| {
            let (reserve, price) = native_leg(pair, *side);
            (reserve.clone(), price)
        })
        .unzip();

    let Some(weights) = basket_weights(&reserves) else {
        debug!("Stable basket has no native liquidity, ETH price unavailable");
        return BigDecimal::zero();
    };

    weights
        .iter()
        .zip(prices)
        .fold(BigDecimal::zero(), |acc, (weight, price)| acc + weight * price)
}

impl<S, P> PriceResolver<'_, S, P>
where
    S: EntityStore + ?Sized,
    P: PairLookup + ?Sized,
{
    /// Native asset price in USD from the stablecoin basket.
    ///
    /// Cascade, not a plain average of whatever exists:
    /// 1. All three pools → three-way liquidity-weighted price
    /// 2. First and third → two-way liquidity-weighted price
    /// 3. Third only → that pool's price
    /// 4. Otherwise → 0 (basket not bootstrapped yet)
    pub fn eth_price_usd(&self) -> BigDecimal {
        let [first, second, third] = &self.settings.stable_pools;
        let load = |pool: &StablePool| {
            let pair = self.store.pair(&pool.address);
            if pair.is_none() {
                debug!("Stable pool {} not created yet", pool.address);
            }
            pair.map(|pair| (pair, pool.native_side))
        };

        match (load(first), load(second), load(third)) {
            (Some((a, side_a)), Some((b, side_b)), Some((c, side_c))) => {
                weighted_price(&[(&a, side_a), (&b, side_b), (&c, side_c)])
            },
            (Some((a, side_a)), None, Some((c, side_c))) => {
                weighted_price(&[(&a, side_a), (&c, side_c)])
            },
            (_, _, Some((c, side_c))) => native_leg(&c, side_c).1.clone(),
            _ => BigDecimal::zero(),
        }
    }
}
