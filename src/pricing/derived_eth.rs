use bigdecimal::BigDecimal;
use log::{debug, warn};
use num_traits::{One, Zero};

use super::PriceResolver;
use crate::{
    db::{models::Token, EntityStore, PairLookup},
    utils::ZERO_ADDRESS,
};

impl<S, P> PriceResolver<'_, S, P>
where
    S: EntityStore + ?Sized,
    P: PairLookup + ?Sized,
{
    /// Price of `token` in native-asset units.
    ///
    /// Walks the whitelist in order and prices through the FIRST anchor whose
    /// pair with `token` holds more than `minimum_liquidity_threshold_eth`:
    ///
    /// - token is token0 → `token1_price * anchor.derivedETH`
    /// - token is token1 → `token0_price * anchor.derivedETH`
    ///
    /// This is deliberately first-match: whitelist order is a trust ranking, and
    /// a more liquid pair further down the list never overrides an earlier one.
    /// Pairs below the threshold are skipped, not used as a fallback.
    ///
    /// Returns 1 for the native asset and 0 when no anchor qualifies.
    pub fn find_eth_per_token(&self, token: &Token) -> BigDecimal {
        if self.settings.is_native(&token.id) {
            return BigDecimal::one();
        }

        let token_id = token.id.to_lowercase();
        let threshold = &self.settings.minimum_liquidity_threshold_eth;

        for anchor in self.settings.whitelist.iter() {
            if anchor == token_id {
                continue;
            }

            let pair_address = self.pairs.get_pair(&token_id, anchor);
            if pair_address == ZERO_ADDRESS {
                continue;
            }

            let Some(pair) = self.store.pair(&pair_address) else {
                debug!("Pair {} for {}/{} not in store", pair_address, token_id, anchor);
                continue;
            };

            if pair.reserve_eth <= *threshold {
                continue;
            }

            // rate = anchor per token
            let (anchor_id, rate) = if pair.token0 == token_id {
                (&pair.token1, &pair.token1_price)
            } else if pair.token1 == token_id {
                (&pair.token0, &pair.token0_price)
            } else {
                warn!(
                    "Pair lookup returned {} for {}/{} but it holds {}/{}",
                    pair.id, token_id, anchor, pair.token0, pair.token1
                );
                continue;
            };

            let Some(anchor_token) = self.store.token(anchor_id) else {
                debug!("Anchor token {} not in store, skipping", anchor_id);
                continue;
            };

            return rate * anchor_token.derived_eth_or_zero();
        }

        BigDecimal::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::{models::Pair, MemoryStore},
        pricing::test_support::{bd, pair, settings, NATIVE, USDA, USDB, WBTC},
    };

    const TOKEN: &str = "0xtoken";

    fn anchored(id: &str, token0: &str, token1: &str, r0: &str, r1: &str, eth: &str) -> Pair {
        let mut pair = pair(id, token0, token1, r0, r1);
        pair.reserve_eth = bd(eth);
        pair
    }

    fn store_with_anchors() -> MemoryStore {
        let mut store = MemoryStore::new();
        store.insert_token(Token::new(NATIVE, "WNATIVE", 18).with_derived_eth(bd("1")));
        store.insert_token(Token::new(USDA, "USDA", 18).with_derived_eth(bd("0.05")));
        store.insert_token(Token::new(USDB, "USDB", 18).with_derived_eth(bd("0.04")));
        store.insert_token(Token::new(WBTC, "WBTC", 8).with_derived_eth(bd("15")));
        store
    }

    #[test]
    fn test_native_is_always_one() {
        let settings = settings();
        let store = MemoryStore::new();
        let resolver = PriceResolver::new(&settings, &store, &store);

        assert_eq!(resolver.find_eth_per_token(&Token::new(NATIVE, "WNATIVE", 18)), BigDecimal::one());
        // Case of the stored id does not matter
        assert_eq!(
            resolver.find_eth_per_token(&Token::new("0xNATIVE", "WNATIVE", 18)),
            BigDecimal::one()
        );
    }

    #[test]
    fn test_unpaired_token_is_zero() {
        let settings = settings();
        let store = store_with_anchors();
        let resolver = PriceResolver::new(&settings, &store, &store);

        assert_eq!(resolver.find_eth_per_token(&Token::new(TOKEN, "TKN", 18)), BigDecimal::zero());
    }

    #[test]
    fn test_all_pairs_below_threshold_is_zero() {
        let settings = settings();
        let mut store = store_with_anchors();
        // reserveETH must be strictly above the threshold of 1
        store.insert_pair(anchored("0xp1", TOKEN, NATIVE, "100", "1", "1"));
        store.insert_pair(anchored("0xp2", TOKEN, USDA, "100", "10", "0.5"));

        let resolver = PriceResolver::new(&settings, &store, &store);
        assert_eq!(resolver.find_eth_per_token(&Token::new(TOKEN, "TKN", 18)), BigDecimal::zero());
    }

    #[test]
    fn test_first_anchor_wins_over_more_liquid_one() {
        let settings = settings();
        let mut store = store_with_anchors();
        // USDA is ranked above WBTC; its pair is much thinner but still qualifies
        store.insert_pair(anchored("0xp_usda", TOKEN, USDA, "100", "300", "15"));
        store.insert_pair(anchored("0xp_wbtc", TOKEN, WBTC, "100000", "1", "30000"));

        let resolver = PriceResolver::new(&settings, &store, &store);
        // 3 USDA per token * 0.05
        assert_eq!(resolver.find_eth_per_token(&Token::new(TOKEN, "TKN", 18)), bd("0.15"));
    }

    #[test]
    fn test_thin_pair_falls_through_to_next_anchor() {
        let settings = settings();
        let mut store = store_with_anchors();
        store.insert_pair(anchored("0xp_native", TOKEN, NATIVE, "100", "0.5", "0.5"));
        store.insert_pair(anchored("0xp_usdb", TOKEN, USDB, "100", "200", "8"));

        let resolver = PriceResolver::new(&settings, &store, &store);
        // 2 USDB per token * 0.04
        assert_eq!(resolver.find_eth_per_token(&Token::new(TOKEN, "TKN", 18)), bd("0.08"));
    }

    #[test]
    fn test_token_on_token1_side_uses_token0_price() {
        let settings = settings();
        let mut store = store_with_anchors();
        // token is token1: 4 native per token
        store.insert_pair(anchored("0xp_native", NATIVE, TOKEN, "400", "100", "800"));

        let resolver = PriceResolver::new(&settings, &store, &store);
        assert_eq!(resolver.find_eth_per_token(&Token::new(TOKEN, "TKN", 18)), bd("4"));
    }

    #[test]
    fn test_missing_anchor_token_is_skipped() {
        let settings = settings();
        let mut store = store_with_anchors();
        store.insert_pair(anchored("0xp_ghost", TOKEN, "0xusdc", "100", "100", "50"));
        store.insert_pair(anchored("0xp_wbtc", TOKEN, WBTC, "100000", "1", "30000"));

        let resolver = PriceResolver::new(&settings, &store, &store);
        // USDC has no token record, so WBTC prices it: 0.00001 * 15
        assert_eq!(resolver.find_eth_per_token(&Token::new(TOKEN, "TKN", 18)), bd("0.00015"));
    }

    #[test]
    fn test_unpriced_anchor_stops_the_walk_at_zero() {
        let settings = settings();
        let mut store = store_with_anchors();
        store.insert_token(Token::new("0xusdc", "USDC", 6));
        store.insert_pair(anchored("0xp_usdc", TOKEN, "0xusdc", "100", "100", "50"));
        store.insert_pair(anchored("0xp_wbtc", TOKEN, WBTC, "100000", "1", "30000"));

        let resolver = PriceResolver::new(&settings, &store, &store);
        assert_eq!(resolver.find_eth_per_token(&Token::new(TOKEN, "TKN", 18)), BigDecimal::zero());
    }
}
