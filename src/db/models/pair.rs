use bigdecimal::BigDecimal;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use super::Token;
use crate::utils::safe_div;

/// V2 liquidity pair snapshot.
///
/// Primary Key: pair address (lowercase)
///
/// Price convention (Uniswap V2 subgraph):
/// - token0_price = token0 per token1 = reserve0 / reserve1
/// - token1_price = token1 per token0 = reserve1 / reserve0
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pair {
    pub id: String,
    pub token0: String,
    pub token1: String,

    // Reserves in token units (decimal adjusted)
    pub reserve0: BigDecimal,
    pub reserve1: BigDecimal,

    /// Total pair value in native-asset units
    #[serde(rename = "reserveETH")]
    pub reserve_eth: BigDecimal,
    #[serde(default, rename = "reserveUSD")]
    pub reserve_usd: BigDecimal,
    #[serde(default, rename = "trackedReserveETH")]
    pub tracked_reserve_eth: BigDecimal,

    pub token0_price: BigDecimal,
    pub token1_price: BigDecimal,

    #[serde(default)]
    pub liquidity_provider_count: u64,
}

impl Pair {
    /// Empty pair as created by a `PairCreated` event.
    pub fn new(id: &str, token0: &str, token1: &str) -> Self {
        Self {
            id: id.to_lowercase(),
            token0: token0.to_lowercase(),
            token1: token1.to_lowercase(),
            reserve0: BigDecimal::zero(),
            reserve1: BigDecimal::zero(),
            reserve_eth: BigDecimal::zero(),
            reserve_usd: BigDecimal::zero(),
            tracked_reserve_eth: BigDecimal::zero(),
            token0_price: BigDecimal::zero(),
            token1_price: BigDecimal::zero(),
            liquidity_provider_count: 0,
        }
    }

    /// Spot prices `(token0_price, token1_price)` for the given reserves.
    ///
    /// A price whose divisor reserve is zero is reported as zero.
    pub fn spot_prices(reserve0: &BigDecimal, reserve1: &BigDecimal) -> (BigDecimal, BigDecimal) {
        let token0_price = safe_div(reserve0, reserve1).unwrap_or_else(BigDecimal::zero);
        let token1_price = safe_div(reserve1, reserve0).unwrap_or_else(BigDecimal::zero);
        (token0_price, token1_price)
    }

    /// Copy of this pair with new reserves and every value derived from them.
    ///
    /// `reserve_eth = reserve0 * derivedETH0 + reserve1 * derivedETH1` and
    /// `reserve_usd = reserve_eth * eth_price`. Tracked reserve is left as is;
    /// it depends on the whitelist, see
    /// [`PriceResolver::tracked_liquidity_eth`](crate::pricing::PriceResolver::tracked_liquidity_eth).
    pub fn with_reserves(
        &self,
        reserve0: BigDecimal,
        reserve1: BigDecimal,
        token0: &Token,
        token1: &Token,
        eth_price: &BigDecimal,
    ) -> Self {
        let (token0_price, token1_price) = Self::spot_prices(&reserve0, &reserve1);
        let reserve_eth =
            &reserve0 * token0.derived_eth_or_zero() + &reserve1 * token1.derived_eth_or_zero();
        let reserve_usd = &reserve_eth * eth_price;

        Self {
            reserve0,
            reserve1,
            reserve_eth,
            reserve_usd,
            token0_price,
            token1_price,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn bd(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn test_spot_prices_from_reserves() {
        let (p0, p1) = Pair::spot_prices(&bd("200"), &bd("50"));
        assert_eq!(p0, bd("4"));
        assert_eq!(p1, bd("0.25"));
        // Reciprocal invariant holds for nonzero reserves
        assert_eq!(&p0 * &p1, bd("1"));
    }

    #[test]
    fn test_spot_prices_zero_reserve_is_guarded() {
        let (p0, p1) = Pair::spot_prices(&bd("200"), &BigDecimal::zero());
        assert_eq!(p0, BigDecimal::zero());
        assert_eq!(p1, BigDecimal::zero());

        let (p0, p1) = Pair::spot_prices(&BigDecimal::zero(), &bd("10"));
        assert_eq!(p0, BigDecimal::zero());
        assert_eq!(p1, BigDecimal::zero());
    }

    #[test]
    fn test_with_reserves_derives_eth_and_usd() {
        let pair = Pair::new("0xPAIR", "0xaaa", "0xbbb");
        let token0 = Token::new("0xaaa", "AAA", 18).with_derived_eth(bd("0.5"));
        let token1 = Token::new("0xbbb", "BBB", 18); // never priced

        let updated = pair.with_reserves(bd("100"), bd("25"), &token0, &token1, &bd("20"));

        assert_eq!(updated.id, "0xpair");
        assert_eq!(updated.token0_price, bd("4"));
        assert_eq!(updated.token1_price, bd("0.25"));
        assert_eq!(updated.reserve_eth, bd("50"));
        assert_eq!(updated.reserve_usd, bd("1000"));
        assert_eq!(updated.liquidity_provider_count, 0);
    }

    #[test]
    fn test_deserialize_subgraph_shape() {
        let json = r#"{
            "id": "0xpair",
            "token0": "0xaaa",
            "token1": "0xbbb",
            "reserve0": "10.5",
            "reserve1": "21",
            "reserveETH": "3",
            "token0Price": "0.5",
            "token1Price": "2",
            "liquidityProviderCount": 4
        }"#;
        let pair: Pair = serde_json::from_str(json).unwrap();
        assert_eq!(pair.reserve0, bd("10.5"));
        assert_eq!(pair.reserve_eth, bd("3"));
        assert_eq!(pair.reserve_usd, BigDecimal::zero());
        assert_eq!(pair.liquidity_provider_count, 4);
    }
}
