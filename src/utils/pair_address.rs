//! Uniswap V2 pair address utilities.
//!
//! A V2 factory deploys every pair with CREATE2, so the pair address for a
//! token pair can be computed offline instead of calling `getPair`.

use alloy::primitives::{keccak256, Address, B256};

use super::{conversion::hex_encode, ZERO_ADDRESS};
use crate::db::PairLookup;

/// Compute the V2 pair address for two tokens.
///
/// The address is computed as:
/// ```text
/// create2(factory, keccak256(token0 ++ token1), init_code_hash)
/// ```
///
/// Where token0 and token1 are sorted by address (lower address first) and
/// packed as raw 20-byte values.
///
/// Returns `None` if the two tokens are the same address.
pub fn compute_v2_pair_address(
    factory: Address,
    init_code_hash: B256,
    token_a: Address,
    token_b: Address,
) -> Option<Address> {
    if token_a == token_b {
        return None;
    }

    // Sort tokens: lower address is token0
    let (token0, token1) = if token_a < token_b { (token_a, token_b) } else { (token_b, token_a) };

    let mut packed = [0u8; 40];
    packed[..20].copy_from_slice(token0.as_slice());
    packed[20..].copy_from_slice(token1.as_slice());
    let salt = keccak256(packed);

    Some(factory.create2(salt.0, init_code_hash.0))
}

/// Pair lookup backed by CREATE2 address derivation.
///
/// Every token pair resolves to an address whether or not the factory has
/// deployed it yet, so callers must still treat a missing store entry as
/// "no pool".
#[derive(Debug, Clone, Copy)]
pub struct Create2PairLookup {
    factory: Address,
    init_code_hash: B256,
}

impl Create2PairLookup {
    pub fn new(factory: Address, init_code_hash: B256) -> Self {
        Self {
            factory,
            init_code_hash,
        }
    }

    /// Build from hex strings, as stored in configuration.
    pub fn from_hex(factory: &str, init_code_hash: &str) -> anyhow::Result<Self> {
        let factory: Address = factory
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid factory address {factory}: {e}"))?;
        let init_code_hash: B256 = init_code_hash
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid init code hash {init_code_hash}: {e}"))?;
        Ok(Self::new(factory, init_code_hash))
    }
}

impl PairLookup for Create2PairLookup {
    fn get_pair(&self, token_a: &str, token_b: &str) -> String {
        let (Ok(addr_a), Ok(addr_b)) = (token_a.parse::<Address>(), token_b.parse::<Address>())
        else {
            return ZERO_ADDRESS.to_string();
        };

        match compute_v2_pair_address(self.factory, self.init_code_hash, addr_a, addr_b) {
            Some(pair) => hex_encode(pair.as_slice()),
            None => ZERO_ADDRESS.to_string(),
        }
    }
}
