//! Utility functions for the pricing core.
//!
//! - [`conversion`] - Guarded decimal division and raw amount scaling
//! - [`pair_address`] - Uniswap V2 CREATE2 pair address computation

mod conversion;
mod pair_address;

// ============================================
// Common Constants
// ============================================

/// The Ethereum zero address (0x0000000000000000000000000000000000000000)
/// Returned by pair lookups when no pool exists for a token pair.
pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

// ============================================
// Re-exports
// ============================================

// Conversion utilities
pub use conversion::{convert_token_to_decimal, hex_encode, safe_div, str_to_token_decimal};

// Pair address utilities (V2)
pub use pair_address::{compute_v2_pair_address, Create2PairLookup};
