//! Entity access for the pricing core.
//!
//! The core never writes. It reads token, pair and bundle snapshots through
//! [`EntityStore`] and resolves pair addresses through [`PairLookup`]. Both
//! are owned by the ingestion host; [`MemoryStore`] backs snapshot files
//! and tests.

pub mod memory;
pub mod models;

pub use memory::{MemoryStore, Snapshot};

use models::{Bundle, Pair, Token};

/// Keyed read access to entity snapshots.
///
/// `None` means "not created yet", a normal state while the index bootstraps.
pub trait EntityStore {
    fn token(&self, id: &str) -> Option<Token>;
    fn pair(&self, id: &str) -> Option<Pair>;
    fn bundle(&self) -> Option<Bundle>;
}

/// Maps an unordered token pair to its pool address (factory `getPair`).
///
/// Returns [`ZERO_ADDRESS`](crate::utils::ZERO_ADDRESS) when no pool exists.
pub trait PairLookup {
    fn get_pair(&self, token_a: &str, token_b: &str) -> String;
}
