use std::{fs, path::Path};

use anyhow::Context;
use log::info;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::{
    models::{Bundle, Pair, Token},
    EntityStore, PairLookup,
};
use crate::utils::ZERO_ADDRESS;

/// Serialized entity dump, as exported from the index.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub tokens: Vec<Token>,
    #[serde(default)]
    pub pairs: Vec<Pair>,
    #[serde(default)]
    pub bundle: Option<Bundle>,
}

/// In-memory entity store.
///
/// Also answers pair lookups from the pairs it holds, which matches the
/// factory's `getPair` for every pair the index has seen.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tokens: FxHashMap<String, Token>,
    pairs: FxHashMap<String, Pair>,
    /// (lower token, higher token) -> pair address
    pair_index: FxHashMap<(String, String), String>,
    bundle: Option<Bundle>,
}

fn pair_key(token_a: &str, token_b: &str) -> (String, String) {
    let a = token_a.to_lowercase();
    let b = token_b.to_lowercase();
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut store = Self::new();
        for token in snapshot.tokens {
            store.insert_token(token);
        }
        for pair in snapshot.pairs {
            store.insert_pair(pair);
        }
        store.bundle = snapshot.bundle;
        store
    }

    /// Load a JSON [`Snapshot`] from disk.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
        let snapshot: Snapshot = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse snapshot {}", path.display()))?;

        let store = Self::from_snapshot(snapshot);
        info!(
            "Loaded snapshot {}: {} tokens, {} pairs, bundle {}",
            path.display(),
            store.tokens.len(),
            store.pairs.len(),
            if store.bundle.is_some() { "present" } else { "missing" }
        );
        Ok(store)
    }

    pub fn insert_token(&mut self, mut token: Token) {
        token.id = token.id.to_lowercase();
        self.tokens.insert(token.id.clone(), token);
    }

    pub fn insert_pair(&mut self, mut pair: Pair) {
        pair.id = pair.id.to_lowercase();
        pair.token0 = pair.token0.to_lowercase();
        pair.token1 = pair.token1.to_lowercase();
        self.pair_index.insert(pair_key(&pair.token0, &pair.token1), pair.id.clone());
        self.pairs.insert(pair.id.clone(), pair);
    }

    pub fn set_bundle(&mut self, bundle: Bundle) {
        self.bundle = Some(bundle);
    }

    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.tokens.values()
    }

    pub fn pairs(&self) -> impl Iterator<Item = &Pair> {
        self.pairs.values()
    }
}

impl EntityStore for MemoryStore {
    fn token(&self, id: &str) -> Option<Token> {
        self.tokens.get(&id.to_lowercase()).cloned()
    }

    fn pair(&self, id: &str) -> Option<Pair> {
        self.pairs.get(&id.to_lowercase()).cloned()
    }

    fn bundle(&self) -> Option<Bundle> {
        self.bundle.clone()
    }
}

impl PairLookup for MemoryStore {
    fn get_pair(&self, token_a: &str, token_b: &str) -> String {
        self.pair_index
            .get(&pair_key(token_a, token_b))
            .cloned()
            .unwrap_or_else(|| ZERO_ADDRESS.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use std::str::FromStr;

    #[test]
    fn test_pair_lookup_is_unordered_and_case_insensitive() {
        let mut store = MemoryStore::new();
        store.insert_pair(Pair::new("0xPAIR", "0xAAA", "0xbbb"));

        assert_eq!(store.get_pair("0xaaa", "0xbbb"), "0xpair");
        assert_eq!(store.get_pair("0xBBB", "0xaaa"), "0xpair");
        assert_eq!(store.get_pair("0xaaa", "0xccc"), ZERO_ADDRESS);
        assert!(store.pair("0xPair").is_some());
    }

    #[test]
    fn test_missing_entities_are_none() {
        let store = MemoryStore::new();
        assert!(store.token("0xaaa").is_none());
        assert!(store.pair("0xpair").is_none());
        assert!(store.bundle().is_none());
    }

    #[test]
    fn test_from_snapshot_json() {
        let json = r#"{
            "tokens": [{ "id": "0xAAA", "symbol": "AAA", "decimals": 18, "derivedETH": "0.25" }],
            "pairs": [],
            "bundle": { "ethPrice": "40" }
        }"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        let store = MemoryStore::from_snapshot(snapshot);

        let token = store.token("0xaaa").unwrap();
        assert_eq!(token.derived_eth, Some(BigDecimal::from_str("0.25").unwrap()));
        assert_eq!(store.bundle().unwrap().eth_price, BigDecimal::from(40));
    }
}
