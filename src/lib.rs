pub mod config;
pub mod db;
pub mod pricing;
pub mod utils;

pub use config::{PricingSettings, Settings};
pub use db::{EntityStore, MemoryStore, PairLookup};
pub use pricing::{PriceResolver, Whitelist};
