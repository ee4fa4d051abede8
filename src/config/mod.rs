mod config;

pub use self::config::{FactorySettings, NativeSide, PricingSettings, Settings, StablePool};
