//! Engine configuration.
//!
//! Configuration is plain data with sensible defaults. It can be built in
//! code with the `with_*` methods or loaded from a JSON document in which
//! every field is optional:
//!
//! ```rust
//! use checked_values::config::EngineConfig;
//!
//! let config = EngineConfig::from_json_str(r#"{ "registry": { "fuzzy_threshold": 0.8 } }"#).unwrap();
//! assert_eq!(config.registry.fuzzy_threshold, 0.8);
//! assert!(config.cache.enabled);
//! ```

use crate::cache;
use crate::error::{ConfigError, ConfigResult};
use crate::registry::ValueTypeRegistry;
use serde::{Deserialize, Serialize};

/// Settings for canonical caches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// When false, every lookup constructs a fresh value and nothing is stored.
    pub enabled: bool,

    /// Inserts between sweeps of dead entries. Zero disables automatic sweeps.
    pub sweep_interval: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sweep_interval: 256,
        }
    }
}

/// Settings for name-based construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Minimum similarity (0.0 - 1.0) for a fuzzy name match to be accepted.
    pub fuzzy_threshold: f64,

    /// Construct a generic text value when no registered name matches.
    pub fallback_to_text: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: 0.7,
            fallback_to_text: true,
        }
    }
}

impl RegistryConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.fuzzy_threshold.is_nan()
            || self.fuzzy_threshold <= 0.0
            || self.fuzzy_threshold > 1.0
        {
            return Err(ConfigError::InvalidThreshold(self.fuzzy_threshold));
        }
        Ok(())
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub cache: CacheConfig,
    pub registry: RegistryConfig,
}

impl EngineConfig {
    /// Parse a JSON configuration document.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_cache_enabled(mut self, enabled: bool) -> Self {
        self.cache.enabled = enabled;
        self
    }

    pub fn with_sweep_interval(mut self, sweep_interval: usize) -> Self {
        self.cache.sweep_interval = sweep_interval;
        self
    }

    pub fn with_fuzzy_threshold(mut self, threshold: f64) -> Self {
        self.registry.fuzzy_threshold = threshold;
        self
    }

    pub fn with_text_fallback(mut self, fallback: bool) -> Self {
        self.registry.fallback_to_text = fallback;
        self
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.registry.validate()
    }

    /// Install the cache settings process-wide and build a populated registry.
    ///
    /// Cache settings can only be installed once, and only before the first
    /// value-type cache is touched.
    pub fn install(self) -> ConfigResult<ValueTypeRegistry> {
        self.validate()?;
        cache::configure(self.cache)?;
        log::info!("Installed engine configuration");
        ValueTypeRegistry::with_config(self.registry)
    }
}
