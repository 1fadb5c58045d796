//! Configuration types for engine creation.

use std::{fs::File, io::BufReader, path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{Error, Result, wizard::cache::DEFAULT_CAPACITY};

/// Configuration for creating a wizard engine.
///
/// Builder-style, and loadable from JSON where every missing field keeps its
/// default.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use piscari::app::EngineConfig;
///
/// let config = EngineConfig::new()
///     .with_seed(42)
///     .with_timeout(Duration::from_millis(250))
///     .with_cache_capacity(64);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Wall-clock budget for one evaluation, in milliseconds
    pub timeout_ms: u64,
    /// Entries per cache map
    pub cache_capacity: usize,
    /// Whether evaluations are memoized
    pub cache_enabled: bool,
    /// Random seed for tie-breaking (None = seeded from the OS)
    pub seed: Option<u64>,
}

impl EngineConfig {
    /// Create a configuration with default values:
    /// - Timeout: 1000 ms
    /// - Cache: enabled, 1000 entries per map
    /// - Seed: None (non-deterministic)
    pub fn new() -> Self {
        Self {
            timeout_ms: 1000,
            cache_capacity: DEFAULT_CAPACITY,
            cache_enabled: true,
            seed: None,
        }
    }

    /// Read a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened or parsed, or if the result does not
    /// pass `validate`.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open config {}", path.display()),
            source,
        })?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Set the evaluation time budget.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the capacity of each cache map.
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Disable memoization entirely.
    pub fn without_cache(mut self) -> Self {
        self.cache_enabled = false;
        self
    }

    /// Set the random seed for deterministic tie-breaking.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// # Errors
    ///
    /// `InvalidConfiguration` for an enabled cache with zero capacity.
    pub fn validate(&self) -> Result<()> {
        if self.cache_enabled && self.cache_capacity == 0 {
            return Err(Error::InvalidConfiguration {
                message: "cache capacity must be positive (or disable the cache)".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
