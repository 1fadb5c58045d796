//! Dependency injection container for the wizard.
//!
//! The container owns the value-table source and hands out engines wired to
//! it, so callers never pick an adapter themselves.

use std::sync::Arc;

use super::config::EngineConfig;
use crate::{Result, adapters::EmbeddedTable, ports::TableSource, wizard::Engine};

/// Application with dependency injection.
///
/// # Examples
///
/// ## Production usage
///
/// ```
/// use piscari::app::{App, EngineConfig};
///
/// let app = App::new();
/// let engine = app.create_ready_engine(EngineConfig::new().with_seed(42))?;
/// assert!(engine.is_ready());
/// # Ok::<(), piscari::Error>(())
/// ```
///
/// ## Testing with dependency injection
///
/// ```
/// use piscari::app::App;
/// use piscari::adapters::InMemoryTable;
/// use piscari::wizard::TableRecord;
///
/// let app = App::for_testing()
///     .with_table_source(InMemoryTable::new(vec![TableRecord::new(0, 0, 0)]))
///     .with_default_seed(42)
///     .build();
/// ```
pub struct App {
    /// Where engines load their value table from
    table_source: Arc<dyn TableSource + Send + Sync>,
    /// Default random seed (None = non-deterministic)
    default_seed: Option<u64>,
}

impl App {
    /// Create a new app with production defaults.
    ///
    /// Uses:
    /// - `EmbeddedTable`, the table compiled into the crate
    /// - No default seed (non-deterministic RNG)
    pub fn new() -> Self {
        Self {
            table_source: Arc::new(EmbeddedTable),
            default_seed: None,
        }
    }

    /// Create a builder for constructing app with custom dependencies.
    pub fn for_testing() -> AppBuilder {
        AppBuilder::new()
    }

    /// Get the table source.
    pub fn table_source(&self) -> Arc<dyn TableSource + Send + Sync> {
        Arc::clone(&self.table_source)
    }

    /// Create an engine with the given configuration, without loading its table.
    ///
    /// # Errors
    ///
    /// Fails if `config` does not validate.
    pub fn create_engine(&self, mut config: EngineConfig) -> Result<Engine> {
        config.validate()?;
        // Seed from config wins over the container default
        config.seed = config.seed.or(self.default_seed);
        Ok(Engine::new(config, self.table_source()))
    }

    /// Create an engine and load its value table.
    ///
    /// # Errors
    ///
    /// Fails if `config` does not validate or the table cannot be loaded.
    pub fn create_ready_engine(&self, config: EngineConfig) -> Result<Engine> {
        let mut engine = self.create_engine(config)?;
        engine.initialize()?;
        Ok(engine)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing app with custom dependencies.
///
/// Primarily used for testing to inject table sources and control randomness.
pub struct AppBuilder {
    table_source: Option<Arc<dyn TableSource + Send + Sync>>,
    default_seed: Option<u64>,
}

impl AppBuilder {
    /// Create a new builder with no dependencies configured.
    pub fn new() -> Self {
        Self {
            table_source: None,
            default_seed: None,
        }
    }

    /// Set the table source implementation.
    pub fn with_table_source<S>(mut self, source: S) -> Self
    where
        S: TableSource + Send + Sync + 'static,
    {
        self.table_source = Some(Arc::new(source));
        self
    }

    /// Set default random seed for all engines.
    pub fn with_default_seed(mut self, seed: u64) -> Self {
        self.default_seed = Some(seed);
        self
    }

    /// Build the app.
    ///
    /// Uses `EmbeddedTable` if no source was configured.
    pub fn build(self) -> App {
        App {
            table_source: self
                .table_source
                .unwrap_or_else(|| Arc::new(EmbeddedTable)),
            default_seed: self.default_seed,
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryTable;

    #[test]
    fn test_default_app_loads_embedded_table() {
        let engine = App::new().create_ready_engine(EngineConfig::new()).unwrap();
        assert_eq!(engine.table().len(), 84);
    }

    #[test]
    fn test_builder_injects_source_and_seed() {
        let source = InMemoryTable::new(vec![crate::wizard::TableRecord::new(0, 0, 0)]);
        let app = App::for_testing()
            .with_table_source(source.clone())
            .with_default_seed(9)
            .build();

        let engine = app.create_ready_engine(EngineConfig::new()).unwrap();
        assert_eq!(engine.config().seed, Some(9));
        assert_eq!(source.fetch_count(), 1);

        let engine = app.create_engine(EngineConfig::new().with_seed(3)).unwrap();
        assert_eq!(engine.config().seed, Some(3));
    }

    #[test]
    fn test_invalid_config_is_refused() {
        let result = App::new().create_engine(EngineConfig::new().with_cache_capacity(0));
        assert!(result.is_err());
    }
}
