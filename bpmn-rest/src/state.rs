//! Application state management

use std::sync::Arc;

use crate::api::UrlBuilder;
use crate::config::Config;
use crate::engine::{Engine, InMemoryEngine};
use crate::error::Result;
use crate::query::{PageLimits, ParameterMapper};

/// Application state shared across handlers
///
/// Cloned per request; everything inside is behind an `Arc` or cheap to copy.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    engine: Engine,
    mapper: ParameterMapper,
    urls: UrlBuilder,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Config::default(), Engine::default())
    }
}

impl AppState {
    /// Create state for `config` backed by `engine`
    pub fn new(config: Config, engine: Engine) -> Self {
        let mapper = ParameterMapper::new(config.rest.coercion());
        let urls = UrlBuilder::new(&config.rest.base_url);
        Self {
            config: Arc::new(config),
            engine,
            mapper,
            urls,
        }
    }

    /// Create a new builder for AppState
    pub fn builder() -> AppStateBuilder {
        AppStateBuilder::new()
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Mapper configured with the boolean policy and date formats from config
    pub fn mapper(&self) -> &ParameterMapper {
        &self.mapper
    }

    pub fn urls(&self) -> &UrlBuilder {
        &self.urls
    }

    pub fn page_limits(&self) -> PageLimits {
        self.config.rest.page_limits()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service", &self.config.service.name)
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}

/// Builder for AppState
///
/// Without an explicit engine, `build` loads `engine.seed_path` into an
/// [`InMemoryEngine`], or starts one empty when no seed is configured.
pub struct AppStateBuilder {
    config: Option<Config>,
    engine: Option<Engine>,
}

impl AppStateBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: None,
            engine: None,
        }
    }

    /// Set the configuration
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Use an externally wired engine
    pub fn engine(mut self, engine: Engine) -> Self {
        self.engine = Some(engine);
        self
    }

    /// Build the AppState
    pub async fn build(self) -> Result<AppState> {
        let config = self.config.unwrap_or_default();

        let engine = match self.engine {
            Some(engine) => engine,
            None => {
                let memory = match &config.engine.seed_path {
                    Some(path) => InMemoryEngine::load(path).await?,
                    None => {
                        tracing::info!("No engine seed configured, starting with an empty in-memory engine");
                        InMemoryEngine::new()
                    }
                };
                Engine::in_memory(Arc::new(memory))
            }
        };

        Ok(AppState::new(config, engine))
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
