//! # bpmn-rest
//!
//! REST resources over a BPMN process engine.
//!
//! ## Resources
//!
//! - **Historic process instances**: filtered, sorted and paged queries
//! - **Process instance diagrams**: PNG rendering with active activities highlighted
//! - **Variable data**: raw bytes of binary and serializable variables
//! - **Task identity links**: lookup and deletion of a single user or group link
//!
//! The engine sits behind the async ports in [`engine`]. The bundled
//! [`engine::InMemoryEngine`] implements them all and can be seeded from JSON.
//!
//! ## Example
//!
//! ```rust,no_run
//! use bpmn_rest::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::load()?;
//!     init_tracing(&config)?;
//!
//!     let state = AppState::builder()
//!         .config(config.clone())
//!         .build()
//!         .await?;
//!
//!     let app = Router::new()
//!         .route("/health", get(health))
//!         .route("/ready", get(readiness))
//!         .merge(api::routes())
//!         .with_state(state);
//!
//!     Server::new(config).serve(app).await
//! }
//! ```

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod health;
pub mod ids;
pub mod middleware;
pub mod observability;
pub mod query;
pub mod server;
pub mod service_builder;
pub mod state;

/// Commonly used types
pub mod prelude {
    pub use crate::api::{self, HistoricProcessInstanceResponse, RestIdentityLink, UrlBuilder};
    pub use crate::config::Config;
    pub use crate::engine::{
        DiagramRenderer, Engine, EngineError, EngineErrorKind, HistoryPort, InMemoryEngine,
        RenderError, RepositoryPort, RuntimePort, TaskPort,
    };
    pub use crate::error::{Error, Result};
    pub use crate::health::{health, readiness};
    pub use crate::ids::{MakeTypedRequestId, RequestId};
    pub use crate::middleware::{
        request_id_layer, request_id_propagation_layer, sensitive_headers_layer,
    };
    pub use crate::observability::{init_tracing, shutdown_tracing};
    pub use crate::query::{
        BooleanPolicy, DataResponse, HistoricProcessInstanceFilter, PageRequest,
        ParameterMapper, QueryFilter, RawParams,
    };
    pub use crate::server::Server;
    pub use crate::service_builder::{BpmnRestService, ServiceBuilder};
    pub use crate::state::{AppState, AppStateBuilder};

    pub use axum::{
        extract::{Path, Query, State},
        routing::{delete, get},
        Json, Router,
    };
}
