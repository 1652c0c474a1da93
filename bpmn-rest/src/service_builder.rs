//! Service assembly
//!
//! Combines configuration, application state and the REST resources into a
//! runnable service. Health and readiness endpoints are always included.
//!
//! ## Example
//!
//! ```rust,no_run
//! use bpmn_rest::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::load()?;
//!     let state = AppState::builder().config(config.clone()).build().await?;
//!
//!     ServiceBuilder::new()
//!         .with_config(config)
//!         .with_state(state)
//!         .build()
//!         .serve()
//!         .await
//! }
//! ```

use axum::{routing::get, Router};

use crate::config::Config;
use crate::server::Server;
use crate::state::AppState;

fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(crate::health::health))
        .route("/ready", get(crate::health::readiness))
}

pub struct ServiceBuilder {
    config: Option<Config>,
    state: Option<AppState>,
}

impl ServiceBuilder {
    pub fn new() -> Self {
        Self {
            config: None,
            state: None,
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_state(mut self, state: AppState) -> Self {
        self.state = Some(state);
        self
    }

    /// Assemble the service
    ///
    /// Without a config, one is loaded from the usual sources, falling back to
    /// defaults. Without a state, an empty in-memory engine backs the routes.
    pub fn build(self) -> BpmnRestService {
        let config = self.config.unwrap_or_else(|| {
            Config::load().unwrap_or_else(|e| {
                eprintln!("Warning: Failed to load config: {}, using defaults", e);
                Config::default()
            })
        });

        let state = self
            .state
            .unwrap_or_else(|| AppState::new(config.clone(), Default::default()));

        let app = health_routes().merge(crate::api::routes()).with_state(state);

        BpmnRestService { config, app }
    }
}

impl Default for ServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Assembled service, ready to serve
pub struct BpmnRestService {
    config: Config,
    app: Router,
}

impl BpmnRestService {
    /// The routes without the server middleware stack
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub async fn serve(self) -> crate::error::Result<()> {
        Server::new(self.config).serve(self.app).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_and_api_routes_are_mounted() {
        let service = ServiceBuilder::new().with_config(Config::default()).build();

        let response = service
            .router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = service
            .router()
            .oneshot(
                Request::builder()
                    .uri("/history/historic-process-instances")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let service = ServiceBuilder::new().with_config(Config::default()).build();
        let response = service
            .router()
            .oneshot(Request::builder().uri("/runtime/unknown").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_config_is_kept() {
        let mut config = Config::default();
        config.service.port = 9999;
        let service = ServiceBuilder::new().with_config(config).build();
        assert_eq!(service.config().service.port, 9999);
    }
}
