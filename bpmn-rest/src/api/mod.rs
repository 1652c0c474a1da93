//! REST resources
//!
//! | Method | Path |
//! |---|---|
//! | GET | `/history/historic-process-instances` |
//! | GET | `/runtime/process-instances/{processInstanceId}/diagram` |
//! | GET | `/runtime/process-instances/{processInstanceId}/variables/{variableName}/data` |
//! | GET, DELETE | `/runtime/tasks/{taskId}/identitylinks/{family}/{identityId}/{type}` |

pub mod diagram;
pub mod extract;
pub mod history;
pub mod identity_links;
pub mod urls;
pub mod variables;

use axum::{routing::get, Router};

use crate::state::AppState;

pub use extract::{RestPath, RestQuery};
pub use history::{HistoricProcessInstanceResponse, RestVariable};
pub use identity_links::{IdentityFamily, IdentityLinkPath, RestIdentityLink};
pub use urls::UrlBuilder;

/// Routes for every resource, without health endpoints or middleware
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/history/historic-process-instances",
            get(history::list_historic_process_instances),
        )
        .route(
            "/runtime/process-instances/{process_instance_id}/diagram",
            get(diagram::get_process_instance_diagram),
        )
        .route(
            "/runtime/process-instances/{process_instance_id}/variables/{variable_name}/data",
            get(variables::get_variable_data),
        )
        .route(
            "/runtime/tasks/{task_id}/identitylinks/{family}/{identity_id}/{link_type}",
            get(identity_links::get_identity_link).delete(identity_links::delete_identity_link),
        )
}
