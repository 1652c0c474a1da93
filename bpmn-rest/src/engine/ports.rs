//! Capability traits the REST layer consumes
//!
//! Each trait covers one engine service. Handlers hold them as
//! `Arc<dyn Trait>` so a remote engine client or the bundled in-memory engine
//! can sit behind the same routes.

use async_trait::async_trait;

use super::error::{EngineError, RenderError};
use super::model::{
    BpmnModel, DiagramRequest, HistoricProcessInstance, IdentityLink, ProcessDefinition,
    ProcessInstance, Task, Variable, VariableScope,
};
use crate::query::{HistoricProcessInstanceFilter, Page, PageRequest};

/// Result type for port calls
pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// Queries over historic process instances
#[async_trait]
pub trait HistoryPort: Send + Sync {
    /// Run a filtered, sorted and paged query
    ///
    /// `total` in the returned page counts every match, not just the
    /// requested window.
    async fn query_historic_process_instances(
        &self,
        filter: &HistoricProcessInstanceFilter,
        page: &PageRequest,
    ) -> EngineResult<Page<HistoricProcessInstance>>;
}

/// Running process instances and their executions
#[async_trait]
pub trait RuntimePort: Send + Sync {
    async fn process_instance(&self, id: &str) -> EngineResult<Option<ProcessInstance>>;

    /// Activity ids the execution is currently waiting in
    async fn active_activity_ids(&self, execution_id: &str) -> EngineResult<Vec<String>>;

    /// Look up a variable on an execution
    ///
    /// `None` for `scope` searches local variables first, then global ones.
    async fn variable(
        &self,
        execution_id: &str,
        name: &str,
        scope: Option<VariableScope>,
    ) -> EngineResult<Option<Variable>>;
}

/// Deployed process definitions and their models
#[async_trait]
pub trait RepositoryPort: Send + Sync {
    async fn process_definition(&self, id: &str) -> EngineResult<Option<ProcessDefinition>>;

    async fn bpmn_model(&self, process_definition_id: &str) -> EngineResult<Option<BpmnModel>>;

    /// Cheap reachability probe used by the readiness check
    async fn ping(&self) -> EngineResult<()> {
        Ok(())
    }
}

/// Tasks and their identity links
#[async_trait]
pub trait TaskPort: Send + Sync {
    async fn task(&self, id: &str) -> EngineResult<Option<Task>>;

    async fn identity_links_for_task(&self, task_id: &str) -> EngineResult<Vec<IdentityLink>>;

    async fn delete_user_identity_link(
        &self,
        task_id: &str,
        user_id: &str,
        link_type: &str,
    ) -> EngineResult<()>;

    async fn delete_group_identity_link(
        &self,
        task_id: &str,
        group_id: &str,
        link_type: &str,
    ) -> EngineResult<()>;
}

/// Produces process diagram images
#[async_trait]
pub trait DiagramRenderer: Send + Sync {
    /// Render the diagram to image bytes in `request.image_type`
    async fn generate_diagram(&self, request: DiagramRequest) -> Result<Vec<u8>, RenderError>;
}
