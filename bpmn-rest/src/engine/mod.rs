//! Process engine integration
//!
//! The REST resources never talk to storage directly. They go through the
//! ports in [`ports`], bundled together as an [`Engine`]. [`InMemoryEngine`]
//! implements every port and backs the binary when no external engine is
//! wired in.

pub mod error;
pub mod memory;
pub mod model;
pub mod ports;

use std::sync::Arc;

pub use error::{EngineError, EngineErrorKind, RenderError};
pub use memory::{EngineSnapshot, InMemoryEngine};
pub use model::{
    BpmnModel, DiagramRequest, HistoricProcessInstance, IdentityLink, ProcessDefinition,
    ProcessInstance, Task, Variable, VariableScope, VariableValue,
};
pub use ports::{DiagramRenderer, EngineResult, HistoryPort, RepositoryPort, RuntimePort, TaskPort};

/// The set of engine services handlers can reach
#[derive(Clone)]
pub struct Engine {
    pub history: Arc<dyn HistoryPort>,
    pub runtime: Arc<dyn RuntimePort>,
    pub repository: Arc<dyn RepositoryPort>,
    pub tasks: Arc<dyn TaskPort>,
    pub diagrams: Arc<dyn DiagramRenderer>,
}

impl Engine {
    /// Route every port to the same in-memory engine
    pub fn in_memory(engine: Arc<InMemoryEngine>) -> Self {
        Self {
            history: engine.clone(),
            runtime: engine.clone(),
            repository: engine.clone(),
            tasks: engine.clone(),
            diagrams: engine,
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::in_memory(Arc::new(InMemoryEngine::new()))
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine").finish_non_exhaustive()
    }
}
