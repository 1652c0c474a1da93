//! Domain records owned by the process engine
//!
//! The REST layer only reads these. They derive `Deserialize` so the
//! in-memory engine can be seeded from a JSON fixture.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A completed-or-in-flight process instance retained for audit/query purposes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricProcessInstance {
    pub id: String,
    #[serde(default)]
    pub business_key: Option<String>,
    pub process_definition_id: String,
    #[serde(default)]
    pub process_definition_key: Option<String>,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub start_user_id: Option<String>,
    #[serde(default)]
    pub start_activity_id: Option<String>,
    #[serde(default)]
    pub end_activity_id: Option<String>,
    #[serde(default)]
    pub delete_reason: Option<String>,
    #[serde(default)]
    pub super_process_instance_id: Option<String>,
    #[serde(default)]
    pub tenant_id: Option<String>,
    /// Users with an identity link on the instance or one of its tasks
    #[serde(default)]
    pub involved_users: Vec<String>,
    #[serde(default)]
    pub variables: Vec<Variable>,
}

impl HistoricProcessInstance {
    pub fn is_finished(&self) -> bool {
        self.end_time.is_some()
    }

    /// Elapsed milliseconds between start and end, once finished
    pub fn duration_in_millis(&self) -> Option<i64> {
        self.end_time
            .map(|end| (end - self.start_time).num_milliseconds())
    }
}

/// A running execution of a process definition
///
/// Process instances are root executions. Executions nested inside one (for
/// example a sub-process scope) point at their parent through `parent_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessInstance {
    pub id: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    pub process_definition_id: String,
    #[serde(default)]
    pub business_key: Option<String>,
    /// Activities the instance is currently waiting in
    #[serde(default)]
    pub active_activity_ids: Vec<String>,
    #[serde(default)]
    pub suspended: bool,
    #[serde(default)]
    pub tenant_id: Option<String>,
    /// Variables set directly on this execution
    #[serde(default)]
    pub variables: Vec<Variable>,
}

impl ProcessInstance {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn local_variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessDefinition {
    pub id: String,
    pub key: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "default_version")]
    pub version: u32,
    /// Whether the deployed model carries BPMN diagram interchange data
    #[serde(default)]
    pub has_graphical_notation: bool,
    #[serde(default)]
    pub tenant_id: Option<String>,
}

fn default_version() -> u32 {
    1
}

/// Parsed process model handed to the diagram renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BpmnModel {
    pub process_definition_id: String,
    /// Source BPMN 2.0 XML
    pub xml: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub process_instance_id: Option<String>,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub tenant_id: Option<String>,
}

/// Association between a task and a user or group with a role-type label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityLink {
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub group_id: Option<String>,
    /// Role label, e.g. "assignee" or "candidate"
    #[serde(rename = "type")]
    pub link_type: String,
    #[serde(default)]
    pub process_instance_id: Option<String>,
}

impl IdentityLink {
    pub fn user(task_id: impl Into<String>, user_id: impl Into<String>, link_type: impl Into<String>) -> Self {
        Self {
            task_id: Some(task_id.into()),
            user_id: Some(user_id.into()),
            group_id: None,
            link_type: link_type.into(),
            process_instance_id: None,
        }
    }

    pub fn group(task_id: impl Into<String>, group_id: impl Into<String>, link_type: impl Into<String>) -> Self {
        Self {
            task_id: Some(task_id.into()),
            user_id: None,
            group_id: Some(group_id.into()),
            link_type: link_type.into(),
            process_instance_id: None,
        }
    }
}

/// A named process variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub value: VariableValue,
}

impl Variable {
    pub fn new(name: impl Into<String>, value: VariableValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Typed variable value as stored by the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum VariableValue {
    String(String),
    Integer(i64),
    Double(f64),
    Boolean(bool),
    Date(DateTime<Utc>),
    /// Structured value serialized by the engine
    Serializable(serde_json::Value),
    Binary(Vec<u8>),
}

impl VariableValue {
    /// Type name used in REST representations
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Integer(_) => "integer",
            Self::Double(_) => "double",
            Self::Boolean(_) => "boolean",
            Self::Date(_) => "date",
            Self::Serializable(_) => "serializable",
            Self::Binary(_) => "binary",
        }
    }
}

/// Scope a variable lookup is restricted to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableScope {
    /// Variables set directly on the execution
    Local,
    /// Variables visible through the execution's parent chain
    Global,
}

impl VariableScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Global => "global",
        }
    }
}

/// Everything the renderer needs to draw one process diagram
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramRequest {
    pub model: BpmnModel,
    /// Raster format, e.g. "png"
    pub image_type: String,
    pub highlighted_activities: Vec<String>,
    pub highlighted_flows: Vec<String>,
    pub activity_font_name: String,
    pub label_font_name: String,
    pub annotation_font_name: String,
    pub scale_factor: f64,
}
