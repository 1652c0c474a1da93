//! In-memory engine implementing every port
//!
//! Holds plain collections behind a [`tokio::sync::RwLock`]. It answers
//! queries and lookups over whatever it was seeded with and has no execution
//! semantics of its own. Seed it from a JSON [`EngineSnapshot`] or through the
//! `insert_*` helpers.
//!
//! # Example
//!
//! ```rust
//! use bpmn_rest::engine::{IdentityLink, InMemoryEngine, Task, TaskPort};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let engine = InMemoryEngine::new();
//! engine
//!     .insert_task(Task {
//!         id: "t1".into(),
//!         name: Some("Approve invoice".into()),
//!         process_instance_id: None,
//!         assignee: None,
//!         tenant_id: None,
//!     })
//!     .await;
//! engine.insert_identity_link(IdentityLink::user("t1", "kermit", "candidate")).await;
//!
//! let links = engine.identity_links_for_task("t1").await.unwrap();
//! assert_eq!(links.len(), 1);
//! # }
//! ```

use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::error::{EngineError, RenderError};
use super::model::{
    BpmnModel, DiagramRequest, HistoricProcessInstance, IdentityLink, ProcessDefinition,
    ProcessInstance, Task, Variable, VariableScope,
};
use super::ports::{
    DiagramRenderer, EngineResult, HistoryPort, RepositoryPort, RuntimePort, TaskPort,
};
use crate::error::{Error, Result};
use crate::query::{HistoricProcessInstanceFilter, Page, PageRequest, SortOrder};

/// Serializable contents of an [`InMemoryEngine`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineSnapshot {
    #[serde(default)]
    pub historic_process_instances: Vec<HistoricProcessInstance>,
    #[serde(default)]
    pub process_instances: Vec<ProcessInstance>,
    #[serde(default)]
    pub process_definitions: Vec<ProcessDefinition>,
    #[serde(default)]
    pub bpmn_models: Vec<BpmnModel>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub identity_links: Vec<IdentityLink>,
    /// Pre-rendered diagram bytes keyed by process definition id
    #[serde(default)]
    pub diagrams: HashMap<String, Vec<u8>>,
}

#[derive(Debug, Default)]
pub struct InMemoryEngine {
    state: RwLock<EngineSnapshot>,
}

impl InMemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: EngineSnapshot) -> Self {
        Self {
            state: RwLock::new(snapshot),
        }
    }

    /// Read a JSON snapshot from `path`
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = tokio::fs::read_to_string(path).await?;
        let snapshot: EngineSnapshot =
            serde_json::from_str(&contents).map_err(|source| Error::Seed {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::info!(
            path = %path.display(),
            historic = snapshot.historic_process_instances.len(),
            running = snapshot.process_instances.len(),
            tasks = snapshot.tasks.len(),
            "Loaded in-memory engine seed"
        );

        Ok(Self::from_snapshot(snapshot))
    }

    /// Copy of the current contents
    pub async fn snapshot(&self) -> EngineSnapshot {
        self.state.read().await.clone()
    }

    pub async fn insert_historic_process_instance(&self, instance: HistoricProcessInstance) {
        self.state.write().await.historic_process_instances.push(instance);
    }

    pub async fn insert_process_instance(&self, instance: ProcessInstance) {
        self.state.write().await.process_instances.push(instance);
    }

    pub async fn insert_process_definition(&self, definition: ProcessDefinition) {
        self.state.write().await.process_definitions.push(definition);
    }

    pub async fn insert_bpmn_model(&self, model: BpmnModel) {
        self.state.write().await.bpmn_models.push(model);
    }

    pub async fn insert_task(&self, task: Task) {
        self.state.write().await.tasks.push(task);
    }

    pub async fn insert_identity_link(&self, link: IdentityLink) {
        self.state.write().await.identity_links.push(link);
    }

    /// Store the image returned for diagrams of `process_definition_id`
    pub async fn insert_diagram(&self, process_definition_id: impl Into<String>, bytes: Vec<u8>) {
        self.state
            .write()
            .await
            .diagrams
            .insert(process_definition_id.into(), bytes);
    }

    async fn delete_identity_link(
        &self,
        task_id: &str,
        link_type: &str,
        matches_identity: impl Fn(&IdentityLink) -> bool,
    ) -> EngineResult<()> {
        let mut state = self.state.write().await;
        let before = state.identity_links.len();
        state.identity_links.retain(|link| {
            !(link.task_id.as_deref() == Some(task_id)
                && link.link_type == link_type
                && matches_identity(link))
        });

        if state.identity_links.len() == before {
            return Err(EngineError::not_found("IdentityLink", task_id));
        }
        Ok(())
    }
}

/// Translate a SQL `LIKE` pattern into an anchored regex
fn like_pattern(pattern: &str) -> EngineResult<Regex> {
    let mut expr = String::with_capacity(pattern.len() + 2);
    expr.push('^');
    for ch in pattern.chars() {
        match ch {
            '%' => expr.push_str(".*"),
            '_' => expr.push('.'),
            other => expr.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
        }
    }
    expr.push('$');

    Regex::new(&expr).map_err(|e| {
        EngineError::illegal_argument(format!("Invalid tenantIdLike pattern '{}': {}", pattern, e))
    })
}

fn eq_opt(constraint: &Option<String>, value: Option<&str>) -> bool {
    match constraint {
        Some(expected) => value == Some(expected.as_str()),
        None => true,
    }
}

fn matches_filter(
    instance: &HistoricProcessInstance,
    filter: &HistoricProcessInstanceFilter,
    tenant_like: Option<&Regex>,
) -> bool {
    if !eq_opt(&filter.process_instance_id, Some(instance.id.as_str()))
        || !eq_opt(
            &filter.process_definition_id,
            Some(instance.process_definition_id.as_str()),
        )
        || !eq_opt(
            &filter.process_definition_key,
            instance.process_definition_key.as_deref(),
        )
        || !eq_opt(&filter.business_key, instance.business_key.as_deref())
        || !eq_opt(
            &filter.super_process_instance_id,
            instance.super_process_instance_id.as_deref(),
        )
        || !eq_opt(&filter.started_by, instance.start_user_id.as_deref())
        || !eq_opt(&filter.tenant_id, instance.tenant_id.as_deref())
    {
        return false;
    }

    if let Some(user) = &filter.involved_user {
        let started = instance.start_user_id.as_deref() == Some(user.as_str());
        if !started && !instance.involved_users.iter().any(|u| u == user) {
            return false;
        }
    }

    if let Some(finished) = filter.finished {
        if instance.is_finished() != finished {
            return false;
        }
    }

    if filter.exclude_subprocesses == Some(true) && instance.super_process_instance_id.is_some() {
        return false;
    }

    if let Some(after) = filter.finished_after {
        if !instance.end_time.is_some_and(|end| end >= after) {
            return false;
        }
    }
    if let Some(before) = filter.finished_before {
        if !instance.end_time.is_some_and(|end| end <= before) {
            return false;
        }
    }
    if let Some(after) = filter.started_after {
        if instance.start_time < after {
            return false;
        }
    }
    if let Some(before) = filter.started_before {
        if instance.start_time > before {
            return false;
        }
    }

    if let Some(pattern) = tenant_like {
        match instance.tenant_id.as_deref() {
            Some(tenant) if pattern.is_match(tenant) => {}
            _ => return false,
        }
    }

    if filter.without_tenant_id == Some(true)
        && instance.tenant_id.as_deref().is_some_and(|t| !t.is_empty())
    {
        return false;
    }

    true
}

fn execution<'a>(state: &'a EngineSnapshot, id: &str) -> Option<&'a ProcessInstance> {
    state.process_instances.iter().find(|p| p.id == id)
}

/// First variable named `name` on the parent chain of `execution`
///
/// The walk is bounded by the number of executions, so a cyclic seed cannot
/// loop forever.
fn inherited_variable<'a>(
    state: &'a EngineSnapshot,
    execution: &'a ProcessInstance,
    name: &str,
) -> Option<&'a Variable> {
    let mut parent_id = execution.parent_id.as_deref();
    for _ in 0..state.process_instances.len() {
        let parent = self::execution(state, parent_id?)?;
        if let Some(variable) = parent.local_variable(name) {
            return Some(variable);
        }
        parent_id = parent.parent_id.as_deref();
    }
    None
}

fn compare_by(property: &str, a: &HistoricProcessInstance, b: &HistoricProcessInstance) -> Ordering {
    let primary = match property {
        "processDefinitionId" => a.process_definition_id.cmp(&b.process_definition_id),
        "businessKey" => a.business_key.cmp(&b.business_key),
        "startTime" => a.start_time.cmp(&b.start_time),
        "endTime" => a.end_time.cmp(&b.end_time),
        "duration" => a.duration_in_millis().cmp(&b.duration_in_millis()),
        "tenantId" => a.tenant_id.cmp(&b.tenant_id),
        _ => Ordering::Equal,
    };
    primary.then_with(|| a.id.cmp(&b.id))
}

#[async_trait]
impl HistoryPort for InMemoryEngine {
    async fn query_historic_process_instances(
        &self,
        filter: &HistoricProcessInstanceFilter,
        page: &PageRequest,
    ) -> EngineResult<Page<HistoricProcessInstance>> {
        let tenant_like = filter
            .tenant_id_like
            .as_deref()
            .map(like_pattern)
            .transpose()?;

        let state = self.state.read().await;
        let mut matches: Vec<HistoricProcessInstance> = state
            .historic_process_instances
            .iter()
            .filter(|instance| matches_filter(instance, filter, tenant_like.as_ref()))
            .cloned()
            .collect();
        drop(state);

        matches.sort_by(|a, b| {
            let ordering = compare_by(&page.sort, a, b);
            match page.order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });

        let total = matches.len() as u64;
        let mut items = page.window(matches);
        if !filter.includes_variables() {
            for item in &mut items {
                item.variables.clear();
            }
        }

        Ok(Page::new(items, total))
    }
}

#[async_trait]
impl RuntimePort for InMemoryEngine {
    async fn process_instance(&self, id: &str) -> EngineResult<Option<ProcessInstance>> {
        let state = self.state.read().await;
        Ok(state
            .process_instances
            .iter()
            .find(|p| p.id == id && p.is_root())
            .cloned())
    }

    async fn active_activity_ids(&self, execution_id: &str) -> EngineResult<Vec<String>> {
        let state = self.state.read().await;
        state
            .process_instances
            .iter()
            .find(|p| p.id == execution_id)
            .map(|p| p.active_activity_ids.clone())
            .ok_or_else(|| EngineError::not_found("Execution", execution_id))
    }

    async fn variable(
        &self,
        execution_id: &str,
        name: &str,
        scope: Option<VariableScope>,
    ) -> EngineResult<Option<Variable>> {
        let state = self.state.read().await;
        let execution = execution(&state, execution_id)
            .ok_or_else(|| EngineError::not_found("Execution", execution_id))?;

        tracing::trace!(execution_id, name, scope = ?scope.map(|s| s.as_str()), "Variable lookup");
        let found = match scope {
            Some(VariableScope::Local) => execution.local_variable(name),
            Some(VariableScope::Global) => inherited_variable(&state, execution, name),
            None => execution
                .local_variable(name)
                .or_else(|| inherited_variable(&state, execution, name)),
        };
        Ok(found.cloned())
    }
}

#[async_trait]
impl RepositoryPort for InMemoryEngine {
    async fn process_definition(&self, id: &str) -> EngineResult<Option<ProcessDefinition>> {
        let state = self.state.read().await;
        Ok(state.process_definitions.iter().find(|d| d.id == id).cloned())
    }

    async fn bpmn_model(&self, process_definition_id: &str) -> EngineResult<Option<BpmnModel>> {
        let state = self.state.read().await;
        Ok(state
            .bpmn_models
            .iter()
            .find(|m| m.process_definition_id == process_definition_id)
            .cloned())
    }
}

#[async_trait]
impl TaskPort for InMemoryEngine {
    async fn task(&self, id: &str) -> EngineResult<Option<Task>> {
        let state = self.state.read().await;
        Ok(state.tasks.iter().find(|t| t.id == id).cloned())
    }

    async fn identity_links_for_task(&self, task_id: &str) -> EngineResult<Vec<IdentityLink>> {
        let state = self.state.read().await;
        Ok(state
            .identity_links
            .iter()
            .filter(|link| link.task_id.as_deref() == Some(task_id))
            .cloned()
            .collect())
    }

    async fn delete_user_identity_link(
        &self,
        task_id: &str,
        user_id: &str,
        link_type: &str,
    ) -> EngineResult<()> {
        self.delete_identity_link(task_id, link_type, |link| {
            link.user_id.as_deref() == Some(user_id)
        })
        .await
    }

    async fn delete_group_identity_link(
        &self,
        task_id: &str,
        group_id: &str,
        link_type: &str,
    ) -> EngineResult<()> {
        self.delete_identity_link(task_id, link_type, |link| {
            link.group_id.as_deref() == Some(group_id)
        })
        .await
    }
}

#[async_trait]
impl DiagramRenderer for InMemoryEngine {
    async fn generate_diagram(&self, request: DiagramRequest) -> std::result::Result<Vec<u8>, RenderError> {
        if !request.image_type.eq_ignore_ascii_case("png") {
            return Err(RenderError::new(format!(
                "unsupported image type '{}'",
                request.image_type
            )));
        }

        let definition_id = &request.model.process_definition_id;
        let state = self.state.read().await;
        state.diagrams.get(definition_id).cloned().ok_or_else(|| {
            RenderError::new(format!(
                "no diagram available for process definition '{}'",
                definition_id
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::VariableValue;
    use crate::query::{PageLimits, ParameterMapper, RawParams, HISTORIC_PROCESS_INSTANCE_SORT};
    use chrono::{TimeZone, Utc};

    fn historic(id: &str, day: u32, finished_day: Option<u32>) -> HistoricProcessInstance {
        HistoricProcessInstance {
            id: id.to_string(),
            business_key: None,
            process_definition_id: "invoice:1:4".to_string(),
            process_definition_key: Some("invoice".to_string()),
            start_time: Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0).unwrap(),
            end_time: finished_day.map(|d| Utc.with_ymd_and_hms(2024, 3, d, 9, 0, 0).unwrap()),
            start_user_id: None,
            start_activity_id: Some("start".to_string()),
            end_activity_id: None,
            delete_reason: None,
            super_process_instance_id: None,
            tenant_id: None,
            involved_users: Vec::new(),
            variables: vec![Variable::new("amount", VariableValue::Integer(10))],
        }
    }

    async fn seeded() -> InMemoryEngine {
        let engine = InMemoryEngine::new();

        let mut a = historic("a", 1, Some(3));
        a.tenant_id = Some("acme".to_string());
        a.start_user_id = Some("kermit".to_string());

        let mut b = historic("b", 2, None);
        b.tenant_id = Some("acme-eu".to_string());
        b.involved_users = vec!["fozzie".to_string()];

        let mut c = historic("c", 5, Some(6));
        c.super_process_instance_id = Some("a".to_string());
        c.business_key = Some("order-1".to_string());

        for instance in [c, a, b] {
            engine.insert_historic_process_instance(instance).await;
        }
        engine
    }

    async fn query(engine: &InMemoryEngine, pairs: &[(&str, &str)]) -> Page<HistoricProcessInstance> {
        let params: RawParams = pairs.iter().copied().collect();
        let filter: HistoricProcessInstanceFilter =
            ParameterMapper::default().populate(&params).unwrap();
        let page = PageRequest::from_params(
            &params,
            &HISTORIC_PROCESS_INSTANCE_SORT,
            &PageLimits::default(),
        )
        .unwrap();
        engine.query_historic_process_instances(&filter, &page).await.unwrap()
    }

    fn ids(page: &Page<HistoricProcessInstance>) -> Vec<&str> {
        page.items.iter().map(|i| i.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_unfiltered_query_sorted_by_id() {
        let engine = seeded().await;
        let page = query(&engine, &[]).await;
        assert_eq!(ids(&page), vec!["a", "b", "c"]);
        assert_eq!(page.total, 3);
    }

    #[tokio::test]
    async fn test_finished_filter() {
        let engine = seeded().await;
        assert_eq!(ids(&query(&engine, &[("finished", "true")]).await), vec!["a", "c"]);
        assert_eq!(ids(&query(&engine, &[("finished", "false")]).await), vec!["b"]);
    }

    #[tokio::test]
    async fn test_date_range_filters() {
        let engine = seeded().await;
        let page = query(&engine, &[("startedAfter", "2024-03-02"), ("startedBefore", "2024-03-04")]).await;
        assert_eq!(ids(&page), vec!["b"]);

        let page = query(&engine, &[("finishedAfter", "2024-03-04")]).await;
        assert_eq!(ids(&page), vec!["c"]);
    }

    #[tokio::test]
    async fn test_involved_user_matches_starter_or_participant() {
        let engine = seeded().await;
        assert_eq!(ids(&query(&engine, &[("involvedUser", "kermit")]).await), vec!["a"]);
        assert_eq!(ids(&query(&engine, &[("involvedUser", "fozzie")]).await), vec!["b"]);
    }

    #[tokio::test]
    async fn test_tenant_filters() {
        let engine = seeded().await;
        assert_eq!(ids(&query(&engine, &[("tenantIdLike", "acme%")]).await), vec!["a", "b"]);
        assert_eq!(ids(&query(&engine, &[("tenantIdLike", "acme")]).await), vec!["a"]);
        assert_eq!(ids(&query(&engine, &[("withoutTenantId", "true")]).await), vec!["c"]);
    }

    #[test]
    fn test_like_pattern_escapes_regex_metacharacters() {
        let pattern = like_pattern("a.c_").unwrap();
        assert!(pattern.is_match("a.cd"));
        assert!(!pattern.is_match("abcd"));
    }

    #[tokio::test]
    async fn test_exclude_subprocesses() {
        let engine = seeded().await;
        assert_eq!(
            ids(&query(&engine, &[("excludeSubprocesses", "true")]).await),
            vec!["a", "b"]
        );
        assert_eq!(
            ids(&query(&engine, &[("superProcessInstanceId", "a")]).await),
            vec!["c"]
        );
    }

    #[tokio::test]
    async fn test_sort_and_window() {
        let engine = seeded().await;
        let page = query(
            &engine,
            &[("sort", "startTime"), ("order", "desc"), ("start", "1"), ("size", "1")],
        )
        .await;
        assert_eq!(ids(&page), vec!["b"]);
        assert_eq!(page.total, 3);
    }

    #[tokio::test]
    async fn test_variables_only_when_requested() {
        let engine = seeded().await;
        let page = query(&engine, &[("processInstanceId", "a")]).await;
        assert!(page.items[0].variables.is_empty());

        let page = query(
            &engine,
            &[("processInstanceId", "a"), ("includeProcessVariables", "true")],
        )
        .await;
        assert_eq!(page.items[0].variables.len(), 1);
    }

    fn execution_record(
        id: &str,
        parent_id: Option<&str>,
        variables: Vec<Variable>,
    ) -> ProcessInstance {
        ProcessInstance {
            id: id.to_string(),
            parent_id: parent_id.map(str::to_string),
            process_definition_id: "invoice:1:4".to_string(),
            business_key: None,
            active_activity_ids: Vec::new(),
            suspended: false,
            tenant_id: None,
            variables,
        }
    }

    async fn nested_executions() -> InMemoryEngine {
        let engine = InMemoryEngine::new();
        engine
            .insert_process_instance(execution_record(
                "root",
                None,
                vec![
                    Variable::new("scan", VariableValue::Binary(vec![9])),
                    Variable::new("amount", VariableValue::Integer(100)),
                ],
            ))
            .await;
        engine
            .insert_process_instance(execution_record(
                "review",
                Some("root"),
                vec![Variable::new("amount", VariableValue::Integer(7))],
            ))
            .await;
        engine
            .insert_process_instance(execution_record("review-task", Some("review"), Vec::new()))
            .await;
        engine
    }

    async fn lookup(
        engine: &InMemoryEngine,
        execution_id: &str,
        name: &str,
        scope: Option<VariableScope>,
    ) -> Option<VariableValue> {
        engine
            .variable(execution_id, name, scope)
            .await
            .unwrap()
            .map(|v| v.value)
    }

    #[tokio::test]
    async fn test_local_scope_ignores_parents() {
        let engine = nested_executions().await;
        assert_eq!(
            lookup(&engine, "root", "scan", Some(VariableScope::Local)).await,
            Some(VariableValue::Binary(vec![9]))
        );
        assert_eq!(lookup(&engine, "review", "scan", Some(VariableScope::Local)).await, None);
        assert_eq!(
            lookup(&engine, "review", "amount", Some(VariableScope::Local)).await,
            Some(VariableValue::Integer(7))
        );
    }

    #[tokio::test]
    async fn test_global_scope_reads_parent_chain_only() {
        let engine = nested_executions().await;
        assert_eq!(lookup(&engine, "root", "scan", Some(VariableScope::Global)).await, None);
        assert_eq!(
            lookup(&engine, "review", "amount", Some(VariableScope::Global)).await,
            Some(VariableValue::Integer(100))
        );
        assert_eq!(
            lookup(&engine, "review-task", "scan", Some(VariableScope::Global)).await,
            Some(VariableValue::Binary(vec![9]))
        );
        assert_eq!(
            lookup(&engine, "review-task", "amount", Some(VariableScope::Global)).await,
            Some(VariableValue::Integer(7))
        );
    }

    #[tokio::test]
    async fn test_unscoped_lookup_falls_back_to_parents() {
        let engine = nested_executions().await;
        assert_eq!(
            lookup(&engine, "review", "amount", None).await,
            Some(VariableValue::Integer(7))
        );
        assert_eq!(
            lookup(&engine, "review", "scan", None).await,
            Some(VariableValue::Binary(vec![9]))
        );
        assert_eq!(lookup(&engine, "review", "missing", None).await, None);

        let err = engine.variable("gone", "scan", None).await.unwrap_err();
        assert_eq!(err.kind, crate::engine::EngineErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_cyclic_parents_terminate() {
        let engine = InMemoryEngine::new();
        engine.insert_process_instance(execution_record("a", Some("b"), Vec::new())).await;
        engine.insert_process_instance(execution_record("b", Some("a"), Vec::new())).await;
        assert_eq!(lookup(&engine, "a", "x", None).await, None);
    }

    #[tokio::test]
    async fn test_nested_executions_are_not_process_instances() {
        let engine = nested_executions().await;
        assert!(engine.process_instance("root").await.unwrap().is_some());
        assert!(engine.process_instance("review").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_identity_link_by_family() {
        let engine = InMemoryEngine::new();
        engine.insert_identity_link(IdentityLink::user("t1", "kermit", "candidate")).await;
        engine.insert_identity_link(IdentityLink::group("t1", "kermit", "candidate")).await;

        engine
            .delete_group_identity_link("t1", "kermit", "candidate")
            .await
            .unwrap();

        let remaining = engine.identity_links_for_task("t1").await.unwrap();
        assert_eq!(remaining, vec![IdentityLink::user("t1", "kermit", "candidate")]);

        let err = engine
            .delete_group_identity_link("t1", "kermit", "candidate")
            .await
            .unwrap_err();
        assert_eq!(err.kind, crate::engine::EngineErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_renderer_returns_stored_diagram() {
        let engine = InMemoryEngine::new();
        engine.insert_diagram("invoice:1:4", vec![0x89, b'P', b'N', b'G']).await;

        let request = DiagramRequest {
            model: BpmnModel {
                process_definition_id: "invoice:1:4".to_string(),
                xml: String::new(),
            },
            image_type: "png".to_string(),
            highlighted_activities: Vec::new(),
            highlighted_flows: Vec::new(),
            activity_font_name: "Arial".to_string(),
            label_font_name: "Arial".to_string(),
            annotation_font_name: "Arial".to_string(),
            scale_factor: 1.0,
        };

        let bytes = engine.generate_diagram(request.clone()).await.unwrap();
        assert_eq!(&bytes[1..], b"PNG");

        let mut missing = request;
        missing.model.process_definition_id = "other:1:1".to_string();
        assert!(engine.generate_diagram(missing).await.is_err());
    }

    #[tokio::test]
    async fn test_load_seed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.json");
        std::fs::write(
            &path,
            r#"{
                "tasks": [{"id": "t1", "name": "Review"}],
                "identityLinks": [{"taskId": "t1", "userId": "kermit", "type": "assignee"}]
            }"#,
        )
        .unwrap();

        let engine = InMemoryEngine::load(&path).await.unwrap();
        assert!(engine.task("t1").await.unwrap().is_some());
        assert_eq!(engine.identity_links_for_task("t1").await.unwrap().len(), 1);

        std::fs::write(&path, "{ not json").unwrap();
        let err = InMemoryEngine::load(&path).await.unwrap_err();
        assert!(matches!(err, Error::Seed { .. }));
    }
}
