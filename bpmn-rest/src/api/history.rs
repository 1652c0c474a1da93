//! Historic process instance collection

use std::collections::HashMap;

use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::extract::RestQuery;
use super::urls::UrlBuilder;
use crate::engine::{HistoricProcessInstance, Variable, VariableValue};
use crate::error::Result;
use crate::query::{
    DataResponse, HistoricProcessInstanceFilter, PageRequest, RawParams,
    HISTORIC_PROCESS_INSTANCE_SORT,
};
use crate::state::AppState;

/// Variable as it appears inside a historic process instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestVariable {
    pub name: String,
    #[serde(rename = "type")]
    pub variable_type: String,
    pub value: serde_json::Value,
    pub scope: String,
}

impl RestVariable {
    pub fn from_variable(variable: Variable) -> Self {
        let variable_type = variable.value.type_name().to_string();
        let value = match variable.value {
            VariableValue::String(s) => serde_json::Value::String(s),
            VariableValue::Integer(i) => i.into(),
            VariableValue::Double(d) => d.into(),
            VariableValue::Boolean(b) => b.into(),
            VariableValue::Date(d) => serde_json::Value::String(d.to_rfc3339()),
            VariableValue::Serializable(v) => v,
            // Raw bytes are served by the variable data resource
            VariableValue::Binary(_) => serde_json::Value::Null,
        };

        Self {
            name: variable.name,
            variable_type,
            value,
            scope: "local".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricProcessInstanceResponse {
    pub id: String,
    pub url: String,
    pub business_key: Option<String>,
    pub process_definition_id: String,
    pub process_definition_url: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration_in_millis: Option<i64>,
    pub start_user_id: Option<String>,
    pub start_activity_id: Option<String>,
    pub end_activity_id: Option<String>,
    pub delete_reason: Option<String>,
    pub super_process_instance_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<Vec<RestVariable>>,
    pub tenant_id: Option<String>,
}

impl HistoricProcessInstanceResponse {
    pub fn new(
        instance: HistoricProcessInstance,
        urls: &UrlBuilder,
        include_variables: bool,
    ) -> Self {
        let duration_in_millis = instance.duration_in_millis();
        let variables = include_variables.then(|| {
            instance
                .variables
                .into_iter()
                .map(RestVariable::from_variable)
                .collect()
        });

        Self {
            url: urls.historic_process_instance(&instance.id),
            process_definition_url: urls.process_definition(&instance.process_definition_id),
            id: instance.id,
            business_key: instance.business_key,
            process_definition_id: instance.process_definition_id,
            start_time: instance.start_time,
            end_time: instance.end_time,
            duration_in_millis,
            start_user_id: instance.start_user_id,
            start_activity_id: instance.start_activity_id,
            end_activity_id: instance.end_activity_id,
            delete_reason: instance.delete_reason,
            super_process_instance_id: instance.super_process_instance_id,
            variables,
            tenant_id: instance.tenant_id,
        }
    }
}

/// `GET /history/historic-process-instances`
pub async fn list_historic_process_instances(
    State(state): State<AppState>,
    RestQuery(query): RestQuery<HashMap<String, String>>,
) -> Result<DataResponse<HistoricProcessInstanceResponse>> {
    let params = RawParams::from(query);

    let filter: HistoricProcessInstanceFilter = state.mapper().populate(&params)?;
    let page = PageRequest::from_params(
        &params,
        &HISTORIC_PROCESS_INSTANCE_SORT,
        &state.page_limits(),
    )?;

    tracing::debug!(?filter, start = page.start, size = page.size, sort = %page.sort, "Querying historic process instances");

    let results = state
        .engine()
        .history
        .query_historic_process_instances(&filter, &page)
        .await?;

    let include_variables = filter.includes_variables();
    let urls = state.urls();
    let results = results
        .map(|instance| HistoricProcessInstanceResponse::new(instance, urls, include_variables));

    Ok(DataResponse::new(results, &page))
}
