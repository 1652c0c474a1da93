//! Raw data of a process instance variable

use std::collections::HashMap;

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use super::diagram::resolve_process_instance;
use super::extract::{RestPath, RestQuery};
use crate::engine::{VariableScope, VariableValue};
use crate::error::{Error, Result};
use crate::state::AppState;

/// Parse the optional `scope` query parameter
pub fn parse_scope(raw: Option<&str>) -> Result<Option<VariableScope>> {
    match raw {
        None => Ok(None),
        Some("local") => Ok(Some(VariableScope::Local)),
        Some("global") => Ok(Some(VariableScope::Global)),
        Some(other) => Err(Error::invalid_argument(format!(
            "Invalid variable scope: '{}'",
            other
        ))),
    }
}

/// `GET /runtime/process-instances/{processInstanceId}/variables/{variableName}/data`
///
/// `scope=local` reads only the instance's own variables and `scope=global`
/// only those inherited from parent executions, so a process instance has no
/// global variables. Without a scope, local variables win over inherited ones.
///
/// Binary variables are returned as-is. Serializable variables are returned
/// as their JSON encoding. Any other type has no data stream.
pub async fn get_variable_data(
    State(state): State<AppState>,
    RestPath((process_instance_id, variable_name)): RestPath<(String, String)>,
    RestQuery(query): RestQuery<HashMap<String, String>>,
) -> Result<Response> {
    let scope = parse_scope(query.get("scope").map(String::as_str))?;
    let instance = resolve_process_instance(&state, &process_instance_id).await?;

    let variable = state
        .engine()
        .runtime
        .variable(&instance.id, &variable_name, scope)
        .await?
        .ok_or_else(|| {
            Error::not_found(
                "Variable",
                format!(
                    "Execution '{}' doesn't have a variable with name: '{}'.",
                    instance.id, variable_name
                ),
            )
        })?;

    match variable.value {
        VariableValue::Binary(bytes) => {
            Ok(([(header::CONTENT_TYPE, "application/octet-stream")], bytes).into_response())
        }
        VariableValue::Serializable(value) => {
            let bytes = serde_json::to_vec(&value)
                .map_err(|e| Error::Internal(format!("Failed to encode variable: {}", e)))?;
            Ok(([(header::CONTENT_TYPE, "application/json")], bytes).into_response())
        }
        other => {
            tracing::debug!(
                variable = %variable.name,
                variable_type = other.type_name(),
                "Variable has no data stream"
            );
            Err(Error::not_found(
                "Variable",
                "The variable does not have a binary data stream.",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scope() {
        assert_eq!(parse_scope(None).unwrap(), None);
        assert_eq!(parse_scope(Some("local")).unwrap(), Some(VariableScope::Local));
        assert_eq!(parse_scope(Some("global")).unwrap(), Some(VariableScope::Global));

        let err = parse_scope(Some("Local")).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(ref msg) if msg == "Invalid variable scope: 'Local'"));
    }
}
