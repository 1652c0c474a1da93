//! Process instance diagram image

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
};

use super::extract::RestPath;
use crate::engine::{DiagramRequest, ProcessInstance};
use crate::error::{Error, Result};
use crate::state::AppState;

const IMAGE_TYPE: &str = "png";

pub(crate) async fn resolve_process_instance(state: &AppState, id: &str) -> Result<ProcessInstance> {
    state.engine().runtime.process_instance(id).await?.ok_or_else(|| {
        Error::not_found(
            "ProcessInstance",
            format!("Could not find a process instance with id '{}'.", id),
        )
    })
}

/// `GET /runtime/process-instances/{processInstanceId}/diagram`
///
/// Renders the instance's process model as PNG with the currently active
/// activities highlighted.
pub async fn get_process_instance_diagram(
    State(state): State<AppState>,
    RestPath(process_instance_id): RestPath<String>,
) -> Result<impl IntoResponse> {
    let instance = resolve_process_instance(&state, &process_instance_id).await?;
    let engine = state.engine();

    let no_diagram = || {
        Error::invalid_argument(format!(
            "Process instance with id '{}' has no graphical notation defined.",
            instance.id
        ))
    };

    let definition = engine
        .repository
        .process_definition(&instance.process_definition_id)
        .await?
        .filter(|definition| definition.has_graphical_notation)
        .ok_or_else(no_diagram)?;

    let model = engine
        .repository
        .bpmn_model(&definition.id)
        .await?
        .ok_or_else(no_diagram)?;

    let highlighted_activities = engine.runtime.active_activity_ids(&instance.id).await?;

    let fonts = &state.config().diagram;
    let request = DiagramRequest {
        model,
        image_type: IMAGE_TYPE.to_string(),
        highlighted_activities,
        highlighted_flows: Vec::new(),
        activity_font_name: fonts.activity_font_name.clone(),
        label_font_name: fonts.label_font_name.clone(),
        annotation_font_name: fonts.annotation_font_name.clone(),
        scale_factor: 1.0,
    };

    let image = engine.diagrams.generate_diagram(request).await?;

    tracing::debug!(
        process_instance_id = %instance.id,
        bytes = image.len(),
        "Rendered process diagram"
    );

    Ok(([(header::CONTENT_TYPE, "image/png")], image))
}
