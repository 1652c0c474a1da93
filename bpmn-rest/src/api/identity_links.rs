//! Single identity link on a task
//!
//! Both verbs share one lookup: the path is validated before the engine is
//! touched, the task must exist, and the link is found by scanning the task's
//! links for a matching identity and type within the requested family.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::extract::RestPath;
use super::urls::UrlBuilder;
use crate::engine::{IdentityLink, Task};
use crate::error::{Error, Result};
use crate::state::AppState;

/// Which identity field of a link the path refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityFamily {
    Users,
    Groups,
}

impl IdentityFamily {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw {
            "users" => Ok(Self::Users),
            "groups" => Ok(Self::Groups),
            _ => Err(Error::invalid_argument(
                "Identity link family should be 'users' or 'groups'.",
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Groups => "groups",
        }
    }

    fn identity_of(self, link: &IdentityLink) -> Option<&str> {
        match self {
            Self::Users => link.user_id.as_deref(),
            Self::Groups => link.group_id.as_deref(),
        }
    }
}

impl fmt::Display for IdentityFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated path of an identity link resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityLinkPath {
    pub task_id: String,
    pub family: IdentityFamily,
    pub identity_id: String,
    pub link_type: String,
}

impl IdentityLinkPath {
    /// Check the path segments without consulting the engine
    pub fn parse(task_id: String, family: &str, identity_id: String, link_type: String) -> Result<Self> {
        let family = IdentityFamily::parse(family)?;
        if identity_id.is_empty() {
            return Err(Error::invalid_argument("IdentityId is required."));
        }
        if link_type.is_empty() {
            return Err(Error::invalid_argument("Type is required."));
        }

        Ok(Self {
            task_id,
            family,
            identity_id,
            link_type,
        })
    }

    fn matches(&self, link: &IdentityLink) -> bool {
        self.family.identity_of(link) == Some(self.identity_id.as_str())
            && link.link_type == self.link_type
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestIdentityLink {
    pub url: String,
    pub user: Option<String>,
    pub group: Option<String>,
    #[serde(rename = "type")]
    pub link_type: String,
}

impl RestIdentityLink {
    pub fn new(link: IdentityLink, task_id: &str, urls: &UrlBuilder) -> Self {
        let (family, identity) = match (&link.user_id, &link.group_id) {
            (Some(user), _) => (IdentityFamily::Users, user.as_str()),
            (None, Some(group)) => (IdentityFamily::Groups, group.as_str()),
            (None, None) => (IdentityFamily::Users, ""),
        };
        let url = urls.task_identity_link(task_id, family.as_str(), identity, &link.link_type);

        Self {
            url,
            user: link.user_id,
            group: link.group_id,
            link_type: link.link_type,
        }
    }
}

async fn resolve_task(state: &AppState, task_id: &str) -> Result<Task> {
    state.engine().tasks.task(task_id).await?.ok_or_else(|| {
        Error::not_found(
            "Task",
            format!("Could not find a task with id '{}'.", task_id),
        )
    })
}

async fn find_identity_link(state: &AppState, path: &IdentityLinkPath) -> Result<IdentityLink> {
    let task = resolve_task(state, &path.task_id).await?;

    state
        .engine()
        .tasks
        .identity_links_for_task(&task.id)
        .await?
        .into_iter()
        .find(|link| path.matches(link))
        .ok_or_else(|| {
            Error::not_found("IdentityLink", "Could not find the requested identity link.")
        })
}

/// `GET /runtime/tasks/{taskId}/identitylinks/{family}/{identityId}/{type}`
pub async fn get_identity_link(
    State(state): State<AppState>,
    RestPath((task_id, family, identity_id, link_type)): RestPath<(String, String, String, String)>,
) -> Result<Json<RestIdentityLink>> {
    let path = IdentityLinkPath::parse(task_id, &family, identity_id, link_type)?;
    let link = find_identity_link(&state, &path).await?;

    Ok(Json(RestIdentityLink::new(link, &path.task_id, state.urls())))
}

/// `DELETE /runtime/tasks/{taskId}/identitylinks/{family}/{identityId}/{type}`
pub async fn delete_identity_link(
    State(state): State<AppState>,
    RestPath((task_id, family, identity_id, link_type)): RestPath<(String, String, String, String)>,
) -> Result<StatusCode> {
    let path = IdentityLinkPath::parse(task_id, &family, identity_id, link_type)?;
    find_identity_link(&state, &path).await?;

    let tasks = &state.engine().tasks;
    match path.family {
        IdentityFamily::Users => {
            tasks
                .delete_user_identity_link(&path.task_id, &path.identity_id, &path.link_type)
                .await?
        }
        IdentityFamily::Groups => {
            tasks
                .delete_group_identity_link(&path.task_id, &path.identity_id, &path.link_type)
                .await?
        }
    }

    tracing::info!(
        task_id = %path.task_id,
        family = %path.family,
        identity_id = %path.identity_id,
        link_type = %path.link_type,
        "Deleted identity link"
    );

    Ok(StatusCode::NO_CONTENT)
}
