use serde::{Deserialize, Serialize};

use super::{require_non_empty, Validate};
use crate::storage::{exact_matches, prefix_matches, Entity, EntityId};

/// Status given to projects created without one.
pub const DEFAULT_PROJECT_STATUS: &str = "pending";

/// Project owned by a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Identifier
    pub project_id: EntityId,
    /// Owning user
    pub user_id: EntityId,
    /// Short title
    pub title: String,
    /// Free text; drives the cost estimate
    pub description: String,
    /// Workflow status
    pub status: String,
}

/// Create/update body for [`Project`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDraft {
    /// Owning user; must exist
    pub user_id: EntityId,
    /// Short title
    pub title: String,
    /// Free text
    #[serde(default)]
    pub description: String,
    /// Workflow status
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    DEFAULT_PROJECT_STATUS.to_string()
}

impl Validate for ProjectDraft {
    fn validate(&self) -> Result<(), String> {
        require_non_empty("title", &self.title)
    }
}

/// List query for [`Project`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectFilter {
    /// Exact owner
    pub user_id: Option<EntityId>,
    /// Title prefix
    pub title: Option<String>,
    /// Description prefix
    pub description: Option<String>,
    /// Status prefix
    pub status: Option<String>,
}

impl Entity for Project {
    type Draft = ProjectDraft;
    type Filter = ProjectFilter;

    const NAME: &'static str = "Project";

    fn id(&self) -> EntityId {
        self.project_id
    }

    fn from_draft(id: EntityId, draft: ProjectDraft) -> Self {
        let status = if draft.status.trim().is_empty() {
            default_status()
        } else {
            draft.status
        };
        Self {
            project_id: id,
            user_id: draft.user_id,
            title: draft.title,
            description: draft.description,
            status,
        }
    }

    fn matches(&self, filter: &ProjectFilter) -> bool {
        exact_matches(&self.user_id, filter.user_id.as_ref())
            && prefix_matches(&self.title, filter.title.as_ref())
            && prefix_matches(&self.description, filter.description.as_ref())
            && prefix_matches(&self.status, filter.status.as_ref())
    }
}
