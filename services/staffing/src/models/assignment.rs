use serde::{Deserialize, Serialize};

use super::Validate;
use crate::storage::{Entity, EntityId};

/// An employee staffed on a project at a cost.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    /// Identifier
    pub assignment_id: EntityId,
    /// Project; must exist
    pub project_id: EntityId,
    /// Employee; must exist
    pub employee_id: EntityId,
    /// Agreed cost
    pub cost: f64,
}

/// Create/update body for [`Assignment`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentDraft {
    /// Project; must exist
    pub project_id: EntityId,
    /// Employee; must exist
    pub employee_id: EntityId,
    /// Agreed cost
    pub cost: f64,
}

impl Validate for AssignmentDraft {
    fn validate(&self) -> Result<(), String> {
        if !self.cost.is_finite() || self.cost < 0.0 {
            return Err("cost must be a non-negative number".to_string());
        }
        Ok(())
    }
}

/// List query for [`Assignment`]: an inclusive cost range, or an exact cost.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssignmentFilter {
    /// Lower bound, inclusive
    pub min_cost: Option<f64>,
    /// Upper bound, inclusive
    pub max_cost: Option<f64>,
    /// Exact cost; ignored when a bound is given
    pub cost: Option<f64>,
}

impl Entity for Assignment {
    type Draft = AssignmentDraft;
    type Filter = AssignmentFilter;

    const NAME: &'static str = "Assignment";

    fn id(&self) -> EntityId {
        self.assignment_id
    }

    fn from_draft(id: EntityId, draft: AssignmentDraft) -> Self {
        Self {
            assignment_id: id,
            project_id: draft.project_id,
            employee_id: draft.employee_id,
            cost: draft.cost,
        }
    }

    #[allow(clippy::float_cmp)]
    fn matches(&self, filter: &AssignmentFilter) -> bool {
        if filter.min_cost.is_some() || filter.max_cost.is_some() {
            return filter.min_cost.map_or(true, |min| self.cost >= min)
                && filter.max_cost.map_or(true, |max| self.cost <= max);
        }
        filter.cost.map_or(true, |cost| self.cost == cost)
    }
}
