use serde::{Deserialize, Serialize};

use super::{require_non_empty, Validate};
use crate::storage::{exact_matches, prefix_matches, Entity, EntityId};

/// Staff member that can be assigned to projects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Identifier
    pub employee_id: EntityId,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Contact email
    pub email: String,
    /// Whether the employee can take new assignments
    pub is_available: bool,
    /// Free-form role
    pub role: String,
}

/// Create/update body for [`Employee`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDraft {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Contact email
    #[serde(default)]
    pub email: String,
    /// Availability
    #[serde(default = "available")]
    pub is_available: bool,
    /// Free-form role
    #[serde(default)]
    pub role: String,
}

const fn available() -> bool {
    true
}

impl Validate for EmployeeDraft {
    fn validate(&self) -> Result<(), String> {
        require_non_empty("firstName", &self.first_name)?;
        require_non_empty("lastName", &self.last_name)
    }
}

/// List query for [`Employee`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmployeeFilter {
    /// Given name prefix
    pub first_name: Option<String>,
    /// Family name prefix
    pub last_name: Option<String>,
    /// Email prefix
    pub email: Option<String>,
    /// Exact availability
    pub is_available: Option<bool>,
    /// Role prefix
    pub role: Option<String>,
}

impl Entity for Employee {
    type Draft = EmployeeDraft;
    type Filter = EmployeeFilter;

    const NAME: &'static str = "Employee";

    fn id(&self) -> EntityId {
        self.employee_id
    }

    fn from_draft(id: EntityId, draft: EmployeeDraft) -> Self {
        Self {
            employee_id: id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            is_available: draft.is_available,
            role: draft.role,
        }
    }

    fn matches(&self, filter: &EmployeeFilter) -> bool {
        prefix_matches(&self.first_name, filter.first_name.as_ref())
            && prefix_matches(&self.last_name, filter.last_name.as_ref())
            && prefix_matches(&self.email, filter.email.as_ref())
            && exact_matches(&self.is_available, filter.is_available.as_ref())
            && prefix_matches(&self.role, filter.role.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_defaults() {
        let draft: EmployeeDraft = serde_json::from_value(
            serde_json::json!({"firstName": "Grace", "lastName": "Hopper"}),
        )
        .unwrap();
        assert!(draft.is_available);
        assert!(draft.validate().is_ok());

        let employee = Employee::from_draft(3, draft);
        let json = serde_json::to_value(&employee).unwrap();
        assert_eq!(json["employeeId"], 3);
        assert_eq!(json["isAvailable"], true);
        assert_eq!(json["firstName"], "Grace");
    }

    #[test]
    fn test_filter_from_query_string_shape() {
        let filter: EmployeeFilter = serde_json::from_value(
            serde_json::json!({"isAvailable": false, "lastName": "Ho"}),
        )
        .unwrap();
        let employee = Employee {
            employee_id: 1,
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            email: String::new(),
            is_available: false,
            role: "engineer".to_string(),
        };
        assert!(employee.matches(&filter));
        assert!(!Employee { is_available: true, ..employee }.matches(&filter));
    }
}
