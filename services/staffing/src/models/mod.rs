//! Resource types.
//!
//! Wire format is camelCase JSON. Each resource comes as a stored value,
//! a draft (create/update body) and a filter (list query).

mod assignment;
mod employee;
mod project;
mod user;

pub use assignment::{Assignment, AssignmentDraft, AssignmentFilter};
pub use employee::{Employee, EmployeeDraft, EmployeeFilter};
pub use project::{Project, ProjectDraft, ProjectFilter, DEFAULT_PROJECT_STATUS};
pub use user::{User, UserDraft, UserFilter};

/// Field-level checks on a request body.
pub trait Validate {
    /// Describes the first invalid field.
    ///
    /// # Errors
    ///
    /// Returns a client-facing message when the body is unusable.
    fn validate(&self) -> Result<(), String>;
}

pub(crate) fn require_non_empty(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{field} is required"))
    } else {
        Ok(())
    }
}
