//! Project cost estimate.
//!
//! A keyword heuristic over the project description: every known feature
//! keyword contained in the lower-cased text adds its hours. Matching is by
//! substring, so "apis" and "rapid" both count as "api".

use serde::Serialize;

use crate::storage::EntityId;

/// Hours per feature keyword.
pub const KEYWORD_HOURS: &[(&str, u32)] = &[
    ("authentication", 40),
    ("database", 60),
    ("api", 100),
    ("frontend", 120),
    ("backend", 100),
    ("payment integration", 80),
    ("third-party services", 60),
    ("real-time", 100),
    ("admin panel", 80),
    ("analytics", 50),
    ("testing", 60),
    ("deployment", 40),
    ("user management", 70),
    ("notifications", 50),
    ("file upload", 30),
];

/// Hours assumed when no keyword matches.
pub const DEFAULT_HOURS: u32 = 100;

/// Working hours in a day.
pub const HOURS_PER_DAY: f64 = 6.0;

/// Working days in a month.
pub const DAYS_PER_MONTH: f64 = 20.0;

/// Effort estimate for a project.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Estimate {
    /// Project the estimate is for
    pub project_id: EntityId,
    /// Total hours
    pub hours: u32,
    /// Hours expressed in man-months
    pub man_months: f64,
}

/// Total hours for a description.
#[must_use]
pub fn estimate_hours(description: &str) -> u32 {
    let text = description.to_lowercase();
    let hours: u32 = KEYWORD_HOURS
        .iter()
        .filter(|(keyword, _)| text.contains(keyword))
        .map(|(_, hours)| hours)
        .sum();

    if hours == 0 {
        DEFAULT_HOURS
    } else {
        hours
    }
}

/// Convert hours to man-months.
#[must_use]
pub fn man_months(hours: u32) -> f64 {
    f64::from(hours) / HOURS_PER_DAY / DAYS_PER_MONTH
}

/// Estimate for `project_id` from its description.
#[must_use]
pub fn estimate(project_id: EntityId, description: &str) -> Estimate {
    let hours = estimate_hours(description);
    Estimate {
        project_id,
        hours,
        man_months: man_months(hours),
    }
}
