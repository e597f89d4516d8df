//! Project lifecycle status.
//!
//! Stored as TEXT; the wire/database values must match the
//! `ck_projects_status` check constraint. Any status may move to any other
//! through an update, there is no enforced workflow.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProjectStatus {
    #[default]
    Planning,
    #[serde(rename = "In Progress")]
    InProgress,
    Blocked,
    Completed,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 4] = [
        ProjectStatus::Planning,
        ProjectStatus::InProgress,
        ProjectStatus::Blocked,
        ProjectStatus::Completed,
    ];

    /// String representation for database storage and query parameters.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Planning => "Planning",
            ProjectStatus::InProgress => "In Progress",
            ProjectStatus::Blocked => "Blocked",
            ProjectStatus::Completed => "Completed",
        }
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProjectStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProjectStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Unknown project status '{s}'. Expected one of: Planning, In Progress, Blocked, Completed"
                ))
            })
    }
}

impl TryFrom<String> for ProjectStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn default_is_planning() {
        assert_eq!(ProjectStatus::default(), ProjectStatus::Planning);
    }

    #[test]
    fn parse_round_trips_every_variant() {
        for status in ProjectStatus::ALL {
            assert_eq!(status.as_str().parse::<ProjectStatus>().unwrap(), status);
        }
    }

    #[test]
    fn in_progress_uses_spaced_wire_form() {
        let json = serde_json::to_string(&ProjectStatus::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");

        let parsed: ProjectStatus = serde_json::from_str("\"In Progress\"").unwrap();
        assert_eq!(parsed, ProjectStatus::InProgress);
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert_matches!(
            "InProgress".parse::<ProjectStatus>(),
            Err(CoreError::Validation(_))
        );
        assert!(serde_json::from_str::<ProjectStatus>("\"Done\"").is_err());
    }
}
