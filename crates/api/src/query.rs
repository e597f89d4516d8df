//! Query parameter types for API handlers.

use clientdesk_core::error::CoreError;
use clientdesk_core::status::ProjectStatus;
use clientdesk_core::types::DbId;
use clientdesk_db::models::project::ProjectFilter;
use serde::Deserialize;

use crate::middleware::auth::Scope;

/// Query parameters for `GET /projects` (`?status=&client_id=&search=`).
///
/// `status` and `client_id` are kept as raw strings so an unparsable value is
/// reported as a validation error. Empty values mean "no filter".
#[derive(Debug, Default, Deserialize)]
pub struct ProjectListParams {
    pub status: Option<String>,
    #[serde(alias = "clientId")]
    pub client_id: Option<String>,
    pub search: Option<String>,
}

/// Trimmed value, or `None` when absent or blank.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

impl ProjectListParams {
    /// Resolve the parameters into a repository filter restricted to `scope`.
    ///
    /// Returns `Ok(None)` when the caller's scope excludes every project the
    /// filter could match, so the handler can answer with an empty list.
    pub fn into_filter(self, scope: Scope) -> Result<Option<ProjectFilter>, CoreError> {
        let status = non_empty(self.status.as_deref())
            .map(str::parse::<ProjectStatus>)
            .transpose()?;

        let requested_client = non_empty(self.client_id.as_deref())
            .map(|raw| {
                raw.parse::<DbId>().map_err(|_| {
                    CoreError::Validation(format!("client_id must be an integer, got '{raw}'"))
                })
            })
            .transpose()?;

        let client_id = match (scope, requested_client) {
            (Scope::All, requested) => requested,
            (Scope::Client(own), None) => Some(own),
            (Scope::Client(own), Some(requested)) if requested == own => Some(own),
            (Scope::Client(_), Some(_)) | (Scope::Nothing, _) => return Ok(None),
        };

        Ok(Some(ProjectFilter {
            status,
            client_id,
            search: self.search,
        }))
    }
}
