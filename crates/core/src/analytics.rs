//! Project analytics aggregation.
//!
//! Every function here is a pure computation over a snapshot of the project
//! registry. Nothing is cached: the API loads fresh [`ProjectFacts`] on each
//! request and recomputes. Functions that depend on the current time take
//! `now` explicitly so results are deterministic under test.

use std::collections::HashMap;

use chrono::Duration;
use indexmap::IndexMap;
use serde::Serialize;

use crate::status::ProjectStatus;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Trailing window (in days) considered by [`status_trends`].
pub const STATUS_TRENDS_WINDOW_DAYS: i64 = 30;

/// `chrono` format for timeline bucket labels, e.g. `"Mar 2026"`.
pub const MONTH_LABEL_FORMAT: &str = "%b %Y";

/// `chrono` format for status-trend bucket labels, e.g. `"Mar 7"`.
pub const DAY_LABEL_FORMAT: &str = "%b %-d";

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// The subset of a project row the aggregations need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFacts {
    pub client_id: DbId,
    pub status: ProjectStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Status counts
// ---------------------------------------------------------------------------

/// Per-status tallies. `total` always equals the sum of the four status fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub total: i64,
    pub planning: i64,
    pub in_progress: i64,
    pub blocked: i64,
    pub completed: i64,
}

impl StatusCounts {
    pub fn record(&mut self, status: ProjectStatus) {
        self.total += 1;
        match status {
            ProjectStatus::Planning => self.planning += 1,
            ProjectStatus::InProgress => self.in_progress += 1,
            ProjectStatus::Blocked => self.blocked += 1,
            ProjectStatus::Completed => self.completed += 1,
        }
    }

    pub fn tally<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = ProjectStatus>,
    {
        let mut counts = Self::default();
        for status in statuses {
            counts.record(status);
        }
        counts
    }
}

/// `part / total * 100`, rounded to one decimal place. Zero when `total` is zero.
pub fn percentage(part: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    let pct = part as f64 / total as f64 * 100.0;
    (pct * 10.0).round() / 10.0
}

// ---------------------------------------------------------------------------
// Overview
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    #[serde(flatten)]
    pub counts: StatusCounts,
    pub completion_rate: f64,
}

/// Counts per status plus the completion rate across all projects.
pub fn overview(projects: &[ProjectFacts]) -> Overview {
    let counts = StatusCounts::tally(projects.iter().map(|p| p.status));
    Overview {
        completion_rate: percentage(counts.completed, counts.total),
        counts,
    }
}

// ---------------------------------------------------------------------------
// Timeline
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineBucket {
    pub month: String,
    #[serde(flatten)]
    pub counts: StatusCounts,
}

/// Bucket projects by calendar month of creation (UTC).
///
/// Buckets appear in the order they are first met while scanning projects
/// by ascending `created_at`, which is chronological.
pub fn timeline(projects: &[ProjectFacts]) -> Vec<TimelineBucket> {
    let mut ordered: Vec<&ProjectFacts> = projects.iter().collect();
    ordered.sort_by_key(|p| p.created_at);

    let mut buckets: IndexMap<String, StatusCounts> = IndexMap::new();
    for project in ordered {
        let label = project.created_at.format(MONTH_LABEL_FORMAT).to_string();
        buckets.entry(label).or_default().record(project.status);
    }

    buckets
        .into_iter()
        .map(|(month, counts)| TimelineBucket { month, counts })
        .collect()
}

// ---------------------------------------------------------------------------
// Client distribution
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientDistribution {
    pub client_id: DbId,
    pub client_name: String,
    pub project_count: i64,
    pub completed: i64,
    pub in_progress: i64,
}

/// Group projects by owning client and join the client name.
///
/// Projects whose client id is absent from `client_names` are skipped.
/// Sorted by `project_count` descending, ties broken by client name.
pub fn client_distribution(
    projects: &[ProjectFacts],
    client_names: &HashMap<DbId, String>,
) -> Vec<ClientDistribution> {
    let mut by_client: HashMap<DbId, StatusCounts> = HashMap::new();
    for project in projects {
        by_client
            .entry(project.client_id)
            .or_default()
            .record(project.status);
    }

    let mut rows: Vec<ClientDistribution> = by_client
        .into_iter()
        .filter_map(|(client_id, counts)| {
            let name = client_names.get(&client_id)?;
            Some(ClientDistribution {
                client_id,
                client_name: name.clone(),
                project_count: counts.total,
                completed: counts.completed,
                in_progress: counts.in_progress,
            })
        })
        .collect();

    rows.sort_by(|a, b| {
        b.project_count
            .cmp(&a.project_count)
            .then_with(|| a.client_name.cmp(&b.client_name))
            .then_with(|| a.client_id.cmp(&b.client_id))
    });
    rows
}

// ---------------------------------------------------------------------------
// Status trends
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusTrendBucket {
    pub day: String,
    #[serde(flatten)]
    pub counts: StatusCounts,
}

/// Per-day status counts for projects updated within the trailing
/// [`STATUS_TRENDS_WINDOW_DAYS`] days, bucketed by UTC day of last update.
pub fn status_trends(projects: &[ProjectFacts], now: Timestamp) -> Vec<StatusTrendBucket> {
    let cutoff = now - Duration::days(STATUS_TRENDS_WINDOW_DAYS);

    let mut recent: Vec<&ProjectFacts> = projects
        .iter()
        .filter(|p| p.updated_at >= cutoff)
        .collect();
    recent.sort_by_key(|p| p.updated_at);

    let mut buckets: IndexMap<String, StatusCounts> = IndexMap::new();
    for project in recent {
        let label = project.updated_at.format(DAY_LABEL_FORMAT).to_string();
        buckets.entry(label).or_default().record(project.status);
    }

    buckets
        .into_iter()
        .map(|(day, counts)| StatusTrendBucket { day, counts })
        .collect()
}

// ---------------------------------------------------------------------------
// Performance
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceMetrics {
    pub total_projects: i64,
    pub completed_projects: i64,
    /// Projects currently `In Progress`.
    pub active_projects: i64,
    pub blocked_projects: i64,
    pub avg_completion_days: i64,
    pub success_rate: f64,
}

/// Whole days between creation and last update, floored.
///
/// For a completed project the last update is taken as the completion time.
pub fn completion_days(project: &ProjectFacts) -> i64 {
    (project.updated_at - project.created_at).num_days().max(0)
}

/// Delivery metrics across all projects.
pub fn performance(projects: &[ProjectFacts]) -> PerformanceMetrics {
    let counts = StatusCounts::tally(projects.iter().map(|p| p.status));

    let completed_days: i64 = projects
        .iter()
        .filter(|p| p.status == ProjectStatus::Completed)
        .map(completion_days)
        .sum();

    let avg_completion_days = if counts.completed > 0 {
        (completed_days as f64 / counts.completed as f64).round() as i64
    } else {
        0
    };

    PerformanceMetrics {
        total_projects: counts.total,
        completed_projects: counts.completed,
        active_projects: counts.in_progress,
        blocked_projects: counts.blocked,
        avg_completion_days,
        success_rate: percentage(counts.completed, counts.total),
    }
}
