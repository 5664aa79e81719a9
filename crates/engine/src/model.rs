use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Scheduling priority of a project.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// Lifecycle status of a project.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    Planning,
    Active,
    OnHold,
    Completed,
    Cancelled,
    Overdue,
    AtRisk,
}

/// Category of a calendar holiday.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HolidayKind {
    National,
    Religious,
    Custom,
}

/// Category of a leave request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LeaveKind {
    Vacation,
    Sick,
    Personal,
    Holiday,
    Other,
}

/// Approval state of a leave request. Only `Approved` leave consumes
/// work-day availability.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

// ---------------------------------------------------------------------------
// Core entities
// ---------------------------------------------------------------------------

/// A schedulable person or team member.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: String,
    pub name: String,
    /// Role label shown next to the name (e.g. "Designer").
    pub role: String,
    /// Display color as a CSS color string.
    pub color: String,
}

/// Estimated vs. actual spend for a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub estimated: f64,
    pub actual: f64,
}

/// A dated checkpoint within a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    pub completed: bool,
}

/// A titled unit of work assigned to exactly one resource over an inclusive
/// date span. `start_date <= end_date` is expected but not enforced here; a
/// project with an inverted span simply contributes nothing anywhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    /// References a `Resource` by its ID. Deleting the resource deletes the
    /// project (see `CalendarState::without_resource`).
    pub resource_id: String,
    pub start_date: NaiveDate,
    /// Inclusive — a one-day project has `end_date == start_date`.
    pub end_date: NaiveDate,
    pub priority: Priority,
    pub status: ProjectStatus,
    /// Completion percentage in [0, 100].
    pub progress: u32,
    pub deadline: Option<NaiveDate>,
    pub work_days_needed: Option<u32>,
    pub estimated_hours: Option<f64>,
    pub actual_hours: Option<f64>,
    /// Health score in [0, 100]; advisory analytics input.
    pub health_score: Option<f64>,
    pub completed_date: Option<NaiveDate>,
    pub budget: Option<Budget>,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
}

/// A global (not resource-scoped) non-working day.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holiday {
    pub id: String,
    pub name: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: HolidayKind,
    /// When true the holiday matches by month and day, ignoring the year
    /// stored in `date`.
    pub recurring: bool,
    pub description: Option<String>,
}

/// Advisory working-hours window ("09:00".."17:00"); not used by any
/// day-counting calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingHours {
    pub start: String,
    pub end: String,
}

/// Application-wide calendar configuration. Exactly one of these exists per
/// calendar instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidaySettings {
    /// Weekday indices that count as weekend, 0 = Sunday .. 6 = Saturday.
    /// Any subset is allowed, not necessarily two days.
    pub weekend_days: Vec<u32>,
    #[serde(default)]
    pub holidays: Vec<Holiday>,
    pub working_hours: WorkingHours,
}

/// A leave request for a resource over an inclusive date span.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leave {
    pub id: String,
    /// References a `Resource` by its ID.
    pub resource_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: LeaveKind,
    pub status: LeaveStatus,
    pub reason: Option<String>,
}

// ---------------------------------------------------------------------------
// Date axis
// ---------------------------------------------------------------------------

/// Inclusive bounds of the date axis the caller is rendering. All grouping
/// indices are positions into the contiguous day sequence this defines.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

// ---------------------------------------------------------------------------
// State snapshot
// ---------------------------------------------------------------------------

/// An immutable snapshot of every collection the engine reads. Update
/// helpers return a new snapshot; the caller owns swapping the active one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarState {
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub leaves: Vec<Leave>,
    pub holiday_settings: HolidaySettings,
}

impl CalendarState {
    /// Remove a resource, cascading to every project and leave it owns.
    /// An unknown ID returns an unchanged clone.
    pub fn without_resource(&self, resource_id: &str) -> CalendarState {
        CalendarState {
            resources: self
                .resources
                .iter()
                .filter(|r| r.id != resource_id)
                .cloned()
                .collect(),
            projects: self
                .projects
                .iter()
                .filter(|p| p.resource_id != resource_id)
                .cloned()
                .collect(),
            leaves: self
                .leaves
                .iter()
                .filter(|l| l.resource_id != resource_id)
                .cloned()
                .collect(),
            holiday_settings: self.holiday_settings.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Grouping output types
// ---------------------------------------------------------------------------

/// A maximal contiguous run of axis positions during which one project is
/// active. Indices are inclusive positions into the date axis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectGroup {
    pub project: Project,
    pub start_index: u32,
    pub end_index: u32,
    /// `end_index - start_index + 1`.
    pub span: u32,
}

/// A contiguous run plus stacking information for overlap-aware rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayeredGroup {
    pub project: Project,
    pub start_index: u32,
    pub end_index: u32,
    pub span: u32,
    /// Stacking index, 0 = base layer. Groups sharing a layer never overlap.
    pub layer: u32,
    /// True when the next project (by start date) begins strictly after this
    /// project ends — a visual separator between sequential projects.
    pub has_divider_after: bool,
}

/// One resource row of the rendered timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceLayout {
    pub resource_id: String,
    pub groups: Vec<LayeredGroup>,
}

// ---------------------------------------------------------------------------
// Statistics output types
// ---------------------------------------------------------------------------

/// Work-day accounting over a date range. By construction
/// `available_days + assigned_project_days + leave_days == total_work_days`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkDayStats {
    /// Days in range that are neither weekend nor holiday.
    pub total_work_days: u32,
    /// Work days covered by at least one project. Each day counts once even
    /// when several projects overlap it.
    pub assigned_project_days: u32,
    /// Work days covered by approved leave. Leave takes precedence over
    /// project coverage on the same day.
    pub leave_days: u32,
    pub available_days: u32,
    /// `(assigned + leave) / total * 100`; 0 when there are no work days.
    pub utilization: f64,
}

/// Per-resource work-day stats.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceStats {
    pub resource_id: String,
    pub days: WorkDayStats,
}

/// Cross-resource statistics. `combined` is the elementwise sum of the
/// per-resource numbers with utilization recomputed from the summed totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStats {
    pub resources: Vec<ResourceStats>,
    pub combined: WorkDayStats,
}

/// Project count per lifecycle status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusDistribution {
    pub planning: u32,
    pub active: u32,
    pub on_hold: u32,
    pub completed: u32,
    pub cancelled: u32,
    pub overdue: u32,
    pub at_risk: u32,
}

/// Portfolio-level analytics over the whole project collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioStats {
    pub total_projects: u32,
    pub active_projects: u32,
    pub completed_projects: u32,
    pub overdue_projects: u32,
    pub at_risk_projects: u32,
    /// Mean of `progress` across all projects; 0 when there are none.
    pub average_progress: f64,
    /// Share of completed projects whose `completed_date` was on or before
    /// their `end_date`, as a percentage; 0 when nothing is completed.
    pub on_time_delivery_rate: f64,
    /// Mean project span length in days, `end - start` clamped at 0.
    pub average_duration_days: f64,
    pub status_distribution: StatusDistribution,
}
