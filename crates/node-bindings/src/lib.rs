#![deny(clippy::all)]

use chrono::NaiveDate;
use napi_derive::napi;
use resplan_engine::model as engine;
use resplan_engine::{calendar, editor, grouping, stats, validator};

// ---------------------------------------------------------------------------
// Date helpers
// ---------------------------------------------------------------------------

/// Calendar dates cross the JS boundary as "YYYY-MM-DD" strings; anything
/// else is rejected here before it can reach the engine.
fn parse_date(s: &str) -> napi::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| napi::Error::from_reason(format!("Invalid date '{}': expected YYYY-MM-DD", s)))
}

fn parse_date_opt(s: Option<String>) -> napi::Result<Option<NaiveDate>> {
    s.map(|v| parse_date(&v)).transpose()
}

fn format_date(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

#[napi(string_enum)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[napi(string_enum)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectStatus {
    Planning,
    Active,
    OnHold,
    Completed,
    Cancelled,
    Overdue,
    AtRisk,
}

#[napi(string_enum)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HolidayKind {
    National,
    Religious,
    Custom,
}

#[napi(string_enum)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaveKind {
    Vacation,
    Sick,
    Personal,
    Holiday,
    Other,
}

#[napi(string_enum)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

// ---------------------------------------------------------------------------
// Enum conversions
// ---------------------------------------------------------------------------

impl From<Priority> for engine::Priority {
    fn from(v: Priority) -> Self {
        match v {
            Priority::High => engine::Priority::High,
            Priority::Medium => engine::Priority::Medium,
            Priority::Low => engine::Priority::Low,
        }
    }
}

impl From<engine::Priority> for Priority {
    fn from(v: engine::Priority) -> Self {
        match v {
            engine::Priority::High => Priority::High,
            engine::Priority::Medium => Priority::Medium,
            engine::Priority::Low => Priority::Low,
        }
    }
}

impl From<ProjectStatus> for engine::ProjectStatus {
    fn from(v: ProjectStatus) -> Self {
        match v {
            ProjectStatus::Planning => engine::ProjectStatus::Planning,
            ProjectStatus::Active => engine::ProjectStatus::Active,
            ProjectStatus::OnHold => engine::ProjectStatus::OnHold,
            ProjectStatus::Completed => engine::ProjectStatus::Completed,
            ProjectStatus::Cancelled => engine::ProjectStatus::Cancelled,
            ProjectStatus::Overdue => engine::ProjectStatus::Overdue,
            ProjectStatus::AtRisk => engine::ProjectStatus::AtRisk,
        }
    }
}

impl From<engine::ProjectStatus> for ProjectStatus {
    fn from(v: engine::ProjectStatus) -> Self {
        match v {
            engine::ProjectStatus::Planning => ProjectStatus::Planning,
            engine::ProjectStatus::Active => ProjectStatus::Active,
            engine::ProjectStatus::OnHold => ProjectStatus::OnHold,
            engine::ProjectStatus::Completed => ProjectStatus::Completed,
            engine::ProjectStatus::Cancelled => ProjectStatus::Cancelled,
            engine::ProjectStatus::Overdue => ProjectStatus::Overdue,
            engine::ProjectStatus::AtRisk => ProjectStatus::AtRisk,
        }
    }
}

impl From<HolidayKind> for engine::HolidayKind {
    fn from(v: HolidayKind) -> Self {
        match v {
            HolidayKind::National => engine::HolidayKind::National,
            HolidayKind::Religious => engine::HolidayKind::Religious,
            HolidayKind::Custom => engine::HolidayKind::Custom,
        }
    }
}

impl From<engine::HolidayKind> for HolidayKind {
    fn from(v: engine::HolidayKind) -> Self {
        match v {
            engine::HolidayKind::National => HolidayKind::National,
            engine::HolidayKind::Religious => HolidayKind::Religious,
            engine::HolidayKind::Custom => HolidayKind::Custom,
        }
    }
}

impl From<LeaveKind> for engine::LeaveKind {
    fn from(v: LeaveKind) -> Self {
        match v {
            LeaveKind::Vacation => engine::LeaveKind::Vacation,
            LeaveKind::Sick => engine::LeaveKind::Sick,
            LeaveKind::Personal => engine::LeaveKind::Personal,
            LeaveKind::Holiday => engine::LeaveKind::Holiday,
            LeaveKind::Other => engine::LeaveKind::Other,
        }
    }
}

impl From<engine::LeaveKind> for LeaveKind {
    fn from(v: engine::LeaveKind) -> Self {
        match v {
            engine::LeaveKind::Vacation => LeaveKind::Vacation,
            engine::LeaveKind::Sick => LeaveKind::Sick,
            engine::LeaveKind::Personal => LeaveKind::Personal,
            engine::LeaveKind::Holiday => LeaveKind::Holiday,
            engine::LeaveKind::Other => LeaveKind::Other,
        }
    }
}

impl From<LeaveStatus> for engine::LeaveStatus {
    fn from(v: LeaveStatus) -> Self {
        match v {
            LeaveStatus::Pending => engine::LeaveStatus::Pending,
            LeaveStatus::Approved => engine::LeaveStatus::Approved,
            LeaveStatus::Rejected => engine::LeaveStatus::Rejected,
        }
    }
}

impl From<engine::LeaveStatus> for LeaveStatus {
    fn from(v: engine::LeaveStatus) -> Self {
        match v {
            engine::LeaveStatus::Pending => LeaveStatus::Pending,
            engine::LeaveStatus::Approved => LeaveStatus::Approved,
            engine::LeaveStatus::Rejected => LeaveStatus::Rejected,
        }
    }
}

// ---------------------------------------------------------------------------
// Mirror types: entities
// ---------------------------------------------------------------------------

#[napi(object)]
#[derive(Debug, Clone)]
pub struct Resource {
    pub id: String,
    pub name: String,
    pub role: String,
    pub color: String,
}

impl From<Resource> for engine::Resource {
    fn from(v: Resource) -> Self {
        engine::Resource {
            id: v.id,
            name: v.name,
            role: v.role,
            color: v.color,
        }
    }
}

impl From<engine::Resource> for Resource {
    fn from(v: engine::Resource) -> Self {
        Resource {
            id: v.id,
            name: v.name,
            role: v.role,
            color: v.color,
        }
    }
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct Budget {
    pub estimated: f64,
    pub actual: f64,
}

impl From<Budget> for engine::Budget {
    fn from(v: Budget) -> Self {
        engine::Budget {
            estimated: v.estimated,
            actual: v.actual,
        }
    }
}

impl From<engine::Budget> for Budget {
    fn from(v: engine::Budget) -> Self {
        Budget {
            estimated: v.estimated,
            actual: v.actual,
        }
    }
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct Milestone {
    pub id: String,
    pub title: String,
    /// "YYYY-MM-DD".
    pub date: String,
    pub completed: bool,
}

impl Milestone {
    fn into_engine(self) -> napi::Result<engine::Milestone> {
        Ok(engine::Milestone {
            id: self.id,
            title: self.title,
            date: parse_date(&self.date)?,
            completed: self.completed,
        })
    }
}

impl From<engine::Milestone> for Milestone {
    fn from(v: engine::Milestone) -> Self {
        Milestone {
            id: v.id,
            title: v.title,
            date: format_date(v.date),
            completed: v.completed,
        }
    }
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub resource_id: String,
    /// "YYYY-MM-DD", inclusive.
    pub start_date: String,
    /// "YYYY-MM-DD", inclusive.
    pub end_date: String,
    pub priority: Priority,
    pub status: ProjectStatus,
    pub progress: u32,
    pub deadline: Option<String>,
    pub work_days_needed: Option<u32>,
    pub estimated_hours: Option<f64>,
    pub actual_hours: Option<f64>,
    pub health_score: Option<f64>,
    pub completed_date: Option<String>,
    pub budget: Option<Budget>,
    pub milestones: Option<Vec<Milestone>>,
}

impl Project {
    fn into_engine(self) -> napi::Result<engine::Project> {
        Ok(engine::Project {
            id: self.id,
            title: self.title,
            resource_id: self.resource_id,
            start_date: parse_date(&self.start_date)?,
            end_date: parse_date(&self.end_date)?,
            priority: self.priority.into(),
            status: self.status.into(),
            progress: self.progress,
            deadline: parse_date_opt(self.deadline)?,
            work_days_needed: self.work_days_needed,
            estimated_hours: self.estimated_hours,
            actual_hours: self.actual_hours,
            health_score: self.health_score,
            completed_date: parse_date_opt(self.completed_date)?,
            budget: self.budget.map(Into::into),
            milestones: self
                .milestones
                .unwrap_or_default()
                .into_iter()
                .map(Milestone::into_engine)
                .collect::<napi::Result<Vec<_>>>()?,
        })
    }
}

impl From<engine::Project> for Project {
    fn from(v: engine::Project) -> Self {
        Project {
            id: v.id,
            title: v.title,
            resource_id: v.resource_id,
            start_date: format_date(v.start_date),
            end_date: format_date(v.end_date),
            priority: v.priority.into(),
            status: v.status.into(),
            progress: v.progress,
            deadline: v.deadline.map(format_date),
            work_days_needed: v.work_days_needed,
            estimated_hours: v.estimated_hours,
            actual_hours: v.actual_hours,
            health_score: v.health_score,
            completed_date: v.completed_date.map(format_date),
            budget: v.budget.map(Into::into),
            milestones: Some(v.milestones.into_iter().map(Into::into).collect()),
        }
    }
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct Holiday {
    pub id: String,
    pub name: String,
    /// "YYYY-MM-DD"; for recurring holidays only month and day matter.
    pub date: String,
    pub kind: HolidayKind,
    pub recurring: bool,
    pub description: Option<String>,
}

impl Holiday {
    fn into_engine(self) -> napi::Result<engine::Holiday> {
        Ok(engine::Holiday {
            id: self.id,
            name: self.name,
            date: parse_date(&self.date)?,
            kind: self.kind.into(),
            recurring: self.recurring,
            description: self.description,
        })
    }
}

impl From<engine::Holiday> for Holiday {
    fn from(v: engine::Holiday) -> Self {
        Holiday {
            id: v.id,
            name: v.name,
            date: format_date(v.date),
            kind: v.kind.into(),
            recurring: v.recurring,
            description: v.description,
        }
    }
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct WorkingHours {
    pub start: String,
    pub end: String,
}

impl From<WorkingHours> for engine::WorkingHours {
    fn from(v: WorkingHours) -> Self {
        engine::WorkingHours {
            start: v.start,
            end: v.end,
        }
    }
}

impl From<engine::WorkingHours> for WorkingHours {
    fn from(v: engine::WorkingHours) -> Self {
        WorkingHours {
            start: v.start,
            end: v.end,
        }
    }
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct HolidaySettings {
    /// Weekday indices counted as weekend, 0 = Sunday .. 6 = Saturday.
    pub weekend_days: Vec<u32>,
    pub holidays: Vec<Holiday>,
    pub working_hours: WorkingHours,
}

impl HolidaySettings {
    fn into_engine(self) -> napi::Result<engine::HolidaySettings> {
        Ok(engine::HolidaySettings {
            weekend_days: self.weekend_days,
            holidays: self
                .holidays
                .into_iter()
                .map(Holiday::into_engine)
                .collect::<napi::Result<Vec<_>>>()?,
            working_hours: self.working_hours.into(),
        })
    }
}

impl From<engine::HolidaySettings> for HolidaySettings {
    fn from(v: engine::HolidaySettings) -> Self {
        HolidaySettings {
            weekend_days: v.weekend_days,
            holidays: v.holidays.into_iter().map(Into::into).collect(),
            working_hours: v.working_hours.into(),
        }
    }
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct Leave {
    pub id: String,
    pub resource_id: String,
    pub start_date: String,
    pub end_date: String,
    pub kind: LeaveKind,
    pub status: LeaveStatus,
    pub reason: Option<String>,
}

impl Leave {
    fn into_engine(self) -> napi::Result<engine::Leave> {
        Ok(engine::Leave {
            id: self.id,
            resource_id: self.resource_id,
            start_date: parse_date(&self.start_date)?,
            end_date: parse_date(&self.end_date)?,
            kind: self.kind.into(),
            status: self.status.into(),
            reason: self.reason,
        })
    }
}

impl From<engine::Leave> for Leave {
    fn from(v: engine::Leave) -> Self {
        Leave {
            id: v.id,
            resource_id: v.resource_id,
            start_date: format_date(v.start_date),
            end_date: format_date(v.end_date),
            kind: v.kind.into(),
            status: v.status.into(),
            reason: v.reason,
        }
    }
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl DateRange {
    fn into_engine(self) -> napi::Result<engine::DateRange> {
        Ok(engine::DateRange {
            start: parse_date(&self.start)?,
            end: parse_date(&self.end)?,
        })
    }
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct CalendarState {
    pub resources: Vec<Resource>,
    pub projects: Vec<Project>,
    pub leaves: Vec<Leave>,
    pub holiday_settings: HolidaySettings,
}

impl CalendarState {
    fn into_engine(self) -> napi::Result<engine::CalendarState> {
        Ok(engine::CalendarState {
            resources: self.resources.into_iter().map(Into::into).collect(),
            projects: self
                .projects
                .into_iter()
                .map(Project::into_engine)
                .collect::<napi::Result<Vec<_>>>()?,
            leaves: self
                .leaves
                .into_iter()
                .map(Leave::into_engine)
                .collect::<napi::Result<Vec<_>>>()?,
            holiday_settings: self.holiday_settings.into_engine()?,
        })
    }
}

impl From<engine::CalendarState> for CalendarState {
    fn from(v: engine::CalendarState) -> Self {
        CalendarState {
            resources: v.resources.into_iter().map(Into::into).collect(),
            projects: v.projects.into_iter().map(Into::into).collect(),
            leaves: v.leaves.into_iter().map(Into::into).collect(),
            holiday_settings: v.holiday_settings.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Mirror types: grouping output
// ---------------------------------------------------------------------------

#[napi(object)]
#[derive(Debug, Clone)]
pub struct ProjectGroup {
    pub project: Project,
    pub start_index: u32,
    pub end_index: u32,
    pub span: u32,
}

impl From<engine::ProjectGroup> for ProjectGroup {
    fn from(v: engine::ProjectGroup) -> Self {
        ProjectGroup {
            project: v.project.into(),
            start_index: v.start_index,
            end_index: v.end_index,
            span: v.span,
        }
    }
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct LayeredGroup {
    pub project: Project,
    pub start_index: u32,
    pub end_index: u32,
    pub span: u32,
    /// Stacking index, 0 = base layer.
    pub layer: u32,
    pub has_divider_after: bool,
}

impl From<engine::LayeredGroup> for LayeredGroup {
    fn from(v: engine::LayeredGroup) -> Self {
        LayeredGroup {
            project: v.project.into(),
            start_index: v.start_index,
            end_index: v.end_index,
            span: v.span,
            layer: v.layer,
            has_divider_after: v.has_divider_after,
        }
    }
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct ResourceLayout {
    pub resource_id: String,
    pub groups: Vec<LayeredGroup>,
}

impl From<engine::ResourceLayout> for ResourceLayout {
    fn from(v: engine::ResourceLayout) -> Self {
        ResourceLayout {
            resource_id: v.resource_id,
            groups: v.groups.into_iter().map(Into::into).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Mirror types: statistics output
// ---------------------------------------------------------------------------

#[napi(object)]
#[derive(Debug, Clone)]
pub struct WorkDayStats {
    pub total_work_days: u32,
    pub assigned_project_days: u32,
    pub leave_days: u32,
    pub available_days: u32,
    pub utilization: f64,
}

impl From<engine::WorkDayStats> for WorkDayStats {
    fn from(v: engine::WorkDayStats) -> Self {
        WorkDayStats {
            total_work_days: v.total_work_days,
            assigned_project_days: v.assigned_project_days,
            leave_days: v.leave_days,
            available_days: v.available_days,
            utilization: v.utilization,
        }
    }
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct ResourceStats {
    pub resource_id: String,
    pub days: WorkDayStats,
}

impl From<engine::ResourceStats> for ResourceStats {
    fn from(v: engine::ResourceStats) -> Self {
        ResourceStats {
            resource_id: v.resource_id,
            days: v.days.into(),
        }
    }
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct TeamStats {
    pub resources: Vec<ResourceStats>,
    pub combined: WorkDayStats,
}

impl From<engine::TeamStats> for TeamStats {
    fn from(v: engine::TeamStats) -> Self {
        TeamStats {
            resources: v.resources.into_iter().map(Into::into).collect(),
            combined: v.combined.into(),
        }
    }
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct StatusDistribution {
    pub planning: u32,
    pub active: u32,
    pub on_hold: u32,
    pub completed: u32,
    pub cancelled: u32,
    pub overdue: u32,
    pub at_risk: u32,
}

impl From<engine::StatusDistribution> for StatusDistribution {
    fn from(v: engine::StatusDistribution) -> Self {
        StatusDistribution {
            planning: v.planning,
            active: v.active,
            on_hold: v.on_hold,
            completed: v.completed,
            cancelled: v.cancelled,
            overdue: v.overdue,
            at_risk: v.at_risk,
        }
    }
}

#[napi(object)]
#[derive(Debug, Clone)]
pub struct PortfolioStats {
    pub total_projects: u32,
    pub active_projects: u32,
    pub completed_projects: u32,
    pub overdue_projects: u32,
    pub at_risk_projects: u32,
    pub average_progress: f64,
    pub on_time_delivery_rate: f64,
    pub average_duration_days: f64,
    pub status_distribution: StatusDistribution,
}

impl From<engine::PortfolioStats> for PortfolioStats {
    fn from(v: engine::PortfolioStats) -> Self {
        PortfolioStats {
            total_projects: v.total_projects,
            active_projects: v.active_projects,
            completed_projects: v.completed_projects,
            overdue_projects: v.overdue_projects,
            at_risk_projects: v.at_risk_projects,
            average_progress: v.average_progress,
            on_time_delivery_rate: v.on_time_delivery_rate,
            average_duration_days: v.average_duration_days,
            status_distribution: v.status_distribution.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Validation result
// ---------------------------------------------------------------------------

#[napi(object)]
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl From<validator::ValidationResult> for ValidationResult {
    fn from(v: validator::ValidationResult) -> Self {
        ValidationResult {
            errors: v.errors,
            warnings: v.warnings,
        }
    }
}

// ---------------------------------------------------------------------------
// Exported functions
// ---------------------------------------------------------------------------

/// Overlap-aware timeline layout for every resource: each project run gets
/// a stacking layer and divider flag relative to its neighbors.
#[napi]
pub fn layout_timeline(
    state: CalendarState,
    range: DateRange,
) -> napi::Result<Vec<ResourceLayout>> {
    let state = state.into_engine()?;
    let axis = calendar::date_axis(&range.into_engine()?);
    Ok(state
        .resources
        .iter()
        .map(|r| {
            engine::ResourceLayout {
                resource_id: r.id.clone(),
                groups: grouping::layered_groups(&state.projects, &axis, &r.id),
            }
            .into()
        })
        .collect())
}

/// Contiguous (non-overlapping) project groups for a single resource.
#[napi]
pub fn contiguous_groups(
    state: CalendarState,
    range: DateRange,
    resource_id: String,
) -> napi::Result<Vec<ProjectGroup>> {
    let state = state.into_engine()?;
    let axis = calendar::date_axis(&range.into_engine()?);
    Ok(grouping::contiguous_groups(&state.projects, &axis, &resource_id)
        .into_iter()
        .map(Into::into)
        .collect())
}

/// Work-day statistics for one resource over the given range.
#[napi]
pub fn work_day_stats(
    state: CalendarState,
    resource_id: String,
    range: DateRange,
) -> napi::Result<WorkDayStats> {
    let state = state.into_engine()?;
    let range = range.into_engine()?;
    Ok(stats::work_day_stats(&state, &resource_id, &range).into())
}

/// Per-resource and combined work-day statistics.
#[napi]
pub fn team_stats(state: CalendarState, range: DateRange) -> napi::Result<TeamStats> {
    let state = state.into_engine()?;
    let range = range.into_engine()?;
    Ok(stats::team_stats(&state, &range).into())
}

/// Portfolio analytics over a project collection.
#[napi]
pub fn portfolio_stats(projects: Vec<Project>) -> napi::Result<PortfolioStats> {
    let projects = projects
        .into_iter()
        .map(Project::into_engine)
        .collect::<napi::Result<Vec<_>>>()?;
    Ok(stats::portfolio_stats(&projects).into())
}

/// Remove calendar dates from a project's span, splitting it into multiple
/// records where the removal punches holes. Removing an unknown project ID
/// returns the collection unchanged.
#[napi]
pub fn remove_project_days(
    projects: Vec<Project>,
    project_id: String,
    dates: Vec<String>,
) -> napi::Result<Vec<Project>> {
    let projects = projects
        .into_iter()
        .map(Project::into_engine)
        .collect::<napi::Result<Vec<_>>>()?;
    let dates = dates
        .iter()
        .map(|d| parse_date(d))
        .collect::<napi::Result<Vec<_>>>()?;
    Ok(editor::remove_project_days(&projects, &project_id, &dates)
        .into_iter()
        .map(Into::into)
        .collect())
}

/// Remove one date from every project of the resource covering it.
#[napi]
pub fn clear_day_work(
    projects: Vec<Project>,
    resource_id: String,
    date: String,
) -> napi::Result<Vec<Project>> {
    let projects = projects
        .into_iter()
        .map(Project::into_engine)
        .collect::<napi::Result<Vec<_>>>()?;
    let date = parse_date(&date)?;
    Ok(editor::clear_day_work(&projects, &resource_id, date)
        .into_iter()
        .map(Into::into)
        .collect())
}

/// Delete a resource, cascading to its projects and leave records.
#[napi]
pub fn delete_resource(state: CalendarState, resource_id: String) -> napi::Result<CalendarState> {
    let state = state.into_engine()?;
    Ok(state.without_resource(&resource_id).into())
}

/// Validate a calendar snapshot and return errors and warnings.
#[napi]
pub fn validate(state: CalendarState) -> napi::Result<ValidationResult> {
    let state = state.into_engine()?;
    Ok(validator::validate(&state).into())
}
