use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::model::CalendarState;

// ---------------------------------------------------------------------------
// Validation result types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Validate implementation
// ---------------------------------------------------------------------------

/// Validate a calendar snapshot, returning errors (data a form should have
/// rejected) and warnings (advisory). The engine itself never rejects these
/// inputs; every core computation degrades gracefully instead.
pub fn validate(state: &CalendarState) -> ValidationResult {
    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    let resource_ids: HashSet<&str> = state.resources.iter().map(|r| r.id.as_str()).collect();

    // -----------------------------------------------------------------------
    // Error: duplicate IDs
    // -----------------------------------------------------------------------
    {
        let mut seen: HashSet<&str> = HashSet::new();
        for resource in &state.resources {
            if !seen.insert(resource.id.as_str()) {
                errors.push(format!(
                    "Duplicate resource ID '{}' -- each resource must have a unique ID",
                    resource.id
                ));
            }
        }
    }
    {
        let mut seen: HashSet<&str> = HashSet::new();
        for project in &state.projects {
            if !seen.insert(project.id.as_str()) {
                errors.push(format!(
                    "Duplicate project ID '{}' -- each project must have a unique ID",
                    project.id
                ));
            }
        }
    }

    // -----------------------------------------------------------------------
    // Per-project errors
    // -----------------------------------------------------------------------
    for project in &state.projects {
        if project.start_date > project.end_date {
            errors.push(format!(
                "Project '{}' starts after it ends -- it will contribute nothing to the calendar",
                project.title
            ));
        }

        if !resource_ids.contains(project.resource_id.as_str()) {
            errors.push(format!(
                "Project '{}' is assigned to resource '{}' which doesn't exist",
                project.title, project.resource_id
            ));
        }

        if project.progress > 100 {
            errors.push(format!(
                "Project '{}' has progress {} -- progress must be between 0 and 100",
                project.title, project.progress
            ));
        }

        for milestone in &project.milestones {
            if milestone.date < project.start_date || milestone.date > project.end_date {
                warnings.push(format!(
                    "Milestone '{}' of project '{}' falls outside the project's dates",
                    milestone.title, project.title
                ));
            }
        }
    }

    // -----------------------------------------------------------------------
    // Per-leave errors
    // -----------------------------------------------------------------------
    for leave in &state.leaves {
        if !resource_ids.contains(leave.resource_id.as_str()) {
            errors.push(format!(
                "Leave '{}' belongs to resource '{}' which doesn't exist",
                leave.id, leave.resource_id
            ));
        }
        if leave.start_date > leave.end_date {
            errors.push(format!(
                "Leave '{}' starts after it ends",
                leave.id
            ));
        }
    }

    // -----------------------------------------------------------------------
    // Calendar settings
    // -----------------------------------------------------------------------
    for &day in &state.holiday_settings.weekend_days {
        if day > 6 {
            errors.push(format!(
                "Weekend day index {} is out of range -- weekdays are 0 (Sunday) through 6 (Saturday)",
                day
            ));
        }
    }

    let distinct_weekend: HashSet<u32> = state
        .holiday_settings
        .weekend_days
        .iter()
        .copied()
        .filter(|d| *d <= 6)
        .collect();
    if distinct_weekend.len() == 7 {
        warnings.push(
            "Every weekday is configured as weekend -- no day can count as a work day".to_string(),
        );
    }

    {
        let mut by_date: HashMap<String, u32> = HashMap::new();
        for holiday in &state.holiday_settings.holidays {
            *by_date.entry(holiday.date.to_string()).or_default() += 1;
        }
        for (date, count) in by_date {
            if count > 1 {
                warnings.push(format!(
                    "{} holidays share the date {} -- only the first will be reported for that day",
                    count, date
                ));
            }
        }
    }

    ValidationResult { errors, warnings }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
