use crate::calendar::{find_leave, is_work_day, span_days};
use crate::model::{
    CalendarState, DateRange, PortfolioStats, Project, ProjectStatus, ResourceStats,
    StatusDistribution, TeamStats, WorkDayStats,
};

// ---------------------------------------------------------------------------
// Work-day statistics
// ---------------------------------------------------------------------------

/// Work-day accounting for one resource over the given range.
///
/// Walks the range day by day, skipping non-work days entirely. Each work
/// day is classified exactly once: approved leave first, then project
/// coverage (any number of overlapping projects count as one assigned day),
/// otherwise available. Projects and leave partially outside the range are
/// clipped by the walk itself.
pub fn work_day_stats(state: &CalendarState, resource_id: &str, range: &DateRange) -> WorkDayStats {
    let own_projects: Vec<&Project> = state
        .projects
        .iter()
        .filter(|p| p.resource_id == resource_id)
        .collect();

    let mut total = 0u32;
    let mut assigned = 0u32;
    let mut leave = 0u32;

    for day in span_days(range.start, range.end) {
        if !is_work_day(day, &state.holiday_settings) {
            continue;
        }
        total += 1;

        if find_leave(day, resource_id, &state.leaves).is_some() {
            leave += 1;
        } else if own_projects
            .iter()
            .any(|p| p.start_date <= day && day <= p.end_date)
        {
            assigned += 1;
        }
    }

    WorkDayStats {
        total_work_days: total,
        assigned_project_days: assigned,
        leave_days: leave,
        available_days: total - assigned - leave,
        utilization: utilization(assigned, leave, total),
    }
}

/// Per-resource stats for every resource in the snapshot plus a combined
/// elementwise sum. Combined utilization comes from the summed totals, not
/// from averaging the per-resource percentages.
pub fn team_stats(state: &CalendarState, range: &DateRange) -> TeamStats {
    let resources: Vec<ResourceStats> = state
        .resources
        .iter()
        .map(|r| ResourceStats {
            resource_id: r.id.clone(),
            days: work_day_stats(state, &r.id, range),
        })
        .collect();

    let mut total = 0u32;
    let mut assigned = 0u32;
    let mut leave = 0u32;
    let mut available = 0u32;
    for rs in &resources {
        total += rs.days.total_work_days;
        assigned += rs.days.assigned_project_days;
        leave += rs.days.leave_days;
        available += rs.days.available_days;
    }

    TeamStats {
        resources,
        combined: WorkDayStats {
            total_work_days: total,
            assigned_project_days: assigned,
            leave_days: leave,
            available_days: available,
            utilization: utilization(assigned, leave, total),
        },
    }
}

fn utilization(assigned: u32, leave: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        f64::from(assigned + leave) / f64::from(total) * 100.0
    }
}

// ---------------------------------------------------------------------------
// Portfolio analytics
// ---------------------------------------------------------------------------

/// Status, progress, delivery, and duration aggregates over the whole
/// project collection. Pure function of the collection: no wall clock.
pub fn portfolio_stats(projects: &[Project]) -> PortfolioStats {
    let total = projects.len() as u32;

    let mut distribution = StatusDistribution::default();
    for project in projects {
        match project.status {
            ProjectStatus::Planning => distribution.planning += 1,
            ProjectStatus::Active => distribution.active += 1,
            ProjectStatus::OnHold => distribution.on_hold += 1,
            ProjectStatus::Completed => distribution.completed += 1,
            ProjectStatus::Cancelled => distribution.cancelled += 1,
            ProjectStatus::Overdue => distribution.overdue += 1,
            ProjectStatus::AtRisk => distribution.at_risk += 1,
        }
    }

    let average_progress = if projects.is_empty() {
        0.0
    } else {
        projects.iter().map(|p| f64::from(p.progress)).sum::<f64>() / f64::from(total)
    };

    let completed_on_time = projects
        .iter()
        .filter(|p| {
            p.status == ProjectStatus::Completed
                && p.completed_date.is_some_and(|done| done <= p.end_date)
        })
        .count() as u32;
    let on_time_delivery_rate = if distribution.completed == 0 {
        0.0
    } else {
        f64::from(completed_on_time) / f64::from(distribution.completed) * 100.0
    };

    let average_duration_days = if projects.is_empty() {
        0.0
    } else {
        projects
            .iter()
            .map(|p| (p.end_date - p.start_date).num_days().max(0) as f64)
            .sum::<f64>()
            / f64::from(total)
    };

    PortfolioStats {
        total_projects: total,
        active_projects: distribution.active,
        completed_projects: distribution.completed,
        overdue_projects: distribution.overdue,
        at_risk_projects: distribution.at_risk,
        average_progress,
        on_time_delivery_rate,
        average_duration_days,
        status_distribution: distribution,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::model::{
        Holiday, HolidayKind, HolidaySettings, Leave, LeaveKind, LeaveStatus, Priority, Resource,
        WorkingHours,
    };

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn resource(id: &str) -> Resource {
        Resource {
            id: id.to_string(),
            name: id.to_string(),
            role: "Engineer".to_string(),
            color: "#3B82F6".to_string(),
        }
    }

    fn project(id: &str, resource_id: &str, start: &str, end: &str) -> Project {
        Project {
            id: id.to_string(),
            title: id.to_string(),
            resource_id: resource_id.to_string(),
            start_date: d(start),
            end_date: d(end),
            priority: Priority::Medium,
            status: ProjectStatus::Active,
            progress: 0,
            deadline: None,
            work_days_needed: None,
            estimated_hours: None,
            actual_hours: None,
            health_score: None,
            completed_date: None,
            budget: None,
            milestones: Vec::new(),
        }
    }

    fn approved_leave(id: &str, resource_id: &str, start: &str, end: &str) -> Leave {
        Leave {
            id: id.to_string(),
            resource_id: resource_id.to_string(),
            start_date: d(start),
            end_date: d(end),
            kind: LeaveKind::Vacation,
            status: LeaveStatus::Approved,
            reason: None,
        }
    }

    fn state(projects: Vec<Project>, leaves: Vec<Leave>, holidays: Vec<Holiday>) -> CalendarState {
        CalendarState {
            resources: vec![resource("r1")],
            projects,
            leaves,
            holiday_settings: HolidaySettings {
                weekend_days: vec![0, 6],
                holidays,
                working_hours: WorkingHours {
                    start: "09:00".to_string(),
                    end: "17:00".to_string(),
                },
            },
        }
    }

    // 2024-06-03 is a Monday; 03..09 is Mon..Sun.
    fn week() -> DateRange {
        DateRange {
            start: d("2024-06-03"),
            end: d("2024-06-09"),
        }
    }

    #[test]
    fn empty_week_has_five_work_days() {
        let s = state(Vec::new(), Vec::new(), Vec::new());
        let stats = work_day_stats(&s, "r1", &week());
        assert_eq!(stats.total_work_days, 5);
        assert_eq!(stats.assigned_project_days, 0);
        assert_eq!(stats.leave_days, 0);
        assert_eq!(stats.available_days, 5);
        assert_eq!(stats.utilization, 0.0);
    }

    #[test]
    fn project_days_exclude_weekends() {
        // Project covers Thu..Sun; only Thu and Fri are work days.
        let s = state(
            vec![project("p1", "r1", "2024-06-06", "2024-06-09")],
            Vec::new(),
            Vec::new(),
        );
        let stats = work_day_stats(&s, "r1", &week());
        assert_eq!(stats.assigned_project_days, 2);
        assert_eq!(stats.available_days, 3);
        assert_eq!(stats.utilization, 40.0);
    }

    #[test]
    fn overlapping_projects_count_each_day_once() {
        let s = state(
            vec![
                project("p1", "r1", "2024-06-03", "2024-06-07"),
                project("p2", "r1", "2024-06-05", "2024-06-07"),
            ],
            Vec::new(),
            Vec::new(),
        );
        let stats = work_day_stats(&s, "r1", &week());
        assert_eq!(stats.assigned_project_days, 5);
        assert_eq!(stats.utilization, 100.0);
    }

    #[test]
    fn holiday_reduces_total_work_days() {
        let holidays = vec![Holiday {
            id: "h1".to_string(),
            name: "Midweek Holiday".to_string(),
            date: d("2024-06-05"),
            kind: HolidayKind::National,
            recurring: false,
            description: None,
        }];
        let s = state(
            vec![project("p1", "r1", "2024-06-03", "2024-06-07")],
            Vec::new(),
            holidays,
        );
        let stats = work_day_stats(&s, "r1", &week());
        assert_eq!(stats.total_work_days, 4);
        assert_eq!(stats.assigned_project_days, 4);
    }

    #[test]
    fn leave_takes_precedence_over_project_coverage() {
        let s = state(
            vec![project("p1", "r1", "2024-06-03", "2024-06-07")],
            vec![approved_leave("l1", "r1", "2024-06-04", "2024-06-04")],
            Vec::new(),
        );
        let stats = work_day_stats(&s, "r1", &week());
        assert_eq!(stats.assigned_project_days, 4);
        assert_eq!(stats.leave_days, 1);
        assert_eq!(stats.available_days, 0);
        assert_eq!(stats.utilization, 100.0);
    }

    #[test]
    fn leave_on_weekend_consumes_nothing() {
        let s = state(
            Vec::new(),
            vec![approved_leave("l1", "r1", "2024-06-08", "2024-06-09")],
            Vec::new(),
        );
        let stats = work_day_stats(&s, "r1", &week());
        assert_eq!(stats.leave_days, 0);
        assert_eq!(stats.available_days, 5);
    }

    #[test]
    fn pending_leave_is_not_counted() {
        let mut l = approved_leave("l1", "r1", "2024-06-04", "2024-06-04");
        l.status = LeaveStatus::Pending;
        let s = state(Vec::new(), vec![l], Vec::new());
        let stats = work_day_stats(&s, "r1", &week());
        assert_eq!(stats.leave_days, 0);
    }

    #[test]
    fn arithmetic_identity_holds() {
        let s = state(
            vec![
                project("p1", "r1", "2024-06-03", "2024-06-05"),
                project("p2", "r1", "2024-06-05", "2024-06-10"),
            ],
            vec![approved_leave("l1", "r1", "2024-06-07", "2024-06-07")],
            Vec::new(),
        );
        let stats = work_day_stats(&s, "r1", &week());
        assert_eq!(
            stats.available_days + stats.assigned_project_days + stats.leave_days,
            stats.total_work_days
        );
        assert!(stats.utilization <= 100.0);
    }

    #[test]
    fn zero_work_days_yields_zero_utilization() {
        let mut s = state(
            vec![project("p1", "r1", "2024-06-08", "2024-06-09")],
            Vec::new(),
            Vec::new(),
        );
        s.holiday_settings.weekend_days = vec![0, 1, 2, 3, 4, 5, 6];
        let stats = work_day_stats(&s, "r1", &week());
        assert_eq!(stats.total_work_days, 0);
        assert_eq!(stats.utilization, 0.0);
    }

    #[test]
    fn combined_utilization_comes_from_summed_totals() {
        let mut s = state(
            vec![project("p1", "r1", "2024-06-03", "2024-06-07")],
            Vec::new(),
            Vec::new(),
        );
        s.resources.push(resource("r2"));
        let team = team_stats(&s, &week());
        assert_eq!(team.resources.len(), 2);
        assert_eq!(team.combined.total_work_days, 10);
        assert_eq!(team.combined.assigned_project_days, 5);
        // 5 of 10 summed work days, not the 50%+0% average of 25%.
        assert_eq!(team.combined.utilization, 50.0);
    }

    #[test]
    fn portfolio_counts_statuses_and_rates() {
        let mut done = project("p1", "r1", "2024-06-03", "2024-06-07");
        done.status = ProjectStatus::Completed;
        done.completed_date = Some(d("2024-06-06"));
        done.progress = 100;
        let mut late = project("p2", "r1", "2024-06-03", "2024-06-07");
        late.status = ProjectStatus::Completed;
        late.completed_date = Some(d("2024-06-10"));
        late.progress = 100;
        let mut risky = project("p3", "r1", "2024-06-03", "2024-06-12");
        risky.status = ProjectStatus::AtRisk;
        risky.progress = 40;

        let stats = portfolio_stats(&[done, late, risky]);
        assert_eq!(stats.total_projects, 3);
        assert_eq!(stats.completed_projects, 2);
        assert_eq!(stats.at_risk_projects, 1);
        assert_eq!(stats.status_distribution.completed, 2);
        assert_eq!(stats.on_time_delivery_rate, 50.0);
        assert_eq!(stats.average_progress, 80.0);
        assert_eq!(stats.average_duration_days, (4.0 + 4.0 + 9.0) / 3.0);
    }

    #[test]
    fn empty_portfolio_is_all_zeroes() {
        let stats = portfolio_stats(&[]);
        assert_eq!(stats.total_projects, 0);
        assert_eq!(stats.average_progress, 0.0);
        assert_eq!(stats.on_time_delivery_rate, 0.0);
        assert_eq!(stats.average_duration_days, 0.0);
    }
}
