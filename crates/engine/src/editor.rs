use std::collections::HashSet;

use chrono::NaiveDate;

use crate::calendar::span_days;
use crate::model::Project;

// ---------------------------------------------------------------------------
// Range removal
// ---------------------------------------------------------------------------

/// Remove the given calendar dates from a project's span, splitting the
/// project where the removal punches holes in it.
///
/// Returns a new project collection:
/// - unknown `project_id` → unchanged clone (never an error);
/// - dates outside the project's span are ignored;
/// - no surviving dates → the project is deleted;
/// - otherwise the first surviving run overwrites the original record in
///   place (id, position, and metadata preserved) and each further run is
///   appended as a new record with id `{parent}_split_{n}` and the title
///   decorated with an ordinal.
pub fn remove_project_days(
    projects: &[Project],
    project_id: &str,
    dates: &[NaiveDate],
) -> Vec<Project> {
    let Some(target) = projects.iter().find(|p| p.id == project_id) else {
        return projects.to_vec();
    };

    let removal: HashSet<NaiveDate> = dates.iter().copied().collect();
    let remaining: Vec<NaiveDate> = span_days(target.start_date, target.end_date)
        .into_iter()
        .filter(|day| !removal.contains(day))
        .collect();

    if remaining.is_empty() {
        return projects
            .iter()
            .filter(|p| p.id != project_id)
            .cloned()
            .collect();
    }

    let runs = date_runs(&remaining);

    let mut result: Vec<Project> = projects
        .iter()
        .map(|p| {
            if p.id == project_id {
                let mut updated = p.clone();
                updated.start_date = runs[0].0;
                updated.end_date = runs[0].1;
                updated
            } else {
                p.clone()
            }
        })
        .collect();

    for (n, (start, end)) in runs.iter().copied().enumerate().skip(1) {
        let mut split = target.clone();
        split.id = format!("{}_split_{}", target.id, n);
        split.title = format!("{} ({})", target.title, n + 1);
        split.start_date = start;
        split.end_date = end;
        result.push(split);
    }

    result
}

/// Remove a single date from every project of the resource covering it.
pub fn clear_day_work(projects: &[Project], resource_id: &str, date: NaiveDate) -> Vec<Project> {
    let covering: Vec<String> = projects
        .iter()
        .filter(|p| p.resource_id == resource_id && p.start_date <= date && date <= p.end_date)
        .map(|p| p.id.clone())
        .collect();

    let mut result = projects.to_vec();
    for id in covering {
        result = remove_project_days(&result, &id, &[date]);
    }
    result
}

/// Coalesce sorted dates into maximal runs of consecutive calendar days,
/// returned as inclusive `(start, end)` pairs.
fn date_runs(dates: &[NaiveDate]) -> Vec<(NaiveDate, NaiveDate)> {
    let mut runs = Vec::new();
    let mut iter = dates.iter().copied();
    let Some(first) = iter.next() else {
        return runs;
    };
    let mut start = first;
    let mut prev = first;
    for day in iter {
        if (day - prev).num_days() != 1 {
            runs.push((start, prev));
            start = day;
        }
        prev = day;
    }
    runs.push((start, prev));
    runs
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    use crate::model::{Priority, ProjectStatus};

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn project(id: &str, start: &str, end: &str) -> Project {
        Project {
            id: id.to_string(),
            title: "Website Redesign".to_string(),
            resource_id: "r1".to_string(),
            start_date: d(start),
            end_date: d(end),
            priority: Priority::High,
            status: ProjectStatus::Active,
            progress: 30,
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

    fn span_set(p: &Project) -> BTreeSet<NaiveDate> {
        span_days(p.start_date, p.end_date).into_iter().collect()
    }

    #[test]
    fn removing_interior_dates_splits_the_project() {
        let projects = vec![project("p1", "2024-06-01", "2024-06-05")];
        let result = remove_project_days(&projects, "p1", &[d("2024-06-02"), d("2024-06-03")]);

        assert_eq!(result.len(), 2);
        let original = result.iter().find(|p| p.id == "p1").unwrap();
        assert_eq!(original.start_date, d("2024-06-01"));
        assert_eq!(original.end_date, d("2024-06-01"));
        assert_eq!(original.title, "Website Redesign");

        let split = result.iter().find(|p| p.id == "p1_split_1").unwrap();
        assert_eq!(split.start_date, d("2024-06-04"));
        assert_eq!(split.end_date, d("2024-06-05"));
        assert_eq!(split.title, "Website Redesign (2)");
        assert_eq!(split.resource_id, "r1");
        assert_eq!(split.priority, Priority::High);
    }

    #[test]
    fn removing_an_edge_only_trims() {
        let projects = vec![project("p1", "2024-06-01", "2024-06-05")];
        let result = remove_project_days(&projects, "p1", &[d("2024-06-01")]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].start_date, d("2024-06-02"));
        assert_eq!(result[0].end_date, d("2024-06-05"));
    }

    #[test]
    fn removing_every_date_deletes_the_project() {
        let projects = vec![
            project("p1", "2024-06-03", "2024-06-03"),
            project("p2", "2024-06-10", "2024-06-12"),
        ];
        let result = remove_project_days(&projects, "p1", &[d("2024-06-03")]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "p2");
    }

    #[test]
    fn two_holes_produce_two_splits() {
        let projects = vec![project("p1", "2024-06-01", "2024-06-09")];
        let result = remove_project_days(&projects, "p1", &[d("2024-06-03"), d("2024-06-07")]);
        assert_eq!(result.len(), 3);
        let ids: Vec<&str> = result.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p1_split_1", "p1_split_2"]);
        let titles: Vec<&str> = result.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Website Redesign",
                "Website Redesign (2)",
                "Website Redesign (3)"
            ]
        );
    }

    #[test]
    fn unknown_project_id_is_a_no_op() {
        let projects = vec![project("p1", "2024-06-01", "2024-06-05")];
        let result = remove_project_days(&projects, "missing", &[d("2024-06-02")]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].start_date, d("2024-06-01"));
        assert_eq!(result[0].end_date, d("2024-06-05"));
    }

    #[test]
    fn dates_outside_the_span_are_ignored() {
        let projects = vec![project("p1", "2024-06-01", "2024-06-05")];
        let result = remove_project_days(&projects, "p1", &[d("2024-07-01"), d("2024-06-03")]);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn removal_conserves_the_span() {
        let projects = vec![project("p1", "2024-06-01", "2024-06-10")];
        let removed = [d("2024-06-02"), d("2024-06-05"), d("2024-06-06"), d("2024-06-10")];
        let result = remove_project_days(&projects, "p1", &removed);

        let mut covered: BTreeSet<NaiveDate> = BTreeSet::new();
        for p in &result {
            for day in span_set(p) {
                assert!(covered.insert(day), "date covered by two records");
            }
        }

        let expected: BTreeSet<NaiveDate> = span_days(d("2024-06-01"), d("2024-06-10"))
            .into_iter()
            .filter(|day| !removed.contains(day))
            .collect();
        assert_eq!(covered, expected);
    }

    #[test]
    fn spec_scenario_split() {
        // Removing 06-02 and 06-03 from P1 (06-01..06-05) leaves the
        // original spanning one day plus a continuation for 06-04..06-05.
        let projects = vec![project("P1", "2024-06-01", "2024-06-05")];
        let result = remove_project_days(&projects, "P1", &[d("2024-06-02"), d("2024-06-03")]);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].id, "P1");
        assert_eq!(result[0].start_date, d("2024-06-01"));
        assert_eq!(result[0].end_date, d("2024-06-01"));
        assert_eq!(result[1].start_date, d("2024-06-04"));
        assert_eq!(result[1].end_date, d("2024-06-05"));
    }

    #[test]
    fn clear_day_splits_every_covering_project() {
        let mut other = project("p2", "2024-06-01", "2024-06-05");
        other.resource_id = "r2".to_string();
        let projects = vec![
            project("p1", "2024-06-01", "2024-06-05"),
            project("p3", "2024-06-03", "2024-06-03"),
            other,
        ];
        let result = clear_day_work(&projects, "r1", d("2024-06-03"));

        // p1 split around the cleared day, p3 deleted, r2's project intact.
        assert!(result.iter().any(|p| p.id == "p1" && p.end_date == d("2024-06-02")));
        assert!(result.iter().any(|p| p.id == "p1_split_1" && p.start_date == d("2024-06-04")));
        assert!(!result.iter().any(|p| p.id == "p3"));
        assert!(result
            .iter()
            .any(|p| p.id == "p2" && p.start_date == d("2024-06-01") && p.end_date == d("2024-06-05")));
    }
}
