use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use crate::model::{LayeredGroup, Project, ProjectGroup};

// ---------------------------------------------------------------------------
// Run coalescing
// ---------------------------------------------------------------------------

/// Axis indices where `project` is active (inclusive date containment).
fn active_indices(project: &Project, axis: &[NaiveDate]) -> Vec<usize> {
    axis.iter()
        .enumerate()
        .filter(|(_, date)| project.start_date <= **date && **date <= project.end_date)
        .map(|(i, _)| i)
        .collect()
}

/// Split a sorted index list into maximal runs of consecutive integers,
/// returned as inclusive `(start, end)` pairs.
pub(crate) fn contiguous_runs(indices: &[usize]) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut iter = indices.iter().copied();
    let Some(first) = iter.next() else {
        return runs;
    };
    let mut start = first;
    let mut prev = first;
    for idx in iter {
        if idx != prev + 1 {
            runs.push((start, prev));
            start = idx;
        }
        prev = idx;
    }
    runs.push((start, prev));
    runs
}

// ---------------------------------------------------------------------------
// Interval coalescer (no-overlap variant)
// ---------------------------------------------------------------------------

/// Group one resource's projects into maximal contiguous runs of axis
/// positions. Assumes the resource's projects do not overlap in time; if
/// they do, the groups are emitted independently and may cover the same
/// indices (see `layered_groups` for the overlap-aware variant).
///
/// A per-project set of already-emitted indices makes the walk idempotent:
/// no project ever yields two groups starting at the same position.
/// Output is sorted by `start_index` ascending.
pub fn contiguous_groups(
    projects: &[Project],
    axis: &[NaiveDate],
    resource_id: &str,
) -> Vec<ProjectGroup> {
    let mut groups: Vec<ProjectGroup> = Vec::new();
    let mut emitted: HashMap<&str, HashSet<usize>> = HashMap::new();

    for project in projects.iter().filter(|p| p.resource_id == resource_id) {
        let indices = active_indices(project, axis);
        if indices.is_empty() {
            continue;
        }

        let seen = emitted.entry(project.id.as_str()).or_default();
        for (start, end) in contiguous_runs(&indices) {
            if seen.contains(&start) {
                continue;
            }
            seen.extend(start..=end);
            groups.push(ProjectGroup {
                project: project.clone(),
                start_index: start as u32,
                end_index: end as u32,
                span: (end - start + 1) as u32,
            });
        }
    }

    groups.sort_by_key(|g| g.start_index);
    groups
}

// ---------------------------------------------------------------------------
// Overlap layering engine
// ---------------------------------------------------------------------------

/// Overlap-aware grouping: each run is assigned the smallest stacking layer
/// not occupied by an already-placed run with an intersecting index range.
/// Projects are processed in start-date order (stable for equal starts), so
/// earlier projects claim lower layers.
///
/// `has_divider_after` marks the final run of a project whose successor (by
/// start date) begins strictly after this project's end date.
pub fn layered_groups(
    projects: &[Project],
    axis: &[NaiveDate],
    resource_id: &str,
) -> Vec<LayeredGroup> {
    let mut own: Vec<&Project> = projects
        .iter()
        .filter(|p| p.resource_id == resource_id)
        .collect();
    own.sort_by_key(|p| p.start_date);

    let mut groups: Vec<LayeredGroup> = Vec::new();

    for (pos, project) in own.iter().enumerate() {
        let indices = active_indices(project, axis);
        if indices.is_empty() {
            continue;
        }

        let divider_after = own
            .get(pos + 1)
            .is_some_and(|next| next.start_date > project.end_date);

        let runs = contiguous_runs(&indices);
        let last = runs.len() - 1;
        for (run_pos, (start, end)) in runs.into_iter().enumerate() {
            let layer = lowest_free_layer(&groups, start as u32, end as u32);
            groups.push(LayeredGroup {
                project: (*project).clone(),
                start_index: start as u32,
                end_index: end as u32,
                span: (end - start + 1) as u32,
                layer,
                has_divider_after: divider_after && run_pos == last,
            });
        }
    }

    groups
}

/// Smallest layer index not claimed by any placed group whose inclusive
/// index range intersects `[start, end]`.
fn lowest_free_layer(placed: &[LayeredGroup], start: u32, end: u32) -> u32 {
    let mut layer = 0;
    loop {
        let taken = placed
            .iter()
            .any(|g| g.layer == layer && g.start_index <= end && g.end_index >= start);
        if !taken {
            return layer;
        }
        layer += 1;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
