use std::io::{self, Read, Write};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use resplan_engine::model::{CalendarState, DateRange, Project, ResourceLayout};
use resplan_engine::{calendar, editor, grouping, stats, validator};

// ---------------------------------------------------------------------------
// Request / Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
enum Request {
    /// Overlap-aware layout for every resource in the snapshot.
    Layout {
        state: CalendarState,
        range: DateRange,
    },
    /// Contiguous (no-overlap) groups for a single resource.
    #[serde(rename_all = "camelCase")]
    Groups {
        state: CalendarState,
        range: DateRange,
        resource_id: String,
    },
    /// Per-resource and combined work-day statistics.
    Stats {
        state: CalendarState,
        range: DateRange,
    },
    /// Portfolio analytics over a project collection.
    Portfolio { projects: Vec<Project> },
    /// Remove calendar dates from one project, splitting it as needed.
    #[serde(rename_all = "camelCase")]
    RemoveDays {
        projects: Vec<Project>,
        project_id: String,
        dates: Vec<NaiveDate>,
    },
    /// Remove one date from every covering project of a resource.
    #[serde(rename_all = "camelCase")]
    ClearDay {
        projects: Vec<Project>,
        resource_id: String,
        date: NaiveDate,
    },
    /// Delete a resource, cascading to its projects and leave.
    #[serde(rename_all = "camelCase")]
    DeleteResource {
        state: CalendarState,
        resource_id: String,
    },
    Validate { state: CalendarState },
}

#[derive(Debug, Serialize)]
struct OkResponse<T: Serialize> {
    ok: bool,
    data: T,
}

#[derive(Debug, Serialize)]
struct ErrResponse {
    ok: bool,
    error: String,
}

#[derive(Debug, thiserror::Error)]
enum RequestError {
    #[error("Failed to read stdin: {0}")]
    Stdin(#[from] io::Error),
    #[error("Invalid JSON input: {0}")]
    BadRequest(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn write_ok<T: Serialize>(data: T) {
    let resp = OkResponse { ok: true, data };
    let json = serde_json::to_string(&resp).unwrap_or_else(|e| {
        format!("{{\"ok\":false,\"error\":\"serialization error: {}\"}}", e)
    });
    println!("{}", json);
    let _ = io::stdout().flush();
}

fn write_err(msg: impl std::fmt::Display) -> ! {
    let resp = ErrResponse {
        ok: false,
        error: msg.to_string(),
    };
    let json = serde_json::to_string(&resp).unwrap_or_else(|_| {
        "{\"ok\":false,\"error\":\"double serialization error\"}".to_string()
    });
    println!("{}", json);
    let _ = io::stdout().flush();
    std::process::exit(1);
}

fn read_request() -> Result<Request, RequestError> {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    Ok(serde_json::from_str(&input)?)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    let request = match read_request() {
        Ok(r) => r,
        Err(e) => write_err(e),
    };

    match request {
        Request::Layout { state, range } => {
            let axis = calendar::date_axis(&range);
            let layouts: Vec<ResourceLayout> = state
                .resources
                .iter()
                .map(|r| ResourceLayout {
                    resource_id: r.id.clone(),
                    groups: grouping::layered_groups(&state.projects, &axis, &r.id),
                })
                .collect();
            write_ok(layouts);
        }
        Request::Groups {
            state,
            range,
            resource_id,
        } => {
            let axis = calendar::date_axis(&range);
            write_ok(grouping::contiguous_groups(&state.projects, &axis, &resource_id));
        }
        Request::Stats { state, range } => {
            write_ok(stats::team_stats(&state, &range));
        }
        Request::Portfolio { projects } => {
            write_ok(stats::portfolio_stats(&projects));
        }
        Request::RemoveDays {
            projects,
            project_id,
            dates,
        } => {
            write_ok(editor::remove_project_days(&projects, &project_id, &dates));
        }
        Request::ClearDay {
            projects,
            resource_id,
            date,
        } => {
            write_ok(editor::clear_day_work(&projects, &resource_id, date));
        }
        Request::DeleteResource { state, resource_id } => {
            write_ok(state.without_resource(&resource_id));
        }
        Request::Validate { state } => {
            write_ok(validator::validate(&state));
        }
    }
}
