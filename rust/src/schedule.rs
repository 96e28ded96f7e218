//! End-to-end schedule computation: build, passes, selection.

use crate::config::CpmConfig;
use crate::critical_path::{
    best_critical_path, count_critical_paths, enumerate_critical_paths_up_to, rank_critical_paths,
};
use crate::error::CpmError;
use crate::graph::TaskGraph;
use crate::logging::VERBOSITY_PATHS;
use crate::models::{ScheduleResult, TaskRecord, TaskSchedule};
use crate::passes::forward_backward;
use crate::{log_path, log_stage, log_task};

/// Most candidate paths listed at path-level verbosity.
const MAX_LOGGED_CANDIDATES: usize = 50;

/// Validate the records and compute the full schedule.
///
/// Fails before any pass runs if the records do not form a valid DAG; on
/// success every field of the result is populated.
pub fn compute_schedule(
    records: &[TaskRecord],
    config: &CpmConfig,
) -> Result<ScheduleResult, CpmError> {
    let graph = TaskGraph::build(records)?;
    log_stage!(
        config.verbosity,
        "graph built: {} tasks, {} precedence edges",
        graph.len(),
        graph.edges().count()
    );
    schedule_graph(&graph, config)
}

/// Compute the schedule for an already validated graph.
pub fn schedule_graph(graph: &TaskGraph, config: &CpmConfig) -> Result<ScheduleResult, CpmError> {
    let verbosity = config.verbosity;
    let timings = forward_backward(graph)?;
    log_stage!(
        verbosity,
        "project finish: {}",
        timings.project_finish.normalize()
    );

    let mut rows = Vec::with_capacity(graph.len());
    for id in graph.task_ids() {
        let timing = timings.get(id);
        log_task!(
            verbosity,
            "{}: ES={} EF={} LS={} LF={} slack={}",
            graph.name(id),
            timing.earliest_start,
            timing.earliest_finish,
            timing.latest_start,
            timing.latest_finish,
            timing.slack
        );
        rows.push(TaskSchedule {
            name: graph.name(id).to_string(),
            duration: graph.duration(id),
            predecessors: graph
                .predecessors(id)
                .iter()
                .map(|&pred| graph.name(pred).to_string())
                .collect(),
            es: timing.earliest_start,
            ef: timing.earliest_finish,
            ls: timing.latest_start,
            lf: timing.latest_finish,
            slack: timing.slack,
            is_critical: timing.is_critical(),
        });
    }

    let critical_path_count = count_critical_paths(graph, &timings);
    if verbosity >= VERBOSITY_PATHS {
        let mut shown = enumerate_critical_paths_up_to(graph, &timings, MAX_LOGGED_CANDIDATES);
        rank_critical_paths(graph, &mut shown);
        for (rank, candidate) in shown.iter().enumerate() {
            log_path!(
                verbosity,
                "candidate #{}: {} (duration {}, {} tasks)",
                rank + 1,
                candidate.names(graph).join(" -> "),
                candidate.total_duration,
                candidate.len()
            );
        }
        if critical_path_count > shown.len() as u128 {
            log_path!(
                verbosity,
                "{} more candidates not listed",
                critical_path_count - shown.len() as u128
            );
        }
    }

    let selected = best_critical_path(graph, &timings);
    if !graph.is_empty() && selected.is_none() {
        return Err(CpmError::InvariantViolation(
            "no zero-slack path connects a start task to a finish task".to_string(),
        ));
    }

    let critical_path: Vec<String> = selected
        .map(|path| {
            path.names(graph)
                .into_iter()
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    log_stage!(
        verbosity,
        "selected critical path from {} candidates: {}",
        critical_path_count,
        critical_path.join(" -> ")
    );

    let edges = graph
        .edges()
        .map(|(pred, task)| (graph.name(pred).to_string(), graph.name(task).to_string()))
        .collect();

    Ok(ScheduleResult {
        rows,
        critical_path,
        critical_path_count,
        project_start: timings.project_start,
        project_finish: timings.project_finish,
        edges,
    })
}
