//! Forward and backward passes over a validated task graph.

use rust_decimal::Decimal;

use crate::error::CpmError;
use crate::graph::{TaskGraph, TaskId};

/// Per-task timing bounds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskTiming {
    /// Earliest possible start time (from forward pass).
    pub earliest_start: Decimal,
    /// Earliest possible finish time (from forward pass).
    pub earliest_finish: Decimal,
    /// Latest allowable start time (from backward pass).
    pub latest_start: Decimal,
    /// Latest allowable finish time (from backward pass).
    pub latest_finish: Decimal,
    /// Slack = latest_start - earliest_start.
    pub slack: Decimal,
}

impl TaskTiming {
    /// Exact comparison; decimal arithmetic leaves no rounding residue.
    pub fn is_critical(&self) -> bool {
        self.slack.is_zero()
    }
}

/// Output of both passes, indexed by [`TaskId`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScheduleTimings {
    pub timings: Vec<TaskTiming>,
    /// Always zero; kept explicit for the report contract.
    pub project_start: Decimal,
    pub project_finish: Decimal,
}

impl ScheduleTimings {
    #[inline]
    pub fn get(&self, id: TaskId) -> &TaskTiming {
        &self.timings[id as usize]
    }
}

fn overflow(graph: &TaskGraph, id: TaskId) -> CpmError {
    CpmError::InvalidDuration {
        task: graph.name(id).to_string(),
        value: graph.duration(id).to_string(),
        reason: "schedule time exceeds the supported numeric range".to_string(),
    }
}

fn imprecise(graph: &TaskGraph, id: TaskId) -> CpmError {
    CpmError::InvalidDuration {
        task: graph.name(id).to_string(),
        value: graph.duration(id).to_string(),
        reason: "schedule time exceeds decimal precision".to_string(),
    }
}

/// `start + duration`, refusing results that overflow or round.
fn finish_after(graph: &TaskGraph, id: TaskId, start: Decimal) -> Result<Decimal, CpmError> {
    let duration = graph.duration(id);
    let finish = start
        .checked_add(duration)
        .ok_or_else(|| overflow(graph, id))?;
    if finish.checked_sub(start) != Some(duration) {
        return Err(imprecise(graph, id));
    }
    Ok(finish)
}

/// `finish - duration`, refusing results that overflow or round.
fn start_before(graph: &TaskGraph, id: TaskId, finish: Decimal) -> Result<Decimal, CpmError> {
    let duration = graph.duration(id);
    let start = finish
        .checked_sub(duration)
        .ok_or_else(|| overflow(graph, id))?;
    if finish.checked_sub(start) != Some(duration) {
        return Err(imprecise(graph, id));
    }
    Ok(start)
}

fn missing(stage: &str, graph: &TaskGraph, id: TaskId, neighbor: TaskId) -> CpmError {
    CpmError::InvariantViolation(format!(
        "{stage} pass reached {:?} before {:?}",
        graph.name(id),
        graph.name(neighbor)
    ))
}

/// Compute ES/EF/LS/LF and slack for every task.
///
/// Start tasks begin at 0 and finish tasks are held to the project finish
/// time, which is the same as hanging them off zero-duration virtual anchors.
pub fn forward_backward(graph: &TaskGraph) -> Result<ScheduleTimings, CpmError> {
    let n = graph.len();
    let order = graph.topo_order();

    let mut seen = vec![false; n];
    for &id in order {
        if (id as usize) >= n || std::mem::replace(&mut seen[id as usize], true) {
            return Err(CpmError::InvariantViolation(format!(
                "topological order repeats or invents task id {id}"
            )));
        }
    }
    if order.len() != n {
        return Err(CpmError::InvariantViolation(format!(
            "topological order covers {} of {} tasks; graph is not acyclic",
            order.len(),
            n
        )));
    }

    // Forward pass
    let mut earliest_finish: Vec<Option<Decimal>> = vec![None; n];
    let mut earliest_start: Vec<Decimal> = vec![Decimal::ZERO; n];

    for &id in order {
        let mut start = Decimal::ZERO;
        for &pred in graph.predecessors(id) {
            let finish = earliest_finish[pred as usize]
                .ok_or_else(|| missing("forward", graph, id, pred))?;
            start = start.max(finish);
        }
        let finish = finish_after(graph, id, start)?;
        earliest_start[id as usize] = start;
        earliest_finish[id as usize] = Some(finish);
    }

    let project_finish = graph
        .finish_tasks()
        .filter_map(|id| earliest_finish[id as usize])
        .max()
        .unwrap_or(Decimal::ZERO);

    // Backward pass
    let mut latest_start: Vec<Option<Decimal>> = vec![None; n];
    let mut timings: Vec<TaskTiming> = vec![TaskTiming::default(); n];

    for &id in order.iter().rev() {
        let mut latest_finish = project_finish;
        for &succ in graph.successors(id) {
            let start =
                latest_start[succ as usize].ok_or_else(|| missing("backward", graph, id, succ))?;
            latest_finish = latest_finish.min(start);
        }
        let start = start_before(graph, id, latest_finish)?;
        latest_start[id as usize] = Some(start);

        let idx = id as usize;
        let slack = start - earliest_start[idx];
        if slack < Decimal::ZERO {
            return Err(CpmError::InvariantViolation(format!(
                "task {:?} has negative slack {slack}",
                graph.name(id)
            )));
        }
        timings[idx] = TaskTiming {
            earliest_start: earliest_start[idx],
            earliest_finish: earliest_finish[idx].unwrap_or(earliest_start[idx]),
            latest_start: start,
            latest_finish,
            slack,
        };
    }

    Ok(ScheduleTimings {
        timings,
        project_start: Decimal::ZERO,
        project_finish,
    })
}
