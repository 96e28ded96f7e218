//! Enumeration of zero-slack start-to-finish paths.

use rust_decimal::Decimal;

use crate::graph::{TaskGraph, TaskId};
use crate::passes::ScheduleTimings;

/// One start-to-finish chain of critical tasks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CriticalPath {
    pub tasks: Vec<TaskId>,
    /// Sum of task durations along the path.
    pub total_duration: Decimal,
}

impl CriticalPath {
    pub fn new(graph: &TaskGraph, tasks: Vec<TaskId>) -> Self {
        let total_duration: Decimal = tasks.iter().map(|&id| graph.duration(id)).sum();
        Self {
            tasks,
            total_duration,
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn names<'g>(&self, graph: &'g TaskGraph) -> Vec<&'g str> {
        self.tasks.iter().map(|&id| graph.name(id)).collect()
    }
}

/// An edge P -> T is critical when both ends are critical and T starts the
/// instant P finishes.
pub fn is_critical_edge(timings: &ScheduleTimings, pred: TaskId, task: TaskId) -> bool {
    let p = timings.get(pred);
    let t = timings.get(task);
    p.is_critical() && t.is_critical() && p.earliest_finish == t.earliest_start
}

/// Critical successors of every task, sorted by task name.
pub(super) fn critical_successors(graph: &TaskGraph, timings: &ScheduleTimings) -> Vec<Vec<TaskId>> {
    graph
        .task_ids()
        .map(|id| {
            let mut next: Vec<TaskId> = graph
                .successors(id)
                .iter()
                .copied()
                .filter(|&succ| is_critical_edge(timings, id, succ))
                .collect();
            next.sort_by(|&a, &b| graph.name(a).cmp(graph.name(b)));
            next
        })
        .collect()
}

/// Critical start tasks, sorted by task name.
pub(super) fn critical_starts(graph: &TaskGraph, timings: &ScheduleTimings) -> Vec<TaskId> {
    let mut starts: Vec<TaskId> = graph
        .start_tasks()
        .filter(|&id| timings.get(id).is_critical())
        .collect();
    starts.sort_by(|&a, &b| graph.name(a).cmp(graph.name(b)));
    starts
}

/// Number of critical start-to-finish paths, without listing them.
///
/// Counts are summed backwards over the topological order, so the cost is
/// linear in the size of the graph even when the number of paths is not.
/// The count saturates at `u128::MAX`.
pub fn count_critical_paths(graph: &TaskGraph, timings: &ScheduleTimings) -> u128 {
    let next = critical_successors(graph, timings);
    let mut ways: Vec<u128> = vec![0; graph.len()];

    for &id in graph.topo_order().iter().rev() {
        if !timings.get(id).is_critical() {
            continue;
        }
        ways[id as usize] = if graph.successors(id).is_empty() {
            1
        } else {
            next[id as usize]
                .iter()
                .fold(0u128, |acc, &succ| acc.saturating_add(ways[succ as usize]))
        };
    }

    critical_starts(graph, timings)
        .into_iter()
        .fold(0u128, |acc, id| acc.saturating_add(ways[id as usize]))
}

/// List every maximal path from a start task to a finish task made only of
/// critical tasks joined by critical edges.
///
/// Paths come out in lexical order of their task names, so the result is a
/// pure function of the graph regardless of declaration order. The walk is
/// iterative; long chains do not grow the call stack.
///
/// The number of paths can grow exponentially with the number of parallel
/// phases. Use [`enumerate_critical_paths_up_to`] when the graph is not known
/// to be small.
pub fn enumerate_critical_paths(
    graph: &TaskGraph,
    timings: &ScheduleTimings,
) -> Vec<CriticalPath> {
    enumerate_critical_paths_up_to(graph, timings, usize::MAX)
}

/// Like [`enumerate_critical_paths`], but stops after `limit` paths.
pub fn enumerate_critical_paths_up_to(
    graph: &TaskGraph,
    timings: &ScheduleTimings,
    limit: usize,
) -> Vec<CriticalPath> {
    let next = critical_successors(graph, timings);

    let mut paths = Vec::new();
    for start in critical_starts(graph, timings) {
        let mut path: Vec<TaskId> = vec![start];
        let mut cursors: Vec<usize> = vec![0];

        while let Some(&node) = path.last() {
            if paths.len() >= limit {
                return paths;
            }
            if graph.successors(node).is_empty() {
                paths.push(CriticalPath::new(graph, path.clone()));
                path.pop();
                cursors.pop();
                continue;
            }

            let depth = path.len() - 1;
            match next[node as usize].get(cursors[depth]) {
                Some(&child) => {
                    cursors[depth] += 1;
                    path.push(child);
                    cursors.push(0);
                }
                None => {
                    path.pop();
                    cursors.pop();
                }
            }
        }
    }
    paths
}
