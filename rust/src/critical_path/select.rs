//! Deterministic choice of one critical path among equally valid candidates.

use rust_decimal::Decimal;
use std::cmp::Ordering;

use crate::graph::{TaskGraph, TaskId};
use crate::passes::ScheduleTimings;

use super::enumerate::{critical_starts, critical_successors, CriticalPath};

/// Sort key for candidate paths. Lower ranks win:
/// 1. greatest total duration,
/// 2. then most tasks,
/// 3. then lexically smallest sequence of task names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRank<'g> {
    pub total_duration: Decimal,
    pub node_count: usize,
    pub names: Vec<&'g str>,
}

impl<'g> PathRank<'g> {
    pub fn of(graph: &'g TaskGraph, path: &CriticalPath) -> Self {
        Self {
            total_duration: path.total_duration,
            node_count: path.len(),
            names: path.names(graph),
        }
    }
}

impl Ord for PathRank<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .total_duration
            .cmp(&self.total_duration)
            .then(other.node_count.cmp(&self.node_count))
            .then_with(|| self.names.cmp(&other.names))
    }
}

impl PartialOrd for PathRank<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Order candidates best-first.
///
/// Durations are compared explicitly even though true critical paths share
/// one span: paths padded by zero-duration tasks tie on duration and are
/// split by node count instead.
pub fn rank_critical_paths(graph: &TaskGraph, candidates: &mut [CriticalPath]) {
    candidates.sort_by_cached_key(|path| PathRank::of(graph, path));
}

/// Pick the single path to highlight, or `None` when there are no candidates.
pub fn select_critical_path(
    graph: &TaskGraph,
    candidates: Vec<CriticalPath>,
) -> Option<CriticalPath> {
    candidates
        .into_iter()
        .map(|path| (PathRank::of(graph, &path), path))
        .min_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(_, path)| path)
}

/// Best critical chain from a task to a finish task.
#[derive(Clone, Copy, Debug)]
struct Suffix {
    next: Option<TaskId>,
    total_duration: Decimal,
    node_count: usize,
}

/// Pick the best continuation among `options` using the [`PathRank`] order.
///
/// Suffixes starting at distinct tasks differ in their first name, so the
/// lexical rule only needs to look at the first task of each.
fn best_of(
    graph: &TaskGraph,
    best: &[Option<Suffix>],
    options: &[TaskId],
) -> Option<(TaskId, Suffix)> {
    options
        .iter()
        .filter_map(|&id| best[id as usize].map(|suffix| (id, suffix)))
        .min_by(|(a, sa), (b, sb)| {
            sb.total_duration
                .cmp(&sa.total_duration)
                .then(sb.node_count.cmp(&sa.node_count))
                .then_with(|| graph.name(*a).cmp(graph.name(*b)))
        })
}

/// Select the same path as [`select_critical_path`] over every candidate,
/// without enumerating them.
///
/// Prefixing a task to two suffixes preserves their [`PathRank`] order, so
/// the best path from each task extends the best path from one of its
/// critical successors. One sweep backwards over the topological order is
/// enough.
pub fn best_critical_path(graph: &TaskGraph, timings: &ScheduleTimings) -> Option<CriticalPath> {
    let next = critical_successors(graph, timings);
    let mut best: Vec<Option<Suffix>> = vec![None; graph.len()];

    for &id in graph.topo_order().iter().rev() {
        if !timings.get(id).is_critical() {
            continue;
        }
        let duration = graph.duration(id);
        best[id as usize] = if graph.successors(id).is_empty() {
            Some(Suffix {
                next: None,
                total_duration: duration,
                node_count: 1,
            })
        } else {
            best_of(graph, &best, &next[id as usize]).map(|(succ, tail)| Suffix {
                next: Some(succ),
                total_duration: tail.total_duration + duration,
                node_count: tail.node_count + 1,
            })
        };
    }

    let (start, _) = best_of(graph, &best, &critical_starts(graph, timings))?;
    let mut tasks = vec![start];
    let mut cursor = best[start as usize].and_then(|suffix| suffix.next);
    while let Some(id) = cursor {
        tasks.push(id);
        cursor = best[id as usize].and_then(|suffix| suffix.next);
    }
    Some(CriticalPath::new(graph, tasks))
}
