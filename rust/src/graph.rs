//! Task graph construction and validation.
//!
//! Task names are mapped to dense integer IDs in declaration order so every
//! later stage works on plain vectors indexed by ID.

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use std::collections::VecDeque;

use crate::error::CpmError;
use crate::models::TaskRecord;

/// Dense task identifier (index into the graph's vectors).
pub type TaskId = u32;

/// Validated, immutable precedence DAG.
#[derive(Clone, Debug)]
pub struct TaskGraph {
    names: Vec<String>,
    index: FxHashMap<String, TaskId>,
    durations: Vec<Decimal>,
    predecessors: Vec<Vec<TaskId>>,
    successors: Vec<Vec<TaskId>>,
    topo_order: Vec<TaskId>,
}

impl TaskGraph {
    /// Build and validate a graph from raw task records.
    ///
    /// Checks run in a fixed order so the reported error is deterministic:
    /// names and durations per row, then predecessor references, then cycles.
    pub fn build(records: &[TaskRecord]) -> Result<Self, CpmError> {
        let n = records.len();
        let mut names = Vec::with_capacity(n);
        let mut index: FxHashMap<String, TaskId> =
            FxHashMap::with_capacity_and_hasher(n, Default::default());
        let mut durations = Vec::with_capacity(n);

        for (row, record) in records.iter().enumerate() {
            let name = record.name.trim();
            if name.is_empty() {
                return Err(CpmError::EmptyTaskName { row: row + 1 });
            }
            if record.duration < Decimal::ZERO {
                return Err(CpmError::InvalidDuration {
                    task: name.to_string(),
                    value: record.duration.to_string(),
                    reason: "must be non-negative".to_string(),
                });
            }
            if index.contains_key(name) {
                return Err(CpmError::DuplicateTask {
                    name: name.to_string(),
                });
            }
            index.insert(name.to_string(), row as TaskId);
            names.push(name.to_string());
            durations.push(record.duration);
        }

        let mut predecessors: Vec<Vec<TaskId>> = vec![Vec::new(); n];
        let mut successors: Vec<Vec<TaskId>> = vec![Vec::new(); n];

        for (id, record) in records.iter().enumerate() {
            for pred_name in &record.predecessors {
                let pred_name = pred_name.trim();
                if pred_name.is_empty() {
                    continue;
                }
                let Some(&pred) = index.get(pred_name) else {
                    return Err(CpmError::UnknownPredecessor {
                        task: names[id].clone(),
                        predecessor: pred_name.to_string(),
                    });
                };
                // Repeated names in one field are a single precedence relation
                if predecessors[id].contains(&pred) {
                    continue;
                }
                predecessors[id].push(pred);
                successors[pred as usize].push(id as TaskId);
            }
        }

        let topo_order = topological_sort(&names, &predecessors, &successors)?;

        Ok(Self {
            names,
            index,
            durations,
            predecessors,
            successors,
            topo_order,
        })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    #[inline]
    pub fn name(&self, id: TaskId) -> &str {
        &self.names[id as usize]
    }

    pub fn id(&self, name: &str) -> Option<TaskId> {
        self.index.get(name).copied()
    }

    #[inline]
    pub fn duration(&self, id: TaskId) -> Decimal {
        self.durations[id as usize]
    }

    #[inline]
    pub fn predecessors(&self, id: TaskId) -> &[TaskId] {
        &self.predecessors[id as usize]
    }

    #[inline]
    pub fn successors(&self, id: TaskId) -> &[TaskId] {
        &self.successors[id as usize]
    }

    /// Task IDs ordered so every predecessor precedes its dependents.
    pub fn topo_order(&self) -> &[TaskId] {
        &self.topo_order
    }

    /// All task IDs in declaration order.
    pub fn task_ids(&self) -> impl Iterator<Item = TaskId> {
        0..self.names.len() as TaskId
    }

    /// Tasks with no predecessors; together they act as the virtual start anchor.
    pub fn start_tasks(&self) -> impl Iterator<Item = TaskId> + '_ {
        self.task_ids()
            .filter(|&id| self.predecessors[id as usize].is_empty())
    }

    /// Tasks with no successors; together they act as the virtual finish anchor.
    pub fn finish_tasks(&self) -> impl Iterator<Item = TaskId> + '_ {
        self.task_ids()
            .filter(|&id| self.successors[id as usize].is_empty())
    }

    /// Precedence relations as (predecessor, task), grouped by task in declaration order.
    pub fn edges(&self) -> impl Iterator<Item = (TaskId, TaskId)> + '_ {
        self.task_ids().flat_map(move |id| {
            self.predecessors[id as usize]
                .iter()
                .map(move |&pred| (pred, id))
        })
    }

    #[cfg(test)]
    pub(crate) fn with_topo_order(mut self, order: Vec<TaskId>) -> Self {
        self.topo_order = order;
        self
    }
}

/// Kahn's algorithm over the predecessor counts.
///
/// Ready tasks are released in declaration order. Any task whose in-degree
/// never reaches zero sits on or behind a cycle and is reported.
fn topological_sort(
    names: &[String],
    predecessors: &[Vec<TaskId>],
    successors: &[Vec<TaskId>],
) -> Result<Vec<TaskId>, CpmError> {
    let mut in_degree: Vec<usize> = predecessors.iter().map(Vec::len).collect();
    let mut queue: VecDeque<TaskId> = in_degree
        .iter()
        .enumerate()
        .filter(|(_, &degree)| degree == 0)
        .map(|(id, _)| id as TaskId)
        .collect();

    let mut order = Vec::with_capacity(names.len());
    while let Some(id) = queue.pop_front() {
        order.push(id);
        for &succ in &successors[id as usize] {
            let degree = &mut in_degree[succ as usize];
            *degree -= 1;
            if *degree == 0 {
                queue.push_back(succ);
            }
        }
    }

    if order.len() != names.len() {
        let tasks = in_degree
            .iter()
            .enumerate()
            .filter(|(_, &degree)| degree > 0)
            .map(|(id, _)| names[id].clone())
            .collect();
        return Err(CpmError::Cycle { tasks });
    }

    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn record(name: &str, duration: Decimal, preds: &[&str]) -> TaskRecord {
        TaskRecord::new(
            name,
            duration,
            preds.iter().map(|p| p.to_string()).collect(),
        )
    }

    #[test]
    fn test_build_diamond() {
        let graph = TaskGraph::build(&[
            record("A", dec!(3), &[]),
            record("B", dec!(2), &["A"]),
            record("C", dec!(4), &["A"]),
            record("D", dec!(1), &["B", "C"]),
        ])
        .unwrap();

        assert_eq!(graph.len(), 4);
        let a = graph.id("A").unwrap();
        let d = graph.id("D").unwrap();
        assert_eq!(graph.successors(a).len(), 2);
        assert_eq!(graph.predecessors(d).len(), 2);
        assert_eq!(graph.start_tasks().collect::<Vec<_>>(), vec![a]);
        assert_eq!(graph.finish_tasks().collect::<Vec<_>>(), vec![d]);
        assert_eq!(graph.topo_order().first(), Some(&a));
        assert_eq!(graph.topo_order().last(), Some(&d));
    }

    #[test]
    fn test_topo_order_respects_edges_when_declared_out_of_order() {
        let graph = TaskGraph::build(&[
            record("finish", dec!(1), &["middle"]),
            record("middle", dec!(1), &["start"]),
            record("start", dec!(1), &[]),
        ])
        .unwrap();

        let names: Vec<&str> = graph.topo_order().iter().map(|&id| graph.name(id)).collect();
        assert_eq!(names, vec!["start", "middle", "finish"]);
    }

    #[test]
    fn test_duplicate_task() {
        let err = TaskGraph::build(&[record("A", dec!(1), &[]), record("A", dec!(2), &[])])
            .unwrap_err();
        assert_eq!(
            err,
            CpmError::DuplicateTask {
                name: "A".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_predecessor() {
        let err = TaskGraph::build(&[record("A", dec!(1), &["Z"])]).unwrap_err();
        assert_eq!(
            err,
            CpmError::UnknownPredecessor {
                task: "A".to_string(),
                predecessor: "Z".to_string()
            }
        );
    }

    #[test]
    fn test_negative_duration() {
        let err = TaskGraph::build(&[record("A", dec!(-2), &[])]).unwrap_err();
        assert!(matches!(err, CpmError::InvalidDuration { ref task, .. } if task == "A"));
    }

    #[test]
    fn test_zero_duration_allowed() {
        let graph = TaskGraph::build(&[record("milestone", dec!(0), &[])]).unwrap();
        assert_eq!(graph.duration(0), dec!(0));
    }

    #[test]
    fn test_empty_name() {
        let err = TaskGraph::build(&[record("A", dec!(1), &[]), record("  ", dec!(1), &[])])
            .unwrap_err();
        assert_eq!(err, CpmError::EmptyTaskName { row: 2 });
    }

    #[test]
    fn test_cycle_detected() {
        let err = TaskGraph::build(&[
            record("A", dec!(1), &["C"]),
            record("B", dec!(1), &["A"]),
            record("C", dec!(1), &["B"]),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            CpmError::Cycle {
                tasks: vec!["A".to_string(), "B".to_string(), "C".to_string()]
            }
        );
    }

    #[test]
    fn test_self_dependency_is_cycle() {
        let err = TaskGraph::build(&[record("A", dec!(1), &["A"])]).unwrap_err();
        assert!(matches!(err, CpmError::Cycle { .. }));
    }

    #[test]
    fn test_cycle_reports_only_unordered_tasks() {
        let err = TaskGraph::build(&[
            record("root", dec!(1), &[]),
            record("x", dec!(1), &["root", "y"]),
            record("y", dec!(1), &["x"]),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            CpmError::Cycle {
                tasks: vec!["x".to_string(), "y".to_string()]
            }
        );
    }

    #[test]
    fn test_repeated_predecessor_collapses() {
        let graph = TaskGraph::build(&[
            record("A", dec!(1), &[]),
            record("B", dec!(1), &["A", "A", " A "]),
        ])
        .unwrap();
        assert_eq!(graph.edges().count(), 1);
    }

    #[test]
    fn test_empty_graph() {
        let graph = TaskGraph::build(&[]).unwrap();
        assert!(graph.is_empty());
        assert!(graph.topo_order().is_empty());
    }
}
