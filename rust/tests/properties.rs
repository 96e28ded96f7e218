use std::collections::HashSet;

use cpm_rust::{
    best_critical_path, compute_schedule, count_critical_paths, enumerate_critical_paths,
    forward_backward, select_critical_path, CpmConfig, CpmError, ScheduleResult, TaskGraph,
    TaskRecord,
};
use proptest::prelude::*;
use rust_decimal::Decimal;

// Acyclic by construction: task N may only depend on tasks 0..N-1.
fn dag_strategy(max_tasks: usize) -> impl Strategy<Value = Vec<TaskRecord>> {
    (1..=max_tasks).prop_flat_map(|num_tasks| {
        let durations = proptest::collection::vec(0u32..20, num_tasks);
        let deps = proptest::collection::vec(
            proptest::collection::vec(any::<usize>(), 0..4),
            num_tasks,
        );
        (durations, deps).prop_map(|(durations, raw_deps)| {
            durations
                .into_iter()
                .zip(raw_deps)
                .enumerate()
                .map(|(i, (duration, potential))| {
                    let mut preds: Vec<String> = Vec::new();
                    if i > 0 {
                        for dep in potential {
                            let name = format!("task_{:02}", dep % i);
                            if !preds.contains(&name) {
                                preds.push(name);
                            }
                        }
                    }
                    TaskRecord::new(format!("task_{:02}", i), Decimal::from(duration), preds)
                })
                .collect()
        })
    })
}

fn schedule(records: &[TaskRecord]) -> ScheduleResult {
    compute_schedule(records, &CpmConfig::default()).unwrap()
}

proptest! {
    #[test]
    fn prop_timing_bounds_hold(records in dag_strategy(12)) {
        let result = schedule(&records);
        prop_assert_eq!(result.project_start, Decimal::ZERO);
        for row in &result.rows {
            prop_assert!(row.es <= row.ef);
            prop_assert!(row.ls <= row.lf);
            prop_assert!(row.slack >= Decimal::ZERO);
            prop_assert_eq!(row.slack, row.ls - row.es);
            prop_assert_eq!(row.slack, row.lf - row.ef);
            prop_assert!(row.lf <= result.project_finish);
            prop_assert_eq!(row.is_critical, row.slack.is_zero());
        }
    }

    #[test]
    fn prop_finish_is_max_sink_finish(records in dag_strategy(12)) {
        let result = schedule(&records);
        let has_successor: HashSet<&str> =
            result.edges.iter().map(|(pred, _)| pred.as_str()).collect();
        let sink_finish = result
            .rows
            .iter()
            .filter(|row| !has_successor.contains(row.name.as_str()))
            .map(|row| row.ef)
            .max()
            .unwrap_or(Decimal::ZERO);
        prop_assert_eq!(result.project_finish, sink_finish);
    }

    #[test]
    fn prop_selected_path_is_critical_chain(records in dag_strategy(12)) {
        let result = schedule(&records);
        prop_assert!(result.critical_path_count >= 1);
        let path = &result.critical_path;
        prop_assert!(!path.is_empty());

        let first = result.row(&path[0]).unwrap();
        prop_assert_eq!(first.es, Decimal::ZERO);
        prop_assert!(first.predecessors.is_empty());
        let last = result.row(&path[path.len() - 1]).unwrap();
        prop_assert_eq!(last.ef, result.project_finish);
        prop_assert!(!result.edges.iter().any(|(pred, _)| pred == &last.name));

        for pair in path.windows(2) {
            let pred = result.row(&pair[0]).unwrap();
            let task = result.row(&pair[1]).unwrap();
            prop_assert!(pred.is_critical && task.is_critical);
            prop_assert!(task.predecessors.contains(&pred.name));
            prop_assert_eq!(pred.ef, task.es);
        }
    }

    #[test]
    fn prop_sweep_agrees_with_exhaustive_ranking(records in dag_strategy(12)) {
        let graph = TaskGraph::build(&records).unwrap();
        let timings = forward_backward(&graph).unwrap();
        let candidates = enumerate_critical_paths(&graph, &timings);
        prop_assert_eq!(count_critical_paths(&graph, &timings), candidates.len() as u128);
        prop_assert_eq!(
            best_critical_path(&graph, &timings),
            select_critical_path(&graph, candidates)
        );
    }

    #[test]
    fn prop_pipeline_is_idempotent(records in dag_strategy(12)) {
        prop_assert_eq!(schedule(&records), schedule(&records));
    }

    #[test]
    fn prop_declaration_order_does_not_change_path(records in dag_strategy(10)) {
        let mut reversed = records.clone();
        reversed.reverse();
        let forward = schedule(&records);
        let backward = schedule(&reversed);
        prop_assert_eq!(&forward.critical_path, &backward.critical_path);
        prop_assert_eq!(forward.project_finish, backward.project_finish);
    }

    #[test]
    fn prop_back_edge_makes_cycle(records in dag_strategy(8)) {
        // Any edge from the last task back to one of its ancestors closes a loop
        let mut records = records;
        let last = records.len() - 1;
        if let Some(ancestor) = records[last].predecessors.first().cloned() {
            let last_name = records[last].name.clone();
            let target = records.iter_mut().find(|r| r.name == ancestor).unwrap();
            target.predecessors.push(last_name);
            let err = compute_schedule(&records, &CpmConfig::default()).unwrap_err();
            let is_cycle = matches!(err, CpmError::Cycle { .. });
            prop_assert!(is_cycle);
        }
    }
}
