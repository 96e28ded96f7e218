//! Slack analysis and critical path selection.
//!
//! Critical tasks joined by tight edges form a subgraph whose start-to-finish
//! paths are the candidates. Counting and selection run as sweeps over that
//! subgraph; enumeration lists the candidates themselves and is only used
//! where the list is small or capped.

mod enumerate;
mod select;

pub use enumerate::{
    count_critical_paths, enumerate_critical_paths, enumerate_critical_paths_up_to,
    is_critical_edge, CriticalPath,
};
pub use select::{best_critical_path, rank_critical_paths, select_critical_path, PathRank};
