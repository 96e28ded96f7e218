//! Critical Path Method scheduling core with Python bindings.
//!
//! The crate builds a validated task-precedence DAG from flat task records,
//! runs the forward/backward passes, and selects one critical path for
//! highlighting. Spreadsheet reading and PDF layout live in the Python host;
//! this side renders the Graphviz diagram and the text report.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::prelude::*;
use std::path::PathBuf;

mod config;
pub mod critical_path;
pub mod error;
pub mod graph;
pub mod logging;
mod models;
pub mod passes;
pub mod render;
pub mod schedule;

pub use config::{CpmConfig, DiagramConfig};
pub use critical_path::{
    best_critical_path, count_critical_paths, enumerate_critical_paths,
    enumerate_critical_paths_up_to, rank_critical_paths, select_critical_path, CriticalPath,
    PathRank,
};
pub use error::{CpmError, RenderError};
pub use graph::{TaskGraph, TaskId};
pub use models::{parse_duration, parse_predecessors, ScheduleResult, TaskRecord, TaskSchedule};
pub use passes::{forward_backward, ScheduleTimings, TaskTiming};
pub use render::{NetworkDiagram, Renderer, ReportTable};
pub use schedule::{compute_schedule, schedule_graph};

/// Compute the CPM schedule for a list of task records.
///
/// # Arguments
/// * `records` - Task records in spreadsheet order
/// * `config` - Pipeline configuration (defaults to silent)
///
/// # Returns
/// * ScheduleResult with per-task timings, the selected critical path and
///   the project finish time
///
/// # Raises
/// * DuplicateTaskError, UnknownPredecessorError, InvalidDurationError,
///   EmptyTaskNameError or CycleError for bad input (all subclass CpmError)
/// * InvariantViolationError if the computation itself is inconsistent
#[pyfunction]
#[pyo3(name = "compute_schedule", signature = (records, config=None))]
fn py_compute_schedule(
    records: Vec<TaskRecord>,
    config: Option<CpmConfig>,
) -> PyResult<ScheduleResult> {
    let config = config.unwrap_or_default();
    Ok(compute_schedule(&records, &config)?)
}

/// Split a predecessors cell on commas and semicolons.
#[pyfunction]
#[pyo3(name = "parse_predecessors")]
fn py_parse_predecessors(field: &str) -> Vec<String> {
    parse_predecessors(field)
}

/// Render the network diagram as Graphviz DOT source.
#[pyfunction]
#[pyo3(signature = (schedule, config=None))]
fn render_network_diagram(
    schedule: &ScheduleResult,
    config: Option<DiagramConfig>,
) -> PyResult<String> {
    let diagram = NetworkDiagram::new(config.unwrap_or_default());
    Ok(diagram.render(schedule)?)
}

/// Write the network diagram into `work_dir`.
///
/// # Arguments
/// * `schedule` - Result of compute_schedule
/// * `work_dir` - Directory for the diagram files (created if missing)
/// * `config` - Diagram styling and file naming
/// * `rasterize` - Also run Graphviz `dot` to produce an image
///
/// # Returns
/// * Path of the image when rasterizing, otherwise of the DOT file
///
/// # Raises
/// * RenderError if writing fails or Graphviz is missing
#[pyfunction]
#[pyo3(signature = (schedule, work_dir, config=None, rasterize=true))]
fn write_network_diagram(
    schedule: &ScheduleResult,
    work_dir: PathBuf,
    config: Option<DiagramConfig>,
    rasterize: bool,
) -> PyResult<PathBuf> {
    let diagram = NetworkDiagram::new(config.unwrap_or_default());
    let path = if rasterize {
        diagram.write_image(schedule, &work_dir)?
    } else {
        diagram.write_dot(schedule, &work_dir)?
    };
    Ok(path)
}

/// Render the plain-text schedule report.
#[pyfunction]
#[pyo3(signature = (schedule, include_input=true))]
fn render_report(schedule: &ScheduleResult, include_input: bool) -> PyResult<String> {
    let mut report = ReportTable::new();
    if !include_input {
        report = report.without_input();
    }
    Ok(report.render(schedule)?)
}

/// The cpm.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    let py = m.py();

    // Data types
    m.add_class::<TaskRecord>()?;
    m.add_class::<TaskSchedule>()?;
    m.add_class::<ScheduleResult>()?;

    // Config types
    m.add_class::<CpmConfig>()?;
    m.add_class::<DiagramConfig>()?;

    // Exceptions
    m.add("CpmError", py.get_type_bound::<error::py::CpmError>())?;
    m.add(
        "DuplicateTaskError",
        py.get_type_bound::<error::py::DuplicateTaskError>(),
    )?;
    m.add(
        "UnknownPredecessorError",
        py.get_type_bound::<error::py::UnknownPredecessorError>(),
    )?;
    m.add(
        "InvalidDurationError",
        py.get_type_bound::<error::py::InvalidDurationError>(),
    )?;
    m.add(
        "EmptyTaskNameError",
        py.get_type_bound::<error::py::EmptyTaskNameError>(),
    )?;
    m.add("CycleError", py.get_type_bound::<error::py::CycleError>())?;
    m.add(
        "InvariantViolationError",
        py.get_type_bound::<error::py::InvariantViolationError>(),
    )?;
    m.add("RenderError", py.get_type_bound::<error::py::RenderError>())?;

    // Algorithms
    m.add_function(wrap_pyfunction!(py_compute_schedule, m)?)?;
    m.add_function(wrap_pyfunction!(py_parse_predecessors, m)?)?;

    // Renderers
    m.add_function(wrap_pyfunction!(render_network_diagram, m)?)?;
    m.add_function(wrap_pyfunction!(write_network_diagram, m)?)?;
    m.add_function(wrap_pyfunction!(render_report, m)?)?;

    Ok(())
}
