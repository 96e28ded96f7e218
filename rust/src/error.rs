//! Error types for schedule computation and rendering.

use pyo3::PyErr;
use thiserror::Error;

/// Errors raised while building or scheduling a task graph.
///
/// Everything except [`CpmError::InvariantViolation`] is an input problem the
/// caller can fix by correcting the task records.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CpmError {
    #[error("Duplicate task name: {name}")]
    DuplicateTask { name: String },

    #[error("Task {task:?} references unknown predecessor {predecessor:?}")]
    UnknownPredecessor { task: String, predecessor: String },

    #[error("Task {task:?} has invalid duration {value:?}: {reason}")]
    InvalidDuration {
        task: String,
        value: String,
        reason: String,
    },

    #[error("Task name is empty at row {row}")]
    EmptyTaskName { row: usize },

    #[error("Circular dependency detected among tasks: {}", .tasks.join(", "))]
    Cycle { tasks: Vec<String> },

    #[error("Internal invariant violated: {0}")]
    InvariantViolation(String),
}

impl CpmError {
    /// True for validation failures caused by the task records themselves.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, CpmError::InvariantViolation(_))
    }
}

/// Errors from the diagram and report writers.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "Graphviz is not installed or 'dot' is not on your PATH. \
         Install it from https://graphviz.org/download/ and add it to PATH"
    )]
    GraphvizMissing,

    #[error("Graphviz 'dot' failed with {status}: {stderr}")]
    GraphvizFailed { status: String, stderr: String },

    #[error("Invalid diagram {field} {value:?}: must be a plain file name")]
    InvalidFileName { field: &'static str, value: String },
}

impl RenderError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        RenderError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

/// Python exception hierarchy exposed by the extension module.
pub mod py {
    use pyo3::create_exception;
    use pyo3::exceptions::{PyOSError, PyRuntimeError, PyValueError};

    create_exception!(rust, CpmError, PyValueError, "Invalid task input.");
    create_exception!(rust, DuplicateTaskError, CpmError);
    create_exception!(rust, UnknownPredecessorError, CpmError);
    create_exception!(rust, InvalidDurationError, CpmError);
    create_exception!(rust, EmptyTaskNameError, CpmError);
    create_exception!(rust, CycleError, CpmError);
    create_exception!(
        rust,
        InvariantViolationError,
        PyRuntimeError,
        "Internal consistency failure in the schedule computation."
    );
    create_exception!(rust, RenderError, PyOSError);
}

impl From<CpmError> for PyErr {
    fn from(err: CpmError) -> Self {
        let msg = err.to_string();
        match err {
            CpmError::DuplicateTask { .. } => py::DuplicateTaskError::new_err(msg),
            CpmError::UnknownPredecessor { .. } => py::UnknownPredecessorError::new_err(msg),
            CpmError::InvalidDuration { .. } => py::InvalidDurationError::new_err(msg),
            CpmError::EmptyTaskName { .. } => py::EmptyTaskNameError::new_err(msg),
            CpmError::Cycle { .. } => py::CycleError::new_err(msg),
            CpmError::InvariantViolation(_) => py::InvariantViolationError::new_err(msg),
        }
    }
}

impl From<RenderError> for PyErr {
    fn from(err: RenderError) -> Self {
        py::RenderError::new_err(err.to_string())
    }
}
