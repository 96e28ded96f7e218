//! Configuration types for schedule computation and diagram rendering.

use pyo3::prelude::*;

/// Configuration for the schedule pipeline.
#[pyclass]
#[derive(Clone, Debug, Default)]
pub struct CpmConfig {
    /// Verbosity level: 0=silent, 1=stages, 2=tasks, 3=paths.
    #[pyo3(get, set)]
    pub verbosity: u8,
}

#[pymethods]
impl CpmConfig {
    #[new]
    #[pyo3(signature = (verbosity=0))]
    fn new(verbosity: u8) -> Self {
        Self { verbosity }
    }

    fn __repr__(&self) -> String {
        format!("CpmConfig(verbosity={})", self.verbosity)
    }
}

/// Styling and file naming for the network diagram.
///
/// The directory diagrams are written to is not part of this config; callers
/// pass it to each write so no renderer holds a process-wide output location.
#[pyclass]
#[derive(Clone, Debug)]
pub struct DiagramConfig {
    /// Fill color for tasks on the selected critical path (and its edges).
    #[pyo3(get, set)]
    pub critical_color: String,
    /// Fill color for every other task.
    #[pyo3(get, set)]
    pub neutral_color: String,
    /// Graphviz rank direction: "LR", "TB", "RL" or "BT".
    #[pyo3(get, set)]
    pub rank_direction: String,
    /// File name (without extension) for written diagrams. Must not contain
    /// path separators.
    #[pyo3(get, set)]
    pub file_stem: String,
    /// Graphviz output format used when rasterizing; also the image extension.
    #[pyo3(get, set)]
    pub image_format: String,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            critical_color: "red".to_string(),
            neutral_color: "lightblue".to_string(),
            rank_direction: "LR".to_string(),
            file_stem: "network_diagram".to_string(),
            image_format: "png".to_string(),
        }
    }
}

#[pymethods]
impl DiagramConfig {
    #[new]
    #[pyo3(signature = (
        critical_color=None,
        neutral_color=None,
        rank_direction=None,
        file_stem=None,
        image_format=None
    ))]
    fn new(
        critical_color: Option<String>,
        neutral_color: Option<String>,
        rank_direction: Option<String>,
        file_stem: Option<String>,
        image_format: Option<String>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            critical_color: critical_color.unwrap_or(defaults.critical_color),
            neutral_color: neutral_color.unwrap_or(defaults.neutral_color),
            rank_direction: rank_direction.unwrap_or(defaults.rank_direction),
            file_stem: file_stem.unwrap_or(defaults.file_stem),
            image_format: image_format.unwrap_or(defaults.image_format),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "DiagramConfig(critical_color={:?}, neutral_color={:?}, rank_direction={:?})",
            self.critical_color, self.neutral_color, self.rank_direction
        )
    }
}
