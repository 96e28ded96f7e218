//! Core data types: input task records and computed schedule output.

use pyo3::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::CpmError;

/// Split a predecessors field on `,` or `;`, trimming names and dropping blanks.
pub fn parse_predecessors(field: &str) -> Vec<String> {
    field
        .split([',', ';'])
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a duration cell (plain or scientific notation) into a decimal.
///
/// Sign is not checked here; the graph builder rejects negative durations so
/// typed and textual records share one rule.
pub fn parse_duration(task: &str, text: &str) -> Result<Decimal, CpmError> {
    let trimmed = text.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| CpmError::InvalidDuration {
            task: task.to_string(),
            value: trimmed.to_string(),
            reason: "not a number".to_string(),
        })
}

/// One raw task row as supplied by the spreadsheet reader.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct TaskRecord {
    #[pyo3(get, set)]
    pub name: String,
    #[pyo3(get, set)]
    pub duration: Decimal,
    #[pyo3(get, set)]
    pub predecessors: Vec<String>,
}

impl TaskRecord {
    pub fn new(name: impl Into<String>, duration: Decimal, predecessors: Vec<String>) -> Self {
        Self {
            name: name.into(),
            duration,
            predecessors,
        }
    }

    /// Build a record from the `Task`, `Duration` and `Predecessors` columns.
    pub fn from_fields(name: &str, duration: &str, predecessors: &str) -> Result<Self, CpmError> {
        let name = name.trim();
        Ok(Self {
            name: name.to_string(),
            duration: parse_duration(name, duration)?,
            predecessors: parse_predecessors(predecessors),
        })
    }
}

#[pymethods]
impl TaskRecord {
    /// Durations are read through their string form, so ints, floats, strings
    /// and `decimal.Decimal` are all accepted without binary rounding.
    #[new]
    #[pyo3(signature = (name, duration, predecessors=None))]
    fn py_new(
        name: String,
        duration: &Bound<'_, PyAny>,
        predecessors: Option<Vec<String>>,
    ) -> PyResult<Self> {
        let text = duration.str()?;
        let duration = parse_duration(&name, &text.to_cow()?)?;
        Ok(Self::new(name, duration, predecessors.unwrap_or_default()))
    }

    #[staticmethod]
    #[pyo3(name = "from_fields")]
    fn py_from_fields(name: &str, duration: &str, predecessors: &str) -> PyResult<Self> {
        Ok(Self::from_fields(name, duration, predecessors)?)
    }

    fn __repr__(&self) -> String {
        format!(
            "TaskRecord(name={:?}, duration={}, predecessors={:?})",
            self.name, self.duration, self.predecessors
        )
    }
}

/// Computed schedule row for one task.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct TaskSchedule {
    #[pyo3(get)]
    pub name: String,
    #[pyo3(get)]
    pub duration: Decimal,
    #[pyo3(get)]
    pub predecessors: Vec<String>,
    #[pyo3(get)]
    pub es: Decimal,
    #[pyo3(get)]
    pub ef: Decimal,
    #[pyo3(get)]
    pub ls: Decimal,
    #[pyo3(get)]
    pub lf: Decimal,
    #[pyo3(get)]
    pub slack: Decimal,
    #[pyo3(get)]
    pub is_critical: bool,
}

#[pymethods]
impl TaskSchedule {
    fn __repr__(&self) -> String {
        format!(
            "TaskSchedule(name={:?}, es={}, ef={}, ls={}, lf={}, slack={})",
            self.name, self.es, self.ef, self.ls, self.lf, self.slack
        )
    }
}

/// Full output of one schedule computation.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScheduleResult {
    /// Per-task rows in input order.
    #[pyo3(get)]
    pub rows: Vec<TaskSchedule>,
    /// Selected critical path, start to finish.
    #[pyo3(get)]
    pub critical_path: Vec<String>,
    /// Number of zero-slack start-to-finish paths, saturating at `u128::MAX`.
    #[pyo3(get)]
    pub critical_path_count: u128,
    #[pyo3(get)]
    pub project_start: Decimal,
    #[pyo3(get)]
    pub project_finish: Decimal,
    /// Precedence relations as (predecessor, task) in input order.
    #[pyo3(get)]
    pub edges: Vec<(String, String)>,
}

impl ScheduleResult {
    pub fn row(&self, name: &str) -> Option<&TaskSchedule> {
        self.rows.iter().find(|row| row.name == name)
    }

    /// Consecutive pairs along the selected critical path.
    pub fn critical_edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.critical_path
            .windows(2)
            .map(|pair| (pair[0].as_str(), pair[1].as_str()))
    }
}

#[pymethods]
impl ScheduleResult {
    #[pyo3(name = "row")]
    fn py_row(&self, name: &str) -> Option<TaskSchedule> {
        self.row(name).cloned()
    }

    fn on_critical_path(&self, name: &str) -> bool {
        self.critical_path.iter().any(|task| task == name)
    }

    fn __repr__(&self) -> String {
        format!(
            "ScheduleResult(tasks={}, project_finish={}, critical_path={:?})",
            self.rows.len(),
            self.project_finish,
            self.critical_path
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_predecessors_mixed_delimiters() {
        assert_eq!(parse_predecessors("A, B;C ; ,D"), vec!["A", "B", "C", "D"]);
        assert!(parse_predecessors("").is_empty());
        assert!(parse_predecessors("   ").is_empty());
    }

    #[test]
    fn test_parse_duration_forms() {
        assert_eq!(parse_duration("a", " 3 ").unwrap(), dec!(3));
        assert_eq!(parse_duration("a", "2.5").unwrap(), dec!(2.5));
        assert_eq!(parse_duration("a", "1e1").unwrap(), dec!(10));
        assert_eq!(parse_duration("a", "-1").unwrap(), dec!(-1));
    }

    #[test]
    fn test_parse_duration_rejects_text() {
        let err = parse_duration("a", "three").unwrap_err();
        assert!(matches!(
            err,
            CpmError::InvalidDuration { ref task, ref value, .. } if task == "a" && value == "three"
        ));
    }

    #[test]
    fn test_record_from_fields() {
        let record = TaskRecord::from_fields(" D ", "1", "B, C").unwrap();
        assert_eq!(record.name, "D");
        assert_eq!(record.duration, dec!(1));
        assert_eq!(record.predecessors, vec!["B", "C"]);
    }

    #[test]
    fn test_critical_edges() {
        let result = ScheduleResult {
            critical_path: vec!["a".to_string(), "c".to_string(), "d".to_string()],
            ..Default::default()
        };
        let edges: Vec<_> = result.critical_edges().collect();
        assert_eq!(edges, vec![("a", "c"), ("c", "d")]);
    }
}
