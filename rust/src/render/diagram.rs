//! Graphviz network diagram with the selected critical path highlighted.

use rustc_hash::FxHashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::DiagramConfig;
use crate::error::RenderError;
use crate::models::{ScheduleResult, TaskSchedule};

use super::{format_decimal, Renderer};

/// Escape text for use inside a double-quoted DOT string.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Accept `value` only as a single file name component.
fn file_part<'a>(field: &'static str, value: &'a str) -> Result<&'a str, RenderError> {
    let invalid = value.is_empty()
        || value == "."
        || value == ".."
        || value
            .chars()
            .any(|c| c == '/' || c == '\\' || c == '\0' || std::path::is_separator(c));
    if invalid {
        return Err(RenderError::InvalidFileName {
            field,
            value: value.to_string(),
        });
    }
    Ok(value)
}

fn node_label(row: &TaskSchedule) -> String {
    [
        escape(&row.name),
        "-----------------".to_string(),
        format!("ES: {} | EF: {}", format_decimal(row.es), format_decimal(row.ef)),
        format!("LS: {} | LF: {}", format_decimal(row.ls), format_decimal(row.lf)),
        format!("Slack: {}", format_decimal(row.slack)),
    ]
    .join("\\n")
}

/// Renders the task network as a Graphviz `digraph`.
#[derive(Clone, Debug, Default)]
pub struct NetworkDiagram {
    pub config: DiagramConfig,
}

impl NetworkDiagram {
    pub fn new(config: DiagramConfig) -> Self {
        Self { config }
    }

    /// Write `<work_dir>/<file_stem>.dot`, creating the directory if needed.
    ///
    /// The stem must be a plain file name, so nothing lands outside `work_dir`.
    pub fn write_dot(
        &self,
        schedule: &ScheduleResult,
        work_dir: &Path,
    ) -> Result<PathBuf, RenderError> {
        let stem = file_part("file_stem", &self.config.file_stem)?;
        fs::create_dir_all(work_dir).map_err(|e| RenderError::io(work_dir, e))?;
        let path = work_dir.join(format!("{stem}.dot"));
        fs::write(&path, self.render(schedule)?).map_err(|e| RenderError::io(&path, e))?;
        Ok(path)
    }

    /// Write the DOT file and rasterize it with Graphviz in the configured format.
    pub fn write_image(
        &self,
        schedule: &ScheduleResult,
        work_dir: &Path,
    ) -> Result<PathBuf, RenderError> {
        file_part("image_format", &self.config.image_format)?;
        let dot_file = self.write_dot(schedule, work_dir)?;
        rasterize(&dot_file, &self.config.image_format)
    }
}

impl Renderer for NetworkDiagram {
    fn render(&self, schedule: &ScheduleResult) -> Result<String, RenderError> {
        let on_path: FxHashSet<&str> = schedule.critical_path.iter().map(String::as_str).collect();
        let path_edges: FxHashSet<(&str, &str)> = schedule.critical_edges().collect();
        let critical_color = escape(&self.config.critical_color);
        let neutral_color = escape(&self.config.neutral_color);

        let mut lines = vec![
            "digraph cpm {".to_string(),
            format!("    rankdir=\"{}\";", escape(&self.config.rank_direction)),
            "    node [shape=box, style=filled];".to_string(),
        ];

        for row in &schedule.rows {
            let color = if on_path.contains(row.name.as_str()) {
                &critical_color
            } else {
                &neutral_color
            };
            lines.push(format!(
                "    \"{}\" [label=\"{}\", fillcolor=\"{}\"];",
                escape(&row.name),
                node_label(row),
                color
            ));
        }

        for (pred, task) in &schedule.edges {
            let edge = format!("    \"{}\" -> \"{}\"", escape(pred), escape(task));
            if path_edges.contains(&(pred.as_str(), task.as_str())) {
                lines.push(format!("{edge} [color=\"{critical_color}\", penwidth=2];"));
            } else {
                lines.push(format!("{edge};"));
            }
        }

        lines.push("}".to_string());
        let mut dot = lines.join("\n");
        dot.push('\n');
        Ok(dot)
    }
}

/// Locate the Graphviz `dot` executable on PATH.
pub fn find_graphviz() -> Result<PathBuf, RenderError> {
    which::which("dot").map_err(|_| RenderError::GraphvizMissing)
}

/// Run `dot -T<format>` on a DOT file, writing the image next to it.
pub fn rasterize(dot_file: &Path, format: &str) -> Result<PathBuf, RenderError> {
    let format = file_part("image_format", format)?;
    let dot = find_graphviz()?;
    let output = dot_file.with_extension(format);
    let result = Command::new(&dot)
        .arg(format!("-T{format}"))
        .arg(dot_file)
        .arg("-o")
        .arg(&output)
        .output()
        .map_err(|e| RenderError::io(&dot, e))?;

    if !result.status.success() {
        return Err(RenderError::GraphvizFailed {
            status: result.status.to_string(),
            stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
        });
    }
    Ok(output)
}
