//! Fixed-width text report of the schedule.

use crate::error::RenderError;
use crate::models::ScheduleResult;

use super::{format_decimal, Renderer};

const TITLE: &str = "CPM Project Report";

/// Plain-text report: project summary, input data and the computed schedule.
#[derive(Clone, Debug, Default)]
pub struct ReportTable {
    /// Leave out the "Input Task Data" section.
    pub hide_input: bool,
}

impl ReportTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn without_input(mut self) -> Self {
        self.hide_input = true;
        self
    }
}

fn format_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}

/// Lay out rows under headers with ` | ` separators, padding every column to
/// its widest cell.
fn table(headers: &[&str], rows: &[Vec<String>]) -> Vec<String> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format_row(headers.iter().copied(), &widths));
    lines.push(
        widths
            .iter()
            .map(|&width| "-".repeat(width))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    for row in rows {
        lines.push(format_row(row.iter().map(String::as_str), &widths));
    }
    lines
}

impl Renderer for ReportTable {
    fn render(&self, schedule: &ScheduleResult) -> Result<String, RenderError> {
        let mut lines = vec![
            TITLE.to_string(),
            "=".repeat(TITLE.len()),
            String::new(),
            format!("Project Duration: {}", format_decimal(schedule.project_finish)),
            format!("Critical Path: {}", schedule.critical_path.join(" → ")),
        ];

        if !self.hide_input {
            let input: Vec<Vec<String>> = schedule
                .rows
                .iter()
                .map(|row| {
                    vec![
                        row.name.clone(),
                        format_decimal(row.duration),
                        row.predecessors.join(", "),
                    ]
                })
                .collect();
            lines.push(String::new());
            lines.push("Input Task Data".to_string());
            lines.extend(table(&["Task", "Duration", "Predecessors"], &input));
        }

        let computed: Vec<Vec<String>> = schedule
            .rows
            .iter()
            .map(|row| {
                vec![
                    row.name.clone(),
                    format_decimal(row.duration),
                    format_decimal(row.es),
                    format_decimal(row.ef),
                    format_decimal(row.ls),
                    format_decimal(row.lf),
                    format_decimal(row.slack),
                    if row.is_critical { "yes" } else { "no" }.to_string(),
                ]
            })
            .collect();
        lines.push(String::new());
        lines.push("Schedule".to_string());
        lines.extend(table(
            &["Task", "Duration", "ES", "EF", "LS", "LF", "Slack", "Critical"],
            &computed,
        ));

        let mut report = lines.join("\n");
        report.push('\n');
        Ok(report)
    }
}
