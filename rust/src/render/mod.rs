//! Renderers that turn a computed schedule into diagrams and reports.
//!
//! Rasterizing and page layout stay with the host; these produce text
//! (Graphviz DOT, fixed-width tables) and write it where the caller says.

mod diagram;
mod report;

pub use diagram::{find_graphviz, rasterize, NetworkDiagram};
pub use report::ReportTable;

use rust_decimal::Decimal;

use crate::error::RenderError;
use crate::models::ScheduleResult;

/// Something that can render a schedule to text.
pub trait Renderer {
    fn render(&self, schedule: &ScheduleResult) -> Result<String, RenderError>;
}

/// Print a decimal without trailing zeros (`3.0` -> `3`, `2.50` -> `2.5`).
pub fn format_decimal(value: Decimal) -> String {
    value.normalize().to_string()
}
