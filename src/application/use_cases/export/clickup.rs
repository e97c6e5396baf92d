//! ClickUp task import formats: tab-separated paste block and CSV.

use crate::domain::error::{AppError, Result};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use once_cell::sync::Lazy;
use regex::Regex;

pub const TASK_HEADER: [&str; 5] = ["Task Name", "Description", "Priority", "Status", "Tags"];
pub const DEFAULT_STATUS: &str = "To Do";
pub const NOT_PROVIDED: &str = "N/A";
pub const STEP_SEPARATOR: &str = " -> ";

static LINE_BREAKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r?\n|\r").unwrap());

/// One ClickUp task. The description packs the remaining fields as
/// `Label: value` lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub task_name: String,
    pub description: String,
    pub priority: String,
    pub status: String,
    pub tags: String,
}

impl TaskRow {
    pub fn new(
        task_name: impl Into<String>,
        description_lines: &[(&str, String)],
        priority: impl Into<String>,
        tags: impl Into<String>,
    ) -> Self {
        let description = description_lines
            .iter()
            .map(|(label, value)| format!("{}: {}", label, value))
            .collect::<Vec<_>>()
            .join("\n");

        Self {
            task_name: task_name.into(),
            description,
            priority: priority.into(),
            status: DEFAULT_STATUS.to_string(),
            tags: tags.into(),
        }
    }

    pub fn cells(&self) -> [&str; 5] {
        [
            self.task_name.as_str(),
            self.description.as_str(),
            self.priority.as_str(),
            self.status.as_str(),
            self.tags.as_str(),
        ]
    }
}

/// Substitutes `N/A` for blank values.
pub fn or_not_provided(value: &str) -> String {
    if value.trim().is_empty() {
        NOT_PROVIDED.to_string()
    } else {
        value.to_string()
    }
}

/// Header plus one tab-joined line per row. Cells are written verbatim, so
/// the description keeps its line breaks.
pub fn paste_block(rows: &[TaskRow]) -> String {
    std::iter::once(TASK_HEADER.join("\t"))
        .chain(rows.iter().map(|row| row.cells().join("\t")))
        .collect::<Vec<_>>()
        .join("\n")
}

fn flatten_cell(value: &str) -> String {
    LINE_BREAKS.replace_all(value, " ").trim().to_string()
}

/// Header plus one fully quoted record per row, without a trailing newline.
pub fn csv_block(rows: &[TaskRow]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for row in rows {
        let record: Vec<String> = row.cells().iter().map(|cell| flatten_cell(cell)).collect();
        writer
            .write_record(&record)
            .map_err(|e| AppError::Internal(format!("Failed to write CSV record: {}", e)))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("Failed to flush CSV: {}", e)))?;
    let body = String::from_utf8(bytes)
        .map_err(|e| AppError::Internal(format!("CSV is not valid UTF-8: {}", e)))?;

    let mut out = TASK_HEADER.join(",");
    if !body.is_empty() {
        out.push('\n');
        out.push_str(body.trim_end_matches('\n'));
    }
    Ok(out)
}
