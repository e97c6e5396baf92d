//! Rendering of generated results for review and hand-off.

pub mod clickup;
pub mod preview;

use crate::domain::bug_report::BugReportResult;
use crate::domain::error::{AppError, Result};
use crate::domain::test_case::TestCaseResult;
use crate::infrastructure::clipboard::ClipboardSink;
use clickup::{or_not_provided, TaskRow, STEP_SEPARATOR};
use preview::{truncation_note, PagePreview, PreviewTable, SummaryCard, SUMMARY_CARD_LIMIT};
use serde::Serialize;

pub use clickup::{csv_block, paste_block};

pub const COPY_FALLBACK_MESSAGE: &str = "Unable to copy. Please use Export ClickUp CSV instead.";

/// A generated result that can be exported as ClickUp tasks.
pub trait Exportable: Serialize {
    const CSV_FILENAME: &'static str;
    const JSON_FILENAME: &'static str;

    fn task_rows(&self) -> Vec<TaskRow>;
    fn page_preview(&self) -> PagePreview;
}

pub fn paste_text<T: Exportable>(item: &T) -> String {
    paste_block(&item.task_rows())
}

pub fn csv_text<T: Exportable>(item: &T) -> Result<String> {
    csv_block(&item.task_rows())
}

/// Pretty-printed JSON with two-space indentation and declaration field order.
pub fn json_text<T: Exportable>(item: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(item)?)
}

/// Copies the paste block. Any clipboard failure is reported with a pointer
/// to the CSV export.
pub fn copy_to_clipboard<T: Exportable>(item: &T, sink: &dyn ClipboardSink) -> Result<()> {
    sink.write_text(&paste_text(item)).map_err(|e| {
        tracing::warn!("Clipboard copy failed: {}", e);
        AppError::ClipboardUnavailable(COPY_FALLBACK_MESSAGE.to_string())
    })
}

impl Exportable for BugReportResult {
    const CSV_FILENAME: &'static str = "clickup-bug-report.csv";
    const JSON_FILENAME: &'static str = "bug-report.json";

    fn task_rows(&self) -> Vec<TaskRow> {
        let lines = [
            ("Severity", self.severity.to_string()),
            ("Environment", or_not_provided(&self.environment)),
            ("Expected Result", self.expected_result.clone()),
            ("Actual Result", self.actual_result.clone()),
            ("Impact", self.impact.clone()),
            ("Workaround", or_not_provided(&self.workaround)),
            ("Root Cause Hypothesis", self.root_cause_hypothesis.clone()),
            ("Attachments Summary", or_not_provided(&self.attachments_summary)),
            ("Steps", self.steps_to_reproduce.join(STEP_SEPARATOR)),
        ];
        vec![TaskRow::new(
            self.title.clone(),
            &lines,
            self.priority.to_string(),
            "Bug",
        )]
    }

    fn page_preview(&self) -> PagePreview {
        let card = SummaryCard::new(
            self.title.clone(),
            format!("Severity: {} • Priority: {}", self.severity, self.priority),
            &[
                ("Expected", self.expected_result.as_str()),
                ("Actual", self.actual_result.as_str()),
                ("Impact", self.impact.as_str()),
            ],
        );
        let row = vec![
            self.title.clone(),
            self.severity.to_string(),
            self.priority.to_string(),
            or_not_provided(&self.environment),
            self.expected_result.clone(),
            self.actual_result.clone(),
            self.impact.clone(),
            or_not_provided(&self.workaround),
            self.root_cause_hypothesis.clone(),
            or_not_provided(&self.attachments_summary),
            self.steps_to_reproduce.join(STEP_SEPARATOR),
        ];

        PagePreview {
            summary: None,
            cards: vec![card],
            note: None,
            table: PreviewTable::new(
                "Bug Report Preview Table",
                &[
                    "Title",
                    "Severity",
                    "Priority",
                    "Environment",
                    "Expected",
                    "Actual",
                    "Impact",
                    "Workaround",
                    "Root Cause",
                    "Attachments Summary",
                    "Steps to Reproduce",
                ],
                vec![row],
            ),
        }
    }
}

impl Exportable for TestCaseResult {
    const CSV_FILENAME: &'static str = "clickup-test-cases.csv";
    const JSON_FILENAME: &'static str = "test-cases.json";

    fn task_rows(&self) -> Vec<TaskRow> {
        self.test_cases
            .iter()
            .map(|case| {
                let lines = [
                    ("Test Case ID", case.id.clone()),
                    ("Type", case.case_type.to_string()),
                    ("Coverage", or_not_provided(case.coverage_tag.as_deref().unwrap_or(""))),
                    ("Preconditions", or_not_provided(&case.preconditions.join(" | "))),
                    ("Test Data", or_not_provided(case.test_data.as_deref().unwrap_or(""))),
                    ("Steps", case.steps.join(STEP_SEPARATOR)),
                    ("Expected Result", case.expected_result.clone()),
                ];
                TaskRow::new(
                    case.title.clone(),
                    &lines,
                    case.priority.clone(),
                    case.case_type.to_string(),
                )
            })
            .collect()
    }

    fn page_preview(&self) -> PagePreview {
        let cards = self
            .test_cases
            .iter()
            .take(SUMMARY_CARD_LIMIT)
            .map(|case| {
                SummaryCard::new(
                    format!("{}: {}", case.id, case.title),
                    format!("{} • {}", case.case_type, case.priority),
                    &[("Expected", case.expected_result.as_str())],
                )
            })
            .collect();

        let rows = self
            .test_cases
            .iter()
            .map(|case| {
                vec![
                    case.id.clone(),
                    case.title.clone(),
                    case.case_type.to_string(),
                    case.priority.clone(),
                    or_not_provided(&case.preconditions.join("; ")),
                    case.steps.join(STEP_SEPARATOR),
                    case.expected_result.clone(),
                    or_not_provided(case.coverage_tag.as_deref().unwrap_or("")),
                    or_not_provided(case.test_data.as_deref().unwrap_or("")),
                ]
            })
            .collect();

        PagePreview {
            summary: Some(self.summary.clone()),
            cards,
            note: truncation_note(self.test_cases.len()),
            table: PreviewTable::new(
                "Test Case Preview Table",
                &[
                    "ID",
                    "Title",
                    "Type",
                    "Priority",
                    "Preconditions",
                    "Steps",
                    "Expected Result",
                    "Coverage",
                    "Test Data",
                ],
                rows,
            ),
        }
    }
}
