use crate::application::use_cases::model_invoker::ModelInvoker;
use crate::application::use_cases::prompt_builder::PromptBuilder;
use crate::domain::app_config::CompanyContext;
use crate::domain::bug_report::{BugReportRequest, BugReportResult};
use crate::domain::error::{AppError, Result};
use crate::domain::validation::required_fields_error;
use crate::infrastructure::response::normalize_model_output;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

pub const UNPARSEABLE_OUTPUT: &str = "AI response could not be parsed as JSON. Please try again.";
const INCOMPLETE_BUG_REPORT: &str = "AI did not return a valid bug report. Please try again.";

pub struct BugReportUseCase {
    invoker: Arc<ModelInvoker>,
    company: CompanyContext,
}

impl BugReportUseCase {
    pub fn new(invoker: Arc<ModelInvoker>, company: CompanyContext) -> Self {
        Self { invoker, company }
    }

    pub async fn execute(&self, request: BugReportRequest) -> Result<BugReportResult> {
        request
            .validate()
            .map_err(|e| required_fields_error(&e, &[("what_happened", "What happened")]))?;

        let request_id = Uuid::new_v4();
        tracing::info!(
            %request_id,
            deep = request.deep_analysis,
            files = request.files.len(),
            "Generating bug report"
        );

        let prompt = PromptBuilder::new(&self.company).bug_report(&request);
        let raw = self
            .invoker
            .invoke(&prompt, request.deep_analysis)
            .await
            .map_err(|e| {
                tracing::error!(%request_id, "Bug report model call failed: {}", e);
                e
            })?;

        let normalized = normalize_model_output::<BugReportResult>(&raw);
        if normalized.fell_back {
            tracing::warn!(%request_id, chars = raw.len(), "Bug report output was not valid JSON");
            return Err(AppError::InvalidGeneration(UNPARSEABLE_OUTPUT.to_string()));
        }

        let report = normalized.into_value();
        if !report.is_complete() {
            tracing::warn!(%request_id, "Bug report output missing title or steps");
            return Err(AppError::InvalidGeneration(INCOMPLETE_BUG_REPORT.to_string()));
        }

        tracing::info!(
            %request_id,
            steps = report.steps_to_reproduce.len(),
            severity = %report.severity,
            "Bug report generated"
        );
        Ok(report)
    }
}
