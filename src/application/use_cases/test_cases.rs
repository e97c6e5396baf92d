use crate::application::use_cases::bug_report::UNPARSEABLE_OUTPUT;
use crate::application::use_cases::coverage::CoverageReport;
use crate::application::use_cases::model_invoker::ModelInvoker;
use crate::application::use_cases::prompt_builder::PromptBuilder;
use crate::domain::app_config::{CompanyContext, GenerationSettings};
use crate::domain::error::{AppError, Result};
use crate::domain::test_case::{TestCaseRequest, TestCaseResult};
use crate::domain::validation::required_fields_error;
use crate::infrastructure::response::normalize_model_output;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

const INCOMPLETE_TEST_CASES: &str = "AI did not return valid test cases. Please try again.";

const REQUIRED_FIELDS: [(&str, &str); 3] = [
    ("title", "Title"),
    ("description", "Description"),
    ("acceptance_criteria", "Acceptance criteria"),
];

pub struct TestCaseUseCase {
    invoker: Arc<ModelInvoker>,
    company: CompanyContext,
    generation: GenerationSettings,
}

impl TestCaseUseCase {
    pub fn new(
        invoker: Arc<ModelInvoker>,
        company: CompanyContext,
        generation: GenerationSettings,
    ) -> Self {
        Self {
            invoker,
            company,
            generation,
        }
    }

    pub async fn execute(&self, request: TestCaseRequest) -> Result<TestCaseResult> {
        request
            .validate()
            .map_err(|e| required_fields_error(&e, &REQUIRED_FIELDS))?;

        let request_id = Uuid::new_v4();
        tracing::info!(
            %request_id,
            deep = request.deep_analysis,
            files = request.files.len(),
            "Generating test cases"
        );

        let prompt = PromptBuilder::new(&self.company).test_cases(&request);
        let raw = self
            .invoker
            .invoke(&prompt, request.deep_analysis)
            .await
            .map_err(|e| {
                tracing::error!(%request_id, "Test case model call failed: {}", e);
                e
            })?;

        let normalized = normalize_model_output::<TestCaseResult>(&raw);
        if normalized.fell_back {
            tracing::warn!(%request_id, chars = raw.len(), "Test case output was not valid JSON");
            return Err(AppError::InvalidGeneration(UNPARSEABLE_OUTPUT.to_string()));
        }

        let result = normalized.into_value();
        if !result.is_complete() {
            tracing::warn!(%request_id, "Test case output missing summary or cases");
            return Err(AppError::InvalidGeneration(INCOMPLETE_TEST_CASES.to_string()));
        }

        let coverage = CoverageReport::evaluate(&request.acceptance_criteria, &result.test_cases);
        if coverage.has_gaps() {
            if self.generation.strict_coverage {
                tracing::warn!(%request_id, "Rejecting test cases: {}", coverage.describe());
                return Err(AppError::InvalidGeneration(format!(
                    "AI test cases do not map to the acceptance criteria ({}). Please try again.",
                    coverage.describe()
                )));
            }
            tracing::warn!(%request_id, "Coverage gaps accepted: {}", coverage.describe());
        }

        tracing::info!(
            %request_id,
            cases = result.test_cases.len(),
            criteria = coverage.declared.len(),
            "Test cases generated"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::app_config::ModelSettings;
    use crate::domain::test_case::TestCaseType;
    use crate::infrastructure::llm_clients::fake::FakeLLMClient;

    const TWO_CRITERIA: &str = "AC-1: a registered user can log in\nAC-2: five failed attempts lock the account";

    const MAPPED_CASES: &str = r#"{
  "summary": "Login and lockout coverage",
  "testCases": [
    {"id": "TC-001", "title": "Valid login", "type": "Functional", "priority": "High",
     "preconditions": ["User exists"], "steps": ["Open login", "Submit valid credentials"],
     "expectedResult": "Dashboard shown", "coverageTag": "AC-1"},
    {"id": "TC-002", "title": "Lockout", "type": "negative", "priority": "Critical",
     "preconditions": [], "steps": ["Submit wrong password five times"],
     "expectedResult": "Account locked", "testData": "wrong-pass", "coverageTag": "AC-2"}
  ]
}"#;

    const ONLY_AC1: &str = r#"{
  "summary": "Login coverage",
  "testCases": [
    {"id": "TC-001", "title": "Valid login", "type": "Functional", "priority": "High",
     "steps": ["Log in"], "expectedResult": "Dashboard", "coverageTag": "AC-1"}
  ]
}"#;

    fn use_case(client: Arc<FakeLLMClient>, strict_coverage: bool) -> TestCaseUseCase {
        let settings = ModelSettings {
            api_key: Some("test-key".to_string()),
            ..ModelSettings::default()
        };
        let invoker = Arc::new(ModelInvoker::new(client, settings));
        TestCaseUseCase::new(
            invoker,
            CompanyContext::default(),
            GenerationSettings { strict_coverage },
        )
    }

    fn request(criteria: &str) -> TestCaseRequest {
        TestCaseRequest {
            title: "Login".to_string(),
            description: "Registered users sign in with email and password".to_string(),
            acceptance_criteria: criteria.to_string(),
            deep_analysis: true,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_generates_mapped_cases_with_deep_tier() {
        let client = Arc::new(FakeLLMClient::replying(MAPPED_CASES));
        let result = use_case(client.clone(), true)
            .execute(request(TWO_CRITERIA))
            .await
            .unwrap();

        assert_eq!(result.test_cases.len(), 2);
        assert_eq!(result.test_cases[1].case_type, TestCaseType::Negative);
        assert_eq!(client.calls()[0].config.model, "gemini-2.5-pro");
        assert!(client.calls()[0].prompt.contains(TWO_CRITERIA));
    }

    #[tokio::test]
    async fn test_missing_fields_are_named_in_order() {
        let client = Arc::new(FakeLLMClient::replying(MAPPED_CASES));
        let req = TestCaseRequest {
            description: "something".to_string(),
            ..Default::default()
        };
        let err = use_case(client.clone(), true).execute(req).await.unwrap_err();

        assert_eq!(err.message(), "Title and Acceptance criteria are required.");
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unlisted_type_and_null_fields_keep_suite() {
        let client = Arc::new(FakeLLMClient::replying(
            r#"{"summary":"Login speed","testCases":[{"id":"TC-001","title":"Login under load",
               "type":"Performance","priority":"Medium","preconditions":null,"steps":["Log in"],
               "expectedResult":"Under 2s","testData":null,"coverageTag":"AC-1"}]}"#,
        ));
        let result = use_case(client, true)
            .execute(request("AC-1: login completes quickly"))
            .await
            .unwrap();

        let case = &result.test_cases[0];
        assert_eq!(case.case_type, TestCaseType::Other("Performance".to_string()));
        assert!(case.preconditions.is_empty());
        assert_eq!(case.test_data, None);
    }

    #[tokio::test]
    async fn test_empty_cases_is_invalid_generation() {
        let client = Arc::new(FakeLLMClient::replying(
            r#"{"summary":"Nothing","testCases":[]}"#,
        ));
        let err = use_case(client, true)
            .execute(request(TWO_CRITERIA))
            .await
            .unwrap_err();
        assert_eq!(
            err.message(),
            "AI did not return valid test cases. Please try again."
        );
    }

    #[tokio::test]
    async fn test_uncovered_criterion_rejected_when_strict() {
        let client = Arc::new(FakeLLMClient::replying(ONLY_AC1));
        let err = use_case(client, true)
            .execute(request(TWO_CRITERIA))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidGeneration(_)));
        assert!(err.message().contains("uncovered criteria: AC-2"));
    }

    #[tokio::test]
    async fn test_uncovered_criterion_accepted_when_lenient() {
        let client = Arc::new(FakeLLMClient::replying(ONLY_AC1));
        let result = use_case(client, false)
            .execute(request(TWO_CRITERIA))
            .await
            .unwrap();
        assert_eq!(result.test_cases.len(), 1);
    }

    #[tokio::test]
    async fn test_criteria_without_ids_skip_coverage() {
        let client = Arc::new(FakeLLMClient::replying(ONLY_AC1));
        let result = use_case(client, true)
            .execute(request("Users can log in"))
            .await
            .unwrap();
        assert_eq!(result.summary, "Login coverage");
    }
}
