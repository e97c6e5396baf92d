use crate::domain::app_config::CompanyContext;
use crate::domain::bug_report::BugReportRequest;
use crate::domain::test_case::TestCaseRequest;
use crate::domain::uploaded_file::UploadedFile;

pub const MAX_FILE_PROMPT_CHARS: usize = 8000;
const NOT_PROVIDED: &str = "N/A";
const NO_FILES: &str = "None";
const FILE_SEPARATOR: &str = "\n\n---\n\n";

const BUG_REPORT_SCHEMA: &str = r#"{
  "title": "string",
  "severity": "Low|Medium|High|Critical",
  "priority": "P3|P2|P1|P0",
  "environment": "string",
  "stepsToReproduce": ["string"],
  "expectedResult": "string",
  "actualResult": "string",
  "impact": "string",
  "workaround": "string",
  "rootCauseHypothesis": "string",
  "attachmentsSummary": "string"
}"#;

const TEST_CASE_SCHEMA: &str = r#"{
  "summary": "string",
  "testCases": [
    {
      "id": "TC-001",
      "title": "string",
      "type": "Functional|Boundary|Negative|Security|Usability|Compatibility",
      "priority": "Low|Medium|High|Critical",
      "preconditions": ["string"],
      "steps": ["string"],
      "expectedResult": "string",
      "testData": "string",
      "coverageTag": "which acceptance criteria this covers"
    }
  ]
}"#;

/// Renders generation prompts. Output depends only on the request and the
/// company context it was built with.
pub struct PromptBuilder<'a> {
    company: &'a CompanyContext,
}

impl<'a> PromptBuilder<'a> {
    pub fn new(company: &'a CompanyContext) -> Self {
        Self { company }
    }

    pub fn company_context(&self) -> String {
        let sections = [
            format!("Company context: {}", self.company.name),
            format!(
                "QA standards and conventions: {}",
                self.company.qa_standards.join("; ")
            ),
            format!(
                "Company services/products to align with: {}",
                self.company.services.join("; ")
            ),
            format!(
                "Additional company prompt guidance: {}",
                self.company.guidance
            ),
            "Prioritize terminology, workflows, and risk framing that match this company context."
                .to_string(),
        ];
        sections.join("\n")
    }

    pub fn bug_report(&self, request: &BugReportRequest) -> String {
        let optional_details = request
            .optional_fields
            .labelled()
            .iter()
            .map(|(label, value)| format!("{}: {}", label, value.unwrap_or(NOT_PROVIDED)))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"You are an expert QA lead. Convert the incident details into a high-quality bug report inspired by IEEE 829 style.

{context}

Return STRICT JSON with this schema:
{schema}

Rules:
- Steps must be reproducible.
- Keep language factual and concise.
- Do not include markdown.

What happened:
{narrative}

Optional details:
{optional_details}

Supporting File Text:
{files}"#,
            context = self.company_context(),
            schema = BUG_REPORT_SCHEMA,
            narrative = request.what_happened,
            optional_details = optional_details,
            files = supporting_files_text(&request.files),
        )
    }

    pub fn test_cases(&self, request: &TestCaseRequest) -> String {
        format!(
            r#"You are a senior QA engineer. Generate professional test cases using ISO/IEC/IEEE 29119 mindset.

{context}

Return STRICT JSON with this schema:
{schema}

Rules:
- Create at least 8 high-quality test cases.
- Include boundary, negative, and security-focused tests.
- Keep steps executable and specific.
- Map each test case to explicit acceptance criteria IDs (AC-1, AC-2, ...).
- Do not use vague text like "implicit" in coverageTag.
- Ensure every acceptance criterion has at least one mapped test case.
- Do not include markdown, only JSON.

User Input:
Title: {title}
Description: {description}
Acceptance Criteria:
{criteria}
Prerequisites: {prerequisites}
Additional Information: {additional}

Supporting File Text:
{files}"#,
            context = self.company_context(),
            schema = TEST_CASE_SCHEMA,
            title = request.title,
            description = request.description,
            criteria = request.acceptance_criteria,
            prerequisites = or_not_provided(request.prerequisites.as_deref()),
            additional = or_not_provided(request.additional_info.as_deref()),
            files = supporting_files_text(&request.files),
        )
    }
}

fn or_not_provided(value: Option<&str>) -> &str {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(NOT_PROVIDED)
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// Files that yielded text, each with a name/type header, or "None".
pub fn supporting_files_text(files: &[UploadedFile]) -> String {
    let blocks: Vec<String> = files
        .iter()
        .filter(|file| !file.extracted_text.is_empty())
        .map(|file| {
            format!(
                "File: {}\nType: {}\nExtracted text:\n{}",
                file.name,
                file.mime_type,
                truncate_chars(&file.extracted_text, MAX_FILE_PROMPT_CHARS)
            )
        })
        .collect();

    if blocks.is_empty() {
        NO_FILES.to_string()
    } else {
        blocks.join(FILE_SEPARATOR)
    }
}
