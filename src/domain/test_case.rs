use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

use crate::domain::lenient::null_as_default;
use crate::domain::uploaded_file::UploadedFile;
use crate::domain::validation::not_blank;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub description: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub acceptance_criteria: String,
    #[serde(default)]
    pub prerequisites: Option<String>,
    #[serde(default)]
    pub additional_info: Option<String>,
    #[serde(default)]
    pub deep_analysis: bool,
    #[serde(default)]
    pub files: Vec<UploadedFile>,
}

/// Known categories parse case-insensitively; any other label is kept as
/// written so one unusual case never discards the suite.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(from = "String", into = "String")]
pub enum TestCaseType {
    #[default]
    Functional,
    Boundary,
    Negative,
    Security,
    Usability,
    Compatibility,
    Other(String),
}

impl fmt::Display for TestCaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Functional => write!(f, "Functional"),
            Self::Boundary => write!(f, "Boundary"),
            Self::Negative => write!(f, "Negative"),
            Self::Security => write!(f, "Security"),
            Self::Usability => write!(f, "Usability"),
            Self::Compatibility => write!(f, "Compatibility"),
            Self::Other(label) => write!(f, "{}", label),
        }
    }
}

impl From<String> for TestCaseType {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "functional" | "" => Self::Functional,
            "boundary" => Self::Boundary,
            "negative" => Self::Negative,
            "security" => Self::Security,
            "usability" => Self::Usability,
            "compatibility" => Self::Compatibility,
            _ => Self::Other(value.trim().to_string()),
        }
    }
}

impl From<TestCaseType> for String {
    fn from(value: TestCaseType) -> Self {
        value.to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TestCaseItem {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub case_type: TestCaseType,
    #[serde(deserialize_with = "null_as_default")]
    pub priority: String,
    #[serde(deserialize_with = "null_as_default")]
    pub preconditions: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub steps: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub expected_result: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage_tag: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TestCaseResult {
    #[serde(deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(deserialize_with = "null_as_default")]
    pub test_cases: Vec<TestCaseItem>,
}

impl TestCaseResult {
    /// A usable result has a summary and at least one test case.
    pub fn is_complete(&self) -> bool {
        !self.summary.trim().is_empty() && !self.test_cases.is_empty()
    }
}
