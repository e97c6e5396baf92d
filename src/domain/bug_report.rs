use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use crate::domain::lenient::null_as_default;
use crate::domain::uploaded_file::UploadedFile;
use crate::domain::validation::not_blank;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase")]
pub struct BugReportRequest {
    #[serde(default, alias = "narrative")]
    #[validate(custom(function = "not_blank"))]
    pub what_happened: String,
    #[serde(default)]
    pub deep_analysis: bool,
    #[serde(default)]
    pub optional_fields: OptionalFields,
    #[serde(default)]
    pub files: Vec<UploadedFile>,
}

/// Optional incident details. A slot counts as present only when non-blank.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OptionalFields {
    pub environment: Option<String>,
    pub bug_type_category: Option<String>,
    pub workaround: Option<String>,
    pub preconditions: Option<String>,
    pub affected_module: Option<String>,
    pub impact_business_risk: Option<String>,
    pub reproducibility: Option<String>,
    pub test_data: Option<String>,
    pub system_logs: Option<String>,
}

impl OptionalFields {
    /// Labelled slots in prompt order; blank values come back as `None`.
    pub fn labelled(&self) -> [(&'static str, Option<&str>); 9] {
        fn present(value: &Option<String>) -> Option<&str> {
            value.as_deref().map(str::trim).filter(|v| !v.is_empty())
        }

        [
            ("Environment", present(&self.environment)),
            ("Bug Type / Category", present(&self.bug_type_category)),
            ("Workaround", present(&self.workaround)),
            ("Preconditions", present(&self.preconditions)),
            ("Affected Module", present(&self.affected_module)),
            ("Impact / Business Risk", present(&self.impact_business_risk)),
            ("Reproducibility", present(&self.reproducibility)),
            ("Test Data", present(&self.test_data)),
            ("System Logs", present(&self.system_logs)),
        ]
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(try_from = "String", into = "String")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
            Self::Critical => write!(f, "Critical"),
        }
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(format!("Unknown severity: {}", s)),
        }
    }
}

impl TryFrom<String> for Severity {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Severity> for String {
    fn from(value: Severity) -> Self {
        value.to_string()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(try_from = "String", into = "String")]
pub enum Priority {
    P3,
    #[default]
    P2,
    P1,
    P0,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::P3 => write!(f, "P3"),
            Self::P2 => write!(f, "P2"),
            Self::P1 => write!(f, "P1"),
            Self::P0 => write!(f, "P0"),
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "P3" => Ok(Self::P3),
            "P2" => Ok(Self::P2),
            "P1" => Ok(Self::P1),
            "P0" => Ok(Self::P0),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

impl TryFrom<String> for Priority {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Priority> for String {
    fn from(value: Priority) -> Self {
        value.to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct BugReportResult {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub severity: Severity,
    #[serde(deserialize_with = "null_as_default")]
    pub priority: Priority,
    #[serde(deserialize_with = "null_as_default")]
    pub environment: String,
    #[serde(deserialize_with = "null_as_default")]
    pub steps_to_reproduce: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub expected_result: String,
    #[serde(deserialize_with = "null_as_default")]
    pub actual_result: String,
    #[serde(deserialize_with = "null_as_default")]
    pub impact: String,
    #[serde(deserialize_with = "null_as_default")]
    pub workaround: String,
    #[serde(deserialize_with = "null_as_default")]
    pub root_cause_hypothesis: String,
    #[serde(deserialize_with = "null_as_default")]
    pub attachments_summary: String,
}

impl BugReportResult {
    /// A usable report has a title and at least one reproduction step.
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty()
            && self.steps_to_reproduce.iter().any(|step| !step.trim().is_empty())
    }
}
