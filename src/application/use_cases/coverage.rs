//! Mapping between declared acceptance criteria and generated test cases.

use crate::domain::test_case::TestCaseItem;
use once_cell::sync::Lazy;
use regex::Regex;

static CRITERION_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bAC-(\d+)\b").unwrap());

/// `AC-<n>` identifiers in first-appearance order, upper-cased and deduplicated.
pub fn criterion_ids(text: &str) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for capture in CRITERION_ID_PATTERN.captures_iter(text) {
        let id = format!("AC-{}", &capture[1]);
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    ids
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageReport {
    pub declared: Vec<String>,
    pub uncovered: Vec<String>,
    /// Test case ids whose coverage tag names no declared criterion
    pub unmapped_cases: Vec<String>,
}

impl CoverageReport {
    pub fn evaluate(acceptance_criteria: &str, test_cases: &[TestCaseItem]) -> Self {
        let declared = criterion_ids(acceptance_criteria);
        if declared.is_empty() {
            return Self::default();
        }

        let mut covered: Vec<String> = Vec::new();
        let mut unmapped_cases = Vec::new();
        for case in test_cases {
            let tagged: Vec<String> = criterion_ids(case.coverage_tag.as_deref().unwrap_or(""))
                .into_iter()
                .filter(|id| declared.contains(id))
                .collect();
            if tagged.is_empty() {
                unmapped_cases.push(case.id.clone());
            }
            covered.extend(tagged);
        }

        let uncovered = declared
            .iter()
            .filter(|id| !covered.contains(id))
            .cloned()
            .collect();

        Self {
            declared,
            uncovered,
            unmapped_cases,
        }
    }

    pub fn has_gaps(&self) -> bool {
        !self.uncovered.is_empty() || !self.unmapped_cases.is_empty()
    }

    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if !self.uncovered.is_empty() {
            parts.push(format!("uncovered criteria: {}", self.uncovered.join(", ")));
        }
        if !self.unmapped_cases.is_empty() {
            parts.push(format!(
                "test cases without a criterion: {}",
                self.unmapped_cases.join(", ")
            ));
        }
        parts.join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(id: &str, tag: Option<&str>) -> TestCaseItem {
        TestCaseItem {
            id: id.to_string(),
            coverage_tag: tag.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_ids_in_first_appearance_order() {
        let ids = criterion_ids("AC-2: reset link\nac-1: expiry\nAC-2 again, AC-10 too");
        assert_eq!(ids, vec!["AC-2", "AC-1", "AC-10"]);
        assert!(criterion_ids("Users can log in").is_empty());
    }

    #[test]
    fn test_full_coverage_has_no_gaps() {
        let report = CoverageReport::evaluate(
            "AC-1: valid login\nAC-2: lockout after 5 tries",
            &[
                case("TC-001", Some("AC-1")),
                case("TC-002", Some("AC-2, AC-1")),
            ],
        );
        assert_eq!(report.declared, vec!["AC-1", "AC-2"]);
        assert!(!report.has_gaps());
    }

    #[test]
    fn test_reports_uncovered_and_unmapped() {
        let report = CoverageReport::evaluate(
            "AC-1 login\nAC-2 lockout\nAC-3 audit log",
            &[
                case("TC-001", Some("AC-1")),
                case("TC-002", Some("implicit")),
                case("TC-003", None),
                case("TC-004", Some("AC-12")),
            ],
        );
        assert_eq!(report.uncovered, vec!["AC-2", "AC-3"]);
        assert_eq!(report.unmapped_cases, vec!["TC-002", "TC-003", "TC-004"]);
        assert_eq!(
            report.describe(),
            "uncovered criteria: AC-2, AC-3; test cases without a criterion: TC-002, TC-003, TC-004"
        );
    }

    #[test]
    fn test_no_declared_ids_skips_check() {
        let report = CoverageReport::evaluate("Users can log in", &[case("TC-001", None)]);
        assert!(!report.has_gaps());
        assert!(report.declared.is_empty());
    }
}
