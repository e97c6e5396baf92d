pub mod app_config;
pub mod bug_report;
pub mod error;
pub mod lenient;
pub mod llm_config;
pub mod test_case;
pub mod uploaded_file;
pub mod validation;
