pub mod bug_report;
pub mod coverage;
pub mod export;
pub mod file_extraction;
pub mod model_invoker;
pub mod prompt_builder;
pub mod test_cases;
