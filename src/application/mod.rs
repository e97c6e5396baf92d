pub mod use_cases;

pub use use_cases::bug_report::BugReportUseCase;
pub use use_cases::file_extraction::FileTextExtractor;
pub use use_cases::model_invoker::ModelInvoker;
pub use use_cases::test_cases::TestCaseUseCase;
