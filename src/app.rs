use std::sync::{Arc, Mutex};

use tracing_subscriber::EnvFilter;

use crate::application::{BugReportUseCase, FileTextExtractor, ModelInvoker, TestCaseUseCase};
use crate::domain::app_config::AppConfig;
use crate::infrastructure::clipboard::SystemClipboard;
use crate::infrastructure::config::ConfigService;
use crate::infrastructure::llm_clients::{GeminiClient, LLMClient};
use crate::interfaces::http::{add_log, start_server, HttpState, LogEntry};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

pub fn build_state(config: &AppConfig, logs: Arc<Mutex<Vec<LogEntry>>>) -> HttpState {
    let llm_client: Arc<dyn LLMClient + Send + Sync> = Arc::new(GeminiClient::new());
    let invoker = Arc::new(ModelInvoker::new(llm_client, config.model.clone()));

    HttpState {
        bug_reports: Arc::new(BugReportUseCase::new(
            invoker.clone(),
            config.company.clone(),
        )),
        test_cases: Arc::new(TestCaseUseCase::new(
            invoker,
            config.company.clone(),
            config.generation,
        )),
        extractor: Arc::new(FileTextExtractor::new(config.uploads)),
        clipboard: Arc::new(SystemClipboard::new()),
        logs,
    }
}

pub async fn run() -> std::io::Result<()> {
    init_tracing();

    let config = ConfigService::load()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;
    if config.model.api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY is not set; generation requests will fail until it is");
    }

    let logs = Arc::new(Mutex::new(Vec::new()));
    let state = build_state(&config, logs.clone());
    let server = start_server(state, &config.server)?;

    add_log(
        &logs,
        "INFO",
        "System",
        &format!(
            "HTTP server started on {}:{} (company={}, max_files={}, max_file_size_mb={})",
            config.server.host,
            config.server.port,
            config.company.name,
            config.uploads.max_files,
            config.uploads.max_file_size_mb
        ),
    );

    server.await
}
