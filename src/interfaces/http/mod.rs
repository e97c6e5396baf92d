mod exports;
mod generation;
mod uploads;

use crate::application::{BugReportUseCase, FileTextExtractor, TestCaseUseCase};
use crate::domain::app_config::ServerSettings;
use crate::domain::error::AppError;
use crate::infrastructure::clipboard::ClipboardSink;
use actix_cors::Cors;
use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{dev::Server, get, web, App, HttpResponse, HttpServer, Responder};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};

const MAX_LOG_ENTRIES: usize = 100;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub source: String,
    pub message: String,
}

pub struct HttpState {
    pub bug_reports: Arc<BugReportUseCase>,
    pub test_cases: Arc<TestCaseUseCase>,
    pub extractor: Arc<FileTextExtractor>,
    pub clipboard: Arc<dyn ClipboardSink + Send + Sync>,
    pub logs: Arc<Mutex<Vec<LogEntry>>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

pub fn status_for(err: &AppError) -> StatusCode {
    match err {
        AppError::ValidationError(_) | AppError::LimitExceeded(_) => StatusCode::BAD_REQUEST,
        AppError::InvalidGeneration(_) => StatusCode::BAD_GATEWAY,
        AppError::ClipboardUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// `{"error": message}` with the status for `err`; `fallback` replaces an
/// empty message.
pub fn error_response(err: &AppError, fallback: &str) -> HttpResponse {
    let message = err.message();
    let error = if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    };
    HttpResponse::build(status_for(err)).json(ErrorBody { error })
}

fn lock_logs(logs: &Mutex<Vec<LogEntry>>) -> MutexGuard<'_, Vec<LogEntry>> {
    logs.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[get("/logs")]
async fn get_logs(data: web::Data<HttpState>) -> impl Responder {
    let logs = lock_logs(&data.logs);
    HttpResponse::Ok().json(&*logs)
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

pub fn add_log_entry(
    logs: &Mutex<Vec<LogEntry>>,
    level: &str,
    source: &str,
    message: &str,
) -> LogEntry {
    match level {
        "ERROR" => tracing::error!(source, "{}", message),
        "WARN" => tracing::warn!(source, "{}", message),
        "DEBUG" => tracing::debug!(source, "{}", message),
        _ => tracing::info!(source, "{}", message),
    }

    let entry = LogEntry {
        time: Local::now().format("%H:%M:%S").to_string(),
        level: level.to_string(),
        source: source.to_string(),
        message: message.to_string(),
    };
    let mut logs = lock_logs(logs);
    logs.push(entry.clone());
    if logs.len() > MAX_LOG_ENTRIES {
        logs.remove(0);
    }
    entry
}

pub fn add_log(logs: &Mutex<Vec<LogEntry>>, level: &str, source: &str, message: &str) {
    add_log_entry(logs, level, source, message);
}

fn json_config(max_bytes: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(max_bytes)
        .error_handler(|err, _req| {
            let body = ErrorBody {
                error: format!("Invalid JSON body: {}", err),
            };
            InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
        })
}

/// Registers every `/api` route on an actix app or test service.
pub fn configure(cfg: &mut web::ServiceConfig, max_json_bytes: usize) {
    cfg.service(
        web::scope("/api")
            .app_data(json_config(max_json_bytes))
            .service(generation::create_bug_report)
            .service(generation::create_test_cases)
            .service(uploads::upload_files)
            .service(exports::export_bug_report)
            .service(exports::export_test_cases)
            .service(get_logs)
            .service(health),
    );
}

pub fn start_server(state: HttpState, settings: &ServerSettings) -> std::io::Result<Server> {
    let state = web::Data::new(state);
    let max_json_bytes = settings.max_json_bytes;

    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // Allow all origins for local tool

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .configure(|cfg| configure(cfg, max_json_bytes))
    })
    .bind((settings.host.as_str(), settings.port))?
    .run();

    Ok(server)
}
