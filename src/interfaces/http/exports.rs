use super::{add_log, error_response, ErrorBody, HttpState};
use crate::application::use_cases::export::{
    copy_to_clipboard, csv_text, json_text, paste_text, Exportable,
};
use crate::domain::bug_report::BugReportResult;
use crate::domain::error::AppError;
use crate::domain::test_case::TestCaseResult;
use actix_web::http::header::{ContentType, CONTENT_DISPOSITION};
use actix_web::{post, web, HttpResponse, Responder};
use serde_json::json;

const EXPORT_FALLBACK: &str = "Failed to export result.";

fn attachment(filename: &str) -> (actix_web::http::header::HeaderName, String) {
    (
        CONTENT_DISPOSITION,
        format!("attachment; filename=\"{}\"", filename),
    )
}

async fn render<T>(data: web::Data<HttpState>, item: T, format: &str) -> HttpResponse
where
    T: Exportable + Send + 'static,
{
    let rendered = match format {
        "paste" => Ok(HttpResponse::Ok()
            .content_type(ContentType::plaintext())
            .body(paste_text(&item))),
        "csv" => csv_text(&item).map(|csv| {
            HttpResponse::Ok()
                .content_type("text/csv; charset=utf-8")
                .insert_header(attachment(T::CSV_FILENAME))
                .body(csv)
        }),
        "json" => json_text(&item).map(|body| {
            HttpResponse::Ok()
                .content_type(ContentType::json())
                .insert_header(attachment(T::JSON_FILENAME))
                .body(body)
        }),
        "preview" => Ok(HttpResponse::Ok().json(item.page_preview())),
        "clipboard" => {
            let clipboard = data.clipboard.clone();
            web::block(move || copy_to_clipboard(&item, clipboard.as_ref()))
                .await
                .map_err(|e| AppError::Internal(format!("Clipboard task failed: {}", e)))
                .and_then(|result| result)
                .map(|_| HttpResponse::Ok().json(json!({ "copied": true })))
        }
        other => {
            return HttpResponse::NotFound().json(ErrorBody {
                error: format!("Unknown export format: {}", other),
            })
        }
    };

    match rendered {
        Ok(response) => response,
        Err(e) => {
            add_log(&data.logs, "WARN", "HttpApi", &format!("Export failed: {}", e));
            error_response(&e, EXPORT_FALLBACK)
        }
    }
}

#[post("/exports/bug-report/{format}")]
pub async fn export_bug_report(
    data: web::Data<HttpState>,
    path: web::Path<String>,
    req: web::Json<BugReportResult>,
) -> impl Responder {
    render(data, req.into_inner(), &path.into_inner()).await
}

#[post("/exports/test-cases/{format}")]
pub async fn export_test_cases(
    data: web::Data<HttpState>,
    path: web::Path<String>,
    req: web::Json<TestCaseResult>,
) -> impl Responder {
    render(data, req.into_inner(), &path.into_inner()).await
}

#[cfg(test)]
mod tests {
    use super::super::tests::{default_state, state_with};
    use super::super::{configure, ErrorBody};
    use crate::domain::app_config::UploadLimits;
    use crate::infrastructure::llm_clients::fake::FakeLLMClient;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn report() -> Value {
        json!({
            "title": "Checkout \"Pay\" button frozen",
            "severity": "Critical",
            "priority": "P0",
            "environment": "",
            "stepsToReproduce": ["Add item", "Press Pay"],
            "expectedResult": "Payment sheet opens",
            "actualResult": "Nothing happens\nconsole shows TypeError",
            "impact": "No revenue",
            "workaround": "",
            "rootCauseHypothesis": "Handler not bound",
            "attachmentsSummary": ""
        })
    }

    fn cases(count: usize) -> Value {
        let items: Vec<Value> = (1..=count)
            .map(|i| {
                json!({
                    "id": format!("TC-{:03}", i),
                    "title": format!("Case {}", i),
                    "type": "Security",
                    "priority": "High",
                    "preconditions": [],
                    "steps": ["Step"],
                    "expectedResult": "Rejected",
                    "coverageTag": "AC-1"
                })
            })
            .collect();
        json!({"summary": "Auth suite", "testCases": items})
    }

    #[actix_web::test]
    async fn test_csv_export_has_attachment_and_quoted_rows() {
        let app = test::init_service(
            App::new()
                .app_data(default_state(Arc::new(FakeLLMClient::replying("{}"))))
                .configure(|cfg| configure(cfg, 1 << 20)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/exports/bug-report/csv")
            .set_json(report())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let disposition = resp
            .headers()
            .get("content-disposition")
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert_eq!(disposition, "attachment; filename=\"clickup-bug-report.csv\"");

        let body = test::read_body(resp).await;
        let text = std::str::from_utf8(&body).unwrap();
        let lines: Vec<&str> = text.split('\n').collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("\"Checkout \"\"Pay\"\" button frozen\","));
        assert!(lines[1].contains("Actual Result: Nothing happens console shows TypeError"));
        assert!(lines[1].ends_with("\"P0\",\"To Do\",\"Bug\""));
    }

    #[actix_web::test]
    async fn test_json_export_filename() {
        let app = test::init_service(
            App::new()
                .app_data(default_state(Arc::new(FakeLLMClient::replying("{}"))))
                .configure(|cfg| configure(cfg, 1 << 20)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/exports/test-cases/json")
            .set_json(cases(1))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(
            resp.headers().get("content-disposition").unwrap(),
            "attachment; filename=\"test-cases.json\""
        );
        let body = test::read_body(resp).await;
        assert!(std::str::from_utf8(&body).unwrap().starts_with("{\n  \"summary\": \"Auth suite\""));
    }

    #[actix_web::test]
    async fn test_preview_truncates_cards() {
        let app = test::init_service(
            App::new()
                .app_data(default_state(Arc::new(FakeLLMClient::replying("{}"))))
                .configure(|cfg| configure(cfg, 1 << 20)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/exports/test-cases/preview")
            .set_json(cases(7))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["cards"].as_array().unwrap().len(), 4);
        assert_eq!(body["table"]["rows"].as_array().unwrap().len(), 7);
        assert_eq!(
            body["note"],
            "Showing 4 of 7 rows. Use Preview Table for full data."
        );
    }

    #[actix_web::test]
    async fn test_paste_export_is_plain_text() {
        let app = test::init_service(
            App::new()
                .app_data(default_state(Arc::new(FakeLLMClient::replying("{}"))))
                .configure(|cfg| configure(cfg, 1 << 20)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/exports/test-cases/paste")
            .set_json(cases(2))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        let text = std::str::from_utf8(&body).unwrap();
        assert!(text.starts_with("Task Name\tDescription\tPriority\tStatus\tTags\nCase 1\t"));
        assert!(text.ends_with("Expected Result: Rejected\tHigh\tTo Do\tSecurity"));
    }

    #[actix_web::test]
    async fn test_clipboard_unavailable_is_503() {
        let state = state_with(
            Arc::new(FakeLLMClient::replying("{}")),
            UploadLimits::default(),
            false,
        );
        let app = test::init_service(
            App::new()
                .app_data(state)
                .configure(|cfg| configure(cfg, 1 << 20)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/exports/bug-report/clipboard")
            .set_json(report())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body: ErrorBody = test::read_body_json(resp).await;
        assert_eq!(
            body.error,
            "Unable to copy. Please use Export ClickUp CSV instead."
        );
    }

    #[actix_web::test]
    async fn test_unknown_format_is_404() {
        let app = test::init_service(
            App::new()
                .app_data(default_state(Arc::new(FakeLLMClient::replying("{}"))))
                .configure(|cfg| configure(cfg, 1 << 20)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/exports/bug-report/xlsx")
            .set_json(report())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
