use super::{add_log, error_response, HttpState};
use crate::domain::bug_report::BugReportRequest;
use crate::domain::test_case::TestCaseRequest;
use actix_web::{post, web, HttpResponse, Responder};

const BUG_REPORT_FALLBACK: &str = "Failed to generate bug report.";
const TEST_CASES_FALLBACK: &str = "Failed to generate test cases.";

#[post("/bug-reports")]
pub async fn create_bug_report(
    data: web::Data<HttpState>,
    req: web::Json<BugReportRequest>,
) -> impl Responder {
    let request = req.into_inner();
    add_log(
        &data.logs,
        "INFO",
        "HttpApi",
        &format!(
            "Bug report requested (deep={} files={})",
            request.deep_analysis,
            request.files.len()
        ),
    );

    match data.bug_reports.execute(request).await {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(e) => {
            add_log(
                &data.logs,
                "ERROR",
                "HttpApi",
                &format!("Bug report failed: {}", e),
            );
            error_response(&e, BUG_REPORT_FALLBACK)
        }
    }
}

#[post("/test-cases")]
pub async fn create_test_cases(
    data: web::Data<HttpState>,
    req: web::Json<TestCaseRequest>,
) -> impl Responder {
    let request = req.into_inner();
    add_log(
        &data.logs,
        "INFO",
        "HttpApi",
        &format!(
            "Test cases requested (deep={} files={})",
            request.deep_analysis,
            request.files.len()
        ),
    );

    match data.test_cases.execute(request).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => {
            add_log(
                &data.logs,
                "ERROR",
                "HttpApi",
                &format!("Test case generation failed: {}", e),
            );
            error_response(&e, TEST_CASES_FALLBACK)
        }
    }
}
