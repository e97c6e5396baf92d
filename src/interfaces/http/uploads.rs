use super::{add_log, error_response, HttpState};
use crate::application::FileTextExtractor;
use crate::domain::error::{AppError, Result};
use crate::domain::uploaded_file::{RawUpload, UploadedFile};
use actix_multipart::Multipart;
use actix_web::{post, web, HttpResponse, Responder};
use futures_util::StreamExt;
use serde::Serialize;

const UPLOAD_FALLBACK: &str = "Failed to parse uploaded files.";
const FILES_FIELD: &str = "files";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub files: Vec<UploadedFile>,
}

fn multipart_error(e: impl std::fmt::Display) -> AppError {
    AppError::ValidationError(format!("Invalid multipart body: {}", e))
}

/// Reads every `files` part that carries a filename. Bytes past the size
/// limit are counted but not kept, and the count limit is enforced as parts
/// arrive.
async fn read_uploads(payload: &mut Multipart, extractor: &FileTextExtractor) -> Result<Vec<RawUpload>> {
    let max_bytes = extractor.limits().max_file_size_bytes();
    let mut files = Vec::new();

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(multipart_error)?;

        let filename = if field.name() == FILES_FIELD {
            field
                .content_disposition()
                .get_filename()
                .map(str::to_string)
        } else {
            None
        };

        // Plain form values, including a text field named "files", are not uploads.
        let Some(name) = filename else {
            while let Some(chunk) = field.next().await {
                chunk.map_err(multipart_error)?;
            }
            continue;
        };

        extractor.check_count(files.len() + 1)?;

        let mime_type = field
            .content_type()
            .map(|mime| mime.essence_str().to_string())
            .unwrap_or_default();

        let mut bytes = Vec::new();
        let mut size_bytes: u64 = 0;
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(multipart_error)?;
            size_bytes += chunk.len() as u64;
            if size_bytes <= max_bytes {
                bytes.extend_from_slice(&chunk);
            }
        }

        files.push(RawUpload {
            name,
            mime_type,
            size_bytes,
            bytes,
        });
    }

    Ok(files)
}

#[post("/uploads")]
pub async fn upload_files(data: web::Data<HttpState>, mut payload: Multipart) -> impl Responder {
    let files = match read_uploads(&mut payload, &data.extractor).await {
        Ok(files) => files,
        Err(e) => {
            add_log(&data.logs, "WARN", "HttpApi", &format!("Upload rejected: {}", e));
            return error_response(&e, UPLOAD_FALLBACK);
        }
    };

    let total_bytes: u64 = files.iter().map(|f| f.size_bytes).sum();
    add_log(
        &data.logs,
        "INFO",
        "HttpApi",
        &format!("Extracting {} file(s), {} bytes", files.len(), total_bytes),
    );

    let extractor = data.extractor.clone();
    let parsed = web::block(move || extractor.extract_batch(files))
        .await
        .map_err(|e| AppError::Internal(format!("Extraction task failed: {}", e)))
        .and_then(|result| result);

    match parsed {
        Ok(files) => HttpResponse::Ok().json(UploadResponse { files }),
        Err(e) => {
            add_log(&data.logs, "ERROR", "HttpApi", &format!("Upload failed: {}", e));
            error_response(&e, UPLOAD_FALLBACK)
        }
    }
}
