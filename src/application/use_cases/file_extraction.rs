//! Text extraction for uploaded supporting files.
//!
//! Files are dispatched by declared media type or extension to a PDF reader,
//! a plain-text decoder, or nothing at all. Batch limits are enforced before
//! any file is decoded, and the first oversize file aborts the batch.

use crate::domain::app_config::UploadLimits;
use crate::domain::error::{AppError, Result};
use crate::domain::uploaded_file::{RawUpload, UploadedFile};
use crate::infrastructure::pdf::extract_pdf_text;

const TEXT_EXTENSIONS: [&str; 29] = [
    ".txt",
    ".md",
    ".log",
    ".json",
    ".xml",
    ".yaml",
    ".yml",
    ".csv",
    ".ts",
    ".tsx",
    ".js",
    ".jsx",
    ".css",
    ".scss",
    ".html",
    ".sql",
    ".sh",
    ".bat",
    ".ini",
    ".properties",
    ".java",
    ".py",
    ".go",
    ".rs",
    ".php",
    ".c",
    ".cpp",
    ".h",
    ".hpp",
];

/// How a file's contents are turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Text,
    Unsupported,
}

impl FileKind {
    pub fn detect(mime_type: &str, name: &str) -> Self {
        let mime_type = mime_type.trim().to_lowercase();
        let extension = extension_of(name);

        if mime_type == "application/pdf" || extension == ".pdf" {
            FileKind::Pdf
        } else if mime_type.starts_with("text/") || TEXT_EXTENSIONS.contains(&extension.as_str()) {
            FileKind::Text
        } else {
            FileKind::Unsupported
        }
    }

    fn extract(self, bytes: &[u8]) -> Result<String> {
        match self {
            FileKind::Pdf => Ok(extract_pdf_text(bytes)?.trim().to_string()),
            FileKind::Text => {
                let (text, _, had_errors) = encoding_rs::UTF_8.decode(bytes);
                if had_errors {
                    tracing::debug!("Replaced invalid UTF-8 sequences while decoding upload");
                }
                Ok(text.trim().to_string())
            }
            FileKind::Unsupported => Ok(String::new()),
        }
    }
}

/// Lower-cased extension including the dot, or empty when there is none.
fn extension_of(name: &str) -> String {
    name.rfind('.')
        .map(|index| name[index..].to_lowercase())
        .unwrap_or_default()
}

pub struct FileTextExtractor {
    limits: UploadLimits,
}

impl FileTextExtractor {
    pub fn new(limits: UploadLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> UploadLimits {
        self.limits
    }

    pub fn check_count(&self, count: usize) -> Result<()> {
        if count > self.limits.max_files {
            return Err(AppError::LimitExceeded(format!(
                "Too many files. Max allowed is {}.",
                self.limits.max_files
            )));
        }
        Ok(())
    }

    pub fn check_size(&self, file: &RawUpload) -> Result<()> {
        if file.size_bytes > self.limits.max_file_size_bytes() {
            return Err(AppError::LimitExceeded(format!(
                "File {} exceeds {}MB limit.",
                file.name, self.limits.max_file_size_mb
            )));
        }
        Ok(())
    }

    pub fn extract_one(&self, file: RawUpload) -> Result<UploadedFile> {
        self.check_size(&file)?;
        let kind = FileKind::detect(&file.mime_type, &file.name);
        let text = kind.extract(&file.bytes)?;
        tracing::debug!(
            "Extracted {} chars from {} ({:?})",
            text.chars().count(),
            file.name,
            kind
        );

        Ok(UploadedFile {
            was_parsed: !text.is_empty(),
            name: file.name,
            mime_type: file.mime_type,
            size_bytes: file.size_bytes,
            extracted_text: text,
        })
    }

    /// Extracts every file in order. Nothing is returned for a batch that
    /// breaks either limit.
    pub fn extract_batch(&self, files: Vec<RawUpload>) -> Result<Vec<UploadedFile>> {
        self.check_count(files.len())?;

        let mut parsed = Vec::with_capacity(files.len());
        for file in files {
            parsed.push(self.extract_one(file)?);
        }
        Ok(parsed)
    }
}
