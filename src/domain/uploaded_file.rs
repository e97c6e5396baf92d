use serde::{Deserialize, Serialize};

/// A file after text extraction. Lives for a single request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct UploadedFile {
    pub name: String,
    #[serde(rename = "type", alias = "mimeType", default)]
    pub mime_type: String,
    #[serde(rename = "size", alias = "sizeBytes", default)]
    pub size_bytes: u64,
    #[serde(rename = "text", alias = "extractedText", default)]
    pub extracted_text: String,
    #[serde(rename = "parsed", alias = "wasParsed", default)]
    pub was_parsed: bool,
}

/// A file part as received from the client, before extraction.
///
/// `size_bytes` is the full declared/streamed size; `bytes` may hold less
/// when the part was over the size limit and buffering stopped early.
#[derive(Debug, Clone)]
pub struct RawUpload {
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub bytes: Vec<u8>,
}

impl RawUpload {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes: bytes.len() as u64,
            bytes,
        }
    }
}
