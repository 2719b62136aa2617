use std::path::Path;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use standard_error::{Interpolate, StandardError, Status};
use uuid::Uuid;

use crate::{
    conf::settings,
    pkg::{internal::minio::S3Ops, server::state::AppState},
    prelude::Result,
};

const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
const ALLOWED_EXTENSIONS: [&str; 3] = ["pdf", "doc", "docx"];

#[derive(Serialize)]
pub struct UploadResponse {
    pub key: String,
}

pub fn file_extension(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase()
}

pub fn mime_for_extension(extension: &str) -> &'static str {
    match extension {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}

pub fn object_key(file_name: &str, extension: &str) -> String {
    format!("resumes/{}-{}.{}", file_name, Uuid::new_v4(), extension)
}

pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| StandardError::new("ERR-UPLOAD-001").interpolate_err(e.to_string()))?
    {
        if field.name() != Some("file") {
            let _ = field
                .bytes()
                .await
                .map_err(|e| StandardError::new("ERR-UPLOAD-001").interpolate_err(e.to_string()))?;
            continue;
        }
        let file_name = field.file_name().unwrap_or("unknown").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| StandardError::new("ERR-UPLOAD-001").interpolate_err(e.to_string()))?;
        let extension = file_extension(&file_name);
        if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(StandardError::new("ERR-UPLOAD-002").code(StatusCode::BAD_REQUEST));
        }
        if data.len() > MAX_UPLOAD_BYTES {
            return Err(StandardError::new("ERR-UPLOAD-003").code(StatusCode::PAYLOAD_TOO_LARGE));
        }
        let key = object_key(&file_name, &extension);
        state
            .s3_client
            .upload_object(
                &settings.s3_bucket_name,
                &key,
                data.into(),
                mime_for_extension(&extension),
            )
            .await?;
        return Ok(Json(UploadResponse { key }));
    }
    Err(StandardError::new("ERR-UPLOAD-001").code(StatusCode::BAD_REQUEST))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_extension_lowercased() {
        assert_eq!(file_extension("Resume.PDF"), "pdf");
        assert_eq!(file_extension("cv.docx"), "docx");
        assert_eq!(file_extension("noext"), "");
    }

    #[test]
    fn test_mime_mapping() {
        assert_eq!(mime_for_extension("pdf"), "application/pdf");
        assert_eq!(mime_for_extension("doc"), "application/msword");
        assert_eq!(mime_for_extension("bin"), "application/octet-stream");
    }

    #[test]
    fn test_object_keys_are_unique_per_upload() {
        let a = object_key("resume.pdf", "pdf");
        let b = object_key("resume.pdf", "pdf");
        assert_ne!(a, b);
        assert!(a.starts_with("resumes/resume.pdf-"));
        assert!(a.ends_with(".pdf"));
    }
}
