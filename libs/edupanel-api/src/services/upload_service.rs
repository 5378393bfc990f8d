use reqwest::multipart::{Form, Part};
use std::path::Path;
use tracing::info;

use edupanel_shared::models::FileUpload;

use crate::client::ApiClient;
use crate::error::{ApiError, Result};

#[derive(Clone, Debug)]
pub struct UploadService {
    api: ApiClient,
}

impl UploadService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn upload_file(&self, path: &Path) -> Result<FileUpload> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ApiError::Validation(format!("not a file path: {}", path.display())))?
            .to_string();
        let bytes = tokio::fs::read(path).await?;
        self.upload_bytes(&file_name, bytes).await
    }

    pub async fn upload_bytes(&self, file_name: &str, bytes: Vec<u8>) -> Result<FileUpload> {
        let mime = mime_guess::from_path(file_name).first_or_octet_stream();
        let size = bytes.len();
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime.as_ref())?;
        let form = Form::new().part("file", part);

        let uploaded: FileUpload = self.api.post_multipart("file-upload", form).await?;
        info!("Uploaded {} ({} bytes, {}) -> {}", file_name, size, mime, uploaded.url);
        Ok(uploaded)
    }
}
