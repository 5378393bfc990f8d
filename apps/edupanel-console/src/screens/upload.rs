use anyhow::{Context, Result};
use std::path::Path;

use super::Console;
use crate::ui::alert;

pub async fn upload(console: &Console, path: &Path) -> Result<()> {
    let uploaded = console
        .services
        .uploads
        .upload_file(path)
        .await
        .with_context(|| format!("Failed to upload {}", path.display()))?;

    alert::success(&format!("Uploaded {} ({} bytes, {})", uploaded.filename, uploaded.size, uploaded.mime_type));
    println!("{}", uploaded.url);
    Ok(())
}
