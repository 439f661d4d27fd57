use std::path::{Path, PathBuf};

use axum::extract::Multipart;
use bytes::Bytes;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::config::CERTIFICATE_ARTIFACT_DIR;
use crate::error::{AppError, AppResult};

pub const ROSTER_FIELD: &str = "roster";
pub const ARTIFACT_FIELD: &str = "certificate";

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Bytes,
}

impl UploadedFile {
    /// File name without directories or extension, used to match an artifact
    /// to its roster row.
    pub fn stem(&self) -> Option<&str> {
        Path::new(&self.file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    fn extension(&self) -> Option<String> {
        Path::new(&self.file_name)
            .extension()
            .and_then(|s| s.to_str())
            .map(|ext| sanitize_filename::sanitize(ext).into_owned())
            .filter(|s| !s.is_empty())
    }
}

#[derive(Debug)]
pub struct CertificateUpload {
    pub roster: UploadedFile,
    pub artifacts: Vec<UploadedFile>,
}

/// Reads a bulk-issuance form: exactly one `roster` part and any number of
/// `certificate` parts. Unknown parts are ignored.
pub async fn read_certificate_upload(mut multipart: Multipart) -> AppResult<CertificateUpload> {
    let mut roster = None;
    let mut artifacts = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Failed to read multipart field: {}", e)))?
    {
        let field_name = field.name().unwrap_or_default().to_string();
        if field_name != ROSTER_FIELD && field_name != ARTIFACT_FIELD {
            continue;
        }

        let file_name = field
            .file_name()
            .map(|name| sanitize_filename::sanitize(name.trim()).into_owned())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| {
                AppError::validation(format!("The {} part must carry a file name", field_name))
            })?;

        let bytes = field.bytes().await.map_err(|e| {
            AppError::validation(format!("Failed to read {} data: {}", field_name, e))
        })?;

        let file = UploadedFile { file_name, bytes };
        if field_name == ROSTER_FIELD {
            if roster.replace(file).is_some() {
                return Err(AppError::validation("Only one roster file may be uploaded"));
            }
        } else {
            artifacts.push(file);
        }
    }

    let roster = roster.ok_or_else(|| AppError::validation("Roster file is required"))?;
    Ok(CertificateUpload { roster, artifacts })
}

/// Certificate artifacts on disk, under `<upload_dir>/certificates`.
/// Stored paths are relative to the upload directory.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            root: upload_dir.into(),
        }
    }

    pub async fn save(&self, file: &UploadedFile) -> AppResult<String> {
        let dir = self.root.join(CERTIFICATE_ARTIFACT_DIR);
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create artifact directory: {}", e))?;

        let stored_name = match file.extension() {
            Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
            None => Uuid::new_v4().to_string(),
        };

        let mut out = fs::File::create(dir.join(&stored_name))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create artifact file: {}", e))?;
        out.write_all(&file.bytes)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to write artifact file: {}", e))?;
        out.flush()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to flush artifact file: {}", e))?;

        Ok(format!("{}/{}", CERTIFICATE_ARTIFACT_DIR, stored_name))
    }

    pub async fn read(&self, stored_path: &str) -> AppResult<Vec<u8>> {
        let path = self.root.join(stored_path);
        match fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "certificate artifact missing on disk");
                Err(AppError::not_found("Certificate file not found"))
            }
            Err(e) => Err(anyhow::anyhow!("Failed to read artifact file: {}", e).into()),
        }
    }

    /// Best-effort cleanup after a failed issuance.
    pub async fn remove_all(&self, stored_paths: &[String]) {
        for stored in stored_paths {
            if let Err(e) = fs::remove_file(self.root.join(stored)).await {
                tracing::warn!(path = %stored, error = %e, "failed to remove artifact");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> UploadedFile {
        UploadedFile {
            file_name: name.to_string(),
            bytes: Bytes::from_static(b"%PDF-1.4"),
        }
    }

    #[test]
    fn test_stem_strips_extension() {
        assert_eq!(file("STU004.pdf").stem(), Some("STU004"));
        assert_eq!(file("STU004").stem(), Some("STU004"));
        assert_eq!(file("archive.tar.gz").stem(), Some("archive.tar"));
    }

    #[test]
    fn test_extension_is_sanitized() {
        assert_eq!(file("STU004.pdf").extension().as_deref(), Some("pdf"));
        assert_eq!(file("STU004.pd:f").extension().as_deref(), Some("pdf"));
        assert_eq!(file("STU004").extension(), None);
    }

    #[tokio::test]
    async fn test_save_read_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());

        let stored = store.save(&file("STU004.pdf")).await.unwrap();
        assert!(stored.starts_with("certificates/"));
        assert!(stored.ends_with(".pdf"));
        assert_eq!(store.read(&stored).await.unwrap(), b"%PDF-1.4");

        store.remove_all(&[stored.clone()]).await;
        assert!(matches!(
            store.read(&stored).await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }
}
