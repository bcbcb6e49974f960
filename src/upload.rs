// On-disk storage for uploaded section and case images
use std::path::{Path, PathBuf};

use chrono::Utc;
use uuid::Uuid;

use crate::config::UploadConfig;

/// Route prefix the uploads directory is served under.
pub const PUBLIC_ROUTE: &str = "/storage/uploads";

const ALLOWED_TYPES: &[(&str, &str)] = &[
    ("image/jpeg", "jpg"),
    ("image/jpg", "jpg"),
    ("image/png", "png"),
    ("image/webp", "webp"),
];

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("unsupported content type: {0}")]
    UnsupportedType(String),
    #[error("file exceeds the {limit} byte limit")]
    TooLarge { limit: usize },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Writes uploaded images into the public uploads directory under
/// collision-free names.
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
    max_file_size: usize,
}

impl ImageStore {
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            dir: PathBuf::from(&config.dir),
            max_file_size: config.max_file_size,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn max_file_size(&self) -> usize {
        self.max_file_size
    }

    pub async fn ensure_dir(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    /// Validate and persist one uploaded image. Returns the stored file name,
    /// which the caller joins onto [`PUBLIC_ROUTE`] for the client.
    pub async fn save(
        &self,
        file_name: Option<&str>,
        content_type: &str,
        data: &[u8],
    ) -> Result<String, UploadError> {
        let fallback_ext = ALLOWED_TYPES
            .iter()
            .find(|(mime, _)| *mime == content_type)
            .map(|(_, ext)| *ext)
            .ok_or_else(|| UploadError::UnsupportedType(content_type.to_string()))?;

        if data.len() > self.max_file_size {
            return Err(UploadError::TooLarge {
                limit: self.max_file_size,
            });
        }

        // Keep the client's extension when it has one, otherwise derive it
        // from the content type.
        let ext = file_name
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .unwrap_or(fallback_ext);
        let name = format!(
            "image-{}-{}.{}",
            Utc::now().timestamp_millis(),
            Uuid::new_v4().simple(),
            ext
        );

        tokio::fs::write(self.dir.join(&name), data).await?;
        Ok(name)
    }
}
