//! Image upload staging and persistence.
//!
//! A request's files are fully validated in memory before anything touches the
//! upload directory; persisting is all-or-nothing.

use std::path::{Path, PathBuf};

use rand::Rng;
use thiserror::Error;
use tokio::fs;
use tracing::{debug, warn};

use crate::config::UploadConfig;
use crate::constants::{IMAGE_EXTENSIONS, uploads::URL_PREFIX};
use crate::models::property::PropertyImage;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("File too large. Maximum size is {max_mb}MB.")]
    FileTooLarge { max_mb: usize },

    #[error("File upload error: Too many files. Maximum is {max}.")]
    TooManyFiles { max: usize },

    #[error("Only image files are allowed!")]
    NotAnImage,

    #[error("File upload error: {0}")]
    Malformed(String),

    #[error("Failed to store upload: {0}")]
    Io(String),
}

/// A validated file held in memory until the request is accepted.
#[derive(Debug, Clone)]
pub struct StagedFile {
    pub original_name: String,
    pub extension: String,
    pub bytes: Vec<u8>,
}

/// Per-request limits on count, size and type.
#[derive(Debug, Clone, Copy)]
pub struct UploadPolicy {
    pub max_file_size: usize,
    pub max_files: usize,
}

impl UploadPolicy {
    #[must_use]
    pub const fn from_config(config: &UploadConfig) -> Self {
        Self {
            max_file_size: config.max_file_size_bytes,
            max_files: config.max_files,
        }
    }

    /// Called before accepting file number `count` (1-based).
    pub const fn check_count(&self, count: usize) -> Result<(), UploadError> {
        if count > self.max_files {
            return Err(UploadError::TooManyFiles {
                max: self.max_files,
            });
        }
        Ok(())
    }

    pub const fn check_size(&self, len: usize) -> Result<(), UploadError> {
        if len > self.max_file_size {
            return Err(UploadError::FileTooLarge {
                max_mb: self.max_file_size / (1024 * 1024),
            });
        }
        Ok(())
    }

    /// Both the extension and the declared MIME type must name an allowed
    /// image format. Returns the normalized extension.
    pub fn check_type(
        &self,
        file_name: &str,
        content_type: Option<&str>,
    ) -> Result<String, UploadError> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .filter(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
            .ok_or(UploadError::NotAnImage)?;

        let declared = content_type
            .and_then(|ct| ct.parse::<mime_guess::Mime>().ok())
            .ok_or(UploadError::NotAnImage)?;

        if declared.type_() != mime_guess::mime::IMAGE
            || !IMAGE_EXTENSIONS.contains(&declared.subtype().as_str())
        {
            return Err(UploadError::NotAnImage);
        }

        Ok(extension)
    }
}

/// The on-disk upload directory.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub async fn ensure_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir).await
    }

    /// Writes every staged file. On any failure the files already written by
    /// this call are removed before the error is returned.
    pub async fn persist(&self, files: Vec<StagedFile>) -> Result<Vec<PropertyImage>, UploadError> {
        if files.is_empty() {
            return Ok(Vec::new());
        }

        self.ensure_dir()
            .await
            .map_err(|e| UploadError::Io(e.to_string()))?;

        let uploaded_at = crate::db::repositories::timestamp();
        let mut written = Vec::with_capacity(files.len());

        for file in files {
            let filename = generate_filename(&file.extension);
            let path = self.dir.join(&filename);

            if let Err(e) = fs::write(&path, &file.bytes).await {
                warn!("Failed to write upload {:?}: {}", path, e);
                self.discard(&written).await;
                return Err(UploadError::Io(e.to_string()));
            }

            debug!("Stored upload {:?} ({} bytes)", path, file.bytes.len());
            written.push(PropertyImage {
                path: format!("{URL_PREFIX}/{filename}"),
                filename,
                original_name: file.original_name,
                uploaded_at: uploaded_at.clone(),
            });
        }

        Ok(written)
    }

    /// Best-effort removal of previously persisted files.
    pub async fn discard(&self, images: &[PropertyImage]) {
        for image in images {
            let path = self.dir.join(&image.filename);
            if let Err(e) = fs::remove_file(&path).await {
                warn!("Failed to remove upload {:?}: {}", path, e);
            }
        }
    }
}

/// `images-<unix millis>-<random 0..1e9>.<ext>`
#[must_use]
pub fn generate_filename(extension: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix: u32 = rand::rng().random_range(0..1_000_000_000);
    format!(
        "{}-{millis}-{suffix}.{extension}",
        crate::constants::uploads::FIELD_NAME
    )
}
