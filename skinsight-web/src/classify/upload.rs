//! Upload intake and staging
//!
//! An [`Upload`] is checked against the extension allow-list and then
//! staged to a uniquely named file in the uploads directory. The resulting
//! [`StagedUpload`] owns that file: dropping it deletes the file, so every
//! exit path (prediction done, decode or inference failure, page left,
//! session expired) releases it.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempPath;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Extensions accepted from clients (compared case-insensitively)
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "jfif"];

const STAGED_PREFIX: &str = "upload-";

/// Rejected or failed upload
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Choose an image file first.")]
    Missing,

    #[error("Unsupported file type \"{0}\". Choose a jpg, jpeg, png or jfif image.")]
    UnsupportedType(String),

    #[error("The uploaded image could not be stored: {0}")]
    Staging(#[from] std::io::Error),
}

/// Image bytes supplied by a client
#[derive(Debug, Clone)]
pub struct Upload {
    bytes: Vec<u8>,
    extension: String,
}

impl Upload {
    /// Accept `bytes` if `file_name` carries an allowed extension
    pub fn new(file_name: &str, bytes: Vec<u8>) -> Result<Self, UploadError> {
        if file_name.is_empty() && bytes.is_empty() {
            return Err(UploadError::Missing);
        }

        let extension = Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();

        if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(UploadError::UnsupportedType(extension));
        }
        if bytes.is_empty() {
            return Err(UploadError::Missing);
        }

        Ok(Self { bytes, extension })
    }
}

/// An upload written to disk for the duration of one classification attempt
#[derive(Debug)]
pub struct StagedUpload {
    path: TempPath,
    extension: String,
    size: usize,
}

impl PartialEq for StagedUpload {
    fn eq(&self, other: &Self) -> bool {
        self.path() == other.path()
    }
}

impl StagedUpload {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub async fn read(&self) -> std::io::Result<Vec<u8>> {
        tokio::fs::read(self.path()).await
    }

    /// Inline `data:` URI so the page can preview the staged image
    pub async fn preview_data_uri(&self) -> std::io::Result<String> {
        let bytes = self.read().await?;
        let mime = match self.extension.as_str() {
            "png" => "image/png",
            _ => "image/jpeg",
        };
        Ok(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
    }
}

/// Directory where uploads wait for prediction
#[derive(Debug, Clone)]
pub struct UploadStaging {
    dir: PathBuf,
}

impl UploadStaging {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `upload` to a fresh file in the staging directory
    pub async fn stage(&self, upload: Upload) -> Result<StagedUpload, UploadError> {
        let dir = self.dir.clone();
        let Upload { bytes, extension } = upload;
        let size = bytes.len();
        let suffix = format!(".{}", extension);

        let path = tokio::task::spawn_blocking(move || -> std::io::Result<TempPath> {
            std::fs::create_dir_all(&dir)?;
            let mut file = tempfile::Builder::new()
                .prefix(STAGED_PREFIX)
                .suffix(&suffix)
                .tempfile_in(&dir)?;
            file.write_all(&bytes)?;
            file.flush()?;
            Ok(file.into_temp_path())
        })
        .await
        .map_err(|e| UploadError::Staging(std::io::Error::other(e)))??;

        debug!(path = %path.display(), size, "Staged upload");
        Ok(StagedUpload {
            path,
            extension,
            size,
        })
    }

    /// Remove staged files left behind by a previous run
    ///
    /// Called once at startup, before any session can hold an upload.
    pub fn purge_stale(&self) -> std::io::Result<usize> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e),
        };

        let mut removed = 0;
        for entry in entries {
            let entry = entry?;
            let is_staged = entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.starts_with(STAGED_PREFIX));
            if !is_staged {
                continue;
            }
            match std::fs::remove_file(entry.path()) {
                Ok(()) => removed += 1,
                Err(e) => warn!("Cannot remove stale upload {}: {}", entry.path().display(), e),
            }
        }

        if removed > 0 {
            info!("Removed {} stale staged upload(s)", removed);
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_extension_allow_list() {
        for name in ["lesion.jpg", "LESION.JPEG", "scan.png", "photo.JfIf"] {
            assert!(Upload::new(name, vec![1, 2, 3]).is_ok(), "{} should be accepted", name);
        }

        for name in ["lesion.gif", "lesion.bmp", "notes.txt", "no_extension", "png"] {
            assert!(matches!(
                Upload::new(name, vec![1, 2, 3]),
                Err(UploadError::UnsupportedType(_))
            ));
        }
    }

    #[test]
    fn test_empty_upload_is_missing() {
        assert!(matches!(Upload::new("", Vec::new()), Err(UploadError::Missing)));
        assert!(matches!(Upload::new("a.png", Vec::new()), Err(UploadError::Missing)));
    }

    #[tokio::test]
    async fn test_staged_file_deleted_on_drop() {
        let dir = TempDir::new().unwrap();
        let staging = UploadStaging::new(dir.path().join("uploads"));

        let staged = staging
            .stage(Upload::new("a.png", vec![7; 32]).unwrap())
            .await
            .unwrap();
        let path = staged.path().to_path_buf();

        assert!(path.exists());
        assert!(path.starts_with(staging.dir()));
        assert_eq!(staged.size(), 32);
        assert_eq!(staged.read().await.unwrap(), vec![7; 32]);

        drop(staged);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_preview_uri() {
        let dir = TempDir::new().unwrap();
        let staging = UploadStaging::new(dir.path());

        let staged = staging.stage(Upload::new("a.PNG", vec![1, 2, 3]).unwrap()).await.unwrap();
        assert_eq!(staged.preview_data_uri().await.unwrap(), "data:image/png;base64,AQID");

        let staged = staging.stage(Upload::new("a.jfif", vec![1, 2, 3]).unwrap()).await.unwrap();
        assert!(staged
            .preview_data_uri()
            .await
            .unwrap()
            .starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn test_purge_stale_only_touches_staged_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("upload-old.jpg"), b"x").unwrap();
        std::fs::write(dir.path().join("upload-older.png"), b"x").unwrap();
        std::fs::write(dir.path().join("keep.txt"), b"x").unwrap();

        let staging = UploadStaging::new(dir.path());
        assert_eq!(staging.purge_stale().unwrap(), 2);
        assert!(dir.path().join("keep.txt").exists());

        let missing = UploadStaging::new(dir.path().join("absent"));
        assert_eq!(missing.purge_stale().unwrap(), 0);
    }
}
