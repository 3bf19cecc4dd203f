use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use super::error::StorageError;
use super::naming::validate_file_name;
use super::traits::ImageStore;

/// Filesystem-backed image store.
///
/// Images live directly under `{root}/{file_name}`. The root is created on
/// first write, so a missing directory is not an error until then.
pub struct FilesystemImageStore {
    root: PathBuf,
    max_size: u64,
}

impl FilesystemImageStore {
    /// Create a store rooted at `root`.
    pub fn new(root: PathBuf, max_size: u64) -> Self {
        Self { root, max_size }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Compute the filesystem path for a validated file name.
    fn file_path(&self, file_name: &str) -> Result<PathBuf, StorageError> {
        Ok(self.root.join(validate_file_name(file_name)?))
    }

    /// Path for a temporary file during writes. Kept in the root so the
    /// final rename never crosses filesystems.
    fn temp_path(&self) -> PathBuf {
        self.root
            .join(format!(".{}.tmp", uuid::Uuid::new_v4()))
    }
}

#[async_trait]
impl ImageStore for FilesystemImageStore {
    async fn write(&self, file_name: &str, data: &[u8]) -> Result<PathBuf, StorageError> {
        if data.len() as u64 > self.max_size {
            return Err(StorageError::SizeLimitExceeded {
                actual: data.len() as u64,
                limit: self.max_size,
            });
        }

        let target = self.file_path(file_name)?;
        fs::create_dir_all(&self.root).await?;

        let temp_path = self.temp_path();
        if let Err(e) = fs::write(&temp_path, data).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        if let Err(e) = fs::rename(&temp_path, &target).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        debug!(path = %target.display(), bytes = data.len(), "image written");
        Ok(target)
    }

    async fn delete(&self, file_name: &str) -> Result<bool, StorageError> {
        let path = self.file_path(file_name)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self, file_name: &str) -> Result<bool, StorageError> {
        let path = self.file_path(file_name)?;
        Ok(fs::try_exists(&path).await?)
    }

    async fn read(&self, file_name: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.file_path(file_name)?;
        Ok(fs::read(&path).await?)
    }
}
