use std::path::PathBuf;

use async_trait::async_trait;

use super::error::StorageError;

/// Flat directory of images addressed by file name.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Write `data` under `file_name`, replacing any existing file.
    ///
    /// Returns the on-disk location of the written file.
    async fn write(&self, file_name: &str, data: &[u8]) -> Result<PathBuf, StorageError>;

    /// Delete the file named `file_name`.
    ///
    /// Returns `true` if the file was deleted, `false` if it did not exist.
    async fn delete(&self, file_name: &str) -> Result<bool, StorageError>;

    /// Check whether a file exists.
    async fn exists(&self, file_name: &str) -> Result<bool, StorageError>;

    /// Read back the full contents of a file.
    async fn read(&self, file_name: &str) -> Result<Vec<u8>, StorageError>;
}
