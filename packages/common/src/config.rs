use std::path::PathBuf;

use serde::Deserialize;

/// Image storage configuration shared by the server and its tests.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory holding one image per chemical. Default: "img".
    /// Relative paths are resolved against the working directory at startup.
    #[serde(default = "default_image_dir")]
    pub image_dir: PathBuf,
    /// URL prefix under which stored images are published. Default: "/img".
    #[serde(default = "default_url_prefix")]
    pub url_prefix: String,
    /// Largest accepted upload in bytes. Default: 10 MiB.
    #[serde(default = "default_max_image_size")]
    pub max_image_size: usize,
}

fn default_image_dir() -> PathBuf {
    PathBuf::from("img")
}
fn default_url_prefix() -> String {
    "/img".into()
}
fn default_max_image_size() -> usize {
    10 * 1024 * 1024
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            image_dir: default_image_dir(),
            url_prefix: default_url_prefix(),
            max_image_size: default_max_image_size(),
        }
    }
}

impl StorageConfig {
    /// Absolute image root, anchored at the current working directory when relative.
    pub fn resolved_image_dir(&self) -> std::io::Result<PathBuf> {
        if self.image_dir.is_absolute() {
            Ok(self.image_dir.clone())
        } else {
            Ok(std::env::current_dir()?.join(&self.image_dir))
        }
    }
}
