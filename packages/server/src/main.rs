use std::sync::Arc;

use anyhow::Context;
use common::storage::filesystem::FilesystemImageStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

use catalog::config::AppConfig;
use catalog::label::LabelEncoder;
use catalog::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut config = AppConfig::load().context("Failed to load config")?;
    config.storage.image_dir = config
        .storage
        .resolved_image_dir()
        .context("Failed to resolve image directory")?;

    let db = catalog::database::init_db(&config.database)
        .await
        .context("Failed to initialize database")?;

    let images = FilesystemImageStore::new(
        config.storage.image_dir.clone(),
        config.storage.max_image_size as u64,
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!(
        image_dir = %config.storage.image_dir.display(),
        label_size = config.label.size,
        "Chemical catalog starting"
    );

    let state = AppState {
        db,
        images: Arc::new(images),
        labels: LabelEncoder::new(config.label.size),
        config,
    };

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server running at http://{}", addr);

    axum::serve(listener, catalog::build_router(state)).await?;

    Ok(())
}
