use std::sync::Arc;

use common::storage::ImageStore;
use sea_orm::DatabaseConnection;

use crate::catalog::CatalogService;
use crate::config::AppConfig;
use crate::label::LabelEncoder;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub images: Arc<dyn ImageStore>,
    pub labels: LabelEncoder,
    pub config: AppConfig,
}

impl AppState {
    /// Catalog service bound to the shared connection pool.
    pub fn catalog(&self) -> CatalogService<'_, DatabaseConnection> {
        CatalogService::new(
            &self.db,
            &*self.images,
            &self.config.storage.url_prefix,
            self.labels,
        )
    }
}
