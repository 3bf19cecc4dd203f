use common::storage::StorageError;
use sea_orm::DbErr;
use thiserror::Error;

use crate::label::LabelError;

/// Outcome of a failed catalog operation.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The requested id or identifier does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The request cannot be carried out as given.
    #[error("{0}")]
    Validation(String),

    #[error("database error: {0}")]
    Database(#[from] DbErr),

    #[error("image storage failed: {0}")]
    Storage(#[from] StorageError),

    #[error("label generation failed: {0}")]
    Label(#[from] LabelError),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
