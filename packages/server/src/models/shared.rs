use serde::Serialize;

use crate::error::AppError;

/// Default page size for list endpoints.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Pagination metadata included in list responses.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Current page number (0-based).
    #[schema(example = 0)]
    pub current_page: u64,
    /// Total number of pages.
    #[schema(example = 3)]
    pub total_pages: u64,
    /// Total number of records across all pages.
    #[schema(example = 27)]
    pub total_elements: u64,
    /// Number of items per page.
    #[schema(example = 10)]
    pub size: u64,
}

/// Reject an empty page size. There is no upper bound.
pub fn validate_page_size(size: u64) -> Result<u64, AppError> {
    if size == 0 {
        return Err(AppError::Validation("size must be at least 1".into()));
    }
    Ok(size)
}
