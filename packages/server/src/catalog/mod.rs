mod error;
mod service;
mod store;

pub use error::{CatalogError, Result};
pub use service::{CatalogService, DeleteOutcome, ImageCleanup};
pub use store::{ChemicalPage, ChemicalStore};
