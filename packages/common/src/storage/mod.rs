mod error;
mod naming;
mod traits;

pub mod filesystem;

pub use error::StorageError;
pub use naming::{file_name_from_reference, image_file_name, image_reference, validate_file_name};
pub use traits::ImageStore;
