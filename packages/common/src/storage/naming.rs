use super::error::StorageError;

/// Extension used for every stored chemical image.
const IMAGE_EXTENSION: &str = "png";

/// File name under which the image for `registry_number` is stored.
pub fn image_file_name(registry_number: &str) -> String {
    format!("{registry_number}.{IMAGE_EXTENSION}")
}

/// Public reference path for a stored file, e.g. `/img/71-43-2.png`.
pub fn image_reference(url_prefix: &str, file_name: &str) -> String {
    format!("{}/{}", url_prefix.trim_end_matches('/'), file_name)
}

/// The file name part of a stored reference: everything after the last `/`.
///
/// A reference without any `/` is returned unchanged.
pub fn file_name_from_reference(reference: &str) -> &str {
    match reference.rfind('/') {
        Some(pos) => &reference[pos + 1..],
        None => reference,
    }
}

/// Validates a flat file name (no directory components allowed).
pub fn validate_file_name(file_name: &str) -> Result<&str, StorageError> {
    if file_name.trim().is_empty() {
        return Err(StorageError::InvalidName("file name cannot be empty".into()));
    }

    if file_name.contains('\0') {
        return Err(StorageError::InvalidName(
            "null bytes are not allowed".into(),
        ));
    }

    if file_name.chars().any(|c| c.is_ascii_control()) {
        return Err(StorageError::InvalidName(
            "control characters are not allowed".into(),
        ));
    }

    if file_name.contains('/') || file_name.contains('\\') {
        return Err(StorageError::InvalidName(format!(
            "path separators are not allowed: {file_name:?}"
        )));
    }

    if file_name == "." || file_name == ".." {
        return Err(StorageError::InvalidName(format!(
            "'{file_name}' is not a file name"
        )));
    }

    if file_name.starts_with('.') {
        return Err(StorageError::InvalidName(format!(
            "hidden files are not allowed: {file_name:?}"
        )));
    }

    Ok(file_name)
}
