use std::fs;
use std::path::Path;
use thiserror::Error;

/// Reasons a content file is refused before it is read.
#[derive(Debug, Error)]
pub enum ContentFileError {
    #[error("failed to read metadata of {path}: {source}")]
    Metadata {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Security: {path} is a symbolic link. For security reasons, symbolic links are not allowed.")]
    Symlink { path: String },

    #[error("{path} is not a regular file")]
    NotRegularFile { path: String },

    #[error("Security: {path} is too large ({size} bytes). Maximum allowed size is {limit} bytes.")]
    TooLarge { path: String, size: u64, limit: u64 },
}

/// Validates that a path is a regular file (not a directory or symlink)
/// within the size limit, and returns its size.
///
/// # Security
/// Uses `symlink_metadata()` so the link itself is checked, not its target.
pub fn validate_content_file(path: &Path, max_size: u64) -> Result<u64, ContentFileError> {
    let display = path.display().to_string();
    let metadata = fs::symlink_metadata(path).map_err(|source| ContentFileError::Metadata {
        path: display.clone(),
        source,
    })?;

    if metadata.is_symlink() {
        return Err(ContentFileError::Symlink { path: display });
    }

    if !metadata.is_file() {
        return Err(ContentFileError::NotRegularFile { path: display });
    }

    let size = metadata.len();
    if size > max_size {
        return Err(ContentFileError::TooLarge {
            path: display,
            size,
            limit: max_size,
        });
    }

    Ok(size)
}

/// Strips query parameters from a location before it is logged.
///
/// Signed layer URLs carry credentials in their query string.
pub fn clean_location(location: &str) -> &str {
    location.split('?').next().unwrap_or(location)
}
