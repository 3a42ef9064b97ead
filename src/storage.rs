//! Media storage for uploaded images.
//!
//! A thin object-storage facade over a directory tree: uploads land under
//! `<media_dir>/<folder>/`, are served by whatever file server fronts that
//! directory, and are referenced everywhere else by their relative stored
//! path ("rooms/3fb2a9c4d1e08b77.jpg"). URL construction lives in
//! [`crate::resolver`]; this module only touches files.
//!
//! ## Validation
//!
//! Uploads are validated before any byte is written: the declared content
//! type must start with `image/` and the filename extension must be one of
//! the allow-list (jpg, jpeg, png, webp). A rejected upload performs zero
//! filesystem writes.
//!
//! ## Stored names
//!
//! Stored filenames are **content-addressed**: the first 16 hex chars of the
//! SHA-256 of the file contents, plus the original extension. Distinct files
//! sharing a folder cannot collide, and re-uploading identical bytes lands
//! on the same path instead of accumulating duplicates.

use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Filename extensions accepted for upload.
pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Length of the content-hash prefix used for stored filenames. 64 bits of
/// hash is far beyond what a guesthouse's media library can collide.
const STORED_NAME_LEN: usize = 16;

/// File operations over the media root directory.
#[derive(Debug, Clone)]
pub struct MediaStorage {
    root: PathBuf,
}

impl MediaStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of a stored object.
    pub fn object_path(&self, stored_path: &str) -> PathBuf {
        self.root.join(stored_path)
    }

    /// Validate and store an uploaded file, returning its stored path.
    ///
    /// `original_name` supplies the extension, `declared_content_type` is
    /// the uploader's claim (e.g. "image/jpeg"). Both are checked before
    /// anything is written.
    pub fn upload(
        &self,
        original_name: &str,
        declared_content_type: &str,
        bytes: &[u8],
        folder: &str,
    ) -> Result<String, StorageError> {
        let ext = validate_upload(original_name, declared_content_type)?;
        validate_folder(folder)?;

        let name = stored_name(bytes, &ext);
        let relative = format!("{folder}/{name}");

        let dir = self.root.join(folder);
        fs::create_dir_all(&dir)?;
        fs::write(self.root.join(&relative), bytes)?;
        Ok(relative)
    }

    /// Remove stored objects. Paths that no longer exist are skipped — the
    /// end state (object absent) is what the caller asked for.
    pub fn remove(&self, paths: &[String]) -> Result<(), StorageError> {
        for path in paths {
            match fs::remove_file(self.root.join(path)) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    /// List stored paths under a folder, sorted by name. A folder that was
    /// never written to is an empty listing, not an error.
    pub fn list(&self, folder: &str) -> Result<Vec<String>, StorageError> {
        validate_folder(folder)?;
        let dir = self.root.join(folder);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut paths: Vec<String> = entries
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file())
            .map(|e| format!("{folder}/{}", e.file_name().to_string_lossy()))
            .collect();
        paths.sort();
        Ok(paths)
    }

    /// Replace the contents of a single-slot folder (the hero image slot):
    /// delete whatever is stored there, then upload the new file.
    ///
    /// The two steps are independently fallible with no rollback — a failed
    /// upload after a successful delete leaves the slot empty, which the
    /// caller surfaces rather than papering over.
    pub fn replace_in_folder(
        &self,
        folder: &str,
        original_name: &str,
        declared_content_type: &str,
        bytes: &[u8],
    ) -> Result<String, StorageError> {
        // Validate before deleting anything: a rejected file must not
        // destroy the current slot contents.
        validate_upload(original_name, declared_content_type)?;

        let existing = self.list(folder)?;
        self.remove(&existing)?;
        self.upload(original_name, declared_content_type, bytes, folder)
    }
}

/// Check the declared content type and extension, returning the normalized
/// extension on success.
fn validate_upload(original_name: &str, declared_content_type: &str) -> Result<String, StorageError> {
    if !declared_content_type.starts_with("image/") {
        return Err(StorageError::Validation(format!(
            "not an image: declared content type is '{declared_content_type}'"
        )));
    }

    let ext = Path::new(original_name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(StorageError::Validation(format!(
            "unsupported image extension '{ext}' (allowed: {})",
            ALLOWED_EXTENSIONS.join(", ")
        )));
    }
    Ok(ext)
}

/// A destination folder is one or more path segments, no traversal.
fn validate_folder(folder: &str) -> Result<(), StorageError> {
    let well_formed = !folder.is_empty()
        && folder
            .split('/')
            .all(|seg| !seg.is_empty() && seg != "." && seg != "..");
    if well_formed {
        Ok(())
    } else {
        Err(StorageError::Validation(format!(
            "invalid destination folder '{folder}'"
        )))
    }
}

/// Content-addressed stored filename: truncated SHA-256 hex plus extension.
fn stored_name(bytes: &[u8], ext: &str) -> String {
    let digest = Sha256::digest(bytes);
    let hex = format!("{digest:x}");
    format!("{}.{ext}", &hex[..STORED_NAME_LEN])
}
