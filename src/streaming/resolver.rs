//! Storage resolver: maps a requested filename to an open file under the
//! storage root.
//!
//! Filenames come from the upload side and are unique, but nothing stops a
//! client from sending `..`, separators or an absolute path, so every name is
//! checked lexically and then again after canonicalization (symlinks).

use std::path::{Component, Path, PathBuf};

use homestream_common::paths::content_type_for;
use homestream_common::{Error, Result};
use tokio::fs::File;

/// Canonicalized directory that all served files must live under.
#[derive(Debug, Clone)]
pub struct StorageRoot {
    root: PathBuf,
}

/// A single playable file, opened for this request only.
///
/// `size` is read from the open handle, so it reflects the file as it is
/// right now rather than whatever was uploaded.
#[derive(Debug)]
pub struct MediaResource {
    path: PathBuf,
    size: u64,
    content_type: &'static str,
    file: File,
}

impl StorageRoot {
    /// Canonicalize `path` and use it as the storage root.
    pub fn new(path: &Path) -> Result<Self> {
        let root = std::fs::canonicalize(path).map_err(|e| {
            Error::invalid_input(format!(
                "Storage root {} is not accessible: {e}",
                path.display()
            ))
        })?;
        if !root.is_dir() {
            return Err(Error::invalid_input(format!(
                "Storage root {} is not a directory",
                root.display()
            )));
        }
        Ok(Self { root })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Resolve `filename` to an open regular file inside the root.
    ///
    /// Traversal attempts are rejected before the filesystem is touched.
    /// Missing, unreadable and non-regular files are all `NotFound`, and
    /// non-regular files are never opened (a FIFO would block the open).
    pub async fn resolve(&self, filename: &str) -> Result<MediaResource> {
        validate_filename(filename)?;

        let candidate = self.root.join(filename);
        let canonical = match tokio::fs::canonicalize(&candidate).await {
            Ok(p) => p,
            Err(_) => return Err(Error::not_found(filename)),
        };

        // A symlink inside the root may still point elsewhere.
        if !canonical.starts_with(&self.root) {
            tracing::warn!(
                filename,
                target = %canonical.display(),
                "Rejected symlink escaping storage root"
            );
            return Err(Error::path_traversal(filename));
        }

        match tokio::fs::metadata(&canonical).await {
            Ok(metadata) if metadata.is_file() => {}
            _ => return Err(Error::not_found(filename)),
        }

        let file = File::open(&canonical)
            .await
            .map_err(|_| Error::not_found(filename))?;
        // Re-checked on the handle in case the entry was swapped after the
        // lookup above.
        let metadata = file
            .metadata()
            .await
            .map_err(|_| Error::not_found(filename))?;
        if !metadata.is_file() {
            return Err(Error::not_found(filename));
        }

        Ok(MediaResource {
            content_type: content_type_for(Path::new(filename)),
            size: metadata.len(),
            path: canonical,
            file,
        })
    }
}

impl MediaResource {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn content_type(&self) -> &'static str {
        self.content_type
    }

    /// Give up the metadata and keep only the open handle.
    pub fn into_file(self) -> File {
        self.file
    }
}

/// Lexical checks on a requested filename.
///
/// Only a single plain path component is accepted: no separators, no NUL,
/// no `.`/`..`, no absolute or drive-prefixed paths. Hidden dot-files are
/// never served and report as missing.
pub fn validate_filename(filename: &str) -> Result<()> {
    if filename.is_empty() {
        return Err(Error::invalid_input("Empty filename"));
    }

    if filename.contains('/') || filename.contains('\\') || filename.contains('\0') {
        return Err(Error::path_traversal(filename));
    }

    let mut components = Path::new(filename).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if filename.starts_with('.') => {
            Err(Error::not_found(filename))
        }
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(Error::path_traversal(filename)),
    }
}
