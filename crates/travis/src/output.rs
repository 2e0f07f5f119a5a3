//! Writing the rendered descriptor to disk.

use crate::emitter::{EmitterError, EmitterResult};
use std::path::Path;

/// Status of a descriptor write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// File was newly created.
    Created,
    /// File existed and was updated with new content.
    Updated,
    /// File existed and content was unchanged.
    Unchanged,
    /// Would be created (dry-run mode).
    WouldCreate,
    /// Would be updated (dry-run mode).
    WouldUpdate,
}

impl std::fmt::Display for FileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created => write!(f, "Created"),
            Self::Updated => write!(f, "Updated"),
            Self::Unchanged => write!(f, "Unchanged"),
            Self::WouldCreate => write!(f, "Would create"),
            Self::WouldUpdate => write!(f, "Would update"),
        }
    }
}

/// Write `content` to `path`, or in `dry_run` mode only report what would happen.
///
/// A file whose content already equals `content` is left untouched.
///
/// # Errors
///
/// Returns [`EmitterError::Io`] if the existing file cannot be read or the new
/// content cannot be written.
pub fn write_descriptor(path: &Path, content: &str, dry_run: bool) -> EmitterResult<FileStatus> {
    let io_error = |source| EmitterError::Io {
        source,
        path: path.to_path_buf(),
    };

    let existing = if path.exists() {
        Some(std::fs::read_to_string(path).map_err(io_error)?)
    } else {
        None
    };

    let status = match (existing.as_deref(), dry_run) {
        (Some(current), _) if current == content => FileStatus::Unchanged,
        (Some(_), true) => FileStatus::WouldUpdate,
        (None, true) => FileStatus::WouldCreate,
        (Some(_), false) => FileStatus::Updated,
        (None, false) => FileStatus::Created,
    };

    if matches!(status, FileStatus::Created | FileStatus::Updated) {
        std::fs::write(path, content).map_err(io_error)?;
    }

    tracing::info!(path = %path.display(), status = %status, "Processed Travis descriptor");
    Ok(status)
}
