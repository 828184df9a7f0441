//! Filesystem-backed capture archive.
//!
//! The archive directory is shared with the external capture agent, which
//! writes `screenshot_<TS>.png` / `screenshot_<TS>.txt` pairs. This store is
//! strictly read-only: it discovers timestamps from text artifact names and
//! loads text content on demand. The `.png` companions are opaque and
//! ignored.
//!
//! A missing archive directory is the normal "no captures yet" state, not a
//! failure.

use crate::models::Timestamp;
use crate::{Error, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Filename prefix shared by all capture artifacts.
pub const ARTIFACT_PREFIX: &str = "screenshot_";

/// Extension of the text artifact carrying a capture's extracted content.
pub const TEXT_EXTENSION: &str = ".txt";

/// Builds the text artifact filename for a moment.
#[must_use]
pub fn text_artifact_name(moment: &Timestamp) -> String {
    format!("{ARTIFACT_PREFIX}{}{TEXT_EXTENSION}", moment.compact())
}

/// Extracts the capture timestamp from a text artifact filename.
///
/// Returns `None` for filenames that do not follow the
/// `screenshot_<TS>.txt` convention; such entries are not artifacts of this
/// system. A filename that follows the convention but carries an unparseable
/// timestamp also yields `None`.
#[must_use]
pub fn parse_artifact_name(name: &str) -> Option<Timestamp> {
    let stem = name
        .strip_prefix(ARTIFACT_PREFIX)?
        .strip_suffix(TEXT_EXTENSION)?;
    match Timestamp::parse(stem) {
        Ok(moment) => Some(moment),
        Err(_) => {
            tracing::debug!(file = %name, "skipping artifact with malformed timestamp");
            None
        },
    }
}

/// Read-only store over the capture archive directory.
pub struct ArchiveStore {
    /// The archive directory.
    base_path: PathBuf,
}

impl ArchiveStore {
    /// Creates a store over the given archive directory.
    ///
    /// The directory is not created and need not exist; see [`Self::scan`].
    #[must_use]
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Returns the archive directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.base_path
    }

    /// Discovers all capture timestamps, sorted ascending.
    ///
    /// Entries that do not follow the artifact naming convention are skipped
    /// silently; the scan never aborts on one bad name. A missing archive
    /// directory yields an empty set. Two artifacts can only collide on the
    /// same full second; the directory listing then carries one name, so the
    /// last-written file wins with no merge.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OperationFailed`] only for directory read failures
    /// other than the directory not existing.
    pub fn scan(&self) -> Result<Vec<Timestamp>> {
        let entries = match fs::read_dir(&self.base_path) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(dir = %self.base_path.display(), "archive directory missing");
                return Ok(Vec::new());
            },
            Err(e) => {
                return Err(Error::OperationFailed {
                    operation: "scan_archive".to_string(),
                    cause: e.to_string(),
                });
            },
        };

        let mut moments: Vec<Timestamp> = entries
            .filter_map(std::result::Result::ok)
            .filter_map(|entry| {
                entry
                    .file_name()
                    .to_str()
                    .and_then(parse_artifact_name)
            })
            .collect();

        moments.sort_unstable();
        tracing::debug!(count = moments.len(), "archive scan complete");
        Ok(moments)
    }

    /// Loads the extracted text content for one capture.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordNotFound`] when the text artifact is missing —
    /// typically a lost race with external deletion between scan and load, or
    /// a stale timestamp supplied by the caller. Other read failures map to
    /// [`Error::OperationFailed`].
    pub fn load(&self, moment: &Timestamp) -> Result<String> {
        let path = self.base_path.join(text_artifact_name(moment));
        fs::read_to_string(&path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                Error::RecordNotFound {
                    id: moment.compact(),
                    cause: e.to_string(),
                }
            } else {
                Error::OperationFailed {
                    operation: "load_record".to_string(),
                    cause: format!("{}: {e}", path.display()),
                }
            }
        })
    }
}
