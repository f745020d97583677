use std::io::Cursor;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use walkdir::WalkDir;

use crate::error::{ArchiveError, RecordingError};

/// An extracted archive on disk. The scratch directory and everything in it
/// is removed when the workspace is dropped.
pub struct ArchiveWorkspace {
    dir: TempDir,
    entries: Vec<PathBuf>,
}

impl ArchiveWorkspace {
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Selected entries in walk order, as `(file name, path)`.
    pub fn entries(&self) -> impl Iterator<Item = (String, &Path)> + '_ {
        self.entries.iter().map(|path| (file_name(path), path.as_path()))
    }

    /// Reads every selected entry in walk order. A file that cannot be read
    /// yields an error for that entry only.
    pub fn read_entries(&self) -> Vec<(String, Result<Vec<u8>, RecordingError>)> {
        self.entries()
            .map(|(name, path)| {
                let bytes = std::fs::read(path).map_err(|e| RecordingError::Read(e.to_string()));
                (name, bytes)
            })
            .collect()
    }
}

/// Extracts a zip archive into a fresh scratch directory and selects the
/// files whose name ends with `extension` (case-sensitive).
pub fn expand(archive_bytes: &[u8], extension: &str) -> Result<ArchiveWorkspace, ArchiveError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(archive_bytes))
        .map_err(|e| ArchiveError::Open(e.to_string()))?;

    let dir = tempfile::Builder::new().prefix("gpx-archive-").tempdir()?;

    archive
        .extract(dir.path())
        .map_err(|e| ArchiveError::Extract(e.to_string()))?;

    let mut entries = Vec::new();
    for entry in WalkDir::new(dir.path())
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| ArchiveError::Extract(e.to_string()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.file_name().to_string_lossy().ends_with(extension) {
            entries.push(entry.into_path());
        } else {
            tracing::debug!("Skipping archive entry {}", entry.path().display());
        }
    }

    tracing::debug!(
        "Expanded archive into {} ({} recordings selected)",
        dir.path().display(),
        entries.len()
    );

    Ok(ArchiveWorkspace { dir, entries })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
