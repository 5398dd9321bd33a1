//! Input discovery.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::error::BatchError;

/// Extensions (lowercase, without the dot) treated as audio input.
pub const AUDIO_EXTENSIONS: &[&str] = &[
    "wav", "mp3", "m4a", "aac", "flac", "ogg", "opus", "wma", "aiff", "aif", "aifc", "caf",
];

/// Whether `path` has a supported audio extension (case-insensitive).
pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| AUDIO_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Expands files and directories into a sorted, de-duplicated list of
/// audio files.
///
/// Directories are walked recursively. Files without a supported extension
/// and paths that do not exist are skipped.
pub fn discover_inputs(paths: &[PathBuf]) -> Result<Vec<PathBuf>, BatchError> {
    let mut found = BTreeSet::new();

    for path in paths {
        if path.is_file() {
            if is_audio_file(path) {
                found.insert(path.clone());
            } else {
                debug!(path = %path.display(), "Skipping non-audio file");
            }
        } else if path.is_dir() {
            for entry in WalkDir::new(path) {
                match entry {
                    Ok(entry) if entry.path().is_file() && is_audio_file(entry.path()) => {
                        found.insert(entry.into_path());
                    }
                    Ok(_) => {}
                    Err(e) => warn!(root = %path.display(), "Skipping unreadable entry: {}", e),
                }
            }
        } else {
            warn!(path = %path.display(), "Input path does not exist");
        }
    }

    if found.is_empty() {
        return Err(BatchError::NoInputsFound {
            searched: paths.to_vec(),
        });
    }

    Ok(found.into_iter().collect())
}
