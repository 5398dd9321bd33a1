//! Output path derivation.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::preset::Codec;

/// Appended to the file stem when the derived output would overwrite
/// its own input.
pub const COLLISION_MARKER: &str = "-compressed";

/// Where encoded files go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// One explicit output file (single input only).
    File(PathBuf),
    /// A directory; file names are derived from the inputs.
    Directory(PathBuf),
    /// Next to each input, with an optional suffix on the stem.
    Alongside { suffix: String },
}

impl OutputTarget {
    /// Picks the target from the user's `--output` and `--suffix`.
    ///
    /// An explicit output names a file only when there is exactly one input
    /// and the path is not an existing directory; otherwise it is a
    /// directory.
    pub fn choose(output: Option<PathBuf>, suffix: impl Into<String>, input_count: usize) -> Self {
        match output {
            Some(path) if input_count == 1 && !path.is_dir() => Self::File(path),
            Some(path) => Self::Directory(path),
            None => Self::Alongside {
                suffix: suffix.into(),
            },
        }
    }
}

/// Derives the output path for `input`.
///
/// The result never equals `input`: if it would, [`COLLISION_MARKER`] is
/// appended to the input's stem and the input's extension is kept.
pub fn output_path_for(input: &Path, target: &OutputTarget, codec: Codec) -> PathBuf {
    let parent = input.parent().unwrap_or_else(|| Path::new(""));

    let candidate = match target {
        OutputTarget::File(path) => path.clone(),
        OutputTarget::Directory(dir) => dir.join(derived_name(input, "", Some(codec.extension()))),
        OutputTarget::Alongside { suffix } => {
            parent.join(derived_name(input, suffix, Some(codec.extension())))
        }
    };

    if is_same_path(&candidate, input) {
        let ext = input.extension().and_then(|e| e.to_str());
        return parent.join(derived_name(input, COLLISION_MARKER, ext));
    }

    candidate
}

fn derived_name(input: &Path, suffix: &str, extension: Option<&str>) -> OsString {
    let mut name = input.file_stem().map(OsString::from).unwrap_or_default();
    name.push(suffix);
    if let Some(ext) = extension {
        name.push(".");
        name.push(ext);
    }
    name
}

fn is_same_path(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
