use crate::constants::SUPPORTED_IMAGE_EXTENSIONS;
use crate::error::{CompressionError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// What the input path turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedInput {
    /// A single file, taken as-is without extension filtering.
    File(PathBuf),
    /// A directory and the image files directly inside it.
    Directory { dir: PathBuf, files: Vec<PathBuf> },
}

impl ResolvedInput {
    /// The files to compress, in processing order.
    pub fn files(&self) -> &[PathBuf] {
        match self {
            ResolvedInput::File(path) => std::slice::from_ref(path),
            ResolvedInput::Directory { files, .. } => files,
        }
    }

    #[cfg(test)]
    fn is_directory(&self) -> bool {
        matches!(self, ResolvedInput::Directory { .. })
    }
}

/// Resolves the input path into the list of images to process.
///
/// # Returns
/// * `Ok(ResolvedInput::File)` for anything that is not a directory
/// * `Ok(ResolvedInput::Directory)` with the `.jpg`/`.jpeg`/`.png` entries of
///   the directory, sorted by file name. Subdirectories are not entered.
/// * `Err(CompressionError::InputNotFound)` if the path does not exist
pub fn resolve_input(input: &Path) -> Result<ResolvedInput> {
    if !input.exists() {
        return Err(CompressionError::InputNotFound(input.to_path_buf()));
    }

    let canonical_input = input
        .canonicalize()
        .map_err(|_| CompressionError::InputNotFound(input.to_path_buf()))?;

    if !canonical_input.is_dir() {
        debug!("Resolved single input file {:?}", canonical_input);
        return Ok(ResolvedInput::File(canonical_input));
    }

    let walker = WalkDir::new(&canonical_input)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable directory entry: {}", e);
                continue;
            }
        };
        let path = entry.path();

        if entry.file_type().is_file() && is_supported_image(path) {
            files.push(path.to_path_buf());
        } else {
            debug!("Skipping {:?}", path);
        }
    }

    debug!(
        "Found {} image files in {:?}",
        files.len(),
        canonical_input
    );

    Ok(ResolvedInput::Directory {
        dir: canonical_input,
        files,
    })
}

pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext_lower = ext.to_lowercase();
            SUPPORTED_IMAGE_EXTENSIONS.contains(&ext_lower.as_str())
        })
        .unwrap_or(false)
}
