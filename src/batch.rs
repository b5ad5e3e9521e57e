use crate::constants::TABLE_TITLE;
use crate::error::{CompressionError, Result};
use crate::processing::{compress, CompressionConfig};
use crate::report::{BatchSummary, Reporter};
use crate::resolve::{resolve_input, ResolvedInput};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Compresses everything `input` resolves to and renders the live table.
///
/// The first failing file aborts the whole run; rows printed before it stay
/// on screen but the run returns the error.
pub fn run(input: &Path, output: Option<&Path>, config: &CompressionConfig) -> Result<BatchSummary> {
    let resolved = resolve_input(input)?;
    let output_dir = output_dir_for(&resolved, output);

    info!(
        "Compressing {} file(s) from {:?} into {:?} (quality {}, resize {:?})",
        resolved.files().len(),
        input,
        output_dir,
        config.quality,
        config.resize_factor
    );

    if !resolved.files().is_empty() {
        ensure_output_dir(&output_dir)?;
    }

    let mut reporter = Reporter::new(TABLE_TITLE, resolved.files())?;
    if let Err(e) = compress_batch(resolved.files(), &output_dir, config, &mut reporter) {
        reporter.abort();
        return Err(e);
    }

    reporter.finish()
}

/// Compresses `files` one at a time, in order, pushing each result to the
/// reporter as soon as it is available. Stops at the first error.
pub fn compress_batch<W: Write>(
    files: &[PathBuf],
    output_dir: &Path,
    config: &CompressionConfig,
    reporter: &mut Reporter<W>,
) -> Result<()> {
    let total = files.len();

    for (index, file) in files.iter().enumerate() {
        reporter.start_file(file, index, total);
        let result = compress(file, output_dir, config)?;
        reporter.push(result)?;
    }

    Ok(())
}

/// Where output goes when no directory was given: next to the images for a
/// directory input, the current directory for a single file.
pub fn output_dir_for(resolved: &ResolvedInput, output: Option<&Path>) -> PathBuf {
    match (output, resolved) {
        (Some(dir), _) => dir.to_path_buf(),
        (None, ResolvedInput::Directory { dir, .. }) => dir.clone(),
        (None, ResolvedInput::File(_)) => PathBuf::from("."),
    }
}

/// Creates the output directory and its parents if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        return Ok(());
    }

    debug!("Creating output directory {:?}", dir);
    fs::create_dir_all(dir).map_err(|source| CompressionError::OutputDirectory {
        path: dir.to_path_buf(),
        source,
    })
}
