use crate::constants::{
    PROGRESS_SPINNER_TEMPLATE, RESIZE_PREFIX, SAVINGS_COLUMN_WIDTH,
    SIZE_COLUMN_WIDTH, SPINNER_TICK_MS, SUCCESS_PREFIX, SUMMARY_PREFIX, TABLE_HEADERS,
    WARNING_PREFIX,
};
use crate::error::Result;
use crate::processing::{bytes_to_kb, savings_percent, CompressionResult};
use console::{measure_text_width, pad_str, style, Alignment};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Totals for a finished batch.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    pub files_processed: usize,
    pub total_original_bytes: u64,
    pub total_compressed_bytes: u64,
    pub overall_savings_percent: f64,
    pub elapsed: Duration,
}

impl BatchSummary {
    pub fn from_results(results: &[CompressionResult], elapsed: Duration) -> Self {
        let total_original_bytes = results.iter().map(|r| r.original_bytes).sum();
        let total_compressed_bytes = results.iter().map(|r| r.compressed_bytes).sum();

        Self {
            files_processed: results.len(),
            total_original_bytes,
            total_compressed_bytes,
            overall_savings_percent: savings_percent(total_original_bytes, total_compressed_bytes),
            elapsed,
        }
    }
}

/// Live compression table.
///
/// Rows are written to `out` as soon as each result is pushed, while a
/// spinner on stderr shows the file currently being compressed. Pushed
/// results are kept in order and never modified.
pub struct Reporter<W: Write = io::Stdout> {
    out: W,
    spinner: ProgressBar,
    results: Vec<CompressionResult>,
    path_width: usize,
    started: Instant,
}

impl Reporter<io::Stdout> {
    /// Table on stdout, spinner on stderr.
    pub fn new(title: &str, files: &[PathBuf]) -> Result<Self> {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template(PROGRESS_SPINNER_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));

        Self::with_output(title, files, io::stdout(), spinner)
    }
}

impl<W: Write> Reporter<W> {
    /// Builds a reporter over any writer. The path column is sized to fit the
    /// longest of `files`, so rows line up without buffering the table.
    pub fn with_output(title: &str, files: &[PathBuf], out: W, spinner: ProgressBar) -> Result<Self> {
        let path_width = files
            .iter()
            .map(|p| measure_text_width(&display_path(p)))
            .chain(std::iter::once(measure_text_width(TABLE_HEADERS[0])))
            .max()
            .unwrap_or_default();

        let mut reporter = Self {
            out,
            spinner,
            results: Vec::with_capacity(files.len()),
            path_width,
            started: Instant::now(),
        };
        reporter.write_header(title)?;
        Ok(reporter)
    }

    fn write_header(&mut self, title: &str) -> Result<()> {
        let [path, original, compressed, savings] = TABLE_HEADERS;
        let header = format!(
            "{}{}",
            self.leading_columns(path, original, compressed),
            pad_str(savings, SAVINGS_COLUMN_WIDTH, Alignment::Right, None)
        );
        let rule = "─".repeat(measure_text_width(&header));
        let title = style(title).bold().to_string();

        self.emit(&[title, header, rule])
    }

    /// Shows which file is being compressed next.
    pub fn start_file(&self, path: &Path, index: usize, total: usize) {
        self.spinner.set_message(format!(
            "Compressing {} ({}/{})",
            display_path(path),
            index + 1,
            total
        ));
    }

    /// Appends a result and prints its row immediately.
    pub fn push(&mut self, result: CompressionResult) -> Result<()> {
        let [path, original, compressed, savings] = format_row(&result);
        let negative = result.savings_percent < 0.0;

        let mut row = self.leading_columns(&path, &original, &compressed);
        let savings = pad_str(&savings, SAVINGS_COLUMN_WIDTH, Alignment::Right, None).into_owned();
        let savings = if negative {
            style(savings).red()
        } else {
            style(savings).green()
        };
        row.push_str(&savings.to_string());

        let mut lines = vec![row];
        if result.resized {
            let (width, height) = result.dimensions;
            lines.push(
                style(format!("  {} resized to {}x{}", RESIZE_PREFIX, width, height))
                    .yellow()
                    .to_string(),
            );
        }

        self.emit(&lines)?;
        self.results.push(result);
        Ok(())
    }

    pub fn results(&self) -> &[CompressionResult] {
        &self.results
    }

    #[cfg(test)]
    fn writer(&self) -> &W {
        &self.out
    }

    /// Clears the spinner and prints the totals footer.
    pub fn finish(&mut self) -> Result<BatchSummary> {
        self.spinner.finish_and_clear();
        let summary = BatchSummary::from_results(&self.results, self.started.elapsed());

        let line = if summary.files_processed == 0 {
            format!("{}  No image files found to compress", WARNING_PREFIX)
        } else {
            format!(
                "{} {} {}: {:.2} KB -> {:.2} KB ({} saved) in {:.2?}",
                SUMMARY_PREFIX,
                summary.files_processed,
                if summary.files_processed == 1 { "file" } else { "files" },
                bytes_to_kb(summary.total_original_bytes),
                bytes_to_kb(summary.total_compressed_bytes),
                format_savings(summary.overall_savings_percent),
                summary.elapsed
            )
        };
        self.emit(&[String::new(), line])?;

        if summary.files_processed > 0 {
            self.emit(&[format!("{} Compression complete", SUCCESS_PREFIX)])?;
        }

        Ok(summary)
    }

    /// Stops the spinner after a fatal error. Rows already printed stay on
    /// screen; the error itself is reported by the caller.
    pub fn abort(&self) {
        self.spinner.abandon_with_message("Aborted");
    }

    /// Path and size columns, padded, with the gap before the savings column.
    fn leading_columns(&self, path: &str, original: &str, compressed: &str) -> String {
        format!(
            "{}  {}  {}  ",
            pad_str(path, self.path_width, Alignment::Left, None),
            pad_str(original, SIZE_COLUMN_WIDTH, Alignment::Right, None),
            pad_str(compressed, SIZE_COLUMN_WIDTH, Alignment::Right, None),
        )
    }

    fn emit(&mut self, lines: &[String]) -> Result<()> {
        let out = &mut self.out;
        self.spinner.suspend(|| -> io::Result<()> {
            for line in lines {
                writeln!(out, "{}", line.trim_end())?;
            }
            out.flush()
        })?;
        Ok(())
    }
}

/// Cell text for one result, uncoloured.
pub fn format_row(result: &CompressionResult) -> [String; 4] {
    [
        display_path(&result.original_path),
        format!("{:.2}", result.original_size_kb),
        format!("{:.2}", result.compressed_size_kb),
        format_savings(result.savings_percent),
    ]
}

pub fn format_savings(percent: f64) -> String {
    format!("{:.2}%", percent)
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}
