pub mod batch;
pub mod cli;
pub mod constants;
pub mod error;
pub mod processing;
pub mod report;
pub mod resolve;

pub use batch::{compress_batch, ensure_output_dir, output_dir_for, run};
pub use error::{CompressionError, Result};
pub use processing::{
    compress, encode_webp, load_image, output_path_for, resize_image, savings_percent,
    scaled_dimensions, CompressionConfig, CompressionResult,
};
pub use report::{format_row, format_savings, BatchSummary, Reporter};
pub use resolve::{is_supported_image, resolve_input, ResolvedInput};
