pub const DEFAULT_QUALITY: u8 = 80;

/// Extensions picked up when the input is a directory. Compared lowercase.
pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

pub const OUTPUT_EXTENSION: &str = "webp";

pub const BYTES_PER_KB: f64 = 1024.0;

pub const TABLE_TITLE: &str = "Compression Details";
pub const TABLE_HEADERS: [&str; 4] = [
    "Original Path",
    "Original Size (KB)",
    "Compressed Size (KB)",
    "Savings (%)",
];
pub const SIZE_COLUMN_WIDTH: usize = 20;
pub const SAVINGS_COLUMN_WIDTH: usize = 12;

pub const PROGRESS_SPINNER_TEMPLATE: &str = "{spinner:.green} {msg}";
pub const SPINNER_TICK_MS: u64 = 250;

// Common output message prefixes
pub const SUMMARY_PREFIX: &str = "📊";
pub const SUCCESS_PREFIX: &str = "✅";
pub const WARNING_PREFIX: &str = "⚠️";
pub const ERROR_PREFIX: &str = "❌";
pub const RESIZE_PREFIX: &str = "🔄";
