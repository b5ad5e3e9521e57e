use crate::constants::DEFAULT_QUALITY;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "webp-squeeze",
    about = "Batch-convert JPEG and PNG images to compressed WebP",
    long_about = "webp-squeeze converts a single image, or every .jpg/.jpeg/.png file directly inside \
                  a directory, to lossy WebP. Images can be scaled down by a uniform factor first. \
                  A live table shows the size of each file before and after compression.",
    version,
    after_help = "EXAMPLES:\n  \
    webp-squeeze photo.jpg\n  \
    webp-squeeze ./images ./compressed -q 70\n  \
    webp-squeeze banner.png ./out -r 0.5"
)]
pub struct Args {
    #[arg(help = "Input image file or directory")]
    pub input: PathBuf,

    #[arg(
        help = "Output directory",
        long_help = "Directory to write .webp files into, created if missing. \
                     Defaults to the input directory when the input is a directory, \
                     otherwise to the current directory."
    )]
    pub output: Option<PathBuf>,

    #[arg(
        short = 'q',
        long,
        default_value_t = DEFAULT_QUALITY,
        help = "WebP quality (0-100)",
        long_help = "Lossy WebP quality from 0 (smallest) to 100 (best). \
                     The value is handed to the encoder unchanged."
    )]
    pub quality: u8,

    #[arg(
        short = 'r',
        long,
        help = "Resize factor, greater than 0 and at most 1",
        long_help = "Scale width and height by this factor before encoding. \
                     Each side becomes floor(side * factor)."
    )]
    pub resize: Option<f64>,

    #[arg(short = 'v', long, help = "Print debug diagnostics to stderr")]
    pub verbose: bool,
}
