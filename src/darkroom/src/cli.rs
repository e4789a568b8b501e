use std::{num::NonZeroUsize, path::PathBuf};

use clap::Parser;
use darkroom_pool::DEFAULT_WORKERS;

mod args;
pub use args::Verbosity;

/// The CLI interface for the darkroom application.
#[derive(Debug, Parser)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    /// The path to the image file to invert.
    ///
    /// The result is written next to the input as
    /// `<name>_inverted.png`; the input file itself stays untouched.
    pub image: Option<PathBuf>,

    /// The number of worker threads processing image rows.
    #[clap(short, long, env = "DARKROOM_WORKERS", default_value_t = DEFAULT_WORKERS)]
    pub workers: NonZeroUsize,

    #[clap(flatten)]
    pub verbosity: Verbosity,
}
