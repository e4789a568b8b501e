use std::{path::Path, process};

use clap::CommandFactory;
use darkroom_pool::WorkerPool;
use darkroom_raster::{invert_row, output_path, RasterImage};
use eyre::Context;

use crate::cli::Cli;

/// Runs the inversion for the parsed command line.
pub fn run(cli: Cli) -> eyre::Result<()> {
    let Some(image) = cli.image else {
        let _ = Cli::command().print_help();
        process::exit(1);
    };

    let pool = WorkerPool::new(cli.workers);
    invert_file(&pool, &image)
}

fn invert_file(pool: &WorkerPool, path: &Path) -> eyre::Result<()> {
    log::info!("loading image from '{}'", path.display());

    let mut image = match RasterImage::open(path) {
        Ok(image) => image,

        Err(e) => {
            // A failed load still spins the pool up and down; the
            // empty batch delivers every worker its shutdown message.
            // The load failure stays the reported cause even if that
            // teardown fails too.
            if let Err(batch) = pool.run_batch(Vec::<&mut [u8]>::new(), invert_row) {
                log::error!("worker teardown failed: {batch}");
            }
            return Err(e).with_context(|| format!("failed to process '{}'", path.display()));
        }
    };

    log::debug!(
        "loaded {}x{} pixels with {} channels",
        image.width(),
        image.height(),
        image.channels()
    );

    let rows: Vec<&mut [u8]> = image.rows_mut().collect();
    pool.run_batch(rows, invert_row)
        .with_context(|| format!("failed to invert rows of '{}'", path.display()))?;

    let output = output_path(path);
    image
        .save_png(&output)
        .with_context(|| format!("failed to write result to '{}'", output.display()))?;

    log::info!("saved inverted image to '{}'", output.display());

    Ok(())
}
