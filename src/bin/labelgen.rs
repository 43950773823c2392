//! CLI for batch separator-label generation.
//!
//! Walks a dataset root, synthesizes the row/column separator masks for every
//! record in parallel, and writes them next to each other as grayscale PNG
//! strips (`<stem>.rows.png` is 1 pixel wide, `<stem>.cols.png` is 1 pixel
//! tall) for quick inspection or downstream packing.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use rayon::prelude::*;
use tracing::{info, warn};

use split_labels::core::{DatasetConfig, LabelError};
use split_labels::dataset::SplitDataset;
use split_labels::utils::init_tracing;

#[derive(Parser, Debug)]
#[command(
    name = "labelgen",
    about = "Generate separator ground-truth masks for a split-model dataset"
)]
struct Args {
    /// Dataset root containing images/, gt/, and ocr/ directories.
    root: PathBuf,

    /// Output directory for the mask strips.
    #[arg(short, long, default_value = "labels")]
    out: PathBuf,

    /// Process at most this many records.
    #[arg(long)]
    limit: Option<usize>,
}

fn process_record(dataset: &SplitDataset, out: &PathBuf, index: usize) -> Result<(), LabelError> {
    let record = dataset.load_record(index)?;
    let masks = dataset.synthesize(&record)?;

    masks
        .rows
        .to_column_image()
        .save(out.join(format!("{}.rows.png", record.name)))?;
    masks
        .cols
        .to_row_image()
        .save(out.join(format!("{}.cols.png", record.name)))?;
    Ok(())
}

fn main() -> Result<(), LabelError> {
    init_tracing();
    let args = Args::parse();

    let dataset = SplitDataset::open(&args.root, DatasetConfig::default())?;
    let total = args.limit.unwrap_or(dataset.len()).min(dataset.len());
    fs::create_dir_all(&args.out)?;

    info!(records = total, out = %args.out.display(), "Generating separator masks");
    let start = Instant::now();

    let failures: Vec<(usize, LabelError)> = (0..total)
        .into_par_iter()
        .filter_map(|index| {
            process_record(&dataset, &args.out, index)
                .err()
                .map(|e| (index, e))
        })
        .collect();

    for (index, error) in &failures {
        let name = dataset.names().nth(*index).unwrap_or("<unknown>");
        warn!(record = name, error = %error, "Failed to generate masks");
    }

    info!(
        generated = total - failures.len(),
        failed = failures.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Done"
    );
    Ok(())
}
