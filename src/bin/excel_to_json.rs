//! Convert every Excel workbook in a directory to JSON.
//!
//! Invoked with no arguments it reads `data/excel` and writes `data/json`.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use xlsxjson::{BatchConverter, ConverterBuilder, DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR};

#[derive(Parser)]
#[command(name = "excel_to_json")]
#[command(version, about = "Convert Excel workbooks to JSON files", long_about = None)]
struct Cli {
    /// Directory containing .xlsx / .xls workbooks
    #[arg(long, default_value = DEFAULT_INPUT_DIR)]
    input_dir: PathBuf,

    /// Directory the JSON files are written to
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let converter = ConverterBuilder::new().build()?;
    let batch = BatchConverter::new(converter, &cli.input_dir, &cli.output_dir);

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    batch
        .run(&mut handle)
        .with_context(|| format!("Failed to convert workbooks in {}", cli.input_dir.display()))?;

    Ok(())
}
