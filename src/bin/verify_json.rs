//! Print the structure of a converted budget JSON file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use xlsxjson::verify::{verify_file, DEFAULT_VERIFY_PATH};

#[derive(Parser)]
#[command(name = "verify_json")]
#[command(version, about = "Verify a converted JSON file", long_about = None)]
struct Cli {
    /// JSON file to inspect
    #[arg(default_value = DEFAULT_VERIFY_PATH)]
    file: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let report = verify_file(&cli.file)
        .with_context(|| format!("Failed to verify {}", cli.file.display()))?;
    print!("{}", report);

    Ok(())
}
