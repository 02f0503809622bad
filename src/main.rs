//! h5meta - print the metadata of an HDF5 file as JSON.

use anyhow::Result;
use clap::Parser;
use h5meta::execute_extractor;
use h5meta::util::{write_json, OutputConfig};
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "h5meta")]
#[command(about = "Extract HDF5 file metadata as JSON", long_about = None)]
struct Args {
    /// Path to the HDF5 file to inspect
    file: Option<PathBuf>,

    /// Print the JSON document on a single line
    #[arg(long)]
    compact: bool,

    /// Enable logging to specified file
    #[arg(long)]
    log: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging if --log option is provided
    if let Some(log_path) = &args.log {
        let log_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_path)?;
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_ansi(false)
            .with_writer(Mutex::new(log_file))
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
        tracing::info!("Starting h5meta");
    }

    let Some(path) = args.file else {
        tracing::info!("No file given, nothing to process");
        return Ok(());
    };

    let config = if args.compact {
        OutputConfig::compact()
    } else {
        OutputConfig::default()
    };

    match execute_extractor(&path)? {
        Some(metadata) => {
            if metadata.is_empty() {
                eprintln!("Warning: could not open {} as HDF5", path.display());
            }
            write_json(&mut io::stdout().lock(), &metadata, &config)?;
        },
        None => eprintln!("Nothing processed: path not found: {}", path.display()),
    }

    if args.log.is_some() {
        tracing::info!("h5meta exited");
    }

    Ok(())
}
