use clap::{Parser, Subcommand};
use crochrome::imaging::Smoothing;
use crochrome::pacing::NoPacing;
use crochrome::session::Session;
use crochrome::{catalog, intake, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "crochrome")]
#[command(about = "Batch-resize images to Chrome Web Store asset dimensions")]
#[command(long_about = "\
Batch-resize images to Chrome Web Store asset dimensions

The store only accepts assets at fixed pixel sizes. This tool stretches
your JPEG/PNG sources to the exact target box (aspect ratio is NOT
preserved) and writes PNG files named the way the upload form expects:

  <category>-<size>-<N>.png    e.g. screenshots-1280x800-1.png

Asset categories:

  screenshots     1280x800, 640x400
  small-promo     440x280
  marquee-promo   1400x560

Inputs may be files or directories (recursed). Anything that is not a
JPEG or PNG is skipped with a warning.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List asset categories and their target sizes
    Categories {
        /// Emit the catalog as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate inputs without resizing: report accepted files and dimensions
    Check {
        /// Image files or directories
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
    /// Resize all inputs to one asset size and export the PNGs
    Resize {
        /// Image files or directories
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Asset category key (see `categories`)
        #[arg(long)]
        category: String,

        /// Size value within the category; defaults to the category's first
        #[arg(long)]
        size: Option<String>,

        /// Output directory
        #[arg(long, default_value = "resized")]
        output: PathBuf,

        /// Skip the politeness pauses between batch items
        #[arg(long)]
        no_pause: bool,

        /// Draft mode: faster, lower-quality resampling
        #[arg(long)]
        fast: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Categories { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(catalog::categories())?);
            } else {
                output::print_catalog();
            }
        }
        Command::Check { inputs } => {
            let files = intake::read_files(&intake::collect_input_paths(&inputs)?)?;
            let mut session = Session::new();
            let report = session.ingest(files);
            output::print_intake(session.gallery(), &report);
        }
        Command::Resize {
            inputs,
            category,
            size,
            output: out_dir,
            no_pause,
            fast,
        } => {
            let files = intake::read_files(&intake::collect_input_paths(&inputs)?)?;

            let mut session = if no_pause {
                Session::with_pacer(Box::new(NoPacing))
            } else {
                Session::new()
            };
            if fast {
                session.set_smoothing(Smoothing::Fast);
            }
            let report = session.ingest(files);
            output::print_intake(session.gallery(), &report);
            if session.gallery().is_empty() {
                return Err("no usable images among the inputs".into());
            }

            session.select_category(&category)?;
            if let Some(value) = size {
                session.select_size(&value)?;
            }

            std::fs::create_dir_all(&out_dir)?;
            session.resize_all()?;
            let paths = session.export_all(&out_dir)?;
            output::print_export_output(&paths, &out_dir);
        }
    }

    Ok(())
}
