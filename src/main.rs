use clap::{Parser, Subcommand};
use pixelcraft::operation::Operation;
use pixelcraft::process::{ProcessConfig, Processor};
use pixelcraft::{config, output, upload};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pixelcraft")]
#[command(about = "Apply pixel effects and format conversions to uploaded images")]
#[command(long_about = "\
Apply pixel effects and format conversions to uploaded images

Each run reads one image from the upload directory, applies one operation,
and writes one result to the output directory:

  uploads/cat.png  --sepia-->  static/cat_sepia.jpg

Operations:
  cgray        grayscale, same name and format as the upload
  cwebp        re-encode as <stem>.webp
  cjpg         re-encode as <stem>.jpg
  cpng         re-encode as <stem>.png
  edge         edge map, <stem>_edges.jpg
  sepia        sepia tone, <stem>_sepia.jpg
  bw           grayscale, <stem>_bw.jpg
  duotone      two-color blend, <stem>_duotone.jpg
  monochrome   single-hue tint, <stem>_monochrome.jpg
  cyanotype    cyanotype look, <stem>_cyanotype.jpg

Directories and effect colors come from config.toml (see 'pixelcraft gen-config').
Set RUST_LOG=debug for step-by-step logging.")]
#[command(version)]
struct Cli {
    /// Directory containing config.toml
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    /// Override paths.upload_dir
    #[arg(long, global = true)]
    upload_dir: Option<PathBuf>,

    /// Override paths.output_dir
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Process a file that is already in the upload directory
    Process {
        /// File name inside the upload directory
        filename: String,
        /// Operation tag (see `operations`)
        operation: String,
    },
    /// Validate and copy a file into the upload directory, then process it
    Ingest {
        /// Path to the file to upload
        path: PathBuf,
        /// Operation tag (see `operations`)
        operation: String,
    },
    /// List supported operation tags
    Operations,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Process {
            ref filename,
            ref operation,
        } => {
            let processor = build_processor(&cli)?;
            let op: Operation = operation.parse()?;
            let written = processor.run(filename, op)?;
            output::print_process_result(op, filename, &written);
        }
        Command::Ingest {
            ref path,
            ref operation,
        } => {
            let processor = build_processor(&cli)?;
            let op: Operation = operation.parse()?;
            let ingested = upload::ingest(&processor, path, op.tag())?;
            output::print_ingest_result(op, path, &ingested);
        }
        Command::Operations => output::print_operations(),
        Command::GenConfig => print!("{}", config::stock_config_toml()),
    }

    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG` (default: warnings only).
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();
}

/// Load config, apply directory overrides, and make sure both directories exist.
fn build_processor(cli: &Cli) -> Result<Processor, Box<dyn std::error::Error>> {
    let mut config = config::load_config(&cli.config_dir)?;
    if let Some(dir) = &cli.upload_dir {
        config.paths.upload_dir = dir.clone();
    }
    if let Some(dir) = &cli.output_dir {
        config.paths.output_dir = dir.clone();
    }
    config.validate()?;

    ensure_dir(&config.paths.upload_dir)?;
    ensure_dir(&config.paths.output_dir)?;

    Ok(Processor::new(ProcessConfig::from_config(&config)))
}

fn ensure_dir(dir: &Path) -> std::io::Result<()> {
    if !dir.is_dir() {
        tracing::debug!(dir = %dir.display(), "Creating directory");
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}
