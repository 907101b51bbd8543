//! Map Encoder - Entry Point
//!
//! Compiles every SVG map under the input directory into a JSON map
//! document under the output directory.

use clap::Parser;
use map_encoder::batch::BatchCompiler;
use map_encoder::core::config::CompilerConfig;
use map_encoder::core::error::Result;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Map Encoder - SVG map to JSON graph compiler
#[derive(Parser, Debug)]
#[command(name = "map-encoder")]
#[command(about = "Compile annotated SVG maps into territory graph JSON")]
struct Args {
    /// Directory searched recursively for source maps
    #[arg(long, default_value = "source")]
    input: PathBuf,

    /// Directory receiving compiled documents (mirrors the input tree)
    #[arg(long, default_value = "maps")]
    output: PathBuf,

    /// Optional TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the endpoint matching tolerance
    #[arg(long)]
    tolerance: Option<f64>,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "map_encoder=debug"
    } else {
        "map_encoder=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .init();

    let mut config = match &args.config {
        Some(path) => CompilerConfig::load(path)?,
        None => CompilerConfig::new(),
    };
    if let Some(tolerance) = args.tolerance {
        config.tolerance = tolerance;
    }
    config.validate()?;

    tracing::info!(
        "Compiling maps from {} into {}",
        args.input.display(),
        args.output.display()
    );

    let summary = BatchCompiler::new(&config).compile_directory(&args.input, &args.output)?;
    tracing::info!("Done: {}", summary);

    Ok(())
}
