//! model-atlas - batch CLI that consolidates model signature files into a
//! 2-D atlas database

use clap::Parser;
use colored::*;
use model_atlas::config::Config;
use model_atlas::embed::TsneReducer;
use model_atlas::pipeline;
use std::io;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "model-atlas")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Builds a 2-D model atlas database from profiler signature files")]
struct Cli {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Input directory holding signature files
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output database path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Dataset name recorded in the output metadata
    #[arg(short, long)]
    dataset: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode (only errors)
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            process::exit(1);
        }
    };

    setup_logging(&cli, &config);

    let reducer = TsneReducer::new();
    let result = pipeline::run(&config, &reducer)
        .and_then(|db| pipeline::write_database(&db, &config.output.path).map(|_| db));

    match result {
        Ok(db) => {
            if !cli.quiet {
                println!(
                    "{} {} models written to {}",
                    "Done:".green().bold(),
                    db.metadata.count,
                    config.output.path.display()
                );
            }
        }
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            process::exit(1);
        }
    }
}

/// Resolve the effective configuration: file or env defaults, then CLI
/// flag overrides
fn load_config(cli: &Cli) -> model_atlas::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };
    if let Some(input) = &cli.input {
        config.input.dir = input.clone();
    }
    if let Some(output) = &cli.output {
        config.output.path = output.clone();
    }
    if let Some(dataset) = &cli.dataset {
        config.output.dataset = dataset.clone();
    }
    config.validate()?;
    Ok(config)
}

/// Setup logging; verbosity flags override the configured level
fn setup_logging(cli: &Cli, config: &Config) {
    let level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
