//! # Verso CLI
//!
//! Usage:
//!   verso rur.txt -o page.svg --seed 7
//!   cat rur.txt | verso --theme paper -o page.pdf
//!   verso rur.txt --config page.json --format json

use clap::{Parser, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use verso::style::ThemeName;
use verso::{FontMetrics, PageConfig, VersoError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Svg,
    Pdf,
    Json,
}

impl Format {
    /// Guess from an output file extension; SVG when unknown.
    fn infer(path: Option<&Path>) -> Self {
        match path
            .and_then(|p| p.extension())
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("pdf") => Format::Pdf,
            Some("json") => Format::Json,
            _ => Format::Svg,
        }
    }
}

/// Verso - compose a generative multi-column page from a text
#[derive(Parser, Debug)]
#[command(name = "verso")]
#[command(version)]
#[command(about = "Compose a deterministic generative page from a text")]
pub struct Args {
    /// Source text, verses separated by blank lines (reads stdin if omitted)
    pub input: Option<PathBuf>,

    /// Output file (writes stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Seed for every random decision
    #[arg(long, allow_negative_numbers = true)]
    pub seed: Option<i64>,

    /// Page configuration JSON; flags override its fields
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Visual theme: paper or blueprint
    #[arg(long)]
    pub theme: Option<ThemeName>,

    /// Number of text columns
    #[arg(long)]
    pub columns: Option<u32>,

    /// Output format (inferred from the output extension if omitted)
    #[arg(long, value_enum)]
    pub format: Option<Format>,

    /// TrueType/OpenType font to measure text with
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Date string printed in the colophon
    #[arg(long)]
    pub date: Option<String>,

    /// Debug logging (overrides RUST_LOG)
    #[arg(short, long)]
    pub verbose: bool,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Config file first, then command-line overrides.
fn load_config(args: &Args) -> verso::Result<PageConfig> {
    let mut config = match &args.config {
        Some(path) => PageConfig::from_json(&fs::read_to_string(path)?)?,
        None => PageConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.theme.is_some() {
        config.theme = args.theme;
    }
    if args.columns.is_some() {
        config.column_count = args.columns;
    }
    if args.date.is_some() {
        config.metadata.date = args.date.clone();
    }
    Ok(config)
}

fn run(args: &Args) -> verso::Result<()> {
    let text = match &args.input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let config = load_config(args)?;
    let metrics = match &args.font {
        Some(path) => FontMetrics::from_file(path)?,
        None => FontMetrics::standard(),
    };

    let composition = verso::compose(&config, &text, &metrics)?;
    tracing::info!(
        seed = composition.seed,
        theme = %composition.theme.name,
        verses = composition.layout.len(),
        blocks = composition.blocks.len(),
        "composed page"
    );

    let format = args
        .format
        .unwrap_or_else(|| Format::infer(args.output.as_deref()));
    let bytes = match format {
        Format::Svg => verso::render_svg(&composition)?.into_bytes(),
        Format::Pdf => verso::render_pdf(&composition)?,
        Format::Json => verso::render_json(&composition)?.into_bytes(),
    };

    match &args.output {
        Some(path) => {
            fs::write(path, &bytes)?;
            eprintln!("✓ Written {} bytes to {}", bytes.len(), path.display());
        }
        None => io::stdout().write_all(&bytes).map_err(VersoError::Io)?,
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("✗ {}", e);
            ExitCode::FAILURE
        }
    }
}
