//! Command-line interface for section-normalizer.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **normalize**: Normalize a single section/row or a CSV of samples
//! - **grade**: Score normalizer output against expected answers
//! - **manifest**: List, show, or export the sections of a manifest
//! - **serve**: Start the HTTP normalization service
//!
//! ## Usage
//!
//! ```text
//! # Normalize one ticket listing
//! section-normalizer normalize --manifest fenway.csv --section "Reserve 40" --row C
//!
//! # Normalize a batch; one JSON object per line
//! section-normalizer normalize --manifest fenway.csv --input samples.csv
//!
//! # Score a batch against its expected answers
//! section-normalizer grade --manifest fenway.csv --input samples.csv
//!
//! # Start the service
//! section-normalizer serve --manifest fenway.csv --port 8080
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod grade;
pub mod manifest;
pub mod normalize;

#[derive(Parser)]
#[command(name = "section-normalizer")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Normalize free-text venue sections and rows to canonical ids")]
#[command(
    long_about = "section-normalizer maps the section and row text found on ticket listings to the canonical section and row ids of a venue manifest.\n\nIt understands:\n- Case, spacing and leading-zero differences\n- Abbreviated section names (\"IFR7\" for \"Infield Reserve 7\")\n- Sections addressed by name alone (suites, boxes)\n\nInputs that cannot be resolved confidently are reported as invalid."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Normalize a section/row pair or a file of samples
    Normalize(normalize::NormalizeArgs),

    /// Grade normalizer output against expected answers
    Grade(grade::GradeArgs),

    /// Inspect a venue manifest
    Manifest(manifest::ManifestArgs),

    /// Start the web server
    Serve(ServeArgs),
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Venue manifest (CSV, or a JSON snapshot)
    #[arg(short, long, required = true)]
    pub manifest: PathBuf,

    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    /// Use strict abbreviation matching
    #[arg(long)]
    pub strict: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
