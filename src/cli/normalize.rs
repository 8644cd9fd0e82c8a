//! Normalize command - resolve section/row text against a venue manifest.
//!
//! Either a single pair given with `--section`/`--row`, or a CSV of samples given
//! with `--input`. Batch results are written one JSON object per line so that
//! `grade --results` can read them back.

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;

use crate::cli::OutputFormat;
use crate::manifest::store::ManifestTable;
use crate::matching::engine::{MatchingConfig, Normalizer};
use crate::parsing::samples::parse_samples_file;

/// Arguments for the normalize command
#[derive(Args)]
pub struct NormalizeArgs {
    /// Venue manifest (CSV, or a JSON snapshot)
    #[arg(short, long, required = true)]
    pub manifest: PathBuf,

    /// Section text to normalize
    #[arg(short, long, required_unless_present = "input", conflicts_with = "input")]
    pub section: Option<String>,

    /// Row text to normalize; omit for sections addressed by name alone
    #[arg(short, long, requires = "section")]
    pub row: Option<String>,

    /// CSV of samples (section,row,n_section_id,n_row_id,valid)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Use strict abbreviation matching
    #[arg(long)]
    pub strict: bool,
}

/// Execute the normalize command
///
/// # Errors
///
/// Returns an error if the manifest or samples cannot be read or output fails.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: NormalizeArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let manifest = ManifestTable::load(&args.manifest)
        .with_context(|| format!("Failed to load manifest {}", args.manifest.display()))?;

    if verbose {
        eprintln!(
            "Loaded manifest with {} sections ({} rows)",
            manifest.len(),
            manifest.row_count()
        );
    }

    let normalizer = Normalizer::with_config(
        &manifest,
        MatchingConfig {
            strict: args.strict,
        },
    );

    match (&args.input, &args.section) {
        (Some(input), _) => run_batch(&normalizer, input, format, verbose),
        (None, Some(section)) => {
            run_single(&normalizer, section, args.row.as_deref().unwrap_or(""), format);
            Ok(())
        }
        (None, None) => anyhow::bail!("Either --section or --input is required"),
    }
}

fn run_single(normalizer: &Normalizer<'_>, section: &str, row: &str, format: OutputFormat) {
    let normalization = normalizer.resolve(section, row);
    let result = normalization.result;

    match format {
        OutputFormat::Text => {
            println!("Input:      {section:?} / {row:?}");
            println!(
                "Section ID: {}",
                result.section_id.map_or("-".to_string(), |id| id.to_string())
            );
            println!(
                "Row ID:     {}",
                result.row_id.map_or("-".to_string(), |id| id.to_string())
            );
            println!("Valid:      {}", result.valid);
            println!("Resolution: {}", normalization.resolution);
            if let Some(key) = normalization.section_key {
                println!("Section:    {key}");
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "input": { "section": section, "row": row },
                "output": result,
                "resolution": normalization.resolution,
                "section_key": normalization.section_key,
            });
            println!("{output:#}");
        }
        OutputFormat::Tsv => {
            println!("section\trow\tsection_id\trow_id\tvalid\tresolution");
            println!(
                "{}\t{}\t{}\t{}\t{}\t{}",
                section,
                row,
                result.section_id.map_or(String::new(), |id| id.to_string()),
                result.row_id.map_or(String::new(), |id| id.to_string()),
                result.valid,
                normalization.resolution
            );
        }
    }
}

fn run_batch(
    normalizer: &Normalizer<'_>,
    input: &Path,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let mut samples = parse_samples_file(input)
        .with_context(|| format!("Failed to read samples {}", input.display()))?;
    normalizer.normalize_samples(&mut samples);

    if verbose {
        let resolved = samples.iter().filter(|s| s.output.valid).count();
        eprintln!("Resolved {resolved} of {} samples", samples.len());
    }

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match format {
        OutputFormat::Text | OutputFormat::Json => {
            for sample in &samples {
                writeln!(out, "{}", serde_json::to_string(sample)?)?;
            }
        }
        OutputFormat::Tsv => {
            writeln!(
                out,
                "section\trow\tn_section_id\tn_row_id\tvalid\tsection_id\trow_id\tvalid_output"
            )?;
            let id = |id: Option<i64>| id.map_or(String::new(), |id| id.to_string());
            for sample in &samples {
                writeln!(
                    out,
                    "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                    sample.input.section,
                    sample.input.row,
                    id(sample.expected.section_id.map(|s| s.0)),
                    id(sample.expected.row_id.map(|r| r.0)),
                    sample.expected.valid,
                    id(sample.output.section_id.map(|s| s.0)),
                    id(sample.output.row_id.map(|r| r.0)),
                    sample.output.valid
                )?;
            }
        }
    }

    out.flush()?;
    Ok(())
}
