//! Grade command - score normalizer answers against expected answers.
//!
//! Samples are either normalized here (`--manifest` and `--input`) or read back
//! from an earlier `normalize --input` run (`--results`).

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::cli::OutputFormat;
use crate::grading::grader::{GradeKind, GradeSummary};
use crate::manifest::store::ManifestTable;
use crate::matching::engine::{MatchingConfig, Normalizer};
use crate::parsing::results::parse_results_file;
use crate::parsing::samples::parse_samples_file;

/// Arguments for the grade command
#[derive(Args)]
pub struct GradeArgs {
    /// Venue manifest (CSV, or a JSON snapshot)
    #[arg(short, long, requires = "input", conflicts_with = "results")]
    pub manifest: Option<PathBuf>,

    /// CSV of samples with expected answers
    #[arg(short, long, requires = "manifest")]
    pub input: Option<PathBuf>,

    /// Newline-delimited JSON output of `normalize --input`
    #[arg(long, required_unless_present = "manifest")]
    pub results: Option<PathBuf>,

    /// Use strict abbreviation matching
    #[arg(long, conflicts_with = "results")]
    pub strict: bool,
}

/// Execute the grade command
///
/// # Errors
///
/// Returns an error if the inputs cannot be read.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: GradeArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let samples = match (&args.results, &args.manifest, &args.input) {
        (Some(results), _, _) => parse_results_file(results)
            .with_context(|| format!("Failed to read results {}", results.display()))?,
        (None, Some(manifest_path), Some(input)) => {
            let manifest = ManifestTable::load(manifest_path).with_context(|| {
                format!("Failed to load manifest {}", manifest_path.display())
            })?;
            let mut samples = parse_samples_file(input)
                .with_context(|| format!("Failed to read samples {}", input.display()))?;
            Normalizer::with_config(
                &manifest,
                MatchingConfig {
                    strict: args.strict,
                },
            )
            .normalize_samples(&mut samples);
            samples
        }
        _ => anyhow::bail!("Either --results or both --manifest and --input are required"),
    };

    let (summary, outcomes) = GradeSummary::grade(&samples);

    match format {
        OutputFormat::Text => {
            for outcome in &outcomes {
                if verbose || outcome.kind != GradeKind::Correct {
                    println!(".. {}", outcome.message);
                }
            }
            if !outcomes.is_empty() {
                println!();
            }
            println!("Score:    {summary}");
            println!(
                "Correct:  {} ({:.1}%)",
                summary.correct,
                summary.accuracy() * 100.0
            );
            println!("Missed:   {}", summary.missed);
            println!("Wrong:    {}", summary.wrong);
        }
        OutputFormat::Json => {
            let failures: Vec<_> = outcomes
                .iter()
                .filter(|o| verbose || o.kind != GradeKind::Correct)
                .collect();
            let output = serde_json::json!({
                "summary": summary,
                "accuracy": summary.accuracy(),
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "outcomes": failures,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("section\trow\tkind\tpoints\tmessage");
            for (sample, outcome) in samples.iter().zip(&outcomes) {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    sample.input.section,
                    sample.input.row,
                    outcome.kind,
                    outcome.points,
                    outcome.message
                );
            }
        }
    }

    Ok(())
}
