use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};

use crate::cli::OutputFormat;
use crate::core::section::{section_key, CanonicalSection};
use crate::manifest::store::ManifestTable;
use crate::matching::section::query_section;

/// Rows shown per section by `manifest show` unless `--all-rows` is given
const SHOW_ROW_LIMIT: usize = 25;

#[derive(Args)]
pub struct ManifestArgs {
    #[command(subcommand)]
    pub command: ManifestCommands,
}

#[derive(Subcommand)]
pub enum ManifestCommands {
    /// List all sections in the manifest
    List {
        /// Venue manifest (CSV, or a JSON snapshot)
        #[arg(short, long, required = true)]
        manifest: PathBuf,
    },

    /// Show the rows of one section
    Show {
        /// Section name; abbreviations are resolved the same way as normalize
        #[arg(required = true)]
        section: String,

        /// Venue manifest (CSV, or a JSON snapshot)
        #[arg(short, long, required = true)]
        manifest: PathBuf,

        /// Show all rows
        #[arg(long)]
        all_rows: bool,
    },

    /// Export the manifest to a JSON snapshot
    Export {
        /// Output file path
        #[arg(required = true)]
        output: PathBuf,

        /// Venue manifest (CSV, or a JSON snapshot)
        #[arg(short, long, required = true)]
        manifest: PathBuf,
    },
}

/// Execute a manifest subcommand
///
/// # Errors
///
/// Returns an error if the manifest cannot be loaded, the section is unknown, or
/// the export cannot be written.
pub fn run(args: ManifestArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    match args.command {
        ManifestCommands::List { manifest } => run_list(&load(&manifest, verbose)?, format),
        ManifestCommands::Show {
            section,
            manifest,
            all_rows,
        } => run_show(&load(&manifest, verbose)?, &section, all_rows, format),
        ManifestCommands::Export { output, manifest } => {
            run_export(&load(&manifest, verbose)?, &output)
        }
    }
}

fn load(path: &Path, verbose: bool) -> anyhow::Result<ManifestTable> {
    let manifest = ManifestTable::load(path)?;
    if verbose {
        eprintln!(
            "Loaded manifest with {} sections ({} rows)",
            manifest.len(),
            manifest.row_count()
        );
    }
    Ok(manifest)
}

fn run_list(manifest: &ManifestTable, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            let key_width = manifest
                .sections()
                .iter()
                .map(|s| s.key.len())
                .max()
                .unwrap_or(7)
                .max(7);

            println!("Venue Manifest ({} sections)\n", manifest.len());
            println!(
                "{:>8} {:<key_w$} {:>6}",
                "ID",
                "Section",
                "Rows",
                key_w = key_width
            );
            println!("{}", "-".repeat(key_width + 16));

            for section in manifest.sections() {
                let rows = if section.has_rows() {
                    section.row_count().to_string()
                } else {
                    "-".to_string()
                };
                println!(
                    "{:>8} {:<key_w$} {:>6}",
                    section.section_id.0,
                    section.key,
                    rows,
                    key_w = key_width
                );
            }
        }
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = manifest
                .sections()
                .iter()
                .map(|s| {
                    serde_json::json!({
                        "section_id": s.section_id,
                        "key": s.key,
                        "has_rows": s.has_rows(),
                        "row_count": s.row_count(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("section_id\tkey\thas_rows\trow_count");
            for s in manifest.sections() {
                println!(
                    "{}\t{}\t{}\t{}",
                    s.section_id,
                    s.key,
                    s.has_rows(),
                    s.row_count()
                );
            }
        }
    }

    Ok(())
}

fn find_section<'a>(manifest: &'a ManifestTable, name: &str) -> Option<&'a CanonicalSection> {
    manifest
        .get(&section_key(name))
        .or_else(|| query_section(manifest, name, false))
}

fn run_show(
    manifest: &ManifestTable,
    name: &str,
    all_rows: bool,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let section = find_section(manifest, name)
        .ok_or_else(|| anyhow::anyhow!("Section '{}' not found", name))?;

    match format {
        OutputFormat::Text => {
            println!("Section: {}\n", section.key);
            println!("ID:      {}", section.section_id);

            let Some(rows) = &section.rows else {
                println!("Rows:    none (addressed by section name alone)");
                return Ok(());
            };
            println!("Rows:    {}", rows.len());

            let rows_to_show = if all_rows {
                &rows[..]
            } else {
                &rows[..rows.len().min(SHOW_ROW_LIMIT)]
            };

            println!("\n{:<15} {:>8}", "Name", "ID");
            println!("{}", "-".repeat(24));
            for row in rows_to_show {
                println!("{:<15} {:>8}", row.name, row.id.0);
            }

            if !all_rows && rows.len() > SHOW_ROW_LIMIT {
                println!(
                    "\n... and {} more rows (use --all-rows to show all)",
                    rows.len() - SHOW_ROW_LIMIT
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(section)?);
        }
        OutputFormat::Tsv => {
            println!("name\tid");
            for row in section.rows() {
                println!("{}\t{}", row.name, row.id);
            }
        }
    }

    Ok(())
}

fn run_export(manifest: &ManifestTable, output: &Path) -> anyhow::Result<()> {
    let json = manifest.to_json()?;
    std::fs::write(output, json)?;

    println!(
        "Exported {} sections to {}",
        manifest.len(),
        output.display()
    );

    Ok(())
}
