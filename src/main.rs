use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod core;
mod grading;
mod manifest;
mod matching;
mod parsing;
mod utils;
mod web;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("section_normalizer=debug,info")
    } else {
        EnvFilter::new("section_normalizer=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Normalize(args) => {
            cli::normalize::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Grade(args) => {
            cli::grade::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Manifest(args) => {
            cli::manifest::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Serve(args) => {
            web::server::run(args)?;
        }
    }

    Ok(())
}
