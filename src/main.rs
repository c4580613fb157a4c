use anyhow::Result;
use clap::{Parser, Subcommand};
use reviewscrub::{check, pipeline, table};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "reviewscrub", about = "Airline-review CSV cleaning pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the cleaning pipeline over a raw review export
    Clean {
        /// Raw CSV export
        #[arg(long, default_value = "data/raw_data.csv")]
        input: PathBuf,
        /// Destination for the cleaned CSV
        #[arg(long, default_value = "data/cleaned_data.csv")]
        output: PathBuf,
    },
    /// Audit a cleaned CSV: cardinality regressions and route fields
    Check {
        /// Cleaned CSV to audit
        #[arg(long, default_value = "data/cleaned_data.csv")]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    // ─── 2) dispatch ─────────────────────────────────────────────────
    match Cli::parse().command {
        Command::Clean { input, output } => {
            let raw = table::read_csv(&input)?;
            let cleaned = pipeline::run(raw)?;
            table::write_csv(&output, &cleaned)?;
            info!("data cleaning process completed successfully");
        }
        Command::Check { input } => {
            let cleaned = table::read_csv(&input)?;
            let summaries = check::run(&cleaned)?;
            println!("{}", serde_json::to_string_pretty(&summaries)?);
            info!("data quality checks passed");
        }
    }
    Ok(())
}
