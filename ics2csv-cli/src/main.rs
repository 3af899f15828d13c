mod commands;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use ics2csv_core::{Ics2CsvConfig, Variant};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ics2csv")]
#[command(about = "Convert iCalendar (.ics) files into CSV spreadsheets")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert one .ics file into a .csv file
    Convert {
        /// The .ics file to read
        input: PathBuf,

        /// Where to write the CSV (defaults to the input name with .csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output layout (defaults to the configured variant)
        #[arg(short, long, value_enum)]
        variant: Option<Variant>,

        /// Timezone for dates and times, e.g. "America/Sao_Paulo"
        #[arg(long)]
        timezone: Option<String>,

        /// Do not prefix the file with a UTF-8 byte-order mark
        #[arg(long)]
        no_bom: bool,

        /// Print the CSV to stdout instead of writing a file
        #[arg(long, conflicts_with = "output")]
        stdout: bool,
    },
    /// Show the config file location and effective settings
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            variant,
            timezone,
            no_bom,
            stdout,
        } => {
            let mut config = Ics2CsvConfig::load()?;
            if let Some(variant) = variant {
                config.variant = variant;
            }
            if let Some(timezone) = timezone {
                config.timezone = timezone;
            }
            if no_bom {
                config.bom = false;
            }
            let target = if stdout {
                commands::convert::Target::Stdout
            } else {
                commands::convert::Target::File(output)
            };
            commands::convert::run(&config, &input, target).await
        }
        Commands::Config => commands::config::run(),
    }
}
