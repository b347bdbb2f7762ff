use anyhow::Result;
use clap::{Parser, Subcommand};
use evedata_format::{FillRule, Section};
use tracing_subscriber::{EnvFilter, fmt};

mod commands;

/// Environment variable holding the log filter directives.
const LOG_ENV: &str = "EVEDATA_LOG";

#[derive(Parser)]
#[command(name = "evedata-cmd")]
#[command(about = "Command-line utility for reading and joining eve scan data")]
#[command(version)]
struct Cli {
    /// Increase verbosity (-v for verbose, -vv for very verbose)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display chains, chain metadata and the devices of each section
    Inspect {
        /// Snapshot file to inspect
        file: String,
    },

    /// Join device series of one chain and print the table
    Join {
        /// Snapshot file to read
        file: String,

        /// Chain to read (defaults to chain 1, else the first chain)
        #[arg(long)]
        chain: Option<i32>,

        /// Section the devices are taken from
        #[arg(long, default_value = "standard")]
        section: Section,

        /// Fill rule: none, last, nan or last-nan
        #[arg(long, default_value = "none")]
        fill: FillRule,

        /// XML-ID of a device to join (can be specified multiple times)
        #[arg(long = "id", conflicts_with = "preferred")]
        ids: Vec<String>,

        /// Join the preferred devices of the chain
        #[arg(long)]
        preferred: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = commands::join::OutputFormat::Table)]
        format: commands::join::OutputFormat,

        /// Print at most this many rows
        #[arg(long)]
        limit: Option<usize>,
    },
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Inspect { file } => commands::inspect::run(cli.verbose, file),
        Commands::Join {
            file,
            chain,
            section,
            fill,
            ids,
            preferred,
            format,
            limit,
        } => {
            let selection = if preferred {
                commands::join::Selection::Preferred
            } else if ids.is_empty() {
                commands::join::Selection::Section(section)
            } else {
                commands::join::Selection::Ids { section, ids }
            };
            let options = commands::join::JoinOptions {
                chain,
                selection,
                fill,
                format,
                limit,
            };
            commands::join::run(file, options, &mut std::io::stdout().lock())
        }
    }
}
