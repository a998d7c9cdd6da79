mod cli_utils;
mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use netblock::IndexKind;
use std::path::PathBuf;

use commands::{cmd_bench, cmd_inspect, cmd_query};

#[derive(Parser)]
#[command(name = "netblock")]
#[command(
    about = "Classify IP addresses against a catalogue of provider-tagged CIDR blocks",
    long_about = "netblock - Classify IP addresses against a catalogue of provider-tagged CIDR blocks\n\n\
    Loads a JSON catalogue mapping providers to groups of CIDR prefixes and tags,\n\
    and reports every catalogued network that contains a queried address.\n\n\
    Features:\n\
      • IPv4 and IPv6, overlapping and nested networks\n\
      • Bit-trie index with a linear-scan reference backend\n\
      • Gzip-compressed catalogues (.gz)\n\
      • Load reports listing skipped malformed entries\n\n\
    Examples:\n\
      netblock query prefixes.json 192.168.1.10\n\
      netblock query prefixes.json 192.168.1.10 2001:db8::1\n\
      netblock inspect prefixes.json.gz --verbose\n\
      netblock bench prefixes.json -n 100000"
)]
#[command(version)]
struct Cli {
    /// Log verbosity (logs go to stderr)
    #[arg(long, value_enum, global = true, default_value = "warn")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Look up one or more IP addresses in a catalogue
    Query {
        /// Path to the catalogue (.json or .json.gz, "-" for stdin)
        #[arg(value_name = "CATALOGUE")]
        catalogue: PathBuf,

        /// IP addresses to classify
        #[arg(value_name = "IP", required = true)]
        ips: Vec<String>,

        /// Index backend: trie (default) or linear
        #[arg(long, default_value = "trie")]
        index: IndexKind,

        /// Quiet mode - no output, only exit code (0 = found, 1 = not found)
        #[arg(short, long)]
        quiet: bool,
    },

    /// Load a catalogue and report accepted and skipped entries
    Inspect {
        /// Path to the catalogue (.json or .json.gz, "-" for stdin)
        #[arg(value_name = "CATALOGUE")]
        catalogue: PathBuf,

        /// Output the load report as JSON
        #[arg(short, long)]
        json: bool,

        /// List every skipped entry with its reason
        #[arg(short, long)]
        verbose: bool,
    },

    /// Compare trie and linear backends on a catalogue
    Bench {
        /// Path to the catalogue (.json or .json.gz)
        #[arg(value_name = "CATALOGUE")]
        catalogue: PathBuf,

        /// Number of queries to run against each backend
        #[arg(short = 'n', long, default_value = "100000")]
        query_count: usize,

        /// Percentage of queries drawn from inside catalogued networks (0-100)
        #[arg(long, default_value = "50")]
        hit_rate: usize,
    },
}

fn init_logging(level: LogLevel) {
    let level: tracing::Level = level.into();

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr) // Keep stdout clean for JSON output
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    match cli.command {
        Commands::Query {
            catalogue,
            ips,
            index,
            quiet,
        } => cmd_query(catalogue, ips, index, quiet),
        Commands::Inspect {
            catalogue,
            json,
            verbose,
        } => cmd_inspect(catalogue, json, verbose),
        Commands::Bench {
            catalogue,
            query_count,
            hit_rate,
        } => cmd_bench(catalogue, query_count, hit_rate),
    }
}
