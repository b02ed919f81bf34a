use anyhow::Result;
use clap::{Parser, Subcommand};
use genoview_core::Assembly;
use std::path::PathBuf;

mod commands;
mod config;
mod error;

use config::{Config, OutputFormat};
use error::{print_error_and_exit, CliError};

#[derive(Parser)]
#[command(name = "genoview")]
#[command(about = "Genoview - Genome Overview Charts")]
#[command(version)]
#[command(long_about = "
Genoview draws whole-genome overview charts: a chromosome ruler with one row
per copy-number sample or mutation set stacked below it.

Examples:
  genoview render --out overview.svg
  genoview render --seg tumor.seg --mutations tumor.maf.tsv --out tumor.svg
  genoview render --assembly hg38 --format json --out figure.json
  genoview locate --x 600
  genoview locate --chrom chr17 --pos 7577120
  genoview color -- -1.2 0 0.5 2
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the chromosome ruler and data rows to SVG or Plotly JSON
    Render {
        /// Output file (.svg or .json)
        #[arg(short, long, required = true)]
        out: PathBuf,

        /// Output format (auto-detected from extension)
        #[arg(long)]
        format: Option<OutputFormat>,

        /// Reference assembly (hg19 or hg38)
        #[arg(long)]
        assembly: Option<Assembly>,

        /// Canvas width in pixels
        #[arg(long)]
        width: Option<f64>,

        /// Number of data rows (defaults to one per loaded track)
        #[arg(long)]
        rows: Option<usize>,

        /// Copy-number segments in .seg format
        #[arg(long)]
        seg: Option<PathBuf>,

        /// Mutation positions (chrom<TAB>position)
        #[arg(long)]
        mutations: Option<PathBuf>,

        /// Plot target id
        #[arg(long)]
        target: Option<String>,

        /// Document title
        #[arg(long)]
        title: Option<String>,
    },

    /// Map between pixel x, genome fraction and chromosome position
    Locate {
        /// Pixel x on the canvas
        #[arg(long, allow_negative_numbers = true, conflicts_with_all = ["fraction", "chrom"])]
        x: Option<f64>,

        /// Genome fraction in [0, 1]
        #[arg(long, allow_negative_numbers = true, conflicts_with = "chrom")]
        fraction: Option<f64>,

        /// Chromosome name (1-22, X, Y, optional chr prefix)
        #[arg(long, requires = "pos")]
        chrom: Option<String>,

        /// Offset on --chrom in base pairs
        #[arg(long, requires = "chrom")]
        pos: Option<u64>,

        /// Chromosome to start a linear scan from
        #[arg(long)]
        hint: Option<String>,

        /// Reference assembly (hg19 or hg38)
        #[arg(long)]
        assembly: Option<Assembly>,

        /// Canvas width in pixels
        #[arg(long)]
        width: Option<f64>,
    },

    /// Print the copy-number color of each value
    Color {
        /// Segment mean values
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<f64>,
    },

    /// Print or write a configuration file
    Config {
        /// Use the built-in defaults instead of the loaded configuration
        #[arg(long)]
        example: bool,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn setup_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())
        .map_err(|err| CliError::config(format!("{:#}", err)))?;

    match cli.command {
        Commands::Render {
            out,
            format,
            assembly,
            width,
            rows,
            seg,
            mutations,
            target,
            title,
        } => {
            commands::render::execute(
                &config,
                commands::render::RenderArgs {
                    out,
                    format,
                    assembly,
                    width,
                    rows,
                    seg,
                    mutations,
                    target,
                    title,
                },
            )?;
        }

        Commands::Locate { x, fraction, chrom, pos, hint, assembly, width } => {
            let query = commands::locate::Query::from_args(x, fraction, chrom, pos)?;
            commands::locate::execute(&config, query, hint, assembly, width)?;
        }

        Commands::Color { values } => {
            commands::color::execute(&config, &values)?;
        }

        Commands::Config { example, output } => {
            commands::config::execute(&config, example, output)?;
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    if let Err(err) = run(cli) {
        match err.downcast_ref::<CliError>() {
            Some(cli_err) => print_error_and_exit(cli_err),
            None => {
                eprintln!("Error: {:#}", err);
                std::process::exit(1);
            }
        }
    }
}
