use clap::{Parser, Subcommand};
use colored::Colorize;
use sheetdeps::cli::{self, ConfigArgs};
use sheetdeps::error::SheetDepsResult;
use sheetdeps::writer::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sheetdeps")]
#[command(about = "Column dependency matrix for multi-sheet workbooks.")]
#[command(long_about = "SheetDeps - which columns are computed from which

Every non-empty header in row 1 of an included sheet is a column
(Sheet!Header). One formula per column, the topmost below the header,
is scanned for cell, range and whole-column references. The result is
a square matrix: row i has an X under column j when i reads j.

SHEET FILTER:
  Sheets named like the output sheet (default: Matrix) or starting with
  a skip prefix (default: _, v, V) are left out entirely.

COMMANDS:
  matrix   - Write the dependency matrix (.xlsx, .csv or .json)
  columns  - List registered columns and their sampled formulas
  deps     - Show what one column reads and what reads it

EXAMPLES:
  sheetdeps matrix costs.xlsx                       # costs_matrix.xlsx
  sheetdeps matrix costs.xlsx -o deps.json
  sheetdeps matrix costs.xlsx --skip-prefix _ --skip-prefix tmp
  sheetdeps deps costs.xlsx 'Sales!Total'

LOGGING:
  SHEETDEPS_LOG=info sheetdeps matrix costs.xlsx")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the dependency matrix and write it to a file
    Matrix {
        /// Workbook to analyze (.xlsx, .xlsm, .yaml)
        input: PathBuf,

        /// Output file (default: <input>_matrix.<format> next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (default: inferred from --output, else xlsx)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        #[command(flatten)]
        config: ConfigArgs,

        /// Show progress checkpoints
        #[arg(short, long)]
        verbose: bool,
    },

    /// List registered columns and their representative formulas
    Columns {
        /// Workbook to analyze (.xlsx, .xlsm, .yaml)
        input: PathBuf,

        #[command(flatten)]
        config: ConfigArgs,

        /// Show progress checkpoints
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show the direct dependencies of one column
    Deps {
        /// Workbook to analyze (.xlsx, .xlsm, .yaml)
        input: PathBuf,

        /// Column id as 'Sheet!Header'
        column: String,

        #[command(flatten)]
        config: ConfigArgs,
    },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("SHEETDEPS_LOG")
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> SheetDepsResult<()> {
    match cli.command {
        Commands::Matrix {
            input,
            output,
            format,
            config,
            verbose,
        } => cli::matrix(input, output, format, config, verbose),

        Commands::Columns {
            input,
            config,
            verbose,
        } => cli::columns(input, config, verbose),

        Commands::Deps {
            input,
            column,
            config,
        } => cli::deps(input, column, config),
    }
}
