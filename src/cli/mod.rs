pub mod config;
pub mod convert;
pub mod split;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "budgetbridge",
    version,
    about = "Convert Money Manager exports to Beyond Budget CSV and split large CSVs for import."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a Money Manager export into a Beyond Budget import file.
    Convert {
        /// Money Manager CSV export
        input: String,
        /// Beyond Budget CSV to write (parent directories are created)
        output: String,
    },
    /// Split a CSV into numbered chunk files, repeating the header in each.
    Split {
        /// CSV file to split
        input: String,
        /// Directory for chunk_N.csv files (default from settings: ./processed)
        #[arg(long = "output-dir")]
        output_dir: Option<String>,
        /// Data rows per chunk (default from settings: 110)
        #[arg(long = "rows-per-file")]
        rows_per_file: Option<usize>,
        /// Text encoding of input and output (default from settings: utf-8)
        #[arg(long)]
        encoding: Option<String>,
    },
    /// Show split defaults, or update them when flags are given.
    Config {
        #[arg(long = "rows-per-file")]
        rows_per_file: Option<usize>,
        #[arg(long)]
        encoding: Option<String>,
        #[arg(long = "output-dir")]
        output_dir: Option<String>,
    },
}
