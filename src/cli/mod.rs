//! Command-line interface for samgate.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **validate**: Check a SAM text file (plain, gzip, or stdin) and report the first error
//!
//! ## Usage
//!
//! ```text
//! # Validate a SAM file
//! samgate validate sample.sam
//!
//! # Pipe from samtools
//! samtools view -h sample.bam | samgate validate -
//!
//! # JSON output for scripting, including every accepted record
//! samgate validate sample.sam.gz --format json --include-records
//! ```

use clap::{Parser, Subcommand};

pub mod validate;

#[derive(Parser)]
#[command(name = "samgate")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Validate the grammar of SAM text alignment files")]
#[command(
    long_about = "samgate checks every header and alignment line of a SAM text file against the format's field grammar.\n\nIt stops at the first invalid line and reports:\n- The record type and line number\n- The violated rule or the duplicated identifier\n- How many records of each type were accepted before the failure"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a SAM text file
    Validate(validate::ValidateArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
