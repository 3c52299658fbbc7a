use clap::{CommandFactory, Parser};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use eyre::{eyre, Result};
use std::path::PathBuf;

use ref2_consensus::{run_consensus, ConsensusConfig};

/// Determine read classification REF = A, B for a tetraploid sample.
/// Classification is determined by the log likelihood ratio of two reports.
#[derive(Debug, Parser)]
#[command(name = "ref2-consensus", version, about)]
struct Args {
    /// Report scoring reads with A as the reference (the mirror consensus
    /// report may follow; only the first file is read)
    #[arg(short = 'A', value_name = "FILE", num_args = 1.., required = true)]
    report_a: Vec<PathBuf>,

    /// Report scoring reads with B as the reference (only the first file is read)
    #[arg(short = 'B', value_name = "FILE", num_args = 1.., required = true)]
    report_b: Vec<PathBuf>,

    /// Output file prefix
    #[arg(short = 'o', value_name = "PREFIX")]
    out_prefix: String,

    /// Include reads that map uniquely to one reference genome
    #[arg(short = 'u')]
    unique_reads: bool,

    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

fn first_report(files: Vec<PathBuf>, flag: &str) -> Result<PathBuf> {
    if files.len() > 1 {
        log::debug!("{}: using {}, ignoring {} more", flag, files[0].display(), files.len() - 1);
    }
    files
        .into_iter()
        .next()
        .ok_or_else(|| eyre!("{} needs a report file", flag))
}

fn main() -> Result<()> {
    if std::env::args_os().len() == 1 {
        Args::command().print_help()?;
        std::process::exit(1);
    }
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let config = ConsensusConfig {
        report_a: first_report(args.report_a, "-A")?,
        report_b: first_report(args.report_b, "-B")?,
        out_prefix: args.out_prefix,
        include_unique: args.unique_reads,
    };
    run_consensus(&config)?;
    Ok(())
}
