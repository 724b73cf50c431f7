//! Extracts PKS/NRPS synthase sequences from MIBiG GenBank and JSON entries.
//!
//! ```shell
//! cargo run --release --bin=extract-synthases --features=binaries \
//!     mibig_gbk/ mibig_json/ synthases.tsv --fasta synthases.faa
//! ```
//!
//! Writes a table with one row per synthase and the MIBiG entry it belongs to
//! and, optionally, the synthase sequences as FASTA.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use bgcprep::mibig;
use clap::Parser;
use clap_verbosity_flag::InfoLevel;
use clap_verbosity_flag::Verbosity;
use tracing::info;
use tracing_log::AsTrace as _;
use tracing_subscriber::EnvFilter;

/// Extracts PKS/NRPS sequences from MIBiG entries.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// The directory of MIBiG GenBank records.
    gbk: PathBuf,

    /// The directory of MIBiG JSON entries.
    json: PathBuf,

    /// The destination for the synthase table.
    out: PathBuf,

    /// If desired, a destination for the synthase sequences as FASTA.
    #[arg(long)]
    fasta: Option<PathBuf>,

    /// If desired, the specific MIBiG accessions to extract.
    #[arg(long, num_args = 1..)]
    accessions: Option<Vec<String>>,

    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

/// Runs the extraction.
fn run(args: &Args) -> Result<()> {
    let clusters = mibig::extract(&args.gbk, &args.json, args.accessions.as_deref())
        .context("extracting MIBiG entries")?;

    let synthases = clusters
        .iter()
        .map(|cluster| cluster.synthases().len())
        .sum::<usize>();
    info!(
        "found {synthases} synthases across {} clusters",
        clusters.len()
    );

    let writer = File::create(&args.out)
        .map(BufWriter::new)
        .with_context(|| format!("creating {}", args.out.display()))?;
    mibig::write_table(&clusters, writer)
        .with_context(|| format!("writing {}", args.out.display()))?;

    if let Some(fasta) = &args.fasta {
        let writer = File::create(fasta)
            .map(BufWriter::new)
            .with_context(|| format!("creating {}", fasta.display()))?;
        mibig::write_fasta(&clusters, writer)
            .with_context(|| format!("writing {}", fasta.display()))?;
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    match std::env::var("RUST_LOG") {
        Ok(_) => tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init(),
        Err(_) => tracing_subscriber::fmt()
            .with_max_level(args.verbose.log_level_filter().as_trace())
            .with_writer(std::io::stderr)
            .init(),
    };

    run(&args)
}
