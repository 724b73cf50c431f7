//! Sums the bitscores of identical query/target pairs in aligner output.
//!
//! ```shell
//! diamond blastp --outfmt 6 qseqid sseqid bitscore -q query.faa -d db -o hits.tsv
//! cargo run --release --bin=sum-bitscores --features=binaries hits.tsv summed.csv
//! ```
//!
//! The input holds one `<query> <target> <bitscore>` record per line and may be
//! gzip-compressed (`.gz`). The output holds one `<query>,<target>,<sum>` row
//! per distinct pair.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use bgcprep::aggregate;
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use tracing::debug;
use tracing::info;
use tracing_log::AsTrace as _;
use tracing_subscriber::EnvFilter;

/// Sums the bitscores of identical query/target pairs.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// The aligner output with `<query> <target> <bitscore>` on each line.
    input: PathBuf,

    /// The destination for the summed `<query>,<target>,<score>` rows.
    output: PathBuf,

    #[command(flatten)]
    verbose: Verbosity,
}

/// Runs the aggregation.
fn run(args: &Args) -> Result<()> {
    info!("reading scores from {}", args.input.display());

    let mut reader = bgcprep::reader::open(&args.input)
        .with_context(|| format!("opening {}", args.input.display()))?;
    let table = aggregate::aggregate_reader(&mut reader)
        .with_context(|| format!("summing scores in {}", args.input.display()))?;

    debug!("read {} lines", reader.line_no());
    info!(
        "summed {} pairs across {} queries and {} targets",
        table.len(),
        table.num_queries(),
        table.num_targets()
    );

    let writer = File::create(&args.output)
        .map(BufWriter::new)
        .with_context(|| format!("creating {}", args.output.display()))?;
    table
        .write_to(writer)
        .with_context(|| format!("writing {}", args.output.display()))?;

    info!("wrote {}", args.output.display());

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
