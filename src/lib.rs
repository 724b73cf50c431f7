//! `bgcprep` is a crate for preparing biosynthetic gene cluster (BGC) data for
//! similarity searches.
//!
//! The crate provides two points of entry:
//!
//! - Summing duplicate pairwise alignment scores per (query, target) pair.
//! - Extracting synthase protein sequences and cluster metadata from MIBiG
//!   entries.
//!
//! ## Summing alignment scores
//!
//! Aligners such as DIAMOND or BLAST report one line per high-scoring segment
//! pair, so a single (query, target) pair may appear many times. The
//! [`aggregate`] module folds those lines into a [`aggregate::Table`] holding
//! one summed score per pair. Pairs are kept in the order they were first
//! seen: queries in first appearance order, and targets grouped under their
//! query in first appearance order.
//!
//! Input is read with the [`Reader`] facility (or directly from an iterator of
//! lines via [`aggregate::aggregate()`]), where each line must hold exactly
//! three whitespace-separated fields: the query id, the target id, and the
//! score. Any line that does not is reported as a malformed record together
//! with its line number.
//!
//! ```
//! use bgcprep::aggregate;
//!
//! let data = b"q1 t1 1.5\nq1 t2 2.0\nq1 t1 0.5\nq2 t1 3.0\n";
//! let mut reader = bgcprep::Reader::new(&data[..]);
//!
//! let table = aggregate::aggregate_reader(&mut reader)?;
//!
//! let mut output = Vec::new();
//! table.write_to(&mut output)?;
//! assert_eq!(output, b"q1,t1,2.0\nq1,t2,2.0\nq2,t1,3.0\n");
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Extracting synthases from MIBiG
//!
//! The [`mibig`] module reads a directory of MIBiG GenBank records alongside a
//! directory of MIBiG JSON entries, keeps the coding sequences annotated as
//! polyketide synthases, nonribosomal peptide synthetases, hybrids thereof, or
//! fatty acid synthases, and writes them out as a table and as FASTA.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(clippy::missing_docs_in_private_items)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod aggregate;
pub mod mibig;
pub mod reader;
pub mod record;

pub use self::reader::Reader;
pub use self::record::Record;
