//! Summing of duplicate alignment scores per (query, target) pair.

pub mod table;

use std::io;
use std::io::BufRead;

pub use table::Table;

use crate::Reader;
use crate::reader;
use crate::record;
use crate::record::Record;

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// An error related to aggregation.
#[derive(Debug)]
pub enum Error {
    /// An I/O error.
    Io(io::Error),

    /// A line that does not hold exactly three whitespace-separated fields or
    /// whose score is not a valid floating-point literal.
    MalformedRecord {
        /// The 1-based line number.
        line_no: usize,

        /// The offending line.
        line: String,

        /// The reason the line was rejected.
        source: record::ParseError,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "i/o error: {err}"),
            Error::MalformedRecord {
                line_no,
                line,
                source,
            } => write!(f, "malformed record at line {line_no}: {source}\n\nline: {line}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::MalformedRecord { source, .. } => Some(source),
        }
    }
}

impl From<reader::Error> for Error {
    fn from(err: reader::Error) -> Self {
        match err {
            reader::Error::Io(err) => Error::Io(err),
            reader::Error::Record(line_no, line, source) => Error::MalformedRecord {
                line_no,
                line,
                source,
            },
        }
    }
}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

////////////////////////////////////////////////////////////////////////////////////////
// Aggregation
////////////////////////////////////////////////////////////////////////////////////////

/// Sums the scores of a sequence of `<query> <target> <score>` lines.
///
/// The first malformed line aborts the whole operation.
///
/// # Examples
///
/// ```
/// use bgcprep::aggregate;
///
/// let lines = ["q1 t1 1.5", "q1 t2 2.0", "q1 t1 0.5", "q2 t1 3.0"];
/// let table = aggregate::aggregate(lines)?;
///
/// assert_eq!(
///     table.serialize().collect::<Vec<_>>(),
///     ["q1,t1,2.0", "q1,t2,2.0", "q2,t1,3.0"]
/// );
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn aggregate<I, S>(lines: I) -> Result<Table>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut table = Table::default();

    for (i, line) in lines.into_iter().enumerate() {
        let line = line.as_ref();
        let record = line
            .parse::<Record>()
            .map_err(|source| Error::MalformedRecord {
                line_no: i + 1,
                line: line.to_owned(),
                source,
            })?;

        table.add(record.query(), record.target(), record.score());
    }

    Ok(table)
}

/// Sums the scores of every record in a [`Reader`].
///
/// # Examples
///
/// ```
/// use bgcprep::aggregate;
///
/// let data = b"q1 t1 1.5\nq1 t2 2.0\nq1 t1 0.5\nq2 t1 3.0\n";
/// let mut reader = bgcprep::Reader::new(&data[..]);
///
/// let table = aggregate::aggregate_reader(&mut reader)?;
/// assert_eq!(table.get("q1", "t1"), Some(2.0));
/// assert_eq!(table.len(), 3);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn aggregate_reader<T>(reader: &mut Reader<T>) -> Result<Table>
where
    T: BufRead,
{
    let mut table = Table::default();

    for result in reader.records() {
        let (query, target, score) = result?.into_parts();
        table.add(&query, &target, score);
    }

    Ok(table)
}
