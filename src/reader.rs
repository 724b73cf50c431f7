//! A reader for pairwise alignment score tables.

use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::io::{self};
use std::iter;
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::record;
use crate::record::Record;

/// The new line character.
const NEW_LINE: char = '\n';

/// The carriage return character.
const CARRIAGE_RETURN: char = '\r';

/// The extension that marks a gzip-compressed input.
const GZIP_EXTENSION: &str = "gz";

/// An error related to a [`Reader`].
#[derive(Debug)]
pub enum Error {
    /// An I/O error.
    Io(io::Error),

    /// A line that could not be parsed into a [`Record`].
    ///
    /// The fields are the 1-based line number, the offending line, and the
    /// underlying parse error.
    Record(usize, String, record::ParseError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "i/o error: {err}"),
            Error::Record(line_no, line, err) => {
                write!(f, "record error at line {line_no}: {err}\n\nline: {line}")
            }
        }
    }
}

impl std::error::Error for Error {}

/// A score table reader.
#[derive(Clone, Debug)]
pub struct Reader<T>
where
    T: BufRead,
{
    /// The inner reader.
    inner: T,

    /// The number of lines read so far.
    line_no: usize,
}

impl<T> Reader<T>
where
    T: BufRead,
{
    /// Creates a score table reader.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"q1 t1 1.5\nq1 t2 2.0\n";
    /// let reader = bgcprep::Reader::new(&data[..]);
    /// ```
    pub fn new(inner: T) -> Self {
        Self::from(inner)
    }

    /// Gets a reference to the inner reader.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io;
    ///
    /// let data = b"q1 t1 1.5\n";
    /// let cursor = io::Cursor::new(data);
    ///
    /// let reader = bgcprep::Reader::new(cursor);
    /// assert_eq!(reader.inner().position(), 0);
    /// ```
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Gets a mutable reference to the inner reader.
    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consumes self and returns the inner reader.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Gets the number of lines read so far.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"q1 t1 1.5\nq1 t2 2.0\n";
    /// let mut reader = bgcprep::Reader::new(&data[..]);
    ///
    /// let mut buffer = String::new();
    /// reader.read_line_raw(&mut buffer)?;
    /// assert_eq!(reader.line_no(), 1);
    ///
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn line_no(&self) -> usize {
        self.line_no
    }

    /// Reads a raw, textual line from the underlying reader.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io;
    ///
    /// let data = b"q1 t1 1.5\r\nq1\tt2\t2.0";
    /// let mut reader = bgcprep::Reader::new(&data[..]);
    ///
    /// let mut buffer = String::new();
    ///
    /// assert_eq!(reader.read_line_raw(&mut buffer)?, 11);
    /// assert_eq!(buffer, "q1 t1 1.5");
    ///
    /// assert_eq!(reader.read_line_raw(&mut buffer)?, 9);
    /// assert_eq!(buffer, "q1\tt2\t2.0");
    ///
    /// assert_eq!(reader.read_line_raw(&mut buffer)?, 0);
    ///
    /// # Ok::<(), io::Error>(())
    /// ```
    pub fn read_line_raw(&mut self, buffer: &mut String) -> io::Result<usize> {
        let read = read_line(&mut self.inner, buffer)?;

        if read > 0 {
            self.line_no += 1;
        }

        Ok(read)
    }

    /// Attempts to read a [`Record`] from the underlying reader.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"q1 t1 1.5\nq1 t2 2.0\n";
    /// let mut reader = bgcprep::Reader::new(&data[..]);
    ///
    /// let mut buffer = String::new();
    /// let record = reader.read_record(&mut buffer)?.unwrap();
    /// assert_eq!(record.query(), "q1");
    /// assert_eq!(record.target(), "t1");
    ///
    /// assert!(reader.read_record(&mut buffer)?.is_some());
    /// assert!(reader.read_record(&mut buffer)?.is_none());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn read_record(&mut self, buffer: &mut String) -> Result<Option<Record>, Error> {
        let read = self.read_line_raw(buffer).map_err(Error::Io)?;

        match read {
            0 => Ok(None),
            _ => buffer
                .parse::<Record>()
                .map(Some)
                .map_err(|err| Error::Record(self.line_no, buffer.clone(), err)),
        }
    }

    /// Returns an iterator over the [`Record`]s in the underlying reader.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"q1 t1 1.5\nq1 t2 2.0\n";
    /// let mut reader = bgcprep::Reader::new(&data[..]);
    ///
    /// let records = reader.records().collect::<Result<Vec<_>, _>>()?;
    /// assert_eq!(records.len(), 2);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn records(&mut self) -> impl Iterator<Item = Result<Record, Error>> + '_ {
        let mut buffer = String::new();
        iter::from_fn(move || self.read_record(&mut buffer).transpose())
    }
}

impl<T> From<T> for Reader<T>
where
    T: BufRead,
{
    fn from(inner: T) -> Self {
        Self { inner, line_no: 0 }
    }
}

/// Opens a score table from a path.
///
/// Paths ending in `.gz` are transparently decompressed.
///
/// # Examples
///
/// ```no_run
/// let mut reader = bgcprep::reader::open("diamond.tsv.gz")?;
/// for result in reader.records() {
///     let record = result?;
///     println!("{record}");
/// }
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn open(path: impl AsRef<Path>) -> io::Result<Reader<Box<dyn BufRead>>> {
    let path = path.as_ref();
    let file = File::open(path)?;

    let inner: Box<dyn BufRead> = match path.extension() {
        Some(ext) if ext == GZIP_EXTENSION => {
            Box::new(BufReader::new(MultiGzDecoder::new(file)))
        }
        _ => Box::new(BufReader::new(file)),
    };

    Ok(Reader::new(inner))
}

/// Reads a line from a buffered reader.
///
/// Trailing line endings (`\n` or `\r\n`) are removed from the buffer, but
/// the returned count includes them.
fn read_line<T>(reader: &mut T, buffer: &mut String) -> io::Result<usize>
where
    T: BufRead,
{
    buffer.clear();

    match reader.read_line(buffer) {
        Ok(0) => Ok(0),
        Ok(n) => {
            if buffer.ends_with(NEW_LINE) {
                buffer.pop();

                if buffer.ends_with(CARRIAGE_RETURN) {
                    buffer.pop();
                }
            }

            Ok(n)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::io::Write as _;

    use flate2::write::GzEncoder;
    use flate2::Compression;
    use tempdir::TempDir;

    use super::*;

    #[test]
    fn test_read_line() {
        let data = b"hello\r\nworld!";
        let mut cursor = io::Cursor::new(data);

        let mut buffer = String::new();
        let len = read_line(&mut cursor, &mut buffer).unwrap();
        assert_eq!(buffer, "hello");
        assert_eq!(len, 7);

        let len = read_line(&mut cursor, &mut buffer).unwrap();
        assert_eq!(buffer, "world!");
        assert_eq!(len, 6);
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let data = b"q1 t1 1.5\nq1 t2\nq2 t1 3.0\n";
        let mut reader = Reader::new(&data[..]);

        let err = reader
            .records()
            .collect::<Result<Vec<_>, _>>()
            .unwrap_err();

        match err {
            Error::Record(line_no, line, _) => {
                assert_eq!(line_no, 2);
                assert_eq!(line, "q1 t2");
            }
            Error::Io(_) => panic!("expected a record error"),
        }
    }

    #[test]
    fn test_malformed_line_display() {
        let data = b"q1 t1 abc\n";
        let mut reader = Reader::new(&data[..]);
        let mut buffer = String::new();

        let err = reader.read_record(&mut buffer).unwrap_err();
        assert_eq!(
            err.to_string(),
            "record error at line 1: invalid score: invalid float literal\n\nline: q1 t1 abc"
        );
    }

    #[test]
    fn test_open_plain_and_gzip() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new("bgcprep")?;
        let data = b"q1 t1 1.5\nq1 t2 2.0\n";

        let plain = dir.path().join("scores.tsv");
        std::fs::write(&plain, data)?;

        let gzipped = dir.path().join("scores.tsv.gz");
        let mut encoder = GzEncoder::new(File::create(&gzipped)?, Compression::default());
        encoder.write_all(data)?;
        encoder.finish()?;

        for path in [plain, gzipped] {
            let mut reader = open(&path)?;
            let records = reader.records().collect::<Result<Vec<_>, _>>()?;

            assert_eq!(records.len(), 2);
            assert_eq!(records[1].target(), "t2");
            assert_eq!(records[1].score(), 2.0);
        }

        Ok(())
    }
}
