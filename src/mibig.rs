//! Extraction of synthase sequences and metadata from MIBiG entries.
//!
//! Each MIBiG accession is described by a GenBank record (holding the coding
//! sequences of the cluster) and a JSON entry (holding the producing
//! organism, the produced compounds, and the citations). [`extract()`] pairs
//! the two by accession and the results can be written out as a table with
//! [`write_table()`] or as FASTA with [`write_fasta()`].

pub mod genbank;
pub mod metadata;

use std::fs;
use std::fs::File;
use std::io;
use std::io::BufReader;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

pub use genbank::Synthase;
pub use metadata::Metadata;
use tracing::info;
use tracing::warn;

/// The extension of MIBiG JSON entries.
const JSON_EXTENSION: &str = "json";

/// The delimiter between fields of the table.
const TABLE_DELIMITER: &str = "\t";

/// The separator for list-valued fields of the table.
const LIST_SEPARATOR: &str = ", ";

/// The header of the table.
pub const TABLE_HEADER: [&str; 7] = [
    "Organism",
    "MIBIG",
    "Accession",
    "Gene",
    "Length",
    "Compounds",
    "Citations",
];

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// An error related to extraction.
#[derive(Debug)]
pub enum Error {
    /// An I/O error while accessing a path.
    Io(PathBuf, io::Error),

    /// A JSON entry that could not be parsed.
    Json(PathBuf, serde_json::Error),

    /// A path that was expected to be a directory.
    NotADirectory(PathBuf),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(path, err) => write!(f, "i/o error for {}: {err}", path.display()),
            Error::Json(path, err) => write!(f, "invalid JSON in {}: {err}", path.display()),
            Error::NotADirectory(path) => write!(f, "not a directory: {}", path.display()),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(_, err) => Some(err),
            Error::Json(_, err) => Some(err),
            Error::NotADirectory(_) => None,
        }
    }
}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

////////////////////////////////////////////////////////////////////////////////////////
// Clusters
////////////////////////////////////////////////////////////////////////////////////////

/// A biosynthetic gene cluster.
#[derive(Clone, Debug, PartialEq)]
pub struct Cluster {
    /// The MIBiG accession.
    accession: String,

    /// The synthases within the cluster.
    synthases: Vec<Synthase>,

    /// The metadata, if a JSON entry was found.
    metadata: Option<Metadata>,
}

impl Cluster {
    /// Creates a new [`Cluster`].
    pub fn new(
        accession: impl Into<String>,
        synthases: Vec<Synthase>,
        metadata: Option<Metadata>,
    ) -> Self {
        Self {
            accession: accession.into(),
            synthases,
            metadata,
        }
    }

    /// Gets the MIBiG accession.
    pub fn accession(&self) -> &str {
        &self.accession
    }

    /// Gets the synthases within the cluster.
    pub fn synthases(&self) -> &[Synthase] {
        &self.synthases
    }

    /// Gets the metadata, if any.
    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }
}

/// Reads every cluster from a directory of GenBank records and a directory of
/// JSON entries.
///
/// Records are visited in file name order and the accession of each cluster
/// is the file stem of its GenBank record. If `accessions` is provided, only
/// those accessions are read. A missing JSON entry is reported and leaves the
/// cluster without metadata.
pub fn extract(
    gbk_dir: impl AsRef<Path>,
    json_dir: impl AsRef<Path>,
    accessions: Option<&[String]>,
) -> Result<Vec<Cluster>> {
    let gbk_dir = gbk_dir.as_ref();
    let json_dir = json_dir.as_ref();

    for dir in [gbk_dir, json_dir] {
        if !dir.is_dir() {
            return Err(Error::NotADirectory(dir.to_path_buf()));
        }
    }

    let mut paths = fs::read_dir(gbk_dir)
        .map_err(|err| Error::Io(gbk_dir.to_path_buf(), err))?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<io::Result<Vec<_>>>()
        .map_err(|err| Error::Io(gbk_dir.to_path_buf(), err))?;
    paths.retain(|path| path.is_file());
    paths.sort();

    let mut clusters = Vec::new();

    for path in paths {
        let accession = match path.file_stem() {
            Some(stem) => stem.to_string_lossy().into_owned(),
            None => continue,
        };

        if let Some(accessions) = accessions {
            if !accessions.contains(&accession) {
                info!("{accession} not in specified accessions, skipping");
                continue;
            }
        }

        info!("parsing {accession}");

        let text = fs::read_to_string(&path).map_err(|err| Error::Io(path.clone(), err))?;
        let synthases = genbank::parse(&text);

        let json = json_dir.join(format!("{accession}.{JSON_EXTENSION}"));
        let metadata = read_metadata(&json)?;

        if metadata.is_none() {
            warn!("{accession} has no JSON entry");
        }

        clusters.push(Cluster::new(accession, synthases, metadata));
    }

    Ok(clusters)
}

/// Reads the metadata at `path`, returning [`None`] if the file does not
/// exist.
fn read_metadata(path: &Path) -> Result<Option<Metadata>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(Error::Io(path.to_path_buf(), err)),
    };

    Metadata::from_reader(BufReader::new(file))
        .map(Some)
        .map_err(|err| Error::Json(path.to_path_buf(), err))
}

////////////////////////////////////////////////////////////////////////////////////////
// Output
////////////////////////////////////////////////////////////////////////////////////////

/// Writes one tab-delimited row per synthase, preceded by a header.
///
/// Clusters without metadata have empty organism, compound, and citation
/// fields.
///
/// # Examples
///
/// ```
/// use bgcprep::mibig::Cluster;
/// use bgcprep::mibig::Metadata;
/// use bgcprep::mibig::Synthase;
///
/// let cluster = Cluster::new(
///     "BGC0000001",
///     vec![Synthase::new("AAK00001.1", "MKLV", Some(String::from("abcA")))],
///     Some(Metadata::new(
///         "Streptomyces sp.",
///         vec![String::from("abyssomicin C")],
///         vec![],
///     )),
/// );
///
/// let mut buffer = Vec::new();
/// bgcprep::mibig::write_table(&[cluster], &mut buffer)?;
///
/// assert_eq!(
///     String::from_utf8(buffer)?,
///     "Organism\tMIBIG\tAccession\tGene\tLength\tCompounds\tCitations\n\
///      Streptomyces sp.\tBGC0000001\tAAK00001.1\tabcA\t4\tabyssomicin C\t\n"
/// );
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn write_table<W>(clusters: &[Cluster], mut writer: W) -> io::Result<()>
where
    W: Write,
{
    writeln!(writer, "{}", TABLE_HEADER.join(TABLE_DELIMITER))?;

    for cluster in clusters {
        let (organism, compounds, citations) = match cluster.metadata() {
            Some(metadata) => (
                metadata.organism(),
                metadata.compounds().join(LIST_SEPARATOR),
                metadata.citations().join(LIST_SEPARATOR),
            ),
            None => ("", String::new(), String::new()),
        };

        for synthase in cluster.synthases() {
            let length = synthase.len().to_string();
            let fields: [&str; 7] = [
                organism,
                cluster.accession(),
                synthase.protein_id(),
                synthase.gene().unwrap_or_default(),
                &length,
                &compounds,
                &citations,
            ];

            writeln!(writer, "{}", fields.join(TABLE_DELIMITER))?;
        }
    }

    writer.flush()
}

/// Writes every synthase as a single-line FASTA record named by its protein
/// accession.
///
/// # Examples
///
/// ```
/// use bgcprep::mibig::Cluster;
/// use bgcprep::mibig::Synthase;
///
/// let cluster = Cluster::new(
///     "BGC0000001",
///     vec![
///         Synthase::new("AAK00001.1", "MKLV", None),
///         Synthase::new("AAK00003.1", "MFAS", None),
///     ],
///     None,
/// );
///
/// let mut buffer = Vec::new();
/// bgcprep::mibig::write_fasta(&[cluster], &mut buffer)?;
/// assert_eq!(buffer, b">AAK00001.1\nMKLV\n>AAK00003.1\nMFAS\n");
///
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn write_fasta<W>(clusters: &[Cluster], mut writer: W) -> io::Result<()>
where
    W: Write,
{
    for synthase in clusters.iter().flat_map(|cluster| cluster.synthases()) {
        writeln!(writer, ">{}\n{}", synthase.protein_id(), synthase.sequence())?;
    }

    writer.flush()
}
