//! Synthase coding sequences within MIBiG GenBank records.

use std::sync::LazyLock;

use regex::Regex;

/// Matches a `CDS` feature up to its protein id and translation.
///
/// The first group holds every qualifier between the feature key and the
/// protein id, the second group holds the protein id, and the third group
/// holds the (possibly line-wrapped) translation.
static CDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)     CDS    (.+?)/protein_id="(.+?)".+?/translation="(.+?)""#).unwrap()
});

/// The qualifier that names a gene.
const GENE_QUALIFIER: &str = "/gene=";

/// Markers that, when present in the qualifiers of a `CDS` feature, identify
/// the feature as a synthase.
const SYNTHASE_MARKERS: &[&str] = &[
    r#"NRPS_PKS="type: NRPS"#,
    r#"NRPS_PKS="type: Hybrid PKS-NRPS"#,
    r#"NRPS_PKS="type: PKS"#,
    "PKS_KS",
];

/// A product description that identifies a synthase (compared
/// case-insensitively).
const FATTY_ACID_SYNTHASE: &str = "fatty acid synthase";

/// A polyketide, nonribosomal peptide, or fatty acid synthase.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Synthase {
    /// The protein accession.
    protein_id: String,

    /// The amino acid sequence.
    sequence: String,

    /// The gene name, if annotated.
    gene: Option<String>,
}

impl Synthase {
    /// Creates a new [`Synthase`].
    pub fn new(
        protein_id: impl Into<String>,
        sequence: impl Into<String>,
        gene: Option<String>,
    ) -> Self {
        Self {
            protein_id: protein_id.into(),
            sequence: sequence.into(),
            gene,
        }
    }

    /// Gets the protein accession.
    pub fn protein_id(&self) -> &str {
        &self.protein_id
    }

    /// Gets the amino acid sequence.
    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    /// Gets the gene name, if one was annotated.
    pub fn gene(&self) -> Option<&str> {
        self.gene.as_deref()
    }

    /// Gets the number of residues in the sequence.
    pub fn len(&self) -> usize {
        self.sequence.chars().count()
    }

    /// Returns whether the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// Returns whether the qualifiers of a `CDS` feature mark it as a synthase.
fn is_synthase(qualifiers: &str) -> bool {
    SYNTHASE_MARKERS
        .iter()
        .any(|marker| qualifiers.contains(marker))
        || qualifiers.to_lowercase().contains(FATTY_ACID_SYNTHASE)
}

/// Gets the first gene name within the qualifiers of a `CDS` feature.
fn gene_name(qualifiers: &str) -> Option<String> {
    qualifiers
        .lines()
        .find(|line| line.contains(GENE_QUALIFIER))
        .and_then(|line| line.split('"').nth(1))
        .map(String::from)
}

/// Parses the synthases out of the text of a MIBiG GenBank record.
///
/// Synthases are returned in the order their `CDS` features appear.
///
/// # Examples
///
/// ```
/// use bgcprep::mibig::genbank;
///
/// let text = concat!(
///     "     CDS             1..12\n",
///     "                     /NRPS_PKS=\"type: PKS type I\"\n",
///     "                     /gene=\"pksA\"\n",
///     "                     /protein_id=\"ABC00001.1\"\n",
///     "                     /translation=\"MKLV\n",
///     "                     AAGG\"\n",
/// );
///
/// let synthases = genbank::parse(text);
/// assert_eq!(synthases.len(), 1);
/// assert_eq!(synthases[0].protein_id(), "ABC00001.1");
/// assert_eq!(synthases[0].sequence(), "MKLVAAGG");
/// assert_eq!(synthases[0].gene(), Some("pksA"));
/// ```
pub fn parse(text: &str) -> Vec<Synthase> {
    CDS.captures_iter(text)
        .filter_map(|captures| {
            let qualifiers = captures.get(1)?.as_str();

            if !is_synthase(qualifiers) {
                return None;
            }

            let protein_id = captures.get(2)?.as_str();
            let sequence = captures
                .get(3)?
                .as_str()
                .split_whitespace()
                .collect::<String>();

            Some(Synthase::new(protein_id, sequence, gene_name(qualifiers)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A trimmed down MIBiG GenBank record with one record of each kind.
    const RECORD: &str = r#"LOCUS       BGC0000001             90 bp    DNA     linear
FEATURES             Location/Qualifiers
     CDS             1..30
                     /NRPS_PKS="type: PKS type I"
                     /gene="abcA"
                     /protein_id="AAK00001.1"
                     /translation="MKLV
                     AAGG"
     CDS             31..60
                     /gene="regR"
                     /protein_id="AAK00002.1"
                     /translation="MSTQ"
     CDS             61..90
                     /product="Fatty Acid Synthase"
                     /protein_id="AAK00003.1"
                     /translation="MFAS"
     CDS             91..120
                     /aSDomain="PKS_KS"
                     /locus_tag="orf4"
                     /protein_id="AAK00004.1"
                     /translation="MKSQ"
ORIGIN
"#;

    #[test]
    fn test_parse_keeps_only_synthases() {
        let synthases = parse(RECORD);

        assert_eq!(
            synthases,
            vec![
                Synthase::new("AAK00001.1", "MKLVAAGG", Some(String::from("abcA"))),
                Synthase::new("AAK00003.1", "MFAS", None),
                Synthase::new("AAK00004.1", "MKSQ", None),
            ]
        );
    }

    #[test]
    fn test_each_marker_is_recognized() {
        for qualifier in [
            r#"/NRPS_PKS="type: NRPS-like""#,
            r#"/NRPS_PKS="type: Hybrid PKS-NRPS""#,
            r#"/NRPS_PKS="type: PKS-like""#,
            r#"/sec_met="Domain: PKS_KS (1-400)""#,
            r#"/product="putative FATTY ACID SYNTHASE""#,
        ] {
            assert!(is_synthase(qualifier), "{qualifier}");
        }

        assert!(!is_synthase(r#"/product="transporter""#));
    }

    #[test]
    fn test_gene_name() {
        let qualifiers = "   1..9\n   /locus_tag=\"x\"\n   /gene=\"eryA\"\n   /gene=\"other\"\n";
        assert_eq!(gene_name(qualifiers), Some(String::from("eryA")));
        assert_eq!(gene_name("   1..9\n"), None);
    }

    #[test]
    fn test_length() {
        let synthase = Synthase::new("X", "MKLVAAGG", None);
        assert_eq!(synthase.len(), 8);
        assert!(!synthase.is_empty());
    }

    #[test]
    fn test_no_features() {
        assert!(parse("LOCUS       BGC0000002\nORIGIN\n").is_empty());
    }
}
