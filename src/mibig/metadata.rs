//! Cluster metadata from MIBiG JSON entries.

use std::io::Read;

use serde::Deserialize;

/// The top-level document of a MIBiG JSON entry.
#[derive(Debug, Deserialize)]
struct Document {
    /// The cluster section.
    cluster: RawCluster,
}

/// The `cluster` section of a MIBiG JSON entry, restricted to the fields of
/// interest.
#[derive(Debug, Deserialize)]
struct RawCluster {
    /// The name of the producing organism.
    organism_name: String,

    /// The compounds produced by the cluster.
    compounds: Vec<RawCompound>,

    /// The publications (PubMed ids or DOIs) describing the cluster.
    #[serde(default)]
    publications: Vec<String>,
}

/// A compound entry.
#[derive(Debug, Deserialize)]
struct RawCompound {
    /// The compound name.
    compound: String,
}

/// The metadata of a biosynthetic gene cluster.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Metadata {
    /// The name of the producing organism.
    organism: String,

    /// The names of the compounds produced by the cluster.
    compounds: Vec<String>,

    /// The citations for the cluster.
    citations: Vec<String>,
}

impl Metadata {
    /// Creates a new [`Metadata`].
    pub fn new(organism: impl Into<String>, compounds: Vec<String>, citations: Vec<String>) -> Self {
        Self {
            organism: organism.into(),
            compounds,
            citations,
        }
    }

    /// Parses the metadata out of a MIBiG JSON entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use bgcprep::mibig::Metadata;
    ///
    /// let json = r#"{
    ///     "cluster": {
    ///         "organism_name": "Streptomyces coelicolor A3(2)",
    ///         "compounds": [{ "compound": "actinorhodin" }],
    ///         "publications": ["pubmed:1234567"]
    ///     }
    /// }"#;
    ///
    /// let metadata = Metadata::from_reader(json.as_bytes())?;
    /// assert_eq!(metadata.organism(), "Streptomyces coelicolor A3(2)");
    /// assert_eq!(metadata.compounds(), ["actinorhodin"]);
    /// assert_eq!(metadata.citations(), ["pubmed:1234567"]);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_reader<R>(reader: R) -> serde_json::Result<Self>
    where
        R: Read,
    {
        let document: Document = serde_json::from_reader(reader)?;
        let cluster = document.cluster;

        Ok(Self {
            organism: cluster.organism_name,
            compounds: cluster
                .compounds
                .into_iter()
                .map(|entry| entry.compound)
                .collect(),
            citations: cluster.publications,
        })
    }

    /// Gets the name of the producing organism.
    pub fn organism(&self) -> &str {
        &self.organism
    }

    /// Gets the names of the compounds produced by the cluster.
    pub fn compounds(&self) -> &[String] {
        &self.compounds
    }

    /// Gets the citations for the cluster.
    pub fn citations(&self) -> &[String] {
        &self.citations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ignores_unknown_fields() -> Result<(), Box<dyn std::error::Error>> {
        let json = r#"{
            "cluster": {
                "mibig_accession": "BGC0000001",
                "organism_name": "Streptomyces sp.",
                "biosyn_class": ["Polyketide"],
                "compounds": [
                    { "compound": "abyssomicin C", "chem_struct": "C" },
                    { "compound": "atrop-abyssomicin C" }
                ],
                "publications": ["pubmed:15274638", "doi:10.1002/anie.200460000"]
            }
        }"#;

        let metadata = Metadata::from_reader(json.as_bytes())?;
        assert_eq!(
            metadata,
            Metadata::new(
                "Streptomyces sp.",
                vec![
                    String::from("abyssomicin C"),
                    String::from("atrop-abyssomicin C")
                ],
                vec![
                    String::from("pubmed:15274638"),
                    String::from("doi:10.1002/anie.200460000")
                ],
            )
        );

        Ok(())
    }

    #[test]
    fn test_missing_publications() -> Result<(), Box<dyn std::error::Error>> {
        let json = r#"{"cluster": {"organism_name": "E. coli", "compounds": []}}"#;

        let metadata = Metadata::from_reader(json.as_bytes())?;
        assert!(metadata.compounds().is_empty());
        assert!(metadata.citations().is_empty());

        Ok(())
    }

    #[test]
    fn test_missing_organism() {
        let json = r#"{"cluster": {"compounds": []}}"#;
        let err = Metadata::from_reader(json.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("organism_name"));
    }
}
