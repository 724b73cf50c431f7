//! A pairwise alignment score record.

use std::num::ParseFloatError;
use std::str::FromStr;

/// The number of expected fields in a score record.
pub const NUM_SCORE_FIELDS: usize = 3;

/// The delimiter used when displaying a score record.
const SCORE_DELIMITER: char = '\t';

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// An error related to the parsing of a score record.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// An incorrect number of whitespace-separated fields in the line.
    IncorrectNumberOfFields(usize),

    /// An invalid score.
    InvalidScore(ParseFloatError),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::IncorrectNumberOfFields(n) => write!(
                f,
                "invalid number of fields in score record: expected {NUM_SCORE_FIELDS} fields, \
                 found {n} fields"
            ),
            ParseError::InvalidScore(err) => write!(f, "invalid score: {err}"),
        }
    }
}

impl std::error::Error for ParseError {}

////////////////////////////////////////////////////////////////////////////////////////
// Record
////////////////////////////////////////////////////////////////////////////////////////

/// A single `<query> <target> <bitscore>` record as emitted by a pairwise
/// aligner (e.g., DIAMOND with `--outfmt 6 qseqid sseqid bitscore`).
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    /// The query identifier.
    query: String,

    /// The target identifier.
    target: String,

    /// The alignment score.
    score: f64,
}

impl Record {
    /// Creates a new [`Record`].
    ///
    /// # Examples
    ///
    /// ```
    /// use bgcprep::record::Record;
    ///
    /// let record = Record::new("q1", "t1", 1.5);
    /// assert_eq!(record.query(), "q1");
    /// assert_eq!(record.target(), "t1");
    /// assert_eq!(record.score(), 1.5);
    /// ```
    pub fn new(query: impl Into<String>, target: impl Into<String>, score: f64) -> Self {
        Self {
            query: query.into(),
            target: target.into(),
            score,
        }
    }

    /// Gets the query identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use bgcprep::record::Record;
    ///
    /// let record = "q1 t1 1.5".parse::<Record>()?;
    /// assert_eq!(record.query(), "q1");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Gets the target identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use bgcprep::record::Record;
    ///
    /// let record = "q1 t1 1.5".parse::<Record>()?;
    /// assert_eq!(record.target(), "t1");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Gets the score.
    ///
    /// # Examples
    ///
    /// ```
    /// use bgcprep::record::Record;
    ///
    /// let record = "q1 t1 1.5".parse::<Record>()?;
    /// assert_eq!(record.score(), 1.5);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Consumes `self` and returns the parts of the record.
    pub fn into_parts(self) -> (String, String, f64) {
        (self.query, self.target, self.score)
    }
}

impl FromStr for Record {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s.split_whitespace().collect::<Vec<_>>();

        if parts.len() != NUM_SCORE_FIELDS {
            return Err(ParseError::IncorrectNumberOfFields(parts.len()));
        }

        let score = parts[2].parse().map_err(ParseError::InvalidScore)?;
        Ok(Record::new(parts[0], parts[1], score))
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}{}{}{:?}",
            self.query, SCORE_DELIMITER, self.target, SCORE_DELIMITER, self.score
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_delimited_record() -> Result<(), Box<dyn std::error::Error>> {
        let record = "q1 t1 1.5".parse::<Record>()?;

        assert_eq!(record.query(), "q1");
        assert_eq!(record.target(), "t1");
        assert_eq!(record.score(), 1.5);

        Ok(())
    }

    #[test]
    fn test_mixed_whitespace_record() -> Result<(), Box<dyn std::error::Error>> {
        let record = "  BGC0000001.1_AAA\t \tsp|P12345|X  \t 42  ".parse::<Record>()?;

        assert_eq!(record.query(), "BGC0000001.1_AAA");
        assert_eq!(record.target(), "sp|P12345|X");
        assert_eq!(record.score(), 42.0);

        Ok(())
    }

    #[test]
    fn test_identifiers_are_case_sensitive() -> Result<(), Box<dyn std::error::Error>> {
        let record = "Q1 t1 1".parse::<Record>()?;
        assert_eq!(record.query(), "Q1");
        assert_ne!(record.query(), "q1");
        Ok(())
    }

    #[test]
    fn test_scientific_notation_score() -> Result<(), Box<dyn std::error::Error>> {
        let record = "q1 t1 1e3".parse::<Record>()?;
        assert_eq!(record.score(), 1000.0);
        Ok(())
    }

    #[test]
    fn test_too_few_fields() {
        let err = "q1 t1".parse::<Record>().unwrap_err();

        assert_eq!(err, ParseError::IncorrectNumberOfFields(2));
        assert_eq!(
            err.to_string(),
            "invalid number of fields in score record: expected 3 fields, found 2 fields"
        );
    }

    #[test]
    fn test_too_many_fields() {
        let err = "q1 t1 1.5 99.0".parse::<Record>().unwrap_err();
        assert_eq!(err, ParseError::IncorrectNumberOfFields(4));
    }

    #[test]
    fn test_blank_line() {
        let err = "   ".parse::<Record>().unwrap_err();
        assert_eq!(err, ParseError::IncorrectNumberOfFields(0));
    }

    #[test]
    fn test_invalid_score() {
        let err = "q1 t1 high".parse::<Record>().unwrap_err();

        assert!(matches!(err, ParseError::InvalidScore(_)));
        assert_eq!(err.to_string(), "invalid score: invalid float literal");
    }

    #[test]
    fn test_display() {
        let record = Record::new("q1", "t1", 2.0);
        assert_eq!(record.to_string(), "q1\tt1\t2.0");
    }
}
