//! A table of summed scores keyed by (query, target) pair.

use std::io;
use std::io::Write;

use indexmap::IndexMap;
use indexmap::IndexSet;

/// The delimiter between fields of a serialized row.
pub const OUTPUT_DELIMITER: char = ',';

/// A table of summed scores.
///
/// Scores are grouped by query and then by target. Both levels iterate in
/// first-insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    /// The summed scores, keyed by query and then by target.
    inner: IndexMap<String, IndexMap<String, f64>>,
}

impl Table {
    /// Adds `score` to the running total for the `(query, target)` pair.
    ///
    /// # Examples
    ///
    /// ```
    /// use bgcprep::aggregate::Table;
    ///
    /// let mut table = Table::default();
    /// table.add("q1", "t1", 1.5);
    /// table.add("q1", "t1", 0.5);
    ///
    /// assert_eq!(table.get("q1", "t1"), Some(2.0));
    /// ```
    pub fn add(&mut self, query: &str, target: &str, score: f64) {
        // Lookups by `&str` first so repeated pairs never allocate.
        if let Some(targets) = self.inner.get_mut(query) {
            match targets.get_mut(target) {
                Some(total) => *total += score,
                None => {
                    targets.insert(target.to_owned(), score);
                }
            }
        } else {
            let mut targets = IndexMap::new();
            targets.insert(target.to_owned(), score);
            self.inner.insert(query.to_owned(), targets);
        }
    }

    /// Gets the summed score for a `(query, target)` pair.
    ///
    /// # Examples
    ///
    /// ```
    /// use bgcprep::aggregate::Table;
    ///
    /// let mut table = Table::default();
    /// table.add("q1", "t1", 1.5);
    ///
    /// assert_eq!(table.get("q1", "t1"), Some(1.5));
    /// assert_eq!(table.get("q1", "t2"), None);
    /// ```
    pub fn get(&self, query: &str, target: &str) -> Option<f64> {
        self.inner.get(query)?.get(target).copied()
    }

    /// Gets the number of distinct `(query, target)` pairs.
    pub fn len(&self) -> usize {
        self.inner.values().map(|targets| targets.len()).sum()
    }

    /// Returns whether the table holds no pairs.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Gets the number of distinct query identifiers.
    pub fn num_queries(&self) -> usize {
        self.inner.len()
    }

    /// Gets the number of distinct target identifiers across all queries.
    ///
    /// # Examples
    ///
    /// ```
    /// use bgcprep::aggregate::Table;
    ///
    /// let mut table = Table::default();
    /// table.add("q1", "t1", 1.0);
    /// table.add("q2", "t1", 1.0);
    /// table.add("q2", "t2", 1.0);
    ///
    /// assert_eq!(table.num_queries(), 2);
    /// assert_eq!(table.num_targets(), 2);
    /// assert_eq!(table.len(), 3);
    /// ```
    pub fn num_targets(&self) -> usize {
        self.inner
            .values()
            .flat_map(|targets| targets.keys())
            .collect::<IndexSet<_>>()
            .len()
    }

    /// Returns an iterator over the query identifiers in first-insertion
    /// order.
    pub fn queries(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(String::as_str)
    }

    /// Returns an iterator over `(query, target, score)` triples.
    ///
    /// Queries are visited in first-insertion order and, within each query,
    /// targets are visited in first-insertion order.
    ///
    /// # Examples
    ///
    /// ```
    /// use bgcprep::aggregate::Table;
    ///
    /// let mut table = Table::default();
    /// table.add("A", "X", 1.0);
    /// table.add("B", "Y", 1.0);
    /// table.add("A", "X", 1.0);
    /// table.add("A", "Z", 1.0);
    ///
    /// let pairs = table.iter().map(|(q, t, _)| (q, t)).collect::<Vec<_>>();
    /// assert_eq!(pairs, [("A", "X"), ("A", "Z"), ("B", "Y")]);
    /// ```
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, f64)> {
        self.inner.iter().flat_map(|(query, targets)| {
            targets
                .iter()
                .map(move |(target, score)| (query.as_str(), target.as_str(), *score))
        })
    }

    /// Serializes the table into `<query>,<target>,<score>` rows (without
    /// line endings).
    ///
    /// Scores use the shortest representation that parses back to the same
    /// value, always carrying a decimal point or an exponent.
    ///
    /// # Examples
    ///
    /// ```
    /// use bgcprep::aggregate::Table;
    ///
    /// let mut table = Table::default();
    /// table.add("q1", "t1", 1.5);
    /// table.add("q1", "t1", 0.5);
    ///
    /// assert_eq!(table.serialize().collect::<Vec<_>>(), ["q1,t1,2.0"]);
    /// ```
    pub fn serialize(&self) -> impl Iterator<Item = String> + '_ {
        self.iter().map(|(query, target, score)| {
            format!("{query}{OUTPUT_DELIMITER}{target}{OUTPUT_DELIMITER}{score:?}")
        })
    }

    /// Writes the serialized table to `writer`, one newline-terminated row per
    /// pair.
    ///
    /// # Examples
    ///
    /// ```
    /// use bgcprep::aggregate::Table;
    ///
    /// let mut table = Table::default();
    /// table.add("q1", "t1", 2.0);
    /// table.add("q2", "t1", 3.0);
    ///
    /// let mut buffer = Vec::new();
    /// table.write_to(&mut buffer)?;
    /// assert_eq!(buffer, b"q1,t1,2.0\nq2,t1,3.0\n");
    ///
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn write_to<W>(&self, mut writer: W) -> io::Result<()>
    where
        W: Write,
    {
        for row in self.serialize() {
            writeln!(writer, "{row}")?;
        }

        writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_isolation() {
        let mut table = Table::default();
        table.add("A", "B", 1.0);
        table.add("A", "C", 10.0);
        table.add("D", "B", 100.0);
        table.add("A", "B", 2.0);

        assert_eq!(table.get("A", "B"), Some(3.0));
        assert_eq!(table.get("A", "C"), Some(10.0));
        assert_eq!(table.get("D", "B"), Some(100.0));
        assert_eq!(table.get("D", "C"), None);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_keys_are_exact() {
        let mut table = Table::default();
        table.add("q1", "t1", 1.0);
        table.add("Q1", "t1", 2.0);
        table.add("q1", "T1", 4.0);

        assert_eq!(table.len(), 3);
        assert_eq!(table.get("q1", "t1"), Some(1.0));
    }

    #[test]
    fn test_queries_in_first_insertion_order() {
        let mut table = Table::default();
        for query in ["zeta", "alpha", "mu", "alpha", "zeta"] {
            table.add(query, "t", 1.0);
        }

        assert_eq!(
            table.queries().collect::<Vec<_>>(),
            ["zeta", "alpha", "mu"]
        );
        assert_eq!(table.get("zeta", "t"), Some(2.0));
    }

    #[test]
    fn test_score_formatting() {
        let mut table = Table::default();
        table.add("a", "b", 3.0);
        table.add("a", "c", 0.1);
        table.add("a", "d", 1e20);
        table.add("a", "e", -2.5);

        let rows = table.serialize().collect::<Vec<_>>();
        assert_eq!(rows, ["a,b,3.0", "a,c,0.1", "a,d,1e20", "a,e,-2.5"]);

        for row in rows {
            let score = row.rsplit(OUTPUT_DELIMITER).next().unwrap();
            assert!(score.parse::<f64>().is_ok());
        }
    }

    #[test]
    fn test_serialization_is_repeatable() -> Result<(), Box<dyn std::error::Error>> {
        let mut table = Table::default();
        table.add("q1", "t1", 0.1);
        table.add("q1", "t1", 0.2);
        table.add("q2", "t3", 7.25);

        let mut first = Vec::new();
        let mut second = Vec::new();
        table.write_to(&mut first)?;
        table.write_to(&mut second)?;

        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn test_empty_table() -> Result<(), Box<dyn std::error::Error>> {
        let table = Table::default();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert_eq!(table.num_targets(), 0);

        let mut buffer = Vec::new();
        table.write_to(&mut buffer)?;
        assert!(buffer.is_empty());

        Ok(())
    }
}
