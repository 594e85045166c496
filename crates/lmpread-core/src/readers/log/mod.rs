mod parser;

use crate::domain::{LmpError, LmpResult};
use crate::source::LineSource;

/// Scalar and labeled-line queries over a solver run log. Queries are
/// independent linear scans; the line source caches the text, the queries
/// themselves keep no index.
#[derive(Debug)]
pub struct LogReader {
    source: LineSource,
}

impl LogReader {
    pub fn new(source: LineSource) -> Self {
        Self { source }
    }

    pub const fn source(&self) -> &LineSource {
        &self.source
    }

    /// `variable-equal` query: the first line containing
    /// `variable <name> equal`, scanned for its first decimal number.
    /// A name that never appears yields `None`, not an error.
    pub fn variable_value(&mut self, name: &str) -> LmpResult<Option<f64>> {
        let needle = format!("variable {} equal", name);
        Ok(self
            .source
            .load()?
            .iter()
            .find(|line| line.contains(&needle))
            .and_then(|line| parser::first_decimal_token(line)))
    }

    /// `raw-label` query: the first decimal number on the first line that
    /// contains the given text fragment.
    pub fn labeled_value(&mut self, label: &str) -> LmpResult<Option<f64>> {
        Ok(self
            .source
            .load()?
            .iter()
            .find(|line| line.contains(label))
            .and_then(|line| parser::first_decimal_token(line)))
    }

    /// `labeled-line` query: collects every tokenized line containing the
    /// label in file order, then returns the token at `token_position` from
    /// the `occurrence`-th match (1-indexed).
    pub fn labeled_line_token(
        &mut self,
        label: &str,
        token_position: usize,
        occurrence: usize,
    ) -> LmpResult<String> {
        let matches: Vec<Vec<String>> = self
            .source
            .load()?
            .iter()
            .filter(|line| line.contains(label))
            .map(|line| line.split_whitespace().map(str::to_owned).collect())
            .collect();

        if occurrence == 0 || occurrence > matches.len() {
            return Err(LmpError::lookup(
                "LOOKUP.LOG_OCCURRENCE",
                format!(
                    "label '{}' matched {} line(s), occurrence {} requested",
                    label,
                    matches.len(),
                    occurrence
                ),
            ));
        }

        matches[occurrence - 1]
            .get(token_position)
            .cloned()
            .ok_or_else(|| {
                LmpError::lookup(
                    "LOOKUP.LOG_TOKEN",
                    format!(
                        "occurrence {} of label '{}' has {} token(s), position {} requested",
                        occurrence,
                        label,
                        matches[occurrence - 1].len(),
                        token_position
                    ),
                )
            })
    }

    /// `paired-count` query: every `Number of molecules for <name>: <count>`
    /// match, in file order. A line that carries the label without completing
    /// the pattern is not a match and contributes nothing.
    pub fn molecule_counts(&mut self) -> LmpResult<Vec<(String, u64)>> {
        Ok(self
            .source
            .load()?
            .iter()
            .filter_map(|line| parser::match_molecule_count(line))
            .collect())
    }
}
