use crate::domain::{LmpError, LmpResult};
use crate::source::LineSource;
use crate::table::{ColumnSpec, ColumnType, DataTable};

/// Reads a print-property file: a `#`-prefixed title on line 0, then one
/// data line per sample, each a `, `-separated list of `key: value` pairs.
/// Column names are the keys of the first data line; every value is floating
/// point. Strict: a line whose keys disagree with the first data line, or
/// whose value does not parse, fails the whole read, since a skipped line
/// would silently drop a sample.
#[derive(Debug)]
pub struct PrintPropReader {
    source: LineSource,
    table: Option<DataTable>,
}

impl PrintPropReader {
    pub fn new(source: LineSource) -> Self {
        Self {
            source,
            table: None,
        }
    }

    pub const fn source(&self) -> &LineSource {
        &self.source
    }

    pub fn read(&mut self) -> LmpResult<&DataTable> {
        if self.table.is_none() {
            let lines = self.source.load()?;
            let table = parse_table(lines)?;
            self.table = Some(table);
        }
        self.table.as_ref().ok_or_else(|| {
            LmpError::internal("SYS.PRINTPROP_MEMO", "memoized table missing after parse")
        })
    }
}

fn parse_table(lines: &[String]) -> LmpResult<DataTable> {
    let first = lines.get(1).ok_or_else(|| {
        LmpError::format(
            "FORMAT.PRINTPROP_EMPTY",
            "print-property file has no data line",
        )
    })?;

    let names: Vec<String> = split_pairs(first, 1)?
        .into_iter()
        .map(|(key, _)| key.to_owned())
        .collect();
    let schema: Vec<ColumnSpec> = names
        .iter()
        .map(|name| ColumnSpec::new(name, ColumnType::Float))
        .collect();

    let mut rows: Vec<Vec<&str>> = Vec::new();
    for (index, line) in lines.iter().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        let pairs = split_pairs(line, index)?;
        if pairs.len() != names.len() {
            return Err(LmpError::format(
                "FORMAT.PRINTPROP_ROW",
                format!(
                    "line {} has {} pair(s), expected {}",
                    index,
                    pairs.len(),
                    names.len()
                ),
            ));
        }

        let mut row = Vec::with_capacity(pairs.len());
        for ((key, value), name) in pairs.into_iter().zip(&names) {
            if key != name.as_str() {
                return Err(LmpError::format(
                    "FORMAT.PRINTPROP_KEY",
                    format!("line {}: key '{}' where '{}' was declared", index, key, name),
                ));
            }
            row.push(value.trim());
        }
        rows.push(row);
    }

    DataTable::from_typed_rows("FORMAT.PRINTPROP_ROW", &schema, &rows)
}

/// Splits one data line into `(key, value)` pairs on `", "` then the first
/// `':'` of each item.
fn split_pairs(line: &str, line_index: usize) -> LmpResult<Vec<(&str, &str)>> {
    line.trim()
        .split(", ")
        .map(|item| {
            item.split_once(':').ok_or_else(|| {
                LmpError::format(
                    "FORMAT.PRINTPROP_PAIR",
                    format!("line {}: '{}' is not a 'key: value' pair", line_index, item),
                )
            })
        })
        .collect()
}
