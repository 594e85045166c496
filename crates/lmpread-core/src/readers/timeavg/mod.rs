use crate::domain::{LmpError, LmpResult};
use crate::source::LineSource;
use crate::table::{ColumnSpec, ColumnType, DataTable};

/// Lines of file preamble before the data rows begin.
pub const TIMEAVG_PREAMBLE_LINES: usize = 2;

/// Reads one time-averaged property table: a `#`-prefixed header line at a
/// known line number declares the column names; the first column is the
/// integer timestep, every other column is floating point. Strict: a row
/// whose token count disagrees with the header fails the whole parse, since
/// a skipped row would silently shift the timestep alignment.
#[derive(Debug)]
pub struct TimeAvgReader {
    source: LineSource,
    header_line: usize,
    table: Option<DataTable>,
}

impl TimeAvgReader {
    /// `header_line` is the 0-indexed line number holding the column header.
    pub fn new(source: LineSource, header_line: usize) -> Self {
        Self {
            source,
            header_line,
            table: None,
        }
    }

    pub const fn source(&self) -> &LineSource {
        &self.source
    }

    pub fn read(&mut self) -> LmpResult<&DataTable> {
        if self.table.is_none() {
            let lines = self.source.load()?;
            let table = parse_table(lines, self.header_line)?;
            self.table = Some(table);
        }
        self.table.as_ref().ok_or_else(|| {
            LmpError::internal("SYS.TIMEAVG_MEMO", "memoized table missing after parse")
        })
    }
}

fn parse_table(lines: &[String], header_line: usize) -> LmpResult<DataTable> {
    let header = lines.get(header_line).ok_or_else(|| {
        LmpError::format(
            "FORMAT.TIMEAVG_HEADER",
            format!(
                "header line {} is past the end of input ({} lines)",
                header_line,
                lines.len()
            ),
        )
    })?;

    let names: Vec<&str> = header.trim_start_matches('#').split_whitespace().collect();
    if names.is_empty() {
        return Err(LmpError::format(
            "FORMAT.TIMEAVG_HEADER",
            format!("header line {} declares no column names", header_line),
        ));
    }

    let schema: Vec<ColumnSpec> = names
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let ty = if index == 0 {
                ColumnType::Integer
            } else {
                ColumnType::Float
            };
            ColumnSpec::new(*name, ty)
        })
        .collect();

    let mut rows: Vec<Vec<&str>> = Vec::new();
    for line in lines.iter().skip(TIMEAVG_PREAMBLE_LINES) {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        rows.push(trimmed.split_whitespace().collect());
    }

    DataTable::from_typed_rows("FORMAT.TIMEAVG_ROW", &schema, &rows)
}
