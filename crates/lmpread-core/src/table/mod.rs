use crate::domain::{LmpError, LmpResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Integer,
    Float,
    Text,
}

/// A declared (name, type) pair; the schema of a table is decided once at
/// parse time and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: String,
    pub ty: ColumnType,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, ty: ColumnType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Integer(Vec<i64>),
    Float(Vec<f64>),
    Text(Vec<String>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            Self::Integer(values) => values.len(),
            Self::Float(values) => values.len(),
            Self::Text(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub const fn column_type(&self) -> ColumnType {
        match self {
            Self::Integer(_) => ColumnType::Integer,
            Self::Float(_) => ColumnType::Float,
            Self::Text(_) => ColumnType::Text,
        }
    }

    /// Numeric view of one cell; `None` for text columns.
    pub fn value_as_f64(&self, row: usize) -> Option<f64> {
        match self {
            Self::Integer(values) => values.get(row).map(|value| *value as f64),
            Self::Float(values) => values.get(row).copied(),
            Self::Text(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

/// Mean and sample standard deviation over one numeric column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnStats {
    pub mean: f64,
    pub std_dev: f64,
    pub samples: usize,
}

/// In-memory table with uniquely named, typed columns and an ordered row set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataTable {
    columns: Vec<Column>,
    row_count: usize,
}

impl DataTable {
    /// Builds a table from a declared schema and whitespace-tokenized rows.
    /// Strict: any row whose token count disagrees with the schema, and any
    /// token that does not parse as its declared type, fails the whole build.
    pub fn from_typed_rows<S: AsRef<str>>(
        placeholder: &'static str,
        schema: &[ColumnSpec],
        rows: &[Vec<S>],
    ) -> LmpResult<Self> {
        ensure_unique_names(placeholder, schema.iter().map(|spec| spec.name.as_str()))?;

        let mut columns: Vec<Column> = schema
            .iter()
            .map(|spec| Column {
                name: spec.name.clone(),
                data: match spec.ty {
                    ColumnType::Integer => ColumnData::Integer(Vec::with_capacity(rows.len())),
                    ColumnType::Float => ColumnData::Float(Vec::with_capacity(rows.len())),
                    ColumnType::Text => ColumnData::Text(Vec::with_capacity(rows.len())),
                },
            })
            .collect();

        for (row_index, row) in rows.iter().enumerate() {
            if row.len() != schema.len() {
                return Err(LmpError::format(
                    placeholder,
                    format!(
                        "row {} has {} tokens, expected {}",
                        row_index,
                        row.len(),
                        schema.len()
                    ),
                ));
            }
            for (column, token) in columns.iter_mut().zip(row.iter()) {
                push_typed_token(placeholder, column, token.as_ref(), row_index)?;
            }
        }

        Ok(Self {
            columns,
            row_count: rows.len(),
        })
    }

    /// Builds a table with best-effort per-column numeric inference: a column
    /// becomes integer when every value parses as an integer, float when every
    /// value parses as a number, and stays text otherwise. Rows must already
    /// be uniform in length (the trajectory parser filters ragged rows).
    pub fn from_inferred_rows(names: &[String], rows: &[Vec<String>]) -> LmpResult<Self> {
        ensure_unique_names("FORMAT.TABLE_COLUMNS", names.iter().map(String::as_str))?;

        let columns = names
            .iter()
            .enumerate()
            .map(|(column_index, name)| {
                let cells: Vec<&str> = rows
                    .iter()
                    .map(|row| row[column_index].as_str())
                    .collect();
                Column {
                    name: name.clone(),
                    data: infer_column_data(&cells),
                }
            })
            .collect();

        Ok(Self {
            columns,
            row_count: rows.len(),
        })
    }

    pub const fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns
            .iter()
            .map(|column| column.name.as_str())
            .collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    fn required_column(&self, name: &str) -> LmpResult<&Column> {
        self.column(name).ok_or_else(|| {
            LmpError::lookup(
                "LOOKUP.TABLE_COLUMN",
                format!("table has no column named '{}'", name),
            )
        })
    }

    /// All values of one column as `f64`; fails on text columns.
    pub fn numeric_column(&self, name: &str) -> LmpResult<Vec<f64>> {
        let column = self.required_column(name)?;
        match &column.data {
            ColumnData::Integer(values) => Ok(values.iter().map(|value| *value as f64).collect()),
            ColumnData::Float(values) => Ok(values.clone()),
            ColumnData::Text(_) => Err(LmpError::format(
                "FORMAT.TABLE_NUMERIC",
                format!("column '{}' is text, not numeric", name),
            )),
        }
    }

    /// New table keeping only the rows where `column > cutoff`.
    pub fn filter_greater_than(&self, column: &str, cutoff: f64) -> LmpResult<Self> {
        let filter_values = self.numeric_column(column)?;
        let keep: Vec<usize> = (0..self.row_count)
            .filter(|row| filter_values[*row] > cutoff)
            .collect();

        let columns = self
            .columns
            .iter()
            .map(|column| Column {
                name: column.name.clone(),
                data: select_rows(&column.data, &keep),
            })
            .collect();

        Ok(Self {
            columns,
            row_count: keep.len(),
        })
    }

    /// Mean and sample standard deviation of one numeric column.
    pub fn column_stats(&self, name: &str) -> LmpResult<ColumnStats> {
        let values = self.numeric_column(name)?;
        if values.is_empty() {
            return Err(LmpError::format(
                "FORMAT.TABLE_EMPTY",
                format!("column '{}' has no rows to aggregate", name),
            ));
        }

        let samples = values.len();
        let mean = values.iter().sum::<f64>() / samples as f64;
        let std_dev = if samples > 1 {
            let variance = values
                .iter()
                .map(|value| (value - mean) * (value - mean))
                .sum::<f64>()
                / (samples - 1) as f64;
            variance.sqrt()
        } else {
            0.0
        };

        Ok(ColumnStats {
            mean,
            std_dev,
            samples,
        })
    }

    /// Filter on a timestep column, then aggregate a value column: keeps the
    /// rows where `timestep_column > after`, then returns mean and sample
    /// standard deviation of `value_column` over those rows.
    pub fn stats_after(
        &self,
        timestep_column: &str,
        after: f64,
        value_column: &str,
    ) -> LmpResult<ColumnStats> {
        self.filter_greater_than(timestep_column, after)?
            .column_stats(value_column)
    }
}

fn ensure_unique_names<'a>(
    placeholder: &'static str,
    names: impl Iterator<Item = &'a str>,
) -> LmpResult<()> {
    let mut seen: Vec<&str> = Vec::new();
    for name in names {
        if seen.contains(&name) {
            return Err(LmpError::format(
                placeholder,
                format!("duplicate column name '{}'", name),
            ));
        }
        seen.push(name);
    }
    Ok(())
}

fn push_typed_token(
    placeholder: &'static str,
    column: &mut Column,
    token: &str,
    row_index: usize,
) -> LmpResult<()> {
    match &mut column.data {
        ColumnData::Integer(values) => {
            let value = token.parse::<i64>().map_err(|_| {
                LmpError::format(
                    placeholder,
                    format!(
                        "row {} column '{}': token '{}' is not an integer",
                        row_index, column.name, token
                    ),
                )
            })?;
            values.push(value);
        }
        ColumnData::Float(values) => {
            let value = token.parse::<f64>().map_err(|_| {
                LmpError::format(
                    placeholder,
                    format!(
                        "row {} column '{}': token '{}' is not a number",
                        row_index, column.name, token
                    ),
                )
            })?;
            values.push(value);
        }
        ColumnData::Text(values) => values.push(token.to_owned()),
    }
    Ok(())
}

fn infer_column_data(cells: &[&str]) -> ColumnData {
    if cells.iter().all(|cell| cell.parse::<i64>().is_ok()) {
        return ColumnData::Integer(
            cells
                .iter()
                .filter_map(|cell| cell.parse::<i64>().ok())
                .collect(),
        );
    }
    if cells.iter().all(|cell| cell.parse::<f64>().is_ok()) {
        return ColumnData::Float(
            cells
                .iter()
                .filter_map(|cell| cell.parse::<f64>().ok())
                .collect(),
        );
    }
    ColumnData::Text(cells.iter().map(|cell| (*cell).to_owned()).collect())
}

fn select_rows(data: &ColumnData, keep: &[usize]) -> ColumnData {
    match data {
        ColumnData::Integer(values) => {
            ColumnData::Integer(keep.iter().map(|row| values[*row]).collect())
        }
        ColumnData::Float(values) => {
            ColumnData::Float(keep.iter().map(|row| values[*row]).collect())
        }
        ColumnData::Text(values) => {
            ColumnData::Text(keep.iter().map(|row| values[*row].clone()).collect())
        }
    }
}
