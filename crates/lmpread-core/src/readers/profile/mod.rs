mod parser;

use crate::domain::LmpResult;
use crate::source::LineSource;
use crate::table::{ColumnSpec, ColumnType, DataTable};

/// One timestep's tabular sub-block inside a segmented profile file.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileBlock {
    pub timestep: i64,
    pub data: DataTable,
}

/// Reads the consecutive timestep-keyed sub-blocks of a profile or
/// radial-distribution file that fall inside a requested timestep range.
///
/// A marker line has exactly `marker_tokens` whitespace tokens and its first
/// token is the integer timestep; data rows have a different token count.
/// The window is half-open: the block opened by the end-boundary marker is
/// excluded, so every returned block satisfies `start <= timestep < end`.
/// Strict: a data row that does not match the column header fails the whole
/// parse rather than shifting the timestep alignment of later blocks.
#[derive(Debug)]
pub struct ProfileReader {
    source: LineSource,
    start_tstep: i64,
    end_tstep: i64,
    marker_tokens: usize,
    blocks: Option<Vec<ProfileBlock>>,
}

impl ProfileReader {
    pub fn new(source: LineSource, start_tstep: i64, end_tstep: i64, marker_tokens: usize) -> Self {
        Self {
            source,
            start_tstep,
            end_tstep,
            marker_tokens,
            blocks: None,
        }
    }

    pub const fn source(&self) -> &LineSource {
        &self.source
    }

    pub fn read(&mut self) -> LmpResult<&[ProfileBlock]> {
        if self.blocks.is_none() {
            let marker_tokens = self.marker_tokens;
            let (start_tstep, end_tstep) = (self.start_tstep, self.end_tstep);

            let lines = self.source.load()?;
            let names = parser::header_column_names(lines)?;
            let schema: Vec<ColumnSpec> = names
                .into_iter()
                .map(|name| ColumnSpec::new(name, ColumnType::Float))
                .collect();
            let window = parser::locate_window(lines, start_tstep, end_tstep, marker_tokens)?;
            let blocks = parser::assemble_blocks(lines, window, marker_tokens, &schema)?;
            self.blocks = Some(blocks);
        }
        Ok(self.blocks.as_deref().unwrap_or(&[]))
    }
}
