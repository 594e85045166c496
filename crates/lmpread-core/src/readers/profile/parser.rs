use super::ProfileBlock;
use crate::domain::{LmpError, LmpResult};
use crate::table::{ColumnSpec, DataTable};

/// Line index of the column header in a segmented profile file.
pub(super) const PROFILE_HEADER_LINE: usize = 2;

/// Half-open line-index window `[start, end)` covering the requested blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct ProfileWindow {
    pub(super) start: usize,
    pub(super) end: usize,
}

/// Boundary search states. Both boundaries are found in one forward pass;
/// the end search only begins once the start marker is fixed, so a line can
/// never serve as both.
#[derive(Debug, Clone, Copy)]
enum BoundaryScan {
    SeekStart,
    SeekEnd { start: usize },
}

pub(super) fn header_column_names(lines: &[String]) -> LmpResult<Vec<String>> {
    let header = lines.get(PROFILE_HEADER_LINE).ok_or_else(|| {
        LmpError::format(
            "FORMAT.PROFILE_HEADER",
            format!(
                "profile header expected at line {}, input has {} lines",
                PROFILE_HEADER_LINE,
                lines.len()
            ),
        )
    })?;

    let names: Vec<String> = header
        .trim_start_matches('#')
        .split_whitespace()
        .map(str::to_owned)
        .collect();
    if names.is_empty() {
        return Err(LmpError::format(
            "FORMAT.PROFILE_HEADER",
            "profile header declares no column names",
        ));
    }
    Ok(names)
}

/// One forward pass locating the start marker (first marker with timestep
/// >= `start_tstep`) and then the end marker (first later marker with
/// timestep >= `end_tstep`). The end marker is excluded from the window.
pub(super) fn locate_window(
    lines: &[String],
    start_tstep: i64,
    end_tstep: i64,
    marker_tokens: usize,
) -> LmpResult<ProfileWindow> {
    let mut state = BoundaryScan::SeekStart;

    for (index, line) in lines.iter().enumerate() {
        if !is_marker_line(line, marker_tokens) {
            continue;
        }
        let timestep = marker_timestep(line, index)?;

        state = match state {
            BoundaryScan::SeekStart if timestep >= start_tstep => {
                BoundaryScan::SeekEnd { start: index }
            }
            BoundaryScan::SeekEnd { start } if timestep >= end_tstep => {
                return Ok(ProfileWindow { start, end: index });
            }
            unchanged => unchanged,
        };
    }

    match state {
        BoundaryScan::SeekStart => Err(LmpError::boundary(
            "BOUNDARY.PROFILE_START",
            format!("no timestep marker >= {} found", start_tstep),
        )),
        BoundaryScan::SeekEnd { .. } => Err(LmpError::boundary(
            "BOUNDARY.PROFILE_END",
            format!("no timestep marker >= {} found after the start marker", end_tstep),
        )),
    }
}

struct BlockAccumulator {
    timestep: i64,
    rows: Vec<Vec<String>>,
}

/// Second pass over the window: a marker line flushes the pending block and
/// opens a new one keyed by its timestep; every other line accumulates as a
/// data row. The final pending block is flushed after the window ends.
pub(super) fn assemble_blocks(
    lines: &[String],
    window: ProfileWindow,
    marker_tokens: usize,
    schema: &[ColumnSpec],
) -> LmpResult<Vec<ProfileBlock>> {
    let mut blocks = Vec::new();
    let mut pending: Option<BlockAccumulator> = None;

    for (offset, line) in lines[window.start..window.end].iter().enumerate() {
        let index = window.start + offset;
        if is_marker_line(line, marker_tokens) {
            flush_pending(&mut pending, schema, &mut blocks)?;
            pending = Some(BlockAccumulator {
                timestep: marker_timestep(line, index)?,
                rows: Vec::new(),
            });
        } else {
            match pending.as_mut() {
                Some(block) => block
                    .rows
                    .push(line.split_whitespace().map(str::to_owned).collect()),
                None => {
                    return Err(LmpError::format(
                        "FORMAT.PROFILE_ROW",
                        format!("line {}: data row before the first timestep marker", index),
                    ));
                }
            }
        }
    }
    flush_pending(&mut pending, schema, &mut blocks)?;

    Ok(blocks)
}

fn flush_pending(
    pending: &mut Option<BlockAccumulator>,
    schema: &[ColumnSpec],
    blocks: &mut Vec<ProfileBlock>,
) -> LmpResult<()> {
    if let Some(block) = pending.take() {
        // Markers with no rows between them do not produce a block.
        if block.rows.is_empty() {
            return Ok(());
        }
        let data = DataTable::from_typed_rows("FORMAT.PROFILE_ROW", schema, &block.rows)?;
        blocks.push(ProfileBlock {
            timestep: block.timestep,
            data,
        });
    }
    Ok(())
}

/// A marker line has exactly the configured token count and is not a comment.
fn is_marker_line(line: &str, marker_tokens: usize) -> bool {
    !line.starts_with('#') && line.split_whitespace().count() == marker_tokens
}

fn marker_timestep(line: &str, line_index: usize) -> LmpResult<i64> {
    let token = line.split_whitespace().next().ok_or_else(|| {
        LmpError::internal(
            "SYS.PROFILE_MARKER",
            format!("line {} matched as marker but has no tokens", line_index),
        )
    })?;
    token.parse::<i64>().map_err(|_| {
        LmpError::format(
            "FORMAT.PROFILE_MARKER",
            format!(
                "line {}: marker token '{}' is not an integer timestep",
                line_index, token
            ),
        )
    })
}
