use super::TrajectorySnapshot;
use crate::domain::{LmpError, LmpResult};
use crate::table::DataTable;

pub(super) const TIMESTEP_MARKER: &str = "ITEM: TIMESTEP";
pub(super) const ATOMS_MARKER: &str = "ITEM: ATOMS";
pub(super) const SECTION_PREFIX: &str = "ITEM:";

/// Single forward scan over a dump file. `TIMESTEP` markers update the
/// current timestep; `ATOMS` markers open a block that consumes consecutive
/// non-marker rows; every other `ITEM:` section is skipped.
pub(super) fn scan_blocks(lines: &[String]) -> LmpResult<Vec<TrajectorySnapshot>> {
    let mut snapshots = Vec::new();
    let mut timestep: Option<i64> = None;

    let mut index = 0;
    while index < lines.len() {
        let line = &lines[index];
        if line.starts_with(TIMESTEP_MARKER) {
            match lines.get(index + 1) {
                Some(value_line) => {
                    timestep = Some(parse_timestep(value_line, index + 1)?);
                    index += 2;
                }
                None => {
                    tracing::warn!(
                        line = index,
                        "trajectory ends after a TIMESTEP marker with no value line"
                    );
                    break;
                }
            }
        } else if line.starts_with(ATOMS_MARKER) {
            let names: Vec<String> = line
                .split_whitespace()
                .skip(2)
                .map(str::to_owned)
                .collect();
            index += 1;

            let mut rows: Vec<Vec<String>> = Vec::new();
            while index < lines.len() && !lines[index].starts_with(SECTION_PREFIX) {
                collect_atom_row(&lines[index], index, &names, &mut rows);
                index += 1;
            }

            match timestep {
                Some(value) if !rows.is_empty() => {
                    let atoms = DataTable::from_inferred_rows(&names, &rows)?;
                    snapshots.push(TrajectorySnapshot {
                        timestep: value,
                        atoms,
                    });
                }
                // Empty atom blocks are not appended.
                Some(_) => {}
                None => {
                    tracing::warn!(
                        line = index,
                        "skipping ATOMS block with no preceding TIMESTEP marker"
                    );
                }
            }
        } else {
            index += 1;
        }
    }

    Ok(snapshots)
}

/// Tolerant path: a row whose token count disagrees with the column header is
/// logged and skipped without aborting the block.
fn collect_atom_row(
    line: &str,
    line_index: usize,
    names: &[String],
    rows: &mut Vec<Vec<String>>,
) {
    let tokens: Vec<String> = line.split_whitespace().map(str::to_owned).collect();
    if tokens.len() == names.len() && !tokens.is_empty() {
        rows.push(tokens);
    } else {
        tracing::warn!(
            line = line_index,
            tokens = tokens.len(),
            expected = names.len(),
            "skipping malformed atom row"
        );
    }
}

fn parse_timestep(value_line: &str, line_index: usize) -> LmpResult<i64> {
    value_line.trim().parse::<i64>().map_err(|_| {
        LmpError::format(
            "FORMAT.TRAJECTORY_TIMESTEP",
            format!(
                "line {}: '{}' is not an integer timestep",
                line_index,
                value_line.trim()
            ),
        )
    })
}
