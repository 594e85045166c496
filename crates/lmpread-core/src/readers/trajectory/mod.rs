mod parser;

use crate::domain::LmpResult;
use crate::source::LineSource;
use crate::table::DataTable;

/// One timestep's worth of atom rows, keyed by the `ITEM: TIMESTEP` marker
/// that most recently preceded its `ITEM: ATOMS` block.
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectorySnapshot {
    pub timestep: i64,
    pub atoms: DataTable,
}

/// Splits a dump file into per-timestep atom snapshots. The parse runs once;
/// repeat calls return the cached sequence without touching the line source.
#[derive(Debug)]
pub struct TrajectoryReader {
    source: LineSource,
    snapshots: Option<Vec<TrajectorySnapshot>>,
}

impl TrajectoryReader {
    pub fn new(source: LineSource) -> Self {
        Self {
            source,
            snapshots: None,
        }
    }

    pub const fn source(&self) -> &LineSource {
        &self.source
    }

    pub fn parse(&mut self) -> LmpResult<&[TrajectorySnapshot]> {
        if self.snapshots.is_none() {
            let lines = self.source.load()?;
            let parsed = parser::scan_blocks(lines)?;
            self.snapshots = Some(parsed);
        }
        Ok(self.snapshots.as_deref().unwrap_or(&[]))
    }
}

#[cfg(test)]
mod tests {
    use super::TrajectoryReader;
    use crate::domain::LmpErrorCategory;
    use crate::source::LineSource;
    use crate::table::ColumnData;

    const TWO_STEP_DUMP: &str = "\
ITEM: TIMESTEP
100
ITEM: NUMBER OF ATOMS
3
ITEM: BOX BOUNDS pp pp pp
0.0 30.0
0.0 30.0
0.0 30.0
ITEM: ATOMS id type x y z
1 1 0.5 0.5 0.5
2 1 1.5 1.5 1.5
3 2 2.5 2.5 2.5
ITEM: TIMESTEP
200
ITEM: NUMBER OF ATOMS
2
ITEM: ATOMS id type x y z
1 1 0.6 0.6 0.6
2 2 1.6 1.6 1.6
";

    fn reader(text: &str) -> TrajectoryReader {
        TrajectoryReader::new(LineSource::from_text("dump", text))
    }

    #[test]
    fn one_snapshot_per_timestep_marker_in_file_order() {
        let mut reader = reader(TWO_STEP_DUMP);
        let snapshots = reader.parse().expect("dump should parse");

        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[0].timestep, 100);
        assert_eq!(snapshots[0].atoms.row_count(), 3);
        assert_eq!(snapshots[1].timestep, 200);
        assert_eq!(snapshots[1].atoms.row_count(), 2);
        assert_eq!(
            snapshots[0].atoms.column_names(),
            vec!["id", "type", "x", "y", "z"]
        );
    }

    #[test]
    fn columns_get_best_effort_numeric_types() {
        let mut reader = reader(
            "ITEM: TIMESTEP\n50\nITEM: ATOMS id mol name\n1 2 water\n2 3 co2\n",
        );
        let snapshots = reader.parse().expect("dump should parse");
        let atoms = &snapshots[0].atoms;

        assert!(matches!(
            atoms.column("id").unwrap().data,
            ColumnData::Integer(_)
        ));
        assert!(matches!(
            atoms.column("name").unwrap().data,
            ColumnData::Text(_)
        ));
    }

    #[test]
    fn block_running_past_end_of_input_still_closes() {
        let mut reader = reader(
            "ITEM: TIMESTEP\n300\nITEM: ATOMS id x\n1 0.25\n2 0.75\n",
        );
        let snapshots = reader.parse().expect("dump should parse");
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].atoms.row_count(), 2);
    }

    #[test]
    fn malformed_atom_row_is_skipped_not_fatal() {
        let mut reader = reader(
            "ITEM: TIMESTEP\n400\nITEM: ATOMS id x\n1 0.25\nbroken row with extra tokens\n2 0.75\n",
        );
        let snapshots = reader.parse().expect("dump should still parse");
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].atoms.row_count(), 2);
        assert_eq!(
            snapshots[0].atoms.numeric_column("x").unwrap(),
            vec![0.25, 0.75]
        );
    }

    #[test]
    fn empty_atom_block_is_not_appended() {
        let mut reader = reader(
            "ITEM: TIMESTEP\n500\nITEM: ATOMS id x\nITEM: TIMESTEP\n600\nITEM: ATOMS id x\n1 1.0\n",
        );
        let snapshots = reader.parse().expect("dump should parse");
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].timestep, 600);
    }

    #[test]
    fn atoms_block_without_timestep_is_skipped() {
        let mut reader = reader("ITEM: ATOMS id x\n1 1.0\n");
        let snapshots = reader.parse().expect("dump should parse");
        assert!(snapshots.is_empty());
    }

    #[test]
    fn non_integer_timestep_is_a_format_error() {
        let mut reader = reader("ITEM: TIMESTEP\nnot-a-number\n");
        let error = reader.parse().expect_err("bad timestep should fail");
        assert_eq!(error.category(), LmpErrorCategory::Format);
        assert_eq!(error.placeholder(), "FORMAT.TRAJECTORY_TIMESTEP");
    }

    #[test]
    fn repeat_parse_returns_the_cached_sequence() {
        let mut reader = reader(TWO_STEP_DUMP);
        let first = reader.parse().expect("first parse").to_vec();
        let second = reader.parse().expect("second parse");
        assert_eq!(first.as_slice(), second);
    }
}
