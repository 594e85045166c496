use lmpread_core::readers::{
    LogReader, PrintPropReader, ProfileReader, TimeAvgReader, TrajectoryReader,
};
use lmpread_core::source::LineSource;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const DUMP_FIXTURE: &str = "\
ITEM: TIMESTEP
100
ITEM: ATOMS id type x
1 1 0.5
2 1 1.5
3 2 2.5
ITEM: TIMESTEP
200
ITEM: ATOMS id type x
1 1 0.6
2 2 1.6
";

const TIMEAVG_FIXTURE: &str = "\
# Time-averaged data for fix GlobalProps
# TimeStep v_Hout v_Press
1000 -57.2 98.6
2000 -56.8 101.2
3000 -57.0 99.4
";

const PROFILE_FIXTURE: &str = "\
# Chunk-averaged data for fix DensityProfile
# Timestep Number-of-chunks Total-count
# Chunk Coord1 density
1000 2 128
1 0.25 0.98
2 0.75 0.96
2000 2 128
1 0.25 1.01
2 0.75 0.94
3000 2 128
1 0.25 0.99
2 0.75 0.95
";

const PRINTPROP_FIXTURE: &str = "\
# Calculated global properties
TimeStep: 1000, v_Hcalc: -12.5
TimeStep: 2000, v_Hcalc: -12.1
";

const LOG_FIXTURE: &str = "\
variable nw equal 3.75
Number of molecules for water: 512
";

fn stage(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("fixture staged");
    path
}

#[test]
fn trajectory_parse_reads_the_file_once() {
    let temp = TempDir::new().expect("tempdir should be created");
    let path = stage(temp.path(), "npt.lammpstrj", DUMP_FIXTURE);

    let mut reader = TrajectoryReader::new(LineSource::from_path(&path));
    let first = reader.parse().expect("first parse").to_vec();
    assert_eq!(first.len(), 2);
    assert_eq!(reader.source().disk_reads(), 1);

    // Replacing the file on disk must not change the cached result.
    fs::write(&path, "ITEM: TIMESTEP\n999\nITEM: ATOMS id\n1\n").expect("fixture replaced");
    let second = reader.parse().expect("second parse");
    assert_eq!(first.as_slice(), second);
    assert_eq!(reader.source().disk_reads(), 1);
}

#[test]
fn trajectory_snapshot_row_counts_match_block_line_counts() {
    let temp = TempDir::new().expect("tempdir should be created");
    let path = stage(temp.path(), "npt.lammpstrj", DUMP_FIXTURE);

    let mut reader = TrajectoryReader::new(LineSource::from_path(&path));
    let snapshots = reader.parse().expect("dump should parse");

    assert_eq!(snapshots.len(), 2);
    assert_eq!(snapshots[0].timestep, 100);
    assert_eq!(snapshots[0].atoms.row_count(), 3);
    assert_eq!(snapshots[1].timestep, 200);
    assert_eq!(snapshots[1].atoms.row_count(), 2);
}

#[test]
fn timeavg_read_is_idempotent_over_one_disk_read() {
    let temp = TempDir::new().expect("tempdir should be created");
    let path = stage(temp.path(), "GlobalPropsTimeAvg.prop", TIMEAVG_FIXTURE);

    let mut reader = TimeAvgReader::new(LineSource::from_path(&path), 1);
    let first = reader.read().expect("first read").clone();
    let second = reader.read().expect("second read");

    assert_eq!(&first, second);
    assert_eq!(reader.source().disk_reads(), 1);
    assert_eq!(first.row_count(), 3);
}

#[test]
fn profile_read_is_idempotent_over_one_disk_read() {
    let temp = TempDir::new().expect("tempdir should be created");
    let path = stage(temp.path(), "MassDensityFine.mden", PROFILE_FIXTURE);

    let mut reader = ProfileReader::new(LineSource::from_path(&path), 1000, 3000, 3);
    let first = reader.read().expect("first read").to_vec();
    let second = reader.read().expect("second read");

    assert_eq!(first.as_slice(), second);
    assert_eq!(reader.source().disk_reads(), 1);
}

#[test]
fn printprop_read_is_idempotent_over_one_disk_read() {
    let temp = TempDir::new().expect("tempdir should be created");
    let path = stage(temp.path(), "GlobalPropCalculated.prop", PRINTPROP_FIXTURE);

    let mut reader = PrintPropReader::new(LineSource::from_path(&path));
    let first = reader.read().expect("first read").clone();
    let second = reader.read().expect("second read");

    assert_eq!(&first, second);
    assert_eq!(reader.source().disk_reads(), 1);
    assert_eq!(first.column_names(), vec!["TimeStep", "v_Hcalc"]);
}

#[test]
fn log_queries_share_one_cached_line_sequence() {
    let temp = TempDir::new().expect("tempdir should be created");
    let path = stage(temp.path(), "log.lammps", LOG_FIXTURE);

    let mut log = LogReader::new(LineSource::from_path(&path));
    assert_eq!(log.variable_value("nw").unwrap(), Some(3.75));
    assert_eq!(
        log.molecule_counts().unwrap(),
        vec![("water".to_owned(), 512)]
    );
    assert_eq!(log.variable_value("nw").unwrap(), Some(3.75));
    assert_eq!(log.source().disk_reads(), 1);
}
