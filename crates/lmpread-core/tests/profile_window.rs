use lmpread_core::readers::ProfileReader;
use lmpread_core::source::LineSource;

// Radial-distribution layout: marker lines carry 2 tokens (timestep, bins),
// data rows carry 4 (bin index, radius, g(r), coordination).
fn rdf_text(timesteps: &[i64]) -> String {
    let mut text = String::from(
        "# RDF output for pair water-co2\n# Timestep Number-of-rows\n# Row c_rdf[1] c_rdf[2] c_rdf[3]\n",
    );
    for timestep in timesteps {
        text.push_str(&format!("{} 3\n", timestep));
        for bin in 1..=3 {
            text.push_str(&format!("{} {}.0 0.{} 1.{}\n", bin, bin, bin, bin));
        }
    }
    text
}

fn reader(timesteps: &[i64], start: i64, end: i64) -> ProfileReader {
    ProfileReader::new(
        LineSource::from_text("rdf", &rdf_text(timesteps)),
        start,
        end,
        2,
    )
}

#[test]
fn every_block_timestep_is_inside_the_half_open_window() {
    let markers = [1000, 2000, 3000, 4000, 5000];
    let cases = [(1000, 5000), (1000, 2000), (2500, 4500), (1500, 4000)];

    for (start, end) in cases {
        let mut profile = reader(&markers, start, end);
        let blocks = profile.read().expect("profile should parse");
        assert!(!blocks.is_empty(), "window [{start}, {end}) should be non-empty");
        for block in blocks {
            assert!(
                block.timestep >= start && block.timestep < end,
                "block {} escaped window [{start}, {end})",
                block.timestep
            );
        }
    }
}

#[test]
fn end_boundary_block_is_always_excluded() {
    let mut profile = reader(&[1000, 2000, 3000], 1000, 3000);
    let blocks = profile.read().expect("profile should parse");

    let timesteps: Vec<i64> = blocks.iter().map(|block| block.timestep).collect();
    assert_eq!(timesteps, vec![1000, 2000]);
}

#[test]
fn adjacent_markers_select_a_single_block() {
    // start == end timestep: the start marker itself satisfies the start
    // search, and the next marker closes the window.
    let mut profile = reader(&[1000, 2000, 3000], 2000, 2000);
    let blocks = profile.read().expect("profile should parse");
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].timestep, 2000);
    assert_eq!(blocks[0].data.row_count(), 3);
}

#[test]
fn data_rows_parse_as_uniform_float_columns() {
    let mut profile = reader(&[1000, 2000], 1000, 2000);
    let blocks = profile.read().expect("profile should parse");

    let block = &blocks[0];
    assert_eq!(
        block.data.column_names(),
        vec!["Row", "c_rdf[1]", "c_rdf[2]", "c_rdf[3]"]
    );
    assert_eq!(
        block.data.numeric_column("c_rdf[2]").unwrap(),
        vec![0.1, 0.2, 0.3]
    );
}
