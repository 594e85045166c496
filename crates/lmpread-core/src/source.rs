use crate::domain::{LmpError, LmpResult};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
enum SourceOrigin {
    Path(PathBuf),
    Tag(String),
}

/// Sole owner of a loaded line sequence. Lines are captured into memory on
/// the first successful `load` and are immutable afterwards; the backing file
/// handle is released as soon as the lines are captured.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSource {
    origin: SourceOrigin,
    lines: Vec<String>,
    disk_reads: usize,
}

impl LineSource {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            origin: SourceOrigin::Path(path.into()),
            lines: Vec::new(),
            disk_reads: 0,
        }
    }

    /// In-memory source for tests and for callers that already hold the text.
    pub fn from_text(tag: impl Into<String>, text: &str) -> Self {
        Self {
            origin: SourceOrigin::Tag(tag.into()),
            lines: text.lines().map(str::to_owned).collect(),
            disk_reads: 0,
        }
    }

    pub fn origin(&self) -> String {
        match &self.origin {
            SourceOrigin::Path(path) => path.display().to_string(),
            SourceOrigin::Tag(tag) => tag.clone(),
        }
    }

    /// Number of times the backing file has actually been read. Decoders are
    /// expected to keep this at one regardless of how often they are invoked.
    pub const fn disk_reads(&self) -> usize {
        self.disk_reads
    }

    /// Returns the cached line sequence, reading the origin on first use.
    /// The cache only engages once non-empty, so an empty origin is re-read.
    pub fn load(&mut self) -> LmpResult<&[String]> {
        if self.lines.is_empty() {
            if let SourceOrigin::Path(path) = &self.origin {
                let text = fs::read_to_string(path).map_err(|source| {
                    if source.kind() == ErrorKind::NotFound {
                        LmpError::not_found(
                            "IO.SOURCE_MISSING",
                            format!("input '{}' not found", path.display()),
                        )
                    } else {
                        LmpError::io_system(
                            "IO.SOURCE_READ",
                            format!("failed to read input '{}': {}", path.display(), source),
                        )
                    }
                })?;
                self.disk_reads += 1;
                self.lines = text.lines().map(str::to_owned).collect();
            }
        }
        Ok(&self.lines)
    }
}

#[cfg(test)]
mod tests {
    use super::LineSource;
    use crate::domain::LmpErrorCategory;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn load_reads_the_backing_file_once() {
        let temp = TempDir::new().expect("tempdir should be created");
        let path = temp.path().join("run.log");
        fs::write(&path, "first line\nsecond line\n").expect("fixture staged");

        let mut source = LineSource::from_path(&path);
        assert_eq!(source.disk_reads(), 0);

        let lines = source.load().expect("first load should succeed").to_vec();
        assert_eq!(lines, vec!["first line", "second line"]);
        assert_eq!(source.disk_reads(), 1);

        // Mutating the file after the first load must not be observable.
        fs::write(&path, "replaced\n").expect("fixture replaced");
        let cached = source.load().expect("second load should succeed");
        assert_eq!(cached, lines.as_slice());
        assert_eq!(source.disk_reads(), 1);
    }

    #[test]
    fn missing_origin_is_a_not_found_error() {
        let temp = TempDir::new().expect("tempdir should be created");
        let mut source = LineSource::from_path(temp.path().join("absent.log"));

        let error = source.load().expect_err("missing file should fail");
        assert_eq!(error.category(), LmpErrorCategory::NotFound);
        assert_eq!(error.placeholder(), "IO.SOURCE_MISSING");
    }

    #[test]
    fn text_source_never_touches_the_filesystem() {
        let mut source = LineSource::from_text("inline", "a b c\n1 2 3\n");
        let lines = source.load().expect("text source should load");
        assert_eq!(lines.len(), 2);
        assert_eq!(source.disk_reads(), 0);
        assert_eq!(source.origin(), "inline");
    }
}
