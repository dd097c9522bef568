//! Line splitting.

use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::driver::FileSystem;

/// Lazy line iterator over one opening of a file.
pub type Lines = io::Lines<BufReader<Box<dyn Read + Send>>>;

/// A restartable source of lines.
///
/// Every call to [`LineSource::lines`] reopens the file, so iteration always
/// starts from the first line.
pub struct LineSource {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl LineSource {
    /// Create a line source for `path`.
    pub fn new(fs: Arc<dyn FileSystem>, path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            path: path.into(),
        }
    }

    /// Path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open the file and iterate its lines without their terminators.
    pub fn lines(&self) -> io::Result<Lines> {
        Ok(BufReader::new(self.fs.open(&self.path)?).lines())
    }

    /// Read every line eagerly.
    pub fn collect(&self) -> io::Result<Vec<String>> {
        self.lines()?.collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::LocalFileSystem;
    use tempfile::TempDir;

    fn source(temp: &TempDir, contents: &str) -> LineSource {
        std::fs::write(temp.path().join("notes.txt"), contents).unwrap();
        LineSource::new(Arc::new(LocalFileSystem::new(temp.path())), "notes.txt")
    }

    #[test]
    fn splits_lines() {
        let temp = TempDir::new().unwrap();
        let lines = source(&temp, "one\ntwo\r\nthree").collect().unwrap();
        assert_eq!(lines, vec!["one", "two", "three"]);
    }

    #[test]
    fn restarts_from_the_beginning() {
        let temp = TempDir::new().unwrap();
        let src = source(&temp, "a\nb\n");

        let first = src.lines().unwrap().next().unwrap().unwrap();
        let again = src.lines().unwrap().next().unwrap().unwrap();
        assert_eq!(first, "a");
        assert_eq!(again, "a");
    }

    #[test]
    fn empty_file_has_no_lines() {
        let temp = TempDir::new().unwrap();
        assert!(source(&temp, "").collect().unwrap().is_empty());
    }

    #[test]
    fn missing_file_fails_to_open() {
        let temp = TempDir::new().unwrap();
        let src = LineSource::new(Arc::new(LocalFileSystem::new(temp.path())), "nope.txt");
        assert_eq!(src.lines().err().unwrap().kind(), io::ErrorKind::NotFound);
    }
}
