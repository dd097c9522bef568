//! Filesystem driver.
//!
//! Actions never touch `std::fs` directly; they go through a [`FileSystem`]
//! so a run can be rooted at any directory.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use super::watch::FileStamp;

/// The filesystem primitives step actions are built from.
///
/// Relative paths are resolved against [`FileSystem::root`].
pub trait FileSystem: Send + Sync {
    /// Base directory for relative paths.
    fn root(&self) -> &Path;

    /// Resolve a path against the root.
    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root().join(path)
        }
    }

    /// Create or truncate a file with the given contents.
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// Read a whole file.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Append to a file, creating it if needed.
    fn append(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// Rename or move a file.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Delete a file.
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Create a directory and any missing parents.
    fn create_dir(&self, path: &Path) -> io::Result<()>;

    /// Names of the entries in a directory, sorted.
    fn list_dir(&self, path: &Path) -> io::Result<Vec<String>>;

    /// Delete a directory and everything below it.
    fn remove_dir(&self, path: &Path) -> io::Result<()>;

    /// Copy a file, returning the number of bytes copied.
    fn copy(&self, from: &Path, to: &Path) -> io::Result<u64>;

    /// Check whether a path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Open a file for streaming reads.
    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + Send>>;

    /// Modification time and size of a file, as observed by watches.
    fn stamp(&self, path: &Path) -> io::Result<FileStamp>;
}

/// [`FileSystem`] backed by the local disk.
#[derive(Debug, Clone)]
pub struct LocalFileSystem {
    root: PathBuf,
}

impl LocalFileSystem {
    /// Create a driver rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl FileSystem for LocalFileSystem {
    fn root(&self) -> &Path {
        &self.root
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        fs::write(self.resolve(path), contents)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(self.resolve(path))
    }

    fn append(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.resolve(path))?;
        file.write_all(contents)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(self.resolve(from), self.resolve(to))
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(self.resolve(path))
    }

    fn create_dir(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(self.resolve(path))
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        let mut names = fs::read_dir(self.resolve(path))?
            .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
            .collect::<io::Result<Vec<_>>>()?;
        names.sort();
        Ok(names)
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir_all(self.resolve(path))
    }

    fn copy(&self, from: &Path, to: &Path) -> io::Result<u64> {
        fs::copy(self.resolve(from), self.resolve(to))
    }

    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).exists()
    }

    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(fs::File::open(self.resolve(path))?))
    }

    fn stamp(&self, path: &Path) -> io::Result<FileStamp> {
        let meta = fs::metadata(self.resolve(path))?;
        Ok(FileStamp {
            modified: meta.modified().ok(),
            len: meta.len(),
        })
    }
}
