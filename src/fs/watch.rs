//! Polling change notifier.
//!
//! A watch is registered synchronously and then observed from a background
//! thread. The [`WatchHandle`] returned by registration owns that thread;
//! dropping the handle stops it.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, SystemTime};

use tracing::debug;

use super::driver::FileSystem;

/// Default polling interval, matching common `watchFile`-style defaults.
pub const DEFAULT_WATCH_INTERVAL: Duration = Duration::from_millis(5007);

/// Observable state of a watched file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStamp {
    /// Last modification time, `None` if the file is gone.
    pub modified: Option<SystemTime>,
    /// Size in bytes.
    pub len: u64,
}

impl FileStamp {
    fn missing() -> Self {
        Self {
            modified: None,
            len: 0,
        }
    }
}

/// A detected change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchEvent {
    /// Watched path, resolved against the filesystem root.
    pub path: PathBuf,
    /// State before the change.
    pub previous: FileStamp,
    /// State after the change.
    pub current: FileStamp,
}

/// Registers polling watches.
#[derive(Debug, Clone, Copy)]
pub struct FileWatcher {
    interval: Duration,
}

impl Default for FileWatcher {
    fn default() -> Self {
        Self::new(DEFAULT_WATCH_INTERVAL)
    }
}

impl FileWatcher {
    /// Create a watcher polling at `interval`.
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Polling interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start watching `path` on `fs`, calling `on_change` from a background
    /// thread.
    ///
    /// Fails if the path cannot be stat'ed at registration time.
    pub fn watch<F>(
        &self,
        fs: Arc<dyn FileSystem>,
        path: &Path,
        mut on_change: F,
    ) -> io::Result<WatchHandle>
    where
        F: FnMut(WatchEvent) + Send + 'static,
    {
        let mut previous = fs.stamp(path)?;
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let interval = self.interval;
        let resolved = fs.resolve(path);
        let watched = resolved.clone();
        let polled = path.to_path_buf();

        let thread = thread::Builder::new()
            .name(format!("watch:{}", path.display()))
            .spawn(move || loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        let current = fs
                            .stamp(&polled)
                            .unwrap_or_else(|_| FileStamp::missing());
                        if current != previous {
                            on_change(WatchEvent {
                                path: watched.clone(),
                                previous,
                                current,
                            });
                            previous = current;
                        }
                    }
                    _ => break,
                }
            })?;

        debug!("Watching {} every {:?}", resolved.display(), interval);

        Ok(WatchHandle {
            path: resolved,
            stop: Some(stop_tx),
            thread: Some(thread),
        })
    }
}

/// Owner of one background watch.
#[derive(Debug)]
pub struct WatchHandle {
    path: PathBuf,
    stop: Option<Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl WatchHandle {
    /// Watched path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stop the watch and wait for its thread to exit.
    ///
    /// Equivalent to dropping the handle.
    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        // Disconnecting the channel wakes the polling thread immediately.
        self.stop.take();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

/// Shared owner of the watches registered during runs.
///
/// Held by whatever context drives the runner; the runner and its reports
/// never own watches.
#[derive(Debug, Clone, Default)]
pub struct WatchRegistry {
    handles: Arc<Mutex<Vec<WatchHandle>>>,
}

impl WatchRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a handle.
    pub fn add(&self, handle: WatchHandle) {
        self.lock().push(handle);
    }

    /// Number of live watches.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no watch is live.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Paths of live watches.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.lock().iter().map(|h| h.path().to_path_buf()).collect()
    }

    /// Stop every watch.
    pub fn stop_all(&self) {
        let handles = std::mem::take(&mut *self.lock());
        drop(handles);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<WatchHandle>> {
        self.handles.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::LocalFileSystem;
    use std::fs;
    use tempfile::TempDir;

    fn local(temp: &TempDir) -> Arc<dyn FileSystem> {
        Arc::new(LocalFileSystem::new(temp.path()))
    }

    #[test]
    fn registration_fails_for_missing_path() {
        let temp = TempDir::new().unwrap();
        let watcher = FileWatcher::new(Duration::from_millis(10));
        let err = watcher
            .watch(local(&temp), Path::new("missing.txt"), |_| {})
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn reports_changes() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("notes.txt");
        fs::write(&path, "a").unwrap();

        let (tx, rx) = mpsc::channel();
        let watcher = FileWatcher::new(Duration::from_millis(10));
        let handle = watcher
            .watch(local(&temp), &path, move |event| {
                let _ = tx.send(event);
            })
            .unwrap();

        fs::write(&path, "a longer body").unwrap();

        let event = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(event.path, path);
        assert_eq!(event.current.len, 13);
        handle.stop();
    }

    #[test]
    fn relative_paths_resolve_through_the_filesystem_root() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("notes.txt"), "a").unwrap();

        let (tx, rx) = mpsc::channel();
        let handle = FileWatcher::new(Duration::from_millis(10))
            .watch(local(&temp), Path::new("notes.txt"), move |event| {
                let _ = tx.send(event);
            })
            .unwrap();
        assert_eq!(handle.path(), temp.path().join("notes.txt"));

        fs::write(temp.path().join("notes.txt"), "abc").unwrap();

        let event = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(event.path, temp.path().join("notes.txt"));
        assert_eq!(event.previous.len, 1);
        assert_eq!(event.current.len, 3);
    }

    #[test]
    fn deleted_file_reports_missing_stamp() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("notes.txt"), "a").unwrap();

        let (tx, rx) = mpsc::channel();
        let _handle = FileWatcher::new(Duration::from_millis(10))
            .watch(local(&temp), Path::new("notes.txt"), move |event| {
                let _ = tx.send(event);
            })
            .unwrap();

        fs::remove_file(temp.path().join("notes.txt")).unwrap();

        let event = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(event.current, FileStamp::missing());
    }

    #[test]
    fn registry_owns_and_stops_handles() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("notes.txt");
        fs::write(&path, "a").unwrap();

        let registry = WatchRegistry::new();
        let watcher = FileWatcher::new(Duration::from_secs(60));
        registry.add(watcher.watch(local(&temp), &path, |_| {}).unwrap());

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.paths(), vec![path]);

        registry.stop_all();
        assert!(registry.is_empty());
    }
}
