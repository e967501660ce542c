//! Watching a Markdown source file for `render --watch`.
//!
//! Uses the notify crate. Editors often save by writing a temp file and
//! renaming it, so the parent directory is watched and events are matched
//! back to the source by path or file name.
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};

/// Default quiet period before a burst of events counts as one change.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Watches one source file and reports debounced changes.
pub struct SourceWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
    watch_root: PathBuf,
    source: PathBuf,
    source_name: Option<OsString>,
    debounce: Duration,
    pending_since: Option<Instant>,
}

impl SourceWatcher {
    /// # Errors
    /// Returns an error if the watcher cannot be created or the directory
    /// cannot be watched.
    pub fn new(path: impl AsRef<Path>, debounce: Duration) -> notify::Result<Self> {
        // OS event paths are canonical
        let source = path
            .as_ref()
            .canonicalize()
            .unwrap_or_else(|_| path.as_ref().to_path_buf());
        let source_name = source.file_name().map(std::ffi::OsStr::to_os_string);
        let watch_root = watch_root_for(&source);

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })?;
        watcher.watch(&watch_root, RecursiveMode::NonRecursive)?;
        tracing::debug!(source = %source.display(), root = %watch_root.display(), "watching");

        Ok(Self {
            _watcher: watcher,
            rx,
            watch_root,
            source,
            source_name,
            debounce,
            pending_since: None,
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Drain queued events; true once a change has settled for the debounce
    /// period.
    pub fn take_change_ready(&mut self) -> bool {
        let mut relevant = 0u32;
        while let Ok(event) = self.rx.try_recv() {
            match event {
                Ok(ev) if self.is_relevant(&ev) => relevant += 1,
                Ok(ev) => {
                    tracing::trace!(kind = ?ev.kind, paths = ?ev.paths, "ignored event");
                }
                Err(err) => {
                    tracing::warn!(%err, "watch error");
                }
            }
        }

        if relevant > 0 {
            crate::perf::log_event(
                "watcher.change",
                format!("events={relevant} source={}", self.source.display()),
            );
            self.pending_since = Some(Instant::now());
        }

        let Some(pending_since) = self.pending_since else {
            return false;
        };
        if pending_since.elapsed() >= self.debounce {
            self.pending_since = None;
            return true;
        }
        false
    }

    /// Block until a debounced change arrives or `timeout` passes.
    pub fn wait_for_change(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            if self.take_change_ready() {
                return true;
            }
            if Instant::now() >= deadline {
                return false;
            }
            std::thread::sleep(POLL_INTERVAL);
        }
    }

    fn is_relevant(&self, event: &Event) -> bool {
        event.paths.iter().any(|path| {
            path == &self.watch_root
                || path == &self.source
                || self
                    .source_name
                    .as_ref()
                    .is_some_and(|name| path.file_name().is_some_and(|f| f == name))
        })
    }
}

fn watch_root_for(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::EventKind;
    use tempfile::tempdir;

    fn event(paths: Vec<PathBuf>) -> Event {
        Event {
            kind: EventKind::Any,
            paths,
            attrs: notify::event::EventAttributes::new(),
        }
    }

    #[test]
    fn test_directory_event_counts_for_source() {
        let dir = tempdir().unwrap();
        let canonical_dir = dir.path().canonicalize().unwrap();
        let path = canonical_dir.join("notes.md");
        std::fs::write(&path, "# a").unwrap();
        let watcher = SourceWatcher::new(&path, Duration::from_millis(10)).unwrap();

        assert!(watcher.is_relevant(&event(vec![canonical_dir.clone()])));
        assert!(watcher.is_relevant(&event(vec![canonical_dir.join("notes.md")])));
        assert!(!watcher.is_relevant(&event(vec![PathBuf::from("/elsewhere/other.md")])));
    }

    #[test]
    fn test_watch_root_for_relative_file_is_dot() {
        assert_eq!(watch_root_for(Path::new("notes.md")), PathBuf::from("."));
    }

    #[test]
    fn test_no_change_times_out() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("idle.md");
        std::fs::write(&path, "idle").unwrap();
        let mut watcher = SourceWatcher::new(&path, Duration::from_millis(10)).unwrap();

        assert!(!watcher.wait_for_change(Duration::from_millis(100)));
    }

    #[test]
    fn test_real_file_modification_detected() {
        let dir = tempdir().unwrap();
        let canonical_dir = dir.path().canonicalize().unwrap();
        let path = canonical_dir.join("watched.md");
        std::fs::write(&path, "original").unwrap();
        let mut watcher = SourceWatcher::new(&path, DEFAULT_DEBOUNCE).unwrap();

        // Let the backend register the watch
        std::thread::sleep(Duration::from_millis(500));
        std::fs::write(&path, "modified").unwrap();

        assert!(
            watcher.wait_for_change(Duration::from_secs(5)),
            "watcher should detect a save within 5 seconds"
        );
    }
}
