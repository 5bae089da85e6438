use super::file_loader::should_ignore;
use super::paths::normalize;
use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use rustc_hash::FxHashSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

const WATCHER_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Watches a project directory and reports whether anything relevant changed.
pub struct ProjectWatcher {
    _watcher: RecommendedWatcher,
    raw_event_rx: mpsc::Receiver<notify::Event>,
    root: PathBuf,
    ignored_paths: FxHashSet<PathBuf>,
}

impl ProjectWatcher {
    pub fn new(root: &Path) -> Result<Self, notify::Error> {
        let root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
        let (tx, rx) = mpsc::channel();
        let mut watcher = RecommendedWatcher::new(
            move |res: Result<notify::Event, notify::Error>| {
                let Ok(event) = res else { return };
                let _ = tx.send(event);
            },
            Config::default().with_poll_interval(WATCHER_POLL_INTERVAL),
        )?;
        watcher.watch(&root, RecursiveMode::Recursive)?;
        Ok(Self {
            _watcher: watcher,
            raw_event_rx: rx,
            root,
            ignored_paths: FxHashSet::default(),
        })
    }

    /// Events on this path are dropped (e.g. the bundle output written inside the project).
    pub fn ignore_path(&mut self, path: &Path) {
        self.ignored_paths.insert(normalize(path));
    }

    /// Waits up to `timeout` for an event, then drains whatever else is queued.
    pub fn wait_for_change(&self, timeout: Duration) -> bool {
        let Ok(first) = self.raw_event_rx.recv_timeout(timeout) else {
            return false;
        };
        let mut relevant = self.is_relevant(&first);
        while let Ok(event) = self.raw_event_rx.try_recv() {
            relevant |= self.is_relevant(&event);
        }
        relevant
    }

    fn is_relevant(&self, event: &notify::Event) -> bool {
        if !matches!(
            event.kind,
            EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
        ) {
            return false;
        }
        event.paths.iter().any(|path| self.is_relevant_path(path))
    }

    fn is_relevant_path(&self, path: &Path) -> bool {
        if self.ignored_paths.contains(path) {
            return false;
        }
        let Ok(relative) = path.strip_prefix(&self.root) else {
            return true;
        };
        !relative
            .components()
            .any(|c| should_ignore(&c.as_os_str().to_string_lossy()))
    }
}
