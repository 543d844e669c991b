//! Filesystem notifications standing in for content mutations.
//!
//! The watcher observes the document's directory rather than the file itself, since editors
//! commonly save by writing a new file and renaming it over the old one. Dropping a
//! [`ContentWatcher`] detaches the OS watch.

use crate::error::Result;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};

/// Watch on a single document.
pub struct ContentWatcher {
    target: PathBuf,
    rx: Receiver<notify::Result<Event>>,
    _watcher: RecommendedWatcher,
}

impl ContentWatcher {
    /// Starts watching `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be resolved or the OS watch cannot be attached.
    pub fn new(path: &Path) -> Result<Self> {
        let target = path.canonicalize()?;
        let dir = target
            .parent()
            .map_or_else(|| target.clone(), Path::to_path_buf);

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            // The receiver disappears on teardown.
            let _ = tx.send(res);
        })?;
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        tracing::debug!(path = %target.display(), "watching document");

        Ok(Self {
            target,
            rx,
            _watcher: watcher,
        })
    }

    /// Drains pending notifications, returning how many touched the document's content.
    pub fn drain(&self) -> usize {
        let mut relevant = 0;
        loop {
            match self.rx.try_recv() {
                Ok(Ok(event)) => {
                    if self.is_relevant(&event) {
                        relevant += 1;
                    }
                }
                Ok(Err(e)) => tracing::warn!(error = %e, "watch error"),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        relevant
    }

    fn is_relevant(&self, event: &Event) -> bool {
        is_content_change(&event.kind) && event.paths.iter().any(|p| self.is_target(p))
    }

    fn is_target(&self, path: &Path) -> bool {
        path == self.target
            || path
                .canonicalize()
                .is_ok_and(|resolved| resolved == self.target)
    }
}

/// True for events that may have replaced or rewritten content.
///
/// Metadata-only changes (mtime, permissions) are ignored.
#[must_use]
pub fn is_content_change(kind: &EventKind) -> bool {
    match kind {
        EventKind::Create(_) | EventKind::Remove(_) => true,
        EventKind::Modify(modify) => !matches!(modify, notify::event::ModifyKind::Metadata(_)),
        _ => false,
    }
}

#[cfg(test)]
#[path = "tests/watch.rs"]
mod tests;
