//! Reloading a document when its file changes.
//!
//! [`watch`] loads a file and starts a background thread that re-reads it
//! on every modify or create event. Each reload parses the whole file again
//! and swaps the shared document under a write lock; readers see either the
//! old or the new document, never a partial one. A reload that fails is
//! logged and the previous document stays in place.
//!
//! The task belongs to the returned [`WatchedDocument`]. Calling
//! [`WatchedDocument::unwatch`] or dropping it stops the watcher and joins
//! the thread.

use crate::{fs, Document, Result};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use parking_lot::{RwLock, RwLockReadGuard};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};

/// A document kept in sync with a file.
#[derive(Debug)]
pub struct WatchedDocument {
    path: PathBuf,
    document: Arc<RwLock<Document>>,
    watcher: Option<RecommendedWatcher>,
    worker: Option<JoinHandle<()>>,
}

/// Loads `path` and keeps reloading it as it changes.
///
/// # Examples
///
/// ```no_run
/// use serde_ini_doc::{watch, Container};
///
/// let watched = watch("settings.ini")?;
/// println!("level = {}", watched.read().get("level"));
/// watched.unwatch();
/// # Ok::<(), serde_ini_doc::Error>(())
/// ```
pub fn watch<P: AsRef<Path>>(path: P) -> Result<WatchedDocument> {
    let path = path.as_ref().to_path_buf();
    let document = Arc::new(RwLock::new(fs::load(&path)?));

    let (tx, rx) = mpsc::channel::<notify::Result<Event>>();
    let mut watcher = RecommendedWatcher::new(tx, Config::default())?;
    watcher.watch(&path, RecursiveMode::NonRecursive)?;

    let shared = Arc::clone(&document);
    let reload_path = path.clone();
    let worker = thread::Builder::new()
        .name("ini-watch".to_string())
        .spawn(move || {
            // Ends once the watcher, and with it the sender, is dropped.
            for res in rx {
                match res {
                    Ok(event) if matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) => {
                        reload(&reload_path, &shared);
                    }
                    Ok(_) => {}
                    Err(err) => tracing::warn!(error = %err, "file watcher error"),
                }
            }
            tracing::debug!(path = %reload_path.display(), "watch loop stopped");
        })?;

    tracing::info!(path = %path.display(), "watching document");
    Ok(WatchedDocument {
        path,
        document,
        watcher: Some(watcher),
        worker: Some(worker),
    })
}

fn reload(path: &Path, document: &RwLock<Document>) {
    match fs::load(path) {
        Ok(fresh) => {
            *document.write() = fresh;
            tracing::info!(path = %path.display(), "reloaded document");
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "reload failed, keeping previous document");
        }
    }
}

impl WatchedDocument {
    /// The watched file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Shared handle to the current document.
    #[must_use]
    pub fn document(&self) -> Arc<RwLock<Document>> {
        Arc::clone(&self.document)
    }

    /// Read access to the current document. Reloads wait while the guard lives.
    pub fn read(&self) -> RwLockReadGuard<'_, Document> {
        self.document.read()
    }

    /// A copy of the current document.
    #[must_use]
    pub fn snapshot(&self) -> Document {
        self.document.read().clone()
    }

    /// Stops watching and waits for the background thread to exit.
    pub fn unwatch(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        drop(self.watcher.take());
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                tracing::warn!(path = %self.path.display(), "watch thread panicked");
            }
        }
    }
}

impl Drop for WatchedDocument {
    fn drop(&mut self) {
        self.stop();
    }
}
