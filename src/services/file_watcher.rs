//! Palette file watcher.
//!
//! Monitors an external palette file and broadcasts a debounced event
//! whenever it changes. [`spawn_palette_reloader`] turns those events into
//! palette reloads.

use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, Mutex};
use tokio::task::JoinHandle;

use super::palette_loader::PaletteLoader;
use super::palette_store::PaletteProvider;

const DEBOUNCE: Duration = Duration::from_millis(200);

/// Event sent when the watched file changes
#[derive(Debug, Clone)]
pub struct FileChangeEvent {
    /// Number of raw filesystem events folded into this one
    pub raw_events: usize,
}

/// File watcher for the palette file
pub struct FileWatcher {
    /// Broadcast sender for file change events
    sender: broadcast::Sender<FileChangeEvent>,
    /// Handle to the watcher (kept alive)
    _watcher: Option<RecommendedWatcher>,
    /// Flag indicating if watcher is active
    active: bool,
}

impl FileWatcher {
    /// Watch `watch_path`, a file. Must be called inside a tokio runtime.
    pub fn new(watch_path: Option<PathBuf>) -> Self {
        let (sender, _) = broadcast::channel(16);

        let (watcher, active) = match watch_path {
            Some(path) if path.exists() => match Self::start_watcher(&path, sender.clone()) {
                Ok(watcher) => {
                    tracing::info!(path = %path.display(), "Palette watcher started");
                    (Some(watcher), true)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to start palette watcher");
                    (None, false)
                }
            },
            Some(path) => {
                tracing::debug!(path = %path.display(), "Watch path does not exist");
                (None, false)
            }
            None => {
                tracing::debug!("No palette file configured, file watching disabled");
                (None, false)
            }
        };

        Self {
            sender,
            _watcher: watcher,
            active,
        }
    }

    fn start_watcher(
        path: &Path,
        sender: broadcast::Sender<FileChangeEvent>,
    ) -> Result<RecommendedWatcher, notify::Error> {
        // Editors often replace files instead of writing in place, so the
        // parent directory is watched and events are filtered by name.
        let file_name: OsString = path
            .file_name()
            .map(|n| n.to_os_string())
            .ok_or_else(|| notify::Error::generic("palette path has no file name"))?;
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let (tx, mut rx) = mpsc::channel::<()>(100);

        tokio::spawn(async move {
            let pending = Arc::new(Mutex::new(0usize));
            let pending_clone = pending.clone();

            // Debounce timer task
            tokio::spawn(async move {
                loop {
                    tokio::time::sleep(DEBOUNCE).await;
                    let mut guard = pending_clone.lock().await;
                    if *guard > 0 {
                        let raw_events = std::mem::take(&mut *guard);
                        tracing::debug!(raw_events, "Palette file changed (debounced)");
                        let _ = sender.send(FileChangeEvent { raw_events });
                    }
                }
            });

            while rx.recv().await.is_some() {
                *pending.lock().await += 1;
            }
        });

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<notify::Event, notify::Error>| {
                if let Ok(event) = res {
                    if event.kind.is_access() {
                        return;
                    }
                    if event
                        .paths
                        .iter()
                        .any(|p| p.file_name() == Some(file_name.as_os_str()))
                    {
                        let _ = tx.blocking_send(());
                    }
                }
            },
            Config::default(),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        Ok(watcher)
    }

    /// Subscribe to file change events
    pub fn subscribe(&self) -> broadcast::Receiver<FileChangeEvent> {
        self.sender.subscribe()
    }

    /// Check if the watcher is active
    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// Reload `store` from `loader` on every change `watcher` reports.
///
/// A reload that fails leaves the current palette in place.
pub fn spawn_palette_reloader(
    watcher: Arc<FileWatcher>,
    loader: Arc<PaletteLoader>,
    store: Arc<dyn PaletteProvider>,
) -> JoinHandle<()> {
    let mut events = watcher.subscribe();
    tokio::spawn(async move {
        // Holding the Arc keeps the notify handle alive
        let _watcher = watcher;
        loop {
            match events.recv().await {
                Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => {
                    match loader.reload_into(store.as_ref()).await {
                        Ok(snapshot) => tracing::info!(
                            entries = snapshot.palette.len(),
                            rejected = snapshot.rejected,
                            "Palette reloaded from file"
                        ),
                        Err(e) => tracing::warn!(error = %e, "Palette reload failed, keeping current palette"),
                    }
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}
