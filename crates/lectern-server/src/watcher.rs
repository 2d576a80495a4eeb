//! File watching for live reload.

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc as async_mpsc;

/// Quiet period that closes a burst of file system events.
const DEBOUNCE: Duration = Duration::from_millis(100);

/// Events emitted by the file watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// Markdown content changed
    Content(PathBuf),

    /// Site configuration or a sidebar, tag or author file changed
    Config(PathBuf),

    /// Any other file (static files, stylesheets)
    Asset(PathBuf),

    /// File was deleted
    Removed(PathBuf),
}

impl WatchEvent {
    pub fn path(&self) -> &Path {
        match self {
            Self::Content(p) | Self::Config(p) | Self::Asset(p) | Self::Removed(p) => p,
        }
    }
}

/// File watcher for detecting changes.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
}

impl FileWatcher {
    /// Create a new file watcher for the given paths.
    ///
    /// Directories are watched recursively, files on their own; missing
    /// paths are skipped. Paths under `ignore` never produce events.
    /// Returns the watcher and a channel to receive events.
    pub fn new(
        paths: &[PathBuf],
        ignore: Option<PathBuf>,
    ) -> Result<(Self, async_mpsc::Receiver<WatchEvent>), std::io::Error> {
        let (sync_tx, sync_rx) = mpsc::channel();
        let (async_tx, async_rx) = async_mpsc::channel(100);

        let mut watcher = notify::recommended_watcher(move |res: Result<notify::Event, _>| {
            if let Ok(event) = res {
                let _ = sync_tx.send(event);
            }
        })
        .map_err(std::io::Error::other)?;

        for path in paths {
            if path.is_dir() {
                watcher
                    .watch(path, RecursiveMode::Recursive)
                    .map_err(std::io::Error::other)?;
            } else if path.is_file() {
                watcher
                    .watch(path, RecursiveMode::NonRecursive)
                    .map_err(std::io::Error::other)?;
            } else {
                tracing::debug!("Not watching missing path {}", path.display());
            }
        }

        std::thread::spawn(move || {
            while let Ok(first) = sync_rx.recv() {
                // Editors emit several events per save; forward a burst once.
                let mut burst = vec![first];
                while let Ok(next) = sync_rx.recv_timeout(DEBOUNCE) {
                    burst.push(next);
                }

                let mut seen: Vec<WatchEvent> = Vec::new();
                for event in burst {
                    for path in &event.paths {
                        if let Some(dir) = &ignore {
                            let absolute = std::path::absolute(path).unwrap_or_else(|_| path.clone());
                            if absolute.starts_with(dir) {
                                continue;
                            }
                        }
                        if let Some(e) = classify_event(path, &event.kind) {
                            if !seen.contains(&e) {
                                seen.push(e);
                            }
                        }
                    }
                }

                for e in seen {
                    if async_tx.blocking_send(e).is_err() {
                        return;
                    }
                }
            }
        });

        Ok((Self { _watcher: watcher }, async_rx))
    }
}

/// Classify a notify event into a WatchEvent.
fn classify_event(path: &Path, kind: &notify::EventKind) -> Option<WatchEvent> {
    use notify::EventKind;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    match kind {
        EventKind::Remove(_) => Some(WatchEvent::Removed(path.to_path_buf())),
        EventKind::Create(_) | EventKind::Modify(_) => {
            if ext == "md" || ext == "mdx" {
                Some(WatchEvent::Content(path.to_path_buf()))
            } else if ext == "toml" || ext == "yaml" || ext == "yml" {
                Some(WatchEvent::Config(path.to_path_buf()))
            } else {
                Some(WatchEvent::Asset(path.to_path_buf()))
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, ModifyKind, RemoveKind};
    use notify::EventKind;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn classifies_events() {
        let modify = EventKind::Modify(ModifyKind::Any);

        assert_eq!(
            classify_event(Path::new("docs/intro.md"), &modify),
            Some(WatchEvent::Content(PathBuf::from("docs/intro.md")))
        );
        assert_eq!(
            classify_event(Path::new("sidebars.yaml"), &EventKind::Create(CreateKind::File)),
            Some(WatchEvent::Config(PathBuf::from("sidebars.yaml")))
        );
        assert_eq!(
            classify_event(Path::new("static/img/logo.svg"), &modify),
            Some(WatchEvent::Asset(PathBuf::from("static/img/logo.svg")))
        );
        assert_eq!(
            classify_event(Path::new("docs/old.md"), &EventKind::Remove(RemoveKind::File)),
            Some(WatchEvent::Removed(PathBuf::from("docs/old.md")))
        );
        assert_eq!(classify_event(Path::new("docs/intro.md"), &EventKind::Any), None);
    }

    #[tokio::test]
    async fn watches_file_changes() {
        let temp = tempdir().unwrap();
        let test_file = temp.path().join("intro.md");

        // Create the watcher first (so it catches file creation)
        let (watcher, mut rx) = FileWatcher::new(&[temp.path().to_path_buf()], None).unwrap();

        // Give inotify time to set up
        tokio::time::sleep(Duration::from_millis(100)).await;

        fs::write(&test_file, "# Created").unwrap();

        let event = tokio::time::timeout(Duration::from_secs(3), rx.recv()).await;

        // Keep watcher alive until we're done
        drop(watcher);

        assert!(event.is_ok(), "timeout waiting for file watch event");
        assert!(event.unwrap().is_some(), "channel should not be closed");
    }
}
