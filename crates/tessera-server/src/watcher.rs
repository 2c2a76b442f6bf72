//! File watching for live preview.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc as async_mpsc;

use tessera_model::Format;

const DEBOUNCE: Duration = Duration::from_millis(100);

/// Changes to block documents seen by the file watcher.
///
/// Events for any other file are dropped before they reach the server.
#[derive(Debug, Clone, PartialEq)]
pub enum WatchEvent {
    /// A YAML or JSON block document was created or written
    BlockModified(PathBuf),

    /// A YAML or JSON block document was removed
    BlockDeleted(PathBuf),
}

/// File watcher for detecting changes.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
}

impl FileWatcher {
    /// Create a new file watcher for the given paths.
    ///
    /// Bursts of events are coalesced until the paths have been quiet for 100ms,
    /// then one event per path is forwarded.
    pub fn new(
        paths: &[PathBuf],
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
            if path.exists() {
                watcher
                    .watch(path, RecursiveMode::Recursive)
                    .map_err(std::io::Error::other)?;
            }
        }

        std::thread::spawn(move || {
            while let Ok(first) = sync_rx.recv() {
                let mut batch = vec![first];
                while let Ok(event) = sync_rx.recv_timeout(DEBOUNCE) {
                    batch.push(event);
                }

                for event in coalesce(batch) {
                    if async_tx.blocking_send(event).is_err() {
                        return;
                    }
                }
            }
        });

        Ok((Self { _watcher: watcher }, async_rx))
    }
}

/// Keep the last classified event for each path, in first-seen order.
fn coalesce(batch: Vec<notify::Event>) -> Vec<WatchEvent> {
    let mut order: Vec<PathBuf> = Vec::new();
    let mut latest: HashMap<PathBuf, WatchEvent> = HashMap::new();

    for event in batch {
        for path in &event.paths {
            if let Some(classified) = classify_event(path, &event.kind) {
                if !latest.contains_key(path) {
                    order.push(path.clone());
                }
                latest.insert(path.clone(), classified);
            }
        }
    }

    order
        .into_iter()
        .filter_map(|path| latest.remove(&path))
        .collect()
}

/// Classify a notify event into a WatchEvent.
fn classify_event(path: &Path, kind: &notify::EventKind) -> Option<WatchEvent> {
    use notify::EventKind;

    Format::from_path(path)?;

    match kind {
        EventKind::Remove(_) => Some(WatchEvent::BlockDeleted(path.to_path_buf())),
        EventKind::Create(_) | EventKind::Modify(_) => {
            Some(WatchEvent::BlockModified(path.to_path_buf()))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, ModifyKind, RemoveKind};
    use notify::{Event, EventKind};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn classifies_block_documents() {
        let modify = EventKind::Modify(ModifyKind::Any);

        assert_eq!(
            classify_event(Path::new("blocks/hero.yaml"), &modify),
            Some(WatchEvent::BlockModified(PathBuf::from("blocks/hero.yaml")))
        );
        assert_eq!(
            classify_event(
                Path::new("blocks/hero.yaml"),
                &EventKind::Remove(RemoveKind::File)
            ),
            Some(WatchEvent::BlockDeleted(PathBuf::from("blocks/hero.yaml")))
        );
        assert_eq!(classify_event(Path::new("notes.txt"), &modify), None);
        assert_eq!(
            classify_event(Path::new("notes.txt"), &EventKind::Remove(RemoveKind::File)),
            None
        );
        assert_eq!(classify_event(Path::new("a.json"), &EventKind::Any), None);
    }

    #[test]
    fn coalesces_repeated_paths() {
        let path = PathBuf::from("block.yaml");
        let batch = vec![
            Event::new(EventKind::Create(CreateKind::File)).add_path(path.clone()),
            Event::new(EventKind::Modify(ModifyKind::Any)).add_path(path.clone()),
            Event::new(EventKind::Modify(ModifyKind::Any)).add_path(PathBuf::from("x.txt")),
        ];

        let events = coalesce(batch);
        assert_eq!(events, vec![WatchEvent::BlockModified(path)]);
    }

    #[tokio::test]
    async fn watches_file_changes() {
        let temp = tempdir().unwrap();
        let test_file = temp.path().join("block.yaml");

        let (watcher, mut rx) = FileWatcher::new(&[temp.path().to_path_buf()]).unwrap();

        // Give inotify time to set up
        tokio::time::sleep(Duration::from_millis(100)).await;

        fs::write(&test_file, "name: Test").unwrap();

        let event = tokio::time::timeout(Duration::from_secs(3), rx.recv()).await;

        drop(watcher);

        assert!(event.is_ok(), "timeout waiting for file watch event");
        assert!(event.unwrap().is_some(), "channel should not be closed");
    }
}
