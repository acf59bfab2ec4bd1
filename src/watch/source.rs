//! Filesystem notification source.

use std::path::{Path, PathBuf};
use notify::event::{CreateKind, RemoveKind};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use crate::watch::trigger::ChangeEvent;

/// Recursive watcher over a directory tree.
///
/// Dropping the source releases the underlying subscription and closes the
/// event channel.
pub struct NotifySource {
    root: PathBuf,
    _watcher: RecommendedWatcher,
}

impl NotifySource {
    /// Start watching `root`. Returns the source and the receiving end of the
    /// event stream.
    pub fn watch(root: &Path) -> Result<(Self, mpsc::UnboundedReceiver<ChangeEvent>), notify::Error> {
        let (tx, rx) = mpsc::unbounded_channel();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    for change in change_events(&event) {
                        let _ = tx.send(change);
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default(),
        )?;

        watcher.watch(root, RecursiveMode::Recursive)?;
        tracing::info!(path = %root.display(), "Started watching");

        Ok((
            Self {
                root: root.to_path_buf(),
                _watcher: watcher,
            },
            rx,
        ))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Translate a notify event into one change per affected path. Read-only
/// access events are dropped so validation's own reads do not retrigger it.
fn change_events(event: &Event) -> Vec<ChangeEvent> {
    if matches!(event.kind, EventKind::Access(_)) {
        return Vec::new();
    }

    let folder = matches!(
        event.kind,
        EventKind::Create(CreateKind::Folder) | EventKind::Remove(RemoveKind::Folder)
    );

    event
        .paths
        .iter()
        .map(|path| ChangeEvent {
            path: path.clone(),
            is_directory: folder || path.is_dir(),
        })
        .collect()
}
