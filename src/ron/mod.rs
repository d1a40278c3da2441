//! Utilities for loading RON files and watching directories for changes.
//!
//! This module provides a small helper for reading RON files from disk
//! and a simple filesystem watcher resource that sets a shared boolean when
//! files change. The watcher is used for hot-reloading the gameplay settings
//! during development.

use bevy::log::{error, warn};
use bevy::prelude::Resource;
use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Failure to read or deserialize a single RON file.
#[derive(Debug, thiserror::Error)]
pub enum RonError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

#[derive(Resource)]
/// File-watcher resource for RON hot-reload.
pub struct RonWatcher {
    pub changed: Arc<Mutex<bool>>, // Shared boolean set to `true` when watched files change.
    _watcher: Option<notify::RecommendedWatcher>, // watcher handle kept to prevent immediate drop.
}

impl RonWatcher {
    /// Create a stub `RonWatcher` that does not have an active OS watcher.
    ///
    /// # Return
    /// Returns a `RonWatcher` with `changed` initialized to `false` and
    /// no underlying OS watcher. Useful as a fallback when watcher
    /// creation fails or when running on platforms without notify support.
    #[must_use]
    pub fn stub() -> Self {
        RonWatcher {
            changed: Arc::new(Mutex::new(false)),
            _watcher: None,
        }
    }

    /// Return whether a change was seen since the last call, clearing the flag.
    ///
    /// A poisoned flag is recovered rather than propagated; the watcher thread
    /// only ever writes `true` to it.
    pub fn take_changed(&self) -> bool {
        let mut flag = match self.changed.lock() {
            Ok(flag) => flag,
            Err(poisoned) => {
                warn!("ron watcher flag poisoned, recovering");
                poisoned.into_inner()
            }
        };
        std::mem::replace(&mut *flag, false)
    }
}

/// Read and deserialize one RON file.
///
/// # Errors
/// Returns [`RonError::Io`] when the file cannot be read and
/// [`RonError::Parse`] when its contents do not deserialize into `T`.
pub fn load_ron_file<T: DeserializeOwned>(path: &Path) -> Result<T, RonError> {
    let content = std::fs::read_to_string(path).map_err(|source| RonError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str::<T>(&content).map_err(|source| RonError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// List the `.ron` files directly inside a directory.
///
/// # Arguments
/// * `path` - Directory path to scan for `.ron` files.
///
/// # Return
/// The file paths in file name order. An unreadable directory is logged and
/// yields an empty list.
#[must_use]
pub fn ron_files_in(path: &str) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(path) else {
        warn!("ron directory {path} not readable, nothing loaded");
        return Vec::new();
    };

    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "ron"))
        .collect();
    files.sort();
    files
}

/// Create a `RonWatcher` that watches a directory for modifications.
///
/// # Arguments
/// * `path` - Directory path to watch for `.ron` file changes.
///
/// # Return
/// Returns a `RonWatcher` on success. The returned watcher's `changed`
/// flag will be set to `true` when a file modification event under the
/// watched directory is observed.
///
/// # Errors
/// Returns a `notify::Error` if the underlying file-watcher cannot be
/// created or the watcher cannot be registered for the provided path.
pub fn setup_ron_watcher(path: &str) -> Result<RonWatcher, notify::Error> {
    let changed = Arc::new(Mutex::new(false));
    let changed_clone = changed.clone();
    // Resolve watched path to a canonical form if possible so we can filter events
    let watched_path: PathBuf = std::fs::canonicalize(path).unwrap_or_else(|_| PathBuf::from(path));

    let mut watcher: RecommendedWatcher = Watcher::new(
        move |res: Result<notify::Event, notify::Error>| match res {
            Ok(event) => {
                if !matches!(event.kind, notify::EventKind::Modify(_)) {
                    return;
                }
                let relevant = event.paths.iter().any(|p| {
                    let p_canon = std::fs::canonicalize(p).unwrap_or_else(|_| p.clone());
                    p_canon.starts_with(&watched_path)
                });
                if relevant {
                    match changed_clone.lock() {
                        Ok(mut flag) => *flag = true,
                        Err(poisoned) => *poisoned.into_inner() = true,
                    }
                }
            }
            Err(e) => error!("watch error: {e:?}"),
        },
        Config::default(),
    )?;

    watcher.watch(Path::new(path), RecursiveMode::NonRecursive)?;
    Ok(RonWatcher { changed, _watcher: Some(watcher) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("pitchside_ron_{name}_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).expect("create scratch dir");
        dir
    }

    #[test]
    fn lists_only_ron_files_in_name_order() {
        let dir = scratch_dir("listing");
        std::fs::write(dir.join("b.ron"), "()").unwrap();
        std::fs::write(dir.join("a.ron"), "()").unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();
        std::fs::create_dir_all(dir.join("nested.ron")).unwrap();

        let files = ron_files_in(dir.to_str().unwrap());
        let names: Vec<_> = files.iter().filter_map(|f| f.file_name()?.to_str()).collect();
        assert_eq!(names, ["a.ron", "b.ron"]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn unreadable_directory_lists_nothing() {
        assert!(ron_files_in("definitely/not/a/real/dir").is_empty());
    }

    #[test]
    fn parse_error_names_the_file() {
        let dir = scratch_dir("broken");
        let file = dir.join("broken.ron");
        std::fs::write(&file, "(ball: (").unwrap();

        let err = load_ron_file::<Settings>(&file).unwrap_err();
        assert!(matches!(err, RonError::Parse { .. }));
        assert!(err.to_string().contains("broken.ron"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn stub_watcher_reports_once() {
        let watcher = RonWatcher::stub();
        assert!(!watcher.take_changed());
        *watcher.changed.lock().unwrap() = true;
        assert!(watcher.take_changed());
        assert!(!watcher.take_changed());
    }
}
