use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::store::schema::UserProgress;

pub const PROGRESS_FILE: &str = "user_progress.json";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("could not create data directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("could not read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("{} is corrupt: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("could not serialize progress: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result of [`JsonStore::load`]. Loading never fails: a missing file gives a
/// fresh record, an unreadable one gives a fresh record plus a warning.
#[derive(Debug)]
pub struct LoadedProgress {
    pub progress: UserProgress,
    pub warning: Option<StorageError>,
}

pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self, StorageError> {
        fs::create_dir_all(&base_dir).map_err(|source| StorageError::CreateDir {
            path: base_dir.clone(),
            source,
        })?;
        let store = Self { base_dir };
        if store.clean_stale_tmp() {
            tracing::warn!(dir = %store.base_dir.display(), "removed leftover temp file from an interrupted save");
        }
        Ok(store)
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    pub fn progress_path(&self) -> PathBuf {
        self.file_path(PROGRESS_FILE)
    }

    pub fn load(&self, default_module: &str) -> LoadedProgress {
        let path = self.progress_path();
        let fresh = || UserProgress::new(default_module);

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no progress file yet, starting fresh");
                return LoadedProgress {
                    progress: fresh(),
                    warning: None,
                };
            }
            Err(source) => {
                let warning = StorageError::Read { path, source };
                tracing::warn!(%warning, "falling back to a fresh progress record");
                return LoadedProgress {
                    progress: fresh(),
                    warning: Some(warning),
                };
            }
        };

        match serde_json::from_str::<UserProgress>(&content) {
            Ok(mut progress) => {
                if progress.current_module.is_empty() {
                    progress.current_module = default_module.to_string();
                }
                LoadedProgress {
                    progress,
                    warning: None,
                }
            }
            Err(source) => {
                let warning = StorageError::Corrupt { path, source };
                tracing::warn!(%warning, "falling back to a fresh progress record");
                LoadedProgress {
                    progress: fresh(),
                    warning: Some(warning),
                }
            }
        }
    }

    pub fn save(&self, progress: &UserProgress) -> Result<(), StorageError> {
        self.save_json(PROGRESS_FILE, progress)?;
        tracing::debug!(
            completed = progress.completed_count(),
            score = progress.score,
            "progress saved"
        );
        Ok(())
    }

    /// Write-to-temp then rename, so a crash never leaves a half-written file.
    fn save_json<T: Serialize>(&self, name: &str, data: &T) -> Result<(), StorageError> {
        let path = self.file_path(name);
        let tmp_path = path.with_extension("json.tmp");

        let json = serde_json::to_string_pretty(data)?;
        let write = || -> io::Result<()> {
            let mut file = fs::File::create(&tmp_path)?;
            file.write_all(json.as_bytes())?;
            file.sync_all()?;
            fs::rename(&tmp_path, &path)
        };

        write().map_err(|source| {
            let _ = fs::remove_file(&tmp_path);
            StorageError::Write {
                path: path.clone(),
                source,
            }
        })
    }

    /// Remove a `.tmp` file left behind by a save that never reached its
    /// rename. Returns true if one was found.
    pub fn clean_stale_tmp(&self) -> bool {
        let tmp_path = self.progress_path().with_extension("json.tmp");
        tmp_path.exists() && fs::remove_file(&tmp_path).is_ok()
    }
}
