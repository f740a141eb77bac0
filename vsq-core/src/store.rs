//! src/store.rs
//! ============================================================================
//! # RecentStore: Persisted Recent-State Loader and Saver
//!
//! Persists the small amount of state remembered between runs (currently the
//! last corpus directory submitted for indexing) as TOML in the
//! cross-platform data dir resolved via
//! [`directories`](https://docs.rs/directories).
//!
//! A missing file reads as the default state. The event loop is the single
//! writer; every directory submission overwrites the file.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

use tokio::fs as TokioFs;

use crate::error::AppError;

/// State remembered between runs.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct RecentState {
    /// Last corpus directory submitted for indexing, verbatim as typed.
    pub last_dir: String,
}

/// Load/save handle for the recent-state file. Cheap to clone.
#[derive(Debug, Clone)]
pub struct RecentStore {
    path: PathBuf,
}

impl RecentStore {
    /// Store at the platform data dir, `$XDG_DATA_HOME/vsq/recent.toml` on
    /// Linux or equivalent elsewhere.
    pub fn new() -> Result<Self, AppError> {
        let proj_dirs = ProjectDirs::from("org", "example", "vsq")
            .ok_or_else(|| AppError::Other("Could not determine data directory.".to_string()))?;

        Ok(Self {
            path: proj_dirs.data_dir().join("recent.toml"),
        })
    }

    /// Store rooted at an explicit file path instead of the platform data dir.
    pub fn at_path<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Loads the recent state. A missing file is the default state, not an
    /// error; a present-but-unreadable file is.
    pub async fn load(&self) -> Result<RecentState, AppError> {
        if !self.path.exists() {
            debug!("No recent-state file at {}", self.path.display());
            return Ok(RecentState::default());
        }

        let text = TokioFs::read_to_string(&self.path)
            .await
            .map_err(|e| AppError::store_io(&self.path, e))?;
        let state: RecentState = toml::from_str(&text)?;

        Ok(state)
    }

    /// Saves the recent state, creating parent directories as needed.
    pub async fn save(&self, state: &RecentState) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            TokioFs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::store_io(parent, e))?;
        }

        let toml_str = toml::to_string_pretty(state)?;
        TokioFs::write(&self.path, toml_str)
            .await
            .map_err(|e| AppError::store_io(&self.path, e))?;

        debug!("Saved recent state to {}", self.path.display());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_loads_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecentStore::at_path(dir.path().join("recent.toml"));

        let state = store.load().await.unwrap();
        assert_eq!(state, RecentState::default());
        assert_eq!(state.last_dir, "");
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecentStore::at_path(dir.path().join("recent.toml"));

        store
            .save(&RecentState {
                last_dir: "/docs".to_string(),
            })
            .await
            .unwrap();

        let state = store.load().await.unwrap();
        assert_eq!(state.last_dir, "/docs");
    }

    #[tokio::test]
    async fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecentStore::at_path(dir.path().join("nested").join("deep").join("recent.toml"));

        store
            .save(&RecentState {
                last_dir: "/tmp/corpus".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(store.load().await.unwrap().last_dir, "/tmp/corpus");
    }

    #[tokio::test]
    async fn test_unreadable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recent.toml");
        tokio::fs::write(&path, "last_dir = [not toml").await.unwrap();

        let store = RecentStore::at_path(&path);
        assert!(store.load().await.is_err());
    }
}
