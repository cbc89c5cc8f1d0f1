//! A save slot kept in a file.
//!
//! One file per scope under a root directory, holding the same marked
//! payload a chat message would. The scope name is the key, so there is
//! nothing to scan.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use loom_core::{SaveState, decode_save, default_state, encode_save};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::platform::ScopeId;
use crate::store::{RecoveryPolicy, SaveStore};

/// Extension of save files.
pub const SAVE_EXTENSION: &str = "save";

/// A [`SaveStore`] backed by files in a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
    recovery: RecoveryPolicy,
}

impl FileStore {
    /// Store saves under `root`. The directory is created on first save.
    pub fn new(root: impl Into<PathBuf>, recovery: RecoveryPolicy) -> Self {
        Self {
            root: root.into(),
            recovery,
        }
    }

    /// The directory holding the save files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The file holding the save of `scope`.
    ///
    /// Scope names are restricted to ASCII letters, digits, `-` and `_` so
    /// they cannot escape the root directory.
    pub fn slot_path(&self, scope: &ScopeId) -> StoreResult<PathBuf> {
        let name = scope.as_str();
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidScope(name.to_string()));
        }
        Ok(self.root.join(format!("{name}.{SAVE_EXTENSION}")))
    }

    async fn read_slot(&self, path: &Path) -> StoreResult<Option<String>> {
        match tokio::fs::read_to_string(path).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    async fn write_slot(&self, path: &Path, state: &SaveState) -> StoreResult<()> {
        let payload = encode_save(state)?;
        let io_err = |source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        };

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|source| StoreError::Io {
                path: self.root.clone(),
                source,
            })?;

        // Write beside the slot, then rename over it.
        let tmp = path.with_extension(format!("{SAVE_EXTENSION}.tmp"));
        tokio::fs::write(&tmp, payload.as_bytes())
            .await
            .map_err(io_err)?;
        tokio::fs::rename(&tmp, path).await.map_err(io_err)?;
        debug!(path = %path.display(), bytes = payload.len(), "save written");
        Ok(())
    }
}

#[async_trait]
impl SaveStore for FileStore {
    async fn load(&self, scope: &ScopeId) -> StoreResult<SaveState> {
        let path = self.slot_path(scope)?;
        let Some(text) = self.read_slot(&path).await? else {
            let state = default_state();
            self.write_slot(&path, &state).await?;
            return Ok(state);
        };

        match decode_save(&text) {
            Ok(state) => Ok(state),
            Err(err) => {
                let state = self.recovery.recover(scope, err)?;
                self.write_slot(&path, &state).await?;
                Ok(state)
            }
        }
    }

    async fn save(&self, scope: &ScopeId, state: &SaveState) -> StoreResult<()> {
        let path = self.slot_path(scope)?;
        self.write_slot(&path, state).await
    }
}
