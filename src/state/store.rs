//! JSON file persistence with atomic replace

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Load/save capability over one persisted document.
pub trait StateStore<S> {
    /// Never fails: missing or unreadable data yields the default state.
    fn load(&self) -> S;

    /// Full overwrite. A failed save leaves the previous document intact.
    fn save(&self, state: &S) -> Result<(), StoreError>;
}

pub struct JsonFileStore<S> {
    path: PathBuf,
    _state: PhantomData<fn() -> S>,
}

impl<S> JsonFileStore<S> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _state: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<S> StateStore<S> for JsonFileStore<S>
where
    S: Serialize + DeserializeOwned + Default,
{
    fn load(&self) -> S {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "State file missing, starting empty");
                return S::default();
            }
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "State file unreadable, starting empty"
                );
                return S::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(state) => state,
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "State file corrupt, starting empty"
                );
                S::default()
            }
        }
    }

    fn save(&self, state: &S) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(state)?;
        write_atomic(&self.path, &json)
    }
}

/// Write `bytes` to a sibling temp file, fsync it, then rename over `path`.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let io_err = |source: io::Error| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "state".to_string());
    let tmp_path = path.with_file_name(format!(".{}.{}.tmp", file_name, std::process::id()));

    let result = (|| {
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        fs::rename(&tmp_path, path)
    })();

    if let Err(e) = result {
        let _ = fs::remove_file(&tmp_path);
        return Err(io_err(e));
    }
    Ok(())
}
