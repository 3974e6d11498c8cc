//! Cross-process run lock backed by a create-new lock file

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum LockError {
    #[error("run lock {path} is held (age {age:?})")]
    Held { path: PathBuf, age: Duration },

    #[error("run lock {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Held for the lifetime of one run; the lock file is removed on drop.
#[derive(Debug)]
pub struct RunLock {
    path: PathBuf,
}

impl RunLock {
    /// Take the lock at `path`. A lock file older than `stale_after` is
    /// assumed to belong to a crashed run and is taken over.
    pub fn acquire(path: impl Into<PathBuf>, stale_after: Duration) -> Result<Self, LockError> {
        let path = path.into();
        let io_err = |source: io::Error| LockError::Io {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        for _ in 0..2 {
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    writeln!(file, "{}", std::process::id()).map_err(io_err)?;
                    debug!(path = %path.display(), "Run lock acquired");
                    return Ok(Self { path });
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    let Some(age) = lock_age(&path).map_err(io_err)? else {
                        continue;
                    };
                    if age < stale_after {
                        return Err(LockError::Held { path, age });
                    }
                    warn!(
                        path = %path.display(),
                        age_secs = age.as_secs(),
                        "Taking over stale run lock"
                    );
                    match fs::remove_file(&path) {
                        Ok(()) => {}
                        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                        Err(e) => return Err(io_err(e)),
                    }
                }
                Err(e) => return Err(io_err(e)),
            }
        }

        let age = lock_age(&path).map_err(io_err)?.unwrap_or(Duration::ZERO);
        Err(LockError::Held { path, age })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bump the lock's mtime so long runs are not mistaken for stale ones.
    pub fn refresh(&self) -> Result<(), LockError> {
        let io_err = |source: io::Error| LockError::Io {
            path: self.path.clone(),
            source,
        };
        let file = OpenOptions::new()
            .write(true)
            .open(&self.path)
            .map_err(io_err)?;
        file.set_modified(SystemTime::now()).map_err(io_err)
    }

    fn owned_by_us(&self) -> bool {
        fs::read_to_string(&self.path)
            .map(|content| content.trim() == std::process::id().to_string())
            .unwrap_or(false)
    }
}

impl Drop for RunLock {
    fn drop(&mut self) {
        if !self.owned_by_us() {
            warn!(path = %self.path.display(), "Run lock taken over by another run, leaving it");
            return;
        }
        if let Err(e) = fs::remove_file(&self.path) {
            warn!(path = %self.path.display(), error = %e, "Failed to release run lock");
        }
    }
}

/// Age of the lock file, `None` if it disappeared in the meantime.
fn lock_age(path: &Path) -> io::Result<Option<Duration>> {
    let modified = match fs::metadata(path) {
        Ok(meta) => meta.modified()?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };
    Ok(Some(
        SystemTime::now()
            .duration_since(modified)
            .unwrap_or(Duration::ZERO),
    ))
}
