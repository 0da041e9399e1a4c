//! Cooperative profile lock
//!
//! The lock is a marker file created with `create_new`. A marker older than
//! the staleness window is treated as abandoned and removed. When every
//! attempt fails the marker is removed by force and the caller proceeds
//! without the lock (unless `strict` is set), so a crashed process can never
//! block rewards.
//!
//! Known race: two processes can both judge a marker stale, or both proceed
//! after forced removal, and then write concurrently. Each writer stages its
//! own file and renames it into place, so both saves succeed and the file
//! stays valid; the update renamed first is overwritten by the other.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, SystemTime};

use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};

/// Lock timing, configurable under `[lock]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LockSettings {
    /// Markers older than this are considered abandoned
    pub stale_secs: u64,
    pub attempts: u32,
    pub backoff_ms: u64,
    /// Fail with `LockContention` instead of proceeding unlocked
    pub strict: bool,
}

impl Default for LockSettings {
    fn default() -> Self {
        Self {
            stale_secs: 10,
            attempts: 10,
            backoff_ms: 200,
            strict: false,
        }
    }
}

impl LockSettings {
    pub fn stale_after(&self) -> Duration {
        Duration::from_secs(self.stale_secs)
    }

    pub fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }
}

/// Held lock; the marker is removed on drop
#[derive(Debug)]
pub struct ProfileLock {
    file: Option<File>,
    path: PathBuf,
}

impl Drop for ProfileLock {
    fn drop(&mut self) {
        if let Some(file) = self.file.take() {
            let _ = FileExt::unlock(&file);
        }
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != ErrorKind::NotFound {
                debug!(path = %self.path.display(), "Failed to remove lock marker: {}", e);
            }
        }
    }
}

/// Try to acquire the marker at `path`.
///
/// Returns `Ok(None)` when retries ran out and the caller should proceed
/// unlocked.
pub fn acquire(path: &Path, settings: &LockSettings) -> StoreResult<Option<ProfileLock>> {
    for attempt in 0..settings.attempts {
        match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(mut file) => {
                let _ = writeln!(file, "{}", std::process::id());
                if let Err(e) = file.try_lock_exclusive() {
                    debug!(path = %path.display(), "Advisory lock unavailable on marker: {}", e);
                }
                return Ok(Some(ProfileLock {
                    file: Some(file),
                    path: path.to_path_buf(),
                }));
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {}
            Err(e) => return Err(StoreError::io(path, e)),
        }

        match marker_age(path) {
            Ok(Some(age)) if age > settings.stale_after() => {
                debug!(path = %path.display(), ?age, "Removing stale lock marker");
                remove_marker(path)?;
                continue;
            }
            Ok(_) => {}
            Err(e) => return Err(e),
        }

        debug!(attempt, "Profile lock busy, backing off");
        thread::sleep(settings.backoff());
    }

    if settings.strict {
        return Err(StoreError::LockContention(path.to_path_buf()));
    }

    warn!(
        path = %path.display(),
        attempts = settings.attempts,
        "Profile lock still held after all retries; removing it and writing unlocked"
    );
    remove_marker(path)?;
    Ok(None)
}

/// Age of the marker by modification time; `None` if it vanished.
fn marker_age(path: &Path) -> StoreResult<Option<Duration>> {
    match fs::metadata(path) {
        Ok(meta) => {
            let modified = meta.modified().map_err(|e| StoreError::io(path, e))?;
            Ok(Some(
                SystemTime::now()
                    .duration_since(modified)
                    .unwrap_or_default(),
            ))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StoreError::io(path, e)),
    }
}

fn remove_marker(path: &Path) -> StoreResult<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(StoreError::io(path, e)),
    }
}
