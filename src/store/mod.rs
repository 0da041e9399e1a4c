//! Profile persistence
//!
//! Manages `profile.json` inside the store directory (`~/.devquest/` by
//! default):
//!
//! ```text
//! ~/.devquest/
//! ├── profile.json                  canonical profile
//! ├── profile.json.<random>.tmp     per-writer staging file, renamed into place
//! ├── profile.lock                  cooperative write lock
//! └── profile.json.bak.<millis>     corrupt profiles moved aside
//! ```
//!
//! Readers never observe a partial file: each save writes its own staging
//! file, syncs it, and atomically renames it into place.

mod lock;
mod schema;

pub use lock::{LockSettings, ProfileLock};

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, warn};

use crate::atomic::write_atomic;
use crate::error::{StoreError, StoreResult};
use crate::profile::Profile;
use schema::StoredProfile;

const PROFILE_FILE: &str = "profile.json";
const LOCK_FILE: &str = "profile.lock";

/// File-backed profile store rooted at an explicit directory
#[derive(Debug, Clone)]
pub struct ProfileStore {
    dir: PathBuf,
    lock: LockSettings,
}

impl ProfileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_lock_settings(dir, LockSettings::default())
    }

    pub fn with_lock_settings(dir: impl Into<PathBuf>, lock: LockSettings) -> Self {
        Self {
            dir: dir.into(),
            lock,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn profile_path(&self) -> PathBuf {
        self.dir.join(PROFILE_FILE)
    }

    pub fn lock_path(&self) -> PathBuf {
        self.dir.join(LOCK_FILE)
    }

    fn ensure_dir(&self) -> StoreResult<()> {
        fs::create_dir_all(&self.dir).map_err(|e| StoreError::io(&self.dir, e))
    }

    /// Read the stored profile.
    ///
    /// Returns `None` if there is no profile yet, or if the file was
    /// unparseable (it is then moved aside to a timestamped backup).
    pub fn read(&self) -> StoreResult<Option<Profile>> {
        let path = self.profile_path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                // Not UTF-8: as corrupt as bad JSON
                self.quarantine(&path)?;
                return Ok(None);
            }
            Err(e) => return Err(StoreError::io(&path, e)),
        };

        match serde_json::from_str::<StoredProfile>(&content) {
            Ok(stored) => {
                if stored.version() < crate::profile::SCHEMA_VERSION {
                    debug!(from = stored.version(), "Upgrading stored profile schema");
                }
                Ok(Some(stored.reconcile(Utc::now())))
            }
            Err(e) => {
                warn!(path = %path.display(), "Profile is corrupt ({}), starting fresh", e);
                self.quarantine(&path)?;
                Ok(None)
            }
        }
    }

    /// Read the profile, or a fresh default one if none is stored
    pub fn load(&self) -> StoreResult<Profile> {
        self.ensure_dir()?;
        Ok(self.read()?.unwrap_or_else(|| Profile::new(Utc::now())))
    }

    /// Persist the profile under the lock, replacing the file atomically
    pub fn save(&self, profile: &Profile) -> StoreResult<()> {
        self.ensure_dir()?;
        let content = serde_json::to_string_pretty(profile)?;

        let _lock = lock::acquire(&self.lock_path(), &self.lock)?;

        let path = self.profile_path();
        write_atomic(&path, content.as_bytes()).map_err(|e| StoreError::io(&path, e))
    }

    /// Move a corrupt profile to `profile.json.bak.<unix millis>`
    fn quarantine(&self, path: &Path) -> StoreResult<PathBuf> {
        let backup = self.backup_path(Utc::now().timestamp_millis());
        match fs::rename(path, &backup) {
            Ok(()) => {
                warn!(backup = %backup.display(), "Corrupt profile archived");
                Ok(backup)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(backup),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }

    /// First free backup name for `stamp`; a counter suffix keeps backups
    /// made within the same millisecond apart
    fn backup_path(&self, stamp: i64) -> PathBuf {
        let mut backup = self.dir.join(format!("{}.bak.{}", PROFILE_FILE, stamp));
        let mut n = 1;
        while backup.exists() {
            backup = self.dir.join(format!("{}.bak.{}.{}", PROFILE_FILE, stamp, n));
            n += 1;
        }
        backup
    }
}
