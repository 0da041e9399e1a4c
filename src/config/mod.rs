//! Configuration loading and management
//!
//! Optional `config.toml` in the store directory. Every section and key is
//! optional; a missing file means all defaults.
//!
//! ```toml
//! [session]
//! timeout_minutes = 30
//!
//! [lock]
//! stale_secs = 10
//! attempts = 10
//! backoff_ms = 200
//! strict = false
//!
//! [classifier]
//! bug_keywords = "fix|bug|issue|hotfix|patch"
//! ui_extensions = [".js", ".tsx", ".vue"]
//! ```

mod io;

pub use io::HOME_ENV;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::class::ClassifierRules;
use crate::store::LockSettings;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub session: SessionSettings,

    #[serde(default)]
    pub lock: LockSettings,

    #[serde(default)]
    pub classifier: ClassifierRules,
}

/// Work session settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Minutes of inactivity after which a session ends
    pub timeout_minutes: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            timeout_minutes: 30,
        }
    }
}

impl SessionSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_minutes * 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.session.timeout(), Duration::from_secs(1800));
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config: Config = toml::from_str(
            r#"
            [lock]
            strict = true

            [classifier]
            database_extensions = [".sql", ".cql"]
            "#,
        )
        .unwrap();

        assert!(config.lock.strict);
        assert_eq!(config.lock.attempts, 10);
        assert_eq!(config.classifier.database_extensions, vec![".sql", ".cql"]);
        assert_eq!(config.session.timeout_minutes, 30);
    }
}
