//! Action kinds that earn experience

use serde::{Deserialize, Serialize};

/// A successful developer action reported by the wrapper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Commit,
    Push,
    Test,
    Deploy,
    Merge,
}

impl ActionKind {
    /// Base experience granted for the action
    pub fn xp(&self) -> u64 {
        match self {
            Self::Commit => 50,
            Self::Push => 75,
            Self::Test => 100,
            Self::Deploy => 500,
            Self::Merge => 150,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Commit => "commit",
            Self::Push => "push",
            Self::Test => "test",
            Self::Deploy => "deploy",
            Self::Merge => "merge",
        }
    }

    /// Parse an action name. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "commit" => Some(Self::Commit),
            "push" => Some(Self::Push),
            "test" => Some(Self::Test),
            "deploy" => Some(Self::Deploy),
            "merge" => Some(Self::Merge),
            _ => None,
        }
    }

    pub fn all() -> &'static [ActionKind] {
        &[
            Self::Commit,
            Self::Push,
            Self::Test,
            Self::Deploy,
            Self::Merge,
        ]
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
