//! Commit classification pattern tables
//!
//! Keywords are case-insensitive regular expressions matched against commit
//! subjects; path segments are substrings of changed file paths; extensions
//! are path suffixes. All of it is data and can be overridden from the
//! `[classifier]` section of `config.toml`.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

/// Pattern tables as configured
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierRules {
    pub bug_keywords: String,
    pub refactor_keywords: String,
    pub ui_path_segments: Vec<String>,
    pub ui_extensions: Vec<String>,
    pub backend_path_segments: Vec<String>,
    pub database_path_segments: Vec<String>,
    pub database_extensions: Vec<String>,
    /// A category at or above this ratio wins
    pub dominance_threshold: f64,
    /// With no winner, a maximum ratio at or below this means "generalist"
    pub generalist_ceiling: f64,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for ClassifierRules {
    fn default() -> Self {
        Self {
            bug_keywords: "fix|bug|issue|hotfix|patch".to_string(),
            refactor_keywords: "refactor|cleanup|restructure|simplify".to_string(),
            ui_path_segments: strings(&["/ui/", "/frontend/", "/client/", "/web/", "/app/"]),
            ui_extensions: strings(&[
                ".js", ".jsx", ".ts", ".tsx", ".vue", ".svelte", ".css", ".scss", ".html",
            ]),
            backend_path_segments: strings(&[
                "/server/",
                "/backend/",
                "/api/",
                "/services/",
                "/service/",
            ]),
            database_path_segments: strings(&["/db/", "/database/", "/schema/", "/migrations/"]),
            database_extensions: strings(&[".sql", ".prisma"]),
            dominance_threshold: 0.4,
            generalist_ceiling: 0.35,
        }
    }
}

impl ClassifierRules {
    /// Compile keyword patterns
    pub fn compile(&self) -> Result<CompiledRules, regex::Error> {
        let keyword = |pattern: &str| RegexBuilder::new(pattern).case_insensitive(true).build();
        Ok(CompiledRules {
            bug: keyword(&self.bug_keywords)?,
            refactor: keyword(&self.refactor_keywords)?,
            rules: self.clone(),
        })
    }
}

/// Rules with keyword patterns compiled, ready for classification
#[derive(Debug, Clone)]
pub struct CompiledRules {
    bug: Regex,
    refactor: Regex,
    rules: ClassifierRules,
}

impl CompiledRules {
    pub fn is_bug_fix(&self, subject: &str) -> bool {
        self.bug.is_match(subject)
    }

    pub fn is_refactor(&self, subject: &str) -> bool {
        self.refactor.is_match(subject)
    }

    pub fn is_ui_file(&self, path: &str) -> bool {
        contains_any(path, &self.rules.ui_path_segments)
            || ends_with_any(path, &self.rules.ui_extensions)
    }

    pub fn is_backend_file(&self, path: &str) -> bool {
        contains_any(path, &self.rules.backend_path_segments)
    }

    pub fn is_database_file(&self, path: &str) -> bool {
        contains_any(path, &self.rules.database_path_segments)
            || ends_with_any(path, &self.rules.database_extensions)
    }

    pub fn dominance_threshold(&self) -> f64 {
        self.rules.dominance_threshold
    }

    pub fn generalist_ceiling(&self) -> f64 {
        self.rules.generalist_ceiling
    }
}

impl Default for CompiledRules {
    fn default() -> Self {
        ClassifierRules::default()
            .compile()
            .expect("built-in classifier patterns are valid")
    }
}

fn contains_any(path: &str, segments: &[String]) -> bool {
    segments.iter().any(|segment| path.contains(segment.as_str()))
}

fn ends_with_any(path: &str, extensions: &[String]) -> bool {
    extensions.iter().any(|ext| path.ends_with(ext.as_str()))
}
