//! Commit history sources for the class classifier

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

/// One commit: subject line and the paths it touched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub subject: String,
    pub files: Vec<String>,
}

impl CommitRecord {
    pub fn new(subject: impl Into<String>, files: &[&str]) -> Self {
        Self {
            subject: subject.into(),
            files: files.iter().map(|f| f.to_string()).collect(),
        }
    }
}

/// Supplies the commit history of a repository.
///
/// `None` means the history is unavailable (not a repository, git missing,
/// ...); the classifier then keeps the current class.
pub trait CommitHistory {
    fn commits(&self, repo: &Path) -> Option<Vec<CommitRecord>>;
}

/// Reads history with `git log --name-only --pretty=format:%s`
#[derive(Debug, Clone, Copy, Default)]
pub struct GitLog;

impl CommitHistory for GitLog {
    fn commits(&self, repo: &Path) -> Option<Vec<CommitRecord>> {
        let output = Command::new("git")
            .args(["log", "--name-only", "--pretty=format:%s"])
            .current_dir(repo)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output();

        match output {
            Ok(output) if output.status.success() => {
                Some(parse_log(&String::from_utf8_lossy(&output.stdout)))
            }
            Ok(output) => {
                debug!(repo = %repo.display(), status = %output.status, "git log failed");
                None
            }
            Err(e) => {
                debug!(repo = %repo.display(), "Could not run git: {}", e);
                None
            }
        }
    }
}

/// A fixed history, for callers that already hold the commits
#[derive(Debug, Clone, Default)]
pub struct FixedHistory(pub Option<Vec<CommitRecord>>);

impl CommitHistory for FixedHistory {
    fn commits(&self, _repo: &Path) -> Option<Vec<CommitRecord>> {
        self.0.clone()
    }
}

/// Parse `git log --name-only --pretty=format:%s` output.
///
/// Commits are blank-line separated blocks: the first line is the subject,
/// the remaining lines are file paths.
pub fn parse_log(output: &str) -> Vec<CommitRecord> {
    let mut commits = Vec::new();
    let mut current: Option<CommitRecord> = None;

    for line in output.lines().map(str::trim) {
        if line.is_empty() {
            commits.extend(current.take());
            continue;
        }
        match current.as_mut() {
            None => {
                current = Some(CommitRecord {
                    subject: line.to_string(),
                    files: Vec::new(),
                })
            }
            Some(commit) => commit.files.push(line.to_string()),
        }
    }
    commits.extend(current);
    commits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_blocks() {
        let output = "Fix login\nsrc/api/login.rs\nsrc/ui/login.tsx\n\nInitial commit\nREADME.md\n";
        let commits = parse_log(output);

        assert_eq!(
            commits,
            vec![
                CommitRecord::new("Fix login", &["src/api/login.rs", "src/ui/login.tsx"]),
                CommitRecord::new("Initial commit", &["README.md"]),
            ]
        );
    }

    #[test]
    fn test_parse_log_empty_and_subject_only() {
        assert!(parse_log("").is_empty());
        assert!(parse_log("\n\n").is_empty());
        assert_eq!(
            parse_log("Merge branch 'main'"),
            vec![CommitRecord::new("Merge branch 'main'", &[])]
        );
    }

    #[test]
    fn test_git_log_in_missing_directory_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let commits = GitLog.commits(&dir.path().join("missing"));
        assert!(commits.is_none());
    }
}
