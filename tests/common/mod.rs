//! Shared test utilities for integration tests

#![allow(dead_code)]

use std::fs;
use std::process::Command;

use chrono::{DateTime, Local, TimeZone, Utc};
use tempfile::TempDir;

use devquest::class::{CommitRecord, FixedHistory};
use devquest::manager::{ActionContext, QuestManager};
use devquest::ProfileStore;

/// Manager over a fresh store directory with a scripted commit history
pub fn manager_with_history(history: Option<Vec<CommitRecord>>) -> (TempDir, QuestManager) {
    let home = TempDir::new().expect("Failed to create temp dir");
    let manager =
        QuestManager::new(ProfileStore::new(home.path())).with_history(FixedHistory(history));
    (home, manager)
}

/// Manager whose commit history is unavailable, so the class never changes
pub fn manager() -> (TempDir, QuestManager) {
    manager_with_history(None)
}

/// Local timestamp; 2026-03-04 is a Wednesday
pub fn local(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Local> {
    Local
        .with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .expect("Unambiguous local time")
}

/// Weekday mid-morning: no time-of-day or weekend achievements fire
pub fn weekday_morning() -> DateTime<Local> {
    local(2026, 3, 4, 10)
}

pub fn ctx_at(now: DateTime<Local>) -> ActionContext {
    ActionContext::new(".").at(now)
}

pub fn utc(now: DateTime<Local>) -> DateTime<Utc> {
    now.with_timezone(&Utc)
}

fn git(repo: &std::path::Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(repo)
        .output()
        .expect("Failed to run git");
    assert!(output.status.success(), "git {:?} failed", args);
}

/// Creates a temporary git repository with the given `(subject, file)` commits
pub fn create_test_repo(commits: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let repo_path = temp_dir.path();

    git(repo_path, &["init"]);
    git(repo_path, &["config", "user.email", "test@test.com"]);
    git(repo_path, &["config", "user.name", "Test User"]);

    for (i, (subject, file)) in commits.iter().enumerate() {
        let path = repo_path.join(file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(&path, format!("change {}\n", i)).expect("Failed to write file");
        git(repo_path, &["add", "."]);
        git(repo_path, &["commit", "-m", subject]);
    }

    temp_dir
}
