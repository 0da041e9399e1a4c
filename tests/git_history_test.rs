//! Class detection from a real git repository

mod common;

use common::{create_test_repo, weekday_morning};
use devquest::class::{CommitHistory, GitLog};
use devquest::manager::QuestManager;
use devquest::{ActionContext, ActionKind, ProfileStore};
use tempfile::TempDir;

#[test]
fn test_git_log_reads_subjects_and_files() {
    let repo = create_test_repo(&[
        ("Add login form", "web/login.tsx"),
        ("Fix session bug", "src/api/session.rs"),
    ]);

    let commits = GitLog.commits(repo.path()).expect("history should be available");

    assert_eq!(commits.len(), 2);
    // git log lists newest first
    assert_eq!(commits[0].subject, "Fix session bug");
    assert_eq!(commits[0].files, vec!["src/api/session.rs".to_string()]);
    assert_eq!(commits[1].subject, "Add login form");
}

#[test]
fn test_frontend_repo_selects_frontend_mage() {
    let repo = create_test_repo(&[
        ("Add navbar", "web/navbar.tsx"),
        ("Style buttons", "web/buttons.css"),
        ("Add docs", "README.md"),
    ]);
    let home = TempDir::new().unwrap();
    let manager = QuestManager::new(ProfileStore::new(home.path()));

    let result = manager
        .award(
            ActionKind::Commit,
            &ActionContext::new(repo.path()).at(weekday_morning()),
        )
        .unwrap();

    assert_eq!(result.class, "Frontend Mage");
}

#[test]
fn test_directory_without_git_keeps_class() {
    let not_a_repo = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    let manager = QuestManager::new(ProfileStore::new(home.path()));

    let result = manager
        .award(
            ActionKind::Commit,
            &ActionContext::new(not_a_repo.path()).at(weekday_morning()),
        )
        .unwrap();

    assert_eq!(result.class, "Adventurer");
}
