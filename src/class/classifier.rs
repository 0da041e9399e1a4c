//! Class inference from commit history and lifetime action counters

use serde::Serialize;

use super::history::CommitRecord;
use super::rules::CompiledRules;
use crate::profile::ActionCounters;

/// Base classes the classifier can assign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerClass {
    Adventurer,
    DebugDragon,
    TestCleric,
    FrontendMage,
    BackendWarrior,
    DevOpsWarlock,
    DatabasePaladin,
    RefactorMonk,
    FullStackDruid,
}

impl PlayerClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Adventurer => "Adventurer",
            Self::DebugDragon => "Debug Dragon",
            Self::TestCleric => "Test Cleric",
            Self::FrontendMage => "Frontend Mage",
            Self::BackendWarrior => "Backend Warrior",
            Self::DevOpsWarlock => "DevOps Warlock",
            Self::DatabasePaladin => "Database Paladin",
            Self::RefactorMonk => "Refactor Monk",
            Self::FullStackDruid => "Full Stack Druid",
        }
    }
}

impl std::fmt::Display for PlayerClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Share of each category, in `[0, 1]`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CategoryRatios {
    pub bug: f64,
    pub refactor: f64,
    pub ui: f64,
    pub backend: f64,
    pub database: f64,
    pub test: f64,
    pub deploy: f64,
}

impl CategoryRatios {
    /// Commit categories over commit count; test and deploy over lifetime actions
    pub fn compute(
        commits: &[CommitRecord],
        counters: &ActionCounters,
        rules: &CompiledRules,
    ) -> Self {
        let mut counts = [0u64; 5];
        for commit in commits {
            let files = || commit.files.iter().map(String::as_str);
            let flags = [
                rules.is_bug_fix(&commit.subject),
                rules.is_refactor(&commit.subject),
                files().any(|f| rules.is_ui_file(f)),
                files().any(|f| rules.is_backend_file(f)),
                files().any(|f| rules.is_database_file(f)),
            ];
            for (count, hit) in counts.iter_mut().zip(flags) {
                *count += u64::from(hit);
            }
        }

        let commit_total = commits.len() as u64;
        let action_total = counters.total();
        let [bug, refactor, ui, backend, database] = counts;
        Self {
            bug: ratio(bug, commit_total),
            refactor: ratio(refactor, commit_total),
            ui: ratio(ui, commit_total),
            backend: ratio(backend, commit_total),
            database: ratio(database, commit_total),
            test: ratio(counters.tests, action_total),
            deploy: ratio(counters.deploys, action_total),
        }
    }

    /// Ratios in priority order, paired with the class they select
    fn prioritized(&self) -> [(f64, PlayerClass); 7] {
        [
            (self.bug, PlayerClass::DebugDragon),
            (self.test, PlayerClass::TestCleric),
            (self.ui, PlayerClass::FrontendMage),
            (self.backend, PlayerClass::BackendWarrior),
            (self.deploy, PlayerClass::DevOpsWarlock),
            (self.database, PlayerClass::DatabasePaladin),
            (self.refactor, PlayerClass::RefactorMonk),
        ]
    }

    pub fn max(&self) -> f64 {
        self.prioritized()
            .iter()
            .map(|(r, _)| *r)
            .fold(0.0, f64::max)
    }
}

fn ratio(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64
    }
}

/// Pick the class for these ratios; `None` means keep the current class.
pub fn select_class(ratios: &CategoryRatios, rules: &CompiledRules) -> Option<PlayerClass> {
    if let Some((_, class)) = ratios
        .prioritized()
        .into_iter()
        .find(|(r, _)| *r >= rules.dominance_threshold())
    {
        return Some(class);
    }
    if ratios.max() <= rules.generalist_ceiling() {
        return Some(PlayerClass::FullStackDruid);
    }
    None
}

/// Resolve the class for a profile.
///
/// Missing or empty history and the ambiguous band between the generalist
/// ceiling and the dominance threshold both keep `current`. An evolved
/// variant of the selected class (`"Test Cleric Mythic"`) is kept as well.
pub fn classify(
    current: &str,
    counters: &ActionCounters,
    commits: Option<&[CommitRecord]>,
    rules: &CompiledRules,
) -> String {
    let Some(commits) = commits.filter(|c| !c.is_empty()) else {
        return current.to_string();
    };
    let ratios = CategoryRatios::compute(commits, counters, rules);
    match select_class(&ratios, rules) {
        Some(class) if !current.starts_with(class.as_str()) => class.as_str().to_string(),
        _ => current.to_string(),
    }
}
