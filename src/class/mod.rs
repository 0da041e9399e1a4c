//! Player classes
//!
//! A class describes the dominant kind of work in a repository's history:
//! each commit is tagged by subject keywords and touched paths, tags are
//! turned into ratios, and the first ratio to reach the dominance threshold
//! (in fixed priority order) selects the class.

mod classifier;
mod evolution;
mod history;
mod rules;

pub use classifier::{CategoryRatios, PlayerClass, classify, select_class};
pub use evolution::{EVOLUTION_LEVEL, can_evolve, evolution_options, evolve, is_evolved};
pub use history::{CommitHistory, CommitRecord, FixedHistory, GitLog, parse_log};
pub use rules::{ClassifierRules, CompiledRules};
