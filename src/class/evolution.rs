//! Class evolution for high-level profiles

use crate::profile::Profile;

/// Level at which ascended variants become available
pub const EVOLUTION_LEVEL: u32 = 20;

const VARIANT_SUFFIXES: [&str; 3] = ["Ascendant", "Mythic", "Paragon"];

pub fn can_evolve(profile: &Profile) -> bool {
    profile.level >= EVOLUTION_LEVEL && !is_evolved(&profile.class)
}

/// Whether `class` already carries a variant suffix
pub fn is_evolved(class: &str) -> bool {
    VARIANT_SUFFIXES
        .iter()
        .any(|suffix| class.strip_suffix(suffix).is_some_and(|base| base.ends_with(' ')))
}

/// Ascended variants of the current class; empty below the evolution level
/// or once the class has evolved
pub fn evolution_options(profile: &Profile) -> Vec<String> {
    if !can_evolve(profile) {
        return Vec::new();
    }
    VARIANT_SUFFIXES
        .iter()
        .map(|suffix| format!("{} {}", profile.class, suffix))
        .collect()
}

/// Switch to one of the offered variants. Returns false if `choice` is not on offer.
pub fn evolve(profile: &mut Profile, choice: &str) -> bool {
    if !evolution_options(profile).iter().any(|o| o == choice) {
        return false;
    }
    profile.class = choice.to_string();
    true
}
