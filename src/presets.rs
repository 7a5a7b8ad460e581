//! Built-in catalogs.
//!
//! The calculators share one engine and differ only in data. Their
//! catalogs ship as JSON embedded at build time.

use crate::catalog::ModifierCatalog;
use crate::error::ModifierError;

/// A built-in calculator catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// Pet stat calculator: slime, mutation, evolution and type, plus the
    /// shiny and max level toggles.
    PetStats,
    /// Grind calculator: TP, donut and cookie tiers, five boosts and the
    /// friend boost.
    Grind,
    /// RCU pets calculator: one rarity plus shiny.
    RcuPets,
    /// Arm calculator: one golden tier out of five.
    Arm,
}

impl Preset {
    pub const ALL: [Preset; 4] = [Preset::PetStats, Preset::Grind, Preset::RcuPets, Preset::Arm];

    pub fn id(self) -> &'static str {
        match self {
            Preset::PetStats => "pet_stats",
            Preset::Grind => "grind",
            Preset::RcuPets => "rcu_pets",
            Preset::Arm => "arm",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.id() == id)
    }

    fn source(self) -> &'static str {
        match self {
            Preset::PetStats => include_str!("../data/catalogs/pet_stats.json"),
            Preset::Grind => include_str!("../data/catalogs/grind.json"),
            Preset::RcuPets => include_str!("../data/catalogs/rcu_pets.json"),
            Preset::Arm => include_str!("../data/catalogs/arm.json"),
        }
    }

    /// Parse and validate this preset's catalog.
    pub fn load(self) -> Result<ModifierCatalog, ModifierError> {
        ModifierCatalog::from_json_str(self.source())
    }
}

fn load_builtin(preset: Preset) -> ModifierCatalog {
    preset
        .load()
        .unwrap_or_else(|e| panic!("built-in catalog {} is invalid: {}", preset.id(), e))
}

/// The pet stat calculator catalog.
///
/// # Panics
///
/// Panics if the embedded data is invalid, which the test suite rules out.
pub fn pet_stats() -> ModifierCatalog {
    load_builtin(Preset::PetStats)
}

/// The grind calculator catalog.
///
/// # Panics
///
/// Panics if the embedded data is invalid, which the test suite rules out.
pub fn grind() -> ModifierCatalog {
    load_builtin(Preset::Grind)
}

/// The RCU pets calculator catalog.
///
/// # Panics
///
/// Panics if the embedded data is invalid, which the test suite rules out.
pub fn rcu_pets() -> ModifierCatalog {
    load_builtin(Preset::RcuPets)
}

/// The arm calculator catalog.
///
/// # Panics
///
/// Panics if the embedded data is invalid, which the test suite rules out.
pub fn arm() -> ModifierCatalog {
    load_builtin(Preset::Arm)
}
