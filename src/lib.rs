//! # boostcalc - Modifier Composition Engine for Game Calculators
//!
//! Turns a base stat value into a boosted final value from the modifiers a
//! player picked:
//! - **Categories**: groups of mutually exclusive options (slime variant,
//!   mutation, TP tier, ...)
//! - **Toggles**: independent on/off boosts (shiny, premium, ...)
//! - **Compounding modifiers**: a factor applied 0..=N times in sequence
//!   (friend boost)
//!
//! ## Pipeline
//!
//! ```text
//! [ModifierCatalog] → [SelectionState] → evaluate() → format_input()
//! ```
//!
//! 1. A **catalog** is static, validated rule data, one per calculator
//! 2. A **selection state** holds the player's picks and enforces exclusivity
//! 3. **evaluate** folds the flat multipliers, then runs compounding steps
//! 4. **format_input** turns a raw input into empty / invalid / a
//!    localized number
//!
//! ## Example
//!
//! ```rust
//! use boostcalc::*;
//!
//! let catalog = presets::pet_stats();
//! let state = SelectionState::new(&catalog);
//!
//! // Defaults: shock, cosmic, goliath, pristine, shiny, max level.
//! let value = evaluate(100.0, &state, &catalog);
//! assert_eq!(value, 100.0 * (1.0 * 3.15 * 2.5 * 2.5 * 2.17 * 1.15 * 2.2388));
//!
//! let shown = format_input("100", Locale::En, |base| evaluate(base, &state, &catalog));
//! assert!(matches!(shown, FormatResult::Ok { .. }));
//! ```
//!
//! ## Modules
//!
//! - [`modifier_id`] - Identifier type
//! - [`catalog`] - Categories, toggles, compounding modifiers
//! - [`presets`] - Built-in calculator catalogs
//! - [`selection`] - Player selections
//! - [`evaluator`] - The evaluation algorithm
//! - [`breakdown`] - Evaluation breakdowns
//! - [`format`] - Input parsing and number formatting
//! - [`calculator`] - One calculator view driven by UI events
//! - [`error`] - Error types

pub mod breakdown;
pub mod calculator;
pub mod catalog;
pub mod error;
pub mod evaluator;
pub mod format;
pub mod modifier_id;
pub mod presets;
pub mod selection;

// Re-export main types for convenience
pub use breakdown::{Evaluation, Phase};
pub use calculator::{Calculator, CalculatorEvent};
pub use catalog::{
    CompoundingModifier, DisplayMismatch, Exclusivity, ModifierCatalog, ModifierCategory,
    ModifierOption, SimpleToggle,
};
pub use error::ModifierError;
pub use evaluator::{evaluate, evaluate_detailed};
pub use format::{format_input, format_value, parse_base, FormatResult, Locale};
pub use modifier_id::ModifierId;
pub use selection::SelectionState;
