//! Evaluator module.
//!
//! Turns a base value into a final value:
//!
//! ```text
//! multiplier = 1 × option of each category × each enabled toggle
//! value      = base × multiplier
//! value      = value × per_step   (count times, per compounding modifier)
//! ```
//!
//! Compounding always runs after the flat multiplier and is applied one
//! step at a time, so results match the step-by-step reference bit for bit.

use crate::breakdown::Evaluation;
use crate::catalog::ModifierCatalog;
use crate::selection::SelectionState;

/// Evaluate `base` under `state`.
///
/// # Examples
///
/// ```rust
/// use boostcalc::{evaluate, presets, SelectionState};
///
/// let catalog = presets::rcu_pets();
/// let mut state = SelectionState::new(&catalog);
/// assert_eq!(evaluate(10.0, &state, &catalog), 10.0);
///
/// state.select_option(&catalog, &"rarity".into(), &"galaxy".into()).unwrap();
/// state.set_toggle(&catalog, &"shiny".into(), true).unwrap();
/// assert_eq!(evaluate(10.0, &state, &catalog), 120.0);
/// ```
pub fn evaluate(base: f64, state: &SelectionState, catalog: &ModifierCatalog) -> f64 {
    evaluate_detailed(base, state, catalog).value
}

/// Evaluate `base` under `state` and keep every factor and step.
pub fn evaluate_detailed(
    base: f64,
    state: &SelectionState,
    catalog: &ModifierCatalog,
) -> Evaluation {
    let mut eval = Evaluation::new(catalog.id().clone(), base);

    for category in catalog.categories() {
        if let Some(option) = state.effective_option(category) {
            eval.add_factor(option.id.clone(), option.multiplier);
        }
    }

    for toggle in catalog.toggles() {
        if state.is_enabled(toggle) {
            eval.add_factor(toggle.id.clone(), toggle.multiplier);
        }
    }

    eval.apply_flat();

    for modifier in catalog.compounding() {
        for _ in 0..state.count(modifier) {
            eval.add_step(modifier.id.clone(), modifier.per_step);
        }
    }

    tracing::debug!(
        catalog = %eval.catalog,
        base = eval.base,
        multiplier = eval.multiplier,
        steps = eval.steps.len(),
        value = eval.value,
        "evaluated"
    );

    eval
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CompoundingModifier, ModifierCategory, ModifierOption, SimpleToggle};

    fn catalog() -> ModifierCatalog {
        ModifierCatalog::new(
            "test",
            vec![ModifierCategory::at_most_one(
                "tp",
                vec![ModifierOption::new("tp1", 1.3), ModifierOption::new("tp3", 1.9)],
            )],
            vec![SimpleToggle::new("member", 2.0, false)],
            vec![CompoundingModifier::new("friend_boost", 1.15, 0, 8, 0)],
        )
        .unwrap()
    }

    #[test]
    fn test_identity() {
        let catalog = catalog();
        let state = SelectionState::new(&catalog);

        for base in [0.0, 1.0, -3.5, 123456.789, 1e-12] {
            assert_eq!(evaluate(base, &state, &catalog), base);
        }
    }

    #[test]
    fn test_flat_then_compounding() {
        let catalog = catalog();
        let mut state = SelectionState::new(&catalog);
        state.select_option(&catalog, &"tp".into(), &"tp3".into()).unwrap();
        state.set_toggle(&catalog, &"member".into(), true).unwrap();
        state.set_compounding_count(&catalog, &"friend_boost".into(), 2).unwrap();

        let eval = evaluate_detailed(50.0, &state, &catalog);
        let flat = 1.0 * 1.9 * 2.0;
        assert_eq!(eval.multiplier, flat);
        assert_eq!(eval.value, 50.0 * flat * 1.15 * 1.15);
        assert_eq!(eval.factors.len(), 2);
        assert_eq!(eval.steps.len(), 2);
        assert_eq!(evaluate(50.0, &state, &catalog), eval.value);
    }

    #[test]
    fn test_emptied_category_contributes_nothing() {
        let catalog = catalog();
        let mut state = SelectionState::new(&catalog);
        state.select_option(&catalog, &"tp".into(), &"tp1".into()).unwrap();
        state.deselect_option(&catalog, &"tp".into(), &"tp1".into()).unwrap();

        assert_eq!(evaluate(7.0, &state, &catalog), 7.0);
    }
}
