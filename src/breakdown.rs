//! Evaluation breakdown module.
//!
//! Contains the `Evaluation` type, the final value of one evaluation
//! together with every factor that contributed to it.

use crate::modifier_id::ModifierId;
use serde::Serialize;

/// Phase a factor was applied in.
///
/// Flat factors are folded into one multiplier before the base is
/// touched; compounding steps are applied to the running value afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Flat,
    Compounding,
}

/// The result of one evaluation with a full breakdown.
///
/// # Examples
///
/// ```rust
/// use boostcalc::breakdown::Evaluation;
///
/// let mut eval = Evaluation::new("grind".into(), 100.0);
/// eval.add_factor("member".into(), 2.0);
/// eval.apply_flat();
/// eval.add_step("friend_boost".into(), 1.15);
///
/// assert_eq!(eval.multiplier, 2.0);
/// assert_eq!(eval.value, 200.0 * 1.15);
/// assert_eq!(eval.steps.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    /// Catalog the evaluation ran against.
    pub catalog: ModifierId,

    pub base: f64,

    /// Product of every flat factor.
    pub multiplier: f64,

    /// The final value.
    pub value: f64,

    /// Flat factors in application order, as `(option or toggle, multiplier)`.
    pub factors: Vec<(ModifierId, f64)>,

    /// Compounding steps in application order, as
    /// `(modifier, value_after_step)`.
    pub steps: Vec<(ModifierId, f64)>,
}

impl Evaluation {
    pub fn new(catalog: ModifierId, base: f64) -> Self {
        Self {
            catalog,
            base,
            multiplier: 1.0,
            value: base,
            factors: Vec::new(),
            steps: Vec::new(),
        }
    }

    /// Fold a flat factor into the multiplier.
    pub fn add_factor(&mut self, modifier: ModifierId, multiplier: f64) {
        self.multiplier *= multiplier;
        self.factors.push((modifier, multiplier));
    }

    /// Apply the accumulated flat multiplier to the base.
    pub fn apply_flat(&mut self) {
        self.value = self.base * self.multiplier;
    }

    /// Apply one compounding step to the running value.
    pub fn add_step(&mut self, modifier: ModifierId, per_step: f64) {
        self.value *= per_step;
        self.steps.push((modifier, self.value));
    }

    /// Iterate over every recorded entry with its phase.
    pub fn entries(&self) -> impl Iterator<Item = (Phase, &ModifierId, f64)> + '_ {
        self.factors
            .iter()
            .map(|(id, m)| (Phase::Flat, id, *m))
            .chain(self.steps.iter().map(|(id, v)| (Phase::Compounding, id, *v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_identity() {
        let eval = Evaluation::new("pet_stats".into(), 42.5);
        assert_eq!(eval.value, 42.5);
        assert_eq!(eval.multiplier, 1.0);
        assert!(eval.factors.is_empty());
        assert!(eval.steps.is_empty());
    }

    #[test]
    fn test_factors_keep_order() {
        let mut eval = Evaluation::new("pet_stats".into(), 10.0);
        eval.add_factor("slime_shock".into(), 3.15);
        eval.add_factor("shiny".into(), 1.15);
        eval.apply_flat();

        assert_eq!(eval.factors[0].0, "slime_shock");
        assert_eq!(eval.factors[1].0, "shiny");
        assert_eq!(eval.multiplier, 1.0 * 3.15 * 1.15);
        assert_eq!(eval.value, 10.0 * (1.0 * 3.15 * 1.15));
    }

    #[test]
    fn test_steps_record_running_value() {
        let mut eval = Evaluation::new("grind".into(), 1000.0);
        eval.apply_flat();
        eval.add_step("friend_boost".into(), 1.15);
        eval.add_step("friend_boost".into(), 1.15);

        assert_eq!(eval.steps[0].1, 1000.0 * 1.15);
        assert_eq!(eval.steps[1].1, 1000.0 * 1.15 * 1.15);

        let phases: Vec<Phase> = eval.entries().map(|(phase, _, _)| phase).collect();
        assert_eq!(phases, vec![Phase::Compounding, Phase::Compounding]);
    }
}
