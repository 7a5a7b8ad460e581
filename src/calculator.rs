//! Calculator session module.
//!
//! A `Calculator` is one live calculator view: a shared catalog, the
//! player's selections, the display language and the current raw input.
//! UI events arrive as [`CalculatorEvent`] values and every event is
//! followed by a full recompute, so the returned [`FormatResult`] always
//! reflects the current state.

use crate::breakdown::Evaluation;
use crate::catalog::ModifierCatalog;
use crate::error::ModifierError;
use crate::evaluator::{evaluate, evaluate_detailed};
use crate::format::{format_input, parse_base, FormatResult, Locale};
use crate::modifier_id::ModifierId;
use crate::presets::Preset;
use crate::selection::SelectionState;
use std::sync::Arc;

/// A UI event a calculator view can receive.
#[derive(Debug, Clone, PartialEq)]
pub enum CalculatorEvent {
    /// An option was picked or a tier checkbox was checked.
    SelectOption {
        category: ModifierId,
        option: ModifierId,
    },
    /// A tier checkbox was unchecked.
    DeselectOption {
        category: ModifierId,
        option: ModifierId,
    },
    SetToggle {
        toggle: ModifierId,
        enabled: bool,
    },
    SetCount {
        modifier: ModifierId,
        count: i64,
    },
    /// The `+` button of a compounding counter.
    StepUp(ModifierId),
    /// The `-` button of a compounding counter.
    StepDown(ModifierId),
    /// The base value text changed.
    Input(String),
    Reset,
    /// The app language changed; the view is rebuilt from defaults.
    LanguageChanged(Locale),
}

/// One calculator view.
///
/// # Examples
///
/// ```rust
/// use boostcalc::{Calculator, CalculatorEvent, FormatResult, Locale};
/// use boostcalc::presets::Preset;
///
/// let mut calc = Calculator::from_preset(Preset::RcuPets, Locale::En).unwrap();
/// assert_eq!(calc.handle(CalculatorEvent::Input("1500".into())).unwrap().text(), Some("1,500"));
///
/// let result = calc
///     .handle(CalculatorEvent::SelectOption {
///         category: "rarity".into(),
///         option: "toxic".into(),
///     })
///     .unwrap();
/// assert_eq!(result, FormatResult::Ok { text: "6,000".into() });
/// ```
#[derive(Debug, Clone)]
pub struct Calculator {
    catalog: Arc<ModifierCatalog>,
    state: SelectionState,
    locale: Locale,
    input: String,
}

impl Calculator {
    /// Create a view with default selections and empty input.
    pub fn new(catalog: Arc<ModifierCatalog>, locale: Locale) -> Self {
        let state = SelectionState::new(&catalog);
        Self {
            catalog,
            state,
            locale,
            input: String::new(),
        }
    }

    /// Create a view over a built-in catalog.
    pub fn from_preset(preset: Preset, locale: Locale) -> Result<Self, ModifierError> {
        Ok(Self::new(Arc::new(preset.load()?), locale))
    }

    pub fn catalog(&self) -> &ModifierCatalog {
        &self.catalog
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Apply one event and recompute.
    ///
    /// # Errors
    ///
    /// Returns the selection error for ids the catalog does not know. The
    /// state is unchanged in that case.
    pub fn handle(&mut self, event: CalculatorEvent) -> Result<FormatResult, ModifierError> {
        let catalog = Arc::clone(&self.catalog);
        match event {
            CalculatorEvent::SelectOption { category, option } => {
                self.state.select_option(&catalog, &category, &option)?;
            }
            CalculatorEvent::DeselectOption { category, option } => {
                self.state.deselect_option(&catalog, &category, &option)?;
            }
            CalculatorEvent::SetToggle { toggle, enabled } => {
                self.state.set_toggle(&catalog, &toggle, enabled)?;
            }
            CalculatorEvent::SetCount { modifier, count } => {
                self.state.set_compounding_count(&catalog, &modifier, count)?;
            }
            CalculatorEvent::StepUp(modifier) => {
                let current = self.current_count(&modifier)?;
                self.state
                    .set_compounding_count(&catalog, &modifier, i64::from(current) + 1)?;
            }
            CalculatorEvent::StepDown(modifier) => {
                let current = self.current_count(&modifier)?;
                self.state
                    .set_compounding_count(&catalog, &modifier, i64::from(current) - 1)?;
            }
            CalculatorEvent::Input(raw) => {
                self.input = raw;
            }
            CalculatorEvent::Reset => {
                self.state.reset(&catalog);
            }
            CalculatorEvent::LanguageChanged(locale) => {
                tracing::debug!(
                    catalog = %catalog.id(),
                    from = self.locale.code(),
                    to = locale.code(),
                    "language changed, rebuilding view"
                );
                self.locale = locale;
                self.state.reset(&catalog);
                self.input.clear();
            }
        }
        Ok(self.result())
    }

    /// The formatted result for the current input and state.
    pub fn result(&self) -> FormatResult {
        format_input(&self.input, self.locale, |base| {
            evaluate(base, &self.state, &self.catalog)
        })
    }

    /// Full breakdown for the current input, if it parses.
    pub fn evaluate_detailed(&self) -> Option<Evaluation> {
        parse_base(&self.input).map(|base| evaluate_detailed(base, &self.state, &self.catalog))
    }

    /// Whether the `+` button of `modifier` is enabled.
    pub fn can_step_up(&self, modifier: &ModifierId) -> bool {
        self.catalog
            .compounding_modifier(modifier)
            .is_some_and(|m| self.state.count(m) < m.max_count)
    }

    /// Whether the `-` button of `modifier` is enabled.
    pub fn can_step_down(&self, modifier: &ModifierId) -> bool {
        self.catalog
            .compounding_modifier(modifier)
            .is_some_and(|m| self.state.count(m) > m.min_count)
    }

    fn current_count(&self, modifier: &ModifierId) -> Result<u32, ModifierError> {
        self.catalog
            .compounding_modifier(modifier)
            .map(|m| self.state.count(m))
            .ok_or_else(|| ModifierError::UnknownCompounding(modifier.clone()))
    }
}
