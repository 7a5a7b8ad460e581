//! Modifier catalog module.
//!
//! A catalog is the static rule table of one calculator: its exclusive
//! categories, independent toggles and compounding modifiers. Catalogs are
//! validated once at construction and are immutable afterwards; every
//! lookup is by id and every iteration follows declaration order, which is
//! also the order the evaluator multiplies in.

use crate::error::ModifierError;
use crate::modifier_id::ModifierId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Read;

/// How many options of a category may be selected at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Exclusivity {
    /// Always exactly one option. Deselecting the active option keeps it
    /// selected.
    #[default]
    ExactlyOne,
    /// Zero or one option. Deselecting the active option leaves the
    /// category empty.
    AtMostOne,
    /// Always exactly one option. Deselecting the active option switches
    /// back to the category default.
    FallbackToDefault,
}

/// One selectable option of a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierOption {
    pub id: ModifierId,
    pub multiplier: f64,
    /// Label the UI shows next to the option, e.g. `"3.15x"` or `"+30%"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

impl ModifierOption {
    pub fn new(id: impl Into<ModifierId>, multiplier: f64) -> Self {
        Self {
            id: id.into(),
            multiplier,
            display: None,
        }
    }

    /// Attach the label the UI displays for this option.
    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }
}

/// A named group of mutually exclusive options.
///
/// # Examples
///
/// ```rust
/// use boostcalc::catalog::{Exclusivity, ModifierCategory, ModifierOption};
///
/// let mutation = ModifierCategory::new(
///     "mutation",
///     vec![
///         ModifierOption::new("mutation_ghost", 2.0),
///         ModifierOption::new("mutation_cosmic", 2.5),
///     ],
/// )
/// .with_default("mutation_cosmic");
///
/// assert_eq!(mutation.exclusivity, Exclusivity::ExactlyOne);
/// assert_eq!(mutation.initial_selection().unwrap().as_str(), "mutation_cosmic");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierCategory {
    pub id: ModifierId,
    #[serde(default)]
    pub exclusivity: Exclusivity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<ModifierId>,
    pub options: Vec<ModifierOption>,
}

impl ModifierCategory {
    /// Create an exactly-one category without a declared default.
    pub fn new(id: impl Into<ModifierId>, options: Vec<ModifierOption>) -> Self {
        Self {
            id: id.into(),
            exclusivity: Exclusivity::ExactlyOne,
            default: None,
            options,
        }
    }

    /// Create an at-most-one category, as used for flattened tier lists.
    pub fn at_most_one(id: impl Into<ModifierId>, options: Vec<ModifierOption>) -> Self {
        Self {
            exclusivity: Exclusivity::AtMostOne,
            ..Self::new(id, options)
        }
    }

    pub fn with_exclusivity(mut self, exclusivity: Exclusivity) -> Self {
        self.exclusivity = exclusivity;
        self
    }

    pub fn with_default(mut self, option: impl Into<ModifierId>) -> Self {
        self.default = Some(option.into());
        self
    }

    /// Look up an option by id.
    pub fn option(&self, id: &ModifierId) -> Option<&ModifierOption> {
        self.options.iter().find(|o| &o.id == id)
    }

    pub fn contains(&self, id: &ModifierId) -> bool {
        self.option(id).is_some()
    }

    /// Whether this category may have no option selected.
    pub fn permits_none(&self) -> bool {
        self.exclusivity == Exclusivity::AtMostOne
    }

    /// The selection a fresh state starts with.
    ///
    /// Categories that always hold an option start on their first option
    /// when no default is declared.
    pub fn initial_selection(&self) -> Option<ModifierId> {
        match self.exclusivity {
            Exclusivity::ExactlyOne | Exclusivity::FallbackToDefault => self
                .default
                .clone()
                .or_else(|| self.options.first().map(|o| o.id.clone())),
            Exclusivity::AtMostOne => self.default.clone(),
        }
    }
}

/// An independently switchable boolean modifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleToggle {
    pub id: ModifierId,
    pub multiplier: f64,
    #[serde(default)]
    pub default_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

impl SimpleToggle {
    pub fn new(id: impl Into<ModifierId>, multiplier: f64, default_enabled: bool) -> Self {
        Self {
            id: id.into(),
            multiplier,
            default_enabled,
            display: None,
        }
    }

    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }
}

/// A modifier applied a variable number of times in sequence.
///
/// # Examples
///
/// ```rust
/// use boostcalc::catalog::CompoundingModifier;
///
/// let friends = CompoundingModifier::new("friend_boost", 1.15, 0, 8, 8);
/// assert_eq!(friends.clamp(-5), 0);
/// assert_eq!(friends.clamp(3), 3);
/// assert_eq!(friends.clamp(999), 8);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundingModifier {
    pub id: ModifierId,
    pub per_step: f64,
    #[serde(default)]
    pub min_count: u32,
    pub max_count: u32,
    pub default_count: u32,
}

impl CompoundingModifier {
    pub fn new(
        id: impl Into<ModifierId>,
        per_step: f64,
        min_count: u32,
        max_count: u32,
        default_count: u32,
    ) -> Self {
        Self {
            id: id.into(),
            per_step,
            min_count,
            max_count,
            default_count,
        }
    }

    /// Saturate a requested count into `[min_count, max_count]`.
    pub fn clamp(&self, count: i64) -> u32 {
        count
            .max(i64::from(self.min_count))
            .min(i64::from(self.max_count)) as u32
    }
}

/// A label whose implied multiplier disagrees with the coded one.
///
/// The coded multiplier is authoritative; these are reported so the UI
/// layer can fix its text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayMismatch {
    pub modifier: ModifierId,
    pub display: String,
    pub coded: f64,
    pub displayed: f64,
}

#[derive(Deserialize)]
struct CatalogDef {
    id: String,
    #[serde(default = "default_version")]
    version: u32,
    #[serde(default)]
    categories: Vec<ModifierCategory>,
    #[serde(default)]
    toggles: Vec<SimpleToggle>,
    #[serde(default)]
    compounding: Vec<CompoundingModifier>,
}

fn default_version() -> u32 {
    1
}

/// Validated, immutable rule table for one calculator.
///
/// # Examples
///
/// ```rust
/// use boostcalc::catalog::{ModifierCatalog, ModifierCategory, ModifierOption, SimpleToggle};
///
/// let catalog = ModifierCatalog::new(
///     "tiny",
///     vec![ModifierCategory::new("size", vec![ModifierOption::new("big", 1.5)])],
///     vec![SimpleToggle::new("shiny", 1.15, false)],
///     vec![],
/// )
/// .unwrap();
///
/// assert_eq!(catalog.categories().len(), 1);
/// assert!(catalog.toggle(&"shiny".into()).is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ModifierCatalog {
    id: ModifierId,
    version: u32,
    categories: Vec<ModifierCategory>,
    toggles: Vec<SimpleToggle>,
    compounding: Vec<CompoundingModifier>,
    display_mismatches: Vec<DisplayMismatch>,
}

impl ModifierCatalog {
    /// Build and validate a catalog.
    ///
    /// # Errors
    ///
    /// Returns `ModifierError::InvalidCatalog` if a category is empty, a
    /// multiplier is not a positive finite number, a default option does
    /// not exist, a compounding default lies outside its range, or an id
    /// is blank or duplicated.
    pub fn new(
        id: impl Into<ModifierId>,
        categories: Vec<ModifierCategory>,
        toggles: Vec<SimpleToggle>,
        compounding: Vec<CompoundingModifier>,
    ) -> Result<Self, ModifierError> {
        let mut catalog = Self {
            id: id.into(),
            version: default_version(),
            categories,
            toggles,
            compounding,
            display_mismatches: Vec::new(),
        };
        catalog.validate()?;
        catalog.display_mismatches = catalog.collect_display_mismatches();
        for mismatch in &catalog.display_mismatches {
            tracing::warn!(
                catalog = %catalog.id,
                modifier = %mismatch.modifier,
                display = %mismatch.display,
                coded = mismatch.coded,
                displayed = mismatch.displayed,
                "display text disagrees with coded multiplier"
            );
        }
        Ok(catalog)
    }

    /// Parse and validate a catalog from JSON.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use boostcalc::catalog::ModifierCatalog;
    ///
    /// let catalog = ModifierCatalog::from_json_str(r#"{
    ///     "id": "rarity",
    ///     "categories": [{
    ///         "id": "rarity",
    ///         "default": "normal",
    ///         "options": [{ "id": "normal", "multiplier": 1 }, { "id": "golden", "multiplier": 2 }]
    ///     }]
    /// }"#).unwrap();
    ///
    /// assert_eq!(catalog.id().as_str(), "rarity");
    /// assert_eq!(catalog.version(), 1);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, ModifierError> {
        let def: CatalogDef = serde_json::from_str(json).map_err(|e| malformed(&e))?;
        Self::from_def(def)
    }

    /// Parse and validate a catalog from any JSON reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ModifierError> {
        let def: CatalogDef = serde_json::from_reader(reader).map_err(|e| malformed(&e))?;
        Self::from_def(def)
    }

    fn from_def(def: CatalogDef) -> Result<Self, ModifierError> {
        let mut catalog = Self::new(def.id, def.categories, def.toggles, def.compounding)?;
        catalog.version = def.version;
        Ok(catalog)
    }

    pub fn id(&self) -> &ModifierId {
        &self.id
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn categories(&self) -> &[ModifierCategory] {
        &self.categories
    }

    pub fn toggles(&self) -> &[SimpleToggle] {
        &self.toggles
    }

    pub fn compounding(&self) -> &[CompoundingModifier] {
        &self.compounding
    }

    pub fn category(&self, id: &ModifierId) -> Option<&ModifierCategory> {
        self.categories.iter().find(|c| &c.id == id)
    }

    pub fn toggle(&self, id: &ModifierId) -> Option<&SimpleToggle> {
        self.toggles.iter().find(|t| &t.id == id)
    }

    pub fn compounding_modifier(&self, id: &ModifierId) -> Option<&CompoundingModifier> {
        self.compounding.iter().find(|c| &c.id == id)
    }

    /// Labels whose text implies a different multiplier than the coded one.
    pub fn display_mismatches(&self) -> &[DisplayMismatch] {
        &self.display_mismatches
    }

    fn validate(&self) -> Result<(), ModifierError> {
        let fail = |reason: String| Err(ModifierError::invalid_catalog(self.id.as_str(), reason));

        if self.id.is_empty() {
            return fail("catalog id is blank".to_string());
        }

        let mut category_ids = HashSet::new();
        for category in &self.categories {
            if category.id.is_empty() {
                return fail("category id is blank".to_string());
            }
            if !category_ids.insert(&category.id) {
                return fail(format!("duplicate category {}", category.id));
            }
            if category.options.is_empty() {
                return fail(format!("category {} has no options", category.id));
            }

            let mut option_ids = HashSet::new();
            for option in &category.options {
                if option.id.is_empty() {
                    return fail(format!("category {} has an option with a blank id", category.id));
                }
                if !option_ids.insert(&option.id) {
                    return fail(format!(
                        "duplicate option {} in category {}",
                        option.id, category.id
                    ));
                }
                if !is_positive_finite(option.multiplier) {
                    return fail(format!(
                        "option {} in category {} has non-positive multiplier {}",
                        option.id, category.id, option.multiplier
                    ));
                }
            }

            if let Some(default) = &category.default {
                if !category.contains(default) {
                    return fail(format!(
                        "default option {} is not in category {}",
                        default, category.id
                    ));
                }
            }
        }

        let mut toggle_ids = HashSet::new();
        for toggle in &self.toggles {
            if toggle.id.is_empty() {
                return fail("toggle id is blank".to_string());
            }
            if !toggle_ids.insert(&toggle.id) {
                return fail(format!("duplicate toggle {}", toggle.id));
            }
            if !is_positive_finite(toggle.multiplier) {
                return fail(format!(
                    "toggle {} has non-positive multiplier {}",
                    toggle.id, toggle.multiplier
                ));
            }
        }

        let mut compounding_ids = HashSet::new();
        for modifier in &self.compounding {
            if modifier.id.is_empty() {
                return fail("compounding modifier id is blank".to_string());
            }
            if !compounding_ids.insert(&modifier.id) {
                return fail(format!("duplicate compounding modifier {}", modifier.id));
            }
            if !is_positive_finite(modifier.per_step) {
                return fail(format!(
                    "compounding modifier {} has non-positive step {}",
                    modifier.id, modifier.per_step
                ));
            }
            if !(modifier.min_count <= modifier.default_count
                && modifier.default_count <= modifier.max_count)
            {
                return fail(format!(
                    "compounding modifier {} needs min <= default <= max, got {} / {} / {}",
                    modifier.id, modifier.min_count, modifier.default_count, modifier.max_count
                ));
            }
        }

        Ok(())
    }

    fn collect_display_mismatches(&self) -> Vec<DisplayMismatch> {
        let labelled = self
            .categories
            .iter()
            .flat_map(|c| c.options.iter())
            .map(|o| (&o.id, o.multiplier, o.display.as_deref()))
            .chain(
                self.toggles
                    .iter()
                    .map(|t| (&t.id, t.multiplier, t.display.as_deref())),
            );

        let mut mismatches = Vec::new();
        for (id, coded, label) in labelled {
            let Some(label) = label else { continue };
            match implied_multiplier(label) {
                Some(displayed) if !same_multiplier(coded, displayed) => {
                    mismatches.push(DisplayMismatch {
                        modifier: id.clone(),
                        display: label.to_string(),
                        coded,
                        displayed,
                    });
                }
                Some(_) => {}
                None => tracing::debug!(modifier = %id, label, "unparseable display label"),
            }
        }
        mismatches
    }
}

fn malformed(err: &serde_json::Error) -> ModifierError {
    ModifierError::invalid_catalog("<json>", format!("malformed data: {}", err))
}

fn is_positive_finite(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn same_multiplier(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(1.0)
}

/// Multiplier implied by a UI label: `"2.5x"`, `"x1.15"`, `"×2"`, `"+30%"`.
fn implied_multiplier(label: &str) -> Option<f64> {
    let label = label
        .trim()
        .trim_start_matches('(')
        .trim_end_matches(')')
        .trim();

    let implied = if let Some(percent) = label.strip_suffix('%') {
        let percent = percent.trim();
        let percent = percent.strip_prefix('+').unwrap_or(percent);
        1.0 + percent.parse::<f64>().ok()? / 100.0
    } else {
        let is_times = |c: char| c == 'x' || c == 'X' || c == '×';
        let number = label
            .strip_prefix(is_times)
            .or_else(|| label.strip_suffix(is_times))?;
        number.trim().parse::<f64>().ok()?
    };

    is_positive_finite(implied).then_some(implied)
}
