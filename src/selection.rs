//! Selection state module.
//!
//! `SelectionState` holds what the player has picked in one calculator:
//! the option per category, the on/off state per toggle and the repeat
//! count per compounding modifier. It is a plain value owned by whoever
//! drives the calculator, and every mutation is checked against the
//! catalog it was created from.

use crate::catalog::{
    CompoundingModifier, Exclusivity, ModifierCatalog, ModifierCategory, ModifierOption,
    SimpleToggle,
};
use crate::error::ModifierError;
use crate::modifier_id::ModifierId;
use std::collections::HashMap;

/// The player's current choices for one catalog.
///
/// # Examples
///
/// ```rust
/// use boostcalc::{presets, SelectionState};
///
/// let catalog = presets::pet_stats();
/// let mut state = SelectionState::new(&catalog);
///
/// state.select_option(&catalog, &"slime".into(), &"slime_red".into()).unwrap();
/// assert_eq!(state.selected(&"slime".into()).unwrap().as_str(), "slime_red");
///
/// // Unknown options are programmer errors.
/// assert!(state.select_option(&catalog, &"slime".into(), &"slime_pink".into()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    catalog: ModifierId,
    /// `None` means the category was explicitly emptied.
    categories: HashMap<ModifierId, Option<ModifierId>>,
    toggles: HashMap<ModifierId, bool>,
    counts: HashMap<ModifierId, u32>,
}

impl SelectionState {
    /// Create a state with every category, toggle and count at its default.
    pub fn new(catalog: &ModifierCatalog) -> Self {
        let mut state = Self {
            catalog: catalog.id().clone(),
            categories: HashMap::new(),
            toggles: HashMap::new(),
            counts: HashMap::new(),
        };
        state.reset(catalog);
        state
    }

    /// Id of the catalog this state was created for.
    pub fn catalog_id(&self) -> &ModifierId {
        &self.catalog
    }

    /// Select `option` in `category`.
    ///
    /// Any other option of the same category is deselected. Other
    /// categories are never touched, even when the UI shows them as one
    /// flattened list.
    ///
    /// # Errors
    ///
    /// `UnknownCategory` if the category does not exist, `InvalidOption`
    /// if the option is not one of its members.
    pub fn select_option(
        &mut self,
        catalog: &ModifierCatalog,
        category: &ModifierId,
        option: &ModifierId,
    ) -> Result<(), ModifierError> {
        let def = Self::checked_option(catalog, category, option)?;
        self.categories.insert(def.id.clone(), Some(option.clone()));
        Ok(())
    }

    /// Uncheck `option` in `category`.
    ///
    /// Only the active option can be unchecked. At-most-one categories
    /// become empty, fallback categories return to their default, and
    /// exactly-one categories keep the option selected.
    ///
    /// # Errors
    ///
    /// Same as [`SelectionState::select_option`].
    pub fn deselect_option(
        &mut self,
        catalog: &ModifierCatalog,
        category: &ModifierId,
        option: &ModifierId,
    ) -> Result<(), ModifierError> {
        let def = Self::checked_option(catalog, category, option)?;
        let is_active = self
            .effective_option(def)
            .is_some_and(|active| &active.id == option);

        if !is_active {
            return Ok(());
        }
        match def.exclusivity {
            Exclusivity::AtMostOne => {
                self.categories.insert(def.id.clone(), None);
            }
            Exclusivity::FallbackToDefault => {
                self.categories.insert(def.id.clone(), def.initial_selection());
            }
            Exclusivity::ExactlyOne => {
                tracing::trace!(
                    category = %category,
                    option = %option,
                    "kept sole selection of exactly-one category"
                );
            }
        }
        Ok(())
    }

    /// Switch a toggle on or off.
    pub fn set_toggle(
        &mut self,
        catalog: &ModifierCatalog,
        toggle: &ModifierId,
        enabled: bool,
    ) -> Result<(), ModifierError> {
        let def = catalog
            .toggle(toggle)
            .ok_or_else(|| ModifierError::UnknownToggle(toggle.clone()))?;
        self.toggles.insert(def.id.clone(), enabled);
        Ok(())
    }

    /// Set a compounding modifier's repeat count.
    ///
    /// Out-of-range counts saturate to the modifier's bounds. Returns the
    /// count actually stored.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use boostcalc::{presets, SelectionState};
    ///
    /// let catalog = presets::grind();
    /// let mut state = SelectionState::new(&catalog);
    /// let friends = "friend_boost".into();
    ///
    /// assert_eq!(state.set_compounding_count(&catalog, &friends, -5).unwrap(), 0);
    /// assert_eq!(state.set_compounding_count(&catalog, &friends, 999).unwrap(), 8);
    /// ```
    pub fn set_compounding_count(
        &mut self,
        catalog: &ModifierCatalog,
        modifier: &ModifierId,
        count: i64,
    ) -> Result<u32, ModifierError> {
        let def = catalog
            .compounding_modifier(modifier)
            .ok_or_else(|| ModifierError::UnknownCompounding(modifier.clone()))?;
        let clamped = def.clamp(count);
        self.counts.insert(def.id.clone(), clamped);
        Ok(clamped)
    }

    /// Return every category, toggle and count to its catalog default.
    pub fn reset(&mut self, catalog: &ModifierCatalog) {
        self.catalog = catalog.id().clone();
        self.categories = catalog
            .categories()
            .iter()
            .map(|c| (c.id.clone(), c.initial_selection()))
            .collect();
        self.toggles = catalog
            .toggles()
            .iter()
            .map(|t| (t.id.clone(), t.default_enabled))
            .collect();
        self.counts = catalog
            .compounding()
            .iter()
            .map(|m| (m.id.clone(), m.default_count))
            .collect();
    }

    /// The option stored for a category, if any.
    pub fn selected(&self, category: &ModifierId) -> Option<&ModifierId> {
        self.categories.get(category).and_then(Option::as_ref)
    }

    /// The stored state of a toggle, if the toggle is known.
    pub fn toggle_enabled(&self, toggle: &ModifierId) -> Option<bool> {
        self.toggles.get(toggle).copied()
    }

    /// The stored count of a compounding modifier, if the modifier is known.
    pub fn compounding_count(&self, modifier: &ModifierId) -> Option<u32> {
        self.counts.get(modifier).copied()
    }

    /// The option that counts for `category` at evaluation time.
    ///
    /// Falls back to the category's initial selection when nothing is
    /// stored or the stored option no longer belongs to the category.
    /// An explicitly emptied at-most-one category yields `None`.
    pub fn effective_option<'c>(
        &self,
        category: &'c ModifierCategory,
    ) -> Option<&'c ModifierOption> {
        let fallback = || {
            category
                .initial_selection()
                .and_then(|id| category.option(&id))
        };

        match self.categories.get(&category.id) {
            Some(Some(id)) => category.option(id).or_else(fallback),
            Some(None) if category.permits_none() => None,
            _ => fallback(),
        }
    }

    /// Whether `toggle` is on, falling back to its default.
    pub fn is_enabled(&self, toggle: &SimpleToggle) -> bool {
        self.toggles
            .get(&toggle.id)
            .copied()
            .unwrap_or(toggle.default_enabled)
    }

    /// Effective repeat count of `modifier`, always within its bounds.
    pub fn count(&self, modifier: &CompoundingModifier) -> u32 {
        let stored = self
            .counts
            .get(&modifier.id)
            .copied()
            .unwrap_or(modifier.default_count);
        modifier.clamp(i64::from(stored))
    }

    fn checked_option<'c>(
        catalog: &'c ModifierCatalog,
        category: &ModifierId,
        option: &ModifierId,
    ) -> Result<&'c ModifierCategory, ModifierError> {
        let def = catalog
            .category(category)
            .ok_or_else(|| ModifierError::UnknownCategory(category.clone()))?;
        if !def.contains(option) {
            return Err(ModifierError::InvalidOption {
                category: category.clone(),
                option: option.clone(),
            });
        }
        Ok(def)
    }
}
