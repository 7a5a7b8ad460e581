//! Error types for catalogs and selections.
//!
//! Everything that can go wrong is a programmer or configuration error and
//! is represented by `ModifierError`. Bad user input is not an error; see
//! [`crate::format::FormatResult`].

use crate::modifier_id::ModifierId;
use thiserror::Error;

/// Errors raised by catalog construction and selection mutations.
///
/// # Examples
///
/// ```rust
/// use boostcalc::{ModifierError, ModifierId};
///
/// let err = ModifierError::InvalidOption {
///     category: ModifierId::from_str("slime"),
///     option: ModifierId::from_str("slime_pink"),
/// };
/// assert_eq!(err.to_string(), "Invalid option slime_pink for category slime");
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModifierError {
    /// Catalog data failed to parse or validate.
    ///
    /// Raised once, at construction. An engine must never run with a
    /// catalog that produced this error.
    #[error("Invalid catalog {catalog}: {reason}")]
    InvalidCatalog { catalog: String, reason: String },

    /// The category id is not part of the catalog.
    #[error("Unknown category: {0}")]
    UnknownCategory(ModifierId),

    /// The option id is not a member of the named category.
    #[error("Invalid option {option} for category {category}")]
    InvalidOption {
        category: ModifierId,
        option: ModifierId,
    },

    /// The toggle id is not part of the catalog.
    #[error("Unknown toggle: {0}")]
    UnknownToggle(ModifierId),

    /// The compounding modifier id is not part of the catalog.
    #[error("Unknown compounding modifier: {0}")]
    UnknownCompounding(ModifierId),
}

impl ModifierError {
    pub(crate) fn invalid_catalog(catalog: impl Into<String>, reason: impl Into<String>) -> Self {
        ModifierError::InvalidCatalog {
            catalog: catalog.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ModifierError::UnknownToggle(ModifierId::from_str("turbo"));
        assert!(err.to_string().contains("turbo"));
    }

    #[test]
    fn test_invalid_catalog_display() {
        let err = ModifierError::invalid_catalog("grind", "category tp has no options");
        let display = err.to_string();
        assert!(display.contains("Invalid catalog grind"));
        assert!(display.contains("tp has no options"));
    }
}
