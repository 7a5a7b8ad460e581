//! Identifiers for catalog entries.
//!
//! Catalogs, categories, options, toggles and compounding modifiers all
//! share one id namespace type. Ids appear in catalog JSON as plain
//! strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Id of a catalog or anything inside one, such as `"slime_shock"` or
/// `"friend_boost"`.
///
/// Cloning is a reference count bump, so selection state and breakdowns
/// can keep their own copies without borrowing from the catalog.
///
/// ```rust
/// use boostcalc::ModifierId;
///
/// let shock: ModifierId = "slime_shock".into();
/// assert_eq!(shock, "slime_shock");
/// assert_eq!(shock, ModifierId::from(String::from("slime_shock")));
/// ```
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ModifierId(Arc<str>);

impl ModifierId {
    pub fn from_str(s: &str) -> Self {
        Self(Arc::from(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for ids that are empty or only whitespace.
    pub(crate) fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for ModifierId {
    fn from(s: &str) -> Self {
        Self::from_str(s)
    }
}

impl From<String> for ModifierId {
    fn from(s: String) -> Self {
        Self(s.into())
    }
}

impl From<ModifierId> for String {
    fn from(id: ModifierId) -> Self {
        id.0.to_string()
    }
}

impl PartialEq<str> for ModifierId {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for ModifierId {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl fmt::Display for ModifierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
