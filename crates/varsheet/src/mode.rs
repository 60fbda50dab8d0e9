//! Mode selection for cross-collection aliases.
//!
//! When an alias leaves the collection being emitted, the target collection
//! may have several live modes. The [`ModeSelector`] decides which one to read.
//!
//! ## Policy
//!
//! Evaluated in order, first match wins:
//!
//! 1. A single-mode collection always yields its only mode.
//! 2. A categorical collection yields [`ModeChoice::Suppressed`].
//! 3. An explicit override for the collection id picks the mode with that id.
//! 4. A named default for the collection name picks the mode with that name.
//! 5. Otherwise [`ModeChoice::NotFound`].
//!
//! Tiers 3 and 4 yield `NotFound` when the configured mode does not exist;
//! they never fall through to the next tier.

use std::collections::HashMap;

use crate::config::ModeDefaults;
use crate::model::{Collection, Mode};

/// Outcome of mode selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeChoice<'a> {
    /// Read the token's value for this mode.
    Mode(&'a Mode),
    /// The collection is deliberately excluded; omit the token silently.
    Suppressed,
    /// Policy exhausted without a match.
    NotFound,
}

impl<'a> ModeChoice<'a> {
    /// Returns the selected mode, if any.
    pub fn mode(&self) -> Option<&'a Mode> {
        match self {
            ModeChoice::Mode(mode) => Some(mode),
            _ => None,
        }
    }
}

/// Picks a mode of a target collection.
///
/// Built once per generation run from the explicit per-collection overrides
/// (collection id to mode id) and the injected named-defaults table.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use varsheet::{Collection, ModeChoice, ModeDefaults, ModeSelector};
///
/// let selector = ModeSelector::new(
///     HashMap::new(),
///     ModeDefaults::new().with("Color-primitives-day", "WCAG"),
///     vec!["Color-categorical".to_string()],
/// );
///
/// let primitives = Collection::new("c1", "Color-primitives-day")
///     .mode("m1", "Default")
///     .mode("m2", "WCAG");
/// assert_eq!(selector.select(&primitives).mode().map(|m| m.name.as_str()), Some("WCAG"));
///
/// let categorical = Collection::new("c2", "Color-categorical")
///     .mode("m3", "A")
///     .mode("m4", "B");
/// assert_eq!(selector.select(&categorical), ModeChoice::Suppressed);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ModeSelector {
    overrides: HashMap<String, String>,
    defaults: ModeDefaults,
    categorical: Vec<String>,
}

impl ModeSelector {
    pub fn new(
        overrides: HashMap<String, String>,
        defaults: ModeDefaults,
        categorical: Vec<String>,
    ) -> Self {
        Self {
            overrides,
            defaults,
            categorical,
        }
    }

    /// Applies the selection policy to `collection`.
    pub fn select<'a>(&self, collection: &'a Collection) -> ModeChoice<'a> {
        if let [only] = collection.modes.as_slice() {
            return ModeChoice::Mode(only);
        }

        if self.categorical.iter().any(|name| *name == collection.name) {
            return ModeChoice::Suppressed;
        }

        let found = if let Some(mode_id) = self.overrides.get(&collection.id) {
            collection.mode_by_id(mode_id)
        } else if let Some(mode_name) = self.defaults.get(&collection.name) {
            collection.mode_by_name(mode_name)
        } else {
            None
        };

        match found {
            Some(mode) => ModeChoice::Mode(mode),
            None => ModeChoice::NotFound,
        }
    }
}
