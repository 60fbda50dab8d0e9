//! Generator configuration.
//!
//! Everything the generator knows about a particular design system lives
//! here rather than in code: which collection is the palette, which
//! collections get per-mode classes or a pinned mode, which mode to read
//! from a multi-mode collection that an alias crosses into, and the static
//! payloads spliced into the output.
//!
//! [`GeneratorConfig::default`] reproduces the built-in design system. A YAML
//! file can override any subset of fields. Fields missing from the file keep
//! their defaults, but a field that is present is taken whole: a
//! `mode_defaults` table or a `pinned` list replaces the built-in one rather
//! than adding to it, so list every entry you need:
//!
//! ```yaml
//! palette:
//!   collection: Palette
//!   theme_attribute: data-obc-theme
//! mode_defaults:
//!   Brand-colors: Default
//!   Color-primitives-day: WCAG
//!   Color-primitives-night: WCAG
//! pinned:
//!   - { collection: Spacing, mode: Regular }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::assets;
use crate::error::LoadError;

/// Preferred mode name per collection name.
///
/// Consulted by the [`ModeSelector`](crate::ModeSelector) when an alias
/// crosses into a multi-mode collection that has no explicit override.
///
/// # Example
///
/// ```rust
/// use varsheet::ModeDefaults;
///
/// let defaults = ModeDefaults::new()
///     .with("Color-primitives-day", "WCAG")
///     .with("dusk-configuration", "v2");
/// assert_eq!(defaults.get("Color-primitives-day"), Some("WCAG"));
/// assert_eq!(defaults.get("Palette"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModeDefaults(BTreeMap<String, String>);

impl ModeDefaults {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The table shipped with the built-in design system.
    pub fn builtin() -> Self {
        Self::new()
            .with("Palette-night-config", "Default")
            .with("Palette-dusk-configuration", "v2")
            .with("Palette-day-configuration", "Regular")
            .with("Color-primitives-dusk", "WCAG 6.1")
            .with("Color-primitives-day", "WCAG")
            .with("Color-primitives-night", "WCAG")
            .with("dusk-configuration", "v2")
    }

    /// Adds or replaces an entry. Returns self for chaining.
    pub fn with(mut self, collection: impl Into<String>, mode: impl Into<String>) -> Self {
        self.0.insert(collection.into(), mode.into());
        self
    }

    /// Returns the preferred mode name for a collection name.
    pub fn get(&self, collection: &str) -> Option<&str> {
        self.0.get(collection).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Settings for the theme-scoped palette blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    /// Name of the palette collection.
    pub collection: String,
    /// Attribute on `:root` selecting the theme, e.g. `data-theme`.
    pub theme_attribute: String,
    /// Lower-cased mode name that plain `:root` also selects.
    pub default_theme: String,
    /// Static declarations opening each theme block, by lower-cased mode name.
    pub preamble: HashMap<String, String>,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            collection: "Palette".to_string(),
            theme_attribute: "data-theme".to_string(),
            default_theme: "day".to_string(),
            preamble: assets::THEME_ICONS
                .iter()
                .map(|(theme, css)| (theme.to_string(), css.to_string()))
                .collect(),
        }
    }
}

/// A collection emitted as one class block per mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchableCollection {
    pub collection: String,
    /// Selector prefix; the lower-cased mode name is appended.
    pub class_prefix: String,
    /// Lower-cased mode name that plain `:root` also selects.
    #[serde(default)]
    pub default_mode: Option<String>,
}

/// A collection flattened into the shared block at a single mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinnedCollection {
    pub collection: String,
    /// Mode to read when the collection has more than one.
    pub mode: String,
}

impl PinnedCollection {
    pub fn new(collection: impl Into<String>, mode: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            mode: mode.into(),
        }
    }
}

/// Complete generator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub palette: PaletteConfig,
    /// Collections whose values are per-instance choices; aliases into them
    /// are suppressed rather than resolved.
    pub categorical_collections: Vec<String>,
    pub mode_defaults: ModeDefaults,
    pub switchable: Vec<SwitchableCollection>,
    pub pinned: Vec<PinnedCollection>,
    /// Display names substituted for raw font slugs in string values.
    pub font_names: BTreeMap<String, String>,
    /// Static declarations closing the shared `*` block.
    pub shared_block: String,
    /// Static CSS appended after the palette blocks.
    pub trailer: String,
    /// Title attached to every result.
    pub title: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            palette: PaletteConfig::default(),
            categorical_collections: vec!["Color-categorical".to_string()],
            mode_defaults: ModeDefaults::builtin(),
            switchable: vec![SwitchableCollection {
                collection: "Component-size".to_string(),
                class_prefix: ".obc-component-size-".to_string(),
                default_mode: Some("regular".to_string()),
            }],
            pinned: vec![
                PinnedCollection::new(".typography-primitives", "Regular"),
                PinnedCollection::new("Set-component-corners", "Regular"),
                PinnedCollection::new("component-primitives", "Value"),
            ],
            font_names: [("noto-sans", "Noto Sans"), ("open-sans", "Open Sans")]
                .into_iter()
                .map(|(slug, name)| (slug.to_string(), name.to_string()))
                .collect(),
            shared_block: assets::SHADOW_VARIABLES.to_string(),
            trailer: assets::BLINK_ANIMATION.to_string(),
            title: "Codegen Plugin".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Parses a configuration from YAML. Missing fields keep their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, LoadError> {
        serde_yaml::from_str(yaml).map_err(|source| LoadError::Yaml { path: None, source })
    }

    /// Loads a YAML configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| LoadError::Yaml {
            path: Some(path.to_path_buf()),
            source,
        })
    }

    /// Replaces the named-defaults table. Returns self for chaining.
    pub fn with_mode_defaults(mut self, defaults: ModeDefaults) -> Self {
        self.mode_defaults = defaults;
        self
    }

    /// Returns true if aliases into the named collection are suppressed.
    pub fn is_categorical(&self, collection_name: &str) -> bool {
        self.categorical_collections
            .iter()
            .any(|name| name == collection_name)
    }
}
