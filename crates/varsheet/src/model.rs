//! Token graph data model.
//!
//! These types mirror the host document's variable API: a [`Token`] belongs to
//! exactly one [`Collection`], and holds one [`TokenValue`] per [`Mode`] of that
//! collection. A value is either a concrete payload or an alias to another
//! token, possibly in another collection.
//!
//! All entities are immutable snapshots. Nothing in this crate creates or
//! mutates them; generation is a pure read/transform stage.
//!
//! # Wire Format
//!
//! The serde representation follows the host export:
//!
//! ```json
//! {
//!   "id": "VariableID:1:7",
//!   "name": "Color/Primary/On-Surface",
//!   "variableCollectionId": "VariableCollectionId:1:0",
//!   "valuesByMode": {
//!     "1:0": { "r": 1, "g": 1, "b": 1, "a": 0.5 },
//!     "1:1": { "type": "VARIABLE_ALIAS", "id": "VariableID:2:3" }
//!   }
//! }
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// An RGBA color with every channel in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    /// Alpha channel. Exports of opaque colors omit it.
    #[serde(default = "opaque")]
    pub a: f64,
}

fn opaque() -> f64 {
    1.0
}

impl Color {
    /// Creates an opaque color.
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Creates a color with an explicit alpha.
    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }
}

/// The value of one token in one mode.
///
/// Exactly one variant exists per (token, mode) pair. [`TokenValue::Alias`]
/// carries the id of the referenced token; everything else is terminal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireValue", into = "WireValue")]
pub enum TokenValue {
    Number(f64),
    String(String),
    Boolean(bool),
    Color(Color),
    /// Reference to another token by id.
    Alias(String),
}

impl TokenValue {
    /// Creates an alias to the token with the given id.
    pub fn alias(target: impl Into<String>) -> Self {
        TokenValue::Alias(target.into())
    }

    /// Returns the alias target id, if this value is an alias.
    pub fn alias_target(&self) -> Option<&str> {
        match self {
            TokenValue::Alias(id) => Some(id),
            _ => None,
        }
    }

    /// Short name of the payload type, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            TokenValue::Number(_) => "number",
            TokenValue::String(_) => "string",
            TokenValue::Boolean(_) => "boolean",
            TokenValue::Color(_) => "color",
            TokenValue::Alias(_) => "alias",
        }
    }
}

impl From<f64> for TokenValue {
    fn from(n: f64) -> Self {
        TokenValue::Number(n)
    }
}

impl From<&str> for TokenValue {
    fn from(s: &str) -> Self {
        TokenValue::String(s.to_string())
    }
}

impl From<Color> for TokenValue {
    fn from(c: Color) -> Self {
        TokenValue::Color(c)
    }
}

/// Untagged host representation of [`TokenValue`].
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum WireValue {
    Boolean(bool),
    Number(f64),
    String(String),
    Alias(WireAlias),
    Color(Color),
}

#[derive(Serialize, Deserialize)]
struct WireAlias {
    #[serde(rename = "type")]
    kind: AliasTag,
    id: String,
}

#[derive(Serialize, Deserialize)]
enum AliasTag {
    #[serde(rename = "VARIABLE_ALIAS")]
    VariableAlias,
}

impl From<WireValue> for TokenValue {
    fn from(wire: WireValue) -> Self {
        match wire {
            WireValue::Boolean(b) => TokenValue::Boolean(b),
            WireValue::Number(n) => TokenValue::Number(n),
            WireValue::String(s) => TokenValue::String(s),
            WireValue::Alias(alias) => TokenValue::Alias(alias.id),
            WireValue::Color(c) => TokenValue::Color(c),
        }
    }
}

impl From<TokenValue> for WireValue {
    fn from(value: TokenValue) -> Self {
        match value {
            TokenValue::Boolean(b) => WireValue::Boolean(b),
            TokenValue::Number(n) => WireValue::Number(n),
            TokenValue::String(s) => WireValue::String(s),
            TokenValue::Alias(id) => WireValue::Alias(WireAlias {
                kind: AliasTag::VariableAlias,
                id,
            }),
            TokenValue::Color(c) => WireValue::Color(c),
        }
    }
}

/// A named design value with one value per mode of its collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub id: String,
    /// Hierarchical label, e.g. `Color/Primary/On-Surface`.
    pub name: String,
    #[serde(rename = "variableCollectionId")]
    pub collection_id: String,
    #[serde(default)]
    pub values_by_mode: HashMap<String, TokenValue>,
}

impl Token {
    /// Creates a token with no values.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        collection_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            collection_id: collection_id.into(),
            values_by_mode: HashMap::new(),
        }
    }

    /// Sets the value for a mode, returning `self` for chaining.
    pub fn value(mut self, mode_id: impl Into<String>, value: impl Into<TokenValue>) -> Self {
        self.values_by_mode.insert(mode_id.into(), value.into());
        self
    }

    /// Returns the value for the given mode, if any.
    pub fn value_for(&self, mode_id: &str) -> Option<&TokenValue> {
        self.values_by_mode.get(mode_id)
    }
}

/// A named variant axis within a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mode {
    pub mode_id: String,
    pub name: String,
}

impl Mode {
    pub fn new(mode_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            mode_id: mode_id.into(),
            name: name.into(),
        }
    }
}

/// A named group of tokens sharing a set of modes.
///
/// The mode list is never empty in a well-formed store. Order only matters in
/// that the first mode is the implicit default of a single-mode collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub name: String,
    pub modes: Vec<Mode>,
}

impl Collection {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            modes: Vec::new(),
        }
    }

    /// Appends a mode, returning `self` for chaining.
    pub fn mode(mut self, mode_id: impl Into<String>, name: impl Into<String>) -> Self {
        self.modes.push(Mode::new(mode_id, name));
        self
    }

    pub fn mode_by_id(&self, mode_id: &str) -> Option<&Mode> {
        self.modes.iter().find(|m| m.mode_id == mode_id)
    }

    pub fn mode_by_name(&self, name: &str) -> Option<&Mode> {
        self.modes.iter().find(|m| m.name == name)
    }
}
