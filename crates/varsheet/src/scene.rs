//! Scene nodes and the color-token usage report.
//!
//! A [`SceneNode`] is the part of the host's document tree this crate reads:
//! children, fill and stroke paints, and the host-computed CSS for the node.
//! [`collect_color_token_ids`] walks a subtree for color tokens bound to solid
//! paints; [`color_token_names`] turns those ids into a report of normalized
//! names.

use std::collections::{BTreeMap, HashSet};

use futures::future::try_join_all;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::normalize::normalize_bare;
use crate::store::{CachedStore, TokenStore};

/// A node of the host document tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub children: Vec<SceneNode>,
    /// Absent on node types without fills.
    #[serde(default)]
    pub fills: Option<Vec<Paint>>,
    #[serde(default)]
    pub strokes: Option<Vec<Paint>>,
    /// Host-computed CSS properties, in the order the host listed them.
    #[serde(default, with = "ordered_properties")]
    pub css: Vec<(String, String)>,
}

impl SceneNode {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn fill(mut self, paint: Paint) -> Self {
        self.fills.get_or_insert_with(Vec::new).push(paint);
        self
    }

    pub fn stroke(mut self, paint: Paint) -> Self {
        self.strokes.get_or_insert_with(Vec::new).push(paint);
        self
    }

    /// Appends a CSS property. Setting a property again replaces its value
    /// in place.
    pub fn css(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        set_property(&mut self.css, property.into(), value.into());
        self
    }
}

fn set_property(properties: &mut Vec<(String, String)>, property: String, value: String) {
    match properties.iter_mut().find(|(name, _)| *name == property) {
        Some(entry) => entry.1 = value,
        None => properties.push((property, value)),
    }
}

/// CSS properties as a map on the wire, as a list in memory. Entry order
/// matters for shorthands, so it is kept as read.
mod ordered_properties {
    use std::fmt;

    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        properties: &[(String, String)],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(properties.len()))?;
        for (property, value) in properties {
            map.serialize_entry(property, value)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<(String, String)>, D::Error> {
        deserializer.deserialize_map(PropertiesVisitor)
    }

    struct PropertiesVisitor;

    impl<'de> Visitor<'de> for PropertiesVisitor {
        type Value = Vec<(String, String)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of CSS property names to values")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut properties = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((property, value)) = access.next_entry::<String, String>()? {
                super::set_property(&mut properties, property, value);
            }
            Ok(properties)
        }
    }
}

/// Paint types. Only solid paints can carry a bound color token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaintKind {
    Solid,
    GradientLinear,
    GradientRadial,
    GradientAngular,
    GradientDiamond,
    Image,
    Video,
    #[serde(other)]
    Other,
}

/// A fill or stroke paint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paint {
    #[serde(rename = "type")]
    pub kind: PaintKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bound_variables: Option<BoundVariables>,
}

impl Paint {
    /// A solid paint bound to the color token `token_id`.
    pub fn solid_bound(token_id: impl Into<String>) -> Self {
        Self {
            kind: PaintKind::Solid,
            bound_variables: Some(BoundVariables {
                color: Some(TokenRef { id: token_id.into() }),
            }),
        }
    }

    /// An unbound paint of the given kind.
    pub fn unbound(kind: PaintKind) -> Self {
        Self {
            kind,
            bound_variables: None,
        }
    }

    /// The bound color token id, for solid paints only.
    pub fn bound_color(&self) -> Option<&str> {
        if self.kind != PaintKind::Solid {
            return None;
        }
        self.bound_variables
            .as_ref()?
            .color
            .as_ref()
            .map(|r| r.id.as_str())
    }
}

/// Token bindings on a paint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundVariables {
    #[serde(default)]
    pub color: Option<TokenRef>,
}

/// A reference to a token by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRef {
    pub id: String,
}

/// Collects the ids of color tokens bound to solid fills or strokes anywhere
/// in the subtree rooted at `node`.
///
/// Children are visited before the node's own paints. The result is
/// deduplicated, keeping the first occurrence.
pub fn collect_color_token_ids(node: &SceneNode) -> Vec<String> {
    let mut ids = Vec::new();
    walk(node, &mut ids);

    let mut seen = HashSet::new();
    ids.retain(|id| seen.insert(id.clone()));
    ids
}

fn walk(node: &SceneNode, ids: &mut Vec<String>) {
    for child in &node.children {
        walk(child, ids);
    }
    let paints = node.fills.iter().chain(node.strokes.iter()).flatten();
    ids.extend(paints.filter_map(Paint::bound_color).map(String::from));
}

/// Maps each color token bound in the subtree to its bare normalized name.
///
/// Lookups run concurrently. Ids the store does not know are dropped.
pub async fn color_token_names<S: TokenStore>(
    store: &CachedStore<S>,
    node: &SceneNode,
) -> Result<BTreeMap<String, String>, StoreError> {
    let ids = collect_color_token_ids(node);
    let tokens = try_join_all(ids.iter().map(|id| store.token(id))).await?;

    Ok(ids
        .into_iter()
        .zip(tokens)
        .filter_map(|(id, token)| token.map(|t| (id, normalize_bare(&t.name))))
        .collect())
}
