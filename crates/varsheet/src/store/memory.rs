//! In-memory store backed by a document snapshot.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::TokenStore;
use crate::error::{LoadError, StoreError};
use crate::model::{Collection, Token};
use crate::scene::SceneNode;

/// A host document export.
///
/// ```json
/// {
///   "collections": [ { "id": "c1", "name": "Palette", "modes": [ ... ] } ],
///   "variables": [ { "id": "v1", "name": "Color/Accent", ... } ],
///   "node": { "id": "1:2", "name": "Button", "fills": [ ... ] },
///   "resolvedVariableModes": { "c2": "m7" }
/// }
/// ```
///
/// `node` is the selected scene node, used by the `variables` and `css`
/// output kinds. `resolvedVariableModes` carries the node's explicit
/// per-collection mode choices (collection id to mode id).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub collections: Vec<Collection>,
    #[serde(default, rename = "variables")]
    pub tokens: Vec<Token>,
    #[serde(default)]
    pub node: Option<SceneNode>,
    #[serde(default, rename = "resolvedVariableModes")]
    pub mode_overrides: HashMap<String, String>,
}

impl Snapshot {
    /// Parses a snapshot from JSON text.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        serde_json::from_str(json).map_err(|source| LoadError::Json { path: None, source })
    }

    /// Parses a snapshot from YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self, LoadError> {
        serde_yaml::from_str(yaml).map_err(|source| LoadError::Yaml { path: None, source })
    }

    /// Loads a snapshot file. `.yaml` and `.yml` files are read as YAML,
    /// everything else as JSON.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );
        if is_yaml {
            serde_yaml::from_str(&content).map_err(|source| LoadError::Yaml {
                path: Some(path.to_path_buf()),
                source,
            })
        } else {
            serde_json::from_str(&content).map_err(|source| LoadError::Json {
                path: Some(path.to_path_buf()),
                source,
            })
        }
    }
}

/// A [`TokenStore`] over an owned set of tokens and collections.
///
/// # Example
///
/// ```rust
/// use varsheet::{Collection, MemoryStore, Token};
///
/// let store = MemoryStore::new()
///     .with_collection(Collection::new("c1", "Sizes").mode("m1", "Value"))
///     .with_token(Token::new("v1", "Size/Gap", "c1").value("m1", 8.0));
/// assert_eq!(store.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tokens: Vec<Token>,
    token_index: HashMap<String, usize>,
    collections: HashMap<String, Collection>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from a snapshot's tokens and collections.
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let store = snapshot
            .collections
            .iter()
            .cloned()
            .fold(Self::new(), Self::with_collection);
        snapshot.tokens.iter().cloned().fold(store, Self::with_token)
    }

    /// Adds a collection. Returns self for chaining.
    pub fn with_collection(mut self, collection: Collection) -> Self {
        self.collections.insert(collection.id.clone(), collection);
        self
    }

    /// Adds a token. A token with the same id is replaced in place.
    pub fn with_token(mut self, token: Token) -> Self {
        match self.token_index.get(&token.id) {
            Some(&i) => self.tokens[i] = token,
            None => {
                self.token_index.insert(token.id.clone(), self.tokens.len());
                self.tokens.push(token);
            }
        }
        self
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[async_trait]
impl TokenStore for MemoryStore {
    async fn token(&self, id: &str) -> Result<Option<Token>, StoreError> {
        Ok(self.token_index.get(id).map(|&i| self.tokens[i].clone()))
    }

    async fn collection(&self, id: &str) -> Result<Option<Collection>, StoreError> {
        Ok(self.collections.get(id).cloned())
    }

    async fn local_tokens(&self) -> Result<Vec<Token>, StoreError> {
        Ok(self.tokens.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TokenValue;
    use std::io::Write;

    const SNAPSHOT_JSON: &str = r#"{
        "collections": [
            { "id": "c1", "name": "Palette", "modes": [ { "modeId": "m1", "name": "Day" } ] }
        ],
        "variables": [
            { "id": "v1", "name": "Color/Accent", "variableCollectionId": "c1",
              "valuesByMode": { "m1": { "r": 1, "g": 0, "b": 0 } } }
        ],
        "resolvedVariableModes": { "c9": "m9" }
    }"#;

    #[test]
    fn test_snapshot_from_json() {
        let snapshot = Snapshot::from_json(SNAPSHOT_JSON).unwrap();
        assert_eq!(snapshot.collections.len(), 1);
        assert_eq!(snapshot.tokens.len(), 1);
        assert!(snapshot.node.is_none());
        assert_eq!(snapshot.mode_overrides.get("c9").map(String::as_str), Some("m9"));
    }

    #[test]
    fn test_snapshot_from_yaml() {
        let snapshot = Snapshot::from_yaml(
            r#"
collections:
  - id: c1
    name: Sizes
    modes:
      - { modeId: m1, name: Value }
variables:
  - id: v1
    name: Size/Gap
    variableCollectionId: c1
    valuesByMode:
      m1: 8
"#,
        )
        .unwrap();
        assert_eq!(
            snapshot.tokens[0].value_for("m1"),
            Some(&TokenValue::Number(8.0))
        );
    }

    #[test]
    fn test_snapshot_from_json_error() {
        let err = Snapshot::from_json("{ not json").unwrap_err();
        assert!(matches!(err, LoadError::Json { path: None, .. }));
    }

    #[test]
    fn test_snapshot_from_file_picks_format_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(SNAPSHOT_JSON.as_bytes()).unwrap();
        let snapshot = Snapshot::from_file(file.path()).unwrap();
        assert_eq!(snapshot.tokens[0].name, "Color/Accent");

        let mut yaml = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        yaml.write_all(b"collections: []\n").unwrap();
        let snapshot = Snapshot::from_file(yaml.path()).unwrap();
        assert!(snapshot.collections.is_empty());
    }

    #[test]
    fn test_snapshot_from_missing_file() {
        let err = Snapshot::from_file("/nonexistent/tokens.json").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[tokio::test]
    async fn test_memory_store_lookups() {
        let snapshot = Snapshot::from_json(SNAPSHOT_JSON).unwrap();
        let store = MemoryStore::from_snapshot(&snapshot);

        assert!(store.token("v1").await.unwrap().is_some());
        assert!(store.token("missing").await.unwrap().is_none());
        assert_eq!(
            store.collection("c1").await.unwrap().map(|c| c.name),
            Some("Palette".to_string())
        );
        assert_eq!(store.local_tokens().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_memory_store_replaces_token_in_place() {
        let store = MemoryStore::new()
            .with_token(Token::new("a", "First", "c1"))
            .with_token(Token::new("b", "Second", "c1"))
            .with_token(Token::new("a", "Renamed", "c1"));

        let names: Vec<String> = store
            .local_tokens()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["Renamed", "Second"]);
    }
}
