//! Alias resolution across collections.
//!
//! Follows a token value through any number of alias hops until a terminal
//! payload is reached, so the palette can be emitted as literal values.
//!
//! ## Hops
//!
//! Each hop dereferences the alias target and reads one of its values:
//!
//! - **Local hop**: the target lives in the scope collection (the one being
//!   emitted). Its value for the scope's current mode is read.
//! - **Cross-collection hop**: the target lives elsewhere. The
//!   [`ModeSelector`] picks which of that collection's modes to read.
//!
//! The scope never changes during a walk, so a chain that leaves the palette
//! and comes back reads the palette at the original mode again.
//!
//! ## Outcomes
//!
//! - [`Resolved::Value`]: a terminal, non-alias value.
//! - [`Resolved::Suppressed`]: a hop entered a categorical collection.
//! - [`Resolved::Missing`]: a target token, collection, mode or value was
//!   absent. The [`Issue`] says which.
//!
//! Revisiting a token is an [`GenerateError::AliasCycle`]: within one walk a
//! token is always read at the same mode, so a revisit can never terminate.

use std::collections::HashSet;

use crate::error::{GenerateError, Issue};
use crate::mode::{ModeChoice, ModeSelector};
use crate::model::{Token, TokenValue};
use crate::store::{CachedStore, TokenStore};

/// The collection and mode a resolution runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope<'a> {
    pub collection_id: &'a str,
    pub mode_id: &'a str,
}

/// Result of following an alias chain.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    /// A terminal value; never [`TokenValue::Alias`].
    Value(TokenValue),
    /// Deliberately unresolved; omit without reporting.
    Suppressed,
    /// Resolution failed for this token only.
    Missing(Issue),
}

/// Follows alias chains through a cached store.
pub struct AliasResolver<'a, S> {
    store: &'a CachedStore<S>,
    selector: &'a ModeSelector,
}

impl<'a, S: TokenStore> AliasResolver<'a, S> {
    pub fn new(store: &'a CachedStore<S>, selector: &'a ModeSelector) -> Self {
        Self { store, selector }
    }

    /// Resolves `value`, a value of `origin`, to a terminal value.
    ///
    /// Non-alias values are returned unchanged. Hops are inherently
    /// sequential: each target is only known once the previous hop resolved.
    ///
    /// # Errors
    ///
    /// [`GenerateError::AliasCycle`] if the chain loops, or
    /// [`GenerateError::Store`] if the store fails.
    pub async fn resolve(
        &self,
        origin: &Token,
        value: &TokenValue,
        scope: Scope<'_>,
    ) -> Result<Resolved, GenerateError> {
        let mut current = value.clone();
        let mut visited: HashSet<String> = HashSet::from([origin.id.clone()]);
        let mut path = vec![origin.name.clone()];

        loop {
            let target_id = match current {
                TokenValue::Alias(id) => id,
                terminal => return Ok(Resolved::Value(terminal)),
            };

            let Some(target) = self.store.token(&target_id).await? else {
                return Ok(Resolved::Missing(Issue::MissingReference {
                    token: origin.name.clone(),
                    target: target_id,
                }));
            };

            path.push(target.name.clone());
            if !visited.insert(target.id.clone()) {
                return Err(GenerateError::AliasCycle { path });
            }

            let mode_id = if target.collection_id == scope.collection_id {
                scope.mode_id.to_string()
            } else {
                let Some(collection) = self.store.collection(&target.collection_id).await? else {
                    return Ok(Resolved::Missing(Issue::MissingCollection {
                        token: origin.name.clone(),
                        collection: target.collection_id.clone(),
                    }));
                };
                match self.selector.select(&collection) {
                    ModeChoice::Mode(mode) => mode.mode_id.clone(),
                    ModeChoice::Suppressed => {
                        tracing::debug!(
                            token = %origin.name,
                            collection = %collection.name,
                            "alias into categorical collection suppressed"
                        );
                        return Ok(Resolved::Suppressed);
                    }
                    ModeChoice::NotFound => {
                        return Ok(Resolved::Missing(Issue::ModeNotFound {
                            token: origin.name.clone(),
                            collection: collection.name.clone(),
                        }));
                    }
                }
            };

            current = match target.value_for(&mode_id) {
                Some(next) => next.clone(),
                None => {
                    return Ok(Resolved::Missing(Issue::MissingValue {
                        token: target.name.clone(),
                        mode: self.mode_name(&target.collection_id, &mode_id).await?,
                    }));
                }
            };
        }
    }

    /// Display name of a mode, or its id if the store does not know it.
    async fn mode_name(
        &self,
        collection_id: &str,
        mode_id: &str,
    ) -> Result<String, GenerateError> {
        let collection = self.store.collection(collection_id).await?;
        Ok(collection
            .as_ref()
            .and_then(|c| c.mode_by_id(mode_id))
            .map_or_else(|| mode_id.to_string(), |mode| mode.name.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModeDefaults;
    use crate::model::{Collection, Color};
    use crate::store::MemoryStore;
    use std::collections::HashMap;

    const PALETTE: &str = "c-palette";

    fn store() -> CachedStore<MemoryStore> {
        let inner = MemoryStore::new()
            .with_collection(
                Collection::new(PALETTE, "Palette")
                    .mode("day", "Day")
                    .mode("night", "Night"),
            )
            .with_collection(
                Collection::new("c-prim", "Color-primitives-day")
                    .mode("p-default", "Default")
                    .mode("p-wcag", "WCAG"),
            )
            .with_collection(Collection::new("c-base", "Base").mode("b1", "Value"))
            .with_collection(
                Collection::new("c-cat", "Color-categorical")
                    .mode("k1", "A")
                    .mode("k2", "B"),
            )
            .with_collection(
                Collection::new("c-brand", "Brand")
                    .mode("r1", "One")
                    .mode("r2", "Two"),
            )
            .with_token(
                Token::new("base-red", "Base/Red", "c-base").value("b1", Color::rgb(1.0, 0.0, 0.0)),
            )
            .with_token(
                Token::new("prim-red", "Primitives/Red", "c-prim")
                    .value("p-default", Color::rgb(0.5, 0.0, 0.0))
                    .value("p-wcag", TokenValue::alias("base-red")),
            )
            .with_token(
                Token::new("pal-surface", "Color/Surface", PALETTE)
                    .value("day", 1.0)
                    .value("night", 2.0),
            )
            .with_token(
                Token::new("pal-accent", "Color/Accent", PALETTE)
                    .value("day", TokenValue::alias("prim-red"))
                    .value("night", TokenValue::alias("pal-surface")),
            )
            .with_token(Token::new("cat-1", "Categorical/1", "c-cat").value("k1", 3.0))
            .with_token(Token::new("brand-1", "Brand/1", "c-brand").value("r1", 4.0))
            .with_token(Token::new("orphan", "Orphan", "c-gone").value("x", 5.0));
        CachedStore::new(inner)
    }

    fn selector() -> ModeSelector {
        ModeSelector::new(
            HashMap::new(),
            ModeDefaults::builtin(),
            vec!["Color-categorical".to_string()],
        )
    }

    fn origin() -> Token {
        Token::new("origin", "Color/Origin", PALETTE)
    }

    async fn resolve_in(value: TokenValue, mode_id: &str) -> Result<Resolved, GenerateError> {
        let store = store();
        let selector = selector();
        let resolver = AliasResolver::new(&store, &selector);
        resolver
            .resolve(
                &origin(),
                &value,
                Scope {
                    collection_id: PALETTE,
                    mode_id,
                },
            )
            .await
    }

    #[tokio::test]
    async fn test_terminal_value_unchanged() {
        let out = resolve_in(TokenValue::Number(8.0), "day").await.unwrap();
        assert_eq!(out, Resolved::Value(TokenValue::Number(8.0)));
    }

    #[tokio::test]
    async fn test_local_alias_keeps_scope_mode() {
        let out = resolve_in(TokenValue::alias("pal-surface"), "night")
            .await
            .unwrap();
        assert_eq!(out, Resolved::Value(TokenValue::Number(2.0)));
    }

    #[tokio::test]
    async fn test_multi_hop_across_collections() {
        // palette -> primitives (named default WCAG) -> base (single mode)
        let out = resolve_in(TokenValue::alias("pal-accent"), "day")
            .await
            .unwrap();
        assert_eq!(
            out,
            Resolved::Value(TokenValue::Color(Color::rgb(1.0, 0.0, 0.0)))
        );
    }

    #[tokio::test]
    async fn test_suppressed_for_categorical() {
        let out = resolve_in(TokenValue::alias("cat-1"), "day").await.unwrap();
        assert_eq!(out, Resolved::Suppressed);
    }

    #[tokio::test]
    async fn test_mode_not_found() {
        let out = resolve_in(TokenValue::alias("brand-1"), "day").await.unwrap();
        assert_eq!(
            out,
            Resolved::Missing(Issue::ModeNotFound {
                token: "Color/Origin".into(),
                collection: "Brand".into(),
            })
        );
    }

    #[tokio::test]
    async fn test_missing_reference() {
        let out = resolve_in(TokenValue::alias("ghost"), "day").await.unwrap();
        assert!(matches!(
            out,
            Resolved::Missing(Issue::MissingReference { ref target, .. }) if target == "ghost"
        ));
    }

    #[tokio::test]
    async fn test_missing_collection() {
        let out = resolve_in(TokenValue::alias("orphan"), "day").await.unwrap();
        assert!(matches!(
            out,
            Resolved::Missing(Issue::MissingCollection { .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_value_for_mode() {
        let store = CachedStore::new(
            MemoryStore::new()
                .with_collection(Collection::new(PALETTE, "Palette").mode("day", "Day"))
                .with_token(Token::new("sparse", "Sparse", PALETTE)),
        );
        let selector = selector();
        let resolver = AliasResolver::new(&store, &selector);
        let out = resolver
            .resolve(
                &origin(),
                &TokenValue::alias("sparse"),
                Scope {
                    collection_id: PALETTE,
                    mode_id: "day",
                },
            )
            .await
            .unwrap();
        assert_eq!(
            out,
            Resolved::Missing(Issue::MissingValue {
                token: "Sparse".into(),
                mode: "Day".into(),
            })
        );
    }

    #[tokio::test]
    async fn test_missing_value_names_selected_mode() {
        let store = CachedStore::new(
            MemoryStore::new()
                .with_collection(Collection::new(PALETTE, "Palette").mode("day", "Day"))
                .with_collection(
                    Collection::new("c-prim", "Color-primitives-day")
                        .mode("p-default", "Default")
                        .mode("p-wcag", "WCAG"),
                )
                .with_token(
                    Token::new("prim-gap", "Primitives/Gap", "c-prim").value("p-default", 1.0),
                ),
        );
        let selector = selector();
        let resolver = AliasResolver::new(&store, &selector);
        let out = resolver
            .resolve(
                &origin(),
                &TokenValue::alias("prim-gap"),
                Scope {
                    collection_id: PALETTE,
                    mode_id: "day",
                },
            )
            .await
            .unwrap();
        assert_eq!(
            out,
            Resolved::Missing(Issue::MissingValue {
                token: "Primitives/Gap".into(),
                mode: "WCAG".into(),
            })
        );
    }

    #[tokio::test]
    async fn test_cycle_is_fatal() {
        let store = CachedStore::new(
            MemoryStore::new()
                .with_collection(Collection::new(PALETTE, "Palette").mode("day", "Day"))
                .with_token(Token::new("a", "A", PALETTE).value("day", TokenValue::alias("b")))
                .with_token(Token::new("b", "B", PALETTE).value("day", TokenValue::alias("a"))),
        );
        let selector = selector();
        let resolver = AliasResolver::new(&store, &selector);
        let a = Token::new("a", "A", PALETTE);
        let err = resolver
            .resolve(
                &a,
                &TokenValue::alias("b"),
                Scope {
                    collection_id: PALETTE,
                    mode_id: "day",
                },
            )
            .await
            .unwrap_err();
        match err {
            GenerateError::AliasCycle { path } => assert_eq!(path, vec!["A", "B", "A"]),
            other => panic!("Expected AliasCycle, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_self_reference_is_fatal() {
        let store = CachedStore::new(
            MemoryStore::new()
                .with_collection(Collection::new(PALETTE, "Palette").mode("day", "Day"))
                .with_token(Token::new("s", "Self", PALETTE).value("day", TokenValue::alias("s"))),
        );
        let selector = selector();
        let resolver = AliasResolver::new(&store, &selector);
        let s = Token::new("s", "Self", PALETTE);
        let err = resolver
            .resolve(
                &s,
                &TokenValue::alias("s"),
                Scope {
                    collection_id: PALETTE,
                    mode_id: "day",
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, GenerateError::AliasCycle { .. }));
    }
}
