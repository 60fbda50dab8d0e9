//! Read-through cache over a [`TokenStore`].

use std::collections::{HashMap, HashSet};

use futures::future::try_join_all;
use tokio::sync::RwLock;

use super::TokenStore;
use crate::error::StoreError;
use crate::model::{Collection, Token};

/// Caches token-by-id and collection-by-id lookups for one generation run.
///
/// The first lookup of an id goes to the inner store; later lookups are served
/// from memory. Misses are cached too, so a dangling alias is looked up once.
///
/// Concurrent lookups of the same id may both reach the inner store. The last
/// one to finish wins the cache slot, which is harmless because the store
/// returns the same value for the same id throughout a run.
pub struct CachedStore<S> {
    inner: S,
    tokens: RwLock<HashMap<String, Option<Token>>>,
    collections: RwLock<HashMap<String, Option<Collection>>>,
}

impl<S: TokenStore> CachedStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            tokens: RwLock::new(HashMap::new()),
            collections: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the wrapped store.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Lists all local tokens and seeds the token cache with them.
    pub async fn local_tokens(&self) -> Result<Vec<Token>, StoreError> {
        let tokens = self.inner.local_tokens().await?;
        let mut cache = self.tokens.write().await;
        for token in &tokens {
            cache.insert(token.id.clone(), Some(token.clone()));
        }
        tracing::debug!(count = tokens.len(), "seeded token cache");
        Ok(tokens)
    }

    /// Looks up a token, consulting the cache first.
    pub async fn token(&self, id: &str) -> Result<Option<Token>, StoreError> {
        if let Some(hit) = self.tokens.read().await.get(id) {
            return Ok(hit.clone());
        }
        tracing::debug!(id, "token cache miss");
        let fetched = self.inner.token(id).await?;
        self.tokens
            .write()
            .await
            .insert(id.to_string(), fetched.clone());
        Ok(fetched)
    }

    /// Looks up a collection, consulting the cache first.
    pub async fn collection(&self, id: &str) -> Result<Option<Collection>, StoreError> {
        if let Some(hit) = self.collections.read().await.get(id) {
            return Ok(hit.clone());
        }
        tracing::debug!(id, "collection cache miss");
        let fetched = self.inner.collection(id).await?;
        self.collections
            .write()
            .await
            .insert(id.to_string(), fetched.clone());
        Ok(fetched)
    }

    /// Fetches the distinct collections owning `tokens`, concurrently.
    ///
    /// Returns the collections that exist, in order of first appearance.
    pub async fn collections_of(&self, tokens: &[Token]) -> Result<Vec<Collection>, StoreError> {
        let mut seen = HashSet::new();
        let ids: Vec<&str> = tokens
            .iter()
            .map(|t| t.collection_id.as_str())
            .filter(|id| seen.insert(*id))
            .collect();

        let fetched = try_join_all(ids.into_iter().map(|id| self.collection(id))).await?;
        Ok(fetched.into_iter().flatten().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts inner lookups.
    struct CountingStore {
        inner: MemoryStore,
        token_calls: AtomicUsize,
        collection_calls: AtomicUsize,
    }

    #[async_trait]
    impl TokenStore for CountingStore {
        async fn token(&self, id: &str) -> Result<Option<Token>, StoreError> {
            self.token_calls.fetch_add(1, Ordering::SeqCst);
            self.inner.token(id).await
        }

        async fn collection(&self, id: &str) -> Result<Option<Collection>, StoreError> {
            self.collection_calls.fetch_add(1, Ordering::SeqCst);
            self.inner.collection(id).await
        }

        async fn local_tokens(&self) -> Result<Vec<Token>, StoreError> {
            self.inner.local_tokens().await
        }
    }

    fn counting() -> CachedStore<CountingStore> {
        let inner = MemoryStore::new()
            .with_collection(Collection::new("c1", "Palette").mode("m1", "Day"))
            .with_collection(Collection::new("c2", "Sizes").mode("m2", "Value"))
            .with_token(Token::new("a", "A", "c1"))
            .with_token(Token::new("b", "B", "c2"))
            .with_token(Token::new("c", "C", "c1"));
        CachedStore::new(CountingStore {
            inner,
            token_calls: AtomicUsize::new(0),
            collection_calls: AtomicUsize::new(0),
        })
    }

    #[tokio::test]
    async fn test_token_lookups_hit_inner_once() {
        let store = counting();
        assert!(store.token("a").await.unwrap().is_some());
        assert!(store.token("a").await.unwrap().is_some());
        assert_eq!(store.inner().token_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_misses_are_cached() {
        let store = counting();
        assert!(store.token("nope").await.unwrap().is_none());
        assert!(store.token("nope").await.unwrap().is_none());
        assert_eq!(store.inner().token_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_local_tokens_seed_cache() {
        let store = counting();
        store.local_tokens().await.unwrap();
        assert!(store.token("b").await.unwrap().is_some());
        assert_eq!(store.inner().token_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_collections_of_dedupes_and_keeps_order() {
        let store = counting();
        let tokens = store.local_tokens().await.unwrap();
        let collections = store.collections_of(&tokens).await.unwrap();

        let names: Vec<&str> = collections.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Palette", "Sizes"]);
        assert_eq!(store.inner().collection_calls.load(Ordering::SeqCst), 2);

        store.collection("c1").await.unwrap();
        assert_eq!(store.inner().collection_calls.load(Ordering::SeqCst), 2);
    }
}
