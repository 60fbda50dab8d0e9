//! Read-only access to the host's token storage.
//!
//! Generation never owns tokens or collections; it reads them from a
//! [`TokenStore`]. Lookups may suspend (a host API call, a file read), so the
//! trait is async.
//!
//! ## Implementations
//!
//! - [`MemoryStore`]: backed by a [`Snapshot`] exported from a host document.
//! - [`CachedStore`]: read-through cache wrapped around any other store. The
//!   generator always talks to the store through one of these so that
//!   repeated alias hops over the same ids cost one lookup each.
//!
//! ## Contract
//!
//! Unknown ids are `Ok(None)`, never an error. `Err` is reserved for the store
//! itself failing. All lookups for the same id must return the same value
//! for the lifetime of a generation run.

mod cache;
mod memory;

pub use cache::CachedStore;
pub use memory::{MemoryStore, Snapshot};

use async_trait::async_trait;

use crate::error::StoreError;
use crate::model::{Collection, Token};

/// Async, read-only token and collection lookup.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Looks up one token by id.
    async fn token(&self, id: &str) -> Result<Option<Token>, StoreError>;

    /// Looks up one collection by id.
    async fn collection(&self, id: &str) -> Result<Option<Collection>, StoreError>;

    /// Lists every token defined in the document, in document order.
    async fn local_tokens(&self) -> Result<Vec<Token>, StoreError>;
}

#[async_trait]
impl<T: TokenStore + ?Sized> TokenStore for &T {
    async fn token(&self, id: &str) -> Result<Option<Token>, StoreError> {
        (**self).token(id).await
    }

    async fn collection(&self, id: &str) -> Result<Option<Collection>, StoreError> {
        (**self).collection(id).await
    }

    async fn local_tokens(&self) -> Result<Vec<Token>, StoreError> {
        (**self).local_tokens().await
    }
}
