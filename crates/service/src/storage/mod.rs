use async_trait::async_trait;
use models::{StoreError, StoreSnapshot};

pub mod json_pref_store;
pub mod memory;

/// Trait abstraction for the persisted preference store.
/// Implementations can be file-backed, in-memory, or remote KV.
///
/// The sanitizer only ever needs these two operations; populating the store
/// is the host application's business and goes through the concrete types.
#[async_trait]
pub trait PrefStore: Send + Sync {
    /// Read-only summary of the current contents. Must not mutate the store.
    async fn snapshot(&self) -> Result<StoreSnapshot, StoreError>;

    /// Remove every entry and commit the empty state before returning.
    async fn clear_all(&self) -> Result<(), StoreError>;
}
