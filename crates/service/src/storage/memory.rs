use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};
use tokio::sync::RwLock;

use async_trait::async_trait;
use models::{PrefValue, StoreError, StoreSnapshot};

use crate::storage::PrefStore;

/// In-memory preference store.
///
/// Backs hosts that keep preferences for the process lifetime only, and
/// doubles as the test fake: both failure paths the sanitizer must survive
/// (unreadable snapshot, failed clear) are injectable.
#[derive(Clone, Default)]
pub struct MemoryPrefStore {
    inner: Arc<RwLock<HashMap<String, PrefValue>>>,
    fail_snapshot: Arc<AtomicBool>,
    fail_clear: Arc<AtomicBool>,
}

impl MemoryPrefStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, key: String, value: PrefValue) {
        let mut map = self.inner.write().await;
        map.insert(key, value);
    }

    pub async fn get(&self, key: &str) -> Option<PrefValue> {
        let map = self.inner.read().await;
        map.get(key).cloned()
    }

    pub async fn len(&self) -> usize {
        let map = self.inner.read().await;
        map.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Make every subsequent `snapshot()` fail with `Unreadable`.
    pub fn set_fail_snapshot(&self, fail: bool) {
        self.fail_snapshot.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent `clear_all()` fail with `ClearFailed`,
    /// leaving the contents untouched.
    pub fn set_fail_clear(&self, fail: bool) {
        self.fail_clear.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl PrefStore for MemoryPrefStore {
    async fn snapshot(&self) -> Result<StoreSnapshot, StoreError> {
        if self.fail_snapshot.load(Ordering::SeqCst) {
            return Err(StoreError::Unreadable("injected snapshot failure".into()));
        }
        let map = self.inner.read().await;
        let approx_bytes = serde_json::to_vec(&*map)
            .map_err(|e| StoreError::Unreadable(e.to_string()))?
            .len() as u64;
        Ok(StoreSnapshot { entry_count: map.len(), approx_bytes, load_failed: false })
    }

    async fn clear_all(&self) -> Result<(), StoreError> {
        if self.fail_clear.load(Ordering::SeqCst) {
            return Err(StoreError::ClearFailed("injected clear failure".into()));
        }
        let mut map = self.inner.write().await;
        map.clear();
        Ok(())
    }
}
