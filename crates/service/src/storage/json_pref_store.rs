use std::{collections::HashMap, path::PathBuf, sync::Arc};
use tokio::{fs, sync::RwLock};

use async_trait::async_trait;
use models::{PrefValue, StoreError, StoreSnapshot};

use crate::errors::ServiceError;
use crate::storage::PrefStore;

/// JSON file-backed preference store.
///
/// Persists a `HashMap<String, PrefValue>` to a JSON file and provides simple
/// CRUD helpers. Intended for per-install preference state where a database
/// is overkill. Every mutation commits to disk before it returns.
#[derive(Clone)]
pub struct JsonPrefStore {
    inner: Arc<RwLock<HashMap<String, PrefValue>>>,
    file_path: PathBuf,
    load_failed: bool,
}

impl JsonPrefStore {
    /// Open the store at a path. Creates the file with an empty map if
    /// missing. A file that exists but does not deserialize is NOT replaced
    /// here: the store starts empty in memory with `load_failed` set, and
    /// the bad bytes stay on disk until something decides to clear them.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, StoreError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.ok();
        }

        let (map, load_failed) = match fs::read(&file_path).await {
            Ok(bytes) => match serde_json::from_slice::<HashMap<String, PrefValue>>(&bytes) {
                Ok(map) => (map, false),
                Err(_) => (HashMap::new(), true),
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let empty: HashMap<String, PrefValue> = HashMap::new();
                let data = serde_json::to_vec(&empty)
                    .map_err(|e| StoreError::Unreadable(e.to_string()))?;
                fs::write(&file_path, data)
                    .await
                    .map_err(|e| StoreError::Unreadable(e.to_string()))?;
                (empty, false)
            }
            Err(e) => return Err(StoreError::Unreadable(e.to_string())),
        };

        Ok(Arc::new(Self { inner: Arc::new(RwLock::new(map)), file_path, load_failed }))
    }

    async fn save(&self) -> Result<(), ServiceError> {
        let map = self.inner.read().await;
        let data = serde_json::to_vec(&*map).map_err(|e| ServiceError::Io(e.to_string()))?;
        fs::write(&self.file_path, data)
            .await
            .map_err(|e| ServiceError::Io(e.to_string()))?;
        Ok(())
    }

    /// List all entries as `(key, value)` pairs.
    pub async fn list(&self) -> Vec<(String, PrefValue)> {
        let map = self.inner.read().await;
        map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    /// Get value by key.
    pub async fn get(&self, key: &str) -> Option<PrefValue> {
        let map = self.inner.read().await;
        map.get(key).cloned()
    }

    /// Insert or update a value by key and persist.
    pub async fn insert(&self, key: String, value: PrefValue) -> Result<(), ServiceError> {
        let mut map = self.inner.write().await;
        map.insert(key, value);
        drop(map);
        self.save().await
    }

    /// Remove a key and persist; returns whether it existed.
    pub async fn remove(&self, key: &str) -> Result<bool, ServiceError> {
        let mut map = self.inner.write().await;
        let existed = map.remove(key).is_some();
        drop(map);
        self.save().await?;
        Ok(existed)
    }

    /// Number of entries currently held.
    pub async fn len(&self) -> usize {
        let map = self.inner.read().await;
        map.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Whether the backing file existed but failed to deserialize at open.
    pub fn load_failed(&self) -> bool {
        self.load_failed
    }
}

#[async_trait]
impl PrefStore for JsonPrefStore {
    async fn snapshot(&self) -> Result<StoreSnapshot, StoreError> {
        let map = self.inner.read().await;
        let approx_bytes = serde_json::to_vec(&*map)
            .map_err(|e| StoreError::Unreadable(e.to_string()))?
            .len() as u64;
        Ok(StoreSnapshot {
            entry_count: map.len(),
            approx_bytes,
            load_failed: self.load_failed,
        })
    }

    async fn clear_all(&self) -> Result<(), StoreError> {
        let mut map = self.inner.write().await;
        map.clear();
        // commit the empty map before the write lock is released so no
        // reader observes a mix of old and new state
        let data = serde_json::to_vec(&*map).map_err(|e| StoreError::ClearFailed(e.to_string()))?;
        fs::write(&self.file_path, data)
            .await
            .map_err(|e| StoreError::ClearFailed(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("json_pref_store_{tag}_{}.json", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn crud_persists_across_reopen() -> Result<(), anyhow::Error> {
        let tmp = temp_path("crud");
        let store = JsonPrefStore::open(&tmp).await?;

        // initially empty
        assert_eq!(store.len().await, 0);
        assert!(!store.load_failed());

        store.insert("dark_mode".into(), PrefValue::Bool(true)).await?;
        store.insert("launch_count".into(), PrefValue::Int(3)).await?;
        store
            .insert("recent_queries".into(), PrefValue::StrList(vec!["a".into(), "b".into()]))
            .await?;
        assert_eq!(store.get("launch_count").await, Some(PrefValue::Int(3)));

        // remove and reload persistence
        let existed = store.remove("dark_mode").await?;
        assert!(existed);
        let reloaded = JsonPrefStore::open(&tmp).await?;
        assert_eq!(reloaded.len().await, 2);
        assert_eq!(
            reloaded.get("recent_queries").await,
            Some(PrefValue::StrList(vec!["a".into(), "b".into()]))
        );

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn clear_all_empties_store_and_file() -> Result<(), anyhow::Error> {
        let tmp = temp_path("clear");
        let store = JsonPrefStore::open(&tmp).await?;
        store.insert("k1".into(), PrefValue::Str("v1".into())).await?;
        store.insert("k2".into(), PrefValue::Float(0.5)).await?;

        store.clear_all().await?;
        assert!(store.is_empty().await);

        // a fresh open must see the committed empty state
        let reloaded = JsonPrefStore::open(&tmp).await?;
        assert_eq!(reloaded.len().await, 0);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn corrupt_file_flags_load_failure() -> Result<(), anyhow::Error> {
        let tmp = temp_path("corrupt");
        tokio::fs::write(&tmp, b"{not json at all").await?;

        let store = JsonPrefStore::open(&tmp).await?;
        assert!(store.load_failed());
        assert_eq!(store.len().await, 0);
        let snapshot = store.snapshot().await?;
        assert!(snapshot.load_failed);

        // the bad bytes are untouched until an explicit clear
        let raw = tokio::fs::read(&tmp).await?;
        assert_eq!(raw, b"{not json at all");

        store.clear_all().await?;
        let healed = JsonPrefStore::open(&tmp).await?;
        assert!(!healed.load_failed());

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn snapshot_reports_entry_count_and_size() -> Result<(), anyhow::Error> {
        let tmp = temp_path("snapshot");
        let store = JsonPrefStore::open(&tmp).await?;
        let empty = store.snapshot().await?;
        assert_eq!(empty.entry_count, 0);

        store.insert("payload".into(), PrefValue::Str("x".repeat(1024))).await?;
        let grown = store.snapshot().await?;
        assert_eq!(grown.entry_count, 1);
        assert!(grown.approx_bytes > empty.approx_bytes + 1024);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }
}
