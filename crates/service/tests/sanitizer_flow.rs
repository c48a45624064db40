use std::sync::Arc;

use models::{ActionTaken, PrefValue, Verdict};
use service::policy::{ForcedClear, LoadFailure, SizeThreshold, REASON_FORCED, REASON_UNREADABLE};
use service::report::TracingSink;
use service::sanitizer::Sanitizer;
use service::storage::json_pref_store::JsonPrefStore;

fn temp_store_path(tag: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("pref_sanitizer_{tag}_{}.json", uuid::Uuid::new_v4()))
}

#[tokio::test]
async fn forced_policy_wipes_file_backed_store() -> Result<(), anyhow::Error> {
    let path = temp_store_path("forced");
    let store = JsonPrefStore::open(&path).await?;
    store.insert("launch_count".into(), PrefValue::Int(41)).await?;
    store
        .insert("cached_payload".into(), PrefValue::Str("x".repeat(4096)))
        .await?;
    assert_eq!(store.len().await, 2);

    let sanitizer =
        Sanitizer::new(store.clone(), Box::new(ForcedClear), Arc::new(TracingSink));
    let outcome = sanitizer.run().await;

    assert_eq!(outcome.verdict, Verdict::unhealthy(REASON_FORCED));
    assert_eq!(outcome.action_taken, ActionTaken::Cleared);
    assert!(outcome.error.is_none());

    // the clear must be visible to a fresh open, as if a new process started
    let reloaded = JsonPrefStore::open(&path).await?;
    assert_eq!(reloaded.len().await, 0);

    let _ = tokio::fs::remove_file(&path).await;
    Ok(())
}

#[tokio::test]
async fn size_threshold_leaves_small_store_alone() -> Result<(), anyhow::Error> {
    let path = temp_store_path("small");
    let store = JsonPrefStore::open(&path).await?;
    store.insert("dark_mode".into(), PrefValue::Bool(true)).await?;
    store.insert("volume".into(), PrefValue::Float(0.8)).await?;

    let policy = SizeThreshold { max_entries: 100, max_bytes: 1 << 20 };
    let sanitizer = Sanitizer::new(store.clone(), Box::new(policy), Arc::new(TracingSink));
    let outcome = sanitizer.run().await;

    assert_eq!(outcome.verdict, Verdict::Healthy);
    assert_eq!(outcome.action_taken, ActionTaken::None);

    let reloaded = JsonPrefStore::open(&path).await?;
    assert_eq!(reloaded.len().await, 2);
    assert_eq!(reloaded.get("dark_mode").await, Some(PrefValue::Bool(true)));

    let _ = tokio::fs::remove_file(&path).await;
    Ok(())
}

#[tokio::test]
async fn oversized_store_is_cleared_then_healthy_on_next_startup() -> Result<(), anyhow::Error> {
    let path = temp_store_path("oversized");
    let store = JsonPrefStore::open(&path).await?;
    for i in 0..500u64 {
        store.insert(format!("entry_{i}"), PrefValue::Int(i as i64)).await?;
    }

    let policy = || Box::new(SizeThreshold { max_entries: 100, max_bytes: 1 << 20 });
    let first = Sanitizer::new(store.clone(), policy(), Arc::new(TracingSink))
        .run()
        .await;
    assert_eq!(first.action_taken, ActionTaken::Cleared);

    // simulate the next process launch against the same file
    let reopened = JsonPrefStore::open(&path).await?;
    assert_eq!(reopened.len().await, 0);
    let second = Sanitizer::new(reopened, policy(), Arc::new(TracingSink))
        .run()
        .await;
    assert_eq!(second.verdict, Verdict::Healthy);
    assert_eq!(second.action_taken, ActionTaken::None);
    assert!(second.error.is_none());

    let _ = tokio::fs::remove_file(&path).await;
    Ok(())
}

#[tokio::test]
async fn corrupt_file_recovers_under_load_failure_policy() -> Result<(), anyhow::Error> {
    let path = temp_store_path("corrupt");
    tokio::fs::write(&path, b"\x00\xffdefinitely not json").await?;

    let store = JsonPrefStore::open(&path).await?;
    assert!(store.load_failed());

    let sanitizer = Sanitizer::new(store, Box::new(LoadFailure), Arc::new(TracingSink));
    let outcome = sanitizer.run().await;
    assert_eq!(outcome.verdict, Verdict::unhealthy(REASON_UNREADABLE));
    assert_eq!(outcome.action_taken, ActionTaken::Cleared);

    // the file now holds a valid empty map again
    let healed = JsonPrefStore::open(&path).await?;
    assert!(!healed.load_failed());
    assert_eq!(healed.len().await, 0);

    let _ = tokio::fs::remove_file(&path).await;
    Ok(())
}
