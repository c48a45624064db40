use serde::Serialize;

/// Read-only, point-in-time summary of the store used for health assessment.
///
/// `approx_bytes` is the serialized size of the current contents; it tracks
/// what the store would write to disk, not what it holds in memory.
/// `load_failed` is set when the backing file existed but could not be
/// deserialized when the store was opened.
#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
pub struct StoreSnapshot {
    pub entry_count: usize,
    pub approx_bytes: u64,
    pub load_failed: bool,
}

impl StoreSnapshot {
    pub fn is_empty(&self) -> bool {
        self.entry_count == 0
    }
}
