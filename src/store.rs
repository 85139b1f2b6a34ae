//! Draft persistence.
//!
//! Only raw inputs are persisted — computed totals are always re-derived
//! on load. The store is a synchronous string key-value seam modeled on
//! localStorage-like backends; writes can fail when the backing storage
//! is full, and that failure must never corrupt the in-memory draft.

use std::collections::HashMap;

use crate::core::{FactureError, InvoiceDraft};

/// Fixed key under which the draft snapshot is stored.
pub const DRAFT_STORAGE_KEY: &str = "invoiceData";

/// Synchronous key-value store for draft snapshots.
pub trait DraftStore {
    /// Write a value. Fails when the backing storage rejects the write
    /// (typically a quota limit).
    fn put(&mut self, key: &str, value: &str) -> Result<(), FactureError>;

    /// Read a value back; `None` when the key has never been written.
    fn get(&self, key: &str) -> Result<Option<String>, FactureError>;
}

/// In-memory store, with an optional byte budget to exercise the quota
/// failure path.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    max_value_bytes: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that rejects any value larger than `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            entries: HashMap::new(),
            max_value_bytes: Some(bytes),
        }
    }
}

impl DraftStore for MemoryStore {
    fn put(&mut self, key: &str, value: &str) -> Result<(), FactureError> {
        if let Some(max) = self.max_value_bytes {
            if value.len() > max {
                return Err(FactureError::Store(format!(
                    "storage quota exceeded ({} bytes > {max})",
                    value.len()
                )));
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>, FactureError> {
        Ok(self.entries.get(key).cloned())
    }
}

/// Serialize the draft and write it under [`DRAFT_STORAGE_KEY`].
pub fn save_draft(store: &mut dyn DraftStore, draft: &InvoiceDraft) -> Result<(), FactureError> {
    let json = serde_json::to_string(draft).map_err(|e| FactureError::Store(e.to_string()))?;
    store.put(DRAFT_STORAGE_KEY, &json)
}

/// Load a previously saved draft, if any. A corrupt snapshot is an error,
/// not a silently empty draft.
pub fn load_draft(store: &dyn DraftStore) -> Result<Option<InvoiceDraft>, FactureError> {
    match store.get(DRAFT_STORAGE_KEY)? {
        Some(json) => serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| FactureError::Store(e.to_string())),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn draft() -> InvoiceDraft {
        let mut draft = InvoiceDraft::new(
            "FA-202406-007",
            NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
        );
        draft.seller.name = "Atelier Dupont".into();
        draft.lines[0].unit_price = dec!(450);
        draft.deposit = dec!(100);
        draft
    }

    #[test]
    fn save_then_load_roundtrips() {
        let mut store = MemoryStore::new();
        let original = draft();

        save_draft(&mut store, &original).unwrap();
        let loaded = load_draft(&store).unwrap().unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn empty_store_loads_none() {
        let store = MemoryStore::new();
        assert!(load_draft(&store).unwrap().is_none());
    }

    #[test]
    fn quota_exhaustion_is_a_store_error() {
        let mut store = MemoryStore::with_quota(16);
        let err = save_draft(&mut store, &draft()).unwrap_err();
        assert!(matches!(err, FactureError::Store(_)));
        // Nothing was written.
        assert!(load_draft(&store).unwrap().is_none());
    }

    #[test]
    fn corrupt_snapshot_is_an_error() {
        let mut store = MemoryStore::new();
        store.put(DRAFT_STORAGE_KEY, "{not json").unwrap();
        assert!(matches!(
            load_draft(&store),
            Err(FactureError::Store(_))
        ));
    }
}
