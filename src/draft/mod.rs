// ABOUTME: Draft persistence for in-progress quote requests
// Timestamp-keyed snapshots with a latest pointer, over a pluggable backend

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub mod storage;

pub use storage::{FileStorage, MemoryStorage, StorageBackend, StorageError, UnavailableStorage};

use crate::schema::FormValues;

const DRAFT_KEY_PREFIX: &str = "quote-draft-";
const LATEST_POINTER_KEY: &str = "quote-draft-latest";

/// One persisted snapshot of the editing session.
///
/// The logical shape is the compatibility surface: a draft saved by one
/// build must load in a later build, with fields the old schema lacked
/// filled from defaults (see `FormValues`' serde defaults).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftSnapshot {
    pub values: FormValues,
    pub current_page: u8,
    pub ai_assist_mode: bool,
    pub updated_at: i64,
}

/// Save/restore of one in-progress form over a `StorageBackend`.
///
/// Every save writes a new `quote-draft-<millis>` key and repoints
/// `quote-draft-latest` at it. Prior snapshots are left in place; `clear`
/// removes only the latest one plus the pointer. Storage failures degrade to
/// logged no-ops - the form must stay usable when drafts cannot persist.
pub struct DraftStore {
    backend: Box<dyn StorageBackend>,
    last_stamp: i64,
}

impl DraftStore {
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        Self { backend, last_stamp: 0 }
    }

    /// Persist the current state. Never fails; an unwritable backend is
    /// logged and ignored.
    pub fn save(&mut self, values: &FormValues, current_page: u8, ai_assist_mode: bool) {
        let snapshot = DraftSnapshot {
            values: values.clone(),
            current_page,
            ai_assist_mode,
            updated_at: self.next_stamp(),
        };

        let payload = match serde_json::to_string(&snapshot) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Unable to serialize draft: {}", e);
                return;
            }
        };

        let storage_key = format!("{}{}", DRAFT_KEY_PREFIX, snapshot.updated_at);
        if let Err(e) = self.backend.set(&storage_key, &payload) {
            warn!("Unable to save draft: {}", e);
            return;
        }
        if let Err(e) = self.backend.set(LATEST_POINTER_KEY, &storage_key) {
            warn!("Unable to update draft pointer: {}", e);
            return;
        }
        debug!("Saved draft {}", storage_key);
    }

    /// Load the most recent snapshot, or `None` if no draft exists or the
    /// stored payload cannot be read back.
    pub fn load(&self) -> Option<DraftSnapshot> {
        let latest_key = self.latest_key()?;
        let raw = self.backend.get(&latest_key)?;
        match serde_json::from_str(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!("Unable to load draft {}: {}", latest_key, e);
                None
            }
        }
    }

    /// Remove the latest snapshot and the pointer. Calling with no draft
    /// present is a no-op.
    pub fn clear(&mut self) {
        if let Some(latest_key) = self.latest_key() {
            self.backend.remove(&latest_key);
        }
        self.backend.remove(LATEST_POINTER_KEY);
    }

    /// Existence check without deserializing, used to decide whether to
    /// prompt about restoring.
    pub fn has_draft(&self) -> bool {
        self.latest_key().is_some()
    }

    /// Resolve the pointer, falling back to scanning draft keys for the
    /// greatest timestamp when the pointer is missing or points at a key
    /// that no longer exists.
    fn latest_key(&self) -> Option<String> {
        if let Some(pointer) = self.backend.get(LATEST_POINTER_KEY) {
            if self.backend.get(&pointer).is_some() {
                return Some(pointer);
            }
        }

        self.backend
            .keys()
            .into_iter()
            .filter(|key| key.starts_with(DRAFT_KEY_PREFIX) && key != LATEST_POINTER_KEY)
            .filter_map(|key| {
                key[DRAFT_KEY_PREFIX.len()..].parse::<i64>().ok().map(|stamp| (stamp, key))
            })
            .max_by_key(|(stamp, _)| *stamp)
            .map(|(_, key)| key)
    }

    /// Wall-clock millis, bumped past the previous stamp so keys stay
    /// strictly increasing even when saves land in the same millisecond.
    fn next_stamp(&mut self) -> i64 {
        let now = Utc::now().timestamp_millis();
        self.last_stamp = now.max(self.last_stamp + 1);
        self.last_stamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldId, FieldValue};
    use pretty_assertions::assert_eq;

    fn store() -> DraftStore {
        DraftStore::new(Box::new(MemoryStorage::new()))
    }

    fn sample_values() -> FormValues {
        let mut values = FormValues::defaults();
        values.set(FieldId::OrgName, FieldValue::Text("Acme Health".into()));
        values.set(FieldId::RequestorName, FieldValue::Text("Bob".into()));
        values.set(FieldId::ServiceType, FieldValue::Text("onsite".into()));
        values.set(FieldId::Languages, FieldValue::List(vec!["Spanish".into()]));
        values
    }

    #[test]
    fn test_save_load_round_trip() {
        let mut store = store();
        let values = sample_values();
        store.save(&values, 2, true);

        let snapshot = store.load().expect("draft should exist");
        assert_eq!(snapshot.values, values);
        assert_eq!(snapshot.current_page, 2);
        assert!(snapshot.ai_assist_mode);
    }

    #[test]
    fn test_load_without_draft_is_none() {
        assert!(store().load().is_none());
        assert!(!store().has_draft());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut store = store();
        store.clear();
        store.clear();
        assert!(!store.has_draft());

        store.save(&sample_values(), 1, false);
        assert!(store.has_draft());
        store.clear();
        assert!(!store.has_draft());
        assert!(store.load().is_none());
        store.clear();
        assert!(!store.has_draft());
    }

    #[test]
    fn test_latest_save_wins() {
        let mut store = store();
        let mut values = sample_values();
        store.save(&values, 1, false);

        values.set(FieldId::RequestorName, FieldValue::Text("Carol".into()));
        store.save(&values, 3, false);

        let snapshot = store.load().unwrap();
        assert_eq!(snapshot.values.requestor_name, "Carol");
        assert_eq!(snapshot.current_page, 3);
    }

    #[test]
    fn test_stale_pointer_falls_back_to_scan() {
        let mut backend = MemoryStorage::new();
        backend
            .set(
                "quote-draft-100",
                &serde_json::to_string(&DraftSnapshot {
                    values: sample_values(),
                    current_page: 2,
                    ai_assist_mode: false,
                    updated_at: 100,
                })
                .unwrap(),
            )
            .unwrap();
        backend
            .set(
                "quote-draft-200",
                &serde_json::to_string(&DraftSnapshot {
                    values: sample_values(),
                    current_page: 3,
                    ai_assist_mode: false,
                    updated_at: 200,
                })
                .unwrap(),
            )
            .unwrap();
        // Pointer references a snapshot that was deleted
        backend.set("quote-draft-latest", "quote-draft-999").unwrap();

        let store = DraftStore::new(Box::new(backend));
        let snapshot = store.load().expect("scan fallback should find a draft");
        assert_eq!(snapshot.updated_at, 200);
        assert_eq!(snapshot.current_page, 3);
    }

    #[test]
    fn test_unavailable_storage_degrades_silently() {
        let mut store = DraftStore::new(Box::new(UnavailableStorage));
        store.save(&sample_values(), 1, false);
        assert!(!store.has_draft());
        assert!(store.load().is_none());
        store.clear();
    }

    #[test]
    fn test_stamps_strictly_increase() {
        let mut store = store();
        store.save(&sample_values(), 1, false);
        let first = store.load().unwrap().updated_at;
        store.save(&sample_values(), 1, false);
        let second = store.load().unwrap().updated_at;
        assert!(second > first);
    }
}
