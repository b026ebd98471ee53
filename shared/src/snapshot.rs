//! Persisted chosen-state and the key-value store it lives in.
//!
//! Wire format is a JSON array mirroring the slices: `true`/`false` for a
//! simple slice, `{"split": true, "parts": [bool, bool]}` for a split one.
//! Any shape change to the catalogue is handled by bumping the storage key.

use std::cell::RefCell;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;
use crate::outcome::OutcomeRegistry;

pub const DEFAULT_STORAGE_KEY: &str = "fruitWheelChosen_v9";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitEntry {
    pub split: bool,
    #[serde(alias = "sub")]
    pub parts: [bool; 2],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SnapshotEntry {
    Simple(bool),
    Split(SplitEntry),
}

impl SnapshotEntry {
    pub fn split(parts: [bool; 2]) -> Self {
        SnapshotEntry::Split(SplitEntry { split: true, parts })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(pub Vec<SnapshotEntry>);

impl Snapshot {
    pub fn encode(&self) -> String {
        // a Vec of bools and fixed-shape structs always serializes
        serde_json::to_string(self).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn decode(raw: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Opaque durable key-value slot holding one encoded snapshot.
pub trait SnapshotStore {
    fn load(&self) -> Option<String>;
    fn save(&self, raw: &str);
    fn clear(&self);
}

/// In-process store, for tests and hosts without durable storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn with_contents(raw: &str) -> Self {
        Self {
            slot: RefCell::new(Some(raw.to_string())),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    fn save(&self, raw: &str) {
        *self.slot.borrow_mut() = Some(raw.to_string());
    }

    fn clear(&self) {
        self.slot.borrow_mut().take();
    }
}

pub fn persist<S: SnapshotStore + ?Sized>(registry: &OutcomeRegistry, store: &S) {
    store.save(&registry.snapshot().encode());
}

/// Rehydrates chosen flags. Absent or unusable data leaves everything
/// unchosen; it never fails the caller. Returns whether anything was applied.
pub fn rehydrate<S: SnapshotStore + ?Sized>(registry: &mut OutcomeRegistry, store: &S) -> bool {
    let Some(raw) = store.load() else {
        return false;
    };

    match Snapshot::decode(&raw).and_then(|snapshot| registry.restore(&snapshot)) {
        Ok(()) => true,
        Err(e) => {
            warn!("discarding stored wheel state: {e}");
            registry.reset();
            false
        }
    }
}
