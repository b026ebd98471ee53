use shared::SnapshotStore;
use web_sys::{window, Storage};

/// Snapshot store backed by `window.localStorage`. Every call degrades to a
/// no-op when storage is unavailable (private mode, sandboxed iframes).
#[derive(Debug, Clone, PartialEq)]
pub struct LocalStorageStore {
    key: String,
}

impl LocalStorageStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Option<Storage> {
        window().and_then(|w| w.local_storage().ok().flatten())
    }
}

impl SnapshotStore for LocalStorageStore {
    fn load(&self) -> Option<String> {
        Self::storage().and_then(|s| s.get_item(&self.key).ok().flatten())
    }

    fn save(&self, raw: &str) {
        match Self::storage() {
            Some(storage) => {
                if let Err(e) = storage.set_item(&self.key, raw) {
                    log::warn!("could not save wheel state under {}: {e:?}", self.key);
                }
            }
            None => log::debug!("localStorage unavailable, wheel state not saved"),
        }
    }

    fn clear(&self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(&self.key);
        }
    }
}
