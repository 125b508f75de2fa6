use vocab_deck::{KeyValueStore, StoreError};

/// `window.localStorage` behind the core's key-value trait.
///
/// Private browsing modes may deny access entirely; the handle then reads as
/// empty and rejects every write.
#[derive(Clone)]
pub struct LocalStorage {
    storage: Option<web_sys::Storage>,
}

impl LocalStorage {
    pub fn open() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("storage: localStorage unavailable, progress will not persist");
        }
        Self { storage }
    }

    fn writable(&self) -> Result<&web_sys::Storage, StoreError> {
        self.storage.as_ref().ok_or(StoreError::Unavailable)
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.writable()?
            .set_item(key, value)
            .map_err(|e| StoreError::Rejected {
                key: key.to_string(),
                reason: format!("{e:?}"),
            })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.writable()?
            .remove_item(key)
            .map_err(|e| StoreError::Rejected {
                key: key.to_string(),
                reason: format!("{e:?}"),
            })
    }
}
