use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage is unavailable")]
    Unavailable,

    #[error("storage rejected the write to {key}: {reason}")]
    Rejected { key: String, reason: String },

    #[error("could not encode record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A string key-value store with browser `localStorage` semantics:
/// synchronous, no transactions, reads never fail (absent == missing).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store. Clones share the same map, like handles to one
/// `localStorage`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
    reject_writes: Rc<Cell<bool>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent writes fail, as a full or disabled storage would.
    pub fn set_reject_writes(&self, reject: bool) {
        self.reject_writes.set(reject);
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    fn check_writable(&self, key: &str) -> Result<(), StoreError> {
        if self.reject_writes.get() {
            return Err(StoreError::Rejected {
                key: key.to_string(),
                reason: "quota exceeded".to_string(),
            });
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check_writable(key)?;
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.check_writable(key)?;
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_entries() {
        let a = MemoryStore::new();
        let b = a.clone();
        a.set("k", "v").unwrap();
        assert_eq!(b.get("k").as_deref(), Some("v"));
        b.remove("k").unwrap();
        assert!(a.get("k").is_none());
        assert!(a.is_empty());
    }

    #[test]
    fn rejected_writes_leave_store_untouched() {
        let s = MemoryStore::new();
        s.set("k", "v").unwrap();
        s.set_reject_writes(true);
        assert!(matches!(s.set("k", "w"), Err(StoreError::Rejected { .. })));
        assert!(s.remove("k").is_err());
        assert_eq!(s.get("k").as_deref(), Some("v"));
    }

    #[test]
    fn encoding_failures_have_their_own_variant() {
        let err: StoreError = serde_json::from_str::<u8>("\"x\"").unwrap_err().into();
        assert!(matches!(err, StoreError::Encode(_)));
        assert!(err.to_string().starts_with("could not encode record"));
    }
}
