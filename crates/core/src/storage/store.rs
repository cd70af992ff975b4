use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::errors::CoreError;

/// Handle returned by `subscribe`, used to unsubscribe.
pub type ListenerId = u64;

/// Callback invoked after every write. Listeners run synchronously inside
/// the write and must not call back into the same store.
pub type StorageListener = Box<dyn FnMut(&StorageEvent)>;

/// A change to one key, delivered to listeners after the write lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    pub key: String,
    /// `None` when the key did not exist before
    pub old_value: Option<String>,
    /// `None` when the key was removed
    pub new_value: Option<String>,
}

/// Synchronous string key/value storage with change notification.
///
/// This is the seam the host plugs browser storage (or anything else) into.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError>;

    fn remove(&mut self, key: &str) -> Result<(), CoreError>;

    fn subscribe(&mut self, listener: StorageListener) -> ListenerId;

    /// Returns `false` when no listener has that id.
    fn unsubscribe(&mut self, id: ListenerId) -> bool;
}

/// Listener bookkeeping shared by the store implementations.
#[derive(Default)]
pub struct Listeners {
    next_id: ListenerId,
    entries: Vec<(ListenerId, StorageListener)>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, listener: StorageListener) -> ListenerId {
        self.next_id += 1;
        self.entries.push((self.next_id, listener));
        self.next_id
    }

    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(existing, _)| *existing != id);
        self.entries.len() != before
    }

    pub fn notify(&mut self, event: &StorageEvent) {
        for (_, listener) in &mut self.entries {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}

/// In-memory store. Lives as long as the value does, like session storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    listeners: Listeners,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        let old_value = self.entries.insert(key.to_string(), value.to_string());
        self.listeners.notify(&StorageEvent {
            key: key.to_string(),
            old_value,
            new_value: Some(value.to_string()),
        });
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), CoreError> {
        if let Some(old_value) = self.entries.remove(key) {
            self.listeners.notify(&StorageEvent {
                key: key.to_string(),
                old_value: Some(old_value),
                new_value: None,
            });
        }
        Ok(())
    }

    fn subscribe(&mut self, listener: StorageListener) -> ListenerId {
        self.listeners.add(listener)
    }

    fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }
}

/// A shared handle: several trackers can sit on one store, the way
/// several pages share one browser storage area.
impl<S: KeyValueStore> KeyValueStore for Rc<RefCell<S>> {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        self.borrow().get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        self.borrow_mut().set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), CoreError> {
        self.borrow_mut().remove(key)
    }

    fn subscribe(&mut self, listener: StorageListener) -> ListenerId {
        self.borrow_mut().subscribe(listener)
    }

    fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.borrow_mut().unsubscribe(id)
    }
}
