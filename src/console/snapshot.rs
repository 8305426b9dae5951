use uuid::Uuid;

use crate::dto::event_dto::EventResponse;
use crate::dto::user_dto::UserResponse;

/// Entries a [`Snapshot`] can address individually.
pub trait Keyed {
    fn key(&self) -> Uuid;
}

impl Keyed for UserResponse {
    fn key(&self) -> Uuid {
        self.id
    }
}

impl Keyed for EventResponse {
    fn key(&self) -> Uuid {
        self.id
    }
}

/// The console's copy of a server collection, as of the last fetch plus the
/// mutations it has confirmed since.
///
/// A snapshot is not linearizable with respect to the server: writes made by
/// other clients are invisible until the next full [`Snapshot::replace`].
#[derive(Debug, Clone)]
pub struct Snapshot<T> {
    items: Vec<T>,
    loaded: bool,
}

impl<T> Default for Snapshot<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loaded: false,
        }
    }
}

impl<T: Keyed> Snapshot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
        self.loaded = true;
    }

    /// Swaps in `item` for the entry with the same key, keeping its position.
    /// Returns `false` if no such entry is cached.
    pub fn patch(&mut self, item: T) -> bool {
        match self.items.iter_mut().find(|e| e.key() == item.key()) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, key: Uuid) -> Option<T> {
        let idx = self.items.iter().position(|e| e.key() == key)?;
        Some(self.items.remove(idx))
    }

    /// Drops the cached entries; the next read should trigger a fetch.
    pub fn invalidate(&mut self) {
        self.items.clear();
        self.loaded = false;
    }

    pub fn get(&self, key: Uuid) -> Option<&T> {
        self.items.iter().find(|e| e.key() == key)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
