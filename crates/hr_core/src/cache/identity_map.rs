//! Identity map keyed by integer primary key.
//!
//! # Responsibility
//! - Keep at most one live in-memory object per stored row.
//! - Hand out shared handles so callers observe each other's edits.
//!
//! # Invariants
//! - `register` never replaces an existing entry for the same id.
//! - `insert` always wins; it is reserved for freshly inserted rows.
//! - Entries leave the map only through `evict` or `clear`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Shared, mutable handle to a cached object.
pub type Handle<T> = Rc<RefCell<T>>;

/// Per-session mapping from primary key to the single object for that row.
#[derive(Debug)]
pub struct IdentityMap<T> {
    entries: RefCell<HashMap<i64, Handle<T>>>,
}

impl<T> Default for IdentityMap<T> {
    fn default() -> Self {
        Self {
            entries: RefCell::new(HashMap::new()),
        }
    }
}

impl<T> IdentityMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached handle for `id`, if any.
    pub fn get(&self, id: i64) -> Option<Handle<T>> {
        self.entries.borrow().get(&id).cloned()
    }

    /// Registers `handle` under `id` unless another object already owns it.
    ///
    /// Returns the handle that is cached after the call.
    pub fn register(&self, id: i64, handle: &Handle<T>) -> Handle<T> {
        self.entries
            .borrow_mut()
            .entry(id)
            .or_insert_with(|| Rc::clone(handle))
            .clone()
    }

    /// Caches `handle` under `id`, replacing any previous entry.
    pub fn insert(&self, id: i64, handle: &Handle<T>) -> Option<Handle<T>> {
        self.entries.borrow_mut().insert(id, Rc::clone(handle))
    }

    /// Removes the entry for `id`, returning it when present.
    pub fn evict(&self, id: i64) -> Option<Handle<T>> {
        self.entries.borrow_mut().remove(&id)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.entries.borrow().contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Returns cached ids in ascending order.
    pub fn ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.entries.borrow().keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}
