//! Insertion-ordered, identity-keyed map with position pinning.
//!
//! [`OrderedSlots`] keeps one slot per identity in first-insertion order.
//! Updating an existing identity replaces its value in place, so the
//! position never moves. A slot can also be *reserved*: the identity keeps
//! its position while holding no value, to be filled later. Removing an
//! identity vacates its slot; inserting the same identity again appends a
//! fresh slot at the end.

use std::collections::HashMap;
use std::mem;

#[derive(Debug)]
enum Slot<V> {
    Occupied(V),
    Reserved,
    Vacated,
}

impl<V> Slot<V> {
    fn replace(&mut self, next: Slot<V>) -> Option<V> {
        match mem::replace(self, next) {
            Slot::Occupied(value) => Some(value),
            Slot::Reserved | Slot::Vacated => None,
        }
    }
}

#[derive(Debug)]
struct Entry<V> {
    id: String,
    slot: Slot<V>,
}

/// An insertion-ordered map from identity to value.
#[derive(Debug)]
pub struct OrderedSlots<V> {
    entries: Vec<Entry<V>>,
    index: HashMap<String, usize>,
}

impl<V> Default for OrderedSlots<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> OrderedSlots<V> {
    /// Create an empty map.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Create an empty map with room for `capacity` identities.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Number of live identities (occupied or reserved).
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if no identity is live.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns `true` if `id` is live, whether occupied or reserved.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// The value held for `id`. Reserved slots hold no value.
    pub fn get(&self, id: &str) -> Option<&V> {
        let &pos = self.index.get(id)?;
        match &self.entries[pos].slot {
            Slot::Occupied(value) => Some(value),
            Slot::Reserved | Slot::Vacated => None,
        }
    }

    /// Store `value` under `id`.
    ///
    /// An existing identity keeps its position and the previous value, if
    /// any, is returned. A new identity is appended.
    pub fn insert(&mut self, id: String, value: V) -> Option<V> {
        if let Some(&pos) = self.index.get(&id) {
            return self.entries[pos].slot.replace(Slot::Occupied(value));
        }
        self.index.insert(id.clone(), self.entries.len());
        self.entries.push(Entry {
            id,
            slot: Slot::Occupied(value),
        });
        None
    }

    /// Empty the slot for `id` while keeping its position.
    ///
    /// Returns the value that was there. An unknown identity is left
    /// unknown and yields `None`.
    pub fn reserve(&mut self, id: &str) -> Option<V> {
        let &pos = self.index.get(id)?;
        self.entries[pos].slot.replace(Slot::Reserved)
    }

    /// Drop `id` from the map, returning its value if it held one.
    pub fn remove(&mut self, id: &str) -> Option<V> {
        let pos = self.index.remove(id)?;
        self.entries[pos].slot.replace(Slot::Vacated)
    }

    /// Live identities in position order.
    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries
            .iter()
            .filter(|e| !matches!(e.slot, Slot::Vacated))
            .map(|e| e.id.as_str())
    }

    /// Occupied entries in position order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> + '_ {
        self.entries.iter().filter_map(|e| match &e.slot {
            Slot::Occupied(value) => Some((e.id.as_str(), value)),
            Slot::Reserved | Slot::Vacated => None,
        })
    }

    /// Consume the map, yielding occupied entries in position order.
    pub fn into_entries(self) -> impl Iterator<Item = (String, V)> {
        self.entries.into_iter().filter_map(|e| match e.slot {
            Slot::Occupied(value) => Some((e.id, value)),
            Slot::Reserved | Slot::Vacated => None,
        })
    }

    /// Consume the map, yielding occupied values in position order.
    pub fn into_values(self) -> Vec<V> {
        self.into_entries().map(|(_, value)| value).collect()
    }
}
