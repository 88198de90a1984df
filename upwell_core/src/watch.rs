// Copyright 2026 the Upwell Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Generational slot storage for watcher registrations.
//!
//! A [`WatchTable`] stores one value per active registration and hands out
//! [`WatchId`] handles. Freed slots are recycled via a free list, and
//! generation counters prevent stale handle access: a handle obtained before
//! a slot was freed never resolves again, even if the slot index is reused.
//!
//! This is what makes the watcher's cancellation semantics cheap to get
//! right. Unsubscribing twice, or unsubscribing after a `once` registration
//! already auto-deregistered itself, is a stale [`remove`](WatchTable::remove)
//! and therefore a no-op.

use alloc::vec::Vec;

/// Handle to a registration slot in a [`WatchTable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WatchId {
    idx: u32,
    generation: u32,
}

impl WatchId {
    /// Returns the raw slot index.
    ///
    /// Slot indices are reused after removal; the index alone does not
    /// identify a registration. It is useful as a compact lookup key when the
    /// owner re-validates through the table (the web backend stores it in a
    /// `WeakMap` and checks element identity on dispatch).
    #[must_use]
    pub fn index(self) -> u32 {
        self.idx
    }
}

struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Slot storage with generational handles and a free list.
pub struct WatchTable<T> {
    slots: Vec<Slot<T>>,
    free_list: Vec<u32>,
    /// Total slots ever allocated (live + vacant).
    slot_count: u32,
    /// Number of live registrations.
    live: u32,
}

impl<T> core::fmt::Debug for WatchTable<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WatchTable")
            .field("live", &self.live)
            .field("slot_count", &self.slot_count)
            .finish()
    }
}

impl<T> Default for WatchTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> WatchTable<T> {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            slot_count: 0,
            live: 0,
        }
    }

    /// Inserts a registration and returns its handle.
    ///
    /// Reuses a freed slot when one is available, bumping the slot's
    /// generation so handles to the previous occupant stay invalid.
    pub fn insert(&mut self, value: T) -> WatchId {
        let idx = if let Some(idx) = self.free_list.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.generation = slot.generation.wrapping_add(1);
            slot.value = Some(value);
            idx
        } else {
            let idx = self.slot_count;
            self.slot_count += 1;
            self.slots.push(Slot {
                generation: 0,
                value: Some(value),
            });
            idx
        };
        self.live += 1;
        WatchId {
            idx,
            generation: self.slots[idx as usize].generation,
        }
    }

    /// Returns the registration for `id`, or `None` if it was removed.
    #[must_use]
    pub fn get(&self, id: WatchId) -> Option<&T> {
        let slot = self.slots.get(id.idx as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.value.as_ref()
    }

    /// Mutable variant of [`get`](Self::get).
    #[must_use]
    pub fn get_mut(&mut self, id: WatchId) -> Option<&mut T> {
        let slot = self.slots.get_mut(id.idx as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.value.as_mut()
    }

    /// Returns the handle of the live registration occupying slot `idx`.
    #[must_use]
    pub fn id_at(&self, idx: u32) -> Option<WatchId> {
        let slot = self.slots.get(idx as usize)?;
        slot.value.as_ref()?;
        Some(WatchId {
            idx,
            generation: slot.generation,
        })
    }

    /// Removes the registration for `id` and returns it.
    ///
    /// Stale-safe: a handle that was already removed (explicitly or via slot
    /// reuse) yields `None` and leaves the table untouched.
    pub fn remove(&mut self, id: WatchId) -> Option<T> {
        let slot = self.slots.get_mut(id.idx as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let value = slot.value.take()?;
        self.free_list.push(id.idx);
        self.live -= 1;
        Some(value)
    }

    /// Returns `true` if `id` refers to a live registration.
    #[must_use]
    pub fn contains(&self, id: WatchId) -> bool {
        self.get(id).is_some()
    }

    /// Drops every live registration.
    ///
    /// Outstanding handles become stale; the slots are recycled by later
    /// inserts (which bump generations, so stale handles never resolve).
    pub fn clear(&mut self) {
        let mut idx: u32 = 0;
        for slot in &mut self.slots {
            if slot.value.take().is_some() {
                self.free_list.push(idx);
            }
            idx += 1;
        }
        self.live = 0;
    }

    /// Number of live registrations.
    #[must_use]
    pub fn len(&self) -> u32 {
        self.live
    }

    /// Returns `true` if no registrations are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let mut table = WatchTable::new();
        let id = table.insert("a");
        assert_eq!(table.get(id), Some(&"a"));
        assert_eq!(table.len(), 1);
        assert!(table.contains(id));
    }

    #[test]
    fn remove_returns_value() {
        let mut table = WatchTable::new();
        let id = table.insert(7);
        assert_eq!(table.remove(id), Some(7));
        assert!(table.is_empty());
        assert_eq!(table.get(id), None);
    }

    #[test]
    fn double_remove_is_noop() {
        let mut table = WatchTable::new();
        let id = table.insert(1);
        assert_eq!(table.remove(id), Some(1));
        // The second remove must not disturb the free list or live count.
        assert_eq!(table.remove(id), None);
        assert_eq!(table.len(), 0);
        let _ = table.insert(2);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn slot_reuse_bumps_generation() {
        let mut table = WatchTable::new();
        let first = table.insert("old");
        table.remove(first);
        let second = table.insert("new");
        // Same slot, different generation.
        assert_eq!(first.index(), second.index());
        assert_ne!(first, second);
        assert_eq!(table.get(first), None);
        assert_eq!(table.get(second), Some(&"new"));
    }

    #[test]
    fn stale_remove_after_reuse_leaves_new_value() {
        let mut table = WatchTable::new();
        let first = table.insert("old");
        table.remove(first);
        let second = table.insert("new");
        assert_eq!(table.remove(first), None);
        assert_eq!(table.get(second), Some(&"new"));
    }

    #[test]
    fn id_at_resolves_live_slots_only() {
        let mut table = WatchTable::new();
        let id = table.insert("x");
        assert_eq!(table.id_at(id.index()), Some(id));
        table.remove(id);
        assert_eq!(table.id_at(id.index()), None);
    }

    #[test]
    fn clear_invalidates_handles() {
        let mut table = WatchTable::new();
        let a = table.insert(1);
        let b = table.insert(2);
        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.get(a), None);
        assert_eq!(table.remove(b), None);
        // Cleared slots are recycled and outstanding handles stay stale.
        let c = table.insert(3);
        assert_eq!(table.get(a), None);
        assert_eq!(table.get(c), Some(&3));
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut table = WatchTable::new();
        let id = table.insert(10);
        *table.get_mut(id).unwrap() += 5;
        assert_eq!(table.get(id), Some(&15));
    }
}
