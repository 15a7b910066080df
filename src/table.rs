//! Table: open-addressing hash table with linear probing and tombstone deletion.
//!
//! Layout: one contiguous `Vec<Slot<K, V>>`. A key's home slot is
//! `hash % capacity`; collisions step +1 slot at a time, wrapping at the end.
//!
//! Probing rules
//! - Lookups skip tombstones and stop at the first `Empty` slot, or after a
//!   full lap for a table that has no empty slot left.
//! - Placement of a new key takes the first non-occupied slot on its chain,
//!   reusing a tombstone when one comes first.
//!
//! Resizing
//! - Before a new key is placed, the table doubles if the key would bring the
//!   load to `grow_at`, or rehashes at the same capacity if tombstones are
//!   what push it there. While resizing is enabled this keeps at least one
//!   `Empty` slot, so probes always terminate.
//! - After a delete, the table halves once the load drops under
//!   `shrink_below`, never going below `min_capacity`.
//! - Every rehash reads the hash cached in each slot; `KeyOps` is never called
//!   while entries are being moved.
//!
//! References returned by `find_mut`/`update` borrow the table mutably, so a
//! resize can only happen after they are gone.

use crate::config::TableConfig;
use crate::error::TableError;
use crate::key_ops::{HasherOps, KeyOps};
use crate::slot::Slot;
use core::borrow::Borrow;
use core::fmt;
use log::{debug, trace, warn};

#[derive(Clone)]
pub struct Table<K, V, O = HasherOps> {
    slots: Vec<Slot<K, V>>,
    len: usize,
    tombstones: usize,
    ops: O,
    config: TableConfig,
}

fn alloc_slots<K, V>(capacity: usize) -> Result<Vec<Slot<K, V>>, TableError> {
    let mut slots = Vec::new();
    slots
        .try_reserve_exact(capacity)
        .map_err(|_| TableError::OutOfMemory { capacity })?;
    slots.resize_with(capacity, Slot::default);
    Ok(slots)
}

impl<K, V> Table<K, V>
where
    HasherOps: KeyOps<K>,
{
    /// Create a table with `capacity` empty slots, default key ops and the
    /// default capacity policy.
    pub fn with_capacity(capacity: usize) -> Result<Self, TableError> {
        Self::with_config(capacity, HasherOps::default(), TableConfig::default())
    }
}

impl<K, V, O> Table<K, V, O>
where
    O: KeyOps<K>,
{
    pub fn with_capacity_and_ops(capacity: usize, ops: O) -> Result<Self, TableError> {
        Self::with_config(capacity, ops, TableConfig::default())
    }

    pub fn with_config(capacity: usize, ops: O, config: TableConfig) -> Result<Self, TableError> {
        config.validate()?;
        if capacity == 0 {
            return Err(TableError::ZeroCapacity);
        }
        let slots = alloc_slots(capacity)?;
        trace!("created table with {} slots", capacity);
        Ok(Self {
            slots,
            len: 0,
            tombstones: 0,
            ops,
            config,
        })
    }

    /// Release the slot array. Equivalent to dropping the table.
    pub fn destroy(self) {
        trace!(
            "destroying table with {} slots, {} entries",
            self.slots.len(),
            self.len
        );
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn tombstones(&self) -> usize {
        self.tombstones
    }

    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.slots.len() as f64
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// The raw slot array; test occupancy with `Slot::is_occupied`.
    pub fn slots(&self) -> &[Slot<K, V>] {
        &self.slots
    }

    #[inline]
    fn home(&self, hash: u64) -> usize {
        (hash % self.slots.len() as u64) as usize
    }

    fn find_index<Q>(&self, hash: u64, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        O: KeyOps<Q>,
    {
        let capacity = self.slots.len();
        let mut i = self.home(hash);
        for _ in 0..capacity {
            match &self.slots[i] {
                Slot::Empty => return None,
                Slot::Occupied { hash: h, key: k, .. } if *h == hash => {
                    let k: &Q = k.borrow();
                    if KeyOps::<Q>::eq(&self.ops, k, key) {
                        return Some(i);
                    }
                }
                _ => {}
            }
            i = (i + 1) % capacity;
        }
        None
    }

    /// First slot on the chain starting at `hash` that holds no live entry.
    fn free_index(&self, hash: u64) -> Option<usize> {
        let capacity = self.slots.len();
        let mut i = self.home(hash);
        for _ in 0..capacity {
            if !self.slots[i].is_occupied() {
                return Some(i);
            }
            i = (i + 1) % capacity;
        }
        None
    }

    /// Make room for one new key, then return the slot it goes into.
    fn vacant_index(&mut self, hash: u64) -> Result<usize, TableError> {
        self.reserve_one()?;
        match self.free_index(hash) {
            Some(i) => Ok(i),
            None => unreachable!(
                "probe exhausted all {} slots with {} entries",
                self.slots.len(),
                self.len
            ),
        }
    }

    fn reserve_one(&mut self) -> Result<(), TableError> {
        let capacity = self.slots.len();
        if self.config.resizable && self.config.over_grow_threshold(self.len + 1, capacity) {
            let mut target = capacity;
            while self.config.over_grow_threshold(self.len + 1, target) {
                target = target
                    .checked_mul(2)
                    .ok_or(TableError::OutOfMemory { capacity: usize::MAX })?;
            }
            return self.rehash(target);
        }
        if self.tombstones > 0
            && self
                .config
                .over_grow_threshold(self.len + self.tombstones + 1, capacity)
        {
            return self.rehash(capacity);
        }
        if self.len == capacity {
            return Err(TableError::Full { capacity });
        }
        Ok(())
    }

    /// Move every live entry into a fresh array of `capacity` slots, dropping
    /// tombstones. On allocation failure the table is left untouched.
    fn rehash(&mut self, capacity: usize) -> Result<(), TableError> {
        debug_assert!(self.len < capacity);
        let fresh = alloc_slots(capacity)?;
        let old = core::mem::replace(&mut self.slots, fresh);
        let old_capacity = old.len();
        for slot in old {
            if let Slot::Occupied { hash, key, value } = slot {
                let mut i = (hash % capacity as u64) as usize;
                while self.slots[i].is_occupied() {
                    i = (i + 1) % capacity;
                }
                self.slots[i] = Slot::Occupied { hash, key, value };
            }
        }
        debug!(
            "rehashed {} entries ({} tombstones dropped): {} -> {} slots",
            self.len, self.tombstones, old_capacity, capacity
        );
        self.tombstones = 0;
        Ok(())
    }

    fn place(&mut self, i: usize, hash: u64, key: K, value: V) -> &mut V {
        if self.slots[i].is_tombstone() {
            self.tombstones -= 1;
        }
        self.slots[i] = Slot::Occupied { hash, key, value };
        self.len += 1;
        self.value_at_mut(i)
    }

    fn value_at_mut(&mut self, i: usize) -> &mut V {
        match &mut self.slots[i] {
            Slot::Occupied { value, .. } => value,
            _ => unreachable!("slot {} holds no entry", i),
        }
    }

    /// Insert `key -> value`, overwriting and returning the previous value if
    /// the key is already present. Only a new key can trigger a resize.
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>, TableError> {
        let hash = self.ops.hash(&key);
        if let Some(i) = self.find_index(hash, &key) {
            let slot = self.value_at_mut(i);
            return Ok(Some(core::mem::replace(slot, value)));
        }
        let i = self.vacant_index(hash)?;
        self.place(i, hash, key, value);
        Ok(None)
    }

    /// Get-or-insert-default: returns the value for `key`, inserting
    /// `V::default()` first if it is absent.
    ///
    /// ```
    /// use probe_table::Table;
    ///
    /// let mut counts: Table<&str, u32> = Table::with_capacity(8).unwrap();
    /// for word in "a b a".split(' ') {
    ///     *counts.update(word).unwrap() += 1;
    /// }
    /// assert_eq!(counts.find("a"), Some(&2));
    /// ```
    pub fn update(&mut self, key: K) -> Result<&mut V, TableError>
    where
        V: Default,
    {
        self.update_with(key, V::default)
    }

    /// Like `update`, but builds the missing value with `default`, which runs
    /// only if the key is absent.
    pub fn update_with<F>(&mut self, key: K, default: F) -> Result<&mut V, TableError>
    where
        F: FnOnce() -> V,
    {
        let hash = self.ops.hash(&key);
        if let Some(i) = self.find_index(hash, &key) {
            return Ok(self.value_at_mut(i));
        }
        let i = self.vacant_index(hash)?;
        Ok(self.place(i, hash, key, default()))
    }

    pub fn find<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        O: KeyOps<Q>,
    {
        let i = self.find_index(KeyOps::<Q>::hash(&self.ops, key), key)?;
        self.slots[i].value()
    }

    pub fn find_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        O: KeyOps<Q>,
    {
        let i = self.find_index(KeyOps::<Q>::hash(&self.ops, key), key)?;
        self.slots[i].value_mut()
    }

    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        O: KeyOps<Q>,
    {
        let i = self.find_index(KeyOps::<Q>::hash(&self.ops, key), key)?;
        self.slots[i].entry()
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        O: KeyOps<Q>,
    {
        self.slot_index(key).is_some()
    }

    /// Position of the slot holding `key`. Stable until the next resize.
    pub fn slot_index<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        O: KeyOps<Q>,
    {
        self.find_index(KeyOps::<Q>::hash(&self.ops, key), key)
    }

    /// Remove `key` and return its value; `TableError::NotFound` if absent.
    pub fn delete<Q>(&mut self, key: &Q) -> Result<V, TableError>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        O: KeyOps<Q>,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    pub fn remove_entry<Q>(&mut self, key: &Q) -> Result<(K, V), TableError>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        O: KeyOps<Q>,
    {
        let hash = KeyOps::<Q>::hash(&self.ops, key);
        let i = self.find_index(hash, key).ok_or(TableError::NotFound)?;
        let entry = self.slots[i].take_entry().ok_or(TableError::NotFound)?;
        self.len -= 1;
        self.tombstones += 1;
        self.maybe_shrink();
        Ok(entry)
    }

    fn maybe_shrink(&mut self) {
        let capacity = self.slots.len();
        let half = capacity / 2;
        if !self.config.resizable
            || half < self.config.min_capacity.max(1)
            || !self.config.under_shrink_threshold(self.len, capacity)
        {
            return;
        }
        // A half-size table that the next insert would grow again stays as is.
        if self.config.over_grow_threshold(self.len + 1, half) {
            return;
        }
        // The entry is already gone; a failed shrink only costs memory.
        if let Err(err) = self.rehash(half) {
            warn!("keeping {} slots, shrink failed: {}", capacity, err);
        }
    }

    /// Remove every entry, keeping the current capacity.
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = Slot::Empty;
        }
        self.len = 0;
        self.tombstones = 0;
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            it: self.slots.iter(),
            remaining: self.len,
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            it: self.slots.iter_mut(),
            remaining: self.len,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }
}

/// Iterator over live entries, in slot order.
pub struct Iter<'a, K, V> {
    it: core::slice::Iter<'a, Slot<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let item = self.it.by_ref().find_map(Slot::entry)?;
        self.remaining -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

/// Iterator over live entries with mutable values, in slot order.
pub struct IterMut<'a, K, V> {
    it: core::slice::IterMut<'a, Slot<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let item = self.it.by_ref().find_map(Slot::entry_mut)?;
        self.remaining -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

/// Owning iterator over live entries, in slot order.
pub struct IntoIter<K, V> {
    it: std::vec::IntoIter<Slot<K, V>>,
    remaining: usize,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let item = self.it.by_ref().find_map(Slot::into_entry)?;
        self.remaining -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V, O> IntoIterator for Table<K, V, O> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            it: self.slots.into_iter(),
            remaining: self.len,
        }
    }
}

impl<'a, K, V, O> IntoIterator for &'a Table<K, V, O>
where
    O: KeyOps<K>,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, O> fmt::Debug for Table<K, V, O>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.slots.iter().filter_map(Slot::entry))
            .finish()
    }
}
