//! Slot: one cell of the table's backing array.

/// State of a single slot.
///
/// `Tombstone` marks a slot whose entry was deleted. Probes continue past it
/// (so keys placed further along the chain stay reachable) while inserts may
/// reuse it. Only a rehash turns tombstones back into `Empty`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot<K, V> {
    Empty,
    Tombstone,
    Occupied {
        /// Cached `KeyOps::hash` of `key`; rehashing reads this instead of
        /// calling back into the key ops.
        hash: u64,
        key: K,
        value: V,
    },
}

impl<K, V> Default for Slot<K, V> {
    fn default() -> Self {
        Slot::Empty
    }
}

impl<K, V> Slot<K, V> {
    /// True for a slot holding a live entry.
    #[inline]
    pub fn is_occupied(&self) -> bool {
        matches!(self, Slot::Occupied { .. })
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    #[inline]
    pub fn is_tombstone(&self) -> bool {
        matches!(self, Slot::Tombstone)
    }

    #[inline]
    pub fn key(&self) -> Option<&K> {
        match self {
            Slot::Occupied { key, .. } => Some(key),
            _ => None,
        }
    }

    #[inline]
    pub fn value(&self) -> Option<&V> {
        match self {
            Slot::Occupied { value, .. } => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn value_mut(&mut self) -> Option<&mut V> {
        match self {
            Slot::Occupied { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Key and value of a live entry.
    #[inline]
    pub fn entry(&self) -> Option<(&K, &V)> {
        match self {
            Slot::Occupied { key, value, .. } => Some((key, value)),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn entry_mut(&mut self) -> Option<(&K, &mut V)> {
        match self {
            Slot::Occupied { key, value, .. } => Some((key, value)),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn into_entry(self) -> Option<(K, V)> {
        match self {
            Slot::Occupied { key, value, .. } => Some((key, value)),
            _ => None,
        }
    }

    /// Replace this slot with a tombstone and hand back the live entry, if any.
    pub(crate) fn take_entry(&mut self) -> Option<(K, V)> {
        if !self.is_occupied() {
            return None;
        }
        core::mem::replace(self, Slot::Tombstone).into_entry()
    }
}
