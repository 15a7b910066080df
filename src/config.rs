//! Per-table capacity policy.
//!
//! Defaults: grow ×2 once a new key would bring the load to 0.75, shrink ÷2
//! once a delete leaves the load under 0.25, never shrink below 4 slots.
//! `shrink_below < grow_at / 2` keeps the two triggers apart: a table that
//! just grew sits at roughly `grow_at / 2` load, above the shrink trigger, and
//! a table that just shrank sits under `2 * shrink_below`, below the grow
//! trigger. Slot counts are whole numbers, so at small capacities the table
//! also skips a shrink that the next insert would undo.
//!
//! The builder methods set exactly the field they name; `validate` reports a
//! combination that breaks the rules above.

use crate::error::ConfigError;

pub const DEFAULT_GROW_AT: f64 = 0.75;
pub const DEFAULT_SHRINK_BELOW: f64 = 0.25;
pub const DEFAULT_MIN_CAPACITY: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableConfig {
    /// Load factor at which inserting a new key grows the table first.
    pub grow_at: f64,
    /// Load factor under which a delete halves the table.
    pub shrink_below: f64,
    /// Floor for shrinking. Does not constrain the initial capacity.
    pub min_capacity: usize,
    /// When false the capacity never changes and a full table reports
    /// `TableError::Full`.
    pub resizable: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            grow_at: DEFAULT_GROW_AT,
            shrink_below: DEFAULT_SHRINK_BELOW,
            min_capacity: DEFAULT_MIN_CAPACITY,
            resizable: true,
        }
    }
}

impl TableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the grow threshold. Lowering it under twice `shrink_below` makes
    /// the config invalid until the shrink threshold is lowered too.
    pub fn with_grow_at(mut self, grow_at: f64) -> Self {
        self.grow_at = grow_at;
        self
    }

    pub fn with_shrink_below(mut self, shrink_below: f64) -> Self {
        self.shrink_below = shrink_below;
        self
    }

    pub fn with_min_capacity(mut self, min_capacity: usize) -> Self {
        self.min_capacity = min_capacity;
        self
    }

    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        // Written so that NaN fails every check.
        if !(self.grow_at > 0.0 && self.grow_at <= 1.0) {
            return Err(ConfigError::GrowAt(self.grow_at));
        }
        if !(self.shrink_below >= 0.0 && self.shrink_below < self.grow_at / 2.0) {
            return Err(ConfigError::ShrinkBelow {
                shrink_below: self.shrink_below,
                grow_at: self.grow_at,
            });
        }
        if self.min_capacity == 0 {
            return Err(ConfigError::MinCapacity);
        }
        Ok(())
    }

    /// True if a table holding `len` entries in `capacity` slots has reached
    /// the grow threshold.
    #[inline]
    pub(crate) fn over_grow_threshold(&self, len: usize, capacity: usize) -> bool {
        len as f64 >= capacity as f64 * self.grow_at
    }

    #[inline]
    pub(crate) fn under_shrink_threshold(&self, len: usize, capacity: usize) -> bool {
        (len as f64) < capacity as f64 * self.shrink_below
    }
}
