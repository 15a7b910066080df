use thiserror::Error;

/// Failures reported by `Table` operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    #[error("allocation of {capacity} slots failed")]
    OutOfMemory { capacity: usize },
    #[error("table full: all {capacity} slots occupied and resizing is disabled")]
    Full { capacity: usize },
    #[error("key not found")]
    NotFound,
    #[error("initial capacity must be greater than zero")]
    ZeroCapacity,
    #[error("invalid table configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// A `TableConfig` that would break the capacity policy.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("grow threshold {0} must be in (0, 1]")]
    GrowAt(f64),
    #[error("shrink threshold {shrink_below} must be in [0, {grow_at} / 2)")]
    ShrinkBelow { shrink_below: f64, grow_at: f64 },
    #[error("minimum capacity must be greater than zero")]
    MinCapacity,
}
