//! Crate wide constants

/// Default number of terms kept in each expansion.
pub const DEFAULT_EXPANSION_ORDER: usize = 12;

/// Shallowest depth tried when choosing a depth from a maximum leaf occupancy.
pub const DEFAULT_MIN_DEPTH: u64 = 2;

/// Deepest depth tried when choosing a depth from a maximum leaf occupancy.
pub const MAX_PROBE_DEPTH: u64 = 7;

/// Shallowest level with an interaction list.
pub(crate) const M2L_MIN_LEVEL: u64 = 2;
