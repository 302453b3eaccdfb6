//! Utility types for trait definitions.
use std::time::Duration;

/// Type to handle FMM related errors
#[derive(thiserror::Error, Debug)]
pub enum FmmError {
    /// Refinement depth outside of what the Morton encoding supports
    #[error("Invalid depth {depth}, must lie in 0..={max}")]
    InvalidDepth {
        /// Requested depth
        depth: u64,
        /// Deepest supported level
        max: u64,
    },

    /// Malformed user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A pass of the FMM was called out of order
    #[error("Invalid state: expected {expected:?}, found {found:?}")]
    InvalidState {
        /// State the pass requires
        expected: FmmState,
        /// State the FMM was in
        found: FmmState,
    },

    /// A point whose global index has no associated charge
    #[error("No charge associated with point of global index {0}")]
    MissingCharge(usize),

    /// Failure to run some business logic
    #[error("Failed: {0}")]
    Failed(String),
}

/// Stages of an FMM evaluation, each pass moves the FMM to the next state.
///
/// `LeafPopulated` → `UpwardComplete` → `Downward1Complete` → `Downward2Complete` → `Evaluated`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FmmState {
    /// Tree built, points sorted into leaves, all coefficients zero.
    #[default]
    LeafPopulated,

    /// Multipole expansions accumulated up to level 2.
    UpwardComplete,

    /// Interaction list contributions translated into local expansions at every level.
    Downward1Complete,

    /// Local expansions propagated down to the leaves.
    Downward2Complete,

    /// Potentials evaluated at all targets.
    Evaluated,
}

/// Enumeration of operator types for timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FmmOperatorType {
    /// particle to multipole
    P2M,

    /// multipole to multipole (level)
    M2M(u64),

    /// multipole to local (level)
    M2L(u64),

    /// local to local (level)
    L2L(u64),

    /// local to particle
    L2P,

    /// particle to particle
    P2P,
}

/// Timing of a single FMM operator
#[derive(Debug, Clone, Copy)]
pub struct FmmOperatorTime {
    /// Operator name
    pub operator: FmmOperatorType,

    /// Time in milliseconds
    pub time: u64,
}

impl FmmOperatorTime {
    /// Constructor from a duration
    pub fn from_duration(operator: FmmOperatorType, duration: Duration) -> Self {
        Self {
            operator,
            time: duration.as_millis() as u64,
        }
    }
}
